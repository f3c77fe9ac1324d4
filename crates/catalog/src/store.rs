//! SQLite-backed product catalog store.
//!
//! The store is seeded once and read-only afterwards; concurrent turns share
//! it behind a connection mutex. Statement execution reports rows as dynamic
//! column-name → value maps so the planner never depends on a compiled-in
//! row shape beyond the published schema.

use crate::types::{Product, Record};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection};
use shelfmate_core::{AppError, AppResult};
use std::path::Path;
use std::sync::Mutex;

/// Product catalog store over SQLite.
pub struct CatalogStore {
    conn: Mutex<Connection>,
}

impl CatalogStore {
    /// Open (or create) the catalog database at the given path.
    pub fn open(db_path: &Path) -> AppResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Catalog(format!("Failed to create catalog directory: {}", e))
            })?;
        }

        let conn = Connection::open(db_path)
            .map_err(|e| AppError::Catalog(format!("Failed to open catalog database: {}", e)))?;

        init_schema(&conn)?;

        tracing::debug!("Opened catalog store at {:?}", db_path);
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory catalog, used by tests and throwaway sessions.
    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| AppError::Catalog(format!("Failed to open in-memory catalog: {}", e)))?;

        init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Number of products currently in the catalog.
    pub fn product_count(&self) -> AppResult<u32> {
        let conn = self.lock()?;
        conn.query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))
            .map_err(|e| AppError::Catalog(format!("Failed to count products: {}", e)))
    }

    /// Bulk-insert products at seeding time.
    pub fn insert_products(&self, products: &[Product]) -> AppResult<()> {
        let mut conn = self.lock()?;

        let tx = conn
            .transaction()
            .map_err(|e| AppError::Catalog(format!("Failed to start transaction: {}", e)))?;

        for product in products {
            tx.execute(
                "INSERT INTO products (
                    prod_id, account_id, name, description, photo_url, currency,
                    cost, price, suggested_prod_id, family, subfamily,
                    unit_of_measure, qr_code, min_stock, status
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
                params![
                    product.prod_id,
                    product.account_id,
                    product.name,
                    product.description,
                    product.photo_url,
                    product.currency,
                    product.cost,
                    product.price,
                    product.suggested_prod_id,
                    product.family,
                    product.subfamily,
                    product.unit_of_measure,
                    product.qr_code,
                    product.min_stock,
                    product.status,
                ],
            )
            .map_err(|e| {
                AppError::Catalog(format!("Failed to insert {}: {}", product.prod_id, e))
            })?;
        }

        tx.commit()
            .map_err(|e| AppError::Catalog(format!("Failed to commit seed batch: {}", e)))?;

        tracing::info!("Inserted {} products into the catalog", products.len());
        Ok(())
    }

    /// Delete all products, used when reseeding with `--force`.
    pub fn clear(&self) -> AppResult<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM products", [])
            .map_err(|e| AppError::Catalog(format!("Failed to clear catalog: {}", e)))?;
        Ok(())
    }

    /// Execute one read statement and collect up to `max_rows` rows.
    ///
    /// Fetches one row past the cap so the caller learns whether the result
    /// was actually cut short. Returns the collected rows (each a
    /// column-name → value map in selection order) and the truncation flag.
    ///
    /// Statement validation is the planner's job; this method only runs what
    /// it is given and converts SQLite failures into per-statement
    /// `AppError::Catalog` values.
    pub fn execute_read(&self, sql: &str, max_rows: usize) -> AppResult<(Vec<Record>, bool)> {
        let conn = self.lock()?;

        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| AppError::Catalog(format!("Failed to prepare statement: {}", e)))?;

        let column_names: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();

        let mut rows = stmt
            .query([])
            .map_err(|e| AppError::Catalog(format!("Failed to execute statement: {}", e)))?;

        let mut records: Vec<Record> = Vec::new();
        let mut truncated = false;

        while let Some(row) = rows
            .next()
            .map_err(|e| AppError::Catalog(format!("Failed to read row: {}", e)))?
        {
            if records.len() == max_rows {
                truncated = true;
                break;
            }

            let mut record = Record::new();
            for (idx, name) in column_names.iter().enumerate() {
                let value = row
                    .get_ref(idx)
                    .map_err(|e| AppError::Catalog(format!("Failed to read column: {}", e)))?;
                record.insert(name.clone(), sql_value_to_json(value));
            }
            records.push(record);
        }

        tracing::debug!(
            "Statement returned {} rows (cap {}, truncated: {})",
            records.len(),
            max_rows,
            truncated
        );

        Ok((records, truncated))
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| AppError::Catalog("Catalog connection lock poisoned".to_string()))
    }
}

/// Create the products table if it does not exist.
fn init_schema(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            prod_id TEXT NOT NULL UNIQUE,
            account_id TEXT,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            photo_url TEXT,
            currency TEXT,
            cost REAL,
            price REAL NOT NULL,
            suggested_prod_id TEXT,
            family TEXT,
            subfamily TEXT,
            unit_of_measure TEXT,
            qr_code TEXT,
            min_stock INTEGER,
            status BOOLEAN
        );

        CREATE INDEX IF NOT EXISTS idx_products_family ON products(family);
        CREATE INDEX IF NOT EXISTS idx_products_price ON products(price);
        "#,
    )
    .map_err(|e| AppError::Catalog(format!("Failed to create catalog schema: {}", e)))?;

    Ok(())
}

/// Convert a SQLite value to JSON for the record map.
fn sql_value_to_json(value: ValueRef<'_>) -> serde_json::Value {
    match value {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Integer(i) => serde_json::Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(text) => {
            serde_json::Value::String(String::from_utf8_lossy(text).into_owned())
        }
        // Binary columns (none in this schema) have no JSON shape worth keeping
        ValueRef::Blob(_) => serde_json::Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::generate_products;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded_store(count: u32) -> CatalogStore {
        let store = CatalogStore::open_in_memory().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let products = generate_products(count, "PEN", &mut rng);
        store.insert_products(&products).unwrap();
        store
    }

    #[test]
    fn test_open_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::open(&dir.path().join("nested/catalog.db")).unwrap();
        assert_eq!(store.product_count().unwrap(), 0);
    }

    #[test]
    fn test_insert_and_count() {
        let store = seeded_store(25);
        assert_eq!(store.product_count().unwrap(), 25);
    }

    #[test]
    fn test_clear() {
        let store = seeded_store(10);
        store.clear().unwrap();
        assert_eq!(store.product_count().unwrap(), 0);
    }

    #[test]
    fn test_execute_read_caps_rows() {
        let store = seeded_store(20);
        let (records, truncated) = store
            .execute_read("SELECT prod_id, name, price FROM products", 5)
            .unwrap();

        assert_eq!(records.len(), 5);
        assert!(truncated);
    }

    #[test]
    fn test_execute_read_exact_fit_is_not_truncated() {
        let store = seeded_store(3);
        let (records, truncated) = store
            .execute_read("SELECT prod_id FROM products", 5)
            .unwrap();

        assert_eq!(records.len(), 3);
        assert!(!truncated);
    }

    #[test]
    fn test_execute_read_reports_column_names() {
        let store = seeded_store(1);
        let (records, _) = store
            .execute_read("SELECT prod_id, price, status FROM products LIMIT 1", 5)
            .unwrap();

        let record = &records[0];
        assert!(record.contains_key("prod_id"));
        assert!(record.contains_key("price"));
        assert!(record.contains_key("status"));
        assert!(record["price"].is_number());
    }

    #[test]
    fn test_execute_read_bad_statement_is_error() {
        let store = seeded_store(1);
        let result = store.execute_read("SELECT nonexistent_column FROM products", 5);
        assert!(matches!(result, Err(AppError::Catalog(_))));
    }

    #[test]
    fn test_null_suggested_id_maps_to_json_null() {
        let store = CatalogStore::open_in_memory().unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let mut products = generate_products(1, "PEN", &mut rng);
        products[0].suggested_prod_id = None;
        store.insert_products(&products).unwrap();

        let (records, _) = store
            .execute_read("SELECT suggested_prod_id FROM products", 5)
            .unwrap();
        assert!(records[0]["suggested_prod_id"].is_null());
    }
}
