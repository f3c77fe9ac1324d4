//! Domain types for the product catalog.

use serde::{Deserialize, Serialize};

/// The closed set of product families the catalog is seeded with.
pub const FAMILIES: [&str; 5] = ["Electronics", "Home", "Office", "Sports", "Accessories"];

/// One catalog entry.
///
/// Products are bulk-created at seeding time and read-only afterwards.
/// `price >= cost` is the generator's intent but is not enforced by storage,
/// so no consumer may assume it holds. `suggested_prod_id` is a weak
/// reference: it may point at a `prod_id` that does not exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Stable business key, `PROD####`, immutable after creation
    pub prod_id: String,

    /// Owning account identifier
    pub account_id: String,

    /// Display name
    pub name: String,

    /// Display description
    pub description: String,

    /// Product photo URL
    pub photo_url: String,

    /// ISO currency code, fixed for the whole catalog
    pub currency: String,

    /// Non-negative acquisition cost
    pub cost: f64,

    /// Non-negative selling price
    pub price: f64,

    /// Weak reference to another product's `prod_id`; may dangle
    pub suggested_prod_id: Option<String>,

    /// Family tag from the closed set
    pub family: String,

    /// Free-text secondary tag
    pub subfamily: String,

    /// Unit of measure (e.g., "Unit", "Box")
    pub unit_of_measure: String,

    /// QR code payload
    pub qr_code: String,

    /// Informational restock threshold
    pub min_stock: u32,

    /// Availability flag; retrieval defaults to available-only
    pub status: bool,
}

/// One retrieved row: an ordered column-name → value mapping.
///
/// Rows keep whatever columns the executed statement selected, the same way
/// the catalog store reports them; consumers must not assume any particular
/// column set is present.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// The planner's output for one turn.
///
/// Records are concatenated in statement order, then row order, and are NOT
/// deduplicated across statements: a product matched by two sub-intents
/// legitimately appears twice. `truncated` is set when any single statement
/// matched more rows than the per-statement cap.
#[derive(Debug, Clone, Default)]
pub struct Retrieval {
    /// Retrieved rows, possibly empty
    pub records: Vec<Record>,

    /// Whether any statement's result was cut at the row cap
    pub truncated: bool,
}

impl Retrieval {
    /// An empty retrieval, the degraded result of any planning failure.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether no records were retrieved.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of retrieved records.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_retrieval() {
        let retrieval = Retrieval::empty();
        assert!(retrieval.is_empty());
        assert_eq!(retrieval.len(), 0);
        assert!(!retrieval.truncated);
    }

    #[test]
    fn test_product_serialization_roundtrip() {
        let product = Product {
            prod_id: "PROD0001".to_string(),
            account_id: "acct-1".to_string(),
            name: "Smart TV Ultra".to_string(),
            description: "A 55-inch panel.".to_string(),
            photo_url: "https://example.com/p/1.jpg".to_string(),
            currency: "PEN".to_string(),
            cost: 900.0,
            price: 1499.9,
            suggested_prod_id: Some("PROD0042".to_string()),
            family: "Electronics".to_string(),
            subfamily: "video".to_string(),
            unit_of_measure: "Unit".to_string(),
            qr_code: "abc123".to_string(),
            min_stock: 10,
            status: true,
        };

        let json = serde_json::to_string(&product).unwrap();
        let back: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(back.prod_id, "PROD0001");
        assert_eq!(back.suggested_prod_id.as_deref(), Some("PROD0042"));
        assert!(back.status);
    }
}
