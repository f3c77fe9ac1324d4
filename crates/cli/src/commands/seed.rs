//! Seed command handler.

use clap::Args;
use shelfmate_catalog::{seed::seed_if_empty, CatalogStore};
use shelfmate_core::config::AppConfig;
use shelfmate_core::AppResult;

/// Seed the catalog with synthetic products
#[derive(Args, Debug)]
pub struct SeedCommand {
    /// Number of products to generate (default: from config)
    #[arg(long)]
    pub count: Option<u32>,

    /// Clear the catalog and reseed even if it already has data
    #[arg(long)]
    pub force: bool,
}

impl SeedCommand {
    /// Execute the seed command.
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let count = self.count.unwrap_or(config.seed_count);
        tracing::info!("Seeding catalog with up to {} products", count);

        let store = CatalogStore::open(&config.catalog_path())?;

        if self.force {
            store.clear()?;
            tracing::info!("Cleared existing catalog");
        }

        let inserted = seed_if_empty(&store, count, &config.currency)?;

        if inserted > 0 {
            println!("Seeded {} products into {:?}", inserted, config.catalog_path());
        } else {
            println!(
                "Catalog already contains {} products; use --force to reseed",
                store.product_count()?
            );
        }

        Ok(())
    }
}
