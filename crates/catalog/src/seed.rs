//! Synthetic catalog seeding.
//!
//! The catalog is populated once at process start if it is empty (or being
//! reset); the pipeline never writes to it afterwards. Product data is pure
//! fabrication: plausible names and descriptions per family, costs in a
//! fixed range with a retail markup, a minority of unavailable items, and
//! occasional suggested-product references that may dangle.

use crate::store::CatalogStore;
use crate::types::{Product, FAMILIES};
use rand::Rng;
use shelfmate_core::AppResult;

/// Share of products seeded as available.
const AVAILABLE_RATIO: f64 = 0.75;

/// Share of products carrying a suggested-product reference.
const SUGGESTED_RATIO: f64 = 0.15;

const ELECTRONICS_NAMES: [&str; 4] = ["Smart TV", "Laptop", "Headphones", "Tablet"];
const ELECTRONICS_QUALIFIERS: [&str; 4] = ["Ultra", "Max", "Air", "Pro"];
const HOME_QUALIFIERS: [&str; 4] = ["Breeze", "Orbit", "Nimbus", "Pulse"];
const OFFICE_QUALIFIERS: [&str; 4] = ["Atlas", "Prime", "Vertex", "Delta"];
const SPORT_COLORS: [&str; 4] = ["Crimson", "Cobalt", "Onyx", "Ivory"];
const SPORT_LINES: [&str; 4] = ["Trail", "Sprint", "Summit", "Glide"];
const SUBFAMILIES: [&str; 6] = ["premium", "standard", "compact", "classic", "outdoor", "pro"];
const UNITS: [&str; 2] = ["Unit", "Box"];

/// Seed the catalog with `count` synthetic products if it is currently
/// empty. Returns the number of products inserted (zero when the catalog
/// already has data).
pub fn seed_if_empty(store: &CatalogStore, count: u32, currency: &str) -> AppResult<u32> {
    if store.product_count()? > 0 {
        tracing::debug!("Catalog already seeded, skipping");
        return Ok(0);
    }

    let mut rng = rand::rng();
    let products = generate_products(count, currency, &mut rng);
    store.insert_products(&products)?;

    tracing::info!("Seeded catalog with {} products", count);
    Ok(count)
}

/// Generate `count` synthetic products with the given RNG.
///
/// Taking the RNG as a parameter keeps seeding reproducible in tests.
pub fn generate_products<R: Rng>(count: u32, currency: &str, rng: &mut R) -> Vec<Product> {
    (1..=count)
        .map(|i| generate_product(i, count, currency, rng))
        .collect()
}

fn generate_product<R: Rng>(id: u32, total: u32, currency: &str, rng: &mut R) -> Product {
    let family = FAMILIES[rng.random_range(0..FAMILIES.len())];
    let (name, description) = fabricate_copy(family, rng);

    // Cost in a fixed band, price as a retail markup on top of it. The
    // invariant price >= cost holds for generated data only; nothing
    // downstream is allowed to rely on it.
    let cost = round_money(rng.random_range(50.0..5000.0));
    let price = round_money(cost * rng.random_range(1.2..2.5));

    let suggested_prod_id = if rng.random_bool(SUGGESTED_RATIO) {
        // Drawn over the whole id space, so the reference may point at a
        // product that was never generated
        Some(format!("PROD{:04}", rng.random_range(1..=total.max(1))))
    } else {
        None
    };

    Product {
        prod_id: format!("PROD{:04}", id),
        account_id: format!("account-{:03}", rng.random_range(1..100)),
        name,
        description,
        photo_url: format!("https://catalog.example/photos/{:04}.jpg", id),
        currency: currency.to_string(),
        cost,
        price,
        suggested_prod_id,
        family: family.to_string(),
        subfamily: SUBFAMILIES[rng.random_range(0..SUBFAMILIES.len())].to_string(),
        unit_of_measure: UNITS[rng.random_range(0..UNITS.len())].to_string(),
        qr_code: format!("{:032x}", rng.random::<u128>()),
        min_stock: rng.random_range(5..=50),
        status: rng.random_bool(AVAILABLE_RATIO),
    }
}

/// Fabricate a name and description matching the family's register.
fn fabricate_copy<R: Rng>(family: &str, rng: &mut R) -> (String, String) {
    match family {
        "Electronics" => {
            let base = ELECTRONICS_NAMES[rng.random_range(0..ELECTRONICS_NAMES.len())];
            let qualifier =
                ELECTRONICS_QUALIFIERS[rng.random_range(0..ELECTRONICS_QUALIFIERS.len())];
            let ram = rng.random_range(4..=16u32);
            let name = format!("{} {}", base, qualifier);
            let description = format!(
                "A latest-generation {} with {}GB of RAM and a high-speed processor.",
                name, ram
            );
            (name, description)
        }
        "Home" => {
            let qualifier = HOME_QUALIFIERS[rng.random_range(0..HOME_QUALIFIERS.len())];
            let suction = rng.random_range(1000..=3000u32);
            let name = format!("Robot Vacuum {}", qualifier);
            let description = format!(
                "Smart vacuum with {} Pa of suction and laser mapping.",
                suction
            );
            (name, description)
        }
        "Office" => {
            let qualifier = OFFICE_QUALIFIERS[rng.random_range(0..OFFICE_QUALIFIERS.len())];
            let name = format!("Ergonomic Chair '{}'", qualifier);
            let description =
                "Executive mesh chair with breathable back and adjustable lumbar support."
                    .to_string();
            (name, description)
        }
        _ => {
            let color = SPORT_COLORS[rng.random_range(0..SPORT_COLORS.len())];
            let line = SPORT_LINES[rng.random_range(0..SPORT_LINES.len())];
            let size = rng.random_range(35..=45u32);
            let name = format!("Running Shoes {} {}", color, line);
            let description = format!(
                "Footwear built for running and high-intensity training. Size {}.",
                size
            );
            (name, description)
        }
    }
}

fn round_money(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
