//! Product master data.
//!
//! EXECUTION ORDER per run:
//!   1. Mint the brand pool (brands repeat across products).
//!   2. Mint every product, defects inline.
//!   3. Discontinuation pass: zero out stock on a fixed fraction and
//!      backdate their launch to two-to-five years before reference.
//!
//! Step 3 is what makes the discontinued-product rule checkable: any
//! product with zero stock must have a launch date at least two years
//! old.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, ADJECTIVES, CATEGORIES};
use crate::config::{GeneratorConfig, NoiseConfig};
use crate::rng::StreamRng;
use crate::types::{round_cents, EntityId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_id: EntityId,
    pub product_name: String,
    pub category: String,
    pub subcategory: String,
    pub brand: String,
    pub price: f64,
    pub cost: f64,
    pub sku: String,
    pub description: Option<String>,
    pub weight: f64,
    pub dimensions: String,
    pub stock_quantity: i64,
    pub supplier: String,
    pub launch_date: NaiveDate,
}

/// Mint the product catalog. Draw order is fixed; reordering changes
/// every seeded output.
pub fn generate(config: &GeneratorConfig, rng: &mut StreamRng) -> Vec<ProductRecord> {
    let mut brands = Vec::with_capacity(config.brand_pool_size);
    for _ in 0..config.brand_pool_size {
        brands.push(Catalog::company_name(rng));
    }

    let mut seen_skus: HashSet<String> = HashSet::new();
    let mut products = Vec::with_capacity(config.num_products);
    for i in 0..config.num_products {
        products.push(single_product(config, &brands, &mut seen_skus, i, rng));
    }

    // Discontinuation pass. Picks are with replacement; re-touching a
    // product just re-draws its backdated launch.
    let discontinued = (products.len() as f64 * config.noise.discontinued_rate) as usize;
    for _ in 0..discontinued {
        let idx = rng.next_u64_below(products.len() as u64) as usize;
        let product = &mut products[idx];
        product.stock_quantity = 0;
        product.launch_date = rng.date_back(config.reference_date, 730, 1825);
    }

    let minted = products.len();
    log::info!("products: minted {minted} products ({discontinued} discontinuation picks)");
    products
}

fn single_product(
    config: &GeneratorConfig,
    brands: &[String],
    seen_skus: &mut HashSet<String>,
    index: usize,
    rng: &mut StreamRng,
) -> ProductRecord {
    let noise = &config.noise;
    let category = rng.pick(CATEGORIES);
    let adjective = rng.pick(ADJECTIVES);
    let item = rng.pick(category.items);
    let subcategory = rng.pick(category.subcategories);
    let brand = rng.pick(brands).clone();

    let price = round_cents(rng.uniform(category.price_min, category.price_max));
    // Cost normally lands at 40-70% of price; the inconsistency defect
    // pushes it above price to break margin checks downstream.
    let mut cost = round_cents(price * rng.uniform(0.4, 0.7));
    if rng.chance(noise.price_inconsistency_rate) {
        cost = round_cents(price * rng.uniform(1.1, 1.5));
    }

    let sku = mint_sku(seen_skus, noise, rng);

    let description = if rng.chance(noise.missing_description_rate) {
        None
    } else {
        let mut text = Catalog::sentence(rng, 8, 20);
        text.truncate(200);
        Some(text)
    };

    let mut weight = round_cents(rng.uniform(0.1, 50.0));
    if rng.chance(noise.data_entry_error_rate) {
        // Unit mix-up: grams keyed as kilograms, or the reverse.
        weight = if rng.chance(0.5) {
            (rng.uniform(0.001, 0.01) * 1000.0).round() / 1000.0
        } else {
            round_cents(rng.uniform(500.0, 1000.0))
        };
    }

    let dimensions = format!(
        "{}x{}x{}",
        1 + rng.next_u64_below(50),
        1 + rng.next_u64_below(50),
        1 + rng.next_u64_below(50)
    );

    ProductRecord {
        product_id: format!("PRD{:06}", index + 1),
        product_name: format!("{adjective} {item}"),
        category: category.name.to_string(),
        subcategory: subcategory.to_string(),
        brand,
        price,
        cost,
        sku,
        description,
        weight,
        dimensions,
        // Bulk stock is always positive; zero stock only ever comes
        // from the discontinuation pass.
        stock_quantity: (1 + rng.next_u64_below(1000)) as i64,
        supplier: Catalog::company_name(rng),
        launch_date: rng.date_back(config.reference_date, 0, 730),
    }
}

/// SKUs are soft-unique: a real collision, or the collision defect
/// firing, yields a "-N" variant suffix instead of a fresh draw.
fn mint_sku(seen: &mut HashSet<String>, noise: &NoiseConfig, rng: &mut StreamRng) -> String {
    let mut sku = format!("SKU{}", 100_000 + rng.next_u64_below(900_000));
    if seen.contains(&sku) || rng.chance(noise.sku_collision_rate) {
        sku = format!("{}-{}", sku, 1 + rng.next_u64_below(99));
    }
    seen.insert(sku.clone());
    sku
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, StreamSlot};

    fn test_catalog() -> (GeneratorConfig, Vec<ProductRecord>) {
        let config = GeneratorConfig::default_test();
        let mut rng = RngBank::new(42).for_stream(StreamSlot::Products);
        let products = generate(&config, &mut rng);
        (config, products)
    }

    #[test]
    fn product_ids_are_sequential() {
        let (_, products) = test_catalog();
        assert_eq!(products.len(), 200);
        for (i, product) in products.iter().enumerate() {
            assert_eq!(product.product_id, format!("PRD{:06}", i + 1));
        }
    }

    #[test]
    fn prices_respect_category_bands() {
        let (_, products) = test_catalog();
        for product in &products {
            let category = CATEGORIES
                .iter()
                .find(|c| c.name == product.category)
                .unwrap_or_else(|| panic!("{}: unknown category {}", product.product_id, product.category));
            assert!(
                product.price >= category.price_min && product.price <= category.price_max,
                "{}: price {} outside band for {}",
                product.product_id,
                product.price,
                product.category
            );
        }
    }

    #[test]
    fn discontinued_products_are_backdated() {
        let (config, products) = test_catalog();
        let mut discontinued = 0;
        for product in &products {
            if product.stock_quantity == 0 {
                discontinued += 1;
                let age = (config.reference_date - product.launch_date).num_days();
                assert!(
                    age >= 730,
                    "{}: discontinued but launched only {age} days before reference",
                    product.product_id
                );
            }
        }
        assert!(discontinued > 0, "a 5% rate over 200 products should hit at least once");
    }

    #[test]
    fn clean_mode_has_no_product_defects() {
        let mut config = GeneratorConfig::default_test();
        config.noise = NoiseConfig::off();
        let mut rng = RngBank::new(42).for_stream(StreamSlot::Products);
        let products = generate(&config, &mut rng);
        for product in &products {
            assert!(product.description.is_some(), "{}: missing description", product.product_id);
            assert!(product.cost < product.price, "{}: cost above price", product.product_id);
            assert!(product.stock_quantity > 0, "{}: zero stock in clean mode", product.product_id);
            assert!(
                (0.1..=50.0).contains(&product.weight),
                "{}: corrupted weight {}",
                product.product_id,
                product.weight
            );
        }
    }

    #[test]
    fn skus_with_suffix_stay_distinct_enough() {
        let (_, products) = test_catalog();
        let unique: HashSet<&str> = products.iter().map(|p| p.sku.as_str()).collect();
        // The "-N" variant scheme keeps collisions possible but rare.
        assert!(
            unique.len() >= products.len() - 2,
            "too many SKU collisions: {} unique of {}",
            unique.len(),
            products.len()
        );
    }
}
