//! Noise behavior across the whole pipeline: defects must reach the
//! persisted tables at the default rates, vanish in clean mode, and
//! stay confined to their own class when forced.

use std::collections::HashMap;

use chrono::NaiveDate;
use retailitics_core::columnar;
use retailitics_core::config::{GeneratorConfig, NoiseConfig};
use retailitics_core::generator::RetailDataGenerator;
use retailitics_core::transactions::TransactionStatus;

#[test]
fn clean_mode_masters_persist_without_defects() {
    let mut config = GeneratorConfig::default_test();
    config.noise = NoiseConfig::off();
    let expected_customers = config.num_customers;
    let expected_products = config.num_products;

    let dir = tempfile::tempdir().expect("tempdir");
    RetailDataGenerator::open(config, 42, dir.path()).expect("open");

    let customers = columnar::read_customers(&dir.path().join("customers.parquet")).expect("read");
    assert_eq!(customers.len(), expected_customers, "no duplicate clones in clean mode");
    for customer in &customers {
        assert!(customer.phone.is_some(), "{}: missing phone", customer.customer_id);
        let email = customer.email.as_deref().unwrap_or_else(|| panic!("{}: missing email", customer.customer_id));
        assert_eq!(email.matches('@').count(), 1, "{}: malformed {email}", customer.customer_id);
        assert!(customer.city.is_some() && customer.state.is_some() && customer.zip_code.is_some());
    }

    let products = columnar::read_products(&dir.path().join("products.parquet")).expect("read");
    assert_eq!(products.len(), expected_products);
    for product in &products {
        assert!(product.description.is_some(), "{}: missing description", product.product_id);
        assert!(product.cost < product.price, "{}: inverted margin", product.product_id);
        assert!(product.stock_quantity > 0, "{}: discontinued in clean mode", product.product_id);
    }
}

#[test]
fn default_rates_leave_defects_in_the_persisted_tables() {
    let dir = tempfile::tempdir().expect("tempdir");
    RetailDataGenerator::open(GeneratorConfig::default_test(), 42, dir.path()).expect("open");

    let customers = columnar::read_customers(&dir.path().join("customers.parquet")).expect("read");
    let missing_phone = customers.iter().filter(|c| c.phone.is_none()).count();
    let missing_email = customers.iter().filter(|c| c.email.is_none()).count();
    let double_at = customers
        .iter()
        .filter(|c| c.email.as_deref().is_some_and(|e| e.contains("@@")))
        .count();
    assert!(missing_phone > 0, "15% over 500 customers never fired");
    assert!(missing_email > 0, "5% over 500 customers never fired");
    assert!(double_at > 0, "malformed emails never reached the table");

    let products = columnar::read_products(&dir.path().join("products.parquet")).expect("read");
    let missing_description = products.iter().filter(|p| p.description.is_none()).count();
    let zero_stock = products.iter().filter(|p| p.stock_quantity == 0).count();
    assert!(missing_description > 0, "12% over 200 products never fired");
    assert!(zero_stock > 0, "the discontinuation pass makes ten picks, at least one must land");
}

#[test]
fn a_month_of_days_mixes_every_transaction_defect() {
    let dir = tempfile::tempdir().expect("tempdir");
    let generator = RetailDataGenerator::open(GeneratorConfig::default_test(), 42, dir.path())
        .expect("open");
    let master_price: HashMap<&str, f64> = generator
        .products()
        .iter()
        .map(|p| (p.product_id.as_str(), p.price))
        .collect();

    let mut completed = 0u64;
    let mut failed = 0u64;
    let mut refunded = 0u64;
    let mut missing_cashier = 0u64;
    let mut promos = 0u64;
    let mut typo_prices = 0u64;
    let mut discounted = 0u64;

    let start = NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date");
    for offset in 0..30 {
        let batch = generator.generate_daily_transactions(start + chrono::Duration::days(offset));
        for txn in &batch.transactions {
            match txn.status {
                TransactionStatus::Completed => completed += 1,
                TransactionStatus::Failed => failed += 1,
                TransactionStatus::Refunded => refunded += 1,
            }
            if txn.cashier_id.is_none() {
                missing_cashier += 1;
            }
            if txn.promotion_code.is_some() {
                promos += 1;
            }
        }
        for item in &batch.line_items {
            let listed = master_price.get(item.product_id.as_str()).copied().unwrap_or(0.0);
            if item.unit_price != listed {
                typo_prices += 1;
            }
            if item.discount_percent > 0.0 {
                discounted += 1;
            }
        }
    }

    // Rates are low but a month at ~110 transactions a day gives every
    // class thousands of chances.
    assert!(completed > failed + refunded, "completions must dominate");
    assert!(failed > 0, "0.8% failure rate never fired in a month");
    assert!(refunded > 0, "1.5% refund rate never fired in a month");
    assert!(missing_cashier > 0, "5% missing-cashier rate never fired");
    assert!(promos > 0, "10% promotion rate never fired");
    assert!(typo_prices > 0, "2% decimal-shift rate never fired");
    assert!(discounted > 0, "15% discount rate never fired");
}

#[test]
fn one_forced_class_fires_without_dragging_others_along() {
    let mut config = GeneratorConfig::default_test();
    config.noise = NoiseConfig::off();
    config.noise.missing_phone_rate = 1.0;

    let dir = tempfile::tempdir().expect("tempdir");
    let generator = RetailDataGenerator::open(config, 42, dir.path()).expect("open");

    for customer in generator.customers() {
        assert!(customer.phone.is_none(), "{}: forced rate missed", customer.customer_id);
        let email = customer.email.as_deref().unwrap_or_else(|| panic!("{}: email class leaked", customer.customer_id));
        assert_eq!(email.matches('@').count(), 1);
        assert!(customer.city.is_some() && customer.state.is_some() && customer.zip_code.is_some());
    }
}
