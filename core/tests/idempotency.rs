//! The daily cycle must be safe to re-run: the manifest is the skip
//! signal, and anything on disk without a manifest is rebuilt.

use chrono::NaiveDate;
use retailitics_core::{columnar, config::GeneratorConfig, generator::RetailDataGenerator};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn second_run_skips_and_leaves_files_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    let generator = RetailDataGenerator::open(GeneratorConfig::default_test(), 42, dir.path())
        .expect("open");
    let day = date(2025, 3, 15);

    let first = generator.generate_and_save_daily(day).expect("first run");
    assert!(!first.is_empty(), "first run should generate transactions");

    let txn_path = generator.transactions_path(day);
    let summary_path = generator.summary_path(day);
    let txn_bytes = std::fs::read(&txn_path).expect("transactions file");
    let summary_bytes = std::fs::read(&summary_path).expect("summary file");

    let second = generator.generate_and_save_daily(day).expect("second run");
    assert!(second.is_empty(), "second run for the same date must return empty");
    assert!(second.transactions.is_empty() && second.line_items.is_empty());

    assert_eq!(
        std::fs::read(&txn_path).expect("transactions file"),
        txn_bytes,
        "transactions file changed on a skipped run"
    );
    assert_eq!(
        std::fs::read(&summary_path).expect("summary file"),
        summary_bytes,
        "summary file changed on a skipped run"
    );
}

#[test]
fn a_day_without_its_manifest_is_regenerated() {
    let dir = tempfile::tempdir().expect("tempdir");
    let generator = RetailDataGenerator::open(GeneratorConfig::default_test(), 42, dir.path())
        .expect("open");
    let day = date(2025, 3, 16);

    generator.generate_and_save_daily(day).expect("first run");
    let manifest = retailitics_core::manifest::daily_manifest_path(dir.path(), day);
    std::fs::remove_file(&manifest).expect("drop manifest");

    // Data files are still there, but without the completion marker
    // the run counts as interrupted.
    let rerun = generator.generate_and_save_daily(day).expect("rerun");
    assert!(!rerun.is_empty(), "missing manifest must force regeneration");
    assert!(manifest.exists(), "rerun must write the manifest back");
}

#[test]
fn master_cache_is_reused_across_opens() {
    let dir = tempfile::tempdir().expect("tempdir");
    let first = RetailDataGenerator::open(GeneratorConfig::default_test(), 42, dir.path())
        .expect("first open");
    let stores_bytes = std::fs::read(dir.path().join("stores.parquet")).expect("stores");

    let second = RetailDataGenerator::open(GeneratorConfig::default_test(), 42, dir.path())
        .expect("second open");

    assert_eq!(first.stores(), second.stores(), "reloaded stores differ from generated");
    assert_eq!(first.products(), second.products());
    assert_eq!(first.customers(), second.customers());
    assert_eq!(
        std::fs::read(dir.path().join("stores.parquet")).expect("stores"),
        stores_bytes,
        "second open must not rewrite an intact master table"
    );
}

#[test]
fn corrupt_master_table_forces_full_regeneration() {
    let dir = tempfile::tempdir().expect("tempdir");
    let first = RetailDataGenerator::open(GeneratorConfig::default_test(), 42, dir.path())
        .expect("first open");
    let products_before = first.products().to_vec();

    std::fs::write(dir.path().join("products.parquet"), b"definitely not parquet")
        .expect("corrupt table");

    let second = RetailDataGenerator::open(GeneratorConfig::default_test(), 42, dir.path())
        .expect("reopen over corrupt table");

    // Same seed, so the regenerated triad matches the original one.
    assert_eq!(second.products(), products_before.as_slice());
    let reread = columnar::read_products(&dir.path().join("products.parquet"))
        .expect("regenerated table parses");
    assert_eq!(reread.len(), products_before.len());
}

#[test]
fn missing_master_manifest_with_tables_present_regenerates() {
    let dir = tempfile::tempdir().expect("tempdir");
    let first = RetailDataGenerator::open(GeneratorConfig::default_test(), 42, dir.path())
        .expect("first open");
    let customers_before = first.customers().to_vec();

    let manifest = retailitics_core::manifest::master_manifest_path(dir.path());
    std::fs::remove_file(&manifest).expect("drop master manifest");

    let second = RetailDataGenerator::open(GeneratorConfig::default_test(), 42, dir.path())
        .expect("reopen without manifest");

    assert!(manifest.exists(), "reopen must restore the master manifest");
    assert_eq!(second.customers(), customers_before.as_slice());
}

#[test]
fn force_regenerate_overwrites_the_cache() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut generator = RetailDataGenerator::open(GeneratorConfig::default_test(), 42, dir.path())
        .expect("open");
    let stores_before = generator.stores().to_vec();

    generator.force_regenerate_master_data().expect("force regenerate");

    // Same seed, same streams: the rebuild lands on identical data.
    assert_eq!(generator.stores(), stores_before.as_slice());
    let rows = columnar::count_rows(&dir.path().join("stores.parquet")).expect("row count");
    assert_eq!(rows, stores_before.len() as u64);
}
