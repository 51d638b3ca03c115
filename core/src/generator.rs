//! Top-level orchestration: the master data lifecycle plus the daily
//! cycle of generate, persist, summarize, mark complete.
//!
//! EXECUTION ORDER per day:
//!   1. transactions_<date>.parquet
//!   2. daily_summary_<date>.json
//!   3. manifest_<date>.json   (completion marker, written last)
//!
//! RULE: a manifest is the only skip signal. Data files sitting there
//! without their manifest are leftovers from an interrupted run and
//! get overwritten on the next attempt.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::columnar;
use crate::config::GeneratorConfig;
use crate::customers::{self, CustomerRecord};
use crate::error::{GenError, GenResult};
use crate::manifest::{self, RunManifest};
use crate::products::{self, ProductRecord};
use crate::rng::{RngBank, StreamSlot};
use crate::stores::{self, StoreRecord};
use crate::summary;
use crate::transactions::{self, DayBatch};

const STORES_FILE: &str = "stores.parquet";
const PRODUCTS_FILE: &str = "products.parquet";
const CUSTOMERS_FILE: &str = "customers.parquet";

pub struct RetailDataGenerator {
    config: GeneratorConfig,
    seed: u64,
    out_dir: PathBuf,
    bank: RngBank,
    stores: Vec<StoreRecord>,
    products: Vec<ProductRecord>,
    customers: Vec<CustomerRecord>,
}

impl RetailDataGenerator {
    /// Open the output directory, loading cached master data when the
    /// manifest and all three tables are intact, regenerating the full
    /// triad otherwise. Partial caches are never repaired in place.
    pub fn open(
        config: GeneratorConfig,
        seed: u64,
        out_dir: impl Into<PathBuf>,
    ) -> GenResult<Self> {
        let out_dir = out_dir.into();
        std::fs::create_dir_all(&out_dir)?;

        let mut generator = Self {
            config,
            seed,
            out_dir,
            bank: RngBank::new(seed),
            stores: Vec::new(),
            products: Vec::new(),
            customers: Vec::new(),
        };

        match generator.try_load_master() {
            Ok(true) => {
                log::info!(
                    "master data: loaded {} stores, {} products, {} customers from {}",
                    generator.stores.len(),
                    generator.products.len(),
                    generator.customers.len(),
                    generator.out_dir.display()
                );
            }
            Ok(false) => {
                log::info!(
                    "master data: no manifest in {}, generating",
                    generator.out_dir.display()
                );
                generator.generate_master()?;
            }
            Err(err) => {
                log::warn!("master data: reload failed ({err}), regenerating");
                generator.generate_master()?;
            }
        }

        Ok(generator)
    }

    /// Discard in-memory populations and rebuild the triad from the
    /// seed, overwriting whatever the directory holds.
    pub fn force_regenerate_master_data(&mut self) -> GenResult<()> {
        log::info!("master data: forced regeneration");
        self.generate_master()
    }

    /// A day's batch, derived purely from seed, config and date. No
    /// filesystem access; calling twice gives identical output.
    pub fn generate_daily_transactions(&self, date: NaiveDate) -> DayBatch {
        let mut rng = self.bank.for_date(date);
        transactions::generate_day(
            &self.config,
            &self.stores,
            &self.products,
            &self.customers,
            date,
            &mut rng,
        )
    }

    /// Generate and persist one day. Skips (returning an empty batch)
    /// when the day's manifest already exists.
    pub fn generate_and_save_daily(&self, date: NaiveDate) -> GenResult<DayBatch> {
        let manifest_path = manifest::daily_manifest_path(&self.out_dir, date);
        if manifest_path.exists() {
            log::info!("daily {date}: manifest already present, skipping generation");
            return Ok(DayBatch::empty(date));
        }

        let batch = self.generate_daily_transactions(date);

        let transactions_path = self.transactions_path(date);
        columnar::write_transactions(&transactions_path, &batch)?;

        let daily_summary = summary::summarize(&batch, self.config.top_products_limit);
        let summary_path = self.summary_path(date);
        manifest::write_json_pretty(&summary_path, &daily_summary)?;

        let mut run = RunManifest::new(self.seed);
        run.record_file(&transactions_path, batch.line_items.len() as u64)?;
        run.record_file(&summary_path, 1)?;
        run.write(&manifest_path)?;

        log::info!(
            "daily {date}: {} transactions, {} line items, revenue {:.2}",
            batch.transactions.len(),
            batch.line_items.len(),
            daily_summary.total_revenue
        );
        Ok(batch)
    }

    pub fn transactions_path(&self, date: NaiveDate) -> PathBuf {
        self.out_dir.join(format!("transactions_{date}.parquet"))
    }

    pub fn summary_path(&self, date: NaiveDate) -> PathBuf {
        self.out_dir.join(format!("daily_summary_{date}.json"))
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn stores(&self) -> &[StoreRecord] {
        &self.stores
    }

    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    pub fn customers(&self) -> &[CustomerRecord] {
        &self.customers
    }

    fn try_load_master(&mut self) -> GenResult<bool> {
        let manifest_path = manifest::master_manifest_path(&self.out_dir);
        if !manifest_path.exists() {
            return Ok(false);
        }

        let run = RunManifest::load(&manifest_path)?;
        if run.schema_version != manifest::SCHEMA_VERSION {
            return Err(GenError::MasterDataLoad(format!(
                "manifest schema v{} does not match v{}",
                run.schema_version,
                manifest::SCHEMA_VERSION
            )));
        }

        let stores = columnar::read_stores(&self.out_dir.join(STORES_FILE))?;
        let products = columnar::read_products(&self.out_dir.join(PRODUCTS_FILE))?;
        let customers = columnar::read_customers(&self.out_dir.join(CUSTOMERS_FILE))?;
        if stores.is_empty() || products.is_empty() || customers.is_empty() {
            return Err(GenError::MasterDataLoad("cached master table is empty".to_string()));
        }

        self.stores = stores;
        self.products = products;
        self.customers = customers;
        Ok(true)
    }

    fn generate_master(&mut self) -> GenResult<()> {
        let mut store_rng = self.bank.for_stream(StreamSlot::Stores);
        self.stores = stores::generate(&self.config, &mut store_rng);
        let mut product_rng = self.bank.for_stream(StreamSlot::Products);
        self.products = products::generate(&self.config, &mut product_rng);
        let mut customer_rng = self.bank.for_stream(StreamSlot::Customers);
        self.customers = customers::generate(&self.config, &mut customer_rng);

        let stores_path = self.out_dir.join(STORES_FILE);
        let products_path = self.out_dir.join(PRODUCTS_FILE);
        let customers_path = self.out_dir.join(CUSTOMERS_FILE);
        columnar::write_stores(&stores_path, &self.stores)?;
        columnar::write_products(&products_path, &self.products)?;
        columnar::write_customers(&customers_path, &self.customers)?;

        let mut run = RunManifest::new(self.seed);
        run.record_file(&stores_path, self.stores.len() as u64)?;
        run.record_file(&products_path, self.products.len() as u64)?;
        run.record_file(&customers_path, self.customers.len() as u64)?;
        run.write(&manifest::master_manifest_path(&self.out_dir))?;

        log::info!("master data: triad and manifest written to {}", self.out_dir.display());
        Ok(())
    }
}
