use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Top-level knobs for one generation run.
///
/// Loadable from a single JSON file; any field left out of the file
/// falls back to the production default below, so override files can
/// stay minimal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub num_stores: usize,
    pub num_products: usize,
    pub num_customers: usize,
    /// Base daily volume is this divided by 30, truncating.
    pub target_monthly_transactions: u64,
    pub tax_rate: f64,
    /// Chance that a line item carries a discount (5-25% uniform).
    pub discount_rate: f64,
    /// Chance that a transaction carries a promotion code.
    pub promotion_rate: f64,
    pub brand_pool_size: usize,
    pub cashier_pool_size: u64,
    pub top_products_limit: usize,
    /// Anchor for all relative date sampling (openings, launches,
    /// birthdays, registrations). Anchoring here instead of the wall
    /// clock keeps a given seed byte-identical no matter when it runs.
    pub reference_date: NaiveDate,
    pub noise: NoiseConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_stores: 25,
            num_products: 12_000,
            num_customers: 55_000,
            target_monthly_transactions: 120_000,
            tax_rate: 0.08,
            discount_rate: 0.15,
            promotion_rate: 0.10,
            brand_pool_size: 200,
            cashier_pool_size: 200,
            top_products_limit: 10,
            reference_date: epoch_2025(),
            noise: NoiseConfig::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: GeneratorConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Transactions per day before the weekday multiplier.
    pub fn base_daily_volume(&self) -> u64 {
        self.target_monthly_transactions / 30
    }

    /// Small populations for fast tests. Noise stays on at the
    /// production rates so the defect paths are exercised.
    pub fn default_test() -> Self {
        Self {
            num_stores: 5,
            num_products: 200,
            num_customers: 500,
            target_monthly_transactions: 3_000,
            ..Self::default()
        }
    }
}

/// One probability knob per defect class. Defaults mirror the defect
/// density of a real point-of-sale export; zero them all (or use
/// [`NoiseConfig::off`]) for clean reference data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    pub duplicate_email_rate: f64,
    pub missing_phone_rate: f64,
    pub missing_email_rate: f64,
    pub invalid_email_rate: f64,
    pub missing_address_rate: f64,
    pub missing_description_rate: f64,
    pub price_inconsistency_rate: f64,
    pub missing_cashier_rate: f64,
    pub failed_transaction_rate: f64,
    pub refund_rate: f64,
    pub data_entry_error_rate: f64,
    pub sku_collision_rate: f64,
    pub discontinued_rate: f64,
    pub complete_duplicate_rate: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            duplicate_email_rate: 0.02,
            missing_phone_rate: 0.15,
            missing_email_rate: 0.05,
            invalid_email_rate: 0.03,
            missing_address_rate: 0.08,
            missing_description_rate: 0.12,
            price_inconsistency_rate: 0.01,
            missing_cashier_rate: 0.05,
            failed_transaction_rate: 0.008,
            refund_rate: 0.015,
            data_entry_error_rate: 0.02,
            sku_collision_rate: 0.02,
            discontinued_rate: 0.05,
            complete_duplicate_rate: 0.001,
        }
    }
}

impl NoiseConfig {
    /// Clean-data mode: every defect class disabled.
    pub fn off() -> Self {
        Self {
            duplicate_email_rate: 0.0,
            missing_phone_rate: 0.0,
            missing_email_rate: 0.0,
            invalid_email_rate: 0.0,
            missing_address_rate: 0.0,
            missing_description_rate: 0.0,
            price_inconsistency_rate: 0.0,
            missing_cashier_rate: 0.0,
            failed_transaction_rate: 0.0,
            refund_rate: 0.0,
            data_entry_error_rate: 0.0,
            sku_collision_rate: 0.0,
            discontinued_rate: 0.0,
            complete_duplicate_rate: 0.0,
        }
    }
}

fn epoch_2025() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default()
}
