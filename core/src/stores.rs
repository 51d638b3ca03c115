//! Store master data.
//!
//! Stores are the one population that carries no injected defects:
//! downstream joins need at least one clean dimension table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, STORE_TYPE_WORDS};
use crate::config::GeneratorConfig;
use crate::rng::StreamRng;
use crate::types::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreType {
    Flagship,
    Mall,
    Outlet,
    Express,
    Online,
}

impl StoreType {
    pub const ALL: [StoreType; 5] = [
        StoreType::Flagship,
        StoreType::Mall,
        StoreType::Outlet,
        StoreType::Express,
        StoreType::Online,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flagship => "Flagship",
            Self::Mall => "Mall",
            Self::Outlet => "Outlet",
            Self::Express => "Express",
            Self::Online => "Online",
        }
    }

    pub fn parse(s: &str) -> Option<StoreType> {
        Self::ALL.iter().copied().find(|t| t.as_str() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRecord {
    pub store_id: EntityId,
    pub store_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: String,
    pub manager: String,
    pub store_type: StoreType,
    pub opening_date: NaiveDate,
}

/// Mint the store fleet. Draw order per store is fixed; reordering
/// changes every seeded output.
pub fn generate(config: &GeneratorConfig, rng: &mut StreamRng) -> Vec<StoreRecord> {
    let mut stores = Vec::with_capacity(config.num_stores);
    for i in 0..config.num_stores {
        let company = Catalog::company_name(rng);
        // The type word in the name is drawn independently of the
        // typed store_type field, as the upstream data did.
        let type_word = rng.pick(STORE_TYPE_WORDS);
        stores.push(StoreRecord {
            store_id: format!("ST{:03}", i + 1),
            store_name: format!("{company} {type_word}"),
            address: Catalog::street_address(rng),
            city: Catalog::city(rng).to_string(),
            state: Catalog::state(rng).to_string(),
            zip_code: Catalog::zip_code(rng),
            phone: Catalog::phone_number(rng),
            manager: Catalog::full_name(rng),
            store_type: *rng.pick(&StoreType::ALL),
            opening_date: rng.date_back(config.reference_date, 0, 1825),
        });
    }
    let minted = stores.len();
    log::info!("stores: minted {minted} stores");
    stores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, StreamSlot};

    fn test_fleet() -> Vec<StoreRecord> {
        let config = GeneratorConfig::default_test();
        let mut rng = RngBank::new(42).for_stream(StreamSlot::Stores);
        generate(&config, &mut rng)
    }

    #[test]
    fn store_ids_are_sequential() {
        let stores = test_fleet();
        assert_eq!(stores.len(), 5);
        for (i, store) in stores.iter().enumerate() {
            assert_eq!(
                store.store_id,
                format!("ST{:03}", i + 1),
                "store ids must be dense and 1-based"
            );
        }
    }

    #[test]
    fn opening_dates_stay_in_window() {
        let config = GeneratorConfig::default_test();
        for store in test_fleet() {
            let age = (config.reference_date - store.opening_date).num_days();
            assert!(
                (0..=1825).contains(&age),
                "{}: opened {age} days before reference",
                store.store_id
            );
        }
    }

    #[test]
    fn store_type_round_trips_through_strings() {
        for t in StoreType::ALL {
            assert_eq!(StoreType::parse(t.as_str()), Some(t));
        }
        assert_eq!(StoreType::parse("Kiosk"), None);
    }
}
