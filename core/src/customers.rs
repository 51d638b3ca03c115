//! Customer master data.
//!
//! EXECUTION ORDER per run:
//!   1. Mint every customer, defects inline (email variants, missing
//!      contact fields, name-casing typos, ragged addresses).
//!   2. Duplication pass: append whole-record clones of a small
//!      fraction of the population under fresh ids.
//!
//! Emails are derived from name parts, so natural collisions occur and
//! feed the duplicate-variant path even before the defect rate fires.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::config::GeneratorConfig;
use crate::rng::StreamRng;
use crate::types::{round_cents, EntityId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Gender> {
        Self::ALL.iter().copied().find(|g| g.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactChannel {
    Email,
    Phone,
    #[serde(rename = "SMS")]
    Sms,
}

impl ContactChannel {
    pub const ALL: [ContactChannel; 3] =
        [ContactChannel::Email, ContactChannel::Phone, ContactChannel::Sms];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Sms => "SMS",
        }
    }

    pub fn parse(s: &str) -> Option<ContactChannel> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerSegment {
    Premium,
    Regular,
    Budget,
    #[serde(rename = "VIP")]
    Vip,
}

impl CustomerSegment {
    pub const ALL: [CustomerSegment; 4] = [
        CustomerSegment::Premium,
        CustomerSegment::Regular,
        CustomerSegment::Budget,
        CustomerSegment::Vip,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Premium => "Premium",
            Self::Regular => "Regular",
            Self::Budget => "Budget",
            Self::Vip => "VIP",
        }
    }

    pub fn parse(s: &str) -> Option<CustomerSegment> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub customer_id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub registration_date: NaiveDate,
    pub loyalty_member: bool,
    pub preferred_contact: ContactChannel,
    pub customer_segment: CustomerSegment,
    pub total_lifetime_value: f64,
}

/// Mint the customer base. Draw order is fixed; reordering changes
/// every seeded output.
pub fn generate(config: &GeneratorConfig, rng: &mut StreamRng) -> Vec<CustomerRecord> {
    let mut seen_emails: HashSet<String> = HashSet::new();
    let mut customers = Vec::with_capacity(config.num_customers);
    for i in 0..config.num_customers {
        customers.push(single_customer(config, &mut seen_emails, i, rng));
    }

    // Duplication pass: whole-record clones under fresh ids, with a
    // recent registration date standing in for the second signup.
    let duplicates = (customers.len() as f64 * config.noise.complete_duplicate_rate) as usize;
    for n in 0..duplicates {
        let source = rng.next_u64_below(customers.len() as u64) as usize;
        let mut clone = customers[source].clone();
        clone.customer_id = format!("CUST{:06}", config.num_customers + n + 1);
        clone.registration_date = rng.date_back(config.reference_date, 0, 365);
        customers.push(clone);
    }

    let minted = customers.len();
    log::info!("customers: minted {minted} customers ({duplicates} duplicates)");
    customers
}

fn single_customer(
    config: &GeneratorConfig,
    seen_emails: &mut HashSet<String>,
    index: usize,
    rng: &mut StreamRng,
) -> CustomerRecord {
    let noise = &config.noise;
    let first = Catalog::first_name(rng);
    let last = Catalog::last_name(rng);

    let email = mint_email(first, last, seen_emails, config, rng);

    let phone = if rng.chance(noise.missing_phone_rate) {
        None
    } else {
        Some(Catalog::phone_number(rng))
    };

    // Casing typo: one of the name parts keyed with the wrong case.
    let mut first_name = first.to_string();
    let mut last_name = last.to_string();
    if rng.chance(noise.data_entry_error_rate) {
        if rng.chance(0.5) {
            first_name = first_name.to_lowercase();
        } else {
            last_name = last_name.to_uppercase();
        }
    }

    let address = Catalog::street_address(rng);
    let mut city = Some(Catalog::city(rng).to_string());
    let mut state = Some(Catalog::state(rng).to_string());
    let mut zip_code = Some(Catalog::zip_code(rng));
    if rng.chance(noise.missing_address_rate) {
        match rng.next_u64_below(3) {
            0 => city = None,
            1 => state = None,
            _ => zip_code = None,
        }
    }

    CustomerRecord {
        customer_id: format!("CUST{:06}", index + 1),
        first_name,
        last_name,
        email,
        phone,
        address,
        city,
        state,
        zip_code,
        date_of_birth: rng.date_back(config.reference_date, 6_575, 29_200),
        gender: *rng.pick(&Gender::ALL),
        registration_date: rng.date_back(config.reference_date, 0, 1_095),
        loyalty_member: rng.chance(0.5),
        preferred_contact: *rng.pick(&ContactChannel::ALL),
        customer_segment: *rng.pick(&CustomerSegment::ALL),
        total_lifetime_value: round_cents(rng.uniform(100.0, 5_000.0)),
    }
}

/// Email defect chain, in priority order: duplicate variant, missing,
/// malformed. At most one class fires per customer.
fn mint_email(
    first: &str,
    last: &str,
    seen: &mut HashSet<String>,
    config: &GeneratorConfig,
    rng: &mut StreamRng,
) -> Option<String> {
    let noise = &config.noise;
    let base = Catalog::email(first, last, rng);

    let email = if seen.contains(&base) && rng.chance(noise.duplicate_email_rate) {
        let n = 1 + rng.next_u64_below(99);
        Some(base.replacen('@', &format!("+{n}@"), 1))
    } else if rng.chance(noise.missing_email_rate) {
        None
    } else if rng.chance(noise.invalid_email_rate) {
        Some(base.replacen('@', "@@", 1))
    } else {
        Some(base)
    };

    if let Some(e) = &email {
        seen.insert(e.clone());
    }
    email
}
