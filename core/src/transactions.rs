//! Daily transaction generation.
//!
//! EXECUTION ORDER per transaction (fixed; reordering changes every
//! seeded output):
//!   1. customer, store
//!   2. time of day
//!   3. status (failed draw; refund drawn only when failed misses)
//!   4. item count (weighted over 1..=5)
//!   5. distinct product picks (partial Fisher-Yates over the pool)
//!   6. per item: quantity, price typo, discount
//!   7. tax (rate typo redraws uniformly in 5-12%)
//!   8. cashier
//!   9. payment method (weighted)
//!  10. promotion code
//!  11. loyalty points (no draw)
//!
//! Failed and Refunded transactions still price a full basket; the
//! amounts record what the register rang up, not what settled.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::catalog::{PROMOTION_CODES, REFUND_REASONS};
use crate::config::GeneratorConfig;
use crate::customers::CustomerRecord;
use crate::products::ProductRecord;
use crate::rng::StreamRng;
use crate::stores::StoreRecord;
use crate::types::{round_cents, EntityId};

/// Volume multiplier per weekday, Monday first.
pub const WEEKDAY_MULTIPLIERS: [f64; 7] = [1.2, 1.0, 1.0, 1.1, 1.3, 1.5, 1.2];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Debit Card")]
    DebitCard,
    Cash,
    #[serde(rename = "Digital Wallet")]
    DigitalWallet,
    #[serde(rename = "Gift Card")]
    GiftCard,
}

impl PaymentMethod {
    pub const WEIGHTS: [(PaymentMethod, f64); 5] = [
        (PaymentMethod::CreditCard, 0.45),
        (PaymentMethod::DebitCard, 0.25),
        (PaymentMethod::Cash, 0.15),
        (PaymentMethod::DigitalWallet, 0.10),
        (PaymentMethod::GiftCard, 0.05),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreditCard => "Credit Card",
            Self::DebitCard => "Debit Card",
            Self::Cash => "Cash",
            Self::DigitalWallet => "Digital Wallet",
            Self::GiftCard => "Gift Card",
        }
    }

    pub fn parse(s: &str) -> Option<PaymentMethod> {
        Self::WEIGHTS.iter().map(|(m, _)| *m).find(|m| m.as_str() == s)
    }

    fn weighted_pick(rng: &mut StreamRng) -> PaymentMethod {
        let roll = rng.next_f64();
        let mut cumulative = 0.0;
        for (method, weight) in Self::WEIGHTS {
            cumulative += weight;
            if roll < cumulative {
                return method;
            }
        }
        PaymentMethod::GiftCard
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Completed,
    Failed,
    Refunded,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Failed => "Failed",
            Self::Refunded => "Refunded",
        }
    }

    pub fn parse(s: &str) -> Option<TransactionStatus> {
        [Self::Completed, Self::Failed, Self::Refunded]
            .into_iter()
            .find(|t| t.as_str() == s)
    }
}

/// Transaction header. Basket contents live in [`LineItemRecord`]s
/// that reference it by `transaction_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub transaction_id: EntityId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub datetime: NaiveDateTime,
    pub customer_id: EntityId,
    pub store_id: EntityId,
    pub store_name: String,
    pub cashier_id: Option<String>,
    pub payment_method: PaymentMethod,
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total_amount: f64,
    pub items_count: u32,
    pub loyalty_points_earned: i64,
    pub promotion_code: Option<String>,
    pub status: TransactionStatus,
    pub refund_reason: Option<String>,
}

/// One basket line. `line_total` is the rounded discounted price times
/// quantity; the header subtotal is the exact sum of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemRecord {
    pub transaction_id: EntityId,
    pub product_id: EntityId,
    pub product_name: String,
    pub category: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub discount_percent: f64,
    pub line_total: f64,
}

/// Everything generated for one calendar day.
#[derive(Debug, Clone, Default)]
pub struct DayBatch {
    pub date: NaiveDate,
    pub transactions: Vec<TransactionRecord>,
    pub line_items: Vec<LineItemRecord>,
}

impl DayBatch {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Transactions to generate for `date`: base volume times the weekday
/// multiplier, truncated.
pub fn daily_volume(config: &GeneratorConfig, date: NaiveDate) -> u64 {
    let multiplier = WEEKDAY_MULTIPLIERS[date.weekday().num_days_from_monday() as usize];
    (config.base_daily_volume() as f64 * multiplier) as u64
}

/// Generate one day of transactions against the master populations.
/// Pure in-memory; persistence is the caller's concern.
pub fn generate_day(
    config: &GeneratorConfig,
    stores: &[StoreRecord],
    products: &[ProductRecord],
    customers: &[CustomerRecord],
    date: NaiveDate,
    rng: &mut StreamRng,
) -> DayBatch {
    let volume = daily_volume(config, date);

    // One purchasable pool for the whole day; stock does not move
    // intra-day. Falls back to the full catalog if nothing is stocked.
    let mut pool: Vec<usize> = (0..products.len())
        .filter(|&i| products[i].stock_quantity > 0)
        .collect();
    if pool.is_empty() {
        pool = (0..products.len()).collect();
    }

    let mut run = DayRun {
        config,
        stores,
        products,
        customers,
        pool,
    };

    let mut batch = DayBatch::empty(date);
    for seq in 1..=volume {
        run.single_transaction(date, seq, rng, &mut batch);
    }

    let transactions = batch.transactions.len();
    let line_items = batch.line_items.len();
    log::debug!("date={date} txn: generated {transactions} transactions, {line_items} line items");
    batch
}

struct DayRun<'a> {
    config: &'a GeneratorConfig,
    stores: &'a [StoreRecord],
    products: &'a [ProductRecord],
    customers: &'a [CustomerRecord],
    pool: Vec<usize>,
}

impl DayRun<'_> {
    fn single_transaction(
        &mut self,
        date: NaiveDate,
        seq: u64,
        rng: &mut StreamRng,
        batch: &mut DayBatch,
    ) {
        let noise = &self.config.noise;
        let transaction_id = format!("TXN{}{:06}", date.format("%Y%m%d"), seq);

        let customer = rng.pick(self.customers);
        let store = rng.pick(self.stores);

        let hour = (8 + rng.next_u64_below(15)) as u32;
        let minute = rng.next_u64_below(60) as u32;
        let second = rng.next_u64_below(60) as u32;
        let time = NaiveTime::from_hms_opt(hour, minute, second).unwrap_or_default();

        let (status, refund_reason) = if rng.chance(noise.failed_transaction_rate) {
            (TransactionStatus::Failed, None)
        } else if rng.chance(noise.refund_rate) {
            (
                TransactionStatus::Refunded,
                Some(rng.pick(REFUND_REASONS).to_string()),
            )
        } else {
            (TransactionStatus::Completed, None)
        };

        let items_requested = pick_item_count(rng);
        let picked = self.sample_products(items_requested as usize, rng);

        let mut subtotal = 0.0;
        for &product_index in &picked {
            let product = &self.products[product_index];
            let quantity = (1 + rng.next_u64_below(3)) as u32;

            let mut unit_price = product.price;
            if rng.chance(noise.data_entry_error_rate) {
                // Decimal-shift typo: the point keyed one place off.
                unit_price = round_cents(if rng.chance(0.5) {
                    unit_price * 0.1
                } else {
                    unit_price * 10.0
                });
            }

            let mut discount_percent = 0.0;
            let mut effective_price = unit_price;
            if rng.chance(self.config.discount_rate) {
                let discount = rng.uniform(0.05, 0.25);
                discount_percent = round_cents(discount * 100.0);
                effective_price = unit_price * (1.0 - discount);
            }

            let line_total = round_cents(effective_price * quantity as f64);
            subtotal += line_total;

            batch.line_items.push(LineItemRecord {
                transaction_id: transaction_id.clone(),
                product_id: product.product_id.clone(),
                product_name: product.product_name.clone(),
                category: product.category.clone(),
                quantity,
                unit_price,
                discount_percent,
                line_total,
            });
        }
        let subtotal = round_cents(subtotal);

        let mut tax_rate = self.config.tax_rate;
        if rng.chance(noise.data_entry_error_rate) {
            tax_rate = rng.uniform(0.05, 0.12);
        }
        let tax_amount = round_cents(subtotal * tax_rate);
        let total_amount = round_cents(subtotal + tax_amount);

        let cashier_id = if rng.chance(noise.missing_cashier_rate) {
            None
        } else {
            Some(format!("EMP{:03}", 1 + rng.next_u64_below(self.config.cashier_pool_size)))
        };

        let payment_method = PaymentMethod::weighted_pick(rng);

        let promotion_code = if rng.chance(self.config.promotion_rate) {
            Some(rng.pick(PROMOTION_CODES).to_string())
        } else {
            None
        };

        let loyalty_points_earned = if customer.loyalty_member {
            (total_amount * 0.1) as i64
        } else {
            0
        };

        batch.transactions.push(TransactionRecord {
            transaction_id,
            date,
            time,
            datetime: date.and_time(time),
            customer_id: customer.customer_id.clone(),
            store_id: store.store_id.clone(),
            store_name: store.store_name.clone(),
            cashier_id,
            payment_method,
            subtotal,
            tax_amount,
            total_amount,
            // The requested basket size, even when the pool ran short.
            items_count: items_requested,
            loyalty_points_earned,
            promotion_code,
            status,
            refund_reason,
        });
    }

    /// Sample `count` distinct pool entries by partial Fisher-Yates.
    /// The pool is permuted in place; the set of entries never changes,
    /// so later draws stay uniform.
    fn sample_products(&mut self, count: usize, rng: &mut StreamRng) -> Vec<usize> {
        let take = count.min(self.pool.len());
        for slot in 0..take {
            let remaining = (self.pool.len() - slot) as u64;
            let offset = slot + rng.next_u64_below(remaining) as usize;
            self.pool.swap(slot, offset);
        }
        self.pool[..take].to_vec()
    }
}

/// Basket size weighted 40/30/20/7/3 over 1..=5 items.
fn pick_item_count(rng: &mut StreamRng) -> u32 {
    const WEIGHTS: [(u32, u64); 5] = [(1, 40), (2, 30), (3, 20), (4, 7), (5, 3)];
    let roll = rng.next_u64_below(100);
    let mut cumulative = 0;
    for (count, weight) in WEIGHTS {
        cumulative += weight;
        if roll < cumulative {
            return count;
        }
    }
    5
}
