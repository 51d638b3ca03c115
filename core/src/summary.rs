//! Daily aggregate summary.
//!
//! Revenue counts every transaction regardless of status: Failed and
//! Refunded rows keep their register amounts, so the summary reports
//! what was rung up, not what settled.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::transactions::DayBatch;
use crate::types::round_cents;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total_transactions: u64,
    pub total_revenue: f64,
    pub total_items_sold: u64,
    pub unique_customers: u64,
    pub payment_method_breakdown: BTreeMap<String, u64>,
    pub category_breakdown: BTreeMap<String, CategorySales>,
    pub top_products: Vec<ProductSales>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySales {
    /// Units sold, not basket count.
    pub count: u64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSales {
    pub product_id: String,
    pub product_name: String,
    pub quantity_sold: u64,
    pub revenue: f64,
}

/// Aggregate one day's batch into its summary.
pub fn summarize(batch: &DayBatch, top_limit: usize) -> DailySummary {
    let mut payment_method_breakdown: BTreeMap<String, u64> = BTreeMap::new();
    let mut unique_customers: HashSet<&str> = HashSet::new();
    let mut total_revenue = 0.0;
    let mut total_items_sold = 0u64;

    for txn in &batch.transactions {
        total_revenue += txn.total_amount;
        total_items_sold += u64::from(txn.items_count);
        unique_customers.insert(txn.customer_id.as_str());
        *payment_method_breakdown
            .entry(txn.payment_method.as_str().to_string())
            .or_insert(0) += 1;
    }

    let mut category_breakdown: BTreeMap<String, CategorySales> = BTreeMap::new();
    let mut per_product: BTreeMap<&str, (&str, u64, f64)> = BTreeMap::new();
    for item in &batch.line_items {
        let sales = category_breakdown
            .entry(item.category.clone())
            .or_insert(CategorySales { count: 0, revenue: 0.0 });
        sales.count += u64::from(item.quantity);
        sales.revenue += item.line_total;

        let product = per_product
            .entry(item.product_id.as_str())
            .or_insert((item.product_name.as_str(), 0, 0.0));
        product.1 += u64::from(item.quantity);
        product.2 += item.line_total;
    }
    for sales in category_breakdown.values_mut() {
        sales.revenue = round_cents(sales.revenue);
    }

    let mut top_products: Vec<ProductSales> = per_product
        .into_iter()
        .map(|(product_id, (product_name, quantity_sold, revenue))| ProductSales {
            product_id: product_id.to_string(),
            product_name: product_name.to_string(),
            quantity_sold,
            revenue: round_cents(revenue),
        })
        .collect();
    // Rank by revenue; ties break on product id so the ordering is
    // stable across runs.
    top_products.sort_by(|a, b| {
        b.revenue
            .partial_cmp(&a.revenue)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.product_id.cmp(&b.product_id))
    });
    top_products.truncate(top_limit);

    DailySummary {
        date: batch.date,
        total_transactions: batch.transactions.len() as u64,
        total_revenue: round_cents(total_revenue),
        total_items_sold,
        unique_customers: unique_customers.len() as u64,
        payment_method_breakdown,
        category_breakdown,
        top_products,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transactions::{
        LineItemRecord, PaymentMethod, TransactionRecord, TransactionStatus,
    };
    use chrono::NaiveTime;

    fn txn(
        id: &str,
        customer: &str,
        payment: PaymentMethod,
        total: f64,
        items: u32,
        status: TransactionStatus,
    ) -> TransactionRecord {
        let date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let time = NaiveTime::default();
        TransactionRecord {
            transaction_id: id.to_string(),
            date,
            time,
            datetime: date.and_time(time),
            customer_id: customer.to_string(),
            store_id: "ST001".to_string(),
            store_name: "Harbor Trading Flagship".to_string(),
            cashier_id: Some("EMP001".to_string()),
            payment_method: payment,
            subtotal: total,
            tax_amount: 0.0,
            total_amount: total,
            items_count: items,
            loyalty_points_earned: 0,
            promotion_code: None,
            status,
            refund_reason: None,
        }
    }

    fn item(txn_id: &str, product: &str, name: &str, category: &str, qty: u32, line: f64) -> LineItemRecord {
        LineItemRecord {
            transaction_id: txn_id.to_string(),
            product_id: product.to_string(),
            product_name: name.to_string(),
            category: category.to_string(),
            quantity: qty,
            unit_price: line / qty as f64,
            discount_percent: 0.0,
            line_total: line,
        }
    }

    fn sample_batch() -> DayBatch {
        DayBatch {
            date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            transactions: vec![
                txn("T1", "C1", PaymentMethod::CreditCard, 55.0, 2, TransactionStatus::Completed),
                txn("T2", "C2", PaymentMethod::Cash, 11.0, 1, TransactionStatus::Failed),
                txn("T3", "C1", PaymentMethod::CreditCard, 20.0, 1, TransactionStatus::Refunded),
            ],
            line_items: vec![
                item("T1", "P1", "Premium Widget", "Electronics", 1, 25.0),
                item("T1", "P2", "Deluxe Gadget", "Electronics", 1, 25.0),
                item("T2", "P1", "Premium Widget", "Electronics", 1, 10.0),
                item("T3", "P3", "Classic Novel", "Books", 1, 18.52),
            ],
        }
    }

    #[test]
    fn revenue_counts_every_status() {
        let summary = summarize(&sample_batch(), 10);
        assert_eq!(summary.total_transactions, 3);
        assert_eq!(summary.total_revenue, 86.0, "Failed and Refunded still count");
        assert_eq!(summary.total_items_sold, 4);
        assert_eq!(summary.unique_customers, 2);
    }

    #[test]
    fn breakdowns_aggregate_units_and_line_totals() {
        let summary = summarize(&sample_batch(), 10);
        assert_eq!(summary.payment_method_breakdown["Credit Card"], 2);
        assert_eq!(summary.payment_method_breakdown["Cash"], 1);
        assert_eq!(
            summary.category_breakdown["Electronics"],
            CategorySales { count: 3, revenue: 60.0 }
        );
        assert_eq!(
            summary.category_breakdown["Books"],
            CategorySales { count: 1, revenue: 18.52 }
        );
    }

    #[test]
    fn top_products_rank_by_revenue() {
        let summary = summarize(&sample_batch(), 2);
        assert_eq!(summary.top_products.len(), 2, "limit applies");
        assert_eq!(summary.top_products[0].product_id, "P1");
        assert_eq!(summary.top_products[0].revenue, 35.0);
        assert_eq!(summary.top_products[0].quantity_sold, 2);
        assert_eq!(summary.top_products[1].product_id, "P2");
    }

    #[test]
    fn revenue_ties_break_on_product_id() {
        let mut batch = sample_batch();
        // P2 and P4 tie at 25.0.
        batch.line_items.push(item("T2", "P4", "Modern Lamp", "Home & Garden", 1, 25.0));
        let summary = summarize(&batch, 10);
        let ids: Vec<&str> = summary.top_products.iter().map(|p| p.product_id.as_str()).collect();
        assert_eq!(ids, vec!["P1", "P2", "P4", "P3"], "tied revenue orders by id");
    }

    #[test]
    fn empty_batch_summarizes_to_zeros() {
        let batch = DayBatch::empty(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
        let summary = summarize(&batch, 10);
        assert_eq!(summary.total_transactions, 0);
        assert_eq!(summary.total_revenue, 0.0);
        assert!(summary.payment_method_breakdown.is_empty());
        assert!(summary.top_products.is_empty());
    }
}
