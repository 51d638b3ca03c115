//! Parquet persistence for master and transaction data.
//!
//! RULE: Only this module touches arrow/parquet. Everything else in
//! the crate trades in typed records; the column layout below is the
//! wire contract and changes here are schema changes.
//!
//! Writes go through a temp file and a rename, so a crash never leaves
//! a half-written parquet in place of a complete one.

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow_array::{
    ArrayRef, BooleanArray, Date32Array, Float64Array, Int32Array, Int64Array, RecordBatch,
    StringArray, TimestampMillisecondArray,
};
use arrow_schema::{DataType, Field as ArrowField, Schema, TimeUnit};
use chrono::{Duration, NaiveDate};
use parquet::arrow::ArrowWriter;
use parquet::file::reader::FileReader;
use parquet::file::serialized_reader::SerializedFileReader;
use parquet::record::{Field, Row};

use crate::customers::{ContactChannel, CustomerRecord, CustomerSegment, Gender};
use crate::error::{GenError, GenResult};
use crate::products::ProductRecord;
use crate::stores::{StoreRecord, StoreType};
use crate::transactions::{DayBatch, TransactionRecord};

// ── Writing ────────────────────────────────────────────────────────

pub fn write_stores(path: &Path, stores: &[StoreRecord]) -> GenResult<()> {
    let schema = Arc::new(Schema::new(vec![
        ArrowField::new("store_id", DataType::Utf8, false),
        ArrowField::new("store_name", DataType::Utf8, false),
        ArrowField::new("address", DataType::Utf8, false),
        ArrowField::new("city", DataType::Utf8, false),
        ArrowField::new("state", DataType::Utf8, false),
        ArrowField::new("zip_code", DataType::Utf8, false),
        ArrowField::new("phone", DataType::Utf8, false),
        ArrowField::new("manager", DataType::Utf8, false),
        ArrowField::new("store_type", DataType::Utf8, false),
        ArrowField::new("opening_date", DataType::Date32, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(field_vec(stores, |s| s.store_id.as_str()))),
        Arc::new(StringArray::from(field_vec(stores, |s| s.store_name.as_str()))),
        Arc::new(StringArray::from(field_vec(stores, |s| s.address.as_str()))),
        Arc::new(StringArray::from(field_vec(stores, |s| s.city.as_str()))),
        Arc::new(StringArray::from(field_vec(stores, |s| s.state.as_str()))),
        Arc::new(StringArray::from(field_vec(stores, |s| s.zip_code.as_str()))),
        Arc::new(StringArray::from(field_vec(stores, |s| s.phone.as_str()))),
        Arc::new(StringArray::from(field_vec(stores, |s| s.manager.as_str()))),
        Arc::new(StringArray::from(field_vec(stores, |s| s.store_type.as_str()))),
        Arc::new(Date32Array::from(field_vec(stores, |s| days_since_epoch(s.opening_date)))),
    ];

    write_batch(path, &RecordBatch::try_new(schema, columns)?)
}

pub fn write_products(path: &Path, products: &[ProductRecord]) -> GenResult<()> {
    let schema = Arc::new(Schema::new(vec![
        ArrowField::new("product_id", DataType::Utf8, false),
        ArrowField::new("product_name", DataType::Utf8, false),
        ArrowField::new("category", DataType::Utf8, false),
        ArrowField::new("subcategory", DataType::Utf8, false),
        ArrowField::new("brand", DataType::Utf8, false),
        ArrowField::new("price", DataType::Float64, false),
        ArrowField::new("cost", DataType::Float64, false),
        ArrowField::new("sku", DataType::Utf8, false),
        ArrowField::new("description", DataType::Utf8, true),
        ArrowField::new("weight", DataType::Float64, false),
        ArrowField::new("dimensions", DataType::Utf8, false),
        ArrowField::new("stock_quantity", DataType::Int64, false),
        ArrowField::new("supplier", DataType::Utf8, false),
        ArrowField::new("launch_date", DataType::Date32, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(field_vec(products, |p| p.product_id.as_str()))),
        Arc::new(StringArray::from(field_vec(products, |p| p.product_name.as_str()))),
        Arc::new(StringArray::from(field_vec(products, |p| p.category.as_str()))),
        Arc::new(StringArray::from(field_vec(products, |p| p.subcategory.as_str()))),
        Arc::new(StringArray::from(field_vec(products, |p| p.brand.as_str()))),
        Arc::new(Float64Array::from(field_vec(products, |p| p.price))),
        Arc::new(Float64Array::from(field_vec(products, |p| p.cost))),
        Arc::new(StringArray::from(field_vec(products, |p| p.sku.as_str()))),
        Arc::new(StringArray::from(field_vec(products, |p| p.description.as_deref()))),
        Arc::new(Float64Array::from(field_vec(products, |p| p.weight))),
        Arc::new(StringArray::from(field_vec(products, |p| p.dimensions.as_str()))),
        Arc::new(Int64Array::from(field_vec(products, |p| p.stock_quantity))),
        Arc::new(StringArray::from(field_vec(products, |p| p.supplier.as_str()))),
        Arc::new(Date32Array::from(field_vec(products, |p| days_since_epoch(p.launch_date)))),
    ];

    write_batch(path, &RecordBatch::try_new(schema, columns)?)
}

pub fn write_customers(path: &Path, customers: &[CustomerRecord]) -> GenResult<()> {
    let schema = Arc::new(Schema::new(vec![
        ArrowField::new("customer_id", DataType::Utf8, false),
        ArrowField::new("first_name", DataType::Utf8, false),
        ArrowField::new("last_name", DataType::Utf8, false),
        ArrowField::new("email", DataType::Utf8, true),
        ArrowField::new("phone", DataType::Utf8, true),
        ArrowField::new("address", DataType::Utf8, false),
        ArrowField::new("city", DataType::Utf8, true),
        ArrowField::new("state", DataType::Utf8, true),
        ArrowField::new("zip_code", DataType::Utf8, true),
        ArrowField::new("date_of_birth", DataType::Date32, false),
        ArrowField::new("gender", DataType::Utf8, false),
        ArrowField::new("registration_date", DataType::Date32, false),
        ArrowField::new("loyalty_member", DataType::Boolean, false),
        ArrowField::new("preferred_contact", DataType::Utf8, false),
        ArrowField::new("customer_segment", DataType::Utf8, false),
        ArrowField::new("total_lifetime_value", DataType::Float64, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(field_vec(customers, |c| c.customer_id.as_str()))),
        Arc::new(StringArray::from(field_vec(customers, |c| c.first_name.as_str()))),
        Arc::new(StringArray::from(field_vec(customers, |c| c.last_name.as_str()))),
        Arc::new(StringArray::from(field_vec(customers, |c| c.email.as_deref()))),
        Arc::new(StringArray::from(field_vec(customers, |c| c.phone.as_deref()))),
        Arc::new(StringArray::from(field_vec(customers, |c| c.address.as_str()))),
        Arc::new(StringArray::from(field_vec(customers, |c| c.city.as_deref()))),
        Arc::new(StringArray::from(field_vec(customers, |c| c.state.as_deref()))),
        Arc::new(StringArray::from(field_vec(customers, |c| c.zip_code.as_deref()))),
        Arc::new(Date32Array::from(field_vec(customers, |c| days_since_epoch(c.date_of_birth)))),
        Arc::new(StringArray::from(field_vec(customers, |c| c.gender.as_str()))),
        Arc::new(Date32Array::from(field_vec(customers, |c| days_since_epoch(c.registration_date)))),
        Arc::new(BooleanArray::from(field_vec(customers, |c| c.loyalty_member))),
        Arc::new(StringArray::from(field_vec(customers, |c| c.preferred_contact.as_str()))),
        Arc::new(StringArray::from(field_vec(customers, |c| c.customer_segment.as_str()))),
        Arc::new(Float64Array::from(field_vec(customers, |c| c.total_lifetime_value))),
    ];

    write_batch(path, &RecordBatch::try_new(schema, columns)?)
}

/// One row per line item, with the transaction header denormalized
/// onto every row.
pub fn write_transactions(path: &Path, batch: &DayBatch) -> GenResult<()> {
    let headers: HashMap<&str, &TransactionRecord> = batch
        .transactions
        .iter()
        .map(|t| (t.transaction_id.as_str(), t))
        .collect();

    let mut rows: Vec<(&TransactionRecord, &crate::transactions::LineItemRecord)> =
        Vec::with_capacity(batch.line_items.len());
    for item in &batch.line_items {
        let txn = headers.get(item.transaction_id.as_str()).copied().ok_or_else(|| {
            anyhow::anyhow!("line item references unknown transaction {}", item.transaction_id)
        })?;
        rows.push((txn, item));
    }

    let schema = Arc::new(Schema::new(vec![
        ArrowField::new("transaction_id", DataType::Utf8, false),
        ArrowField::new("date", DataType::Date32, false),
        ArrowField::new("time", DataType::Utf8, false),
        ArrowField::new("datetime", DataType::Timestamp(TimeUnit::Millisecond, None), false),
        ArrowField::new("customer_id", DataType::Utf8, false),
        ArrowField::new("store_id", DataType::Utf8, false),
        ArrowField::new("store_name", DataType::Utf8, false),
        ArrowField::new("cashier_id", DataType::Utf8, true),
        ArrowField::new("payment_method", DataType::Utf8, false),
        ArrowField::new("subtotal", DataType::Float64, false),
        ArrowField::new("tax_amount", DataType::Float64, false),
        ArrowField::new("total_amount", DataType::Float64, false),
        ArrowField::new("items_count", DataType::Int32, false),
        ArrowField::new("loyalty_points_earned", DataType::Int64, false),
        ArrowField::new("promotion_code", DataType::Utf8, true),
        ArrowField::new("status", DataType::Utf8, false),
        ArrowField::new("refund_reason", DataType::Utf8, true),
        ArrowField::new("product_id", DataType::Utf8, false),
        ArrowField::new("product_name", DataType::Utf8, false),
        ArrowField::new("category", DataType::Utf8, false),
        ArrowField::new("quantity", DataType::Int32, false),
        ArrowField::new("unit_price", DataType::Float64, false),
        ArrowField::new("discount_percent", DataType::Float64, false),
        ArrowField::new("line_total", DataType::Float64, false),
    ]));

    let times: Vec<String> = rows.iter().map(|(t, _)| t.time.format("%H:%M:%S").to_string()).collect();
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(field_vec(&rows, |(t, _)| t.transaction_id.as_str()))),
        Arc::new(Date32Array::from(field_vec(&rows, |(t, _)| days_since_epoch(t.date)))),
        Arc::new(StringArray::from(times.iter().map(|s| s.as_str()).collect::<Vec<_>>())),
        Arc::new(TimestampMillisecondArray::from(field_vec(&rows, |(t, _)| {
            t.datetime.and_utc().timestamp_millis()
        }))),
        Arc::new(StringArray::from(field_vec(&rows, |(t, _)| t.customer_id.as_str()))),
        Arc::new(StringArray::from(field_vec(&rows, |(t, _)| t.store_id.as_str()))),
        Arc::new(StringArray::from(field_vec(&rows, |(t, _)| t.store_name.as_str()))),
        Arc::new(StringArray::from(field_vec(&rows, |(t, _)| t.cashier_id.as_deref()))),
        Arc::new(StringArray::from(field_vec(&rows, |(t, _)| t.payment_method.as_str()))),
        Arc::new(Float64Array::from(field_vec(&rows, |(t, _)| t.subtotal))),
        Arc::new(Float64Array::from(field_vec(&rows, |(t, _)| t.tax_amount))),
        Arc::new(Float64Array::from(field_vec(&rows, |(t, _)| t.total_amount))),
        Arc::new(Int32Array::from(field_vec(&rows, |(t, _)| t.items_count as i32))),
        Arc::new(Int64Array::from(field_vec(&rows, |(t, _)| t.loyalty_points_earned))),
        Arc::new(StringArray::from(field_vec(&rows, |(t, _)| t.promotion_code.as_deref()))),
        Arc::new(StringArray::from(field_vec(&rows, |(t, _)| t.status.as_str()))),
        Arc::new(StringArray::from(field_vec(&rows, |(t, _)| t.refund_reason.as_deref()))),
        Arc::new(StringArray::from(field_vec(&rows, |(_, i)| i.product_id.as_str()))),
        Arc::new(StringArray::from(field_vec(&rows, |(_, i)| i.product_name.as_str()))),
        Arc::new(StringArray::from(field_vec(&rows, |(_, i)| i.category.as_str()))),
        Arc::new(Int32Array::from(field_vec(&rows, |(_, i)| i.quantity as i32))),
        Arc::new(Float64Array::from(field_vec(&rows, |(_, i)| i.unit_price))),
        Arc::new(Float64Array::from(field_vec(&rows, |(_, i)| i.discount_percent))),
        Arc::new(Float64Array::from(field_vec(&rows, |(_, i)| i.line_total))),
    ];

    write_batch(path, &RecordBatch::try_new(schema, columns)?)
}

// ── Reading ────────────────────────────────────────────────────────

pub fn read_stores(path: &Path) -> GenResult<Vec<StoreRecord>> {
    let rows = read_rows(path)?;
    let mut stores = Vec::with_capacity(rows.len());
    for row in &rows {
        let values = RowValues::new(row);
        let type_name = values.string("store_type")?;
        stores.push(StoreRecord {
            store_id: values.string("store_id")?,
            store_name: values.string("store_name")?,
            address: values.string("address")?,
            city: values.string("city")?,
            state: values.string("state")?,
            zip_code: values.string("zip_code")?,
            phone: values.string("phone")?,
            manager: values.string("manager")?,
            store_type: StoreType::parse(&type_name)
                .ok_or_else(|| load_error(format!("unknown store_type '{type_name}'")))?,
            opening_date: values.date("opening_date")?,
        });
    }
    Ok(stores)
}

pub fn read_products(path: &Path) -> GenResult<Vec<ProductRecord>> {
    let rows = read_rows(path)?;
    let mut products = Vec::with_capacity(rows.len());
    for row in &rows {
        let values = RowValues::new(row);
        products.push(ProductRecord {
            product_id: values.string("product_id")?,
            product_name: values.string("product_name")?,
            category: values.string("category")?,
            subcategory: values.string("subcategory")?,
            brand: values.string("brand")?,
            price: values.f64("price")?,
            cost: values.f64("cost")?,
            sku: values.string("sku")?,
            description: values.opt_string("description")?,
            weight: values.f64("weight")?,
            dimensions: values.string("dimensions")?,
            stock_quantity: values.i64("stock_quantity")?,
            supplier: values.string("supplier")?,
            launch_date: values.date("launch_date")?,
        });
    }
    Ok(products)
}

pub fn read_customers(path: &Path) -> GenResult<Vec<CustomerRecord>> {
    let rows = read_rows(path)?;
    let mut customers = Vec::with_capacity(rows.len());
    for row in &rows {
        let values = RowValues::new(row);
        let gender = values.string("gender")?;
        let contact = values.string("preferred_contact")?;
        let segment = values.string("customer_segment")?;
        customers.push(CustomerRecord {
            customer_id: values.string("customer_id")?,
            first_name: values.string("first_name")?,
            last_name: values.string("last_name")?,
            email: values.opt_string("email")?,
            phone: values.opt_string("phone")?,
            address: values.string("address")?,
            city: values.opt_string("city")?,
            state: values.opt_string("state")?,
            zip_code: values.opt_string("zip_code")?,
            date_of_birth: values.date("date_of_birth")?,
            gender: Gender::parse(&gender)
                .ok_or_else(|| load_error(format!("unknown gender '{gender}'")))?,
            registration_date: values.date("registration_date")?,
            loyalty_member: values.bool("loyalty_member")?,
            preferred_contact: ContactChannel::parse(&contact)
                .ok_or_else(|| load_error(format!("unknown preferred_contact '{contact}'")))?,
            customer_segment: CustomerSegment::parse(&segment)
                .ok_or_else(|| load_error(format!("unknown customer_segment '{segment}'")))?,
            total_lifetime_value: values.f64("total_lifetime_value")?,
        });
    }
    Ok(customers)
}

/// Row count straight from the file footer, without decoding pages.
pub fn count_rows(path: &Path) -> GenResult<u64> {
    let file = File::open(path)?;
    let reader = SerializedFileReader::new(file)?;
    Ok(reader.metadata().file_metadata().num_rows() as u64)
}

// ── Internals ──────────────────────────────────────────────────────

fn field_vec<'a, T, V>(records: &'a [T], f: impl Fn(&'a T) -> V) -> Vec<V> {
    records.iter().map(f).collect()
}

fn write_batch(path: &Path, batch: &RecordBatch) -> GenResult<()> {
    let tmp = tmp_path(path);
    let file = File::create(&tmp)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(batch)?;
    writer.close()?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn read_rows(path: &Path) -> GenResult<Vec<Row>> {
    let file = File::open(path)?;
    let reader = SerializedFileReader::new(file)?;
    let mut rows = Vec::new();
    for row in reader.get_row_iter(None)? {
        rows.push(row?);
    }
    Ok(rows)
}

fn load_error(message: String) -> GenError {
    GenError::MasterDataLoad(message)
}

fn days_since_epoch(date: NaiveDate) -> i32 {
    (date - NaiveDate::default()).num_days() as i32
}

fn date_from_days(days: i32) -> NaiveDate {
    NaiveDate::default() + Duration::days(i64::from(days))
}

/// Column access by name over one decoded row.
struct RowValues<'a> {
    fields: HashMap<&'a str, &'a Field>,
}

impl<'a> RowValues<'a> {
    fn new(row: &'a Row) -> Self {
        Self {
            fields: row
                .get_column_iter()
                .map(|(name, field)| (name.as_str(), field))
                .collect(),
        }
    }

    fn field(&self, name: &str) -> GenResult<&'a Field> {
        self.fields
            .get(name)
            .copied()
            .ok_or_else(|| load_error(format!("missing column '{name}'")))
    }

    fn string(&self, name: &str) -> GenResult<String> {
        match self.field(name)? {
            Field::Str(s) => Ok(s.clone()),
            other => Err(load_error(format!("column '{name}': expected string, got {other:?}"))),
        }
    }

    fn opt_string(&self, name: &str) -> GenResult<Option<String>> {
        match self.field(name)? {
            Field::Null => Ok(None),
            Field::Str(s) => Ok(Some(s.clone())),
            other => Err(load_error(format!("column '{name}': expected string, got {other:?}"))),
        }
    }

    fn f64(&self, name: &str) -> GenResult<f64> {
        match self.field(name)? {
            Field::Double(v) => Ok(*v),
            other => Err(load_error(format!("column '{name}': expected double, got {other:?}"))),
        }
    }

    fn i64(&self, name: &str) -> GenResult<i64> {
        match self.field(name)? {
            Field::Long(v) => Ok(*v),
            other => Err(load_error(format!("column '{name}': expected int64, got {other:?}"))),
        }
    }

    fn bool(&self, name: &str) -> GenResult<bool> {
        match self.field(name)? {
            Field::Bool(v) => Ok(*v),
            other => Err(load_error(format!("column '{name}': expected bool, got {other:?}"))),
        }
    }

    fn date(&self, name: &str) -> GenResult<NaiveDate> {
        match self.field(name)? {
            Field::Date(days) => Ok(date_from_days(*days)),
            other => Err(load_error(format!("column '{name}': expected date, got {other:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_customers() -> Vec<CustomerRecord> {
        vec![
            CustomerRecord {
                customer_id: "CUST000001".to_string(),
                first_name: "Alice".to_string(),
                last_name: "Berg".to_string(),
                email: Some("alice.berg@example.com".to_string()),
                phone: Some("555-0100".to_string()),
                address: "12 Main Street".to_string(),
                city: Some("Springfield".to_string()),
                state: Some("Ohio".to_string()),
                zip_code: Some("45501".to_string()),
                date_of_birth: date(1988, 4, 2),
                gender: Gender::Female,
                registration_date: date(2024, 6, 15),
                loyalty_member: true,
                preferred_contact: ContactChannel::Email,
                customer_segment: CustomerSegment::Premium,
                total_lifetime_value: 1234.56,
            },
            CustomerRecord {
                customer_id: "CUST000002".to_string(),
                first_name: "Bob".to_string(),
                last_name: "Cole".to_string(),
                email: None,
                phone: None,
                address: "9 Oak Avenue".to_string(),
                city: None,
                state: None,
                zip_code: None,
                date_of_birth: date(1969, 12, 31),
                gender: Gender::Other,
                registration_date: date(2025, 1, 1),
                loyalty_member: false,
                preferred_contact: ContactChannel::Sms,
                customer_segment: CustomerSegment::Vip,
                total_lifetime_value: 0.0,
            },
        ]
    }

    #[test]
    fn customer_columns_survive_a_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("customers.parquet");
        let customers = sample_customers();

        write_customers(&path, &customers).unwrap();
        assert_eq!(count_rows(&path).unwrap(), 2, "footer row count should match records");

        let loaded = read_customers(&path).unwrap();
        assert_eq!(loaded, customers, "nullable and date columns must survive persistence");
    }

    #[test]
    fn write_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("customers.parquet");
        write_customers(&path, &sample_customers()).unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["customers.parquet".to_string()]);
    }

    #[test]
    fn garbage_file_is_rejected_not_misread() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("customers.parquet");
        std::fs::write(&path, b"not a parquet file").unwrap();
        assert!(read_customers(&path).is_err());
    }
}
