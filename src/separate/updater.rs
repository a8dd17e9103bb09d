use crate::connection::Connection;
use crate::error::Result;
use crate::reader::load_jsonl;
use crate::report::OperationReport;
use crate::types::{collections, Doc};
use crate::upsert::{bulk_upsert, Upsert};
use log::info;
use std::path::Path;
use std::time::Instant;

/// Customers and flattened subscriptions collected for an update pass
#[derive(Debug, Default)]
pub struct SeparateUpdates {
    pub customers: Vec<Doc>,
    pub subscriptions: Vec<Doc>,
}

impl SeparateUpdates {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut updates = SeparateUpdates::default();
        for record in load_jsonl(path)? {
            let record = record?;
            updates.customers.push(record.customer);
            updates.subscriptions.extend(record.subscriptions);
        }
        Ok(updates)
    }

    /// Build both upsert batches; fails on the first document missing a key
    pub fn upserts(&self) -> Result<(Vec<Upsert>, Vec<Upsert>)> {
        let customers = self
            .customers
            .iter()
            .map(Upsert::customer)
            .collect::<Result<Vec<_>>>()?;
        let subscriptions = self
            .subscriptions
            .iter()
            .map(Upsert::subscription)
            .collect::<Result<Vec<_>>>()?;
        Ok((customers, subscriptions))
    }
}

/// Upsert every customer by identity and every subscription by
/// `(customer, merchant_order_id)`, as two separate bulk writes.
pub fn update_separate_entities<P: AsRef<Path>>(conn: &Connection, path: P) -> Result<OperationReport> {
    let (customers, subscriptions) = SeparateUpdates::load(path)?.upserts()?;

    let start = Instant::now();
    let customers = bulk_upsert(conn, collections::CUSTOMERS, customers)?;
    let subscriptions = bulk_upsert(conn, collections::SUBSCRIPTIONS, subscriptions)?;
    let elapsed = start.elapsed();

    info!(
        "upserted {} customers and {} subscriptions in {:?}",
        customers, subscriptions, elapsed
    );
    Ok(OperationReport::new("Separate Entities Update", elapsed)
        .with_count(collections::CUSTOMERS, customers)
        .with_count(collections::SUBSCRIPTIONS, subscriptions))
}
