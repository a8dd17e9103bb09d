use crate::connection::Connection;
use crate::error::Result;
use crate::reader::load_jsonl;
use crate::report::OperationReport;
use crate::separate::SeparateBatches;
use crate::types::{collections, to_document, Doc};
use log::{debug, info};
use std::path::Path;
use std::time::Instant;

/// Insert every record of `path` into the four entity collections.
///
/// The file is fully loaded and split before the clock starts; only the
/// four `insert_many` calls are timed.
pub fn insert_separate_entities<P: AsRef<Path>>(conn: &Connection, path: P) -> Result<OperationReport> {
    let batches = SeparateBatches::from_records(load_jsonl(path)?)?;

    let start = Instant::now();
    let customers = insert_batch(conn, collections::CUSTOMERS, &batches.customers)?;
    let addresses = insert_batch(conn, collections::ADDRESSES, &batches.addresses)?;
    let payments = insert_batch(conn, collections::PAYMENTS, &batches.payments)?;
    let subscriptions = insert_batch(conn, collections::SUBSCRIPTIONS, &batches.subscriptions)?;
    let elapsed = start.elapsed();

    let report = OperationReport::new("Separate Entities Write", elapsed)
        .with_count(collections::CUSTOMERS, customers)
        .with_count(collections::ADDRESSES, addresses)
        .with_count(collections::PAYMENTS, payments)
        .with_count(collections::SUBSCRIPTIONS, subscriptions);

    info!("inserted {} documents across separate collections in {:?}", report.total(), elapsed);
    Ok(report)
}

/// One batched insert; the driver rejects empty batches so those are skipped.
pub(crate) fn insert_batch(conn: &Connection, collection: &str, docs: &[Doc]) -> Result<usize> {
    if docs.is_empty() {
        debug!("nothing to insert into {}", collection);
        return Ok(0);
    }

    let documents = docs.iter().map(to_document).collect::<Result<Vec<_>>>()?;
    debug!("inserting {} documents into {}", documents.len(), collection);

    let result = conn.collection(collection).insert_many(documents).run()?;
    Ok(result.inserted_ids.len())
}
