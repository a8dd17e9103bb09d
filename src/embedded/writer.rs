use crate::connection::Connection;
use crate::embedded::load_embedded;
use crate::error::Result;
use crate::report::OperationReport;
use crate::separate::writer::insert_batch;
use crate::types::collections;
use log::info;
use std::path::Path;
use std::time::Instant;

/// Insert one combined document per record into `embedded_customers`.
///
/// Only the single `insert_many` call is timed.
pub fn insert_embedded_model<P: AsRef<Path>>(conn: &Connection, path: P) -> Result<OperationReport> {
    let embedded_customers = load_embedded(path)?;

    let start = Instant::now();
    let inserted = insert_batch(conn, collections::EMBEDDED_CUSTOMERS, &embedded_customers)?;
    let elapsed = start.elapsed();

    info!("inserted {} embedded customers in {:?}", inserted, elapsed);
    Ok(OperationReport::new("Embedded Model Write", elapsed)
        .with_count(collections::EMBEDDED_CUSTOMERS, inserted))
}
