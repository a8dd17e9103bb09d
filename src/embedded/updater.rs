use crate::connection::Connection;
use crate::embedded::load_embedded;
use crate::error::Result;
use crate::report::OperationReport;
use crate::types::collections;
use crate::upsert::{bulk_upsert, Upsert};
use log::info;
use std::path::Path;
use std::time::Instant;

/// Rebuild the combined documents from `path` and upsert each one by
/// `merchant_user_id` in a single bulk write.
pub fn update_embedded_model<P: AsRef<Path>>(conn: &Connection, path: P) -> Result<OperationReport> {
    let upserts = load_embedded(path)?
        .iter()
        .map(Upsert::customer)
        .collect::<Result<Vec<_>>>()?;

    let start = Instant::now();
    let updated = bulk_upsert(conn, collections::EMBEDDED_CUSTOMERS, upserts)?;
    let elapsed = start.elapsed();

    info!("upserted {} embedded customers in {:?}", updated, elapsed);
    Ok(OperationReport::new("Embedded Model Update", elapsed)
        .with_count(collections::EMBEDDED_CUSTOMERS, updated))
}
