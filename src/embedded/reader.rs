use crate::connection::Connection;
use crate::error::{Error, Result};
use crate::report::OperationReport;
use crate::types::collections;
use bson::{doc, Bson, Document};
use log::info;
use std::io::Write;
use std::time::Instant;

/// Find every embedded customer holding a subscription for
/// `merchant_user_id` and print each nested subscription with the parent's
/// name. One query, no joins.
pub fn query_embedded_model<W: Write>(
    conn: &Connection,
    merchant_user_id: &str,
    out: &mut W,
) -> Result<OperationReport> {
    let embedded_customers = conn.collection(collections::EMBEDDED_CUSTOMERS);

    let start = Instant::now();
    let mut matched = 0;
    let mut printed = 0;

    let cursor = embedded_customers
        .find(doc! { "subscriptions.customer": merchant_user_id })
        .run()?;
    for customer in cursor {
        let customer = customer?;
        printed += write_subscriptions(&customer, out)?;
        matched += 1;
    }
    let elapsed = start.elapsed();

    info!("read {} embedded subscriptions for {} in {:?}", printed, merchant_user_id, elapsed);
    Ok(OperationReport::new("Embedded Model Read", elapsed)
        .with_count(collections::EMBEDDED_CUSTOMERS, matched)
        .with_count(collections::SUBSCRIPTIONS, printed))
}

/// Write `<subscription> <first_name> <last_name>` for each nested
/// subscription of one embedded customer
fn write_subscriptions<W: Write>(customer: &Document, out: &mut W) -> Result<usize> {
    let first_name = required(customer, "first_name")?;
    let last_name = required(customer, "last_name")?;
    let subscriptions = customer
        .get_array("subscriptions")
        .map_err(|_| Error::MissingField {
            entity: "embedded customer",
            field: "subscriptions",
        })?;

    for subscription in subscriptions {
        writeln!(out, "{} {} {}", subscription, plain(first_name), plain(last_name))?;
    }
    Ok(subscriptions.len())
}

fn required<'a>(customer: &'a Document, field: &'static str) -> Result<&'a Bson> {
    customer.get(field).ok_or(Error::MissingField {
        entity: "embedded customer",
        field,
    })
}

/// Strings print bare, everything else in BSON display form
fn plain(value: &Bson) -> String {
    match value {
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}
