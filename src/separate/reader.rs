use crate::connection::Connection;
use crate::error::{Error, Result};
use crate::report::OperationReport;
use crate::types::{
    collections, ADDRESS_TYPE_FIELD, CUSTOMER_FIELD, IDENTITY_FIELD, SHIPPING_ADDRESS,
};
use bson::{doc, Document};
use log::info;
use std::io::Write;
use std::time::Instant;

/// Fetch a customer's subscriptions and join each one with its customer,
/// shipping address and payment, one lookup per related collection.
///
/// Writes one line per subscription to `out`. A related document that does
/// not exist prints as `null`.
pub fn query_separate_entities<W: Write>(
    conn: &Connection,
    merchant_user_id: &str,
    out: &mut W,
) -> Result<OperationReport> {
    let subscriptions = conn.collection(collections::SUBSCRIPTIONS);
    let customers = conn.collection(collections::CUSTOMERS);
    let addresses = conn.collection(collections::ADDRESSES);
    let payments = conn.collection(collections::PAYMENTS);

    let start = Instant::now();
    let mut joined = 0;

    let cursor = subscriptions
        .find(doc! { CUSTOMER_FIELD: merchant_user_id })
        .run()?;
    for sub in cursor {
        let sub = sub?;
        let owner = sub
            .get(CUSTOMER_FIELD)
            .cloned()
            .ok_or(Error::MissingField {
                entity: "subscription",
                field: CUSTOMER_FIELD,
            })?;

        let customer = customers
            .find_one(doc! { IDENTITY_FIELD: owner.clone() })
            .run()?;
        let address = addresses
            .find_one(doc! { CUSTOMER_FIELD: owner.clone(), ADDRESS_TYPE_FIELD: SHIPPING_ADDRESS })
            .run()?;
        let payment = payments.find_one(doc! { CUSTOMER_FIELD: owner }).run()?;

        writeln!(
            out,
            "{} {} {} {}",
            sub,
            display_or_null(&customer),
            display_or_null(&address),
            display_or_null(&payment)
        )?;
        joined += 1;
    }
    let elapsed = start.elapsed();

    info!("joined {} subscriptions for {} in {:?}", joined, merchant_user_id, elapsed);
    Ok(OperationReport::new("Separate Entities Read", elapsed)
        .with_count(collections::SUBSCRIPTIONS, joined))
}

/// Render an optional lookup result, `null` when nothing matched
pub fn display_or_null(doc: &Option<Document>) -> String {
    match doc {
        Some(doc) => doc.to_string(),
        None => String::from("null"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_document_prints_null() {
        assert_eq!(display_or_null(&None), "null");
    }

    #[test]
    fn test_present_document_prints_fields() {
        let rendered = display_or_null(&Some(doc! { "customer": "u1", "city": "X" }));
        assert!(rendered.contains("\"city\": \"X\""));
        assert_ne!(rendered, "null");
    }
}
