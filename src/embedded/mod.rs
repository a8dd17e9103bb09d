//! Embedded shape - one document per customer
//!
//! Addresses, payments and subscriptions are nested as arrays inside the
//! customer document and stored in `embedded_customers`, so reads need no
//! joins.

pub mod reader;
pub mod updater;
pub mod writer;

pub use reader::query_embedded_model;
pub use updater::update_embedded_model;
pub use writer::insert_embedded_model;

use crate::error::Result;
use crate::reader::load_jsonl;
use crate::types::{Doc, Record};
use serde_json::Value;
use std::path::Path;

/// Attach a record's related entities to its customer document.
///
/// An existing `addresses`/`payments`/`subscriptions` key on the customer is
/// overwritten in place.
pub fn embed(record: Record) -> Doc {
    let mut customer = record.customer;
    customer.insert("addresses".to_string(), Value::Array(into_values(record.addresses)));
    customer.insert("payments".to_string(), Value::Array(into_values(record.payments)));
    customer.insert(
        "subscriptions".to_string(),
        Value::Array(into_values(record.subscriptions)),
    );
    customer
}

/// Combined documents for every record of `path`, in file order
pub fn load_embedded<P: AsRef<Path>>(path: P) -> Result<Vec<Doc>> {
    load_jsonl(path)?
        .map(|record| record.map(embed))
        .collect()
}

fn into_values(docs: Vec<Doc>) -> Vec<Value> {
    docs.into_iter().map(Value::Object).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_record_example() {
        let record: Record = serde_json::from_value(json!({
            "customer": {"merchant_user_id": "u1", "first_name": "A", "last_name": "B"},
            "addresses": [{"customer": "u1", "address_type": "shipping_address", "city": "X"}],
            "payments": [],
            "subscriptions": [{"customer": "u1", "merchant_order_id": "o1"}]
        }))
        .unwrap();

        let doc = embed(record);

        assert_eq!(doc["merchant_user_id"], "u1");
        assert_eq!(doc["addresses"].as_array().unwrap().len(), 1);
        assert_eq!(doc["payments"].as_array().unwrap().len(), 0);
        assert_eq!(doc["subscriptions"].as_array().unwrap().len(), 1);
        assert_eq!(doc["subscriptions"][0]["merchant_order_id"], "o1");
    }

    #[test]
    fn test_existing_nested_key_is_replaced_in_place() {
        let record: Record = serde_json::from_value(json!({
            "customer": {"merchant_user_id": "u1", "payments": "stale", "first_name": "A"},
            "addresses": [],
            "payments": [{"customer": "u1", "card": "visa"}],
            "subscriptions": []
        }))
        .unwrap();

        let doc = embed(record);
        let keys: Vec<&str> = doc.keys().map(String::as_str).collect();

        assert_eq!(
            keys,
            vec!["merchant_user_id", "payments", "first_name", "addresses", "subscriptions"]
        );
        assert_eq!(doc["payments"][0]["card"], "visa");
    }
}
