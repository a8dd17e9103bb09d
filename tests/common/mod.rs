//! Shared helpers for tests that need a live MongoDB.

use std::io::Write;
use std::path::PathBuf;

use bson::{doc, Document};
use docbench::{Connection, ConnectionConfig};
use tempfile::NamedTempFile;

// =============================================================================
// Database
// =============================================================================

pub fn test_uri() -> String {
    std::env::var("DOCBENCH_TEST_URI").unwrap_or_else(|_| "mongodb://localhost:27017/".to_string())
}

/// Connect to a per-test database and drop whatever a previous run left
pub fn fresh_db(name: &str) -> Connection {
    let config = ConnectionConfig {
        uri: test_uri(),
        database: format!("docbench_test_{}", name),
    };
    let conn = Connection::connect(&config).expect("failed to connect to test server");
    conn.database().drop().run().expect("failed to drop test database");
    conn
}

pub fn count(conn: &Connection, collection: &str) -> u64 {
    conn.collection(collection)
        .count_documents(doc! {})
        .run()
        .expect("count failed")
}

/// Every document of `collection`, ordered by `_id`
pub fn dump(conn: &Connection, collection: &str) -> Vec<Document> {
    conn.collection(collection)
        .find(doc! {})
        .sort(doc! { "_id": 1 })
        .run()
        .expect("find failed")
        .collect::<Result<Vec<_>, _>>()
        .expect("cursor failed")
}

// =============================================================================
// Fixtures
// =============================================================================

pub fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("data")
}

pub fn customers_fixture() -> PathBuf {
    data_dir().join("customers.jsonl")
}

/// Write `lines` to a temporary NDJSON file
pub fn ndjson(lines: &[serde_json::Value]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    for line in lines {
        writeln!(file, "{}", line).expect("failed to write fixture");
    }
    file.flush().expect("failed to flush fixture");
    file
}

/// The single-line example record: one address, no payments, one subscription
pub fn single_record() -> serde_json::Value {
    serde_json::json!({
        "customer": {"merchant_user_id": "u1", "first_name": "A", "last_name": "B"},
        "addresses": [{"customer": "u1", "address_type": "shipping_address", "city": "X"}],
        "payments": [],
        "subscriptions": [{"customer": "u1", "merchant_order_id": "o1"}]
    })
}
