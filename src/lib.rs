//! # docbench - Document Schema Strategy Benchmark
//!
//! Compares two MongoDB storage shapes for customer records with addresses,
//! payments and subscriptions, timing bulk inserts, filtered reads and bulk
//! upserts under each.
//!
//! ## Modules
//!
//! - **separate**: one collection per entity, joined at query time
//! - **embedded**: one document per customer with related entities nested
//! - **reader**: streaming NDJSON record reader shared by both shapes
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docbench::{Connection, ConnectionConfig};
//!
//! # fn main() -> docbench::Result<()> {
//! let conn = Connection::connect(&ConnectionConfig::default())?;
//! let mut stdout = std::io::stdout();
//!
//! let report = docbench::insert_embedded_model(&conn, "customers.jsonl")?;
//! report.write_to(&mut stdout)?;
//!
//! let report = docbench::query_embedded_model(&conn, "u1", &mut stdout)?;
//! report.write_to(&mut stdout)?;
//! # Ok(())
//! # }
//! ```
//!
//! Input files hold one JSON object per line:
//!
//! ```text
//! {"customer": {...}, "addresses": [...], "payments": [...], "subscriptions": [...]}
//! ```

pub mod connection;
pub mod embedded;
pub mod error;
pub mod reader;
pub mod report;
pub mod separate;
pub mod types;
pub mod upsert;

// Re-export commonly used types for convenience
pub use connection::{Connection, ConnectionConfig};
pub use embedded::{embed, insert_embedded_model, query_embedded_model, update_embedded_model};
pub use error::{Error, Result};
pub use reader::{load_jsonl, RecordStream};
pub use report::OperationReport;
pub use separate::{
    insert_separate_entities, query_separate_entities, update_separate_entities, SeparateBatches,
};
pub use types::{CustomerKey, Doc, Record, SubscriptionKey};
pub use upsert::Upsert;
