use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading records or talking to the database.
///
/// Every variant is terminal for the operation that produced it; nothing in
/// this crate retries.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid record on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("{entity} document has no `{field}` field")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("failed to convert document to BSON: {0}")]
    Bson(#[from] bson::ser::Error),

    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
