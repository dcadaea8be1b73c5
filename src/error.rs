//! Error types for loading, building and querying.
//!
//! Library operations return these typed errors; the `plotify` binary wraps
//! them with `anyhow` context.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to obtain a record collection from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read record file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure to construct an index from a record collection.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("record collection too large to index: {count} records (max {max})")]
    TooManyRecords { count: usize, max: u64 },
}

/// Invalid query input rejected at the engine boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("invalid argument `{name}`: {value} (must be non-negative)")]
    InvalidArgument { name: &'static str, value: i64 },

    #[error("malformed filter `{0}` (expected field=value)")]
    MalformedFilter(String),
}
