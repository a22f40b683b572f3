//! Error types for the data layer.

use thiserror::Error;

/// Main error type for storage and migration operations.
///
/// Errors of this type never cross the repository contract boundary: the
/// public contract methods catch them, log the underlying message, and
/// degrade to a `false`/default return. They do surface from the internal
/// `try_*` functions and from the bulk migration APIs.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The relational engine is not configured (no connection string).
    #[error("Postgres connection not set up")]
    NotConfigured,

    /// Connection pool error with context
    #[error("Pool error: {0}")]
    Pool(String),

    /// Relational engine connection or query error
    #[error("Postgres error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// Embedded store error
    #[error("Embedded store error: {0}")]
    Embedded(#[from] rusqlite::Error),

    /// Document serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive packing/unpacking failed
    #[error("Archive error: {0}")]
    Archive(String),
}

/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;
