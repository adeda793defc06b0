//! Error types for storage operations

use thiserror::Error;

/// Errors raised by [`KeyValueStorage`](crate::KeyValueStorage) backends
///
/// The store itself never returns these from mutations; they surface only from
/// the storage trait and [`WatchStore::persist`](crate::WatchStore::persist).
#[derive(Debug, Error)]
pub enum StoreError {
    /// Key contains characters outside `[A-Za-z0-9_-]`
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Filesystem error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Poisoned lock in a shared backend
    #[error("Lock error: {0}")]
    LockError(String),
}

/// Result type alias for storage operations
pub type Result<T> = std::result::Result<T, StoreError>;
