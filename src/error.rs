use thiserror::Error;

use crate::storage::StorageError;

/// Errors surfaced by the dialect adapter.
///
/// Engine failures pass through the `Storage` variant unchanged; nothing is
/// retried, translated, or swallowed at this layer.
#[derive(Debug, Error)]
pub enum DialectError {
    /// A failure raised by the embedded engine while executing a statement
    /// (malformed SQL, constraint violation, storage fault).
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A capability this backend deliberately does not provide
    /// (transactions, streaming). Permanent for this version; not retryable.
    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),
}
