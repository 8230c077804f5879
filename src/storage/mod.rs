//! The downstream boundary: the host-provided embedded execute primitive.
//!
//! The host engine's cursor has no declared shape of its own, so this module
//! pins it down as an explicit interface: a fallible row iterator plus a
//! scalar write count. Implementations adapt their engine's raw result to
//! [`RowCursor`] at this boundary rather than leaking engine types upward.

#[cfg(feature = "rusqlite")]
pub mod rusqlite_store;

#[cfg(feature = "rusqlite")]
pub use rusqlite_store::RusqliteStorage;

use thiserror::Error;

use crate::results::Row;
use crate::types::Value;

/// A failure raised by the embedded engine.
///
/// Keeps the engine's original error as the source so diagnostics survive the
/// trip through the adapter untouched.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct StorageError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl StorageError {
    /// Wrap an engine error, preserving it as the source.
    pub fn from_engine(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// A storage failure with no underlying engine error.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }
}

/// Typed view over the engine's raw execution result: the rows the statement
/// produced, in order, plus the number of rows it wrote.
///
/// A cursor is scoped to a single execute call; it is never shared across
/// calls or persisted.
pub trait RowCursor {
    /// The next row in statement order, or `None` once exhausted.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the engine fails while producing the row.
    fn next_row(&mut self) -> Result<Option<Row>, StorageError>;

    /// Number of rows the statement wrote. Zero for reads.
    fn rows_written(&self) -> u64;
}

/// The host's embedded execute primitive: synchronous, whole-result, and
/// parameterized by ordered positional substitution only.
///
/// The host serializes access to one storage context, so implementations get
/// to decide how concurrent callers are handled; the adapter layer above adds
/// no coordination of its own.
pub trait SqlStorage: Send + Sync {
    /// The engine's cursor type, adapted to [`RowCursor`].
    type Cursor: RowCursor;

    /// Execute one SQL statement with positional parameters.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for any engine failure: malformed SQL,
    /// constraint violations, storage faults.
    fn exec(&self, sql: &str, params: &[Value]) -> Result<Self::Cursor, StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_error_keeps_source() {
        let inner = std::io::Error::other("disk gone");
        let err = StorageError::from_engine(inner);
        assert_eq!(err.to_string(), "disk gone");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn plain_message_has_no_source() {
        let err = StorageError::message("mutex poisoned");
        assert_eq!(err.to_string(), "mutex poisoned");
        assert!(std::error::Error::source(&err).is_none());
    }
}
