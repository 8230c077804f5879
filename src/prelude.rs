//! Convenient imports for common functionality.
//!
//! Re-exports the types and traits most callers need to wire the dialect
//! into a query builder.

pub use crate::connection::EmbeddedConnection;
pub use crate::dialect::{DialectConfig, EmbeddedDialect};
pub use crate::driver::EmbeddedDriver;
pub use crate::error::DialectError;
pub use crate::query::CompiledQuery;
pub use crate::results::{QueryResult, Row};
pub use crate::sqlite::{SqliteAdapter, SqliteIntrospector, SqliteQueryCompiler};
pub use crate::storage::{RowCursor, SqlStorage, StorageError};
pub use crate::traits::{
    ColumnMetadata, DatabaseConnection, DatabaseIntrospector, Dialect, DialectAdapter, Driver,
    QueryCompiler, QueryExecutor, QueryStream, TableMetadata,
};
pub use crate::types::Value;

#[cfg(feature = "rusqlite")]
pub use crate::storage::RusqliteStorage;
