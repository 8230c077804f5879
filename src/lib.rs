//! Dialect adapter bridging a generic SQL query builder to an embedded,
//! synchronous SQLite-family storage engine hosted in-process.
//!
//! The crate is a thin protocol adapter: a compiled query goes in, a
//! normalized result set comes out. Four cooperating components implement the
//! builder-facing contract ([`traits`]): a dialect descriptor constructs the
//! other three; an adapter declares capabilities; a driver manages the
//! connection lifecycle; a connection executes one compiled query against the
//! engine's synchronous execute primitive and maps its cursor to a
//! [`results::QueryResult`].
//!
//! Transactions and streaming are deliberate capability gaps: every such call
//! fails with [`DialectError::Unsupported`] instead of silently running
//! statements non-transactionally.

pub mod connection;
pub mod dialect;
pub mod driver;
pub mod error;
pub mod prelude;
pub mod query;
pub mod results;
pub mod sqlite;
pub mod storage;
pub mod traits;
pub mod types;

pub use connection::EmbeddedConnection;
pub use dialect::{DialectConfig, EmbeddedDialect};
pub use driver::EmbeddedDriver;
pub use error::DialectError;
pub use query::CompiledQuery;
pub use results::{QueryResult, Row};
pub use storage::{RowCursor, SqlStorage, StorageError};
pub use types::Value;
