//! The upstream contract: the trait surface a generic query builder consumes.
//!
//! A dialect names the adapter, driver, compiler, and introspector for one
//! backend; the builder compiles a query, asks the driver for a connection,
//! and calls `execute_query` on it. All methods that may touch the engine are
//! async for calling-convention compatibility, even where a backend's
//! primitive is synchronous underneath.

use async_trait::async_trait;
use futures_util::stream::BoxStream;

use crate::error::DialectError;
use crate::query::CompiledQuery;
use crate::results::QueryResult;

/// Chunked results from a streaming execution. No backend in this crate
/// produces one yet; the alias keeps `stream_query` fully typed.
pub type QueryStream<'a> = BoxStream<'a, Result<QueryResult, DialectError>>;

/// Pluggable strategy object telling a query builder how to compile, adapt,
/// and introspect one specific SQL backend.
///
/// Construction only; nothing here validates configuration or touches the
/// engine. A bad configuration surfaces when the driver or connection first
/// uses it.
pub trait Dialect {
    type Adapter: DialectAdapter;
    type Driver: Driver;
    type Compiler: QueryCompiler;
    /// The handle the introspector runs its metadata queries through.
    type Executor: QueryExecutor;
    type Introspector: DatabaseIntrospector;

    fn create_adapter(&self) -> Self::Adapter;
    fn create_driver(&self) -> Self::Driver;
    fn create_query_compiler(&self) -> Self::Compiler;
    fn create_introspector(&self, executor: Self::Executor) -> Self::Introspector;
}

/// Capability descriptor a query builder reads to decide which SQL features
/// to emit for this backend.
pub trait DialectAdapter {
    /// Whether the backend accepts a `RETURNING` clause on writes.
    fn supports_returning(&self) -> bool;

    /// Whether `CREATE ... IF NOT EXISTS` is accepted.
    fn supports_create_if_not_exists(&self) -> bool;

    /// Whether DDL can run inside a transaction.
    fn supports_transactional_ddl(&self) -> bool;

    /// Whether the backend accepts an `OUTPUT` clause (SQL Server style).
    fn supports_output_clause(&self) -> bool;
}

/// Dialect-specific compilation conventions: placeholder shape and
/// identifier quoting. The query builder owns actual SQL generation; this
/// trait only contributes the backend-specific pieces.
pub trait QueryCompiler {
    /// Placeholder text for the bind parameter at zero-based `position`.
    fn placeholder(&self, position: usize) -> String;

    /// Quote `identifier` for use in SQL text.
    fn quote_identifier(&self, identifier: &str) -> String;

    /// Bundle already-generated SQL text with its ordered parameters.
    fn compile(&self, sql: impl Into<String>, parameters: Vec<crate::types::Value>) -> CompiledQuery
    where
        Self: Sized,
    {
        CompiledQuery::new(sql, parameters)
    }
}

/// Lifecycle manager for connections to one backend.
///
/// Transaction methods take the connection they operate on so pooled
/// implementations can route them; here they delegate straight down.
#[async_trait]
pub trait Driver: Send + Sync {
    type Connection: DatabaseConnection;

    /// Prepare the driver for use.
    ///
    /// # Errors
    ///
    /// Returns `DialectError` if the backend needs a handshake and it fails.
    async fn init(&mut self) -> Result<(), DialectError>;

    /// Produce one fresh connection. Exactly one connection per call.
    ///
    /// # Errors
    ///
    /// Returns `DialectError` if a connection cannot be constructed.
    async fn acquire_connection(&self) -> Result<Self::Connection, DialectError>;

    /// # Errors
    ///
    /// Fails when the backend does not support transactions.
    async fn begin_transaction(&self, conn: &mut Self::Connection) -> Result<(), DialectError>;

    /// # Errors
    ///
    /// Fails when the backend does not support transactions.
    async fn commit_transaction(&self, conn: &mut Self::Connection) -> Result<(), DialectError>;

    /// # Errors
    ///
    /// Fails when the backend does not support transactions.
    async fn rollback_transaction(&self, conn: &mut Self::Connection) -> Result<(), DialectError>;

    /// Return a connection the builder is done with.
    ///
    /// # Errors
    ///
    /// Returns `DialectError` if the backend tracks pooled resources and the
    /// return fails.
    async fn release_connection(&self, conn: Self::Connection) -> Result<(), DialectError>;

    /// Tear the driver down.
    ///
    /// # Errors
    ///
    /// Returns `DialectError` if backend teardown fails.
    async fn destroy(&mut self) -> Result<(), DialectError>;
}

/// A single logical channel for executing compiled SQL against a backend.
#[async_trait]
pub trait DatabaseConnection: Send {
    /// Execute one compiled query and return the normalized result.
    ///
    /// # Errors
    ///
    /// Engine failures propagate unchanged; no retry or translation.
    async fn execute_query(&mut self, compiled: &CompiledQuery)
    -> Result<QueryResult, DialectError>;

    /// Execute a query as a stream of result chunks.
    ///
    /// # Errors
    ///
    /// Fails with `DialectError::Unsupported` on backends whose execute
    /// primitive is whole-result.
    async fn stream_query(
        &mut self,
        compiled: &CompiledQuery,
        chunk_size: usize,
    ) -> Result<QueryStream<'_>, DialectError>;

    /// # Errors
    ///
    /// Fails when the backend does not support transactions.
    async fn begin_transaction(&mut self) -> Result<(), DialectError>;

    /// # Errors
    ///
    /// Fails when the backend does not support transactions.
    async fn commit_transaction(&mut self) -> Result<(), DialectError>;

    /// # Errors
    ///
    /// Fails when the backend does not support transactions.
    async fn rollback_transaction(&mut self) -> Result<(), DialectError>;
}

/// Handle for running queries on behalf of components that sit outside the
/// driver/connection pair, such as the introspector. Upstream this is the
/// owning query-builder instance; the embedded driver implements it directly.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Execute one compiled query.
    ///
    /// # Errors
    ///
    /// Propagates whatever the underlying connection returns.
    async fn execute(&self, compiled: &CompiledQuery) -> Result<QueryResult, DialectError>;
}

/// Schema metadata reader for one backend.
#[async_trait]
pub trait DatabaseIntrospector: Send + Sync {
    /// User tables and views, with column metadata, excluding backend
    /// internals.
    ///
    /// # Errors
    ///
    /// Propagates failures from the metadata queries.
    async fn get_tables(&self) -> Result<Vec<TableMetadata>, DialectError>;
}

/// One table or view, as reported by the introspector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMetadata {
    pub name: String,
    pub is_view: bool,
    pub columns: Vec<ColumnMetadata>,
}

/// One column of an introspected table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMetadata {
    pub name: String,
    /// Declared type, as the backend reports it; may be empty for untyped
    /// columns.
    pub data_type: String,
    pub is_nullable: bool,
    pub has_default: bool,
}
