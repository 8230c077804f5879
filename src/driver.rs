use async_trait::async_trait;
use tracing::debug;

use crate::connection::EmbeddedConnection;
use crate::dialect::DialectConfig;
use crate::error::DialectError;
use crate::query::CompiledQuery;
use crate::results::QueryResult;
use crate::storage::SqlStorage;
use crate::traits::{DatabaseConnection, Driver, QueryExecutor};

/// Connection lifecycle manager for the embedded engine.
///
/// The engine is always available inside the host context: there is no pool
/// and no handshake, so `init`, `release_connection`, and `destroy` have
/// nothing to do. Acquisition is a cheap constructor call; every connection
/// wraps the same underlying execution primitive.
pub struct EmbeddedDriver<S> {
    config: DialectConfig<S>,
}

impl<S> EmbeddedDriver<S> {
    #[must_use]
    pub fn new(config: DialectConfig<S>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl<S: SqlStorage> Driver for EmbeddedDriver<S> {
    type Connection = EmbeddedConnection<S>;

    async fn init(&mut self) -> Result<(), DialectError> {
        Ok(())
    }

    async fn acquire_connection(&self) -> Result<EmbeddedConnection<S>, DialectError> {
        debug!("acquiring connection to embedded storage context");
        Ok(EmbeddedConnection::new(self.config.clone()))
    }

    // Transaction boundaries delegate to the connection, which reports the
    // capability gap rather than running statements non-transactionally.

    async fn begin_transaction(
        &self,
        conn: &mut EmbeddedConnection<S>,
    ) -> Result<(), DialectError> {
        conn.begin_transaction().await
    }

    async fn commit_transaction(
        &self,
        conn: &mut EmbeddedConnection<S>,
    ) -> Result<(), DialectError> {
        conn.commit_transaction().await
    }

    async fn rollback_transaction(
        &self,
        conn: &mut EmbeddedConnection<S>,
    ) -> Result<(), DialectError> {
        conn.rollback_transaction().await
    }

    async fn release_connection(
        &self,
        _conn: EmbeddedConnection<S>,
    ) -> Result<(), DialectError> {
        Ok(())
    }

    async fn destroy(&mut self) -> Result<(), DialectError> {
        Ok(())
    }
}

/// Lets the driver serve as the introspector's query handle: each metadata
/// query runs on a fresh connection, which is what acquisition costs here.
#[async_trait]
impl<S: SqlStorage> QueryExecutor for EmbeddedDriver<S> {
    async fn execute(&self, compiled: &CompiledQuery) -> Result<QueryResult, DialectError> {
        let mut conn = self.acquire_connection().await?;
        conn.execute_query(compiled).await
    }
}
