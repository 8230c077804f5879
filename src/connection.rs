use async_trait::async_trait;
use tracing::{debug, trace};

use crate::dialect::DialectConfig;
use crate::error::DialectError;
use crate::query::CompiledQuery;
use crate::results::QueryResult;
use crate::storage::{RowCursor, SqlStorage};
use crate::traits::{DatabaseConnection, QueryStream};

const TRANSACTIONS_UNSUPPORTED: &str = "transactions are not supported yet by the embedded engine";
const STREAMING_UNSUPPORTED: &str =
    "streaming is not supported; the embedded engine's execute primitive is whole-result";

/// A single logical channel executing compiled SQL against the host engine.
///
/// Holds no state across calls beyond the shared config handle: no query
/// cache, no prepared statements, no transaction client. Each `execute_query`
/// is independent of every prior call.
pub struct EmbeddedConnection<S> {
    config: DialectConfig<S>,
}

impl<S> EmbeddedConnection<S> {
    #[must_use]
    pub fn new(config: DialectConfig<S>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl<S: SqlStorage> DatabaseConnection for EmbeddedConnection<S> {
    async fn execute_query(
        &mut self,
        compiled: &CompiledQuery,
    ) -> Result<QueryResult, DialectError> {
        trace!(sql = %compiled.sql, params = compiled.parameters.len(), "executing compiled query");

        let mut cursor = self
            .config
            .context()
            .exec(&compiled.sql, &compiled.parameters)?;

        // Point materialization: the cursor is whole-result, not a stream.
        let mut rows = Vec::new();
        while let Some(row) = cursor.next_row()? {
            rows.push(row);
        }

        // A zero write count means "nothing to report", not "zero rows
        // affected"; reads fall out of the result the same way.
        let rows_written = cursor.rows_written();
        let num_affected_rows = (rows_written > 0).then(|| u128::from(rows_written));

        debug!(
            rows = rows.len(),
            rows_written, "compiled query executed against embedded storage"
        );

        Ok(QueryResult {
            rows,
            num_affected_rows,
            // The embedded engine does not expose a last-inserted row id.
            insert_id: None,
        })
    }

    async fn stream_query(
        &mut self,
        _compiled: &CompiledQuery,
        _chunk_size: usize,
    ) -> Result<QueryStream<'_>, DialectError> {
        Err(DialectError::Unsupported(STREAMING_UNSUPPORTED.into()))
    }

    async fn begin_transaction(&mut self) -> Result<(), DialectError> {
        Err(DialectError::Unsupported(TRANSACTIONS_UNSUPPORTED.into()))
    }

    async fn commit_transaction(&mut self) -> Result<(), DialectError> {
        Err(DialectError::Unsupported(TRANSACTIONS_UNSUPPORTED.into()))
    }

    async fn rollback_transaction(&mut self) -> Result<(), DialectError> {
        Err(DialectError::Unsupported(TRANSACTIONS_UNSUPPORTED.into()))
    }
}
