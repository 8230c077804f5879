use crate::traits::DialectAdapter;

/// Capability flags for SQLite-family backends.
///
/// `RETURNING` and `CREATE ... IF NOT EXISTS` are in the dialect; DDL is not
/// transactional and there is no SQL Server style `OUTPUT` clause.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteAdapter;

impl SqliteAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DialectAdapter for SqliteAdapter {
    fn supports_returning(&self) -> bool {
        true
    }

    fn supports_create_if_not_exists(&self) -> bool {
        true
    }

    fn supports_transactional_ddl(&self) -> bool {
        false
    }

    fn supports_output_clause(&self) -> bool {
        false
    }
}
