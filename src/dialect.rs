use std::sync::Arc;

use crate::driver::EmbeddedDriver;
use crate::sqlite::{SqliteAdapter, SqliteIntrospector, SqliteQueryCompiler};
use crate::storage::SqlStorage;
use crate::traits::Dialect;

/// Configuration for the embedded dialect: a shared handle to the host's
/// per-instance storage context.
///
/// Nothing is validated here. A handle over a broken context fails lazily, at
/// the first primitive operation a connection attempts against it.
pub struct DialectConfig<S> {
    ctx: Arc<S>,
}

impl<S> DialectConfig<S> {
    #[must_use]
    pub fn new(ctx: Arc<S>) -> Self {
        Self { ctx }
    }

    /// The storage context this dialect executes against.
    #[must_use]
    pub fn context(&self) -> &S {
        &self.ctx
    }
}

// Manual impl so cloning never requires S: Clone; every clone shares the same
// underlying context.
impl<S> Clone for DialectConfig<S> {
    fn clone(&self) -> Self {
        Self {
            ctx: Arc::clone(&self.ctx),
        }
    }
}

/// Dialect for host-embedded, SQLite-compatible storage engines.
///
/// The single entry point a query builder instantiates; it names the other
/// three components on demand. The embedded engine speaks the SQLite dialect,
/// so the adapter, compiler, and introspector are the generic SQLite-family
/// implementations:
/// ```rust
/// # #[cfg(feature = "rusqlite")] {
/// use std::sync::Arc;
/// use embedded_dialect::prelude::*;
///
/// let storage = RusqliteStorage::open_in_memory().unwrap();
/// let dialect = EmbeddedDialect::new(DialectConfig::new(Arc::new(storage)));
/// let driver = dialect.create_driver();
/// # let _ = driver;
/// # }
/// ```
pub struct EmbeddedDialect<S> {
    config: DialectConfig<S>,
}

impl<S> EmbeddedDialect<S> {
    #[must_use]
    pub fn new(config: DialectConfig<S>) -> Self {
        Self { config }
    }
}

impl<S: SqlStorage + 'static> Dialect for EmbeddedDialect<S> {
    type Adapter = SqliteAdapter;
    type Driver = EmbeddedDriver<S>;
    type Compiler = SqliteQueryCompiler;
    type Executor = EmbeddedDriver<S>;
    type Introspector = SqliteIntrospector<EmbeddedDriver<S>>;

    fn create_adapter(&self) -> SqliteAdapter {
        SqliteAdapter::new()
    }

    fn create_driver(&self) -> EmbeddedDriver<S> {
        EmbeddedDriver::new(self.config.clone())
    }

    fn create_query_compiler(&self) -> SqliteQueryCompiler {
        SqliteQueryCompiler::new()
    }

    fn create_introspector(
        &self,
        executor: EmbeddedDriver<S>,
    ) -> SqliteIntrospector<EmbeddedDriver<S>> {
        SqliteIntrospector::new(executor)
    }
}
