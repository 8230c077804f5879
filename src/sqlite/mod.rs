//! Generic SQLite-family dialect components.
//!
//! The embedded engine is SQL-dialect-compatible with SQLite, so the
//! capability adapter, compiler conventions, and schema introspector need no
//! engine-specific logic; the embedded dialect delegates to these as-is.

pub mod adapter;
pub mod compiler;
pub mod introspector;

pub use adapter::SqliteAdapter;
pub use compiler::SqliteQueryCompiler;
pub use introspector::SqliteIntrospector;
