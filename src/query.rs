use crate::types::Value;

/// A compiled SQL statement and its ordered bind parameters bundled together.
///
/// Produced upstream by a query builder's compiler; this is the only input a
/// connection accepts:
/// ```rust
/// use embedded_dialect::prelude::*;
///
/// let compiled = CompiledQuery::new(
///     "SELECT value FROM kv WHERE key = ?",
///     vec![Value::Text("a".into())],
/// );
/// # let _ = compiled;
/// ```
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    /// The SQL statement text
    pub sql: String,
    /// The parameters to be bound, in placeholder order
    pub parameters: Vec<Value>,
}

impl CompiledQuery {
    /// Create a new `CompiledQuery` with the given SQL text and parameters.
    pub fn new(sql: impl Into<String>, parameters: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            parameters,
        }
    }

    /// Create a new `CompiledQuery` with no parameters.
    pub fn new_without_params(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            parameters: Vec::new(),
        }
    }
}
