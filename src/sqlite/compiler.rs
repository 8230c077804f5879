use crate::traits::QueryCompiler;

/// Compilation conventions for SQLite-family backends: anonymous positional
/// `?` placeholders and double-quoted identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteQueryCompiler;

impl SqliteQueryCompiler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl QueryCompiler for SqliteQueryCompiler {
    fn placeholder(&self, _position: usize) -> String {
        // Anonymous placeholders bind strictly in order.
        "?".to_string()
    }

    fn quote_identifier(&self, identifier: &str) -> String {
        let mut quoted = String::with_capacity(identifier.len() + 2);
        quoted.push('"');
        for ch in identifier.chars() {
            if ch == '"' {
                quoted.push('"');
            }
            quoted.push(ch);
        }
        quoted.push('"');
        quoted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;

    #[test]
    fn placeholders_are_anonymous_and_positional() {
        let compiler = SqliteQueryCompiler::new();
        assert_eq!(compiler.placeholder(0), "?");
        assert_eq!(compiler.placeholder(7), "?");
    }

    #[test]
    fn identifiers_double_embedded_quotes() {
        let compiler = SqliteQueryCompiler::new();
        assert_eq!(compiler.quote_identifier("kv"), "\"kv\"");
        assert_eq!(compiler.quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn compile_keeps_sql_and_params_aligned() {
        let compiler = SqliteQueryCompiler::new();
        let compiled = compiler.compile(
            "SELECT value FROM kv WHERE key = ?",
            vec![Value::Text("a".into())],
        );
        assert_eq!(compiled.sql, "SELECT value FROM kv WHERE key = ?");
        assert_eq!(compiled.parameters.len(), 1);
    }
}
