use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use rusqlite::types::Value as SqliteValue;

use crate::results::{Row, build_column_index};
use crate::storage::{RowCursor, SqlStorage, StorageError};
use crate::types::Value;

/// In-process storage context backed by rusqlite.
///
/// One logical connection per context, like the host runtime it stands in
/// for. The mutex serializes concurrent `exec` calls: racing callers queue
/// here instead of interleaving statements on the engine.
pub struct RusqliteStorage {
    conn: Mutex<Connection>,
}

impl RusqliteStorage {
    /// Open (or create) a database file.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(StorageError::from_engine)?;
        Ok(Self::from_connection(conn))
    }

    /// Open a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the engine cannot be initialized.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(StorageError::from_engine)?;
        Ok(Self::from_connection(conn))
    }

    /// Wrap an already-open connection.
    #[must_use]
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

/// Whole-result cursor over one executed statement.
///
/// Rows are materialized before this is handed out, so iteration cannot fail;
/// the `Result` shape comes from the boundary contract.
#[derive(Debug)]
pub struct RusqliteCursor {
    rows: std::vec::IntoIter<Row>,
    rows_written: u64,
}

impl RowCursor for RusqliteCursor {
    fn next_row(&mut self) -> Result<Option<Row>, StorageError> {
        Ok(self.rows.next())
    }

    fn rows_written(&self) -> u64 {
        self.rows_written
    }
}

impl SqlStorage for RusqliteStorage {
    type Cursor = RusqliteCursor;

    fn exec(&self, sql: &str, params: &[Value]) -> Result<RusqliteCursor, StorageError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StorageError::message("storage mutex poisoned"))?;

        // total_changes() only moves on writes, so the delta around the
        // statement is its exact write count; reads land on zero. This also
        // covers DML with RETURNING, which produces rows and writes.
        let changes_before = total_changes(&conn)?;

        let mut stmt = conn.prepare(sql).map_err(StorageError::from_engine)?;
        let column_names: Arc<Vec<String>> = Arc::new(
            stmt.column_names()
                .iter()
                .map(std::string::ToString::to_string)
                .collect(),
        );
        let column_index: Arc<HashMap<String, usize>> =
            Arc::new(build_column_index(&column_names));

        let converted: Vec<SqliteValue> = params.iter().map(to_sqlite_value).collect();
        let param_refs: Vec<&dyn rusqlite::ToSql> =
            converted.iter().map(|v| v as &dyn rusqlite::ToSql).collect();

        // Stepping through query() executes DML statements too; they simply
        // yield no rows.
        let mut rows = Vec::new();
        let mut raw_rows = stmt
            .query(&param_refs[..])
            .map_err(StorageError::from_engine)?;
        while let Some(raw) = raw_rows.next().map_err(StorageError::from_engine)? {
            let mut values = Vec::with_capacity(column_names.len());
            for idx in 0..column_names.len() {
                values.push(extract_value(raw, idx)?);
            }
            rows.push(Row::with_index(
                Arc::clone(&column_names),
                Arc::clone(&column_index),
                values,
            ));
        }
        drop(raw_rows);
        drop(stmt);

        let changes_after = total_changes(&conn)?;

        Ok(RusqliteCursor {
            rows: rows.into_iter(),
            rows_written: changes_after.saturating_sub(changes_before),
        })
    }
}

fn total_changes(conn: &Connection) -> Result<u64, StorageError> {
    let count: i64 = conn
        .query_row("SELECT total_changes()", [], |row| row.get(0))
        .map_err(StorageError::from_engine)?;
    Ok(u64::try_from(count).unwrap_or(0))
}

/// Convert a dialect `Value` into a rusqlite value.
///
/// Timestamps and JSON travel as text, booleans widen to integers; that is
/// what the SQLite type system stores anyway.
#[must_use]
pub fn to_sqlite_value(value: &Value) -> SqliteValue {
    match value {
        Value::Int(i) => SqliteValue::Integer(*i),
        Value::Float(f) => SqliteValue::Real(*f),
        Value::Text(s) => SqliteValue::Text(s.clone()),
        Value::Bool(b) => SqliteValue::Integer(i64::from(*b)),
        Value::Timestamp(dt) => SqliteValue::Text(dt.format("%F %T%.f").to_string()),
        Value::Null => SqliteValue::Null,
        Value::Json(jval) => SqliteValue::Text(jval.to_string()),
        Value::Blob(bytes) => SqliteValue::Blob(bytes.clone()),
    }
}

fn extract_value(row: &rusqlite::Row, idx: usize) -> Result<Value, StorageError> {
    let value: SqliteValue = row.get(idx).map_err(StorageError::from_engine)?;
    Ok(match value {
        SqliteValue::Null => Value::Null,
        SqliteValue::Integer(i) => Value::Int(i),
        SqliteValue::Real(f) => Value::Float(f),
        SqliteValue::Text(s) => Value::Text(s),
        SqliteValue::Blob(b) => Value::Blob(b),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn value_conversion_widens_to_sqlite_types() {
        assert_eq!(to_sqlite_value(&Value::Int(42)), SqliteValue::Integer(42));
        assert_eq!(
            to_sqlite_value(&Value::Bool(true)),
            SqliteValue::Integer(1)
        );
        assert_eq!(to_sqlite_value(&Value::Null), SqliteValue::Null);
        assert_eq!(
            to_sqlite_value(&Value::Json(json!({"a": 1}))),
            SqliteValue::Text("{\"a\":1}".to_string())
        );

        let dt = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        assert_eq!(
            to_sqlite_value(&Value::Timestamp(dt)),
            SqliteValue::Text("2024-01-02 03:04:05".to_string())
        );
    }

    #[test]
    fn write_count_tracks_only_writes() {
        let storage = RusqliteStorage::open_in_memory().unwrap();
        let cursor = storage
            .exec("CREATE TABLE t (id INTEGER PRIMARY KEY, v TEXT)", &[])
            .unwrap();
        assert_eq!(cursor.rows_written(), 0);

        let cursor = storage
            .exec(
                "INSERT INTO t (v) VALUES (?), (?)",
                &[Value::Text("a".into()), Value::Text("b".into())],
            )
            .unwrap();
        assert_eq!(cursor.rows_written(), 2);

        // A read after a write reports zero, not the stale write count.
        let mut cursor = storage.exec("SELECT v FROM t ORDER BY id", &[]).unwrap();
        assert_eq!(cursor.rows_written(), 0);
        let first = cursor.next_row().unwrap().unwrap();
        assert_eq!(first.get("v").and_then(Value::as_text), Some("a"));
    }

    #[test]
    fn returning_clause_yields_rows_and_write_count() {
        let storage = RusqliteStorage::open_in_memory().unwrap();
        storage.exec("CREATE TABLE t (v TEXT)", &[]).unwrap();
        let mut cursor = storage
            .exec(
                "INSERT INTO t (v) VALUES (?) RETURNING v",
                &[Value::Text("x".into())],
            )
            .unwrap();
        assert_eq!(cursor.rows_written(), 1);
        let row = cursor.next_row().unwrap().unwrap();
        assert_eq!(row.get("v").and_then(Value::as_text), Some("x"));
    }

    #[test]
    fn engine_errors_carry_original_diagnostics() {
        let storage = RusqliteStorage::open_in_memory().unwrap();
        let err = storage.exec("SELEC nonsense", &[]).unwrap_err();
        assert!(err.to_string().contains("syntax error"), "{err}");
    }
}
