use async_trait::async_trait;

use crate::error::DialectError;
use crate::query::CompiledQuery;
use crate::results::Row;
use crate::traits::{ColumnMetadata, DatabaseIntrospector, QueryExecutor, TableMetadata};
use crate::types::Value;

// sqlite_master works on every SQLite lineage; sqlite_schema is a newer alias.
const LIST_OBJECTS_SQL: &str = "SELECT name, type FROM sqlite_master \
     WHERE type IN ('table', 'view') AND name NOT LIKE 'sqlite_%' \
     ORDER BY name";

// notnull collides with the NOTNULL operator, hence the quoting.
const LIST_COLUMNS_SQL: &str =
    "SELECT name, type, \"notnull\", dflt_value FROM pragma_table_info(?) ORDER BY cid";

/// Schema introspector for SQLite-family backends.
///
/// Reads `sqlite_master` and `pragma_table_info` through the query handle it
/// was constructed with, skipping the engine's own `sqlite_*` objects.
pub struct SqliteIntrospector<E> {
    executor: E,
}

impl<E: QueryExecutor> SqliteIntrospector<E> {
    #[must_use]
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    async fn table_columns(&self, table: &str) -> Result<Vec<ColumnMetadata>, DialectError> {
        let compiled = CompiledQuery::new(LIST_COLUMNS_SQL, vec![Value::Text(table.to_string())]);
        let result = self.executor.execute(&compiled).await?;
        result.rows.iter().map(column_from_row).collect()
    }
}

#[async_trait]
impl<E: QueryExecutor> DatabaseIntrospector for SqliteIntrospector<E> {
    async fn get_tables(&self) -> Result<Vec<TableMetadata>, DialectError> {
        let listing = self
            .executor
            .execute(&CompiledQuery::new_without_params(LIST_OBJECTS_SQL))
            .await?;

        let mut tables = Vec::with_capacity(listing.rows.len());
        for row in &listing.rows {
            let name = text_column(row, "name")?.to_string();
            let is_view = text_column(row, "type")? == "view";
            let columns = self.table_columns(&name).await?;
            tables.push(TableMetadata {
                name,
                is_view,
                columns,
            });
        }
        Ok(tables)
    }
}

fn text_column<'a>(row: &'a Row, column: &str) -> Result<&'a str, DialectError> {
    row.get(column).and_then(Value::as_text).ok_or_else(|| {
        DialectError::ExecutionError(format!("schema query returned no text '{column}' column"))
    })
}

fn column_from_row(row: &Row) -> Result<ColumnMetadata, DialectError> {
    let name = text_column(row, "name")?.to_string();
    // Untyped columns report an empty declared type.
    let data_type = row
        .get("type")
        .and_then(Value::as_text)
        .unwrap_or_default()
        .to_string();
    let notnull = row
        .get("notnull")
        .and_then(Value::as_int)
        .copied()
        .unwrap_or(0);
    let has_default = row.get("dflt_value").is_some_and(|v| !v.is_null());
    Ok(ColumnMetadata {
        name,
        data_type,
        is_nullable: notnull == 0,
        has_default,
    })
}
