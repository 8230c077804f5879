use std::collections::HashMap;
use std::sync::Arc;

use crate::types::Value;

/// A single row from a query result.
///
/// Column names are shared across all rows of one result set, along with a
/// name-to-index cache so repeated lookups avoid string comparisons.
#[derive(Debug, Clone)]
pub struct Row {
    column_names: Arc<Vec<String>>,
    column_index_cache: Arc<HashMap<String, usize>>,
    values: Vec<Value>,
}

impl Row {
    /// Create a row, building its own column-index cache.
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, values: Vec<Value>) -> Self {
        let cache = Arc::new(build_column_index(&column_names));
        Self {
            column_names,
            column_index_cache: cache,
            values,
        }
    }

    /// Create a row reusing a cache already built for this result set.
    ///
    /// Cursor implementations should prefer this over [`Row::new`] so the
    /// cache is built once per statement, not once per row.
    #[must_use]
    pub fn with_index(
        column_names: Arc<Vec<String>>,
        column_index_cache: Arc<HashMap<String, usize>>,
        values: Vec<Value>,
    ) -> Self {
        Self {
            column_names,
            column_index_cache,
            values,
        }
    }

    /// The column names for this row, in statement order.
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Get the index of a column by name.
    #[must_use]
    pub fn column_index(&self, column_name: &str) -> Option<usize> {
        if let Some(&idx) = self.column_index_cache.get(column_name) {
            return Some(idx);
        }
        // Fall back to linear search
        self.column_names.iter().position(|col| col == column_name)
    }

    /// Get a value by column name, or `None` if the column doesn't exist.
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&Value> {
        self.column_index(column_name)
            .and_then(|idx| self.values.get(idx))
    }

    /// Get a value by column index, or `None` if out of bounds.
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// All values for this row, in statement order.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// Build a column-name-to-index map for one result set.
#[must_use]
pub fn build_column_index(column_names: &[String]) -> HashMap<String, usize> {
    column_names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), i))
        .collect()
}

/// The normalized result of executing one compiled query.
///
/// `num_affected_rows` is present only when the engine reported a strictly
/// positive write count; it is widened past the engine's native counter so
/// large bulk writes cannot overflow it. `insert_id` exists for interface
/// parity with SQL hosts that report a last-inserted id; the embedded engine
/// does not, so it is always `None` here.
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    /// The rows returned by the query, in statement order
    pub rows: Vec<Row>,
    /// Rows written by the statement, when the count was positive
    pub num_affected_rows: Option<u128>,
    /// Last-inserted row id; never reported by the embedded engine
    pub insert_id: Option<u128>,
}

impl QueryResult {
    /// Result set with no rows and no write count.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the query returned zero rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First returned row, if any.
    #[must_use]
    pub fn first_row(&self) -> Option<&Row> {
        self.rows.first()
    }
}
