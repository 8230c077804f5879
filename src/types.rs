use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

/// Values bound as query parameters or returned in result rows.
///
/// One enum across the whole dialect, so callers never touch engine-specific
/// value types:
/// ```rust
/// use embedded_dialect::prelude::*;
///
/// let params = vec![
///     Value::Text("alice".into()),
///     Value::Int(1),
///     Value::Bool(true),
/// ];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Timestamp value
    Timestamp(NaiveDateTime),
    /// NULL value
    Null,
    /// JSON value
    Json(JsonValue),
    /// Binary data
    Blob(Vec<u8>),
}

impl Value {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let Value::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let Value::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    /// Booleans are widened to integers on the way into the engine, so an
    /// integer 0/1 reads back as a boolean here.
    #[must_use]
    pub fn as_bool(&self) -> Option<&bool> {
        if let Value::Bool(value) = self {
            return Some(value);
        } else if let Some(i) = self.as_int() {
            if *i == 1 {
                return Some(&true);
            } else if *i == 0 {
                return Some(&false);
            }
        }
        None
    }

    /// Timestamps round-trip through the engine as text, so this also parses
    /// the two formats the dialect emits.
    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        if let Value::Timestamp(value) = self {
            return Some(*value);
        } else if let Some(s) = self.as_text() {
            // Try "YYYY-MM-DD HH:MM:SS"
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                return Some(dt);
            }
            // Try "YYYY-MM-DD HH:MM:SS.SSS"
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S.%3f") {
                return Some(dt);
            }
        }
        None
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let Value::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let Value::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_json(&self) -> Option<&JsonValue> {
        if let Value::Json(value) = self {
            Some(value)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_widens_from_integer() {
        assert_eq!(Value::Int(1).as_bool(), Some(&true));
        assert_eq!(Value::Int(0).as_bool(), Some(&false));
        assert_eq!(Value::Int(2).as_bool(), None);
        assert_eq!(Value::Bool(true).as_bool(), Some(&true));
    }

    #[test]
    fn timestamp_parses_from_text() {
        let v = Value::Text("2024-01-02 03:04:05".into());
        let dt = v.as_timestamp().unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-01-02 03:04:05");

        let v = Value::Text("2024-01-02 03:04:05.678".into());
        assert!(v.as_timestamp().is_some());

        assert_eq!(Value::Text("not a date".into()).as_timestamp(), None);
    }

    #[test]
    fn null_checks() {
        assert!(Value::Null.is_null());
        assert!(!Value::Int(0).is_null());
    }
}
