//! Conversion from dynamically-typed record values to SQLite values.

use rusqlite::types::Value as SqlValue;
use serde_json::Value;

/// Map a JSON value onto the closest SQLite storage class.
///
/// Composite values never reach the sink under normal operation — the
/// Cleaner flattens them to strings before dimensionalization. One that
/// slips through is stored as compact JSON text.
pub fn encode_value(value: &Value) -> SqlValue {
  match value {
    Value::Null => SqlValue::Null,
    Value::Bool(b) => SqlValue::Integer(*b as i64),
    Value::Number(n) => match n.as_i64() {
      Some(i) => SqlValue::Integer(i),
      None => SqlValue::Real(n.as_f64().unwrap_or(f64::NAN)),
    },
    Value::String(s) => SqlValue::Text(s.clone()),
    Value::Array(_) | Value::Object(_) => SqlValue::Text(value.to_string()),
  }
}
