//! Property record types — the loosely-typed rows flowing through the
//! pipeline.
//!
//! Records arrive from the API as JSON objects with no schema guarantee
//! beyond a unique `id`. They stay dynamically typed end to end; the
//! Cleaner upgrades a [`RawRecord`] to a [`CleanRecord`] by filling every
//! recognized field, and the dimension/fact builders work on the cleaned
//! form only.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The field carrying the upstream-assigned unique identifier.
pub const ID_FIELD: &str = "id";

// ─── RawRecord ───────────────────────────────────────────────────────────────

/// A property record exactly as fetched: a mapping from field name to
/// dynamically-typed value. No field is assumed present or non-null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(pub Map<String, Value>);

impl RawRecord {
  /// Wrap a JSON value, if it is an object.
  pub fn from_value(value: Value) -> Option<Self> {
    match value {
      Value::Object(fields) => Some(Self(fields)),
      _ => None,
    }
  }

  /// A field's value, treating JSON null the same as absent.
  pub fn get(&self, field: &str) -> Option<&Value> {
    self.0.get(field).filter(|v| !v.is_null())
  }
}

// ─── CleanRecord ─────────────────────────────────────────────────────────────

/// A record with every recognized field populated and composite values
/// flattened to canonical strings. Only produced by
/// [`clean`](crate::clean::clean).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CleanRecord(pub(crate) Map<String, Value>);

impl CleanRecord {
  /// A field's value, treating JSON null the same as absent. Recognized
  /// fields are always present after cleaning; pass-through fields may
  /// still be absent if the upstream data was defective.
  pub fn get(&self, field: &str) -> Option<&Value> {
    self.0.get(field).filter(|v| !v.is_null())
  }

  /// The upstream-assigned identifier, if present.
  pub fn id(&self) -> Option<&Value> {
    self.get(ID_FIELD)
  }

  /// The full field map.
  pub fn fields(&self) -> &Map<String, Value> {
    &self.0
  }
}
