//! Deterministic stringification of dynamically-typed field values.
//!
//! The Cleaner flattens composite fields with [`canonical_string`], and
//! dimension natural keys are projected through [`key_component`] in
//! both the dedup pass and the later fact join. Each rendering exists
//! exactly once; two independent renderings drifting apart would orphan
//! fact rows.
//!
//! Composite rendering leans on `serde_json` itself: with default
//! features its `Map` is BTreeMap-backed, so `Value::to_string` already
//! emits compact JSON with object keys sorted at every level.

use serde_json::{Number, Value};

/// Render a value as a single deterministic string.
///
/// Scalars render bare: strings as themselves, numbers and booleans via
/// their display form, null as `null`. Arrays and objects render as
/// compact JSON with object keys sorted lexicographically at every
/// level, so two structurally-identical nested values always produce
/// the same string regardless of key insertion order.
pub fn canonical_string(value: &Value) -> String {
  match value {
    Value::Null => "null".to_owned(),
    Value::Bool(b) => b.to_string(),
    Value::Number(n) => n.to_string(),
    Value::String(s) => s.clone(),
    Value::Array(_) | Value::Object(_) => value.to_string(),
  }
}

/// Render one natural-key component unambiguously.
///
/// Strings keep their quoted, escaped JSON form so no control character
/// survives into the output; a bare rendering would let a separator
/// byte inside a string forge another tuple's key. Integral numbers
/// unify to one rendering: an upstream `2` and a cleaned `2.0` are the
/// same natural-key value.
pub fn key_component(value: &Value) -> String {
  match value {
    Value::Number(n) => canonical_number(n),
    other => other.to_string(),
  }
}

/// One rendering per numeric value: integral floats print without the
/// fractional part. Values outside the exact `i64` range keep their
/// native rendering.
fn canonical_number(n: &Number) -> String {
  if let Some(f) = n.as_f64()
    && f.fract() == 0.0
    && f >= i64::MIN as f64
    && f <= i64::MAX as f64
  {
    return (f as i64).to_string();
  }
  n.to_string()
}
