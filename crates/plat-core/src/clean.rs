//! The Cleaner — fills missing or null fields with deterministic defaults.
//!
//! Cleaning is a pure copy-then-transform pass: the input records are
//! never mutated, so a caller holding the raw set keeps an unaliased copy.
//! Unrecognized fields pass through untouched; a record missing one of the
//! pass-through join fields (`id`, `addressLine1`, ...) is a data-quality
//! defect the Cleaner does not repair — the Fact Assembler reports it.

use serde_json::{Map, Value};

use crate::{
  canonical::canonical_string,
  record::{CleanRecord, RawRecord},
};

// ─── Defaults ────────────────────────────────────────────────────────────────

/// Default substituted for a recognized field when it is absent or null.
/// The substituted value matches the field's semantic type — numeric
/// fields get numbers, never the string `"unknown"`.
#[derive(Debug, Clone, Copy)]
enum FieldDefault {
  Number(f64),
  Integer(i64),
  Bool(bool),
  Text(&'static str),
}

impl FieldDefault {
  fn to_value(self) -> Value {
    match self {
      Self::Number(n) => Value::from(n),
      Self::Integer(i) => Value::from(i),
      Self::Bool(b) => Value::Bool(b),
      Self::Text(s) => Value::String(s.to_owned()),
    }
  }
}

/// The recognized fields and their defaults.
const DEFAULTS: &[(&str, FieldDefault)] = &[
  ("bathrooms", FieldDefault::Number(0.0)),
  ("bedrooms", FieldDefault::Number(0.0)),
  ("squareFootage", FieldDefault::Number(0.0)),
  ("lotSize", FieldDefault::Number(0.0)),
  ("taxAssessment", FieldDefault::Number(0.0)),
  ("propertyTaxes", FieldDefault::Number(0.0)),
  ("lastSalePrice", FieldDefault::Number(0.0)),
  ("yearBuilt", FieldDefault::Integer(0)),
  ("ownerOccupied", FieldDefault::Bool(false)),
  ("county", FieldDefault::Text("unknown")),
  ("propertyType", FieldDefault::Text("unknown")),
  ("assessorID", FieldDefault::Text("unknown")),
  ("legalDescription", FieldDefault::Text("unknown")),
  ("subdivision", FieldDefault::Text("unknown")),
  ("zoning", FieldDefault::Text("unknown")),
  ("owner", FieldDefault::Text("unknown")),
  ("addressLine2", FieldDefault::Text("unknown")),
  ("features", FieldDefault::Text("unknown")),
];

/// Fields whose values may arrive as nested JSON (a features list, a
/// per-year tax breakdown). They are flattened to one canonical string so
/// the dedup keys derived from them are stable.
const COMPOSITE_FIELDS: &[&str] = &["features", "taxAssessment", "propertyTaxes"];

// ─── Cleaning ────────────────────────────────────────────────────────────────

/// Clean a record set: substitute defaults for absent/null recognized
/// fields and flatten composite values. Pure — the input is untouched.
///
/// Idempotent: cleaning an already-clean set is a no-op.
pub fn clean(records: &[RawRecord]) -> Vec<CleanRecord> {
  records.iter().map(clean_record).collect()
}

fn clean_record(record: &RawRecord) -> CleanRecord {
  let mut fields: Map<String, Value> = record.0.clone();

  for (name, default) in DEFAULTS {
    let missing = matches!(fields.get(*name), None | Some(Value::Null));
    if missing {
      fields.insert((*name).to_owned(), default.to_value());
    }
  }

  for name in COMPOSITE_FIELDS {
    if let Some(value) = fields.get(*name)
      && (value.is_array() || value.is_object())
    {
      let flat = Value::String(canonical_string(value));
      fields.insert((*name).to_owned(), flat);
    }
  }

  CleanRecord(fields)
}

#[cfg(test)]
mod tests {
  use serde_json::{Value, json};

  use super::{DEFAULTS, clean};
  use crate::record::RawRecord;

  fn raw(value: Value) -> RawRecord {
    RawRecord::from_value(value).expect("object")
  }

  #[test]
  fn absent_and_null_fields_get_defaults() {
    let records = vec![raw(json!({ "id": 1, "bathrooms": null }))];
    let cleaned = clean(&records);

    assert_eq!(cleaned[0].get("bathrooms"), Some(&json!(0.0)));
    assert_eq!(cleaned[0].get("bedrooms"), Some(&json!(0.0)));
    assert_eq!(cleaned[0].get("yearBuilt"), Some(&json!(0)));
    assert_eq!(cleaned[0].get("ownerOccupied"), Some(&json!(false)));
    assert_eq!(cleaned[0].get("county"), Some(&json!("unknown")));
    assert_eq!(cleaned[0].get("addressLine2"), Some(&json!("unknown")));
  }

  #[test]
  fn every_recognized_field_is_populated_with_its_declared_type() {
    let cleaned = clean(&[raw(json!({ "id": 7 }))]);
    for (name, _) in DEFAULTS {
      let value = cleaned[0].get(name).unwrap_or_else(|| {
        panic!("field {name} absent after cleaning");
      });
      assert!(!value.is_null(), "field {name} still null");
    }
    // Spot-check semantic typing: numerics never become "unknown".
    assert!(cleaned[0].get("taxAssessment").unwrap().is_number());
    assert!(cleaned[0].get("propertyTaxes").unwrap().is_number());
    assert!(cleaned[0].get("ownerOccupied").unwrap().is_boolean());
    assert!(cleaned[0].get("yearBuilt").unwrap().is_i64());
  }

  #[test]
  fn present_values_pass_through_unmodified() {
    let records = vec![raw(json!({
      "id": 1,
      "bedrooms": 3,
      "county": "Kings",
      "addressLine1": "1 Main St",
      "unrecognizedField": "kept"
    }))];
    let cleaned = clean(&records);

    assert_eq!(cleaned[0].get("bedrooms"), Some(&json!(3)));
    assert_eq!(cleaned[0].get("county"), Some(&json!("Kings")));
    assert_eq!(cleaned[0].get("addressLine1"), Some(&json!("1 Main St")));
    assert_eq!(cleaned[0].get("unrecognizedField"), Some(&json!("kept")));
  }

  #[test]
  fn composite_fields_flatten_to_canonical_strings() {
    let records = vec![raw(json!({
      "id": 1,
      "features": ["pool", "garage"],
      "taxAssessment": { "2021": { "value": 180500 }, "2020": { "value": 175000 } }
    }))];
    let cleaned = clean(&records);

    assert_eq!(
      cleaned[0].get("features"),
      Some(&json!(r#"["pool","garage"]"#))
    );
    assert_eq!(
      cleaned[0].get("taxAssessment"),
      Some(&json!(r#"{"2020":{"value":175000},"2021":{"value":180500}}"#))
    );
  }

  #[test]
  fn cleaning_is_idempotent() {
    let records = vec![
      raw(json!({ "id": 1, "features": ["pool"], "bedrooms": null })),
      raw(json!({ "id": 2, "taxAssessment": { "2020": { "value": 1 } } })),
      raw(json!({ "id": 3 })),
    ];
    let once = clean(&records);
    let raw_again: Vec<RawRecord> =
      once.iter().map(|r| RawRecord(r.fields().clone())).collect();
    let twice = clean(&raw_again);

    assert_eq!(once, twice);
  }

  #[test]
  fn input_records_are_not_mutated() {
    let records = vec![raw(json!({ "id": 1, "bathrooms": null }))];
    let before = records.clone();
    let _ = clean(&records);
    assert_eq!(records, before);
  }
}
