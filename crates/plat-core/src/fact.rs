//! The Fact Assembler — resolves each cleaned record's surrogate foreign
//! keys against the completed dimension tables.
//!
//! Logically a left outer join on each dimension's natural-key tuple.
//! Because the dimensions are derived from the same record set, every
//! lookup succeeds unless canonicalization drifted between the two
//! passes; a miss is reported as a defect and the row is excluded — the
//! foreign key is never silently defaulted. Output follows input order.

use serde_json::Value;

use crate::{
  canonical::canonical_string,
  dimension::DimensionTable,
  error::Error,
  record::{CleanRecord, ID_FIELD},
};

/// Pass-through attribute columns carried on each fact row, in output
/// order.
pub const FACT_ATTRIBUTES: &[&str] = &[
  "yearBuilt",
  "assessorID",
  "legalDescription",
  "ownerOccupied",
  "propertyType",
  "taxAssessment",
  "propertyTaxes",
  "subdivision",
  "zoning",
];

/// One row of the property fact table.
#[derive(Debug, Clone, PartialEq)]
pub struct FactRow {
  /// Upstream identifier, carried from the raw record.
  pub id:          Value,
  pub sales_id:    i64,
  pub location_id: i64,
  pub features_id: i64,
  /// Values for [`FACT_ATTRIBUTES`], in the same order.
  pub attributes:  Vec<Value>,
}

/// The assembled fact table plus the records that had to be excluded.
#[derive(Debug)]
pub struct FactTable {
  /// One row per joinable record, in input order.
  pub rows:    Vec<FactRow>,
  /// Records excluded from the fact table, with the reason.
  pub defects: Vec<Error>,
}

/// Assemble the fact table from the cleaned records and the three
/// dimension tables built from that same set.
pub fn build_fact_table(
  records: &[CleanRecord],
  sales_dim: &DimensionTable,
  location_dim: &DimensionTable,
  features_dim: &DimensionTable,
) -> FactTable {
  let mut rows = Vec::with_capacity(records.len());
  let mut defects = Vec::new();

  for (position, record) in records.iter().enumerate() {
    let Some(id) = record.id() else {
      defects.push(Error::MissingRequiredField {
        position,
        field: ID_FIELD,
      });
      continue;
    };

    let mut resolve = |dim: &DimensionTable| match dim.lookup(record) {
      Some(surrogate) => Some(surrogate),
      None => {
        defects.push(Error::JoinKeyMismatch {
          record_id: canonical_string(id),
          dimension: dim.name(),
        });
        None
      }
    };

    let (Some(sales_id), Some(location_id), Some(features_id)) = (
      resolve(sales_dim),
      resolve(location_dim),
      resolve(features_dim),
    ) else {
      continue;
    };

    rows.push(FactRow {
      id: id.clone(),
      sales_id,
      location_id,
      features_id,
      attributes: FACT_ATTRIBUTES
        .iter()
        .map(|c| record.get(c).cloned().unwrap_or(Value::Null))
        .collect(),
    });
  }

  FactTable { rows, defects }
}

#[cfg(test)]
mod tests {
  use serde_json::{Value, json};

  use super::{FACT_ATTRIBUTES, build_fact_table};
  use crate::{
    clean::clean,
    dimension::{
      build_features_dimension, build_location_dimension, build_sales_dimension,
    },
    error::Error,
    record::{CleanRecord, RawRecord},
  };

  fn cleaned(values: Vec<Value>) -> Vec<CleanRecord> {
    let raw: Vec<RawRecord> = values
      .into_iter()
      .map(|v| RawRecord::from_value(v).expect("object"))
      .collect();
    clean(&raw)
  }

  fn property(id: u64, street: &str, price: f64) -> Value {
    json!({
      "id": id,
      "addressLine1": street,
      "city": "Troy",
      "state": "NY",
      "zipCode": "12180",
      "formattedAddress": format!("{street}, Troy, NY 12180"),
      "longitude": -73.68,
      "latitude": 42.73,
      "lastSaleDate": "2019-06-15",
      "lastSalePrice": price,
      "yearBuilt": 1910,
      "propertyType": "Single Family"
    })
  }

  #[test]
  fn every_foreign_key_references_an_existing_dimension_row() {
    let records = cleaned(vec![
      property(1, "12 First St", 210000.0),
      property(2, "14 First St", 210000.0),
      property(3, "12 First St", 210000.0),
    ]);
    let sales = build_sales_dimension(&records);
    let location = build_location_dimension(&records);
    let features = build_features_dimension(&records);

    let fact = build_fact_table(&records, &sales, &location, &features);
    assert!(fact.defects.is_empty());
    assert_eq!(fact.rows.len(), records.len());

    let sales_max = sales.len() as i64;
    let location_max = location.len() as i64;
    let features_max = features.len() as i64;
    for row in &fact.rows {
      assert!((0..sales_max).contains(&row.sales_id));
      assert!((0..location_max).contains(&row.location_id));
      assert!((0..features_max).contains(&row.features_id));
    }
  }

  #[test]
  fn rows_follow_input_order_and_carry_attributes() {
    let records = cleaned(vec![
      property(5, "1 Oak Ave", 150000.0),
      property(6, "2 Oak Ave", 160000.0),
    ]);
    let sales = build_sales_dimension(&records);
    let location = build_location_dimension(&records);
    let features = build_features_dimension(&records);

    let fact = build_fact_table(&records, &sales, &location, &features);
    let ids: Vec<&Value> = fact.rows.iter().map(|r| &r.id).collect();
    assert_eq!(ids, vec![&json!(5), &json!(6)]);

    assert_eq!(fact.rows[0].attributes.len(), FACT_ATTRIBUTES.len());
    // yearBuilt is the first attribute column.
    assert_eq!(fact.rows[0].attributes[0], json!(1910));
    // propertyType passes through.
    assert_eq!(fact.rows[0].attributes[4], json!("Single Family"));
  }

  #[test]
  fn record_without_id_is_excluded_and_reported() {
    let mut values = vec![property(1, "3 Elm St", 100000.0)];
    values.push(json!({ "addressLine1": "4 Elm St" }));
    let records = cleaned(values);

    let sales = build_sales_dimension(&records);
    let location = build_location_dimension(&records);
    let features = build_features_dimension(&records);

    let fact = build_fact_table(&records, &sales, &location, &features);
    assert_eq!(fact.rows.len(), 1);
    assert_eq!(fact.defects.len(), 1);
    assert!(matches!(
      fact.defects[0],
      Error::MissingRequiredField { position: 1, field: "id" }
    ));
  }

  #[test]
  fn join_key_mismatch_is_reported_not_defaulted() {
    let records = cleaned(vec![property(1, "3 Elm St", 100000.0)]);
    // Dimensions built from a different record set: the lookups miss.
    let other = cleaned(vec![property(2, "9 Birch Rd", 999999.0)]);
    let sales = build_sales_dimension(&other);
    let location = build_location_dimension(&records);
    let features = build_features_dimension(&records);

    let fact = build_fact_table(&records, &sales, &location, &features);
    assert!(fact.rows.is_empty());
    assert!(matches!(
      &fact.defects[0],
      Error::JoinKeyMismatch { dimension: "sales_dim", .. }
    ));
  }

  #[test]
  fn fact_row_count_matches_records_with_an_id() {
    let mut values: Vec<Value> = (0..5)
      .map(|i| property(i, "7 Pine St", 180000.0))
      .collect();
    values.push(json!({ "city": "Troy" }));
    let records = cleaned(values);

    let sales = build_sales_dimension(&records);
    let location = build_location_dimension(&records);
    let features = build_features_dimension(&records);

    let fact = build_fact_table(&records, &sales, &location, &features);
    assert_eq!(fact.rows.len(), 5);
  }
}
