//! One-call façade over the Cleaner, Dimension Builder, and Fact
//! Assembler.
//!
//! Data flows strictly forward: raw records → cleaned records →
//! dimension tables → fact rows. Nothing reads back from the sink.

use crate::{
  clean::clean,
  dimension::{
    DimensionTable, build_features_dimension, build_location_dimension,
    build_sales_dimension,
  },
  error::Error,
  fact::{FactRow, build_fact_table},
  record::RawRecord,
};

/// Audit output of one transform run.
#[derive(Debug, Default)]
pub struct TransformReport {
  /// Records that collapsed onto an existing row, per dimension.
  pub collapsed_location: usize,
  pub collapsed_sales:    usize,
  pub collapsed_features: usize,
  /// Records excluded from the fact table, with the reason.
  pub defects:            Vec<Error>,
}

/// The complete star schema produced from one raw record set.
#[derive(Debug)]
pub struct StarSchema {
  pub location: DimensionTable,
  pub sales:    DimensionTable,
  pub features: DimensionTable,
  pub fact:     Vec<FactRow>,
  pub report:   TransformReport,
}

/// Dimensionalize a raw record set into a star schema.
///
/// Deterministic: the same ordered input yields bit-identical surrogate
/// assignments and fact rows.
pub fn transform(records: &[RawRecord]) -> StarSchema {
  let cleaned = clean(records);

  let location = build_location_dimension(&cleaned);
  let sales = build_sales_dimension(&cleaned);
  let features = build_features_dimension(&cleaned);

  let fact = build_fact_table(&cleaned, &sales, &location, &features);

  let report = TransformReport {
    collapsed_location: location.collapsed(),
    collapsed_sales: sales.collapsed(),
    collapsed_features: features.collapsed(),
    defects: fact.defects,
  };

  StarSchema {
    location,
    sales,
    features,
    fact: fact.rows,
    report,
  }
}

#[cfg(test)]
mod tests {
  use serde_json::{Value, json};

  use super::transform;
  use crate::record::RawRecord;

  fn raw(values: Vec<Value>) -> Vec<RawRecord> {
    values
      .into_iter()
      .map(|v| RawRecord::from_value(v).expect("object"))
      .collect()
  }

  /// Two records sharing location and sales tuples but differing in
  /// bedrooms: one location row, one sales row, two feature rows, two
  /// fact rows.
  #[test]
  fn shared_location_and_sales_with_divergent_features() {
    let records = raw(vec![
      json!({
        "id": 1,
        "bedrooms": 2,
        "bathrooms": null,
        "squareFootage": 1000,
        "lotSize": 0.2,
        "features": ["pool"],
        "addressLine1": "1 Main St",
        "city": "X",
        "state": "NY",
        "zipCode": "10001",
        "formattedAddress": "1 Main St, X, NY 10001",
        "county": null,
        "longitude": 0,
        "latitude": 0,
        "addressLine2": null,
        "lastSaleDate": "2020-01-01",
        "lastSalePrice": null
      }),
      json!({
        "id": 2,
        "bedrooms": 3,
        "bathrooms": null,
        "squareFootage": 1000,
        "lotSize": 0.2,
        "features": ["pool"],
        "addressLine1": "1 Main St",
        "city": "X",
        "state": "NY",
        "zipCode": "10001",
        "formattedAddress": "1 Main St, X, NY 10001",
        "county": null,
        "longitude": 0,
        "latitude": 0,
        "addressLine2": null,
        "lastSaleDate": "2020-01-01",
        "lastSalePrice": null
      }),
    ]);

    let schema = transform(&records);

    assert_eq!(schema.location.len(), 1);
    assert_eq!(schema.sales.len(), 1);
    assert_eq!(schema.features.len(), 2);

    assert_eq!(schema.fact.len(), 2);
    for row in &schema.fact {
      assert_eq!(row.location_id, 0);
      assert_eq!(row.sales_id, 0);
    }
    assert_eq!(schema.fact[0].features_id, 0);
    assert_eq!(schema.fact[1].features_id, 1);

    // Cleaning applied before dimensionalization: county defaulted to
    // "unknown" inside the location key.
    assert_eq!(schema.location.rows()[0].key[5], json!("unknown"));

    assert_eq!(schema.report.collapsed_location, 1);
    assert_eq!(schema.report.collapsed_sales, 1);
    assert_eq!(schema.report.collapsed_features, 0);
    assert!(schema.report.defects.is_empty());
  }

  #[test]
  fn transform_is_deterministic_across_runs() {
    let records = raw(vec![
      json!({ "id": 1, "addressLine1": "1 Main St", "city": "X",
              "lastSaleDate": "2020-01-01", "features": ["pool", "deck"] }),
      json!({ "id": 2, "addressLine1": "2 Main St", "city": "X",
              "lastSaleDate": "2021-02-02", "features": ["deck"] }),
    ]);

    let a = transform(&records);
    let b = transform(&records);

    assert_eq!(a.location.rows(), b.location.rows());
    assert_eq!(a.sales.rows(), b.sales.rows());
    assert_eq!(a.features.rows(), b.features.rows());
    assert_eq!(a.fact, b.fact);
  }

  #[test]
  fn empty_input_yields_empty_schema() {
    let schema = transform(&[]);
    assert!(schema.location.is_empty());
    assert!(schema.sales.is_empty());
    assert!(schema.features.is_empty());
    assert!(schema.fact.is_empty());
    assert!(schema.report.defects.is_empty());
  }
}
