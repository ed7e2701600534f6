//! The Dimension Builder — deduplicates cleaned records into dimension
//! tables with dense surrogate keys.
//!
//! Each dimension projects the record set onto a fixed natural-key column
//! tuple and assigns surrogate ids in first-occurrence order of the
//! input. The assignment is deterministic: the same ordered input always
//! yields the same ids, which is what lets the Fact Assembler re-derive
//! foreign keys by joining on the same natural keys.

use std::collections::HashMap;

use serde_json::Value;

use crate::{canonical::key_component, record::CleanRecord};

// ─── Natural keys ────────────────────────────────────────────────────────────

/// Natural-key columns of the location dimension.
pub const LOCATION_KEY: &[&str] = &[
  "addressLine1",
  "city",
  "state",
  "zipCode",
  "formattedAddress",
  "county",
  "longitude",
  "latitude",
  "addressLine2",
];

/// Natural-key columns of the sales dimension.
pub const SALES_KEY: &[&str] = &["lastSaleDate", "lastSalePrice"];

/// Natural-key columns of the features dimension.
pub const FEATURES_KEY: &[&str] = &[
  "bedrooms",
  "bathrooms",
  "squareFootage",
  "lotSize",
  "features",
];

// ─── Table ───────────────────────────────────────────────────────────────────

/// One deduplicated dimension row: a dense surrogate id plus the
/// natural-key values in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionRow {
  pub id:  i64,
  pub key: Vec<Value>,
}

/// A deduplicated lookup table over one natural-key tuple.
///
/// Rows are kept in first-occurrence order; the internal index maps the
/// canonical key form to the surrogate id and is reused by the Fact
/// Assembler's lookups — it is never rebuilt.
#[derive(Debug, Clone)]
pub struct DimensionTable {
  name:      &'static str,
  id_column: &'static str,
  columns:   &'static [&'static str],
  rows:      Vec<DimensionRow>,
  index:     HashMap<String, i64>,
  collapsed: usize,
}

impl DimensionTable {
  fn build(
    name: &'static str,
    id_column: &'static str,
    columns: &'static [&'static str],
    records: &[CleanRecord],
  ) -> Self {
    let mut rows = Vec::new();
    let mut index: HashMap<String, i64> = HashMap::new();
    let mut collapsed = 0;

    for record in records {
      let canonical = canonical_key(columns, record);
      if index.contains_key(&canonical) {
        collapsed += 1;
      } else {
        let id = rows.len() as i64;
        index.insert(canonical, id);
        rows.push(DimensionRow {
          id,
          key: project(columns, record),
        });
      }
    }

    Self {
      name,
      id_column,
      columns,
      rows,
      index,
      collapsed,
    }
  }

  /// Table name as written to the sink.
  pub fn name(&self) -> &'static str {
    self.name
  }

  /// Surrogate-key column name.
  pub fn id_column(&self) -> &'static str {
    self.id_column
  }

  /// Natural-key column names, in row order.
  pub fn columns(&self) -> &'static [&'static str] {
    self.columns
  }

  /// Deduplicated rows in first-occurrence order.
  pub fn rows(&self) -> &[DimensionRow] {
    &self.rows
  }

  pub fn len(&self) -> usize {
    self.rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  /// Count of input records that collapsed onto an already-registered
  /// natural key. Surfaced for auditing; collapse is accepted lossy
  /// behavior, not an error.
  pub fn collapsed(&self) -> usize {
    self.collapsed
  }

  /// Resolve a record's surrogate id by its natural-key tuple.
  ///
  /// Uses the same canonical projection as the build pass, so for a
  /// record drawn from the set this table was built from the lookup
  /// always succeeds.
  pub fn lookup(&self, record: &CleanRecord) -> Option<i64> {
    self.index.get(&canonical_key(self.columns, record)).copied()
  }
}

/// The natural-key values of a record, in column order. Absent fields
/// project to null.
fn project(columns: &[&str], record: &CleanRecord) -> Vec<Value> {
  columns
    .iter()
    .map(|c| record.get(c).cloned().unwrap_or(Value::Null))
    .collect()
}

/// The canonical string form of a record's natural-key tuple. Components
/// are joined with the ASCII unit separator; `key_component` never emits
/// a raw control character, so the separator cannot occur inside a
/// component and distinct tuples always render distinctly.
fn canonical_key(columns: &[&str], record: &CleanRecord) -> String {
  columns
    .iter()
    .map(|c| {
      record
        .get(c)
        .map(key_component)
        .unwrap_or_else(|| "null".to_owned())
    })
    .collect::<Vec<_>>()
    .join("\u{1f}")
}

// ─── Builders ────────────────────────────────────────────────────────────────

/// Build the location dimension from a cleaned record set.
pub fn build_location_dimension(records: &[CleanRecord]) -> DimensionTable {
  DimensionTable::build("location_dim", "location_id", LOCATION_KEY, records)
}

/// Build the sales dimension from a cleaned record set.
pub fn build_sales_dimension(records: &[CleanRecord]) -> DimensionTable {
  DimensionTable::build("sales_dim", "sales_id", SALES_KEY, records)
}

/// Build the features dimension from a cleaned record set.
pub fn build_features_dimension(records: &[CleanRecord]) -> DimensionTable {
  DimensionTable::build("features_dim", "features_id", FEATURES_KEY, records)
}
