//! [`SqliteSink`] — the SQLite implementation of [`WarehouseSink`].

use std::path::Path;

use plat_core::{
  canonical::canonical_string,
  dimension::DimensionTable,
  fact::{FACT_ATTRIBUTES, FactRow},
  sink::{RowFailure, WarehouseSink},
};
use rusqlite::types::Value as SqlValue;

use crate::{Result, encode::encode_value, schema::SCHEMA};

// ─── Sink ────────────────────────────────────────────────────────────────────

/// A plat warehouse backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteSink {
  conn: tokio_rusqlite::Connection,
}

impl SqliteSink {
  /// Open (or create) a warehouse at `path` and run schema
  /// initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let sink = Self { conn };
    sink.init_schema().await?;
    Ok(sink)
  }

  /// Open an in-memory warehouse — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let sink = Self { conn };
    sink.init_schema().await?;
    Ok(sink)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert every row of a dimension table inside one transaction.
  async fn load_dimension(&self, dim: &DimensionTable) -> Result<()> {
    let width = dim.columns().len() + 1;
    let placeholders = (1..=width)
      .map(|i| format!("?{i}"))
      .collect::<Vec<_>>()
      .join(", ");
    let sql = format!(
      "INSERT INTO {} ({}, {}) VALUES ({})",
      dim.name(),
      dim.id_column(),
      dim.columns().join(", "),
      placeholders,
    );

    let rows: Vec<Vec<SqlValue>> = dim
      .rows()
      .iter()
      .map(|row| {
        let mut params = Vec::with_capacity(width);
        params.push(SqlValue::Integer(row.id));
        params.extend(row.key.iter().map(encode_value));
        params
      })
      .collect();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare(&sql)?;
          for params in &rows {
            stmt.execute(rusqlite::params_from_iter(params.iter()))?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert fact rows one at a time, capturing each rejection.
  async fn insert_fact_rows(&self, rows: &[FactRow]) -> Result<Vec<RowFailure>> {
    let width = 4 + FACT_ATTRIBUTES.len();
    let placeholders = (1..=width)
      .map(|i| format!("?{i}"))
      .collect::<Vec<_>>()
      .join(", ");
    let sql = format!(
      "INSERT INTO property_fact (id, sales_id, location_id, features_id, {}) VALUES ({})",
      FACT_ATTRIBUTES.join(", "),
      placeholders,
    );

    let prepared: Vec<(String, Vec<SqlValue>)> = rows
      .iter()
      .map(|row| {
        let record_id = canonical_string(&row.id);
        let mut params = Vec::with_capacity(width);
        params.push(encode_value(&row.id));
        params.push(SqlValue::Integer(row.sales_id));
        params.push(SqlValue::Integer(row.location_id));
        params.push(SqlValue::Integer(row.features_id));
        params.extend(row.attributes.iter().map(encode_value));
        (record_id, params)
      })
      .collect();

    let failures = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let mut failures = Vec::new();
        for (record_id, params) in &prepared {
          if let Err(e) = stmt.execute(rusqlite::params_from_iter(params.iter())) {
            failures.push(RowFailure {
              record_id: record_id.clone(),
              reason:    e.to_string(),
            });
          }
        }
        Ok(failures)
      })
      .await?;
    Ok(failures)
  }

  async fn clear_all(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(
          "DELETE FROM property_fact;
           DELETE FROM location_dim;
           DELETE FROM sales_dim;
           DELETE FROM features_dim;",
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

#[cfg(test)]
impl SqliteSink {
  pub(crate) async fn count(&self, table: &'static str) -> Result<i64> {
    let n = self
      .conn
      .call(move |conn| {
        let n: i64 = conn.query_row(
          &format!("SELECT COUNT(*) FROM {table}"),
          [],
          |r| r.get(0),
        )?;
        Ok(n)
      })
      .await?;
    Ok(n)
  }
}

// ─── WarehouseSink impl ──────────────────────────────────────────────────────

impl WarehouseSink for SqliteSink {
  type Error = crate::Error;

  async fn reset(&self) -> Result<()> {
    self.clear_all().await
  }

  async fn load_location_dim(&self, dim: &DimensionTable) -> Result<()> {
    self.load_dimension(dim).await
  }

  async fn load_sales_dim(&self, dim: &DimensionTable) -> Result<()> {
    self.load_dimension(dim).await
  }

  async fn load_features_dim(&self, dim: &DimensionTable) -> Result<()> {
    self.load_dimension(dim).await
  }

  async fn load_fact(&self, rows: &[FactRow]) -> Result<Vec<RowFailure>> {
    self.insert_fact_rows(rows).await
  }
}
