//! The `WarehouseSink` trait and supporting types.
//!
//! The trait is implemented by storage backends (e.g.
//! `plat-store-sqlite`). The pipeline driver depends on this
//! abstraction, not on any concrete backend. The sink is expected to
//! enforce referential integrity on fact insertion, failing per row
//! rather than aborting the whole batch; abort thresholds are the
//! driver's policy, not the sink's.

use std::future::Future;

use crate::{dimension::DimensionTable, fact::FactRow};

/// A fact row the sink refused, with the constraint error it reported.
#[derive(Debug, Clone)]
pub struct RowFailure {
  /// Canonical form of the rejected row's `id`.
  pub record_id: String,
  pub reason:    String,
}

/// Abstraction over a star-schema warehouse backend.
///
/// Dimension tables are transient artifacts rebuilt in full on every
/// pipeline run; a load replaces, never merges. All methods return
/// `Send` futures so the trait can be used from multi-threaded async
/// runtimes.
pub trait WarehouseSink: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Clear all four tables, fact table first so no foreign-key
  /// constraint is violated mid-reset.
  fn reset(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Load the location dimension in a single transaction.
  fn load_location_dim<'a>(
    &'a self,
    dim: &'a DimensionTable,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Load the sales dimension in a single transaction.
  fn load_sales_dim<'a>(
    &'a self,
    dim: &'a DimensionTable,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Load the features dimension in a single transaction.
  fn load_features_dim<'a>(
    &'a self,
    dim: &'a DimensionTable,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Insert fact rows one at a time. Constraint violations are returned
  /// per row; the batch is not aborted and accepted rows stay inserted.
  fn load_fact<'a>(
    &'a self,
    rows: &'a [FactRow],
  ) -> impl Future<Output = Result<Vec<RowFailure>, Self::Error>> + Send + 'a;
}
