//! Error types for `plat-core`.
//!
//! Expected data gaps (a null `county`, a missing `bathrooms`) never
//! error — the Cleaner substitutes defaults for those. The variants here
//! mark internal-consistency violations: records the Fact Assembler had
//! to exclude because they cannot be joined correctly.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A record lacks a pass-through field the Fact Assembler needs.
  /// The record is excluded from the fact table; the pipeline continues.
  #[error("record at position {position} is missing required field {field:?}")]
  MissingRequiredField { position: usize, field: &'static str },

  /// A record's natural-key tuple matched no row in a dimension table.
  /// Possible only if key canonicalization drifted between the dimension
  /// build and the join; the foreign key is never silently defaulted.
  #[error("record {record_id} has no matching row in {dimension}")]
  JoinKeyMismatch {
    record_id: String,
    dimension: &'static str,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
