//! The JSON staging file — an opaque durable copy of the last fetched
//! batch.

use std::{fs, path::Path};

use plat_core::record::RawRecord;

use crate::Result;

/// Write a record batch to `path` as a pretty-printed JSON array,
/// replacing any previous staging file.
pub fn save_staging(path: impl AsRef<Path>, records: &[RawRecord]) -> Result<()> {
  let json = serde_json::to_string_pretty(records)?;
  fs::write(path, json)?;
  Ok(())
}

/// Read a record batch back from a staging file.
pub fn load_staging(path: impl AsRef<Path>) -> Result<Vec<RawRecord>> {
  let raw = fs::read_to_string(path)?;
  Ok(serde_json::from_str(&raw)?)
}
