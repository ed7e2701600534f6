//! Error type for `plat-extract`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("api returned status {0}")]
  Status(reqwest::StatusCode),

  #[error("unexpected api payload: {0}")]
  UnexpectedPayload(String),

  #[error("staging file error: {0}")]
  Io(#[from] std::io::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
