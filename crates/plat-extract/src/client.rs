//! Async HTTP client for the property API.

use std::time::Duration;

use plat_core::record::RawRecord;
use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};

/// Connection settings for the property API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
  pub base_url: String,
  pub api_key:  String,
  pub api_host: String,
}

/// Async HTTP client for the property API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct PropertyClient {
  client: Client,
  config: ClientConfig,
}

impl PropertyClient {
  pub fn new(config: ClientConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{path}", self.config.base_url.trim_end_matches('/'))
  }

  /// `GET /randomProperties?limit=<n>` — fetch a batch of random
  /// property records.
  ///
  /// The API returns a JSON array of objects; anything else is an
  /// error. Pagination and rate limiting are out of scope.
  pub async fn fetch_random_properties(&self, limit: usize) -> Result<Vec<RawRecord>> {
    let resp = self
      .client
      .get(self.url("/randomProperties"))
      .header("x-rapidapi-key", &self.config.api_key)
      .header("x-rapidapi-host", &self.config.api_host)
      .query(&[("limit", limit.to_string())])
      .send()
      .await?;

    if !resp.status().is_success() {
      return Err(Error::Status(resp.status()));
    }

    let body: Value = resp.json().await?;
    let Value::Array(items) = body else {
      return Err(Error::UnexpectedPayload(
        "expected a JSON array of records".to_owned(),
      ));
    };

    items
      .into_iter()
      .enumerate()
      .map(|(i, item)| {
        RawRecord::from_value(item).ok_or_else(|| {
          Error::UnexpectedPayload(format!("element {i} is not an object"))
        })
      })
      .collect()
  }
}
