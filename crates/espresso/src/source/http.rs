//! Static digest documents served over HTTP(S)

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::{day_path, validate_date, DigestSource, INDEX_PATH};
use crate::error::FetchError;
use crate::model::{DailySummary, DayIndexEntry};

pub struct HttpSource {
  client: Client,
  base: Url,
}

impl HttpSource {
  /// `base` is the site root; documents are resolved under `data/`
  pub fn new(base: &str, timeout: Duration) -> Result<Self, FetchError> {
    let invalid = |message: String| FetchError::InvalidSource { location: base.to_string(), message };

    let mut normalized = base.trim().to_string();
    if !normalized.ends_with('/') {
      normalized.push('/');
    }
    let base_url = Url::parse(&normalized).map_err(|e| invalid(e.to_string()))?;

    let client = Client::builder()
      .timeout(timeout)
      .user_agent(concat!("espresso/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| invalid(e.to_string()))?;

    Ok(Self { client, base: base_url })
  }

  /// Create a source from an existing client
  pub fn with_client(client: Client, base: Url) -> Self {
    Self { client, base }
  }

  async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
    let url = self.base.join(path).map_err(|e| FetchError::InvalidSource {
      location: self.base.to_string(),
      message: e.to_string(),
    })?;
    let transport =
      |e: reqwest::Error| FetchError::Transport { path: path.to_string(), message: e.to_string() };

    debug!(%url, "fetching document");
    let response = self.client.get(url.clone()).send().await.map_err(transport)?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
      return Err(FetchError::NotFound { path: path.to_string() });
    }
    if !status.is_success() {
      warn!(%url, status = status.as_u16(), "document request was not successful");
      return Err(FetchError::Status { path: path.to_string(), status: status.as_u16() });
    }

    let body = response.text().await.map_err(transport)?;
    serde_json::from_str(&body)
      .map_err(|e| FetchError::Decode { path: path.to_string(), message: e.to_string() })
  }
}

#[async_trait]
impl DigestSource for HttpSource {
  async fn fetch_index(&self) -> Result<Vec<DayIndexEntry>, FetchError> {
    self.get_json(INDEX_PATH).await
  }

  async fn fetch_day(&self, date: &str) -> Result<DailySummary, FetchError> {
    let date = validate_date(date)?;
    self.get_json(&day_path(date)).await
  }

  fn describe(&self) -> String {
    self.base.to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_base_gets_trailing_slash() {
    let source = HttpSource::new("https://digest.example.com/site", Duration::from_secs(5)).unwrap();
    assert_eq!(source.describe(), "https://digest.example.com/site/");
    assert_eq!(
      source.base.join(INDEX_PATH).unwrap().as_str(),
      "https://digest.example.com/site/data/index.json"
    );
  }

  #[test]
  fn test_invalid_base_is_rejected() {
    let result = HttpSource::new("http://", Duration::from_secs(5));
    assert!(matches!(result, Err(FetchError::InvalidSource { .. })));
  }

  #[tokio::test]
  async fn test_invalid_date_never_hits_the_network() {
    let source = HttpSource::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
    let result = source.fetch_day("../index").await;
    assert_eq!(result.unwrap_err(), FetchError::InvalidDate { date: "../index".to_string() });
  }
}
