use async_trait::async_trait;
use std::sync::Arc;

use crate::config::Config;
use crate::error::FetchError;
use crate::model::{DailySummary, DayIndexEntry};

pub mod demo;
pub mod http;
pub mod local;
pub mod memory;

pub use demo::DemoSource;
pub use http::HttpSource;
pub use local::LocalSource;
pub use memory::MemorySource;

/// Location of the index document relative to the site root
pub const INDEX_PATH: &str = "data/index.json";

/// Location of a day document relative to the site root
pub fn day_path(date: &str) -> String {
  format!("data/summaries/{date}.json")
}

/// Reject dates that could escape the summaries directory once turned into a path
pub fn validate_date(date: &str) -> Result<&str, FetchError> {
  let valid = !date.is_empty()
    && date.len() <= 64
    && date.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
  if valid {
    Ok(date)
  } else {
    Err(FetchError::InvalidDate { date: date.to_string() })
  }
}

/// Where digest documents come from.
///
/// Each call is one independent read; implementations keep no per-view state.
#[async_trait]
pub trait DigestSource: Send + Sync {
  /// Read the index document
  async fn fetch_index(&self) -> Result<Vec<DayIndexEntry>, FetchError>;

  /// Read the document for one date
  async fn fetch_day(&self, date: &str) -> Result<DailySummary, FetchError>;

  /// Human-readable location, for log lines
  fn describe(&self) -> String;
}

pub fn is_http(location: &str) -> bool {
  let lower = location.trim().to_ascii_lowercase();
  lower.starts_with("http://") || lower.starts_with("https://")
}

/// Build the source named by the configuration.
///
/// URLs get the HTTP source, anything else is treated as a local site directory.
/// Demo mode wraps the result in the placeholder fallback.
pub fn create_source(config: &Config) -> Result<Arc<dyn DigestSource>, FetchError> {
  let inner: Arc<dyn DigestSource> = if is_http(&config.source) {
    Arc::new(HttpSource::new(&config.source, config.timeout())?)
  } else {
    Arc::new(LocalSource::new(&config.source))
  };

  tracing::debug!(source = %inner.describe(), demo = config.demo, "document source ready");

  if config.demo {
    Ok(Arc::new(DemoSource::new(inner)))
  } else {
    Ok(inner)
  }
}
