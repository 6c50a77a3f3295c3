//! Digest documents read from a local copy of the static site

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{day_path, validate_date, DigestSource, INDEX_PATH};
use crate::error::FetchError;
use crate::model::{DailySummary, DayIndexEntry};

pub struct LocalSource {
  root: PathBuf,
}

impl LocalSource {
  /// `root` mirrors the site layout, i.e. contains `data/index.json`
  pub fn new(root: impl AsRef<Path>) -> Self {
    Self { root: root.as_ref().to_path_buf() }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  async fn read_json<T: DeserializeOwned>(&self, relative: &str) -> Result<T, FetchError> {
    let path = self.root.join(relative);
    debug!(path = %path.display(), "reading document");

    let content = tokio::fs::read_to_string(&path).await.map_err(|e| match e.kind() {
      ErrorKind::NotFound => FetchError::NotFound { path: relative.to_string() },
      _ => FetchError::Transport { path: relative.to_string(), message: e.to_string() },
    })?;

    serde_json::from_str(&content)
      .map_err(|e| FetchError::Decode { path: relative.to_string(), message: e.to_string() })
  }
}

#[async_trait]
impl DigestSource for LocalSource {
  async fn fetch_index(&self) -> Result<Vec<DayIndexEntry>, FetchError> {
    self.read_json(INDEX_PATH).await
  }

  async fn fetch_day(&self, date: &str) -> Result<DailySummary, FetchError> {
    let date = validate_date(date)?;
    self.read_json(&day_path(date)).await
  }

  fn describe(&self) -> String {
    self.root.display().to_string()
  }
}
