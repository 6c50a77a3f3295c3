use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{day_path, validate_date, DigestSource, INDEX_PATH};
use crate::error::FetchError;
use crate::model::{DailySummary, DayIndexEntry};

/// Documents held in memory.
///
/// Lets embedding callers and tests drive the views without I/O.
/// Every fetch is counted, successful or not.
#[derive(Default)]
pub struct MemorySource {
  index: Option<Vec<DayIndexEntry>>,
  days: HashMap<String, DailySummary>,
  fetches: AtomicUsize,
}

impl MemorySource {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_index(mut self, entries: Vec<DayIndexEntry>) -> Self {
    self.index = Some(entries);
    self
  }

  /// Add a day document, keyed by its own date
  pub fn with_day(mut self, summary: DailySummary) -> Self {
    self.days.insert(summary.date.clone(), summary);
    self
  }

  /// Number of fetches issued so far
  pub fn fetch_count(&self) -> usize {
    self.fetches.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl DigestSource for MemorySource {
  async fn fetch_index(&self) -> Result<Vec<DayIndexEntry>, FetchError> {
    self.fetches.fetch_add(1, Ordering::SeqCst);
    self.index.clone().ok_or_else(|| FetchError::NotFound { path: INDEX_PATH.to_string() })
  }

  async fn fetch_day(&self, date: &str) -> Result<DailySummary, FetchError> {
    self.fetches.fetch_add(1, Ordering::SeqCst);
    let date = validate_date(date)?;
    self.days.get(date).cloned().ok_or_else(|| FetchError::NotFound { path: day_path(date) })
  }

  fn describe(&self) -> String {
    format!("memory ({} days)", self.days.len())
  }
}
