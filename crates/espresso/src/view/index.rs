use tracing::{debug, warn};

use super::SITE_TITLE;
use crate::error::FetchError;
use crate::model::DayIndexEntry;
use crate::source::DigestSource;

/// Tags shown per timeline row before collapsing into "+N more"
pub const MAX_TAGS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum IndexState {
  Loading,
  Loaded(Vec<DayIndexEntry>),
  /// The index could not be read; nothing to show
  Empty,
}

/// One row of the index timeline
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineRow {
  pub date: String,
  pub total_items: u32,
  pub tags: Vec<String>,
  pub hidden_tags: usize,
  pub summary: Option<String>,
  pub has_podcast: bool,
  pub is_latest: bool,
}

impl From<(usize, &DayIndexEntry)> for TimelineRow {
  fn from((position, entry): (usize, &DayIndexEntry)) -> Self {
    Self {
      date: entry.date.clone(),
      total_items: entry.total_items,
      tags: entry.categories.iter().take(MAX_TAGS).cloned().collect(),
      hidden_tags: entry.categories.len().saturating_sub(MAX_TAGS),
      summary: entry.summary().map(str::to_string),
      has_podcast: entry.has_podcast,
      is_latest: position == 0,
    }
  }
}

/// The landing page: a newest-first timeline of digest days
#[derive(Debug, Clone, PartialEq)]
pub struct IndexView {
  state: IndexState,
}

impl Default for IndexView {
  fn default() -> Self {
    Self::new()
  }
}

impl IndexView {
  pub fn new() -> Self {
    Self { state: IndexState::Loading }
  }

  /// Read the index once. Failures leave the view empty; there is no retry.
  pub async fn load(&mut self, source: &dyn DigestSource) -> &IndexState {
    self.state = IndexState::Loading;
    let result = source.fetch_index().await;
    self.apply(result);
    &self.state
  }

  /// Settle the view with the outcome of an index read
  pub fn apply(&mut self, result: Result<Vec<DayIndexEntry>, FetchError>) {
    self.state = match result {
      Ok(entries) => {
        debug!(days = entries.len(), "index loaded");
        IndexState::Loaded(entries)
      }
      Err(e) => {
        warn!(error = %e, "failed to load index");
        IndexState::Empty
      }
    };
  }

  pub fn state(&self) -> &IndexState {
    &self.state
  }

  /// Entries in producer order; empty unless loaded
  pub fn entries(&self) -> &[DayIndexEntry] {
    match &self.state {
      IndexState::Loaded(entries) => entries.as_slice(),
      _ => &[],
    }
  }

  pub fn timeline(&self) -> Vec<TimelineRow> {
    self.entries().iter().enumerate().map(TimelineRow::from).collect()
  }

  pub fn contains(&self, date: &str) -> bool {
    self.entries().iter().any(|entry| entry.date == date)
  }

  /// The index keeps the site title
  pub fn page_title(&self) -> &'static str {
    SITE_TITLE
  }
}
