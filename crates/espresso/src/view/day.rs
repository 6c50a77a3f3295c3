//! The day page: one date's document grouped by category.
//!
//! Every navigation hands out a [`LoadTicket`]. A fetch result is applied only
//! when it carries the ticket of the latest navigation, so a slow response for a
//! date the reader already left can never overwrite the current page.

use tracing::{debug, warn};

use super::SITE_TITLE;
use crate::config::Config;
use crate::error::FetchError;
use crate::model::DailySummary;
use crate::share::SharePayload;
use crate::source::DigestSource;

#[derive(Debug, Clone, PartialEq)]
pub enum DayState {
  /// Not pointed at any date
  Idle,
  Loading,
  Loaded(DailySummary),
  /// The fetch failed; terminal until the next navigation
  NotFound,
}

/// Identifies one fetch issued by a navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
  date: String,
  generation: u64,
}

impl LoadTicket {
  pub fn date(&self) -> &str {
    &self.date
  }

  pub fn generation(&self) -> u64 {
    self.generation
  }
}

/// Where a category's section starts in rendered output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionAnchor {
  pub category: String,
  pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
  pub category: String,
  pub items: usize,
  pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayView {
  date: Option<String>,
  generation: u64,
  state: DayState,
  anchor: Option<String>,
  active_category: Option<String>,
}

impl Default for DayView {
  fn default() -> Self {
    Self::new()
  }
}

impl DayView {
  pub fn new() -> Self {
    Self { date: None, generation: 0, state: DayState::Idle, anchor: None, active_category: None }
  }

  /// Point the view at `date`, dropping whatever it showed before
  pub fn navigate(&mut self, date: &str) -> LoadTicket {
    self.navigate_with_anchor(date, None)
  }

  /// Like [`DayView::navigate`], but the reader already asked for a category
  pub fn navigate_with_anchor(&mut self, date: &str, anchor: Option<&str>) -> LoadTicket {
    self.generation += 1;
    self.date = Some(date.to_string());
    self.state = DayState::Loading;
    self.anchor = anchor.map(str::to_string);
    self.active_category = None;
    debug!(date, generation = self.generation, "day view loading");
    LoadTicket { date: date.to_string(), generation: self.generation }
  }

  /// The view is going away; results still in flight will be dropped
  pub fn detach(&mut self) {
    self.generation += 1;
    self.date = None;
    self.state = DayState::Idle;
    self.anchor = None;
    self.active_category = None;
  }

  /// Whether a fetch carrying `ticket` may still settle this view
  pub fn is_current(&self, ticket: &LoadTicket) -> bool {
    ticket.generation == self.generation
      && self.date.as_deref() == Some(ticket.date.as_str())
      && self.state == DayState::Loading
  }

  /// Apply a settled fetch. Returns false when the result was stale and discarded.
  pub fn complete(&mut self, ticket: LoadTicket, result: Result<DailySummary, FetchError>) -> bool {
    if !self.is_current(&ticket) {
      debug!(
        date = ticket.date.as_str(),
        generation = ticket.generation,
        current = self.generation,
        "discarding stale day result"
      );
      return false;
    }

    match result {
      Ok(summary) => {
        self.active_category = self.initial_category(&summary);
        self.state = DayState::Loaded(summary);
      }
      Err(e) => {
        warn!(date = ticket.date.as_str(), error = %e, "failed to load day");
        self.active_category = None;
        self.state = DayState::NotFound;
      }
    }
    true
  }

  /// Navigate, fetch and settle in one go
  pub async fn load(&mut self, source: &dyn DigestSource, date: &str) -> &DayState {
    self.load_with_anchor(source, date, None).await
  }

  pub async fn load_with_anchor(
    &mut self,
    source: &dyn DigestSource,
    date: &str,
    anchor: Option<&str>,
  ) -> &DayState {
    let ticket = self.navigate_with_anchor(date, anchor);
    let result = source.fetch_day(ticket.date()).await;
    self.complete(ticket, result);
    &self.state
  }

  fn initial_category(&self, summary: &DailySummary) -> Option<String> {
    self
      .anchor
      .as_deref()
      .filter(|anchor| summary.categories.contains(anchor))
      .or_else(|| summary.categories.first_name())
      .map(str::to_string)
  }

  /// Emphasise a category. Unknown names, or no loaded document, change nothing.
  pub fn select_category(&mut self, category: &str) -> bool {
    let known = self.summary().is_some_and(|summary| summary.categories.contains(category));
    if known {
      self.active_category = Some(category.to_string());
    }
    known
  }

  /// Recompute the active category from the first visible line.
  ///
  /// The active section is the last one starting at or above `top_line`; above the
  /// first section, the first one.
  pub fn track_scroll(&mut self, top_line: usize, sections: &[SectionAnchor]) {
    if self.summary().is_none() {
      return;
    }
    let active = sections
      .iter()
      .take_while(|section| section.line <= top_line)
      .last()
      .or_else(|| sections.first())
      .map(|section| section.category.as_str());

    if let Some(category) = active {
      self.select_category(category);
    }
  }

  pub fn state(&self) -> &DayState {
    &self.state
  }

  pub fn date(&self) -> Option<&str> {
    self.date.as_deref()
  }

  pub fn summary(&self) -> Option<&DailySummary> {
    match &self.state {
      DayState::Loaded(summary) => Some(summary),
      _ => None,
    }
  }

  pub fn active_category(&self) -> Option<&str> {
    self.active_category.as_deref()
  }

  pub fn outline(&self) -> Vec<OutlineEntry> {
    let Some(summary) = self.summary() else {
      return Vec::new();
    };
    summary
      .categories
      .iter()
      .map(|(category, items)| OutlineEntry {
        category: category.to_string(),
        items: items.len(),
        active: self.active_category.as_deref() == Some(category),
      })
      .collect()
  }

  pub fn page_title(&self) -> String {
    match &self.date {
      Some(date) => format!("{date} · {SITE_TITLE}"),
      None => SITE_TITLE.to_string(),
    }
  }

  /// What the share action sends for the loaded day
  pub fn share_payload(&self, config: &Config) -> Option<SharePayload> {
    let summary = self.summary()?;
    let date = self.date.as_deref()?;
    let mut text = format!(
      "{} digest: {} items across {} categories",
      summary.date,
      summary.total_items,
      summary.categories.len()
    );
    if let Some(first) = summary.highlights().first() {
      text.push_str(&format!(". Top pick: {}", first.text()));
    }

    Some(SharePayload { title: self.page_title(), text, url: config.page_url(date) })
  }
}
