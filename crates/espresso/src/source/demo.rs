//! Placeholder documents for demos and front-end development.
//!
//! Only reachable through `--demo`: a failed fetch is otherwise reported as
//! "not found", never papered over with invented content.

use async_trait::async_trait;
use chrono::{Days, Local, NaiveDate};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

use super::DigestSource;
use crate::error::FetchError;
use crate::model::{Categories, DailySummary, DayIndexEntry, FeedItem, Highlight};

const DEMO_DAYS: u64 = 3;

/// Wraps a real source and substitutes placeholders when it fails
pub struct DemoSource {
  inner: Arc<dyn DigestSource>,
}

impl DemoSource {
  pub fn new(inner: Arc<dyn DigestSource>) -> Self {
    Self { inner }
  }
}

#[async_trait]
impl DigestSource for DemoSource {
  async fn fetch_index(&self) -> Result<Vec<DayIndexEntry>, FetchError> {
    match self.inner.fetch_index().await {
      Ok(entries) => Ok(entries),
      Err(e) => {
        warn!(error = %e, "index unavailable, serving demo placeholders");
        Ok(placeholder_index(Local::now().date_naive()))
      }
    }
  }

  async fn fetch_day(&self, date: &str) -> Result<DailySummary, FetchError> {
    match self.inner.fetch_day(date).await {
      Ok(summary) => Ok(summary),
      // Invalid dates stay invalid, demo or not
      Err(e @ FetchError::InvalidDate { .. }) => Err(e),
      Err(e) => {
        warn!(error = %e, date, "day unavailable, serving demo placeholder");
        Ok(placeholder_day(date))
      }
    }
  }

  fn describe(&self) -> String {
    format!("demo({})", self.inner.describe())
  }
}

fn demo_item(slug: &str, title: &str, title_zh: &str, summary: &str) -> FeedItem {
  FeedItem {
    title: title.to_string(),
    title_zh: Some(title_zh.to_string()),
    summary: summary.to_string(),
    summary_zh: None,
    link: format!("https://example.com/{slug}"),
    published: Some("Unknown Date".to_string()),
    ..Default::default()
  }
}

/// Index of the `DEMO_DAYS` days up to and including `today`, newest first
pub fn placeholder_index(today: NaiveDate) -> Vec<DayIndexEntry> {
  (0..DEMO_DAYS)
    .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
    .map(|day| {
      let summary = placeholder_day(&day.format("%Y-%m-%d").to_string());
      DayIndexEntry {
        date: summary.date.clone(),
        total_items: summary.total_items,
        categories: summary.categories.names().map(str::to_string).collect(),
        highlights_count: summary.highlights().len() as u32,
        daily_summary: summary.daily_summary.clone(),
        has_podcast: false,
      }
    })
    .collect()
}

pub fn placeholder_day(date: &str) -> DailySummary {
  let mut categories = Categories::new();
  categories.insert(
    "Technology",
    vec![
      demo_item("runtime", "A Faster Async Runtime", "更快的异步运行时", "Placeholder article."),
      demo_item("web", "The Future of Web Development", "Web 开发的未来", "Placeholder article."),
    ],
  );
  categories.insert(
    "AI / Machine Learning",
    vec![demo_item("nets", "New Advances in Neural Networks", "神经网络的新进展", "Placeholder paper.")],
  );
  categories.insert(
    "Open Source",
    vec![demo_item("release", "Major Framework Release", "框架重大版本发布", "Placeholder article.")],
  );

  let category_summaries: HashMap<String, String> = [
    ("Technology", "Demo synopsis for technology news."),
    ("AI / Machine Learning", "Demo synopsis for machine learning research."),
  ]
  .into_iter()
  .map(|(name, text)| (name.to_string(), text.to_string()))
  .collect();

  let total_items = categories.iter().map(|(_, items)| items.len() as u32).sum();

  DailySummary {
    date: date.to_string(),
    total_items,
    categories,
    category_summaries,
    highlights: Some(vec![
      Highlight::Text("Demo highlight: this content is a placeholder.".to_string()),
      Highlight::Text("Run without --demo to read the real digest.".to_string()),
    ]),
    daily_summary: Some("Demo mode: the digest could not be loaded, showing placeholders.".into()),
    has_podcast: false,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::source::MemorySource;

  #[test]
  fn test_placeholder_index_is_newest_first() {
    let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let dates: Vec<String> = placeholder_index(today).into_iter().map(|e| e.date).collect();
    assert_eq!(dates, vec!["2024-03-01", "2024-02-29", "2024-02-28"]);
  }

  #[test]
  fn test_placeholder_day_is_consistent() {
    let day = placeholder_day("2024-06-01");
    assert_eq!(day.total_items, 4);
    assert_eq!(day.categories.first_name(), Some("Technology"));
    assert!(day.category_summary("Open Source").is_none());
  }

  #[tokio::test]
  async fn test_falls_back_only_on_failure() {
    let real = DailySummary { date: "2024-06-01".to_string(), total_items: 1, ..Default::default() };
    let demo = DemoSource::new(Arc::new(MemorySource::new().with_day(real.clone())));

    assert_eq!(demo.fetch_day("2024-06-01").await.unwrap(), real);
    assert_eq!(demo.fetch_day("2024-06-02").await.unwrap().total_items, 4);
    assert!(!demo.fetch_index().await.unwrap().is_empty());
    assert!(demo.fetch_day("../x").await.is_err());
  }
}
