//! Digest documents as published by the generation pipeline.
//!
//! Everything here is a read-only projection of fetched JSON. Fields the pipeline
//! has been known to omit carry serde defaults so that a sparse document still loads.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

use crate::dates::format_published_date;

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
  value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Header for one day in the index document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DayIndexEntry {
  pub date: String,
  #[serde(default)]
  pub total_items: u32,
  #[serde(default)]
  pub categories: Vec<String>,
  #[serde(default)]
  pub highlights_count: u32,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub daily_summary: Option<String>,
  #[serde(default)]
  pub has_podcast: bool,
}

impl DayIndexEntry {
  /// The day's synopsis, if the pipeline wrote a non-empty one
  pub fn summary(&self) -> Option<&str> {
    non_empty(&self.daily_summary)
  }
}

/// One article or paper
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeedItem {
  #[serde(default, deserialize_with = "string_or_null")]
  pub title: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title_zh: Option<String>,
  #[serde(default, deserialize_with = "string_or_null")]
  pub summary: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub summary_zh: Option<String>,
  #[serde(default, deserialize_with = "string_or_null")]
  pub link: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pdf_link: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub published: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub authors: Option<Vec<String>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub categories: Option<Vec<String>>,
}

impl FeedItem {
  /// Translated title when present, otherwise the original
  pub fn display_title(&self) -> &str {
    non_empty(&self.title_zh).unwrap_or(self.title.as_str())
  }

  /// Original title, shown underneath only when a different translation is displayed
  pub fn secondary_title(&self) -> Option<&str> {
    let translated = non_empty(&self.title_zh)?;
    let original = self.title.trim();
    if original.is_empty() || original == translated.trim() {
      None
    } else {
      Some(self.title.as_str())
    }
  }

  /// Translated summary when present, otherwise the original
  pub fn display_summary(&self) -> &str {
    non_empty(&self.summary_zh).unwrap_or(self.summary.as_str())
  }

  pub fn published_display(&self) -> String {
    format_published_date(self.published.as_deref().unwrap_or(""))
  }

  pub fn authors(&self) -> &[String] {
    self.authors.as_deref().unwrap_or(&[])
  }

  pub fn tags(&self) -> &[String] {
    self.categories.as_deref().unwrap_or(&[])
  }
}

/// A highlight callout.
///
/// Producers have written highlights both as plain strings and as whole items;
/// either way the text is rendered as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Highlight {
  Text(String),
  Item(FeedItem),
}

impl Highlight {
  pub fn text(&self) -> &str {
    match self {
      Highlight::Text(text) => text.as_str(),
      Highlight::Item(item) => item.display_title(),
    }
  }
}

/// Category name to items, in document order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Categories(Vec<(String, Vec<FeedItem>)>);

impl Categories {
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert or replace a category; a replaced category keeps its original position
  pub fn insert(&mut self, name: impl Into<String>, items: Vec<FeedItem>) {
    let name = name.into();
    match self.0.iter_mut().find(|(existing, _)| *existing == name) {
      Some((_, slot)) => *slot = items,
      None => self.0.push((name, items)),
    }
  }

  pub fn get(&self, name: &str) -> Option<&[FeedItem]> {
    self.0.iter().find(|(existing, _)| existing == name).map(|(_, items)| items.as_slice())
  }

  pub fn contains(&self, name: &str) -> bool {
    self.get(name).is_some()
  }

  pub fn first_name(&self) -> Option<&str> {
    self.0.first().map(|(name, _)| name.as_str())
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.0.iter().map(|(name, _)| name.as_str())
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &[FeedItem])> {
    self.0.iter().map(|(name, items)| (name.as_str(), items.as_slice()))
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl FromIterator<(String, Vec<FeedItem>)> for Categories {
  fn from_iter<I: IntoIterator<Item = (String, Vec<FeedItem>)>>(iter: I) -> Self {
    let mut categories = Categories::new();
    for (name, items) in iter {
      categories.insert(name, items);
    }
    categories
  }
}

impl Serialize for Categories {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.0.len()))?;
    for (name, items) in &self.0 {
      map.serialize_entry(name, items)?;
    }
    map.end()
  }
}

struct CategoriesVisitor;

impl<'de> Visitor<'de> for CategoriesVisitor {
  type Value = Categories;

  fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str("a map of category names to item lists")
  }

  fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
    let mut categories = Categories::new();
    while let Some((name, items)) = access.next_entry::<String, Option<Vec<FeedItem>>>()? {
      categories.insert(name, items.unwrap_or_default());
    }
    Ok(categories)
  }

  fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
    Ok(Categories::new())
  }
}

impl<'de> Deserialize<'de> for Categories {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    deserializer.deserialize_any(CategoriesVisitor)
  }
}

/// The full document for one date
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailySummary {
  pub date: String,
  #[serde(default)]
  pub total_items: u32,
  #[serde(default)]
  pub categories: Categories,
  #[serde(default)]
  pub category_summaries: HashMap<String, String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub highlights: Option<Vec<Highlight>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub daily_summary: Option<String>,
  #[serde(default)]
  pub has_podcast: bool,
}

impl DailySummary {
  /// Synopsis for a category; missing and blank synopses both mean "none"
  pub fn category_summary(&self, category: &str) -> Option<&str> {
    self.category_summaries.get(category).map(String::as_str).filter(|s| !s.trim().is_empty())
  }

  pub fn highlights(&self) -> &[Highlight] {
    self.highlights.as_deref().unwrap_or(&[])
  }

  pub fn daily_summary(&self) -> Option<&str> {
    non_empty(&self.daily_summary)
  }
}
