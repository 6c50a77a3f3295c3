//! Terminal rendering for the index and day views.
//!
//! Renderers return lines instead of printing so that the browse loop can page
//! through a day section by section. Colour comes from the theme's palette;
//! wrapping happens on plain text before colouring so ANSI codes never count
//! towards the width.

use crema::Palette;

use crate::config::Config;
use crate::model::{DailySummary, FeedItem};
use crate::view::{DayState, DayView, IndexState, IndexView, SectionAnchor, TimelineRow};

/// Narrower terminals still get this much room
pub const MIN_WIDTH: usize = 40;
pub const DEFAULT_WIDTH: usize = 80;

const ACTIVE_MARKER: &str = "▸ ";
const ITEM_INDENT: usize = 5;

pub const NO_DIGESTS: &str = "No digests available yet.";
pub const NO_SUMMARY: &str = "No summary yet";
pub const DAY_NOT_FOUND: &str = "No digest found for this date.";

/// A rendered day plus where each category section starts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDay {
  pub lines: Vec<String>,
  pub sections: Vec<SectionAnchor>,
}

impl RenderedDay {
  /// Lines of one section, up to the start of the next
  pub fn section(&self, category: &str) -> Option<&[String]> {
    let position = self.sections.iter().position(|section| section.category == category)?;
    let start = self.sections[position].line;
    let end = self.sections.get(position + 1).map_or(self.lines.len(), |next| next.line);
    self.lines.get(start..end)
  }

  /// Everything above the first section
  pub fn header(&self) -> &[String] {
    let end = self.sections.first().map_or(self.lines.len(), |section| section.line);
    &self.lines[..end]
  }
}

/// Word-wrap `text` to `width` columns, keeping blank lines between paragraphs
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
  let width = width.max(1);
  let mut lines = Vec::new();

  for paragraph in text.split('\n') {
    if paragraph.trim().is_empty() {
      lines.push(String::new());
      continue;
    }

    let mut current_line = String::new();
    let mut current_len = 0;

    for word in paragraph.split_whitespace() {
      let word_len = word.chars().count();
      if current_line.is_empty() {
        current_line = word.to_string();
        current_len = word_len;
      } else if current_len + 1 + word_len <= width {
        current_line.push(' ');
        current_line.push_str(word);
        current_len += 1 + word_len;
      } else {
        lines.push(std::mem::take(&mut current_line));
        current_line = word.to_string();
        current_len = word_len;
      }
    }

    if !current_line.is_empty() {
      lines.push(current_line);
    }
  }

  lines
}

fn push_wrapped<F>(lines: &mut Vec<String>, text: &str, indent: usize, width: usize, style: F)
where
  F: Fn(&str) -> String,
{
  let pad = " ".repeat(indent);
  for line in wrap_text(text, width.saturating_sub(indent).max(MIN_WIDTH / 2)) {
    if line.is_empty() {
      lines.push(String::new());
    } else {
      lines.push(format!("{pad}{}", style(&line)));
    }
  }
}

fn plural(count: usize, one: &str, many: &str) -> String {
  if count == 1 {
    format!("{count} {one}")
  } else {
    format!("{count} {many}")
  }
}

pub fn render_index(view: &IndexView, palette: &Palette, width: usize) -> Vec<String> {
  let width = width.max(MIN_WIDTH);
  let mut lines: Vec<String> =
    crema::banner("Daily Digest", width, '=').iter().map(|line| palette.heading(line)).collect();

  match view.state() {
    IndexState::Loading => lines.push(palette.muted("Loading…")),
    IndexState::Empty => lines.push(palette.muted(NO_DIGESTS)),
    IndexState::Loaded(_) => {
      let rows = view.timeline();
      if rows.is_empty() {
        lines.push(palette.muted(NO_DIGESTS));
      }
      for row in &rows {
        render_row(&mut lines, row, palette, width);
      }
    }
  }

  lines
}

fn render_row(lines: &mut Vec<String>, row: &TimelineRow, palette: &Palette, width: usize) {
  let mut heading = if row.is_latest {
    format!("{}  {}", palette.emphasis(&row.date), palette.accent("latest"))
  } else {
    palette.heading(&row.date)
  };
  heading.push_str(&format!("  {}", palette.muted(&plural(row.total_items as usize, "item", "items"))));
  if row.has_podcast {
    heading.push_str(&format!("  {}", palette.podcast("♪ podcast")));
  }
  lines.push(heading);

  if !row.tags.is_empty() {
    let mut tags: Vec<String> = row.tags.iter().map(|tag| palette.accent(&format!("#{tag}"))).collect();
    if row.hidden_tags > 0 {
      tags.push(palette.muted(&format!("+{} more", row.hidden_tags)));
    }
    lines.push(format!("  {}", tags.join(" ")));
  }

  match &row.summary {
    Some(summary) => push_wrapped(lines, summary, 2, width, |line| palette.body(line)),
    None => lines.push(format!("  {}", palette.muted(NO_SUMMARY))),
  }
  lines.push(String::new());
}

pub fn render_day(view: &DayView, config: &Config, palette: &Palette, width: usize) -> RenderedDay {
  let width = width.max(MIN_WIDTH);

  match view.state() {
    DayState::Idle => RenderedDay { lines: vec![palette.muted("No day selected.")], sections: Vec::new() },
    DayState::Loading => RenderedDay {
      lines: vec![palette.muted(&format!("Loading {}…", view.date().unwrap_or_default()))],
      sections: Vec::new(),
    },
    DayState::NotFound => RenderedDay {
      lines: vec![
        palette.heading(DAY_NOT_FOUND),
        palette.muted("Pick another date from the index."),
      ],
      sections: Vec::new(),
    },
    DayState::Loaded(summary) => render_summary(summary, view.active_category(), config, palette, width),
  }
}

fn render_summary(
  summary: &DailySummary,
  active: Option<&str>,
  config: &Config,
  palette: &Palette,
  width: usize,
) -> RenderedDay {
  let mut lines: Vec<String> =
    crema::banner(&summary.date, width, '=').iter().map(|line| palette.heading(line)).collect();
  let mut sections = Vec::new();

  lines.push(palette.muted(&format!(
    "{} across {}",
    plural(summary.total_items as usize, "item", "items"),
    plural(summary.categories.len(), "category", "categories")
  )));

  if summary.has_podcast {
    lines.push(format!("{} {}", palette.podcast("♪ Podcast:"), config.podcast_url(&summary.date)));
  }

  if let Some(daily) = summary.daily_summary() {
    lines.push(String::new());
    lines.push(palette.heading("Today's summary"));
    push_wrapped(&mut lines, daily, 2, width, |line| palette.body(line));
  }

  let highlights = summary.highlights();
  if !highlights.is_empty() {
    lines.push(String::new());
    lines.push(palette.heading("Highlights"));
    for (i, highlight) in highlights.iter().enumerate() {
      let number = format!("{:>3}. ", i + 1);
      let wrapped = wrap_text(highlight.text(), width.saturating_sub(number.len()));
      for (j, line) in wrapped.iter().enumerate() {
        let prefix = if j == 0 { number.clone() } else { " ".repeat(number.len()) };
        lines.push(format!("{prefix}{}", palette.body(line)));
      }
    }
  }

  for (category, items) in summary.categories.iter() {
    lines.push(String::new());
    sections.push(SectionAnchor { category: category.to_string(), line: lines.len() });

    let count = palette.muted(&format!("({})", items.len()));
    if active == Some(category) {
      lines.push(format!("{} {count}", palette.emphasis(&format!("{ACTIVE_MARKER}{category}"))));
    } else {
      lines.push(format!("  {} {count}", palette.heading(category)));
    }

    if let Some(synopsis) = summary.category_summary(category) {
      push_wrapped(&mut lines, synopsis, 2, width, |line| palette.synopsis(line));
    }

    for (i, item) in items.iter().enumerate() {
      render_item(&mut lines, i + 1, item, palette, width);
    }
  }

  RenderedDay { lines, sections }
}

fn render_item(lines: &mut Vec<String>, number: usize, item: &FeedItem, palette: &Palette, width: usize) {
  lines.push(String::new());
  let prefix = format!("{number:>3}. ");
  let title = wrap_text(item.display_title(), width.saturating_sub(ITEM_INDENT));
  for (j, line) in title.iter().enumerate() {
    let lead = if j == 0 { prefix.clone() } else { " ".repeat(ITEM_INDENT) };
    lines.push(format!("{lead}{}", palette.heading(line)));
  }

  if let Some(secondary) = item.secondary_title() {
    push_wrapped(lines, secondary, ITEM_INDENT, width, |line| palette.muted(line));
  }

  let summary = item.display_summary();
  if !summary.trim().is_empty() {
    push_wrapped(lines, summary, ITEM_INDENT, width, |line| palette.body(line));
  }

  let mut meta = item.published_display();
  if !item.authors().is_empty() {
    meta.push_str(&format!(" · {}", item.authors().join(", ")));
  }
  push_wrapped(lines, &meta, ITEM_INDENT, width, |line| palette.muted(line));

  if !item.tags().is_empty() {
    let tags: Vec<String> = item.tags().iter().map(|tag| format!("#{tag}")).collect();
    push_wrapped(lines, &tags.join(" "), ITEM_INDENT, width, |line| palette.accent(line));
  }

  let pad = " ".repeat(ITEM_INDENT);
  if !item.link.is_empty() {
    lines.push(format!("{pad}{}", palette.accent(&item.link)));
  }
  if let Some(pdf) = item.pdf_link.as_deref().filter(|pdf| !pdf.is_empty()) {
    lines.push(format!("{pad}{} {}", palette.muted("PDF:"), palette.accent(pdf)));
  }
}

pub fn render_outline(view: &DayView, palette: &Palette) -> Vec<String> {
  let outline = view.outline();
  if outline.is_empty() {
    return vec![palette.muted("No categories.")];
  }

  outline
    .iter()
    .map(|entry| {
      let count = palette.muted(&format!("({})", entry.items));
      if entry.active {
        format!("{} {count}", palette.emphasis(&format!("{ACTIVE_MARKER}{}", entry.category)))
      } else {
        format!("  {} {count}", palette.body(&entry.category))
      }
    })
    .collect()
}
