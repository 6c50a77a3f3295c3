//! Interactive reading session.
//!
//! One loop multiplexes two event streams: lines typed by the reader and day
//! fetches settling in background tasks. Each fetch carries the ticket of the
//! navigation that issued it, and the day view drops any result whose ticket is
//! no longer current.

use anyhow::Result;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

use super::share::share_and_report;
use super::{write_lines, AppContext};
use crate::display::{render_day, render_index, render_outline, RenderedDay};
use crate::error::FetchError;
use crate::model::DailySummary;
use crate::source::validate_date;
use crate::view::{DayState, DayView, IndexView, LoadTicket};

const HELP: &str = "\
Commands:
  <date> [category]   open a day, optionally at a category
  cat <name>          jump to a category
  next, prev          move between categories
  outline             list the day's categories
  share               share the open day's page
  theme               toggle light/dark
  index               back to the timeline
  help                this message
  quit                leave";

type Settled = (LoadTicket, Result<DailySummary, FetchError>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
  Open { date: String, category: Option<String> },
  Category(String),
  Next,
  Prev,
  Outline,
  Share,
  Theme,
  Index,
  Help,
  Quit,
  Blank,
  Unknown(String),
}

impl BrowseCommand {
  pub fn parse(line: &str) -> Self {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
      Some((word, rest)) => (word, rest.trim()),
      None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
      "" => Self::Blank,
      "cat" | "c" if !rest.is_empty() => Self::Category(rest.to_string()),
      "next" | "n" => Self::Next,
      "prev" | "p" => Self::Prev,
      "outline" | "o" => Self::Outline,
      "share" | "s" => Self::Share,
      "theme" | "t" => Self::Theme,
      "index" | "i" => Self::Index,
      "help" | "h" | "?" => Self::Help,
      "quit" | "q" | "exit" => Self::Quit,
      _ if looks_like_date(word) => Self::Open {
        date: word.to_string(),
        category: (!rest.is_empty()).then(|| rest.to_string()),
      },
      _ => Self::Unknown(line.to_string()),
    }
  }
}

fn looks_like_date(word: &str) -> bool {
  word.starts_with(|c: char| c.is_ascii_digit()) && validate_date(word).is_ok()
}

struct Browser {
  index: IndexView,
  day: DayView,
  rendered: RenderedDay,
  top_line: usize,
  settled: mpsc::UnboundedSender<Settled>,
}

impl Browser {
  fn new(settled: mpsc::UnboundedSender<Settled>) -> Self {
    Self {
      index: IndexView::new(),
      day: DayView::new(),
      rendered: RenderedDay::default(),
      top_line: 0,
      settled,
    }
  }

  fn loading(&self) -> bool {
    self.day.state() == &DayState::Loading
  }

  /// Returns false when the session should end
  fn dispatch<W: Write>(&mut self, ctx: &mut AppContext, command: BrowseCommand, out: &mut W) -> Result<bool> {
    let palette = ctx.palette();
    match command {
      BrowseCommand::Blank => {}
      BrowseCommand::Open { date, category } => self.open(ctx, &date, category.as_deref(), out)?,
      BrowseCommand::Category(name) => {
        if self.day.summary().is_none() {
          writeln!(out, "{}", palette.muted("Open a day first."))?;
        } else if self.day.select_category(&name) {
          self.show_active_section(ctx, out)?;
        } else {
          writeln!(out, "{}", palette.muted(&format!("No category named '{name}'.")))?;
        }
      }
      BrowseCommand::Next => self.step(ctx, true, out)?,
      BrowseCommand::Prev => self.step(ctx, false, out)?,
      BrowseCommand::Outline => write_lines(out, &render_outline(&self.day, &palette))?,
      BrowseCommand::Share => match self.day.share_payload(&ctx.config) {
        Some(payload) => share_and_report(ctx, &payload, out)?,
        None => writeln!(out, "{}", palette.muted("Open a day first."))?,
      },
      BrowseCommand::Theme => {
        if let Err(e) = ctx.theme.toggle() {
          crema::warn(&format!("Theme changed for this session but could not be saved: {e}"));
        }
        writeln!(out, "Theme: {}", ctx.palette().emphasis(ctx.theme.scheme().as_str()))?;
        self.redraw(ctx, out)?;
      }
      BrowseCommand::Index => {
        self.day.detach();
        self.rendered = RenderedDay::default();
        self.show_index(ctx, out)?;
      }
      BrowseCommand::Help => writeln!(out, "{HELP}")?,
      BrowseCommand::Quit => return Ok(false),
      BrowseCommand::Unknown(line) => {
        writeln!(out, "{}", palette.muted(&format!("Unknown command '{line}'. Type 'help'.")))?
      }
    }
    Ok(true)
  }

  /// Navigate and fetch in the background; the result arrives through `settled`
  fn open<W: Write>(&mut self, ctx: &AppContext, date: &str, category: Option<&str>, out: &mut W) -> Result<()> {
    if !self.index.contains(date) {
      debug!(date, "opening a date the index does not list");
    }

    let ticket = self.day.navigate_with_anchor(date, category);
    self.rendered = RenderedDay::default();
    self.top_line = 0;

    let source = Arc::clone(&ctx.source);
    let settled = self.settled.clone();
    tokio::spawn(async move {
      let result = source.fetch_day(ticket.date()).await;
      // The session may have ended while the fetch was in flight
      let _ = settled.send((ticket, result));
    });

    write_lines(out, &render_day(&self.day, &ctx.config, &ctx.palette(), ctx.width).lines)
  }

  fn settle<W: Write>(&mut self, ctx: &AppContext, (ticket, result): Settled, out: &mut W) -> Result<()> {
    if self.day.complete(ticket, result) {
      self.show_day(ctx, out)?;
    }
    Ok(())
  }

  fn step<W: Write>(&mut self, ctx: &AppContext, forward: bool, out: &mut W) -> Result<()> {
    let sections = &self.rendered.sections;
    if sections.is_empty() {
      writeln!(out, "{}", ctx.palette().muted("Nothing to move through."))?;
      return Ok(());
    }

    let current = self
      .day
      .active_category()
      .and_then(|active| sections.iter().position(|section| section.category == active))
      .unwrap_or(0);
    let target = if forward { (current + 1).min(sections.len() - 1) } else { current.saturating_sub(1) };

    self.top_line = sections[target].line;
    self.day.track_scroll(self.top_line, sections);
    self.show_active_section(ctx, out)
  }

  fn show_index<W: Write>(&self, ctx: &AppContext, out: &mut W) -> Result<()> {
    crema::set_title(self.index.page_title());
    write_lines(out, &render_index(&self.index, &ctx.palette(), ctx.width))
  }

  fn show_day<W: Write>(&mut self, ctx: &AppContext, out: &mut W) -> Result<()> {
    crema::set_title(&self.day.page_title());
    self.rendered = render_day(&self.day, &ctx.config, &ctx.palette(), ctx.width);
    self.top_line = 0;
    write_lines(out, &self.rendered.lines)
  }

  fn show_active_section<W: Write>(&mut self, ctx: &AppContext, out: &mut W) -> Result<()> {
    // Re-render so the active marker moves
    self.rendered = render_day(&self.day, &ctx.config, &ctx.palette(), ctx.width);
    let Some(active) = self.day.active_category() else {
      return Ok(());
    };
    if let Some(section) = self.rendered.sections.iter().find(|section| section.category == active) {
      self.top_line = section.line;
    }
    match self.rendered.section(active) {
      Some(lines) => write_lines(out, lines),
      None => Ok(()),
    }
  }

  fn redraw<W: Write>(&mut self, ctx: &AppContext, out: &mut W) -> Result<()> {
    match self.day.state() {
      DayState::Idle => self.show_index(ctx, out),
      _ => self.show_day(ctx, out),
    }
  }
}

pub async fn handle(ctx: &mut AppContext) -> Result<()> {
  if crema::is_interactive() {
    crema::announce("Espresso browse session");
  }
  let stdin = BufReader::new(tokio::io::stdin());
  run(ctx, stdin, &mut std::io::stdout()).await
}

/// Drive a session from `input` until `quit`, or until input ends and no fetch is pending
pub async fn run<R, W>(ctx: &mut AppContext, input: R, out: &mut W) -> Result<()>
where
  R: AsyncBufRead + Unpin,
  W: Write,
{
  let (settled_tx, mut settled_rx) = mpsc::unbounded_channel::<Settled>();
  let mut browser = Browser::new(settled_tx);

  browser.index.load(ctx.source.as_ref()).await;
  browser.show_index(ctx, out)?;
  writeln!(out, "{}", ctx.palette().muted("Type a date to open it, or 'help'."))?;

  let mut lines = input.lines();
  let mut input_open = true;

  loop {
    tokio::select! {
      line = lines.next_line(), if input_open => match line? {
        Some(line) => {
          if !browser.dispatch(ctx, BrowseCommand::parse(&line), out)? {
            break;
          }
        }
        None => input_open = false,
      },
      Some(settled) = settled_rx.recv() => browser.settle(ctx, settled, out)?,
    }

    if !input_open && !browser.loading() {
      break;
    }
  }

  out.flush()?;
  Ok(())
}
