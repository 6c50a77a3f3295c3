//! Terminal output for the espresso reader.
//!
//! ## Features
//!
//! - Prefixed status lines on stderr (`info`, `warn`, `error`, `success`)
//! - Banners for view headings
//! - Light and dark colour palettes selected by the reader's theme
//! - `tracing` subscriber setup driven by an environment filter
//!
//! Status lines always go to stderr so that rendered views on stdout can be piped.

use colored::*;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

pub mod palette;

pub use palette::{Palette, Scheme};

/// Write every line of `message` to stderr
pub fn log(message: &str) {
  for line in message.lines() {
    eprintln!("{line}");
  }
}

/// Coloured, fixed-width `[label]` prefix
fn format_prefix(color: Color, label: &str) -> String {
  format!("[{}]{:<pad$}", label.color(color).bold(), "", pad = 6usize.saturating_sub(label.len()))
}

fn log_with(color: Color, label: &str, message: &str) {
  let prefix = format_prefix(color, label);
  for line in message.lines() {
    log(&format!("{prefix} {line}"));
  }
}

pub fn info(message: &str) {
  log_with(Color::Blue, "info", message);
}

pub fn warn(message: &str) {
  log_with(Color::Yellow, "warn", message);
}

pub fn error(message: &str) {
  log_with(Color::Red, "error", message);
}

/// Something the user asked for has completed
pub fn success(message: &str) {
  log_with(Color::Green, "ok", message);
}

/// A line made of `length` copies of `ch`
pub fn banner_line(length: usize, ch: char) -> String {
  ch.to_string().repeat(length)
}

/// Build the lines of a banner: border, message, border
pub fn banner(message: &str, width: usize, border: char) -> Vec<String> {
  let edge = banner_line(width, border);
  let mut lines = vec![edge.clone()];
  lines.extend(message.lines().map(str::to_string));
  lines.push(edge);
  lines
}

/// Print a banner through `log_fn`, one call per line
pub fn as_banner<F>(log_fn: F, message: &str, width: Option<usize>, border: Option<char>)
where
  F: Fn(&str),
{
  for line in banner(message, width.unwrap_or(50), border.unwrap_or('=')) {
    log_fn(&line);
  }
}

/// Bold blue banner on stderr for command start-up messages
pub fn announce(message: &str) {
  as_banner(|msg| log(&msg.blue().bold().to_string()), message, Some(50), Some('-'));
}

/// Width of the attached terminal, or `fallback` when stdout is not a terminal
pub fn terminal_width(fallback: usize) -> usize {
  console::Term::stdout().size_checked().map(|(_, cols)| cols as usize).unwrap_or(fallback)
}

/// Whether stdout is attached to an interactive terminal
pub fn is_interactive() -> bool {
  console::Term::stdout().is_term()
}

/// Set the terminal window title; a no-op when stdout is not a terminal
pub fn set_title(title: &str) {
  console::Term::stdout().set_title(title);
}

/// Map `-v` occurrences to a default filter directive
pub fn default_directive(verbosity: u8) -> &'static str {
  match verbosity {
    0 => "warn",
    1 => "info",
    _ => "debug",
  }
}

/// Install the global `tracing` subscriber.
///
/// The filter comes from `env_var` when set, otherwise from the verbosity level.
/// Calling this twice is harmless; the second call leaves the first subscriber in place.
pub fn init_tracing(env_var: &str, verbosity: u8) {
  let filter = EnvFilter::try_from_env(env_var)
    .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

  let _ = tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
    .with(filter)
    .try_init();
}
