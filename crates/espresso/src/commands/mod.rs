pub mod browse;
pub mod day;
pub mod index;
pub mod outline;
pub mod podcast;
pub mod share;
pub mod theme;

use anyhow::{Context, Result};
use crema::Palette;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::display::DEFAULT_WIDTH;
use crate::share::{Clipboard, CommandClipboard, NoShareSheet, ShareSheet};
use crate::source::{create_source, DigestSource};
use crate::theme::{FilePreferenceStore, TerminalAmbient, ThemeState};

/// Everything a command needs, built once in `main`
pub struct AppContext {
  pub config: Config,
  pub source: Arc<dyn DigestSource>,
  pub theme: ThemeState,
  pub share_sheet: Box<dyn ShareSheet>,
  pub clipboard: Box<dyn Clipboard>,
  pub width: usize,
}

impl AppContext {
  pub fn new(config: Config, source: Arc<dyn DigestSource>, theme: ThemeState, width: usize) -> Self {
    Self {
      config,
      source,
      theme,
      share_sheet: Box::new(NoShareSheet),
      clipboard: Box::new(CommandClipboard::system()),
      width,
    }
  }

  /// Wire up the configured source, the saved theme in `dir` and the terminal width
  pub fn from_config(config: Config, dir: &Path, width: Option<usize>) -> Result<Self> {
    let source = create_source(&config)
      .with_context(|| format!("Invalid document source '{}'", config.source))?;
    let theme = ThemeState::initialize(Box::new(FilePreferenceStore::new(dir)), &TerminalAmbient);
    let width = width.unwrap_or_else(|| crema::terminal_width(DEFAULT_WIDTH));
    Ok(Self::new(config, source, theme, width))
  }

  pub fn palette(&self) -> Palette {
    self.theme.palette()
  }
}

pub(crate) fn write_lines<W: Write>(out: &mut W, lines: &[String]) -> Result<()> {
  for line in lines {
    writeln!(out, "{line}")?;
  }
  Ok(())
}
