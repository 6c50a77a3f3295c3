use anyhow::{Context, Result};
use clap::ValueEnum;
use std::io::Write;

use super::AppContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ThemeAction {
  /// Print the current scheme
  #[default]
  Show,
  /// Switch between light and dark and remember the choice
  Toggle,
}

pub fn handle(ctx: &mut AppContext, action: ThemeAction) -> Result<()> {
  run(ctx, action, &mut std::io::stdout().lock())
}

pub fn run<W: Write>(ctx: &mut AppContext, action: ThemeAction, out: &mut W) -> Result<()> {
  if action == ThemeAction::Toggle {
    ctx.theme.toggle().context("Failed to save theme preference")?;
  }

  let palette = ctx.palette();
  writeln!(out, "Theme: {}", palette.emphasis(ctx.theme.scheme().as_str()))?;
  Ok(())
}
