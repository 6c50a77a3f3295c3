use anyhow::Result;
use std::io::Write;

use super::AppContext;
use crate::source::validate_date;

pub fn handle(ctx: &AppContext, date: &str) -> Result<()> {
  run(ctx, date, &mut std::io::stdout().lock())
}

/// Print the podcast link for `date`. The audio itself is never fetched.
pub fn run<W: Write>(ctx: &AppContext, date: &str, out: &mut W) -> Result<()> {
  let date = validate_date(date)?;
  writeln!(out, "{}", ctx.config.podcast_url(date))?;
  Ok(())
}
