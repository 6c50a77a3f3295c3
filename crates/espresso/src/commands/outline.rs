use anyhow::Result;
use std::io::Write;

use super::{write_lines, AppContext};
use crate::display::{render_day, render_outline};
use crate::view::{DayState, DayView};

pub async fn handle(ctx: &AppContext, date: &str) -> Result<()> {
  run(ctx, date, &mut std::io::stdout().lock()).await
}

pub async fn run<W: Write>(ctx: &AppContext, date: &str, out: &mut W) -> Result<()> {
  let mut view = DayView::new();
  view.load(ctx.source.as_ref(), date).await;

  let palette = ctx.palette();
  if view.state() == &DayState::NotFound {
    // Same message the day page shows
    return write_lines(out, &render_day(&view, &ctx.config, &palette, ctx.width).lines);
  }

  writeln!(out, "{}", palette.heading(&view.page_title()))?;
  write_lines(out, &render_outline(&view, &palette))
}
