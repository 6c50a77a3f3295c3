use anyhow::Result;
use std::io::Write;

use super::{write_lines, AppContext};
use crate::display::render_day;
use crate::view::DayView;

pub async fn handle(ctx: &AppContext, date: &str, category: Option<&str>) -> Result<()> {
  run(ctx, date, category, &mut std::io::stdout().lock()).await
}

/// Render one day; with a category, that section is the active one
pub async fn run<W: Write>(
  ctx: &AppContext,
  date: &str,
  category: Option<&str>,
  out: &mut W,
) -> Result<()> {
  let mut view = DayView::new();
  view.load_with_anchor(ctx.source.as_ref(), date, category).await;
  crema::set_title(&view.page_title());

  if let (Some(requested), Some(active)) = (category, view.active_category()) {
    if requested != active {
      crema::warn(&format!("No category named '{requested}' on {date}; showing '{active}' first"));
    }
  }

  let rendered = render_day(&view, &ctx.config, &ctx.palette(), ctx.width);
  write_lines(out, &rendered.lines)
}
