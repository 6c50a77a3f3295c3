use anyhow::Result;
use std::io::Write;

use super::{write_lines, AppContext};
use crate::display::render_index;
use crate::view::IndexView;

pub async fn handle(ctx: &AppContext) -> Result<()> {
  run(ctx, &mut std::io::stdout().lock()).await
}

pub async fn run<W: Write>(ctx: &AppContext, out: &mut W) -> Result<()> {
  let mut view = IndexView::new();
  view.load(ctx.source.as_ref()).await;
  crema::set_title(view.page_title());

  write_lines(out, &render_index(&view, &ctx.palette(), ctx.width))
}
