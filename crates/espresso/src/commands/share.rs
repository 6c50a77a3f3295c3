use anyhow::{anyhow, Result};
use std::io::Write;

use super::AppContext;
use crate::share::{share, ShareOutcome, SharePayload};
use crate::view::DayView;

pub async fn handle(ctx: &AppContext, date: &str) -> Result<()> {
  run(ctx, date, &mut std::io::stdout().lock()).await
}

pub async fn run<W: Write>(ctx: &AppContext, date: &str, out: &mut W) -> Result<()> {
  let mut view = DayView::new();
  view.load(ctx.source.as_ref(), date).await;

  let payload = view
    .share_payload(&ctx.config)
    .ok_or_else(|| anyhow!("No digest found for {date}; nothing to share"))?;

  share_and_report(ctx, &payload, out)
}

/// Run the share action and tell the reader what happened
pub(crate) fn share_and_report<W: Write>(
  ctx: &AppContext,
  payload: &SharePayload,
  out: &mut W,
) -> Result<()> {
  let palette = ctx.palette();
  match share(payload, ctx.share_sheet.as_ref(), ctx.clipboard.as_ref()) {
    ShareOutcome::Shared => crema::success("Shared"),
    ShareOutcome::Copied => crema::success("Link copied to clipboard"),
    ShareOutcome::Failed => {
      writeln!(out, "{}", palette.muted("Sharing is not available here. Page link:"))?
    }
  }

  writeln!(out, "{}", palette.heading(&payload.title))?;
  writeln!(out, "{}", palette.body(&payload.text))?;
  writeln!(out, "{}", palette.accent(&payload.url))?;
  Ok(())
}
