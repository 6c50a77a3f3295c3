use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt::Display;

/// Shown in place of a publication time the feed never provided
pub const PUBLISHED_UNAVAILABLE: &str = "Publication time unavailable";

/// Placeholders the pipeline writes when a feed entry has no date
const UNAVAILABLE_SENTINELS: &[&str] = &["Unknown Date", "发布时间未提供", PUBLISHED_UNAVAILABLE];

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S %z"];

/// Timestamps without an offset are read in the viewer's zone
const NAIVE_FORMATS: &[&str] = &[
  "%Y-%m-%dT%H:%M:%S",
  "%Y-%m-%dT%H:%M:%S%.f",
  "%Y-%m-%d %H:%M:%S",
  "%Y-%m-%d %H:%M:%S%.f",
  "%Y-%m-%dT%H:%M",
  "%Y-%m-%d %H:%M",
  "%Y/%m/%d %H:%M:%S",
];

/// Format a feed timestamp as `YYYY-MM-DD HH:mm:ss` in the local time zone.
///
/// Missing timestamps and known placeholders become [`PUBLISHED_UNAVAILABLE`];
/// anything unparseable is returned unchanged.
pub fn format_published_date(raw: &str) -> String {
  format_published_date_in(raw, &Local)
}

/// [`format_published_date`] for an explicit time zone
pub fn format_published_date_in<Tz>(raw: &str, tz: &Tz) -> String
where
  Tz: TimeZone,
  Tz::Offset: Display,
{
  let trimmed = raw.trim();
  if trimmed.is_empty() || UNAVAILABLE_SENTINELS.contains(&trimmed) {
    return PUBLISHED_UNAVAILABLE.to_string();
  }

  match parse_timestamp(trimmed, tz) {
    Some(instant) => instant.with_timezone(tz).format(DISPLAY_FORMAT).to_string(),
    None => raw.to_string(),
  }
}

fn parse_timestamp<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Utc>> {
  if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
    return Some(parsed.with_timezone(&Utc));
  }
  if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
    return Some(parsed.with_timezone(&Utc));
  }
  for format in OFFSET_FORMATS {
    if let Ok(parsed) = DateTime::parse_from_str(raw, format) {
      return Some(parsed.with_timezone(&Utc));
    }
  }
  for format in NAIVE_FORMATS {
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
      // None inside a DST gap; the caller then keeps the raw string
      return tz.from_local_datetime(&naive).earliest().map(|local| local.with_timezone(&Utc));
    }
  }

  // A bare calendar date is midnight UTC
  NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    .ok()
    .and_then(|date| date.and_hms_opt(0, 0, 0))
    .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::FixedOffset;

  fn utc(raw: &str) -> String {
    format_published_date_in(raw, &Utc)
  }

  #[test]
  fn test_unavailable_inputs() {
    assert_eq!(utc(""), PUBLISHED_UNAVAILABLE);
    assert_eq!(utc("   "), PUBLISHED_UNAVAILABLE);
    assert_eq!(utc("Unknown Date"), PUBLISHED_UNAVAILABLE);
    assert_eq!(utc("发布时间未提供"), PUBLISHED_UNAVAILABLE);
    assert_eq!(format_published_date(""), format_published_date("Unknown Date"));
  }

  #[test]
  fn test_unparseable_input_is_returned_unchanged() {
    assert_eq!(utc("not-a-date"), "not-a-date");
    assert_eq!(format_published_date("not-a-date"), "not-a-date");
    assert_eq!(utc("2024-13-45"), "2024-13-45");
  }

  #[test]
  fn test_rfc3339_in_utc_and_offset_zones() {
    assert_eq!(utc("2024-01-05T03:04:05Z"), "2024-01-05 03:04:05");

    let shanghai = FixedOffset::east_opt(8 * 3600).unwrap();
    assert_eq!(format_published_date_in("2024-01-05T03:04:05Z", &shanghai), "2024-01-05 11:04:05");

    let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
    assert_eq!(format_published_date_in("2024-01-05T03:04:05Z", &new_york), "2024-01-04 22:04:05");
  }

  #[test]
  fn test_rss_pub_date() {
    assert_eq!(utc("Fri, 05 Jan 2024 03:04:05 +0000"), "2024-01-05 03:04:05");
    assert_eq!(utc("Fri, 05 Jan 2024 11:04:05 +0800"), "2024-01-05 03:04:05");
  }

  #[test]
  fn test_naive_timestamps_use_target_zone() {
    let shanghai = FixedOffset::east_opt(8 * 3600).unwrap();
    assert_eq!(format_published_date_in("2024-01-05T03:04:05", &shanghai), "2024-01-05 03:04:05");
    assert_eq!(utc("2024-01-05 03:04:05.250"), "2024-01-05 03:04:05");
  }

  #[test]
  fn test_bare_date_is_utc_midnight() {
    assert_eq!(utc("2024-06-01"), "2024-06-01 00:00:00");
    let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
    assert_eq!(format_published_date_in("2024-06-01", &tokyo), "2024-06-01 09:00:00");
  }

  #[test]
  fn test_formatting_is_idempotent() {
    let shanghai = FixedOffset::east_opt(8 * 3600).unwrap();
    for raw in ["2024-01-05T03:04:05Z", "not-a-date", "", "Fri, 05 Jan 2024 03:04:05 GMT"] {
      let once = format_published_date_in(raw, &shanghai);
      let twice = format_published_date_in(&once, &shanghai);
      assert_eq!(once, twice, "formatting {raw:?} twice changed the result");
    }
  }
}
