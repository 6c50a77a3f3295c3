use crema::*;

#[test]
fn test_basic_logging_functions() {
  info("Test info message");
  warn("Test warning message");
  error("Test error message");
  success("Test success message");
}

#[test]
fn test_multiline_messages() {
  let multiline_msg = "First line\nSecond line\nThird line";
  info(multiline_msg);
  warn(multiline_msg);
  success(multiline_msg);
}

#[test]
fn test_banner_lines() {
  assert_eq!(banner_line(5, '='), "=====");
  assert_eq!(banner_line(0, '-'), "");

  let lines = banner("2024-06-01\n12 items", 10, '-');
  assert_eq!(lines, vec!["----------", "2024-06-01", "12 items", "----------"]);
}

#[test]
fn test_as_banner_calls_log_fn_per_line() {
  let collected = std::cell::RefCell::new(Vec::new());
  as_banner(|line| collected.borrow_mut().push(line.to_string()), "hello", Some(3), None);
  assert_eq!(collected.into_inner(), vec!["===", "hello", "==="]);
}

#[test]
fn test_default_directive_levels() {
  assert_eq!(default_directive(0), "warn");
  assert_eq!(default_directive(1), "info");
  assert_eq!(default_directive(4), "debug");
}

#[test]
fn test_init_tracing_twice_is_harmless() {
  init_tracing("CREMA_TEST_LOG", 0);
  init_tracing("CREMA_TEST_LOG", 2);
}

#[test]
fn test_scheme_serializes_lowercase() {
  assert_eq!(serde_json::to_string(&Scheme::Dark).unwrap(), "\"dark\"");
  let parsed: Scheme = serde_json::from_str("\"light\"").unwrap();
  assert_eq!(parsed, Scheme::Light);
}

#[test]
fn test_terminal_width_fallback_is_positive() {
  assert!(terminal_width(80) > 0);
}

#[test]
fn test_set_title_without_terminal() {
  set_title("2024-06-01 · Espresso Daily Digest");
}
