use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use serial_test::serial;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const INDEX: &str = r#"[
  {"date":"2024-06-02","total_items":1,"categories":["Robotics"],"has_podcast":true},
  {"date":"2024-06-01","total_items":2,"categories":["AI","Robotics"],"daily_summary":"Models and machines."}
]"#;

const DAY: &str = r#"{
  "date": "2024-06-01",
  "total_items": 2,
  "categories": {
    "AI": [{"title": "Sparse attention", "title_zh": "稀疏注意力", "summary": "Faster.", "link": "https://arxiv.org/abs/1", "published": "2024-06-01T08:00:00Z"}],
    "Robotics": [{"title": "Soft grippers", "summary": "Gentle.", "link": "https://example.com/grip"}]
  },
  "category_summaries": {"Robotics": "Hands are hard."},
  "highlights": ["Attention got cheaper"],
  "has_podcast": true
}"#;

/// A local site directory plus an empty espresso directory
struct Fixture {
  site: TempDir,
  home: TempDir,
}

impl Fixture {
  fn new() -> Self {
    let site = TempDir::new().unwrap();
    let data = site.path().join("data");
    fs::create_dir_all(data.join("summaries")).unwrap();
    fs::write(data.join("index.json"), INDEX).unwrap();
    fs::write(data.join("summaries/2024-06-01.json"), DAY).unwrap();
    Self { site, home: TempDir::new().unwrap() }
  }

  fn cmd(&self) -> Command {
    let mut cmd = Command::cargo_bin("espresso").expect("binary exists");
    cmd
      .env("ESPRESSO_DIR", self.home.path())
      .env("NO_COLOR", "1")
      .env_remove("COLORFGBG")
      .env_remove("ESPRESSO_SOURCE")
      .env_remove("ESPRESSO_SITE_URL")
      .env_remove("ESPRESSO_PODCAST_URL")
      .env_remove("ESPRESSO_LOG")
      .args(["--width", "80", "--source"])
      .arg(self.site.path());
    cmd
  }

  fn home(&self) -> &Path {
    self.home.path()
  }
}

#[test]
#[serial]
fn test_index_timeline() {
  let fixture = Fixture::new();
  fixture
    .cmd()
    .arg("index")
    .assert()
    .success()
    .stdout(contains("2024-06-02  latest  1 item  ♪ podcast"))
    .stdout(contains("#AI #Robotics"))
    .stdout(contains("Models and machines."))
    .stdout(contains("No summary yet"));
}

#[test]
#[serial]
fn test_day_page() {
  let fixture = Fixture::new();
  fixture
    .cmd()
    .args(["day", "2024-06-01"])
    .assert()
    .success()
    .stdout(contains("2 items across 2 categories"))
    .stdout(contains("1. Attention got cheaper"))
    .stdout(contains("▸ AI (1)"))
    .stdout(contains("稀疏注意力").and(contains("Sparse attention")))
    .stdout(contains("Hands are hard."))
    .stdout(contains("https://pdcstcdv.1cup.cafe/2024-06-01_podcast.mp3"));
}

#[test]
#[serial]
fn test_day_with_category() {
  let fixture = Fixture::new();
  fixture
    .cmd()
    .args(["day", "2024-06-01", "--category", "Robotics"])
    .assert()
    .success()
    .stdout(contains("▸ Robotics (1)"))
    .stdout(contains("  AI (1)"));
}

#[test]
#[serial]
fn test_missing_day() {
  let fixture = Fixture::new();
  fixture
    .cmd()
    .args(["day", "2024-02-30"])
    .assert()
    .success()
    .stdout(contains("No digest found for this date."));
}

#[test]
#[serial]
fn test_outline() {
  let fixture = Fixture::new();
  fixture
    .cmd()
    .args(["outline", "2024-06-01"])
    .assert()
    .success()
    .stdout(contains("2024-06-01 · Espresso Daily Digest"))
    .stdout(contains("▸ AI (1)"))
    .stdout(contains("  Robotics (1)"));
}

#[test]
#[serial]
fn test_podcast_link() {
  let fixture = Fixture::new();
  fixture
    .cmd()
    .args(["--podcast-url", "https://audio.example.com/", "podcast", "2024-06-02"])
    .assert()
    .success()
    .stdout("https://audio.example.com/2024-06-02_podcast.mp3\n");

  fixture.cmd().args(["podcast", "../2024"]).assert().failure().stderr(contains("Invalid date"));
}

#[test]
#[serial]
fn test_failures_are_reported_as_error_lines() {
  let fixture = Fixture::new();
  fixture
    .cmd()
    .args(["podcast", "../2024"])
    .assert()
    .code(1)
    .stdout("")
    .stderr(predicate::str::starts_with("[error]").and(contains("Invalid date")));
}

#[test]
#[serial]
fn test_share_without_digest_fails() {
  let fixture = Fixture::new();
  fixture
    .cmd()
    .args(["share", "2024-02-30"])
    .assert()
    .failure()
    .stderr(contains("nothing to share"));
}

#[test]
#[serial]
fn test_theme_toggle_persists() {
  let fixture = Fixture::new();
  fixture.cmd().arg("theme").assert().success().stdout(contains("Theme: light"));
  fixture.cmd().args(["theme", "toggle"]).assert().success().stdout(contains("Theme: dark"));

  let saved = fs::read_to_string(fixture.home().join("preferences.json")).unwrap();
  assert!(saved.contains("\"dark\""));

  fixture.cmd().args(["theme", "show"]).assert().success().stdout(contains("Theme: dark"));
}

#[test]
#[serial]
fn test_ambient_dark_terminal() {
  let fixture = Fixture::new();
  fixture
    .cmd()
    .env("COLORFGBG", "15;0")
    .arg("theme")
    .assert()
    .success()
    .stdout(contains("Theme: dark"));
}

#[test]
#[serial]
fn test_browse_session() {
  let fixture = Fixture::new();
  fixture
    .cmd()
    .arg("browse")
    .write_stdin("2024-06-01\n")
    .assert()
    .success()
    .stdout(contains("Type a date to open it"))
    .stdout(contains("▸ AI (1)"));
}

#[test]
#[serial]
fn test_source_from_config_file() {
  let fixture = Fixture::new();
  let config = serde_json::json!({ "source": fixture.site.path() });
  fs::write(fixture.home().join("config.json"), config.to_string()).unwrap();

  let mut cmd = Command::cargo_bin("espresso").expect("binary exists");
  cmd
    .env("ESPRESSO_DIR", fixture.home())
    .env("NO_COLOR", "1")
    .env_remove("ESPRESSO_SOURCE")
    .args(["day", "2024-06-01"])
    .assert()
    .success()
    .stdout(contains("Soft grippers"));
}

#[test]
#[serial]
fn test_source_from_environment() {
  let fixture = Fixture::new();
  let mut cmd = Command::cargo_bin("espresso").expect("binary exists");
  cmd
    .env("ESPRESSO_DIR", fixture.home())
    .env("ESPRESSO_SOURCE", fixture.site.path())
    .env("NO_COLOR", "1")
    .arg("index")
    .assert()
    .success()
    .stdout(contains("2024-06-01"));
}

#[test]
#[serial]
fn test_demo_flag() {
  let fixture = Fixture::new();
  fixture
    .cmd()
    .args(["--demo", "day", "2024-03-03"])
    .assert()
    .success()
    .stdout(contains("Demo highlight"))
    .stderr(contains("[info]").and(contains("Demo mode")));
}
