//! Reader configuration
//!
//! Loaded from `config.json` in the espresso directory, then overridden by
//! command-line flags (which also pick up `ESPRESSO_*` environment variables).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{EspressoError, Result};

pub const DEFAULT_SOURCE: &str = "http://localhost:5173";
pub const DEFAULT_PODCAST_BASE_URL: &str = "https://pdcstcdv.1cup.cafe";
pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
  /// Site root serving `data/`: an http(s) URL or a local directory
  #[serde(default = "default_source")]
  pub source: String,
  /// Public site URL used in share links; the source when unset
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub site_url: Option<String>,
  #[serde(default = "default_podcast_base_url")]
  pub podcast_base_url: String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
  /// Substitute placeholder documents when a fetch fails
  #[serde(default)]
  pub demo: bool,
}

fn default_source() -> String {
  DEFAULT_SOURCE.to_string()
}

fn default_podcast_base_url() -> String {
  DEFAULT_PODCAST_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
  30
}

impl Default for Config {
  fn default() -> Self {
    Self {
      source: default_source(),
      site_url: None,
      podcast_base_url: default_podcast_base_url(),
      timeout_secs: default_timeout_secs(),
      demo: false,
    }
  }
}

/// Values supplied on the command line; `None` keeps the configured value
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
  pub source: Option<String>,
  pub site_url: Option<String>,
  pub podcast_base_url: Option<String>,
  pub timeout_secs: Option<u64>,
  pub demo: bool,
}

impl Config {
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
  }

  /// Load `config.json` from `dir`, or the defaults when there is none
  pub fn load_from_dir(dir: &Path) -> Result<Self> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() {
      tracing::debug!(path = %path.display(), "loading configuration");
      Self::load_from_file(path)
    } else {
      Ok(Config::default())
    }
  }

  pub fn load() -> Result<Self> {
    Self::load_from_dir(&espresso_dir()?)
  }

  pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
    let content = serde_json::to_string_pretty(self)?;
    std::fs::write(path, content)?;
    Ok(())
  }

  pub fn apply(&mut self, overrides: ConfigOverrides) -> Result<()> {
    if let Some(source) = overrides.source {
      self.source = source;
    }
    if let Some(site_url) = overrides.site_url {
      self.site_url = Some(site_url);
    }
    if let Some(podcast_base_url) = overrides.podcast_base_url {
      self.podcast_base_url = podcast_base_url;
    }
    if let Some(timeout_secs) = overrides.timeout_secs {
      self.timeout_secs = timeout_secs;
    }
    self.demo |= overrides.demo;
    self.validate()
  }

  fn validate(&self) -> Result<()> {
    if self.source.trim().is_empty() {
      return Err(EspressoError::Config { message: "source must not be empty".to_string() });
    }
    if self.timeout_secs == 0 {
      return Err(EspressoError::Config {
        message: "timeout_secs must be greater than zero".to_string(),
      });
    }
    Ok(())
  }

  pub fn site_url(&self) -> &str {
    self.site_url.as_deref().unwrap_or(self.source.as_str()).trim_end_matches('/')
  }

  /// Link to a day's page on the published site
  pub fn page_url(&self, date: &str) -> String {
    format!("{}/day/{}", self.site_url(), date)
  }

  /// Podcast audio for a day; referenced only, never fetched
  pub fn podcast_url(&self, date: &str) -> String {
    format!("{}/{}_podcast.mp3", self.podcast_base_url.trim_end_matches('/'), date)
  }

  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_secs)
  }
}

/// Directory holding `config.json` and `preferences.json`.
///
/// `ESPRESSO_DIR` wins; otherwise the platform config directory.
pub fn espresso_dir() -> Result<PathBuf> {
  if let Ok(dir) = std::env::var("ESPRESSO_DIR") {
    return Ok(PathBuf::from(dir));
  }
  dirs::config_dir()
    .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
    .map(|base| base.join("espresso"))
    .ok_or_else(|| EspressoError::Config {
      message: "could not determine a configuration directory; set ESPRESSO_DIR".to_string(),
    })
}
