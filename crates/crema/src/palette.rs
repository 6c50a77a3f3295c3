use colored::{Color, Colorize};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Light or dark colour scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
  #[default]
  Light,
  Dark,
}

impl Scheme {
  pub fn is_dark(self) -> bool {
    self == Scheme::Dark
  }

  pub fn toggled(self) -> Self {
    match self {
      Scheme::Light => Scheme::Dark,
      Scheme::Dark => Scheme::Light,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Scheme::Light => "light",
      Scheme::Dark => "dark",
    }
  }
}

impl fmt::Display for Scheme {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Scheme {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "light" => Ok(Scheme::Light),
      "dark" => Ok(Scheme::Dark),
      other => Err(format!("unknown colour scheme '{other}'")),
    }
  }
}

/// Colours used when rendering views.
///
/// Dark terminals get the bright variants so that muted text stays readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
  pub scheme: Scheme,
  accent: Color,
  text: Color,
  muted: Color,
  podcast: Color,
}

impl Palette {
  pub fn for_scheme(scheme: Scheme) -> Self {
    match scheme {
      Scheme::Light => Self {
        scheme,
        accent: Color::Green,
        text: Color::Black,
        muted: Color::BrightBlack,
        podcast: Color::Blue,
      },
      Scheme::Dark => Self {
        scheme,
        accent: Color::BrightGreen,
        text: Color::BrightWhite,
        muted: Color::White,
        podcast: Color::BrightMagenta,
      },
    }
  }

  pub fn accent(&self, text: &str) -> String {
    text.color(self.accent).to_string()
  }

  /// Bold accent, used for the latest day and the active category
  pub fn emphasis(&self, text: &str) -> String {
    text.color(self.accent).bold().to_string()
  }

  pub fn heading(&self, text: &str) -> String {
    text.color(self.text).bold().to_string()
  }

  pub fn body(&self, text: &str) -> String {
    text.color(self.text).to_string()
  }

  pub fn muted(&self, text: &str) -> String {
    text.color(self.muted).to_string()
  }

  pub fn synopsis(&self, text: &str) -> String {
    text.color(self.muted).italic().to_string()
  }

  pub fn podcast(&self, text: &str) -> String {
    text.color(self.podcast).bold().to_string()
  }
}

impl Default for Palette {
  fn default() -> Self {
    Self::for_scheme(Scheme::default())
  }
}
