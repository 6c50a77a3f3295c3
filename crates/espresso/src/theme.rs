//! Dark/light theme preference.
//!
//! The state is a single owned cell handed to whatever renders; its palette is
//! the visual marker every view is drawn with.

use crema::{Palette, Scheme};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

use crate::error::Result;

pub const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Preferences {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  theme: Option<Scheme>,
}

/// Where the chosen scheme survives between runs
pub trait PreferenceStore: Send {
  /// The saved scheme; unreadable preferences count as none
  fn load_scheme(&self) -> Option<Scheme>;

  fn save_scheme(&self, scheme: Scheme) -> Result<()>;
}

/// `preferences.json` in the espresso directory
pub struct FilePreferenceStore {
  path: PathBuf,
}

impl FilePreferenceStore {
  pub fn new(dir: &Path) -> Self {
    Self { path: dir.join(PREFERENCES_FILE) }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl PreferenceStore for FilePreferenceStore {
  fn load_scheme(&self) -> Option<Scheme> {
    let content = match std::fs::read_to_string(&self.path) {
      Ok(content) => content,
      Err(e) if e.kind() == ErrorKind::NotFound => return None,
      Err(e) => {
        warn!(path = %self.path.display(), error = %e, "could not read preferences");
        return None;
      }
    };

    match serde_json::from_str::<Preferences>(&content) {
      Ok(preferences) => preferences.theme,
      Err(e) => {
        warn!(path = %self.path.display(), error = %e, "ignoring corrupt preferences");
        None
      }
    }
  }

  fn save_scheme(&self, scheme: Scheme) -> Result<()> {
    if let Some(parent) = self.path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    let preferences = Preferences { theme: Some(scheme) };
    std::fs::write(&self.path, serde_json::to_string_pretty(&preferences)?)?;
    debug!(path = %self.path.display(), %scheme, "saved theme preference");
    Ok(())
  }
}

/// Preferences that live as long as the process
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
  scheme: Mutex<Option<Scheme>>,
}

impl MemoryPreferenceStore {
  pub fn new(initial: Option<Scheme>) -> Self {
    Self { scheme: Mutex::new(initial) }
  }
}

impl PreferenceStore for MemoryPreferenceStore {
  fn load_scheme(&self) -> Option<Scheme> {
    self.scheme.lock().ok().and_then(|guard| *guard)
  }

  fn save_scheme(&self, scheme: Scheme) -> Result<()> {
    if let Ok(mut guard) = self.scheme.lock() {
      *guard = Some(scheme);
    }
    Ok(())
  }
}

/// The platform's light/dark hint
pub trait AmbientScheme {
  fn detect(&self) -> Option<Scheme>;
}

/// Reads the `COLORFGBG` hint many terminal emulators export
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalAmbient;

impl AmbientScheme for TerminalAmbient {
  fn detect(&self) -> Option<Scheme> {
    std::env::var("COLORFGBG").ok().and_then(|value| scheme_from_colorfgbg(&value))
  }
}

/// A fixed answer, for callers that already know the platform preference
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedAmbient(pub Option<Scheme>);

impl AmbientScheme for FixedAmbient {
  fn detect(&self) -> Option<Scheme> {
    self.0
  }
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`); the last field is the background
pub fn scheme_from_colorfgbg(value: &str) -> Option<Scheme> {
  let background: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
  match background {
    0..=6 | 8 => Some(Scheme::Dark),
    7 | 9..=15 => Some(Scheme::Light),
    _ => None,
  }
}

pub struct ThemeState {
  scheme: Scheme,
  store: Box<dyn PreferenceStore>,
}

impl ThemeState {
  /// Saved preference first, then the ambient hint, then light
  pub fn initialize(store: Box<dyn PreferenceStore>, ambient: &dyn AmbientScheme) -> Self {
    let scheme = store.load_scheme().or_else(|| ambient.detect()).unwrap_or_default();
    debug!(%scheme, "theme initialised");
    Self { scheme, store }
  }

  pub fn scheme(&self) -> Scheme {
    self.scheme
  }

  pub fn is_dark(&self) -> bool {
    self.scheme.is_dark()
  }

  pub fn palette(&self) -> Palette {
    Palette::for_scheme(self.scheme)
  }

  /// Flip the scheme and persist it. The flip sticks for this run even if saving fails.
  pub fn toggle(&mut self) -> Result<Scheme> {
    self.scheme = self.scheme.toggled();
    self.store.save_scheme(self.scheme)?;
    Ok(self.scheme)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;
  use tempfile::TempDir;

  #[test]
  fn test_colorfgbg_parsing() {
    assert_eq!(scheme_from_colorfgbg("15;0"), Some(Scheme::Dark));
    assert_eq!(scheme_from_colorfgbg("0;15"), Some(Scheme::Light));
    assert_eq!(scheme_from_colorfgbg("12;default;8"), Some(Scheme::Dark));
    assert_eq!(scheme_from_colorfgbg("0;7"), Some(Scheme::Light));
    assert_eq!(scheme_from_colorfgbg("default"), None);
    assert_eq!(scheme_from_colorfgbg("0;200"), None);
  }

  #[test]
  fn test_init_order() {
    let stored = ThemeState::initialize(
      Box::new(MemoryPreferenceStore::new(Some(Scheme::Light))),
      &FixedAmbient(Some(Scheme::Dark)),
    );
    assert_eq!(stored.scheme(), Scheme::Light);

    let ambient = ThemeState::initialize(
      Box::new(MemoryPreferenceStore::new(None)),
      &FixedAmbient(Some(Scheme::Dark)),
    );
    assert!(ambient.is_dark());

    let fallback =
      ThemeState::initialize(Box::new(MemoryPreferenceStore::new(None)), &FixedAmbient(None));
    assert_eq!(fallback.scheme(), Scheme::Light);
    assert_eq!(fallback.palette(), Palette::for_scheme(Scheme::Light));
  }

  #[test]
  fn test_toggle_persists_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let mut theme = ThemeState::initialize(
      Box::new(FilePreferenceStore::new(temp_dir.path())),
      &FixedAmbient(None),
    );

    assert_eq!(theme.toggle().unwrap(), Scheme::Dark);
    assert_eq!(theme.palette().scheme, Scheme::Dark);

    let reloaded = FilePreferenceStore::new(temp_dir.path());
    assert_eq!(reloaded.load_scheme(), Some(Scheme::Dark));

    // The saved preference now beats a light ambient hint
    let restarted = ThemeState::initialize(Box::new(reloaded), &FixedAmbient(Some(Scheme::Light)));
    assert!(restarted.is_dark());
  }

  #[test]
  fn test_store_creates_missing_directory() {
    let temp_dir = TempDir::new().unwrap();
    let store = FilePreferenceStore::new(&temp_dir.path().join("nested").join("espresso"));
    store.save_scheme(Scheme::Light).unwrap();
    assert_eq!(store.load_scheme(), Some(Scheme::Light));
  }

  #[test]
  fn test_corrupt_preferences_are_ignored() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join(PREFERENCES_FILE), "{\"theme\": \"sepia\"}").unwrap();
    let store = FilePreferenceStore::new(temp_dir.path());
    assert_eq!(store.load_scheme(), None);

    let theme = ThemeState::initialize(Box::new(store), &FixedAmbient(Some(Scheme::Dark)));
    assert!(theme.is_dark());
  }

  #[test]
  #[serial]
  fn test_terminal_ambient_reads_colorfgbg() {
    std::env::set_var("COLORFGBG", "15;0");
    assert_eq!(TerminalAmbient.detect(), Some(Scheme::Dark));

    std::env::remove_var("COLORFGBG");
    assert_eq!(TerminalAmbient.detect(), None);
  }
}
