//! Sharing a day's page.
//!
//! Best effort: the native share sheet first, the clipboard second. Neither
//! failure is fatal and nothing is retried.

use std::io::Write;
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
  pub title: String,
  pub text: String,
  pub url: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShareError {
  #[error("Native sharing is not supported here")]
  Unsupported,

  #[error("Share failed: {0}")]
  Failed(String),

  #[error("Clipboard unavailable: {0}")]
  Clipboard(String),
}

/// Platform share capability
#[cfg_attr(test, mockall::automock)]
pub trait ShareSheet {
  fn share(&self, payload: &SharePayload) -> Result<(), ShareError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait Clipboard {
  fn copy(&self, text: &str) -> Result<(), ShareError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
  /// Handed to the native share sheet
  Shared,
  /// The URL is on the clipboard; the caller should confirm this to the reader
  Copied,
  /// Both routes failed; already logged
  Failed,
}

pub fn share(payload: &SharePayload, sheet: &dyn ShareSheet, clipboard: &dyn Clipboard) -> ShareOutcome {
  match sheet.share(payload) {
    Ok(()) => return ShareOutcome::Shared,
    Err(ShareError::Unsupported) => debug!("no native share sheet, falling back to clipboard"),
    Err(e) => warn!(error = %e, "native share failed, falling back to clipboard"),
  }

  match clipboard.copy(&payload.url) {
    Ok(()) => ShareOutcome::Copied,
    Err(e) => {
      warn!(error = %e, url = payload.url.as_str(), "could not share or copy the page link");
      ShareOutcome::Failed
    }
  }
}

/// Terminals have no share sheet
#[derive(Debug, Default, Clone, Copy)]
pub struct NoShareSheet;

impl ShareSheet for NoShareSheet {
  fn share(&self, _payload: &SharePayload) -> Result<(), ShareError> {
    Err(ShareError::Unsupported)
  }
}

/// An external program that reads the clipboard contents from stdin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardCommand {
  pub program: String,
  pub args: Vec<String>,
}

impl ClipboardCommand {
  pub fn new(program: &str, args: &[&str]) -> Self {
    Self { program: program.to_string(), args: args.iter().map(|a| a.to_string()).collect() }
  }

  fn run(&self, text: &str) -> Result<(), String> {
    let mut child = Command::new(&self.program)
      .args(&self.args)
      .stdin(Stdio::piped())
      .stdout(Stdio::null())
      .stderr(Stdio::null())
      .spawn()
      .map_err(|e| format!("{}: {}", self.program, e))?;

    if let Some(mut stdin) = child.stdin.take() {
      stdin.write_all(text.as_bytes()).map_err(|e| format!("{}: {}", self.program, e))?;
    }

    let status = child.wait().map_err(|e| format!("{}: {}", self.program, e))?;
    if status.success() {
      Ok(())
    } else {
      Err(format!("{} exited with {}", self.program, status))
    }
  }
}

/// Copies through the first clipboard tool that works
#[derive(Debug, Clone)]
pub struct CommandClipboard {
  commands: Vec<ClipboardCommand>,
}

impl CommandClipboard {
  pub fn with_commands(commands: Vec<ClipboardCommand>) -> Self {
    Self { commands }
  }

  /// The usual clipboard tools for this platform, in order of preference
  pub fn system() -> Self {
    let commands = if cfg!(target_os = "macos") {
      vec![ClipboardCommand::new("pbcopy", &[])]
    } else if cfg!(windows) {
      vec![ClipboardCommand::new("clip.exe", &[])]
    } else {
      vec![
        ClipboardCommand::new("wl-copy", &[]),
        ClipboardCommand::new("xclip", &["-selection", "clipboard"]),
        ClipboardCommand::new("xsel", &["--clipboard", "--input"]),
        // WSL
        ClipboardCommand::new("clip.exe", &[]),
      ]
    };
    Self { commands }
  }
}

impl Clipboard for CommandClipboard {
  fn copy(&self, text: &str) -> Result<(), ShareError> {
    let mut failures = Vec::new();
    for command in &self.commands {
      match command.run(text) {
        Ok(()) => {
          debug!(program = command.program.as_str(), "copied to clipboard");
          return Ok(());
        }
        Err(e) => failures.push(e),
      }
    }
    Err(ShareError::Clipboard(if failures.is_empty() {
      "no clipboard tool configured".to_string()
    } else {
      failures.join("; ")
    }))
  }
}
