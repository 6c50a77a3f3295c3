use thiserror::Error;

/// Why a digest document could not be obtained.
///
/// Every variant is converted into an empty or not-found view state at the view
/// boundary; the distinction only matters for diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
  #[error("Document not found: {path}")]
  NotFound { path: String },

  #[error("HTTP {status} while fetching {path}")]
  Status { path: String, status: u16 },

  #[error("Request for {path} failed: {message}")]
  Transport { path: String, message: String },

  #[error("Failed to decode {path}: {message}")]
  Decode { path: String, message: String },

  #[error("Invalid date parameter '{date}'")]
  InvalidDate { date: String },

  #[error("Invalid document source '{location}': {message}")]
  InvalidSource { location: String, message: String },
}

impl FetchError {
  /// Missing documents and rejected dates both mean "nothing to show for this date"
  pub fn is_not_found(&self) -> bool {
    matches!(self, FetchError::NotFound { .. } | FetchError::InvalidDate { .. })
  }
}

/// Errors raised by configuration and preference persistence
#[derive(Error, Debug)]
pub enum EspressoError {
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("Configuration error: {message}")]
  Config { message: String },

  #[error(transparent)]
  Fetch(#[from] FetchError),
}

pub type Result<T> = std::result::Result<T, EspressoError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_not_found_classification() {
    assert!(FetchError::NotFound { path: "data/index.json".into() }.is_not_found());
    assert!(FetchError::InvalidDate { date: "../etc".into() }.is_not_found());
    assert!(!FetchError::Status { path: "x".into(), status: 500 }.is_not_found());
  }

  #[test]
  fn test_error_messages_name_the_document() {
    let err = FetchError::Status { path: "data/summaries/2024-06-01.json".into(), status: 503 };
    assert_eq!(err.to_string(), "HTTP 503 while fetching data/summaries/2024-06-01.json");
  }
}
