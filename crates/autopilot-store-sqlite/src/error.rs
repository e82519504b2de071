//! Error type for `autopilot-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The database could not be opened or initialised.
  #[error("storage unavailable: {0}")]
  StorageUnavailable(String),

  #[error("application not found: {0}")]
  ApplicationNotFound(String),

  /// A caller-supplied id is already taken.
  #[error("conflict: {0} already exists")]
  Conflict(String),

  #[error("core error: {0}")]
  Core(#[from] autopilot_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
