//! Error types for `autopilot-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown application status: {0:?}")]
  UnknownApplicationStatus(String),

  #[error("unknown job source: {0:?}")]
  UnknownJobSource(String),

  #[error("unknown interview status: {0:?}")]
  UnknownInterviewStatus(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
