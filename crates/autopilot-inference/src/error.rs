//! Error types for `autopilot-inference`.

use thiserror::Error;

/// A failed call to the inference endpoint. Every variant means the endpoint
/// is unavailable for this request; callers report it and do not retry.
#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to build HTTP client: {0}")]
  Client(#[source] reqwest::Error),

  #[error("inference endpoint unreachable: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("inference endpoint returned {status}: {body}")]
  Status { status: u16, body: String },

  #[error("inference endpoint sent a malformed response: {0}")]
  Response(#[source] reqwest::Error),
}

impl Error {
  /// Whether this is an *inference unavailable* failure: the endpoint could
  /// not be reached or did not answer with a usable chat reply.
  ///
  /// Currently true for every variant. The match is exhaustive so that a new
  /// variant has to be classified here.
  pub fn is_unavailable(&self) -> bool {
    match self {
      Self::Client(_) | Self::Transport(_) | Self::Status { .. } | Self::Response(_) => true,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The model's reply could not be read as the requested structure.
///
/// Produced by [`Assistant::try_parse_resume`](crate::Assistant::try_parse_resume);
/// [`Assistant::parse_resume`](crate::Assistant::parse_resume) swallows it.
#[derive(Debug, Error)]
#[error("model output is not a résumé profile: {0}")]
pub struct MalformedOutput(#[from] pub serde_json::Error);
