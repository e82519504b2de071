//! [`Assistant`]: the three domain operations on top of a [`ChatEndpoint`].

use autopilot_core::{job::MatchScore, matching, resume::ParsedProfile};
use tracing::warn;

use crate::{endpoint::ChatEndpoint, error::MalformedOutput, prompts};

/// Résumé parsing, cover-letter drafting and match scoring.
///
/// Constructed around an explicit endpoint so callers choose the transport
/// (and tests a double).
#[derive(Debug, Clone)]
pub struct Assistant<E> {
  endpoint: E,
}

impl<E: ChatEndpoint> Assistant<E> {
  pub fn new(endpoint: E) -> Self { Self { endpoint } }

  pub fn endpoint(&self) -> &E { &self.endpoint }

  /// Ask the model to structure `raw_text`, keeping an unreadable reply
  /// visible as `Ok(Err(MalformedOutput))`.
  pub async fn try_parse_resume(
    &self,
    raw_text: &str,
  ) -> Result<Result<ParsedProfile, MalformedOutput>, E::Error> {
    let reply = self
      .endpoint
      .chat(prompts::resume_messages(raw_text))
      .await?;
    Ok(extract_profile(&reply))
  }

  /// Like [`try_parse_resume`](Self::try_parse_resume), but an unreadable
  /// reply degrades to [`ParsedProfile::default`]. Endpoint failures still
  /// propagate.
  pub async fn parse_resume(&self, raw_text: &str) -> Result<ParsedProfile, E::Error> {
    match self.try_parse_resume(raw_text).await? {
      Ok(profile) => Ok(profile),
      Err(e) => {
        warn!(error = %e, "résumé reply unreadable, using empty profile");
        Ok(ParsedProfile::default())
      }
    }
  }

  /// Draft a cover letter for `job_description`. The reply is returned
  /// verbatim; the length limit is only requested in the prompt.
  pub async fn draft_cover_letter(
    &self,
    profile: &ParsedProfile,
    job_description: &str,
  ) -> Result<String, E::Error> {
    self
      .endpoint
      .chat(prompts::cover_letter_messages(profile, job_description))
      .await
  }

  /// Local keyword-overlap score; no endpoint call.
  pub fn match_score<S: AsRef<str>>(
    &self,
    profile: &ParsedProfile,
    requirements: &[S],
  ) -> MatchScore {
    matching::match_score(profile, requirements)
  }
}

/// Read a model reply as a [`ParsedProfile`], tolerating a Markdown code
/// fence around the JSON.
pub fn extract_profile(reply: &str) -> Result<ParsedProfile, MalformedOutput> {
  Ok(serde_json::from_str(strip_json_fences(reply))?)
}

/// Strips ```json ... ``` or ``` ... ``` fences from model output.
fn strip_json_fences(text: &str) -> &str {
  let text = text.trim();
  let inner = text
    .strip_prefix("```json")
    .or_else(|| text.strip_prefix("```"));
  match inner {
    Some(rest) => {
      let rest = rest.trim_start();
      rest.strip_suffix("```").map(str::trim).unwrap_or(rest)
    }
    None => text,
  }
}
