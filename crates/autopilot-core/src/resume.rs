//! Résumé records and the structured profile extracted from them.
//!
//! A résumé is immutable once stored. Uploading again inserts a new record;
//! the "current" résumé is simply the most recently inserted one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ─── Profile ─────────────────────────────────────────────────────────────────

/// Contact details at the top of a résumé.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
  #[serde(deserialize_with = "null_as_empty")]
  pub name:     String,
  #[serde(deserialize_with = "null_as_empty")]
  pub email:    String,
  #[serde(deserialize_with = "null_as_empty")]
  pub phone:    String,
  #[serde(deserialize_with = "null_as_empty")]
  pub location: String,
}

/// One position held by the candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
  #[serde(deserialize_with = "null_as_empty")]
  pub title:       String,
  #[serde(deserialize_with = "null_as_empty")]
  pub company:     String,
  #[serde(deserialize_with = "null_as_empty")]
  pub duration:    String,
  #[serde(deserialize_with = "null_as_empty")]
  pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
  #[serde(deserialize_with = "null_as_empty")]
  pub degree:      String,
  #[serde(deserialize_with = "null_as_empty")]
  pub institution: String,
  #[serde(deserialize_with = "null_as_empty")]
  pub year:        String,
}

/// The structured candidate profile derived from free-text résumé input.
///
/// The JSON form is camelCase (`personalInfo`, `skills`, …), matching what the
/// language model is asked to produce. Missing fields deserialize as empty, so
/// [`ParsedProfile::default`] is the fully-empty profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParsedProfile {
  pub personal_info: PersonalInfo,
  pub skills:        Vec<String>,
  pub experience:    Vec<Experience>,
  pub education:     Vec<Education>,
}

impl ParsedProfile {
  /// `true` when no field carries any information.
  pub fn is_empty(&self) -> bool { *self == Self::default() }

  /// "Title at Company" for each position, comma-separated.
  pub fn experience_summary(&self) -> String {
    self
      .experience
      .iter()
      .map(|e| format!("{} at {}", e.title, e.company))
      .collect::<Vec<_>>()
      .join(", ")
  }
}

/// Models occasionally emit `null` for fields they could not find.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// Input for [`AutopilotStore::add_resume`](crate::store::AutopilotStore::add_resume).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewResume {
  pub file_name:   String,
  pub upload_date: DateTime<Utc>,
  pub profile:     ParsedProfile,
}

impl NewResume {
  /// A résumé uploaded now.
  pub fn new(file_name: impl Into<String>, profile: ParsedProfile) -> Self {
    Self { file_name: file_name.into(), upload_date: Utc::now(), profile }
  }
}

/// A stored résumé. `resume_id` is assigned by the store and increases with
/// insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
  pub resume_id:   i64,
  pub file_name:   String,
  pub upload_date: DateTime<Utc>,
  pub profile:     ParsedProfile,
}
