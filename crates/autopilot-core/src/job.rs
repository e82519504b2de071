//! Job listings and their fit score.
//!
//! Listing identity is supplied by the caller (usually the job board's own
//! id), and writes are upserts: storing a listing with an existing id replaces
//! it.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::{Error, Result};

// ─── Source ──────────────────────────────────────────────────────────────────

/// The job board a listing was collected from.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
  EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum JobSource {
  Linkedin,
  Indeed,
  Stepstone,
  Xing,
}

impl JobSource {
  /// Parse the lowercase storage form.
  pub fn parse(s: &str) -> Result<Self> {
    Self::from_str(s).map_err(|_| Error::UnknownJobSource(s.to_owned()))
  }
}

// ─── Match score ─────────────────────────────────────────────────────────────

/// A percentage fit between a candidate and a listing. Always within
/// `0..=100`; every constructor clamps.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(from = "f64", into = "u8")]
pub struct MatchScore(u8);

impl MatchScore {
  pub const MAX: Self = Self(100);
  pub const MIN: Self = Self(0);

  pub fn clamped(value: i64) -> Self { Self(value.clamp(0, 100) as u8) }

  pub fn value(self) -> u8 { self.0 }
}

impl From<i64> for MatchScore {
  fn from(value: i64) -> Self { Self::clamped(value) }
}

/// Fractional scores round half away from zero; `NaN` reads as `0`.
impl From<f64> for MatchScore {
  fn from(value: f64) -> Self {
    if value.is_nan() {
      return Self::MIN;
    }
    Self(value.round().clamp(0.0, 100.0) as u8)
  }
}

impl From<MatchScore> for u8 {
  fn from(score: MatchScore) -> Self { score.0 }
}

impl fmt::Display for MatchScore {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}%", self.0)
  }
}

// ─── Listing ─────────────────────────────────────────────────────────────────

/// A scraped or seeded external job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
  pub id:           String,
  pub title:        String,
  pub company:      String,
  pub location:     String,
  pub source:       JobSource,
  pub url:          String,
  pub description:  String,
  #[serde(default)]
  pub requirements: Vec<String>,
  #[serde(default)]
  pub match_score:  Option<MatchScore>,
  pub scraped_date: DateTime<Utc>,
}
