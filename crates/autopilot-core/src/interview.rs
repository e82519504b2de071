//! Interview records.
//!
//! The schema reserves a collection for interviews, but nothing reads or
//! writes it yet.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::{Error, Result};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display,
  EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InterviewStatus {
  #[default]
  Pending,
  Scheduled,
  Completed,
  Cancelled,
}

impl InterviewStatus {
  pub fn parse(s: &str) -> Result<Self> {
    Self::from_str(s).map_err(|_| Error::UnknownInterviewStatus(s.to_owned()))
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
  pub id:             String,
  pub application_id: String,
  pub scheduled_date: Option<DateTime<Utc>>,
  pub status:         InterviewStatus,
  pub notes:          Option<String>,
}
