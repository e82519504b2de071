//! Applications: a user's drafted or submitted response to one listing.
//!
//! An application references its listing by id only; the reference is never
//! validated. After creation the record changes only through
//! [`ApplicationPatch`], and every change refreshes `last_updated`.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{Error, Result};

/// Where an application stands.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
  Display, EnumString, AsRefStr, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ApplicationStatus {
  #[default]
  Pending,
  Sent,
  Interviewing,
  Rejected,
  Accepted,
}

impl ApplicationStatus {
  /// Parse the lowercase storage form. Anything outside the five statuses is
  /// an error.
  pub fn parse(s: &str) -> Result<Self> {
    Self::from_str(s).map_err(|_| Error::UnknownApplicationStatus(s.to_owned()))
  }
}

/// Input for [`AutopilotStore::add_application`](crate::store::AutopilotStore::add_application).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
  /// Caller-chosen id. When `None` the store assigns one.
  pub id:            Option<String>,
  pub job_id:        String,
  pub status:        ApplicationStatus,
  pub cover_letter:  String,
  /// Serialized snapshot of the résumé profile the letter was written from.
  pub customized_cv: String,
  pub applied_date:  DateTime<Utc>,
}

impl NewApplication {
  /// A pending application for `job_id`, dated now.
  pub fn pending(
    job_id: impl Into<String>,
    cover_letter: impl Into<String>,
    customized_cv: impl Into<String>,
  ) -> Self {
    Self {
      id:            None,
      job_id:        job_id.into(),
      status:        ApplicationStatus::Pending,
      cover_letter:  cover_letter.into(),
      customized_cv: customized_cv.into(),
      applied_date:  Utc::now(),
    }
  }
}

/// A stored application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
  pub id:            String,
  pub job_id:        String,
  pub status:        ApplicationStatus,
  pub cover_letter:  String,
  pub customized_cv: String,
  pub applied_date:  DateTime<Utc>,
  pub last_updated:  DateTime<Utc>,
}

/// A partial update. `None` fields are left untouched. `last_updated` is not
/// patchable: the store stamps it on every update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPatch {
  pub job_id:        Option<String>,
  pub status:        Option<ApplicationStatus>,
  pub cover_letter:  Option<String>,
  pub customized_cv: Option<String>,
  pub applied_date:  Option<DateTime<Utc>>,
}

impl ApplicationPatch {
  pub fn status(status: ApplicationStatus) -> Self {
    Self { status: Some(status), ..Default::default() }
  }
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator as _;

  use super::*;

  #[test]
  fn status_parse_accepts_only_known_values() {
    for status in ApplicationStatus::iter() {
      assert_eq!(ApplicationStatus::parse(status.as_ref()).unwrap(), status);
    }
    assert!(matches!(
      ApplicationStatus::parse("ghosted"),
      Err(Error::UnknownApplicationStatus(_))
    ));
    assert!(ApplicationStatus::parse("Sent").is_err());
  }
}
