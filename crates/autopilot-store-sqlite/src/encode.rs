//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings. String lists and the résumé profile are
//! compact JSON. Enumerations use their lowercase names.

use autopilot_core::{
  application::{Application, ApplicationStatus},
  job::{JobListing, JobSource, MatchScore},
  resume::{ParsedProfile, Resume},
};
use chrono::{DateTime, Duration, Utc};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

/// The `last_updated` value for a mutation happening at `now`: `now`, or one
/// nanosecond past `previous` if the clock has not moved beyond it.
pub fn next_stamp(now: DateTime<Utc>, previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
  match previous {
    Some(prev) if now <= prev => prev + Duration::nanoseconds(1),
    _ => now,
  }
}

// ─── String lists ────────────────────────────────────────────────────────────

pub fn encode_strings(items: &[String]) -> Result<String> {
  Ok(serde_json::to_string(items)?)
}

pub fn decode_strings(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawResume::from_row`].
pub const RESUME_COLUMNS: &str = "resume_id, file_name, upload_date, profile_json";

pub struct RawResume {
  pub resume_id:    i64,
  pub file_name:    String,
  pub upload_date:  String,
  pub profile_json: String,
}

impl RawResume {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      resume_id:    row.get(0)?,
      file_name:    row.get(1)?,
      upload_date:  row.get(2)?,
      profile_json: row.get(3)?,
    })
  }

  pub fn into_resume(self) -> Result<Resume> {
    let profile: ParsedProfile = serde_json::from_str(&self.profile_json)?;
    Ok(Resume {
      resume_id: self.resume_id,
      file_name: self.file_name,
      upload_date: decode_dt(&self.upload_date)?,
      profile,
    })
  }
}

/// Column list matching [`RawJob::from_row`].
pub const JOB_COLUMNS: &str = "job_id, title, company, location, source, url, \
                               description, requirements, match_score, scraped_date";

pub struct RawJob {
  pub job_id:       String,
  pub title:        String,
  pub company:      String,
  pub location:     String,
  pub source:       String,
  pub url:          String,
  pub description:  String,
  pub requirements: String,
  pub match_score:  Option<i64>,
  pub scraped_date: String,
}

impl RawJob {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      job_id:       row.get(0)?,
      title:        row.get(1)?,
      company:      row.get(2)?,
      location:     row.get(3)?,
      source:       row.get(4)?,
      url:          row.get(5)?,
      description:  row.get(6)?,
      requirements: row.get(7)?,
      match_score:  row.get(8)?,
      scraped_date: row.get(9)?,
    })
  }

  pub fn from_listing(job: &JobListing) -> Result<Self> {
    Ok(Self {
      job_id:       job.id.clone(),
      title:        job.title.clone(),
      company:      job.company.clone(),
      location:     job.location.clone(),
      source:       job.source.as_ref().to_owned(),
      url:          job.url.clone(),
      description:  job.description.clone(),
      requirements: encode_strings(&job.requirements)?,
      match_score:  job.match_score.map(|s| i64::from(s.value())),
      scraped_date: encode_dt(job.scraped_date),
    })
  }

  pub fn into_listing(self) -> Result<JobListing> {
    Ok(JobListing {
      id:           self.job_id,
      title:        self.title,
      company:      self.company,
      location:     self.location,
      source:       JobSource::parse(&self.source)?,
      url:          self.url,
      description:  self.description,
      requirements: decode_strings(&self.requirements)?,
      match_score:  self.match_score.map(MatchScore::clamped),
      scraped_date: decode_dt(&self.scraped_date)?,
    })
  }
}

/// Column list matching [`RawApplication::from_row`].
pub const APPLICATION_COLUMNS: &str = "application_id, job_id, status, cover_letter, \
                                       customized_cv, applied_date, last_updated";

pub struct RawApplication {
  pub application_id: String,
  pub job_id:         String,
  pub status:         String,
  pub cover_letter:   String,
  pub customized_cv:  String,
  pub applied_date:   String,
  pub last_updated:   String,
}

impl RawApplication {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      application_id: row.get(0)?,
      job_id:         row.get(1)?,
      status:         row.get(2)?,
      cover_letter:   row.get(3)?,
      customized_cv:  row.get(4)?,
      applied_date:   row.get(5)?,
      last_updated:   row.get(6)?,
    })
  }

  pub fn into_application(self) -> Result<Application> {
    Ok(Application {
      id:            self.application_id,
      job_id:        self.job_id,
      status:        ApplicationStatus::parse(&self.status)?,
      cover_letter:  self.cover_letter,
      customized_cv: self.customized_cv,
      applied_date:  decode_dt(&self.applied_date)?,
      last_updated:  decode_dt(&self.last_updated)?,
    })
  }
}
