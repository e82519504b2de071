//! [`SqliteStore`]: the SQLite implementation of [`AutopilotStore`].

use std::path::Path;

use autopilot_core::{
  application::{Application, ApplicationPatch, ApplicationStatus, NewApplication},
  job::JobListing,
  resume::{NewResume, Resume},
  settings::Settings,
  store::{AutopilotStore, DEFAULT_JOB_LIMIT},
};
use chrono::Utc;
use rusqlite::OptionalExtension as _;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
  encode::{
    decode_dt, encode_dt, next_stamp, RawApplication, RawJob, RawResume,
    APPLICATION_COLUMNS, JOB_COLUMNS, RESUME_COLUMNS,
  },
  schema::{SCHEMA, SCHEMA_VERSION, WIPE},
  Error, Result,
};

const SETTINGS_KEY: &str = "settings";

// ─── Store ───────────────────────────────────────────────────────────────────

/// An autopilot store backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted, and every
/// clone talks to the same database thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and initialise its schema.
  ///
  /// Any failure to obtain usable storage (an uncreatable parent directory,
  /// an unreadable file, a failed schema write) is reported as
  /// [`Error::StorageUnavailable`].
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      std::fs::create_dir_all(parent).map_err(|e| {
        Error::StorageUnavailable(format!("creating {}: {e}", parent.display()))
      })?;
    }

    let conn = tokio_rusqlite::Connection::open(path)
      .await
      .map_err(|e| Error::StorageUnavailable(format!("opening {}: {e}", path.display())))?;
    Self::from_connection(conn).await
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(|e| Error::StorageUnavailable(e.to_string()))?;
    Self::from_connection(conn).await
  }

  async fn from_connection(conn: tokio_rusqlite::Connection) -> Result<Self> {
    let store = Self { conn };
    store
      .init_schema()
      .await
      .map_err(|e| Error::StorageUnavailable(e.to_string()))?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    let migrated_from = self
      .conn
      .call(|conn| {
        let version: i64 = conn.pragma_query_value(None, "user_version", |r| r.get(0))?;
        if version >= SCHEMA_VERSION {
          return Ok(None);
        }
        conn.execute_batch(SCHEMA)?;
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        Ok(Some(version))
      })
      .await?;

    match migrated_from {
      Some(from) => info!(from, to = SCHEMA_VERSION, "initialised store schema"),
      None => debug!(version = SCHEMA_VERSION, "store schema up to date"),
    }
    Ok(())
  }

  async fn query_applications(
    &self,
    filter: &'static str,
    arg: Option<String>,
  ) -> Result<Vec<Application>> {
    let raws: Vec<RawApplication> = self
      .conn
      .call(move |conn| {
        let sql =
          format!("SELECT {APPLICATION_COLUMNS} FROM applications {filter} ORDER BY seq");
        let mut stmt = conn.prepare(&sql)?;
        let rows = match arg {
          Some(a) => stmt
            .query_map(rusqlite::params![a], RawApplication::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
          None => stmt
            .query_map([], RawApplication::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawApplication::into_application).collect()
  }
}

// ─── AutopilotStore impl ─────────────────────────────────────────────────────

impl AutopilotStore for SqliteStore {
  type Error = Error;

  async fn initialize(&self) -> Result<()> {
    self
      .init_schema()
      .await
      .map_err(|e| Error::StorageUnavailable(e.to_string()))
  }

  // ── Résumés ───────────────────────────────────────────────────────────────

  async fn add_resume(&self, resume: NewResume) -> Result<i64> {
    let file_name    = resume.file_name;
    let upload_str   = encode_dt(resume.upload_date);
    let profile_json = serde_json::to_string(&resume.profile)?;

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO resumes (file_name, upload_date, profile_json) VALUES (?1, ?2, ?3)",
          rusqlite::params![file_name, upload_str, profile_json],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    debug!(resume_id = id, "stored résumé");
    Ok(id)
  }

  async fn latest_resume(&self) -> Result<Option<Resume>> {
    let raw: Option<RawResume> = self
      .conn
      .call(|conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {RESUME_COLUMNS} FROM resumes ORDER BY resume_id DESC LIMIT 1"),
            [],
            RawResume::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawResume::into_resume).transpose()
  }

  // ── Job listings ──────────────────────────────────────────────────────────

  async fn put_job(&self, job: JobListing) -> Result<()> {
    let raw = RawJob::from_listing(&job)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO jobs (
             job_id, title, company, location, source, url,
             description, requirements, match_score, scraped_date
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
           ON CONFLICT(job_id) DO UPDATE SET
             title        = excluded.title,
             company      = excluded.company,
             location     = excluded.location,
             source       = excluded.source,
             url          = excluded.url,
             description  = excluded.description,
             requirements = excluded.requirements,
             match_score  = excluded.match_score,
             scraped_date = excluded.scraped_date",
          rusqlite::params![
            raw.job_id,
            raw.title,
            raw.company,
            raw.location,
            raw.source,
            raw.url,
            raw.description,
            raw.requirements,
            raw.match_score,
            raw.scraped_date,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn put_jobs(&self, jobs: Vec<JobListing>) -> Result<usize> {
    let mut written = 0;
    for job in jobs {
      self.put_job(job).await?;
      written += 1;
    }
    debug!(written, "stored job listings");
    Ok(written)
  }

  async fn get_job<'a>(&'a self, id: &'a str) -> Result<Option<JobListing>> {
    let id = id.to_owned();

    let raw: Option<RawJob> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {JOB_COLUMNS} FROM jobs WHERE job_id = ?1"),
            rusqlite::params![id],
            RawJob::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawJob::into_listing).transpose()
  }

  async fn get_jobs(&self, limit: Option<usize>) -> Result<Vec<JobListing>> {
    let limit = i64::try_from(limit.unwrap_or(DEFAULT_JOB_LIMIT)).unwrap_or(i64::MAX);

    let raws: Vec<RawJob> = self
      .conn
      .call(move |conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {JOB_COLUMNS} FROM jobs ORDER BY job_id LIMIT ?1"))?;
        let rows = stmt
          .query_map(rusqlite::params![limit], RawJob::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawJob::into_listing).collect()
  }

  // ── Applications ──────────────────────────────────────────────────────────

  async fn add_application(&self, application: NewApplication) -> Result<String> {
    let id = application
      .id
      .unwrap_or_else(|| format!("app_{}", Uuid::new_v4().simple()));

    let id_str        = id.clone();
    let job_id        = application.job_id;
    let status_str    = application.status.as_ref().to_owned();
    let cover_letter  = application.cover_letter;
    let customized_cv = application.customized_cv;
    let applied_str   = encode_dt(application.applied_date);
    let updated_str   = encode_dt(Utc::now());

    let inserted = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "INSERT INTO applications (
             application_id, job_id, status, cover_letter,
             customized_cv, applied_date, last_updated
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
           ON CONFLICT(application_id) DO NOTHING",
          rusqlite::params![
            id_str,
            job_id,
            status_str,
            cover_letter,
            customized_cv,
            applied_str,
            updated_str,
          ],
        )?;
        Ok(n)
      })
      .await?;

    if inserted == 0 {
      return Err(Error::Conflict(id));
    }
    debug!(application_id = %id, "stored application");
    Ok(id)
  }

  async fn get_applications(&self) -> Result<Vec<Application>> {
    self.query_applications("", None).await
  }

  async fn applications_by_status(&self, status: ApplicationStatus) -> Result<Vec<Application>> {
    self
      .query_applications("WHERE status = ?1", Some(status.as_ref().to_owned()))
      .await
  }

  async fn applications_for_job<'a>(&'a self, job_id: &'a str) -> Result<Vec<Application>> {
    self
      .query_applications("WHERE job_id = ?1", Some(job_id.to_owned()))
      .await
  }

  async fn update_application<'a>(
    &'a self,
    id:    &'a str,
    patch: ApplicationPatch,
  ) -> Result<Application> {
    let id_str        = id.to_owned();
    let job_id        = patch.job_id;
    let status        = patch.status.map(|s| s.as_ref().to_owned());
    let cover_letter  = patch.cover_letter;
    let customized_cv = patch.customized_cv;
    let applied       = patch.applied_date.map(encode_dt);

    // Read, merge and write under one transaction so a concurrent update
    // cannot interleave between the read and the write.
    let merged: Option<RawApplication> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let current = tx
          .query_row(
            &format!("SELECT {APPLICATION_COLUMNS} FROM applications WHERE application_id = ?1"),
            rusqlite::params![id_str],
            RawApplication::from_row,
          )
          .optional()?;
        let Some(mut raw) = current else {
          return Ok(None);
        };

        if let Some(v) = job_id {
          raw.job_id = v;
        }
        if let Some(v) = status {
          raw.status = v;
        }
        if let Some(v) = cover_letter {
          raw.cover_letter = v;
        }
        if let Some(v) = customized_cv {
          raw.customized_cv = v;
        }
        if let Some(v) = applied {
          raw.applied_date = v;
        }
        // A corrupt stamp aborts the update; dropping `tx` rolls it back.
        let previous = decode_dt(&raw.last_updated).map_err(|e| {
          tokio_rusqlite::Error::Other(
            format!("application {}: last_updated: {e}", raw.application_id).into(),
          )
        })?;
        raw.last_updated = encode_dt(next_stamp(Utc::now(), Some(previous)));

        tx.execute(
          "UPDATE applications SET
             job_id        = ?2,
             status        = ?3,
             cover_letter  = ?4,
             customized_cv = ?5,
             applied_date  = ?6,
             last_updated  = ?7
           WHERE application_id = ?1",
          rusqlite::params![
            raw.application_id,
            raw.job_id,
            raw.status,
            raw.cover_letter,
            raw.customized_cv,
            raw.applied_date,
            raw.last_updated,
          ],
        )?;
        tx.commit()?;
        Ok(Some(raw))
      })
      .await?;

    match merged {
      Some(raw) => raw.into_application(),
      None => Err(Error::ApplicationNotFound(id.to_owned())),
    }
  }

  // ── Settings ──────────────────────────────────────────────────────────────

  async fn load_settings(&self) -> Result<Option<Settings>> {
    let json: Option<String> = self
      .conn
      .call(|conn| {
        Ok(conn
          .query_row(
            "SELECT value_json FROM settings WHERE key = ?1",
            rusqlite::params![SETTINGS_KEY],
            |r| r.get(0),
          )
          .optional()?)
      })
      .await?;

    Ok(json.map(|j| serde_json::from_str::<Settings>(&j)).transpose()?)
  }

  async fn save_settings<'a>(&'a self, settings: &'a Settings) -> Result<()> {
    let json = serde_json::to_string(settings)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO settings (key, value_json) VALUES (?1, ?2)
           ON CONFLICT(key) DO UPDATE SET value_json = excluded.value_json",
          rusqlite::params![SETTINGS_KEY, json],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Reset ─────────────────────────────────────────────────────────────────

  async fn wipe(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(WIPE)?;
        conn.execute_batch("VACUUM;")?;
        Ok(())
      })
      .await?;
    info!("wiped store");

    // The handle stays usable: reads after a wipe see empty collections.
    self.init_schema().await
  }
}
