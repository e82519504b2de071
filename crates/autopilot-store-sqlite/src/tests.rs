//! Integration tests for `SqliteStore` against an in-memory database.

use autopilot_core::{
  application::{ApplicationPatch, ApplicationStatus, NewApplication},
  job::{JobListing, JobSource, MatchScore},
  resume::{NewResume, ParsedProfile, PersonalInfo},
  settings::Settings,
  store::AutopilotStore,
};
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn temp_path(name: &str) -> std::path::PathBuf {
  std::env::temp_dir()
    .join(format!("autopilot-test-{}", Uuid::new_v4().simple()))
    .join(name)
}

fn profile(name: &str, skills: &[&str]) -> ParsedProfile {
  ParsedProfile {
    personal_info: PersonalInfo { name: name.into(), ..Default::default() },
    skills: skills.iter().map(|s| s.to_string()).collect(),
    ..Default::default()
  }
}

fn job(id: &str, title: &str) -> JobListing {
  JobListing {
    id:           id.into(),
    title:        title.into(),
    company:      "Acme".into(),
    location:     "Berlin".into(),
    source:       JobSource::Linkedin,
    url:          format!("https://example.com/{id}"),
    description:  "Write Rust.".into(),
    requirements: vec!["Rust".into(), "SQL".into()],
    match_score:  Some(MatchScore::clamped(75)),
    scraped_date: Utc::now(),
  }
}

fn application(job_id: &str) -> NewApplication {
  NewApplication::pending(job_id, "Dear hiring team, ...", r#"{"skills":["Rust"]}"#)
}

// ─── Initialisation ──────────────────────────────────────────────────────────

#[tokio::test]
async fn initialize_is_idempotent() {
  let s = store().await;
  s.initialize().await.unwrap();
  s.initialize().await.unwrap();

  s.put_job(job("job_1", "A")).await.unwrap();
  s.initialize().await.unwrap();
  assert_eq!(s.get_jobs(None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn open_under_a_file_is_storage_unavailable() {
  let blocker = temp_path("blocker");
  std::fs::create_dir_all(blocker.parent().unwrap()).unwrap();
  std::fs::write(&blocker, b"not a directory").unwrap();

  let result = SqliteStore::open(blocker.join("autopilot.db")).await;
  assert!(matches!(result, Err(Error::StorageUnavailable(_))));
}

#[tokio::test]
async fn file_store_survives_reopen() {
  let path = temp_path("autopilot.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.add_resume(NewResume::new("cv.txt", profile("Ada", &["Rust"])))
      .await
      .unwrap();
    s.put_job(job("job_1", "A")).await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  let latest = s.latest_resume().await.unwrap().unwrap();
  assert_eq!(latest.profile.personal_info.name, "Ada");
  assert_eq!(s.get_jobs(None).await.unwrap().len(), 1);
}

// ─── Résumés ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn latest_resume_empty_is_none() {
  let s = store().await;
  assert!(s.latest_resume().await.unwrap().is_none());
}

#[tokio::test]
async fn latest_resume_follows_insertion_order_not_upload_date() {
  let s = store().await;

  let mut newer_date = NewResume::new("first.txt", profile("First", &[]));
  newer_date.upload_date = Utc::now() + Duration::days(30);
  let mut older_date = NewResume::new("second.txt", profile("Second", &[]));
  older_date.upload_date = Utc::now() - Duration::days(30);

  let first_id = s.add_resume(newer_date).await.unwrap();
  let second_id = s.add_resume(older_date).await.unwrap();
  assert!(second_id > first_id);

  let latest = s.latest_resume().await.unwrap().unwrap();
  assert_eq!(latest.resume_id, second_id);
  assert_eq!(latest.file_name, "second.txt");
}

#[tokio::test]
async fn resume_profile_roundtrips() {
  let s = store().await;
  let p = profile("Ada Lovelace", &["Rust", "SQL"]);
  s.add_resume(NewResume::new("cv.txt", p.clone())).await.unwrap();

  let latest = s.latest_resume().await.unwrap().unwrap();
  assert_eq!(latest.profile, p);
}

// ─── Job listings ────────────────────────────────────────────────────────────

#[tokio::test]
async fn put_job_same_id_keeps_final_payload() {
  let s = store().await;
  s.put_job(job("job_1", "A")).await.unwrap();
  s.put_job(job("job_1", "B")).await.unwrap();

  let jobs = s.get_jobs(None).await.unwrap();
  assert_eq!(jobs.len(), 1);
  assert_eq!(jobs[0].title, "B");
}

#[tokio::test]
async fn concurrent_upserts_leave_one_record() {
  let s = store().await;
  let (a, b) = tokio::join!(
    s.put_job(job("job_1", "A")),
    s.put_job(job("job_1", "B")),
  );
  a.unwrap();
  b.unwrap();

  let jobs = s.get_jobs(None).await.unwrap();
  assert_eq!(jobs.len(), 1);
  assert!(jobs[0].title == "A" || jobs[0].title == "B");
}

#[tokio::test]
async fn get_jobs_respects_limit() {
  let s = store().await;
  let jobs: Vec<_> = (1..=5).map(|i| job(&format!("job_{i}"), "T")).collect();
  assert_eq!(s.put_jobs(jobs).await.unwrap(), 5);

  assert_eq!(s.get_jobs(Some(2)).await.unwrap().len(), 2);
  assert_eq!(s.get_jobs(None).await.unwrap().len(), 5);
}

#[tokio::test]
async fn get_jobs_defaults_to_fifty() {
  let s = store().await;
  let jobs: Vec<_> = (0..60).map(|i| job(&format!("job_{i:02}"), "T")).collect();
  s.put_jobs(jobs).await.unwrap();

  assert_eq!(s.get_jobs(None).await.unwrap().len(), 50);
  assert_eq!(s.get_jobs(Some(100)).await.unwrap().len(), 60);
}

#[tokio::test]
async fn job_fields_roundtrip() {
  let s = store().await;
  let mut listing = job("job_9", "Data Engineer");
  listing.source = JobSource::Xing;
  listing.match_score = None;
  s.put_job(listing.clone()).await.unwrap();

  let fetched = s.get_job("job_9").await.unwrap().unwrap();
  assert_eq!(fetched, listing);
  assert!(s.get_job("missing").await.unwrap().is_none());
}

// ─── Applications ────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_application_assigns_id() {
  let s = store().await;
  let id = s.add_application(application("job_1")).await.unwrap();
  assert!(id.starts_with("app_"));

  let apps = s.get_applications().await.unwrap();
  assert_eq!(apps.len(), 1);
  assert_eq!(apps[0].id, id);
  assert_eq!(apps[0].status, ApplicationStatus::Pending);
}

#[tokio::test]
async fn add_application_duplicate_caller_id_conflicts() {
  let s = store().await;
  let mut first = application("job_1");
  first.id = Some("app_fixed".into());
  let mut second = application("job_2");
  second.id = Some("app_fixed".into());

  assert_eq!(s.add_application(first).await.unwrap(), "app_fixed");
  let err = s.add_application(second).await.unwrap_err();
  assert!(matches!(err, Error::Conflict(id) if id == "app_fixed"));

  let apps = s.get_applications().await.unwrap();
  assert_eq!(apps.len(), 1);
  assert_eq!(apps[0].job_id, "job_1");
}

#[tokio::test]
async fn get_applications_empty() {
  let s = store().await;
  assert!(s.get_applications().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_missing_application_is_not_found() {
  let s = store().await;
  s.add_application(application("job_1")).await.unwrap();

  let err = s
    .update_application("app_nope", ApplicationPatch::status(ApplicationStatus::Sent))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::ApplicationNotFound(id) if id == "app_nope"));
  assert_eq!(s.get_applications().await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_merges_and_advances_last_updated() {
  let s = store().await;
  let id = s.add_application(application("job_1")).await.unwrap();
  let before = s.get_applications().await.unwrap().remove(0);

  let updated = s
    .update_application(&id, ApplicationPatch::status(ApplicationStatus::Sent))
    .await
    .unwrap();

  assert_eq!(updated.status, ApplicationStatus::Sent);
  assert_eq!(updated.cover_letter, before.cover_letter);
  assert_eq!(updated.customized_cv, before.customized_cv);
  assert_eq!(updated.job_id, before.job_id);
  assert_eq!(updated.applied_date, before.applied_date);
  assert!(updated.last_updated > before.last_updated);

  let stored = s.get_applications().await.unwrap().remove(0);
  assert_eq!(stored, updated);
}

#[tokio::test]
async fn repeated_updates_keep_advancing() {
  let s = store().await;
  let id = s.add_application(application("job_1")).await.unwrap();

  let mut last = s.get_applications().await.unwrap()[0].last_updated;
  for status in [
    ApplicationStatus::Sent,
    ApplicationStatus::Interviewing,
    ApplicationStatus::Accepted,
  ] {
    let app = s
      .update_application(&id, ApplicationPatch::status(status))
      .await
      .unwrap();
    assert!(app.last_updated > last);
    last = app.last_updated;
  }
}

#[tokio::test]
async fn update_with_corrupt_last_updated_fails_and_writes_nothing() {
  let path = temp_path("autopilot.db");
  let s = SqliteStore::open(&path).await.unwrap();
  let id = s.add_application(application("job_1")).await.unwrap();

  let raw = rusqlite::Connection::open(&path).unwrap();
  raw
    .execute(
      "UPDATE applications SET last_updated = 'yesterday' WHERE application_id = ?1",
      rusqlite::params![id],
    )
    .unwrap();

  let err = s
    .update_application(&id, ApplicationPatch::status(ApplicationStatus::Sent))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Database(_)), "unexpected error: {err}");

  let (status, stamp): (String, String) = raw
    .query_row(
      "SELECT status, last_updated FROM applications WHERE application_id = ?1",
      rusqlite::params![id],
      |r| Ok((r.get(0)?, r.get(1)?)),
    )
    .unwrap();
  assert_eq!(status, "pending");
  assert_eq!(stamp, "yesterday");
}

#[tokio::test]
async fn update_can_replace_cover_letter() {
  let s = store().await;
  let id = s.add_application(application("job_1")).await.unwrap();

  let patch = ApplicationPatch {
    cover_letter: Some("Revised letter".into()),
    ..Default::default()
  };
  let app = s.update_application(&id, patch).await.unwrap();
  assert_eq!(app.cover_letter, "Revised letter");
  assert_eq!(app.status, ApplicationStatus::Pending);
}

#[tokio::test]
async fn applications_filtered_by_status_and_job() {
  let s = store().await;
  let a = s.add_application(application("job_1")).await.unwrap();
  s.add_application(application("job_1")).await.unwrap();
  s.add_application(application("job_2")).await.unwrap();
  s.update_application(&a, ApplicationPatch::status(ApplicationStatus::Interviewing))
    .await
    .unwrap();

  let interviewing = s
    .applications_by_status(ApplicationStatus::Interviewing)
    .await
    .unwrap();
  assert_eq!(interviewing.len(), 1);
  assert_eq!(interviewing[0].id, a);

  assert_eq!(s.applications_by_status(ApplicationStatus::Pending).await.unwrap().len(), 2);
  assert_eq!(s.applications_for_job("job_1").await.unwrap().len(), 2);
  assert!(s.applications_for_job("job_3").await.unwrap().is_empty());
}

// ─── Settings ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn settings_roundtrip() {
  let s = store().await;
  assert!(s.load_settings().await.unwrap().is_none());

  let settings = Settings {
    ollama_model: "mistral".into(),
    min_match_score: 55,
    ..Default::default()
  };
  s.save_settings(&settings).await.unwrap();
  assert_eq!(s.load_settings().await.unwrap(), Some(settings.clone()));

  let changed = Settings { auto_apply: true, ..settings };
  s.save_settings(&changed).await.unwrap();
  assert_eq!(s.load_settings().await.unwrap(), Some(changed));
}

// ─── Wipe ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn wipe_leaves_empty_collections() {
  let s = store().await;
  s.add_resume(NewResume::new("cv.txt", profile("Ada", &["Rust"])))
    .await
    .unwrap();
  s.put_jobs(vec![job("job_1", "A"), job("job_2", "B")]).await.unwrap();
  s.add_application(application("job_1")).await.unwrap();
  s.save_settings(&Settings::default()).await.unwrap();

  s.wipe().await.unwrap();

  assert!(s.latest_resume().await.unwrap().is_none());
  assert!(s.get_jobs(None).await.unwrap().is_empty());
  assert!(s.get_applications().await.unwrap().is_empty());
  assert!(s.load_settings().await.unwrap().is_none());

  // Still usable afterwards.
  s.put_job(job("job_3", "C")).await.unwrap();
  assert_eq!(s.get_jobs(None).await.unwrap().len(), 1);
}
