//! The `AutopilotStore` trait.
//!
//! Implemented by storage backends (e.g. `autopilot-store-sqlite`). Workflows
//! depend on this abstraction so tests can substitute their own backend.

use std::future::Future;

use crate::{
  application::{Application, ApplicationPatch, ApplicationStatus, NewApplication},
  job::JobListing,
  resume::{NewResume, Resume},
  settings::Settings,
};

/// Upper bound applied by [`AutopilotStore::get_jobs`] when no limit is given.
pub const DEFAULT_JOB_LIMIT: usize = 50;

/// Durable local storage for résumés, job listings, applications and the
/// settings blob.
///
/// Operations on one store handle are observed in issue order: a read issued
/// after a completed write sees that write. There are no transactions spanning
/// collections.
pub trait AutopilotStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Create any missing collections and stamp the schema version. Calling it
  /// on an already-initialised store is a no-op.
  fn initialize(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Résumés ───────────────────────────────────────────────────────────

  /// Insert a résumé and return the store-assigned id.
  fn add_resume(
    &self,
    resume: NewResume,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  /// The most recently *inserted* résumé, regardless of its `upload_date`.
  fn latest_resume(
    &self,
  ) -> impl Future<Output = Result<Option<Resume>, Self::Error>> + Send + '_;

  // ── Job listings ──────────────────────────────────────────────────────

  /// Insert or replace a listing by id.
  fn put_job(
    &self,
    job: JobListing,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Upsert each listing in turn and return how many were written. Not
  /// atomic: on failure the listings before the failing one stay written.
  fn put_jobs(
    &self,
    jobs: Vec<JobListing>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  fn get_job<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<JobListing>, Self::Error>> + Send + 'a;

  /// Up to `limit` listings (default [`DEFAULT_JOB_LIMIT`]) in storage order.
  fn get_jobs(
    &self,
    limit: Option<usize>,
  ) -> impl Future<Output = Result<Vec<JobListing>, Self::Error>> + Send + '_;

  // ── Applications ──────────────────────────────────────────────────────

  /// Insert an application and return its id. An id is generated when the
  /// caller supplies none; a caller-supplied id that already exists is a
  /// conflict.
  fn add_application(
    &self,
    application: NewApplication,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + '_;

  fn get_applications(
    &self,
  ) -> impl Future<Output = Result<Vec<Application>, Self::Error>> + Send + '_;

  fn applications_by_status(
    &self,
    status: ApplicationStatus,
  ) -> impl Future<Output = Result<Vec<Application>, Self::Error>> + Send + '_;

  fn applications_for_job<'a>(
    &'a self,
    job_id: &'a str,
  ) -> impl Future<Output = Result<Vec<Application>, Self::Error>> + Send + 'a;

  /// Merge `patch` into the application `id` and stamp a fresh
  /// `last_updated`, strictly later than the previous one. Fails if `id` does
  /// not exist.
  fn update_application<'a>(
    &'a self,
    id: &'a str,
    patch: ApplicationPatch,
  ) -> impl Future<Output = Result<Application, Self::Error>> + Send + 'a;

  // ── Settings ──────────────────────────────────────────────────────────

  fn load_settings(
    &self,
  ) -> impl Future<Output = Result<Option<Settings>, Self::Error>> + Send + '_;

  fn save_settings<'a>(
    &'a self,
    settings: &'a Settings,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Reset ─────────────────────────────────────────────────────────────

  /// Irreversibly delete every record and the settings blob. Confirmation is
  /// the caller's job.
  fn wipe(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
