//! The user-level flows, generic over the store and the chat endpoint.

use anyhow::{Context as _, Result, anyhow};
use autopilot_core::{
  application::{Application, ApplicationPatch, ApplicationStatus, NewApplication},
  job::JobListing,
  resume::{NewResume, Resume},
  settings::Settings,
  store::AutopilotStore,
};
use autopilot_inference::{Assistant, ChatEndpoint};
use tracing::info;

/// `get_jobs` limit for flows that must see every stored listing.
const ALL_JOBS: Option<usize> = Some(usize::MAX);

/// Dashboard counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overview {
  pub resume_uploaded: bool,
  pub total_jobs:      usize,
  pub applications:    usize,
  pub interviews:      usize,
}

/// Result of [`Workflow::import_jobs`].
#[derive(Debug, Default)]
pub struct ImportReport {
  pub stored:       usize,
  pub auto_applied: Vec<Application>,
}

pub struct Workflow<S, E> {
  store:     S,
  assistant: Assistant<E>,
}

impl<S, E> Workflow<S, E>
where
  S: AutopilotStore,
  E: ChatEndpoint,
{
  pub fn new(store: S, assistant: Assistant<E>) -> Self { Self { store, assistant } }

  pub fn store(&self) -> &S { &self.store }

  pub fn assistant(&self) -> &Assistant<E> { &self.assistant }

  /// Parse `raw_text` with the model and store the result as the current
  /// résumé.
  pub async fn upload_resume(&self, file_name: &str, raw_text: &str) -> Result<Resume> {
    let profile = self
      .assistant
      .parse_resume(raw_text)
      .await
      .context("parsing résumé")?;
    if profile.is_empty() {
      info!(file_name, "model returned no usable profile; storing an empty one");
    }

    let new = NewResume::new(file_name, profile);
    let resume_id = self.store.add_resume(new.clone()).await?;
    Ok(Resume {
      resume_id,
      file_name: new.file_name,
      upload_date: new.upload_date,
      profile: new.profile,
    })
  }

  /// Score `jobs` against the current résumé (when there is one) and upsert
  /// them. With `auto_apply` on, follow up with [`Self::auto_apply`].
  pub async fn import_jobs(
    &self,
    mut jobs: Vec<JobListing>,
    settings: &Settings,
  ) -> Result<ImportReport> {
    if let Some(resume) = self.store.latest_resume().await? {
      for job in &mut jobs {
        let score = self
          .assistant
          .match_score(&resume.profile, job.requirements.as_slice());
        job.match_score = Some(score);
      }
    }

    let stored = self.store.put_jobs(jobs).await?;
    info!(stored, "imported job listings");

    let auto_applied = if settings.auto_apply {
      self.auto_apply(settings).await?
    } else {
      Vec::new()
    };
    Ok(ImportReport { stored, auto_applied })
  }

  /// Stored listings, optionally narrowed by the settings filter.
  pub async fn list_jobs(
    &self,
    limit: Option<usize>,
    filter: Option<&Settings>,
  ) -> Result<Vec<JobListing>> {
    let mut jobs = self.store.get_jobs(limit).await?;
    if let Some(settings) = filter {
      jobs.retain(|j| settings.admits(j));
    }
    Ok(jobs)
  }

  /// Draft a cover letter for `job_id` and record a pending application.
  pub async fn apply(&self, job_id: &str) -> Result<Application> {
    let resume = self
      .store
      .latest_resume()
      .await?
      .ok_or_else(|| anyhow!("no résumé uploaded yet; run `autopilot upload <file>` first"))?;
    let job = self
      .store
      .get_job(job_id)
      .await?
      .ok_or_else(|| anyhow!("no job listing with id {job_id:?}"))?;

    let cover_letter = self
      .assistant
      .draft_cover_letter(&resume.profile, &job.description)
      .await
      .context("drafting cover letter")?;
    let snapshot = serde_json::to_string(&resume.profile)?;

    let id = self
      .store
      .add_application(NewApplication::pending(&job.id, cover_letter, snapshot))
      .await?;
    info!(application_id = %id, job_id, "prepared application");

    self
      .store
      .applications_for_job(&job.id)
      .await?
      .into_iter()
      .find(|a| a.id == id)
      .ok_or_else(|| anyhow!("application {id} vanished after insert"))
  }

  /// Apply to every stored listing the settings admit whose score reaches
  /// `min_match_score` and which has no application yet. Unscored listings
  /// are skipped. Stops at the first failure.
  pub async fn auto_apply(&self, settings: &Settings) -> Result<Vec<Application>> {
    if self.store.latest_resume().await?.is_none() {
      return Ok(Vec::new());
    }

    let mut applied = Vec::new();
    for job in self.store.get_jobs(ALL_JOBS).await? {
      let qualifies = settings.admits(&job)
        && job
          .match_score
          .is_some_and(|s| s.value() >= settings.min_match_score);
      if !qualifies || !self.store.applications_for_job(&job.id).await?.is_empty() {
        continue;
      }
      applied.push(self.apply(&job.id).await?);
    }
    Ok(applied)
  }

  pub async fn set_status(&self, id: &str, status: ApplicationStatus) -> Result<Application> {
    Ok(
      self
        .store
        .update_application(id, ApplicationPatch::status(status))
        .await?,
    )
  }

  pub async fn overview(&self) -> Result<Overview> {
    let resume_uploaded = self.store.latest_resume().await?.is_some();
    let total_jobs = self.store.get_jobs(ALL_JOBS).await?.len();
    let applications = self.store.get_applications().await?;
    let interviews = applications
      .iter()
      .filter(|a| a.status == ApplicationStatus::Interviewing)
      .count();

    Ok(Overview {
      resume_uploaded,
      total_jobs,
      applications: applications.len(),
      interviews,
    })
  }
}
