//! `autopilot`: a local job-application assistant.
//!
//! Stores a parsed résumé, job listings and applications in a local SQLite
//! file, and asks a local Ollama server to parse résumés and draft cover
//! letters.
//!
//! # Usage
//!
//! ```text
//! autopilot upload cv.txt
//! autopilot import-jobs listings.json
//! autopilot jobs
//! autopilot apply job_42
//! autopilot set-status app_… sent
//! autopilot settings set --model mistral --min-score 60
//! autopilot wipe --yes
//! ```

mod config;
mod workflow;

use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};
use autopilot_core::{
  application::{Application, ApplicationStatus},
  job::JobListing,
  settings::Settings,
  store::AutopilotStore,
};
use autopilot_inference::{Assistant, OllamaClient, OllamaConfig};
use autopilot_store_sqlite::SqliteStore;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::{config::AppConfig, workflow::Workflow};

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "autopilot", version, about = "Local job-application assistant")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "autopilot.toml")]
  config: PathBuf,

  /// Inference endpoint base URL for this run (overrides the stored setting).
  #[arg(long, env = "AUTOPILOT_OLLAMA_URL")]
  ollama_url: Option<String>,

  /// Model name for this run (overrides the stored setting).
  #[arg(long, env = "AUTOPILOT_MODEL")]
  model: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Parse a plain-text résumé and store it as the current one.
  Upload { file: PathBuf },

  /// Import job listings from a JSON array, scoring them against the résumé.
  ImportJobs { file: PathBuf },

  /// List stored job listings.
  Jobs {
    #[arg(long)]
    limit: Option<usize>,
    /// Skip the minimum-score and keyword filter.
    #[arg(long)]
    all:   bool,
  },

  /// Draft a cover letter and record an application for a listing.
  Apply { job_id: String },

  /// List applications.
  Applications {
    #[arg(long, value_parser = parse_status)]
    status:  Option<ApplicationStatus>,
    /// Print cover letters too.
    #[arg(long)]
    letters: bool,
  },

  /// Move an application to a new status.
  SetStatus {
    id:     String,
    #[arg(value_parser = parse_status)]
    status: ApplicationStatus,
  },

  /// Résumé, job, application and interview counts.
  Overview,

  /// Show or change the stored settings.
  Settings {
    #[command(subcommand)]
    action: SettingsAction,
  },

  /// Check the inference endpoint and list its models.
  Ping,

  /// Delete every stored record and the settings. Irreversible.
  Wipe {
    /// Confirm the deletion.
    #[arg(long)]
    yes: bool,
  },
}

#[derive(Subcommand, Debug)]
enum SettingsAction {
  Show,
  Set {
    #[arg(long)]
    ollama_url: Option<String>,
    #[arg(long)]
    model:      Option<String>,
    #[arg(long)]
    auto_apply: Option<bool>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    min_score:  Option<u8>,
    /// Comma-separated keyword filter; pass "" to clear.
    #[arg(long)]
    keywords:   Option<String>,
    #[arg(long)]
    language:   Option<String>,
  },
}

fn parse_status(s: &str) -> Result<ApplicationStatus, String> {
  ApplicationStatus::parse(s).map_err(|e| e.to_string())
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let app_cfg = AppConfig::load(&cli.config)?;

  let store = SqliteStore::open(&app_cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", app_cfg.store_path))?;
  let settings = store.load_settings().await?.unwrap_or_default();

  // Flags override stored settings for this run only.
  let mut endpoint_cfg = OllamaConfig::from(&settings);
  if let Some(url) = cli.ollama_url {
    endpoint_cfg.base_url = url;
  }
  if let Some(model) = cli.model {
    endpoint_cfg.model = model;
  }
  let base_url = endpoint_cfg.base_url.clone();
  let client = OllamaClient::new(endpoint_cfg)?;
  let workflow = Workflow::new(store, Assistant::new(client));

  run(cli.command, &workflow, settings)
    .await
    .map_err(|e| explain_unavailable(e, &base_url))
}

/// Point at the endpoint when a command failed because inference was
/// unavailable.
fn explain_unavailable(err: anyhow::Error, base_url: &str) -> anyhow::Error {
  let unavailable = err
    .chain()
    .filter_map(|cause| cause.downcast_ref::<autopilot_inference::Error>())
    .any(autopilot_inference::Error::is_unavailable);
  if unavailable {
    err.context(format!(
      "inference unavailable at {base_url}; is Ollama running? (`autopilot ping`)"
    ))
  } else {
    err
  }
}

async fn run(
  command: Command,
  workflow: &Workflow<SqliteStore, OllamaClient>,
  settings: Settings,
) -> Result<()> {
  match command {
    Command::Upload { file } => {
      let text = std::fs::read_to_string(&file)
        .with_context(|| format!("reading résumé {}", file.display()))?;
      let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

      let resume = workflow.upload_resume(&file_name, &text).await?;
      let p = &resume.profile;
      println!("Stored résumé #{} ({})", resume.resume_id, resume.file_name);
      println!("  name:       {}", p.personal_info.name);
      println!("  skills:     {}", p.skills.join(", "));
      println!("  experience: {} entries", p.experience.len());
      println!("  education:  {} entries", p.education.len());
    }

    Command::ImportJobs { file } => {
      let raw = std::fs::read_to_string(&file)
        .with_context(|| format!("reading listings {}", file.display()))?;
      let jobs: Vec<JobListing> =
        serde_json::from_str(&raw).context("parsing job listings")?;

      let report = workflow.import_jobs(jobs, &settings).await?;
      println!("Loaded {} job listings", report.stored);
      for app in &report.auto_applied {
        println!("Auto-applied to {} ({})", app.job_id, app.id);
      }
    }

    Command::Jobs { limit, all } => {
      let filter = (!all).then_some(&settings);
      let jobs = workflow.list_jobs(limit, filter).await?;
      if jobs.is_empty() {
        println!("No jobs found. Import some with `autopilot import-jobs <file>`.");
      }
      for job in &jobs {
        print_job(job);
      }
    }

    Command::Apply { job_id } => {
      let app = workflow.apply(&job_id).await?;
      println!("Application {} prepared for {}", app.id, app.job_id);
      println!();
      println!("{}", app.cover_letter);
    }

    Command::Applications { status, letters } => {
      let apps = match status {
        Some(s) => workflow.store().applications_by_status(s).await?,
        None => workflow.store().get_applications().await?,
      };
      if apps.is_empty() {
        println!("No applications yet.");
      }
      for app in &apps {
        print_application(app, letters);
      }
    }

    Command::SetStatus { id, status } => {
      let app = workflow.set_status(&id, status).await?;
      println!("{} is now {} (updated {})", app.id, app.status, app.last_updated);
    }

    Command::Overview => {
      let o = workflow.overview().await?;
      let cv = if o.resume_uploaded { "uploaded" } else { "not uploaded" };
      println!("CV:           {cv}");
      println!("Jobs:         {}", o.total_jobs);
      println!("Applications: {}", o.applications);
      println!("Interviews:   {}", o.interviews);
    }

    Command::Settings { action } => match action {
      SettingsAction::Show => print_settings(&settings),
      SettingsAction::Set {
        ollama_url,
        model,
        auto_apply,
        min_score,
        keywords,
        language,
      } => {
        let mut updated = settings;
        if let Some(v) = ollama_url {
          updated.ollama_url = v;
        }
        if let Some(v) = model {
          updated.ollama_model = v;
        }
        if let Some(v) = auto_apply {
          updated.auto_apply = v;
        }
        if let Some(v) = min_score {
          updated.min_match_score = v;
        }
        if let Some(v) = keywords {
          updated.job_search_keywords = v;
        }
        if let Some(v) = language {
          updated.language = v;
        }
        workflow.store().save_settings(&updated).await?;
        println!("Settings saved.");
        print_settings(&updated);
      }
    },

    Command::Ping => {
      let endpoint = workflow.assistant().endpoint();
      let models = endpoint
        .list_models()
        .await
        .with_context(|| format!("endpoint {} is not reachable", endpoint.config().base_url))?;
      println!("Connected to {}", endpoint.config().base_url);
      for m in models {
        println!("  {m}");
      }
    }

    Command::Wipe { yes } => {
      if !yes {
        bail!("this deletes every résumé, job, application and setting; re-run with --yes");
      }
      workflow.store().wipe().await?;
      println!("All data cleared.");
    }
  }

  Ok(())
}

// ─── Output ───────────────────────────────────────────────────────────────────

fn print_job(job: &JobListing) {
  let score = job
    .match_score
    .map(|s| format!("{s} match"))
    .unwrap_or_else(|| "unscored".to_owned());
  println!("{}  {} at {} ({})", job.id, job.title, job.company, job.location);
  println!("    {} · {} · {}", job.source, score, job.url);
}

fn print_application(app: &Application, letter: bool) {
  println!(
    "{}  job {}  [{}]  applied {}",
    app.id,
    app.job_id,
    app.status,
    app.applied_date.format("%Y-%m-%d"),
  );
  if letter {
    println!("{}\n", app.cover_letter);
  }
}

fn print_settings(s: &Settings) {
  println!("ollama_url:      {}", s.ollama_url);
  println!("model:           {}", s.ollama_model);
  println!("auto_apply:      {}", s.auto_apply);
  println!("min_match_score: {}", s.min_match_score);
  println!("keywords:        {}", s.job_search_keywords);
  println!("language:        {}", s.language);
}
