//! SQL schema for the autopilot SQLite store.
//!
//! The version lives in `PRAGMA user_version`. A database below
//! [`SCHEMA_VERSION`] gets [`SCHEMA`] applied, which only adds what is
//! missing, and is then stamped.

pub const SCHEMA_VERSION: i64 = 1;

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Insertion order is the resume_id; AUTOINCREMENT never reuses ids.
CREATE TABLE IF NOT EXISTS resumes (
    resume_id    INTEGER PRIMARY KEY AUTOINCREMENT,
    file_name    TEXT NOT NULL,
    upload_date  TEXT NOT NULL,   -- RFC 3339 UTC
    profile_json TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS jobs (
    job_id       TEXT PRIMARY KEY,   -- caller-supplied; writes are upserts
    title        TEXT NOT NULL,
    company      TEXT NOT NULL,
    location     TEXT NOT NULL,
    source       TEXT NOT NULL,      -- 'linkedin' | 'indeed' | 'stepstone' | 'xing'
    url          TEXT NOT NULL,
    description  TEXT NOT NULL,
    requirements TEXT NOT NULL DEFAULT '[]',
    match_score  INTEGER CHECK (match_score BETWEEN 0 AND 100),
    scraped_date TEXT NOT NULL
);

-- job_id is a reference by value only; it is never checked against jobs.
CREATE TABLE IF NOT EXISTS applications (
    seq            INTEGER PRIMARY KEY AUTOINCREMENT,
    application_id TEXT NOT NULL UNIQUE,
    job_id         TEXT NOT NULL,
    status         TEXT NOT NULL CHECK (status IN
                     ('pending', 'sent', 'interviewing', 'rejected', 'accepted')),
    cover_letter   TEXT NOT NULL,
    customized_cv  TEXT NOT NULL,
    applied_date   TEXT NOT NULL,
    last_updated   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS interviews (
    interview_id   TEXT PRIMARY KEY,
    application_id TEXT NOT NULL,
    scheduled_date TEXT,
    status         TEXT NOT NULL DEFAULT 'pending',
    notes          TEXT
);

-- The settings blob, kept apart from the record collections.
CREATE TABLE IF NOT EXISTS settings (
    key        TEXT PRIMARY KEY,
    value_json TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS jobs_match_score_idx     ON jobs(match_score);
CREATE INDEX IF NOT EXISTS applications_job_idx     ON applications(job_id);
CREATE INDEX IF NOT EXISTS applications_status_idx  ON applications(status);
";

/// Drops everything [`SCHEMA`] creates and resets the version so the next
/// initialisation starts from scratch.
pub const WIPE: &str = "
DROP TABLE IF EXISTS resumes;
DROP TABLE IF EXISTS jobs;
DROP TABLE IF EXISTS applications;
DROP TABLE IF EXISTS interviews;
DROP TABLE IF EXISTS settings;
PRAGMA user_version = 0;
";
