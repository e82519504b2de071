//! Core types and trait definitions for the job-application autopilot.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! store backend and the inference client both depend on it, which keeps the
//! record shapes they exchange statically checked.

pub mod application;
pub mod error;
pub mod interview;
pub mod job;
pub mod matching;
pub mod resume;
pub mod settings;
pub mod store;

pub use error::{Error, Result};
