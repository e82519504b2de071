//! SQLite backend for the autopilot store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. That thread also serialises every call,
//! which is what gives per-handle read-after-write ordering.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use schema::SCHEMA_VERSION;
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
