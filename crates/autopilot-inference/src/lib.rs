//! Inference client for the job-application autopilot.
//!
//! All "intelligence" is delegated to an external chat-completion endpoint
//! (an Ollama server by default). [`Assistant`] turns the three domain
//! requests into chat calls and interprets the replies; [`ChatEndpoint`] is
//! the seam where the HTTP client ([`OllamaClient`]) or a test double plugs in.
//!
//! There is no retry and no request timeout: a failed call is reported once,
//! and a hung endpoint hangs the caller.

pub mod assistant;
pub mod endpoint;
pub mod error;
pub mod ollama;
mod prompts;

pub use assistant::Assistant;
pub use endpoint::{ChatEndpoint, ChatMessage, Role};
pub use error::{Error, MalformedOutput, Result};
pub use ollama::{OllamaClient, OllamaConfig};
