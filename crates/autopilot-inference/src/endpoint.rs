//! The chat-completion seam.

use std::future::Future;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  System,
  User,
  Assistant,
}

/// One role-tagged message in a chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
  pub role:    Role,
  pub content: String,
}

impl ChatMessage {
  pub fn system(content: impl Into<String>) -> Self {
    Self { role: Role::System, content: content.into() }
  }

  pub fn user(content: impl Into<String>) -> Self {
    Self { role: Role::User, content: content.into() }
  }
}

/// Anything that can answer a list of chat messages with one reply.
pub trait ChatEndpoint: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Send `messages` and return the content of the single response message.
  fn chat(
    &self,
    messages: Vec<ChatMessage>,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + '_;
}
