//! Async HTTP client for an Ollama-compatible chat endpoint.

use autopilot_core::settings::{Settings, DEFAULT_OLLAMA_MODEL, DEFAULT_OLLAMA_URL};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
  endpoint::{ChatEndpoint, ChatMessage},
  Error, Result,
};

/// Where the endpoint lives and which model to ask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OllamaConfig {
  pub base_url: String,
  pub model:    String,
}

impl Default for OllamaConfig {
  fn default() -> Self {
    Self {
      base_url: DEFAULT_OLLAMA_URL.to_owned(),
      model:    DEFAULT_OLLAMA_MODEL.to_owned(),
    }
  }
}

impl From<&Settings> for OllamaConfig {
  fn from(settings: &Settings) -> Self {
    Self {
      base_url: settings.ollama_url.clone(),
      model:    settings.ollama_model.clone(),
    }
  }
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
  model:    &'a str,
  messages: &'a [ChatMessage],
  stream:   bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
  message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
  content: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
  #[serde(default)]
  models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
  name: String,
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// HTTP client for `POST {base}/api/chat`.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based. No request
/// timeout is configured.
#[derive(Clone)]
pub struct OllamaClient {
  client: Client,
  config: OllamaConfig,
}

impl OllamaClient {
  pub fn new(config: OllamaConfig) -> Result<Self> {
    let client = Client::builder().build().map_err(Error::Client)?;
    Ok(Self { client, config })
  }

  pub fn config(&self) -> &OllamaConfig { &self.config }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  /// `GET /api/tags`: the models the server has pulled. Doubles as a
  /// connectivity check.
  pub async fn list_models(&self) -> Result<Vec<String>> {
    let resp = self.client.get(self.url("/tags")).send().await?;

    let status = resp.status();
    if !status.is_success() {
      let body = resp.text().await.unwrap_or_default();
      warn!(%status, "GET /api/tags failed");
      return Err(Error::Status { status: status.as_u16(), body });
    }

    let tags: TagsResponse = resp.json().await.map_err(Error::Response)?;
    Ok(tags.models.into_iter().map(|m| m.name).collect())
  }
}

impl ChatEndpoint for OllamaClient {
  type Error = Error;

  async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String> {
    let request = ChatRequest {
      model:    &self.config.model,
      messages: &messages,
      stream:   false,
    };

    debug!(model = %self.config.model, messages = messages.len(), "POST /api/chat");
    let resp = self.client.post(self.url("/chat")).json(&request).send().await?;

    let status = resp.status();
    if !status.is_success() {
      let body = resp.text().await.unwrap_or_default();
      warn!(%status, "POST /api/chat failed");
      return Err(Error::Status { status: status.as_u16(), body });
    }

    let reply: ChatResponse = resp.json().await.map_err(Error::Response)?;
    debug!(chars = reply.message.content.len(), "chat reply received");
    Ok(reply.message.content)
  }
}
