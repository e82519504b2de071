//! User-facing settings, persisted as one blob beside the record collections.

use serde::{Deserialize, Serialize};

use crate::job::JobListing;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama2";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
  /// Base URL of the inference endpoint.
  pub ollama_url:          String,
  pub ollama_model:        String,
  /// Apply automatically to admitted listings at or above `min_match_score`.
  pub auto_apply:          bool,
  pub min_match_score:     u8,
  /// Comma-separated keyword filter.
  pub job_search_keywords: String,
  pub language:            String,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      ollama_url:          DEFAULT_OLLAMA_URL.to_owned(),
      ollama_model:        DEFAULT_OLLAMA_MODEL.to_owned(),
      auto_apply:          false,
      min_match_score:     70,
      job_search_keywords: String::new(),
      language:            "de".to_owned(),
    }
  }
}

impl Settings {
  /// The configured keywords, trimmed, lowercased, blanks dropped.
  pub fn keywords(&self) -> Vec<String> {
    self
      .job_search_keywords
      .split(',')
      .map(|k| k.trim().to_lowercase())
      .filter(|k| !k.is_empty())
      .collect()
  }

  /// Whether `job` passes the score threshold and keyword filter.
  ///
  /// Unscored listings pass the threshold. With no keywords configured every
  /// listing passes the keyword filter.
  pub fn admits(&self, job: &JobListing) -> bool {
    let score_ok = job
      .match_score
      .is_none_or(|s| s.value() >= self.min_match_score);
    if !score_ok {
      return false;
    }

    let keywords = self.keywords();
    if keywords.is_empty() {
      return true;
    }

    let haystacks: Vec<String> = [&job.title, &job.company, &job.description]
      .into_iter()
      .chain(job.requirements.iter())
      .map(|s| s.to_lowercase())
      .collect();

    keywords
      .iter()
      .any(|k| haystacks.iter().any(|h| h.contains(k.as_str())))
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;
  use crate::job::{JobSource, MatchScore};

  fn job(score: Option<i64>) -> JobListing {
    JobListing {
      id:           "job_1".into(),
      title:        "Senior Rust Engineer".into(),
      company:      "Acme".into(),
      location:     "Remote".into(),
      source:       JobSource::Indeed,
      url:          "https://example.com/1".into(),
      description:  "Build storage engines.".into(),
      requirements: vec!["Tokio".into()],
      match_score:  score.map(MatchScore::clamped),
      scraped_date: Utc::now(),
    }
  }

  #[test]
  fn threshold_filters_low_scores() {
    let settings = Settings::default();
    assert!(settings.admits(&job(Some(70))));
    assert!(!settings.admits(&job(Some(69))));
    assert!(settings.admits(&job(None)));
  }

  #[test]
  fn keywords_match_any_field() {
    let settings = Settings {
      min_match_score: 0,
      job_search_keywords: " python , tokio ".into(),
      ..Default::default()
    };
    assert_eq!(settings.keywords(), ["python", "tokio"]);
    assert!(settings.admits(&job(Some(10))));

    let settings = Settings { job_search_keywords: "Java".into(), ..settings };
    assert!(!settings.admits(&job(Some(10))));
  }

  #[test]
  fn partial_blob_takes_defaults() {
    let settings: Settings =
      serde_json::from_str(r#"{"ollamaModel": "mistral", "autoApply": true}"#).unwrap();
    assert_eq!(settings.ollama_model, "mistral");
    assert!(settings.auto_apply);
    assert_eq!(settings.ollama_url, DEFAULT_OLLAMA_URL);
    assert_eq!(settings.min_match_score, 70);
  }
}
