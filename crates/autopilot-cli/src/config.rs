//! Bootstrap configuration: where the store lives.
//!
//! User-facing settings (endpoint, model, filters) are kept in the store
//! itself; this file only locates it.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

pub const DEFAULT_STORE_PATH: &str = "~/.local/share/jobautopilot/autopilot.db";

/// Deserialised from the optional TOML file and `AUTOPILOT_*` variables.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
  pub store_path: PathBuf,
}

impl AppConfig {
  /// Layer `file` (if it exists) under the environment.
  pub fn load(file: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .set_default("store_path", DEFAULT_STORE_PATH)?
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("AUTOPILOT"))
      .build()
      .context("failed to read config file")?;

    let mut cfg: AppConfig = settings
      .try_deserialize()
      .context("failed to deserialise AppConfig")?;
    cfg.store_path = expand_tilde(&cfg.store_path);
    Ok(cfg)
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn expand_tilde_leaves_other_paths_alone() {
    assert_eq!(expand_tilde(Path::new("/var/db/a.db")), PathBuf::from("/var/db/a.db"));
    assert_eq!(expand_tilde(Path::new("rel/a.db")), PathBuf::from("rel/a.db"));
  }

  #[test]
  fn expand_tilde_uses_home() {
    if let Ok(home) = std::env::var("HOME") {
      assert_eq!(expand_tilde(Path::new("~/x/a.db")), PathBuf::from(home).join("x/a.db"));
    }
  }

  #[test]
  fn missing_file_falls_back_to_default() {
    let cfg = AppConfig::load(Path::new("/nonexistent/autopilot.toml")).unwrap();
    assert!(cfg.store_path.ends_with(".local/share/jobautopilot/autopilot.db"));
  }
}
