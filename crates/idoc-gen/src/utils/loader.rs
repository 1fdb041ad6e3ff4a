use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;

/// A JSON input file read into memory, parsed on demand.
pub struct JsonLoader {
  path: PathBuf,
  content: String,
}

impl JsonLoader {
  pub async fn open(path: &Path) -> anyhow::Result<Self> {
    let content = tokio::fs::read_to_string(path)
      .await
      .with_context(|| format!("failed to read {}", path.display()))?;

    Ok(Self {
      path: path.to_path_buf(),
      content,
    })
  }

  pub fn parse<T: DeserializeOwned>(&self) -> anyhow::Result<T> {
    serde_json::from_str(&self.content).with_context(|| format!("failed to parse {}", self.path.display()))
  }
}
