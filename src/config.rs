use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::DEFAULT_ARTICLE_LIMIT;

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "witness-dashboard.json";

/// Dashboard settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DashboardConfig {
    /// Article table opened at startup.
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,
    /// How many articles to list under the charts.
    #[serde(default = "default_article_limit")]
    pub article_limit: usize,
    #[serde(default = "default_window_title")]
    pub window_title: String,
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("ICE_Chicago_REAL_dataset.csv")
}

fn default_article_limit() -> usize {
    DEFAULT_ARTICLE_LIMIT
}

fn default_window_title() -> String {
    "Witness Emotion Dashboard – Real Data".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            article_limit: default_article_limit(),
            window_title: default_window_title(),
        }
    }
}

impl DashboardConfig {
    /// Read settings from `path`, falling back to defaults when the file does
    /// not exist. A file that exists but does not parse is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply command-line overrides: the first positional argument replaces
    /// the dataset path. `args` excludes the program name.
    pub fn with_args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        if let Some(path) = args.into_iter().next() {
            self.dataset_path = PathBuf::from(path);
        }
        self
    }
}
