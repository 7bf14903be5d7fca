use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

pub const TAXONOMY_ENV: &str = "RCA_REVIEW_TAXONOMY";
pub const LOG_JSON_ENV: &str = "RCA_REVIEW_LOG_JSON";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Replaces the bundled root cause taxonomy.
    pub taxonomy_path: Option<PathBuf>,
    /// Folder the export dialog opens in.
    pub export_dir: Option<PathBuf>,
    pub log_json: bool,
}

impl AppConfig {
    /// Reads `config.json` from the platform config dir when present, then
    /// applies environment overrides.
    pub fn load() -> Result<Self> {
        let config = match default_config_path() {
            Ok(path) => Self::load_from(&path)?,
            Err(_) => Self::default(),
        };
        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(TAXONOMY_ENV).filter(|v| !v.trim().is_empty()) {
            self.taxonomy_path = Some(PathBuf::from(path));
        }
        if let Some(flag) = lookup(LOG_JSON_ENV) {
            self.log_json = matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
        self
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "rcareview", "rca-review")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.json"))
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

pub fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(project_dirs()?.data_local_dir())
}

pub fn default_export_file_name() -> String {
    format!("rca_review_{}.csv", chrono::Local::now().format("%m%d"))
}
