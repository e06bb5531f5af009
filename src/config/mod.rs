use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::geometry::{AreaMethod, AreaUnit};

fn default_precision() -> usize {
    2
}
fn default_verbose() -> bool {
    false
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub unit: AreaUnit,
    #[serde(default)]
    pub method: AreaMethod,
    #[serde(default = "default_precision")]
    pub precision: usize,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default)]
    pub api: Option<ApiConfig>,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_backoff_secs() -> u64 {
    2
}

/// Connection settings for the land records API
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token sent with every request
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Retries after the first attempt on 429/502/503/504
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Wait before retry `n` is `n * retry_backoff_secs`
    #[serde(default = "default_retry_backoff_secs")]
    pub retry_backoff_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_backoff_secs: default_retry_backoff_secs(),
        }
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            unit: AreaUnit::default(),
            method: AreaMethod::default(),
            precision: default_precision(),
            verbose: default_verbose(),
            api: None,
        }
    }
}

impl FileConfig {
    /// Load the first config file found in the usual locations
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        // Runs before the log subscriber is installed
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }

    /// Load an explicitly named config file
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("parcel-area.toml"));
    paths.push(PathBuf::from(".parcel-area.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("parcel-area").join("config.toml"));
        paths.push(config_dir.join("parcel-area.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".parcel-area.toml"));
    }

    paths
}
