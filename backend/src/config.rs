//! # Application Configuration
//!
//! Settings live in a YAML file, by default `config.yaml` in the data
//! directory. A missing file is created with defaults on first run.
//!
//! ```yaml
//! data_directory: "/home/me/Documents/Pocket Buddy"
//! bind_address: "127.0.0.1:3000"
//! advice:
//!   model: "gemini-2.5-flash"
//!   endpoint: "https://generativelanguage.googleapis.com/v1beta"
//!   timeout_secs: null
//! ```
//!
//! Environment overrides:
//!
//! - `POCKET_BUDDY_CONFIG` - path of the config file
//! - `POCKET_BUDDY_DATA_DIR` - data directory, wins over the file
//! - `GEMINI_API_KEY` (or `API_KEY`) - advice API key, never written to disk

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::advice_service::{DEFAULT_ENDPOINT, DEFAULT_MODEL};

pub const CONFIG_FILE_NAME: &str = "config.yaml";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdviceConfig {
    pub model: String,
    pub endpoint: String,
    /// No client-side timeout when unset
    pub timeout_secs: Option<u64>,
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: None,
        }
    }
}

impl AdviceConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_directory: PathBuf,
    pub bind_address: String,
    pub advice: AdviceConfig,
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_directory: default_data_directory(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            advice: AdviceConfig::default(),
            api_key: None,
        }
    }
}

/// Values read from the process environment
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub config_path: Option<PathBuf>,
    pub data_directory: Option<PathBuf>,
    pub api_key: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        let non_empty = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            config_path: non_empty("POCKET_BUDDY_CONFIG").map(PathBuf::from),
            data_directory: non_empty("POCKET_BUDDY_DATA_DIR").map(|d| expand_home(&d)),
            api_key: non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY")),
        }
    }
}

impl AppConfig {
    /// Load using the process environment
    pub fn load() -> Result<Self> {
        Self::load_with(EnvOverrides::from_env())
    }

    pub fn load_with(overrides: EnvOverrides) -> Result<Self> {
        let data_directory = overrides.data_directory.clone().unwrap_or_else(default_data_directory);
        let config_path = overrides
            .config_path
            .clone()
            .unwrap_or_else(|| data_directory.join(CONFIG_FILE_NAME));

        let mut config = if config_path.exists() {
            let yaml_content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config {}", config_path.display()))?;
            let mut config: AppConfig = serde_yaml::from_str(&yaml_content)
                .with_context(|| format!("Invalid config {}", config_path.display()))?;
            config.data_directory = expand_home(&config.data_directory.to_string_lossy());
            debug!("Loaded config from {}", config_path.display());
            config
        } else {
            let config = AppConfig {
                data_directory: data_directory.clone(),
                ..AppConfig::default()
            };
            config.save(&config_path)?;
            info!("Created default config at {}", config_path.display());
            config
        };

        if let Some(dir) = overrides.data_directory {
            config.data_directory = dir;
        }
        config.api_key = overrides.api_key;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let yaml_content = serde_yaml::to_string(self)?;

        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, path)?;
        Ok(())
    }
}

/// `~/Documents/Pocket Buddy`, or `./data` when no home directory is known
pub fn default_data_directory() -> PathBuf {
    match dirs::document_dir().or_else(|| dirs::home_dir().map(|home| home.join("Documents"))) {
        Some(documents) => documents.join("Pocket Buddy"),
        None => PathBuf::from("data"),
    }
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn overrides_for(temp_dir: &TempDir) -> EnvOverrides {
        EnvOverrides {
            config_path: None,
            data_directory: Some(temp_dir.path().join("data")),
            api_key: None,
        }
    }

    #[test]
    fn test_first_run_writes_defaults() {
        let temp_dir = TempDir::new().unwrap();

        let config = AppConfig::load_with(overrides_for(&temp_dir)).unwrap();

        assert_eq!(config.data_directory, temp_dir.path().join("data"));
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.advice, AdviceConfig::default());

        let written = fs::read_to_string(temp_dir.path().join("data").join(CONFIG_FILE_NAME)).unwrap();
        assert!(written.contains("127.0.0.1:3000"));
        assert!(written.contains("gemini-2.5-flash"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("custom.yaml");
        fs::write(
            &config_path,
            "bind_address: \"0.0.0.0:8080\"\nadvice:\n  timeout_secs: 20\n",
        )
        .unwrap();

        let config = AppConfig::load_with(EnvOverrides {
            config_path: Some(config_path),
            data_directory: None,
            api_key: Some("secret".to_string()),
        })
        .unwrap();

        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert_eq!(config.advice.model, DEFAULT_MODEL);
        assert_eq!(config.advice.timeout(), Some(Duration::from_secs(20)));
        assert_eq!(config.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_env_data_directory_wins_over_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "data_directory: /somewhere/else\n").unwrap();

        let config = AppConfig::load_with(EnvOverrides {
            config_path: Some(config_path),
            data_directory: Some(temp_dir.path().join("override")),
            api_key: None,
        })
        .unwrap();

        assert_eq!(config.data_directory, temp_dir.path().join("override"));
    }

    #[test]
    fn test_api_key_is_never_written() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        let config = AppConfig {
            api_key: Some("secret".to_string()),
            ..AppConfig::default()
        };

        config.save(&path).unwrap();

        assert!(!fs::read_to_string(&path).unwrap().contains("secret"));
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "bind_address: [unclosed\n").unwrap();

        let result = AppConfig::load_with(EnvOverrides {
            config_path: Some(config_path),
            ..EnvOverrides::default()
        });

        assert!(result.is_err());
    }
}
