//! Application configuration, loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) is valid.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use starfall_sim::SimConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sim: SimConfig,
    pub storage: StorageConfig,
    pub autoplay: AutoplayConfig,
    /// How long the headless run lasts, in wall-clock seconds.
    pub run_secs: f32,
    /// Seconds between status log lines.
    pub status_interval_secs: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            storage: StorageConfig::default(),
            autoplay: AutoplayConfig::default(),
            run_secs: 30.0,
            status_interval_secs: 5.0,
        }
    }
}

/// Where progress is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub save_dir: PathBuf,
    /// Directory standing in for the remote store. `None` disables remote sync.
    pub remote_dir: Option<PathBuf>,
    pub slot: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from("saves"),
            remote_dir: None,
            slot: "progress".into(),
        }
    }
}

/// Scripted input for unattended runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoplayConfig {
    /// Seconds between aimed shots. Zero disables them.
    pub shot_interval_secs: f32,
    pub shot_power: f32,
    /// Fire the special weapon whenever a status line is logged.
    pub fire_special: bool,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            shot_interval_secs: 1.5,
            shot_power: 0.6,
            fire_special: true,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid configuration")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_config_overrides() {
        let config = AppConfig::from_toml_str(
            r#"
            run_secs = 5.0

            [sim]
            seed = 7
            intensity = 3.0

            [storage]
            save_dir = "/tmp/starfall"
            remote_dir = "/tmp/starfall-remote"
            "#,
        )
        .unwrap();
        assert_eq!(config.run_secs, 5.0);
        assert_eq!(config.sim.seed, 7);
        assert_eq!(config.sim.intensity, 3.0);
        assert_eq!(config.sim.pool_capacity, SimConfig::default().pool_capacity);
        assert_eq!(config.storage.remote_dir, Some(PathBuf::from("/tmp/starfall-remote")));
        assert_eq!(config.storage.slot, "progress");
        assert_eq!(config.autoplay, AutoplayConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "status_interval_secs = 2.0").unwrap();
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.status_interval_secs, 2.0);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        assert!(AppConfig::from_toml_str("run_secs = \"soon\"").is_err());
    }
}
