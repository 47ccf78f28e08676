//! # Terminal Configuration
//!
//! Where the terminal keeps its documents and reports, and how report
//! timestamps are localised.
//!
//! ## Load Order (later overrides earlier)
//! ```text
//! ┌───────────────┐     ┌────────────────────┐     ┌──────────────────────┐
//! │   Defaults    │ ──► │  terminal.toml     │ ──► │  BARISTA_* env vars  │
//! │ (ProjectDirs) │     │  (config dir)      │     │                      │
//! └───────────────┘     └────────────────────┘     └──────────────────────┘
//! ```
//!
//! ## Example
//! ```toml
//! [storage]
//! data_dir = "/var/lib/barista"
//! report_dir = "/var/lib/barista/reports"
//!
//! [report]
//! utc_offset_minutes = 480
//!
//! [terminal]
//! name = "Front Counter"
//! ```

use std::path::{Path, PathBuf};

use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};

/// Largest UTC offset accepted, in minutes (UTC+14 / UTC-14).
pub const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

const CONFIG_FILE_NAME: &str = "terminal.toml";

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StorageConfig {
    /// Directory holding inventory, catalog, receipts and shift documents.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory end-of-shift reports are written to.
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            data_dir: default_data_dir(),
            report_dir: default_report_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "barista", "pos")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("barista-data"))
}

fn default_report_dir() -> PathBuf {
    default_data_dir().join("reports")
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReportSettings {
    /// Offset applied to report headers, file names and receipt dates.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TerminalSettings {
    #[serde(default = "default_terminal_name")]
    pub name: String,
}

impl Default for TerminalSettings {
    fn default() -> Self {
        TerminalSettings {
            name: default_terminal_name(),
        }
    }
}

fn default_terminal_name() -> String {
    "Barista Terminal".to_string()
}

// =============================================================================
// TerminalConfig
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TerminalConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub report: ReportSettings,

    #[serde(default)]
    pub terminal: TerminalSettings,
}

impl TerminalConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// A missing file at the default location is not an error. A path the
    /// operator named explicitly must exist, and a malformed file is always
    /// an error.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        match config_path {
            Some(path) => {
                info!(?path, "Loading terminal config from file");
                config = Self::read_file(&path)?;
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => {
                    info!(?path, "Loading terminal config from file");
                    config = Self::read_file(&path)?;
                }
                path => debug!(?path, "No config file, using defaults"),
            },
        }

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.storage.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("storage.data_dir must not be empty".into()));
        }
        if self.storage.report_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("storage.report_dir must not be empty".into()));
        }
        if self.report.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(ConfigError::Invalid(format!(
                "report.utc_offset_minutes must be within ±{}, got {}",
                MAX_UTC_OFFSET_MINUTES, self.report.utc_offset_minutes
            )));
        }
        if self.terminal.name.trim().is_empty() {
            return Err(ConfigError::Invalid("terminal.name must not be empty".into()));
        }
        Ok(())
    }

    /// Offset used when rendering reports. Falls back to UTC for an offset
    /// that `validate` would reject.
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.report.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }

    /// Applies `BARISTA_*` overrides read through `lookup`.
    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("BARISTA_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data dir from environment");
            self.storage.data_dir = PathBuf::from(dir);
        }

        if let Some(dir) = lookup("BARISTA_REPORT_DIR") {
            debug!(report_dir = %dir, "Overriding report dir from environment");
            self.storage.report_dir = PathBuf::from(dir);
        }

        if let Some(offset) = lookup("BARISTA_UTC_OFFSET_MINUTES") {
            match offset.trim().parse::<i32>() {
                Ok(minutes) => self.report.utc_offset_minutes = minutes,
                Err(_) => warn!(value = %offset, "Ignoring non-numeric BARISTA_UTC_OFFSET_MINUTES"),
            }
        }

        if let Some(name) = lookup("BARISTA_TERMINAL_NAME") {
            self.terminal.name = name;
        }
    }

    fn read_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "barista", "pos")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = TerminalConfig::default();
        config.validate().unwrap();
        assert_eq!(config.report.utc_offset_minutes, 0);
        assert_eq!(config.utc_offset(), Utc.fix());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: TerminalConfig = toml::from_str(
            r#"
            [report]
            utc_offset_minutes = 480
            "#,
        )
        .unwrap();

        assert_eq!(config.report.utc_offset_minutes, 480);
        assert_eq!(config.storage, StorageConfig::default());
        assert_eq!(config.terminal.name, "Barista Terminal");
        assert_eq!(config.utc_offset().local_minus_utc(), 8 * 3600);
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = TerminalConfig::default();
        config.apply_env_overrides(env(&[
            ("BARISTA_DATA_DIR", "/tmp/barista"),
            ("BARISTA_UTC_OFFSET_MINUTES", "-300"),
            ("BARISTA_TERMINAL_NAME", "Kiosk"),
        ]));

        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/barista"));
        assert_eq!(config.report.utc_offset_minutes, -300);
        assert_eq!(config.terminal.name, "Kiosk");
    }

    #[test]
    fn test_bad_env_offset_is_ignored() {
        let mut config = TerminalConfig::default();
        config.apply_env_overrides(env(&[("BARISTA_UTC_OFFSET_MINUTES", "eight")]));
        assert_eq!(config.report.utc_offset_minutes, 0);
    }

    #[test]
    fn test_validate_rejects_out_of_range_offset() {
        let mut config = TerminalConfig::default();
        config.report.utc_offset_minutes = 15 * 60;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.report.utc_offset_minutes = -MAX_UTC_OFFSET_MINUTES;
        config.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_empty_paths() {
        let mut config = TerminalConfig::default();
        config.storage.report_dir = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("terminal.toml");
        std::fs::write(
            &path,
            "[storage]\ndata_dir = \"/srv/barista\"\nreport_dir = \"/srv/barista/out\"\n",
        )
        .unwrap();

        let loaded = TerminalConfig::read_file(&path).unwrap();

        assert_eq!(loaded.storage.data_dir, PathBuf::from("/srv/barista"));
        assert_eq!(loaded.storage.report_dir, PathBuf::from("/srv/barista/out"));
        assert_eq!(loaded.terminal, TerminalSettings::default());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("typo-terminal.toml");

        let err = TerminalConfig::load(Some(path.clone())).unwrap_err();

        match err {
            ConfigError::Io { path: reported, source } => {
                assert_eq!(reported, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("terminal.toml");
        std::fs::write(&path, "[report\nutc_offset_minutes = ").unwrap();

        assert!(matches!(
            TerminalConfig::read_file(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
