//! Configuration system
//!
//! Centralized configuration with runtime defaults, optional TOML file
//! loading, environment variable overrides, and validation. The
//! reconciliation tunables live here so they are named configuration
//! rather than ambient literals.

use crate::reconcile::ReconcileConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Reconciliation tunables
    pub reconcile: ReconcileConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reconcile: ReconcileConfig::default(),
            logging: LoggingConfig {
                level: "ERROR".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from file, environment, and defaults
    pub fn load() -> Result<Self> {
        let mut config = Config::default();

        let config_paths = [
            PathBuf::from("storage-audit.toml"),
            PathBuf::from(".storage-audit.toml"),
            dirs::config_dir()
                .map(|d| d.join("storage-audit").join("config.toml"))
                .unwrap_or_default(),
        ];

        for path in &config_paths {
            if path.exists() {
                info!(config_file = %path.display(), "Loading configuration from file");
                config = Self::load_from_file(path)?;
                break;
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = env::var("LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = env::var("LOG_FORMAT") {
            self.logging.format = val;
        }

        if let Ok(val) = env::var("STORAGE_AUDIT_INACTIVE_DAYS") {
            self.reconcile.inactive_threshold_days =
                val.parse().context("Invalid STORAGE_AUDIT_INACTIVE_DAYS")?;
        }
        if let Ok(val) = env::var("STORAGE_AUDIT_DAYS_PER_MONTH") {
            self.reconcile.days_per_month =
                val.parse().context("Invalid STORAGE_AUDIT_DAYS_PER_MONTH")?;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.reconcile.inactive_threshold_days < 0 {
            return Err(anyhow::anyhow!(
                "Inactivity threshold cannot be negative, got {}",
                self.reconcile.inactive_threshold_days
            ));
        }

        if self.reconcile.days_per_month <= 0.0 {
            return Err(anyhow::anyhow!(
                "Days-per-month divisor must be positive, got {}",
                self.reconcile.days_per_month
            ));
        }

        Ok(())
    }
}

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration instance
pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(|| Config::load().expect("Failed to load configuration"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.reconcile.inactive_threshold_days, 365);
        assert_eq!(config.reconcile.days_per_month, 30.0);
        assert_eq!(config.logging.level, "ERROR");
    }

    #[test]
    fn test_env_override() {
        env::set_var("STORAGE_AUDIT_INACTIVE_DAYS", "180");
        let mut config = Config::default();
        config.apply_env_overrides().unwrap();
        assert_eq!(config.reconcile.inactive_threshold_days, 180);
        env::remove_var("STORAGE_AUDIT_INACTIVE_DAYS");
    }

    #[test]
    fn test_validation() {
        let mut config = Config::default();
        config.reconcile.days_per_month = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage-audit.toml");
        fs::write(
            &path,
            "[reconcile]\ninactive_threshold_days = 90\ndays_per_month = 28.0\n\n[logging]\nlevel = \"INFO\"\nformat = \"json\"\n",
        )
        .unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.reconcile.inactive_threshold_days, 90);
        assert_eq!(config.logging.format, "json");
    }
}
