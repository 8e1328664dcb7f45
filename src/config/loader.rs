use super::types::{ConfigFile, ReporterConfig};
use crate::Result;
use crate::error::ReportError;
use std::fs;
use std::path::{Path, PathBuf};

const OUTPUT_FILE_ENV: &str = "RUREPORT_OUTPUT_FILE";
const SYNC_ENV: &str = "RUREPORT_SYNC";

/// Reporter configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    const CONFIG_FILE: &'static str = "rureport.toml";

    /// Load the reporter table from a specific file
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<ReporterConfig> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            ReportError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let file: ConfigFile = toml::from_str(&content)?;
        Ok(file.json_result_reporter)
    }

    /// Look for a config file
    /// Search order:
    /// 1. current directory and its parents
    /// 2. user config directory ~/.config/rureport/
    pub fn find_and_load() -> Option<ReporterConfig> {
        Self::find_config_path().and_then(|path| match Self::load_from_path(&path) {
            Ok(config) => {
                tracing::debug!("Loaded reporter config from {}", path.display());
                Some(config)
            }
            Err(e) => {
                tracing::warn!("Ignoring config file {}: {}", path.display(), e);
                None
            }
        })
    }

    fn find_config_path() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let config_path = current.join(Self::CONFIG_FILE);
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                break;
            }
        }

        let home = dirs::home_dir()?;
        let config_path = home.join(".config").join("rureport").join(Self::CONFIG_FILE);
        config_path.exists().then_some(config_path)
    }

    /// Apply `RUREPORT_OUTPUT_FILE` / `RUREPORT_SYNC` from the process environment
    pub fn with_env_overrides(config: ReporterConfig) -> ReporterConfig {
        Self::apply_overrides(config, |key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides<F>(mut config: ReporterConfig, lookup: F) -> ReporterConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(OUTPUT_FILE_ENV).filter(|p| !p.trim().is_empty()) {
            config.output_file = Some(PathBuf::from(path));
        }

        if let Some(flag) = lookup(SYNC_ENV) {
            config.is_synchronous = matches!(flag.trim().to_lowercase().as_str(), "1" | "true" | "yes");
        }

        config
    }
}
