//! Configuration loading
//!
//! # Hierarchy
//!
//! Configuration is loaded in this order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Global config: `<config dir>/parcel-tracker/config.toml`
//! 3. Project config: `./parcel-tracker.toml` (or the file given with `--config`)
//! 4. Environment variables: `PARCEL_TRACKER_DB`, `PARCEL_TRACKER_LOG`
//! 5. CLI flags (`--db`)
//!
//! # Example Config
//!
//! ```toml
//! database = "/var/lib/parcels/tracker.db"
//! log_level = "info"
//! ```

use std::path::{Path, PathBuf};

use parcel_core::{Error, Result};
use serde::{Deserialize, Serialize};

pub const PROJECT_CONFIG_FILE: &str = "parcel-tracker.toml";
pub const ENV_DATABASE: &str = "PARCEL_TRACKER_DB";
pub const ENV_LOG_LEVEL: &str = "PARCEL_TRACKER_LOG";

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Path of the SQLite database file
    pub database: PathBuf,
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from("tracker.db"),
            log_level: "warn".to_string(),
        }
    }
}

/// One configuration layer as read from a TOML file; absent keys keep the lower layer
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    pub database: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl Config {
    /// Apply a layer on top of this config (layer takes precedence)
    pub fn merge(self, layer: ConfigLayer) -> Self {
        Self {
            database: layer.database.unwrap_or(self.database),
            log_level: layer.log_level.unwrap_or(self.log_level),
        }
    }

    /// Apply environment overrides read through `lookup`
    pub fn apply_env_with(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        self.merge(ConfigLayer {
            database: lookup(ENV_DATABASE).map(PathBuf::from),
            log_level: lookup(ENV_LOG_LEVEL),
        })
    }

    /// Apply overrides from the process environment
    pub fn apply_env_vars(self) -> Self {
        self.apply_env_with(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
    }

    /// Override the database path (CLI flag)
    pub fn with_database(self, database: Option<PathBuf>) -> Self {
        self.merge(ConfigLayer {
            database,
            log_level: None,
        })
    }

    /// Check that the merged config is usable
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` for an empty database path or an
    /// unparsable log filter
    pub fn validate(&self) -> Result<()> {
        if self.database.as_os_str().is_empty() {
            return Err(Error::invalid_config("database path must not be empty"));
        }

        tracing_subscriber::EnvFilter::try_new(&self.log_level)
            .map(|_| ())
            .map_err(|e| Error::invalid_config(format!("invalid log_level '{}': {e}", self.log_level)))
    }
}

/// Load configuration from all file and environment sources
///
/// `explicit` replaces the project config lookup and must exist.
///
/// # Errors
///
/// Returns error if a config file cannot be read, is malformed TOML, or
/// the merged values fail validation
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let config = Config::default();

    let config = match global_config_path() {
        Some(path) if path.is_file() => config.merge(load_toml_file(&path)?),
        _ => config,
    };

    let config = match explicit {
        Some(path) => config.merge(load_toml_file(path)?),
        None => {
            let path = project_config_path();
            if path.is_file() {
                config.merge(load_toml_file(&path)?)
            } else {
                config
            }
        }
    };

    let config = config.apply_env_vars();
    config.validate()?;

    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

/// Get path to global config file
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "parcel-tracker")
        .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
}

/// Get path to project config file (relative to the working directory)
pub fn project_config_path() -> PathBuf {
    PathBuf::from(PROJECT_CONFIG_FILE)
}

/// Load a TOML file into a config layer
///
/// # Errors
///
/// Returns error if the file cannot be read or is not a valid config layer
pub fn load_toml_file(path: &Path) -> Result<ConfigLayer> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::io_error(format!("Failed to read config file {}: {e}", path.display()))
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::invalid_config(format!("Failed to parse config {}: {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use serial_test::serial;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.database, PathBuf::from("tracker.db"));
        assert_eq!(config.log_level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_layer_overrides_only_present_keys() {
        let config = Config::default().merge(ConfigLayer {
            database: None,
            log_level: Some("debug".to_string()),
        });
        assert_eq!(config.database, PathBuf::from("tracker.db"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_env_overrides_file() {
        let config = Config::default()
            .merge(ConfigLayer {
                database: Some(PathBuf::from("file.db")),
                log_level: None,
            })
            .apply_env_with(|key| (key == ENV_DATABASE).then(|| "env.db".to_string()));
        assert_eq!(config.database, PathBuf::from("env.db"));
    }

    #[test]
    fn test_cli_flag_overrides_env() {
        let config = Config::default()
            .apply_env_with(|key| (key == ENV_DATABASE).then(|| "env.db".to_string()))
            .with_database(Some(PathBuf::from("flag.db")));
        assert_eq!(config.database, PathBuf::from("flag.db"));
    }

    #[test]
    fn test_load_toml_file() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("parcel-tracker.toml");
        std::fs::write(&path, "database = \"parcels.db\"\nlog_level = \"info\"\n")?;

        let layer = load_toml_file(&path)?;
        assert_eq!(layer.database, Some(PathBuf::from("parcels.db")));
        assert_eq!(layer.log_level.as_deref(), Some("info"));
        Ok(())
    }

    #[test]
    fn test_unknown_key_is_rejected() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("parcel-tracker.toml");
        std::fs::write(&path, "databse = \"typo.db\"\n")?;

        let result = load_toml_file(&path);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
        Ok(())
    }

    #[test]
    fn test_missing_explicit_file_is_io_error() {
        let result = load_config(Some(Path::new("/definitely/not/here.toml")));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_empty_database_is_invalid() {
        let config = Config::default().with_database(Some(PathBuf::new()));
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    #[serial]
    fn test_load_config_reads_explicit_file_and_env() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "database = \"custom.db\"\nlog_level = \"info\"\n")?;

        std::env::set_var(ENV_LOG_LEVEL, "debug");
        let loaded = load_config(Some(&path));
        std::env::remove_var(ENV_LOG_LEVEL);

        let config = loaded?;
        assert_eq!(config.log_level, "debug");
        if std::env::var_os(ENV_DATABASE).is_none() {
            assert_eq!(config.database, PathBuf::from("custom.db"));
        }
        Ok(())
    }
}
