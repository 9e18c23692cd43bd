//! Configuration
//!
//! TOML file plus `WOLFAUTH_*` environment overrides. Every field has a
//! default, so an empty file (or none at all) is a valid configuration.

use crate::auth::AuthClientConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const ENV_DATA_DIR: &str = "WOLFAUTH_DATA_DIR";
const ENV_AUTH_URL: &str = "WOLFAUTH_AUTH_URL";
const ENV_LOG_LEVEL: &str = "WOLFAUTH_LOG_LEVEL";
const ENV_LOG_FORMAT: &str = "WOLFAUTH_LOG_FORMAT";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where preferences are kept
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("wolfauth").to_string_lossy().to_string())
        .unwrap_or_else(|| "./wolfauth_data".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Remote auth service
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Unset means requests wait indefinitely
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:3001".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

impl AuthConfig {
    pub fn client_config(&self) -> AuthClientConfig {
        AuthClientConfig {
            base_url: self.base_url.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    ///
    /// The first existing file wins. A file that exists but cannot be read
    /// or parsed is an error rather than a silent fallback to defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("wolfauth").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    fn load_first(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        match paths.iter().find(|path| path.exists()) {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::from_env()),
        }
    }

    /// Data directory with a leading `~` expanded to the home directory
    pub fn data_dir(&self) -> PathBuf {
        expand_home(&self.storage.data_dir)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(data_dir) = lookup(ENV_DATA_DIR) {
            self.storage.data_dir = data_dir;
        }
        if let Some(url) = lookup(ENV_AUTH_URL) {
            self.auth.base_url = url;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            self.logging.format = format;
        }
    }
}

fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# WolfAuth portal configuration
#
# Environment variables override these settings:
# - WOLFAUTH_DATA_DIR
# - WOLFAUTH_AUTH_URL
# - WOLFAUTH_LOG_LEVEL
# - WOLFAUTH_LOG_FORMAT

[storage]
# Directory holding preferences.db
data_dir = "~/.local/share/wolfauth"

[auth]
# Base URL of the authentication service
base_url = "http://localhost:3001"

# Request timeout in seconds; leave unset to wait indefinitely
# request_timeout_secs = 30

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.auth.base_url, "http://localhost:3001");
        assert_eq!(config.auth.request_timeout_secs, None);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.storage.data_dir.ends_with("wolfauth") || config.storage.data_dir == "./wolfauth_data");
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.storage.data_dir, "~/.local/share/wolfauth");
        assert!(config.data_dir().is_absolute());
        assert!(config.data_dir().ends_with(".local/share/wolfauth"));
        assert_eq!(config.auth.base_url, "http://localhost:3001");
        assert!(config.auth.client_config().request_timeout.is_none());
    }

    #[test]
    fn test_home_expansion() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(expand_home("~"), home);
        assert_eq!(expand_home("~/data/wolf"), home.join("data/wolf"));
        assert_eq!(expand_home("/srv/wolf"), PathBuf::from("/srv/wolf"));
        assert_eq!(expand_home("~other/wolf"), PathBuf::from("~other/wolf"));
        assert_eq!(expand_home("rel/~/x"), PathBuf::from("rel/~/x"));
    }

    #[test]
    fn test_first_default_location_must_parse() {
        let dir = tempdir().unwrap();
        let broken = dir.path().join("broken.toml");
        let valid = dir.path().join("valid.toml");
        std::fs::write(&broken, "[auth\nbase_url = ").unwrap();
        std::fs::write(&valid, "[logging]\nformat = \"json\"\n").unwrap();

        let result = Config::load_first(&[broken.clone(), valid.clone()]);
        assert!(matches!(result, Err(ConfigError::Parse { path, .. }) if path == broken));

        let missing = dir.path().join("missing.toml");
        let config = Config::load_first(&[missing.clone(), valid]).unwrap();
        assert_eq!(config.logging.format, "json");

        let config = Config::load_first(&[missing]).unwrap();
        assert_eq!(config.auth.base_url, Config::from_env().auth.base_url);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[auth]\nbase_url = \"https://auth.example.org\"\nrequest_timeout_secs = 5\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.auth.base_url, "https://auth.example.org");
        assert_eq!(
            config.auth.client_config().request_timeout,
            Some(Duration::from_secs(5))
        );
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[auth\nbase_url = ").unwrap();
        assert!(matches!(Config::load(&broken), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_DATA_DIR, "/tmp/wolf"),
            (ENV_AUTH_URL, "http://auth:9000"),
            (ENV_LOG_FORMAT, "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.data_dir(), PathBuf::from("/tmp/wolf"));
        assert_eq!(config.auth.base_url, "http://auth:9000");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }
}
