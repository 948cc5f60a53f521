//! Configuration and credential loading.
//!
//! `config.toml` is looked up in this order:
//! 1. the `--config` flag
//! 2. the `SALESCALL_CONFIG` environment variable
//! 3. `{data_dir}/salescall/config.toml`
//!
//! A missing or malformed file falls back to [`AppConfig::default()`].
//! The API key is never read from the file; it comes from the environment
//! variable named by `provider.api_key_env` (a `.env` file is honoured).

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use salescall_types::config::AppConfig;
use salescall_types::error::ConfigError;

/// Environment variable that points at an alternative config file.
pub const CONFIG_ENV: &str = "SALESCALL_CONFIG";

/// Pick the config file path from the flag, the environment, or the data dir.
pub fn resolve_config_path(flag: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = flag {
        return Some(path.to_path_buf());
    }
    match std::env::var(CONFIG_ENV) {
        Ok(path) if !path.trim().is_empty() => return Some(PathBuf::from(path)),
        _ => {}
    }
    default_data_dir().map(|dir| dir.join("config.toml"))
}

/// `{platform data dir}/salescall`, e.g. `~/.local/share/salescall` on Linux.
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("salescall"))
}

/// Load configuration from `path`, falling back to defaults.
///
/// - `None` or a file that does not exist: defaults.
/// - Unreadable or unparsable file: warning logged, defaults.
pub async fn load_config(path: Option<&Path>) -> AppConfig {
    let Some(config_path) = path else {
        tracing::debug!("no config path resolved, using defaults");
        return AppConfig::default();
    };

    let content = match tokio::fs::read_to_string(config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return AppConfig::default();
        }
    };

    match parse_config(config_path, &content) {
        Ok(config) => {
            tracing::info!(path = %config_path.display(), "configuration loaded");
            config
        }
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            AppConfig::default()
        }
    }
}

fn parse_config(path: &Path, content: &str) -> Result<AppConfig, ConfigError> {
    toml::from_str::<AppConfig>(content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Startup checks that make the configuration unusable when they fail.
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    config.catalog.check_complete()?;

    let server = &config.server;
    for (field, value) in [
        ("max_upload_bytes", server.max_upload_bytes as u64),
        ("session_idle_minutes", server.session_idle_minutes),
        ("max_sessions", server.max_sessions as u64),
    ] {
        if value == 0 {
            return Err(ConfigError::ZeroLimit { field });
        }
    }
    Ok(())
}

/// Read the completion API key from the environment.
///
/// Loads `.env` first (if present), then reads `env_var`. A missing or blank
/// value is a [`ConfigError::MissingCredential`].
pub fn resolve_api_key(env_var: &str) -> Result<SecretString, ConfigError> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), ".env loaded");
    }
    api_key_from(env_var, std::env::var(env_var).ok())
}

fn api_key_from(env_var: &str, value: Option<String>) -> Result<SecretString, ConfigError> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(SecretString::from(key.trim().to_string())),
        _ => Err(ConfigError::MissingCredential(env_var.to_string())),
    }
}
