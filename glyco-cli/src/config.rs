//! Configuration resolution for the CLI.
//!
//! The client layer receives the server URL and secret as opaque strings;
//! this module decides where they come from. Precedence: command-line
//! flags, then environment variables, then the user config file.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use glyco_client::{ClientError, DEFAULT_TIMEOUT_SECS};

use crate::Cli;

/// Environment variable naming the server base URL.
pub const URL_ENV: &str = "NIGHTSCOUT_URL";

/// Environment variable naming the API secret.
pub const SECRET_ENV: &str = "NIGHTSCOUT_API_SECRET";

// ============================================================================
// Config Types
// ============================================================================

/// On-disk config file contents. Every field is optional; anything absent
/// falls through to the next source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Server base URL.
    pub url: Option<String>,
    /// Shared API secret.
    pub api_secret: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Server base URL.
    pub url: String,
    /// Shared API secret.
    pub api_secret: String,
    /// Request timeout.
    pub timeout: Duration,
}

// ============================================================================
// Resolution
// ============================================================================

/// Returns the config file path (`~/.config/glyco/config.json`).
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("glyco").join("config.json"))
}

/// Loads the config file, treating a missing file as empty.
///
/// A malformed file is also treated as empty, with a warning: flags or
/// environment variables may still make the invocation viable.
fn load_config_file() -> ConfigFile {
    let Some(path) = config_path() else {
        return ConfigFile::default();
    };
    let Ok(raw) = std::fs::read_to_string(&path) else {
        return ConfigFile::default();
    };
    match serde_json::from_str(&raw) {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring malformed config file");
            ConfigFile::default()
        }
    }
}

/// Resolves settings for this invocation: flags > environment > file.
///
/// # Errors
///
/// Returns `ClientError::Config` when no source provides a URL or secret.
pub fn resolve(cli: &Cli) -> Result<Settings, ClientError> {
    resolve_from(
        cli.url.clone(),
        cli.api_secret.clone(),
        cli.timeout,
        |name| std::env::var(name).ok(),
        load_config_file(),
    )
}

/// Pure resolution, separated from the process environment for testing.
fn resolve_from(
    url_flag: Option<String>,
    secret_flag: Option<String>,
    timeout_flag: Option<u64>,
    env: impl Fn(&str) -> Option<String>,
    file: ConfigFile,
) -> Result<Settings, ClientError> {
    let url = url_flag
        .or_else(|| env(URL_ENV).filter(|v| !v.is_empty()))
        .or(file.url)
        .ok_or_else(|| {
            ClientError::Config(format!(
                "no server URL configured; pass --url, set {URL_ENV}, or add \"url\" to the config file"
            ))
        })?;

    let api_secret = secret_flag
        .or_else(|| env(SECRET_ENV).filter(|v| !v.is_empty()))
        .or(file.api_secret)
        .ok_or_else(|| {
            ClientError::Config(format!(
                "no API secret configured; pass --api-secret, set {SECRET_ENV}, or add \"api_secret\" to the config file"
            ))
        })?;

    let timeout_secs = timeout_flag
        .or(file.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    Ok(Settings {
        url,
        api_secret,
        timeout: Duration::from_secs(timeout_secs),
    })
}

// ============================================================================
// Tests
// ============================================================================
