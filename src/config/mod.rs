//! Configuration loading and access helpers
//!
//! TOML configuration with defaults for every field, held in a global cell so
//! every subsystem reads the same values. Missing file means defaults; a
//! malformed file is a startup error, never a silent fallback.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::RwLock;

/// Global configuration instance
static CONFIG: OnceCell<RwLock<Config>> = OnceCell::new();

/// Default service endpoint, matching the development server
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the lead service
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SessionConfig {
    /// Override for the session file location. Unset means the platform
    /// data directory.
    pub path: Option<PathBuf>,
}

/// Default configuration file location under the platform config directory
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("leadbook")
        .join("config.toml")
}

/// Load configuration from the default location and initialize the global
/// CONFIG. Call once at startup.
pub fn load_config() -> Result<(), String> {
    load_config_from_path(&default_config_path())
}

/// Load configuration from a specific TOML file path
///
/// A missing file falls back to defaults; a file that exists but does not
/// parse is an error.
pub fn load_config_from_path(path: &std::path::Path) -> Result<(), String> {
    let config = if path.exists() {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        toml::from_str::<Config>(&contents)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?
    } else {
        Config::default()
    };

    CONFIG
        .set(RwLock::new(config))
        .map_err(|_| "Config already initialized".to_string())?;

    Ok(())
}

/// Run a closure against the current configuration
///
/// Initializes defaults if [`load_config`] was never called, so library use
/// without a config file keeps working.
pub fn with_config<F, R>(f: F) -> R
where
    F: FnOnce(&Config) -> R,
{
    let cell = CONFIG.get_or_init(|| RwLock::new(Config::default()));
    match cell.read() {
        Ok(guard) => f(&guard),
        Err(poisoned) => f(&poisoned.into_inner()),
    }
}

/// Clone the full current configuration
pub fn get_config_clone() -> Config {
    with_config(|config| config.clone())
}
