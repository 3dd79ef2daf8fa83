//! Configuration loading and data root resolution

use crate::models::UserProfile;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the data root
pub const DATA_ROOT_ENV: &str = "LABNOTE_DATA_ROOT";

/// Bootstrap configuration loaded from `config.toml`
///
/// Every field is optional. A missing file is equivalent to an empty one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Directory holding `project_descriptions/` and `updates/`
    #[serde(default)]
    pub data_root: Option<PathBuf>,

    /// HTTP bind address for labnote-server
    #[serde(default)]
    pub host: Option<String>,

    /// HTTP port for labnote-server
    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Users registered at startup. `None` falls back to the built-in seed.
    #[serde(default)]
    pub seed_users: Option<Vec<UserProfile>>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse a config file. Missing or malformed files are errors.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
    }

    /// Load the explicit config file, or the default one if present
    ///
    /// An explicit path must exist. A missing default file only logs a
    /// warning and yields defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            info!("Loading config from {}", path.display());
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                info!("Loading config from {}", path.display());
                Self::load(&path)
            }
            Some(path) => {
                warn!(
                    "No config file at {}, using built-in defaults",
                    path.display()
                );
                Ok(Self::default())
            }
            None => {
                warn!("Could not determine config directory, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    /// Users to register at startup
    pub fn seed_users(&self) -> Vec<UserProfile> {
        self.seed_users.clone().unwrap_or_else(default_seed_users)
    }
}

/// Built-in seed: a single test user
pub fn default_seed_users() -> Vec<UserProfile> {
    vec![UserProfile {
        user_id: "123".to_string(),
        name: "Alice".to_string(),
        role: "student".to_string(),
        email: None,
    }]
}

/// `<config_dir>/labnote/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("labnote").join("config.toml"))
}

/// OS-dependent default data root (`<data_local_dir>/labnote`)
pub fn default_data_root() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("labnote"))
        .unwrap_or_else(|| PathBuf::from("./Data"))
}

/// Resolve the data root in priority order:
/// 1. Command-line argument (highest priority)
/// 2. `LABNOTE_DATA_ROOT` environment variable
/// 3. TOML `data_root`
/// 4. OS-dependent default
pub fn resolve_data_root(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        info!("Data root from command line: {}", path.display());
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(DATA_ROOT_ENV) {
        if !path.trim().is_empty() {
            info!("Data root from {}: {}", DATA_ROOT_ENV, path);
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &config.data_root {
        info!("Data root from config file: {}", path.display());
        return path.clone();
    }

    let path = default_data_root();
    info!("Data root (default): {}", path.display());
    path
}
