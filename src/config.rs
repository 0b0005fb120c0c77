use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::policy::error::ConfigError;
use crate::policy::time_unit::TimeUnit;

// =============================================================================
// Time-related constants
// =============================================================================

/// Default cache window in seconds (24 hours)
pub const DEFAULT_CACHE_WINDOW_SECS: i64 = 24 * 60 * 60;

/// Default cache window in milliseconds (24 hours)
pub const DEFAULT_CACHE_WINDOW_MS: i64 = DEFAULT_CACHE_WINDOW_SECS * 1000;

const CONFIG_FILE_NAME: &str = "cache-policy.json";

/// Default windows installed by a new cache policy
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct CachePolicyConfig {
    /// How long a dynamic version listing is trusted
    pub dynamic_versions: CacheWindow,
    /// How long changing module metadata and artifacts are trusted
    pub changing_modules: CacheWindow,
    /// How long a cached miss for a module or artifact is trusted
    pub missing_modules_and_artifacts: CacheWindow,
}

/// A `cache_for` window expressed as value and unit
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct CacheWindow {
    pub value: i64,
    pub unit: TimeUnit,
}

impl CacheWindow {
    pub fn new(value: i64, unit: TimeUnit) -> Self {
        Self { value, unit }
    }

    pub fn as_millis(&self) -> i64 {
        self.unit.to_millis(self.value)
    }
}

impl Default for CacheWindow {
    fn default() -> Self {
        Self {
            value: DEFAULT_CACHE_WINDOW_SECS,
            unit: TimeUnit::Seconds,
        }
    }
}

impl CachePolicyConfig {
    /// Read a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&content)?;
        info!("Loaded cache policy config from {:?}", path);
        Ok(config)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("No cache policy config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        Self::load(path)
    }
}

/// Returns the path to the config file.
/// Uses $XDG_CONFIG_HOME/resolve-cache-policy if XDG_CONFIG_HOME is set,
/// otherwise falls back to the platform config directory,
/// or ./resolve-cache-policy if neither is available.
pub fn config_path() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::config_dir())
        .join(CONFIG_FILE_NAME)
}

fn config_dir_with_env(xdg_config_home: Option<String>, config_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .map(PathBuf::from)
        .or(config_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join("resolve-cache-policy")
}
