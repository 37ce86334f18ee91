use std::env;
use std::path::{Path, PathBuf};

use crate::errors::{ConsoleError, ConsoleResult};

pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api/orchestration";
pub const DEFAULT_NAMESPACE: &str = "default";
pub const DEFAULT_LOG_DIR: &str = "./logs";
pub const DEFAULT_LOG_FILTER: &str = "info";

pub const ENV_API_BASE: &str = "DEPLOY_CONSOLE_API_BASE";
pub const ENV_NAMESPACE: &str = "DEPLOY_CONSOLE_NAMESPACE";
pub const ENV_LOG_DIR: &str = "DEPLOY_CONSOLE_LOG_DIR";
pub const ENV_LOG_FILTER: &str = "DEPLOY_CONSOLE_LOG";

/// Loads a `.env` file into the process environment: the given path, or the
/// first `.env` found from the working directory upwards. Returns the file
/// that was read so it can be logged once logging is up.
pub fn load_env_file(path: Option<&Path>) -> Option<PathBuf> {
    match path {
        Some(path) => dotenvy::from_path(path).ok().map(|_| path.to_path_buf()),
        None => dotenvy::dotenv().ok(),
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_base: Option<String>,
    pub namespace: Option<String>,
    pub log_dir: Option<PathBuf>,
}

/// Session-wide settings. The namespace is fixed for the whole session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub api_base: String,
    pub namespace: String,
    pub log_dir: PathBuf,
    pub log_filter: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Settings from the process environment, not yet validated. Call
    /// [`load_env_file`] first to pick up a `.env` file.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            api_base: lookup(ENV_API_BASE).unwrap_or(defaults.api_base),
            namespace: lookup(ENV_NAMESPACE).unwrap_or(defaults.namespace),
            log_dir: lookup(ENV_LOG_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_filter: lookup(ENV_LOG_FILTER).unwrap_or(defaults.log_filter),
        }
    }

    /// Command-line values replace whatever the environment provided.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(api_base) = overrides.api_base {
            self.api_base = api_base;
        }
        if let Some(namespace) = overrides.namespace {
            self.namespace = namespace;
        }
        if let Some(log_dir) = overrides.log_dir {
            self.log_dir = log_dir;
        }
        self
    }

    /// Normalises the api base (no trailing `/`) and rejects unusable values.
    pub fn validated(mut self) -> ConsoleResult<Self> {
        self.api_base = self.api_base.trim().trim_end_matches('/').to_string();
        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(ConsoleError::Config(format!(
                "api base must be an http(s) URL, got '{}'",
                self.api_base
            )));
        }

        self.namespace = self.namespace.trim().to_string();
        if self.namespace.is_empty() {
            return Err(ConsoleError::Config("namespace must not be empty".into()));
        }

        Ok(self)
    }
}
