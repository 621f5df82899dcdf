//! Client configuration
//!
//! Loaded from `config.toml` in the platform config directory, then
//! overridden by `MYFLIX_API_URL` and `MYFLIX_DATA_DIR`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Origin of the hosted myFlix API
pub const DEFAULT_API_URL: &str = "https://myflixx-movie-app-2d5cece4bfb1.herokuapp.com";

/// File name of the persisted session inside the data directory
pub const SESSION_FILE: &str = "session.json";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the REST API, without trailing slash
    pub api_url: String,
    /// Where the session cache lives. Defaults to the platform data directory.
    pub data_dir: Option<PathBuf>,
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            data_dir: None,
            log_filter: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from `path`, or from the default location when `None`.
    ///
    /// A missing file at the default location yields the defaults; a missing
    /// explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Ok(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        Ok(config.with_overrides(
            env::var("MYFLIX_API_URL").ok(),
            env::var("MYFLIX_DATA_DIR").ok().map(PathBuf::from),
        ))
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading config");
        let raw = fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    /// Parse TOML config text
    pub fn parse(raw: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(raw)?;
        config.api_url = normalize_url(&config.api_url);
        Ok(config)
    }

    /// Apply overrides on top of the loaded values. Empty values are ignored.
    pub fn with_overrides(mut self, api_url: Option<String>, data_dir: Option<PathBuf>) -> Self {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api_url = normalize_url(&url);
        }
        if let Some(dir) = data_dir.filter(|d| !d.as_os_str().is_empty()) {
            self.data_dir = Some(dir);
        }
        self
    }

    /// Default config file location
    pub fn default_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Directory holding the session cache
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(project_dirs()?.data_dir().to_path_buf()),
        }
    }

    /// Path of the persisted session file
    pub fn session_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(SESSION_FILE))
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("app", "myflix", "myflix").ok_or(Error::DataDir("home"))
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
