//! Configuration management for docpage.
//!
//! Parses `docpage.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `fetch.user_agent`
//! - every URL in `[documents]`
//!
//! ## Example
//!
//! ```toml
//! [fetch]
//! timeout_secs = 10
//!
//! [render]
//! demote_h1 = true
//!
//! [documents]
//! app = "https://raw.githubusercontent.com/example/app/main/README.md"
//! ```

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override fetch timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Override `#` heading demotion.
    pub demote_h1: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docpage.toml";

/// Default fetch timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Document fetch configuration.
    pub fetch: FetchConfig,
    /// Rendering configuration.
    pub render: RenderConfig,
    /// Named documents: name to raw markdown URL.
    pub documents: BTreeMap<String, String>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Document fetch configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` header sent with requests.
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl FetchConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Render `#` headings as `<h2>` so the page keeps a single `<h1>`.
    pub demote_h1: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { demote_h1: true }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`documents.app`").
        field: String,
        /// Error message (e.g., "${`README_BRANCH`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !is_http_url(url) {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docpage.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(timeout_secs) = settings.timeout_secs {
            self.fetch.timeout_secs = timeout_secs;
        }
        if let Some(demote_h1) = settings.demote_h1 {
            self.render.demote_h1 = demote_h1;
        }
    }

    /// Resolve a document reference to a URL.
    ///
    /// A name listed under `[documents]` resolves to its URL. An `http://` or
    /// `https://` reference is returned as is.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the reference is neither a known
    /// document name nor a URL.
    pub fn resolve_document<'a>(&'a self, reference: &'a str) -> Result<&'a str, ConfigError> {
        if let Some(url) = self.documents.get(reference) {
            return Ok(url.as_str());
        }
        if is_http_url(reference) {
            return Ok(reference);
        }
        Err(ConfigError::Validation(format!(
            "unknown document '{reference}' (not in [documents] and not an http(s) URL)"
        )))
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_fetch()?;
        self.validate_documents()?;
        Ok(())
    }

    fn validate_fetch(&self) -> Result<(), ConfigError> {
        const MAX_TIMEOUT_SECS: u64 = 300;

        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "fetch.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        if self.fetch.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::Validation(format!(
                "fetch.timeout_secs cannot exceed {MAX_TIMEOUT_SECS}"
            )));
        }
        if let Some(ref agent) = self.fetch.user_agent {
            require_non_empty(agent, "fetch.user_agent")?;
        }
        Ok(())
    }

    fn validate_documents(&self) -> Result<(), ConfigError> {
        for (name, url) in &self.documents {
            let field = format!("documents.{name}");
            require_non_empty(url, &field)?;
            require_http_url(url, &field)?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref agent) = self.fetch.user_agent {
            self.fetch.user_agent = Some(expand::expand_env(agent, "fetch.user_agent")?);
        }

        for (name, url) in &mut self.documents {
            *url = expand::expand_env(url, &format!("documents.{name}"))?;
        }

        Ok(())
    }
}
