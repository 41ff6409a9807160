//! Configuration management for jobharvest.
//!
//! Configuration is read from `~/.config/jobharvest/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.
//! Command line flags override the `[search]` and `[output]` values.

pub mod placeholders;
pub mod selectors;

pub use placeholders::Placeholders;
pub use selectors::Selectors;

use crate::scraper::{BrowserSettings, ExpiryWindow};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const DEFAULT_SEARCH_URL: &str =
    "https://www.indeed.com/jobs?q=software+developer&l=San+Francisco%2C+CA";

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub browser: BrowserSettings,
    pub selectors: Selectors,
    pub placeholders: Placeholders,
    pub expiry: ExpiryWindow,
    pub output: OutputConfig,
}

/// What to harvest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// First results page
    pub url: String,

    /// Classification label copied into every record
    pub category: Option<String>,
    pub subcategory: Option<String>,

    /// Maximum number of results pages to visit
    pub page_limit: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SEARCH_URL.to_string(),
            category: None,
            subcategory: None,
            page_limit: 3,
        }
    }
}

/// Where the CSV goes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub file_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("jobs"),
            file_prefix: "jobs".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_or_create(&config_path)
    }

    /// Load from an explicit path, creating it with defaults when missing.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::create_default_config(path)?;
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path: `~/.config/jobharvest/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("jobharvest").join("config.toml"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.page_limit == 0 {
            return Err(ConfigError::Invalid(
                "search.page_limit must be at least 1".into(),
            ));
        }
        url::Url::parse(&self.search.url).map_err(|e| {
            ConfigError::Invalid(format!("search.url {:?} is not a URL: {}", self.search.url, e))
        })?;
        self.expiry.validate()
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# jobharvest configuration
#
# Every key is optional; anything left out falls back to the built-in
# default. Flags passed to `jobharvest run` override [search] and [output].

[search]
url = "https://www.indeed.com/jobs?q=software+developer&l=San+Francisco%2C+CA"
# category = "Engineering"
# subcategory = "Software"
page_limit = 3

[browser]
headless = true
navigation_timeout_secs = 60
results_timeout_secs = 30
detail_timeout_secs = 60
field_timeout_ms = 5000
poll_interval_ms = 100

[expiry]
# Expiration dates are drawn uniformly between these offsets from today
start_months = 3
end_months = 5

[output]
directory = "jobs"
file_prefix = "jobs"

[placeholders]
# Written when a field cannot be read from the page
salary = "pending"
job_type = "unknown"
benefit = "unknown"
shift = "unknown"

[selectors]
# Override when the site's markup changes
captcha = ".cb-lb"
result_item = ".resultContent"
next_page = ".css-227srf.eu4oa1w0"
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Expiry window must end after it starts (start_months = {start_months}, end_months = {end_months})")]
    InvalidExpiryWindow { start_months: u32, end_months: u32 },

    #[error("{0}")]
    Invalid(String),
}
