use crate::error::ConfigError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Weather feed settings
    #[serde(default)]
    pub weather: WeatherConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Listening port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served for any path without a route
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("public")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

/// Feed language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Fr,
}

impl Lang {
    /// Locale code as written in configuration
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }

    /// Single-letter suffix used in feed file names
    pub fn feed_suffix(&self) -> char {
        match self {
            Self::En => 'e',
            Self::Fr => 'f',
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Self::En),
            "fr" => Some(Self::Fr),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Feed language
    #[serde(default)]
    pub lang: Lang,

    /// Place name, looked up in the place registry
    #[serde(default = "default_place")]
    pub place: String,

    /// Base URL of the Environment Canada site
    #[serde(default = "default_feed_base_url")]
    pub feed_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_place() -> String {
    "Hamilton".to_string()
}

fn default_feed_base_url() -> String {
    "https://weather.gc.ca".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            lang: Lang::default(),
            place: default_place(),
            feed_base_url: default_feed_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from the user config file if present, then apply
    /// environment overrides
    ///
    /// # Errors
    ///
    /// Fails if the config file exists but cannot be read or parsed, or if an
    /// environment override holds a value of the wrong shape.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    ///
    /// # Errors
    ///
    /// Everything [`Config::load`] can fail with, plus [`ConfigError::Invalid`]
    /// when validation finds errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        Self::load()?.validated()
    }

    /// Validate an already loaded configuration, logging any warnings
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] listing every validation error.
    pub fn validated(self) -> Result<(Self, ValidationResult)> {
        let validation = self.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((self, validation))
    }

    /// Read a TOML config file
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, or with [`ConfigError::ParseError`]
    /// if it is not valid TOML for this schema.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)).into())
    }

    /// Apply environment-style overrides from `lookup`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `PORT` is not a port number or
    /// `WXCHECK_LANG` is not `en`/`fr`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = port.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("PORT is not a valid port number: {}", port))
            })?;
        }
        if let Some(host) = lookup("WXCHECK_HOST") {
            self.server.host = host;
        }
        if let Some(dir) = lookup("WXCHECK_STATIC_DIR") {
            self.server.static_dir = PathBuf::from(dir);
        }
        if let Some(lang) = lookup("WXCHECK_LANG") {
            self.weather.lang = Lang::parse(&lang).ok_or_else(|| {
                ConfigError::Invalid(format!("WXCHECK_LANG must be 'en' or 'fr', got: {}", lang))
            })?;
        }
        if let Some(place) = lookup("WXCHECK_PLACE") {
            self.weather.place = place;
        }
        if let Some(url) = lookup("WXCHECK_FEED_URL") {
            self.weather.feed_base_url = url;
        }
        Ok(())
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.server.port == 0 {
            result.add_error("server.port", "Port cannot be 0");
        }

        if self.server.host.parse::<std::net::IpAddr>().is_err() {
            result.add_error(
                "server.host",
                format!("Not an IP address: {}", self.server.host),
            );
        }

        if !self.server.static_dir.is_dir() {
            result.add_warning(
                "server.static_dir",
                format!(
                    "Static directory does not exist: {}",
                    self.server.static_dir.display()
                ),
            );
        }

        self.validate_url(
            &self.weather.feed_base_url,
            "weather.feed_base_url",
            &mut result,
        );

        if self.weather.place.trim().is_empty() {
            result.add_error("weather.place", "Place must not be empty");
        }

        // The checks match English labels (Low, High, Humidex, night, the AQHI field).
        if self.weather.lang == Lang::Fr {
            result.add_error(
                "weather.lang",
                "French feeds are not supported by the weather checks; use 'en'",
            );
        }

        if self.weather.timeout_secs == 0 {
            result.add_error("weather.timeout_secs", "Timeout must be greater than 0");
        } else if self.weather.timeout_secs > 120 {
            result.add_warning(
                "weather.timeout_secs",
                "Timeout is unusually long (>120 seconds)",
            );
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Get the path to the configuration file
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("wxcheck").join("config.toml"))
    }
}
