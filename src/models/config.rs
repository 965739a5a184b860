//! Application configuration structures.

use std::fs;
use std::path::Path;

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analysis and sponsorship backend settings
    #[serde(default)]
    pub backend: BackendConfig,

    /// Page template identifiers
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.backend.user_agent.trim().is_empty() {
            return Err(AppError::validation("backend.user_agent is empty"));
        }
        if self.backend.timeout_secs == 0 {
            return Err(AppError::validation("backend.timeout_secs must be > 0"));
        }
        url::Url::parse(&self.backend.base_url)?;
        for path in [
            &self.backend.analyze_path,
            &self.backend.legacy_path,
            &self.backend.sponsorship_path,
            &self.backend.health_path,
        ] {
            if !path.starts_with('/') {
                return Err(AppError::validation(format!(
                    "backend path '{path}' must start with '/'"
                )));
            }
        }

        let extraction = &self.extraction;
        if extraction.platform.trim().is_empty() {
            return Err(AppError::validation("extraction.platform is empty"));
        }
        if extraction.jsonld_type.trim().is_empty() {
            return Err(AppError::validation("extraction.jsonld_type is empty"));
        }
        for (name, id) in extraction.identifiers() {
            if id.trim().is_empty() {
                return Err(AppError::validation(format!("extraction.{name} is empty")));
            }
            extraction.selector_for(id)?;
        }
        Ok(())
    }
}

/// HTTP settings for the analysis and sponsorship backends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Scheme, host and port of the backend
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    #[serde(default = "defaults::analyze_path")]
    pub analyze_path: String,

    /// Free-text analysis endpoint
    #[serde(default = "defaults::legacy_path")]
    pub legacy_path: String,

    #[serde(default = "defaults::sponsorship_path")]
    pub sponsorship_path: String,

    #[serde(default = "defaults::health_path")]
    pub health_path: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,
}

impl BackendConfig {
    /// Join an endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            analyze_path: defaults::analyze_path(),
            legacy_path: defaults::legacy_path(),
            sponsorship_path: defaults::sponsorship_path(),
            health_path: defaults::health_path(),
            timeout_secs: defaults::timeout(),
            user_agent: defaults::user_agent(),
        }
    }
}

/// Identifiers for the job page template.
///
/// Elements are located by `[{attribute}="{id}"]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Constant written to every record's `platform`
    #[serde(default = "defaults::platform")]
    pub platform: String,

    /// Attribute carrying the field identifiers
    #[serde(default = "defaults::attribute")]
    pub attribute: String,

    /// Root job-posting container
    #[serde(default = "defaults::root_id")]
    pub root_id: String,

    #[serde(default = "defaults::title_id")]
    pub title_id: String,

    #[serde(default = "defaults::location_id")]
    pub location_id: String,

    #[serde(default = "defaults::time_id")]
    pub time_id: String,

    #[serde(default = "defaults::requisition_id")]
    pub requisition_id: String,

    #[serde(default = "defaults::description_id")]
    pub description_id: String,

    #[serde(default = "defaults::about_company_id")]
    pub about_company_id: String,

    /// `@type` of the linked-data record to read
    #[serde(default = "defaults::jsonld_type")]
    pub jsonld_type: String,
}

impl ExtractionConfig {
    /// All configured identifiers with their config key.
    pub fn identifiers(&self) -> [(&'static str, &str); 7] {
        [
            ("root_id", self.root_id.as_str()),
            ("title_id", self.title_id.as_str()),
            ("location_id", self.location_id.as_str()),
            ("time_id", self.time_id.as_str()),
            ("requisition_id", self.requisition_id.as_str()),
            ("description_id", self.description_id.as_str()),
            ("about_company_id", self.about_company_id.as_str()),
        ]
    }

    /// Build the attribute selector for one identifier.
    pub fn selector_for(&self, id: &str) -> Result<Selector> {
        let css = format!(r#"[{}="{}"]"#, self.attribute, id);
        Selector::parse(&css).map_err(|e| AppError::selector(&css, format!("{e:?}")))
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            platform: defaults::platform(),
            attribute: defaults::attribute(),
            root_id: defaults::root_id(),
            title_id: defaults::title_id(),
            location_id: defaults::location_id(),
            time_id: defaults::time_id(),
            requisition_id: defaults::requisition_id(),
            description_id: defaults::description_id(),
            about_company_id: defaults::about_company_id(),
            jsonld_type: defaults::jsonld_type(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    // Backend defaults
    pub fn base_url() -> String {
        "http://127.0.0.1:8000".into()
    }
    pub fn analyze_path() -> String {
        "/analyze-job".into()
    }
    pub fn legacy_path() -> String {
        "/save".into()
    }
    pub fn sponsorship_path() -> String {
        "/h1b-lookup".into()
    }
    pub fn health_path() -> String {
        "/health".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; job-scraper/0.1)".into()
    }

    // Extraction defaults
    pub fn platform() -> String {
        "Workday".into()
    }
    pub fn attribute() -> String {
        "data-automation-id".into()
    }
    pub fn root_id() -> String {
        "jobPostingPage".into()
    }
    pub fn title_id() -> String {
        "jobPostingHeader".into()
    }
    pub fn location_id() -> String {
        "locations".into()
    }
    pub fn time_id() -> String {
        "time".into()
    }
    pub fn requisition_id() -> String {
        "requisitionId".into()
    }
    pub fn description_id() -> String {
        "jobPostingDescription".into()
    }
    pub fn about_company_id() -> String {
        "aboutCompany".into()
    }
    pub fn jsonld_type() -> String {
        "JobPosting".into()
    }

    pub fn log_level() -> String {
        "info".into()
    }
}
