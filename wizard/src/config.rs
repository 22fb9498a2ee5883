//! Wizard configuration.
//!
//! Values should be provided by the application; [`WizardConfig::from_env`]
//! is a convenience for the demo binary.

use crate::error::ConfigError;
use std::env;
use std::time::Duration;

/// Environment variable holding the quotation API base URL.
pub const BASE_URL_VAR: &str = "QUOTATION_API_BASE_URL";
/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_VAR: &str = "QUOTATION_REQUEST_TIMEOUT_SECS";
/// Environment variable holding how long notices stay visible, in milliseconds.
pub const NOTICE_VAR: &str = "QUOTATION_NOTICE_MILLIS";

/// Configuration for the quotation wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardConfig {
    /// Base URL of the quotation API (e.g., "https://studio.example.com").
    ///
    /// Quotations are posted to `{base_url}/send-quotation`.
    pub base_url: String,

    /// Timeout for the submission request.
    ///
    /// Default: 30 seconds
    pub request_timeout: Duration,

    /// How long a validation notice stays up before it is dismissed.
    ///
    /// Default: 2.5 seconds
    pub notice_duration: Duration,

    /// Country code prefixed to the phone number.
    ///
    /// Default: "+91"
    pub default_country_code: String,
}

impl WizardConfig {
    /// Create new configuration.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the quotation API
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set notice duration.
    #[must_use]
    pub const fn with_notice_duration(mut self, duration: Duration) -> Self {
        self.notice_duration = duration;
        self
    }

    /// Set default country code.
    #[must_use]
    pub fn with_country_code(mut self, code: impl Into<String>) -> Self {
        self.default_country_code = code.into();
        self
    }

    /// The submission endpoint.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/send-quotation", self.base_url.trim_end_matches('/'))
    }

    /// Load configuration from the environment, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(base_url) = env::var(BASE_URL_VAR) {
            config.base_url = parse_base_url(&base_url)?;
        }
        if let Ok(raw) = env::var(TIMEOUT_VAR) {
            config.request_timeout = Duration::from_secs(parse_number(TIMEOUT_VAR, &raw)?);
        }
        if let Ok(raw) = env::var(NOTICE_VAR) {
            config.notice_duration = Duration::from_millis(parse_number(NOTICE_VAR, &raw)?);
        }

        Ok(config)
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout: Duration::from_secs(30),
            notice_duration: Duration::from_millis(2500),
            default_country_code: "+91".to_string(),
        }
    }
}

fn parse_number(name: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        name,
        value: raw.to_string(),
    })
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.trim_end_matches('/').to_string())
    } else {
        Err(ConfigError::InvalidBaseUrl(raw.to_string()))
    }
}
