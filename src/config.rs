use crate::error::{Error, Result};

/// Default host for single verification and credit checks
pub const DEFAULT_SINGLE_API_URL: &str = "https://api.millionverifier.com";

/// Default host for the bulk file API
pub const DEFAULT_BULK_API_URL: &str = "https://bulkapi.millionverifier.com";

/// Environment variable read by [`Config::from_env`]
pub const API_KEY_ENV_VAR: &str = "MILLION_VERIFIER_API_KEY";

/// Configuration for the MillionVerifier client
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// API key for authentication
    pub api_key: String,

    /// Base URL for the single verification API
    pub single_api_url: Option<String>,

    /// Base URL for the bulk API
    pub bulk_api_url: Option<String>,

    /// Timeout in seconds for HTTP requests
    pub timeout_seconds: Option<u64>,
}

impl Config {
    /// Build a configuration from `MILLION_VERIFIER_API_KEY`
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV_VAR)
            .map_err(|_| Error::InvalidConfig(format!("{API_KEY_ENV_VAR} is not set")))?;

        Ok(Self {
            api_key,
            ..Default::default()
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::InvalidConfig("API key is required".to_string()));
        }

        for url in [&self.single_api_url, &self.bulk_api_url].into_iter().flatten() {
            validate_base_url(url)?;
        }

        Ok(())
    }

    /// Get the single API base URL, falling back to the default if not set
    pub fn get_single_api_url(&self) -> String {
        trimmed(&self.single_api_url, DEFAULT_SINGLE_API_URL)
    }

    /// Get the bulk API base URL, falling back to the default if not set
    pub fn get_bulk_api_url(&self) -> String {
        trimmed(&self.bulk_api_url, DEFAULT_BULK_API_URL)
    }

    /// Get the timeout in seconds, falling back to the default if not set
    pub fn get_timeout_seconds(&self) -> u64 {
        // The single endpoint may itself hold a connection for up to 60s.
        self.timeout_seconds.unwrap_or(90)
    }
}

fn trimmed(url: &Option<String>, default: &str) -> String {
    url.as_deref()
        .unwrap_or(default)
        .trim_end_matches('/')
        .to_string()
}

fn validate_base_url(url: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(Error::InvalidConfig("Base URL cannot be empty".to_string()));
    }

    let parsed = url::Url::parse(url)
        .map_err(|e| Error::InvalidConfig(format!("Invalid base URL {url}: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(Error::InvalidConfig(format!(
            "Base URL must use http or https, got {scheme}"
        ))),
    }
}
