//! Navitia client configuration

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::session::{DEFAULT_MAX_RESPONSE_SIZE, NAVITIA_API_URL};

/// Configuration for a Navitia session
#[derive(Clone, Serialize, Deserialize)]
pub struct NavitiaConfig {
    /// Base URL of the API, including the version segment
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent as the basic-auth user name (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum accepted response body size in bytes
    #[serde(default = "default_max_response_size")]
    pub max_response_size: u64,

    /// Cache TTL for region lookups in minutes (0 to disable caching)
    #[serde(default = "default_cache_ttl_minutes")]
    pub cache_ttl_minutes: u32,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl std::fmt::Debug for NavitiaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavitiaConfig")
            .field("base_url", &self.base_url)
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("timeout_secs", &self.timeout_secs)
            .field("max_response_size", &self.max_response_size)
            .field("cache_ttl_minutes", &self.cache_ttl_minutes)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn default_base_url() -> String {
    NAVITIA_API_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_max_response_size() -> u64 {
    DEFAULT_MAX_RESPONSE_SIZE
}

const fn default_cache_ttl_minutes() -> u32 {
    60
}

fn default_user_agent() -> String {
    format!("navitia-rs/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for NavitiaConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            max_response_size: default_max_response_size(),
            cache_ttl_minutes: default_cache_ttl_minutes(),
            user_agent: default_user_agent(),
        }
    }
}

impl NavitiaConfig {
    /// Create a configuration with the given API key and default settings
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(SecretString::from(api_key.into())),
            ..Default::default()
        }
    }

    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            api_key: Some(SecretString::from("test-key")),
            timeout_secs: 5,
            cache_ttl_minutes: 0,
            ..Default::default()
        }
    }

    /// Get the API key as a string reference (for API calls)
    #[must_use]
    pub fn api_key_str(&self) -> Option<&str> {
        self.api_key.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Check if caching is enabled
    #[must_use]
    pub const fn caching_enabled(&self) -> bool {
        self.cache_ttl_minutes > 0
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if url::Url::parse(&self.base_url).is_err() {
            return Err(format!("base_url is not a valid URL: {}", self.base_url));
        }

        if self.api_key_str().is_none_or(|key| key.trim().is_empty()) {
            return Err("api_key must be set".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.max_response_size == 0 {
            return Err("max_response_size must be greater than 0".to_string());
        }

        Ok(())
    }
}
