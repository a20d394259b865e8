//! Client configuration

use crate::error::{Result, SdkError};
use hosted_search_core::application::WaitPolicy;
use hosted_search_infra_http::{parse_host, HttpSettings};
use serde::Deserialize;
use std::time::Duration;

/// Prefix of the environment variables read by [`ClientConfig::from_env`]
pub const ENV_PREFIX: &str = "SEARCH";

/// Connection and waiting parameters of a [`SearchClient`](crate::SearchClient)
///
/// # Environment Variables
///
/// - `SEARCH_APPLICATION_ID`, `SEARCH_API_KEY`: credentials (required)
/// - `SEARCH_READ_HOST`, `SEARCH_WRITE_HOST`: override the default hosts
/// - `SEARCH_READ_TIMEOUT_SECS` (5), `SEARCH_WRITE_TIMEOUT_SECS` (30)
/// - `SEARCH_WAIT_MAX_ATTEMPTS` (120), `SEARCH_WAIT_DELAY_MS` (1000)
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub application_id: String,
    pub api_key: String,
    #[serde(default)]
    pub read_host: Option<String>,
    #[serde(default)]
    pub write_host: Option<String>,
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
    #[serde(default = "default_write_timeout_secs")]
    pub write_timeout_secs: u64,
    #[serde(default = "default_wait_max_attempts")]
    pub wait_max_attempts: u32,
    #[serde(default = "default_wait_delay_ms")]
    pub wait_delay_ms: u64,
}

fn default_read_timeout_secs() -> u64 {
    5
}

fn default_write_timeout_secs() -> u64 {
    30
}

fn default_wait_max_attempts() -> u32 {
    120
}

fn default_wait_delay_ms() -> u64 {
    1000
}

impl ClientConfig {
    pub fn new(application_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            api_key: api_key.into(),
            read_host: None,
            write_host: None,
            read_timeout_secs: default_read_timeout_secs(),
            write_timeout_secs: default_write_timeout_secs(),
            wait_max_attempts: default_wait_max_attempts(),
            wait_delay_ms: default_wait_delay_ms(),
        }
    }

    /// Load from `SEARCH_*` environment variables
    pub fn from_env() -> Result<Self> {
        let config: Self = ::config::Config::builder()
            .add_source(::config::Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.application_id.trim().is_empty() {
            return Err(SdkError::InvalidConfig(
                "application_id must not be empty".to_string(),
            ));
        }
        if self.api_key.trim().is_empty() {
            return Err(SdkError::InvalidConfig("api_key must not be empty".to_string()));
        }
        if self.wait_max_attempts == 0 {
            return Err(SdkError::InvalidConfig(
                "wait_max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn wait_policy(&self) -> WaitPolicy {
        WaitPolicy::new(
            self.wait_max_attempts,
            Duration::from_millis(self.wait_delay_ms),
        )
    }

    /// Settings of the REST adapter, hosts overridden where configured
    pub fn http_settings(&self) -> Result<HttpSettings> {
        let mut settings = HttpSettings::new(&self.application_id, &self.api_key)?;
        if let Some(host) = &self.read_host {
            settings.read_host = parse_host(host)?;
        }
        if let Some(host) = &self.write_host {
            settings.write_host = parse_host(host)?;
        }
        settings.read_timeout = Duration::from_secs(self.read_timeout_secs);
        settings.write_timeout = Duration::from_secs(self.write_timeout_secs);
        Ok(settings)
    }
}
