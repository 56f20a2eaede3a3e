//! Settings for talking to the remote client service.

use crate::domain::ClientId;
use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Path of the clients collection on the remote service
pub const CLIENTS_PATH: &str = "/api/v1/clients";

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

const ENV_API_URL: &str = "CLIENTBOARD_API_URL";
const ENV_TIMEOUT_SECS: &str = "CLIENTBOARD_TIMEOUT_SECS";
const ENV_MAX_RETRIES: &str = "CLIENTBOARD_MAX_RETRIES";

/// What to do with an optimistic move when the remote update fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Restore the board as it was before the drop
    #[default]
    Rollback,
    /// Leave the local move in place
    KeepOptimistic,
}

/// Remote sync configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub base_url: String,
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    pub max_retries: u32,
    #[serde(with = "duration_millis")]
    pub retry_delay: Duration,
    pub failure_policy: FailurePolicy,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 2,
            retry_delay: Duration::from_millis(250),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl SyncConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Defaults overridden by `CLIENTBOARD_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL) {
            config.base_url = url;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs = secs.parse::<u64>().map_err(|_| {
                BoardError::ConfigError(format!(
                    "{} must be a number of seconds: {}",
                    ENV_TIMEOUT_SECS, secs
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(retries) = lookup(ENV_MAX_RETRIES) {
            config.max_retries = retries.parse::<u32>().map_err(|_| {
                BoardError::ConfigError(format!(
                    "{} must be a non-negative integer: {}",
                    ENV_MAX_RETRIES, retries
                ))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(BoardError::ConfigError(format!(
                "base URL must start with http:// or https://: {}",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(BoardError::ConfigError("timeout must be non-zero".to_string()));
        }
        Ok(())
    }

    /// URL of the clients collection
    pub fn clients_url(&self) -> String {
        format!("{}{}", self.base_url.trim().trim_end_matches('/'), CLIENTS_PATH)
    }

    /// URL of a single client
    pub fn client_url(&self, id: &ClientId) -> String {
        format!("{}/{}", self.clients_url(), id)
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}

mod duration_millis {
    use serde::{ser, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(d.as_millis())
            .map_err(|_| ser::Error::custom(format!("duration too large: {:?}", d)))?;
        s.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
