//! Configuration for the HTTP search client

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default connect timeout (10 seconds)
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default timeout for a whole request (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Transport settings for [`crate::TwitterClient`]
///
/// # Examples
///
/// ```
/// use tweetscan_client::ClientConfig;
///
/// let config = ClientConfig::default();
/// assert_eq!(config.request_timeout_secs, 30);
/// assert!(config.user_agent.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Maximum time to establish a TCP/TLS connection (seconds)
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Maximum time for a whole request (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// User agent override; the application name is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment
    #[serde(default = "default_use_system_proxy")]
    pub use_system_proxy: bool,
}

fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_use_system_proxy() -> bool {
    true
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: None,
            use_system_proxy: true,
        }
    }
}

impl ClientConfig {
    /// Connect timeout as a Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.connect_timeout_secs == 0 {
            return Err("connect_timeout_secs must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        if matches!(&self.user_agent, Some(ua) if ua.trim().is_empty()) {
            return Err("user_agent must not be blank".to_string());
        }
        Ok(())
    }
}
