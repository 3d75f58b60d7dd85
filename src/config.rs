//! Configuration for spamc
//!
//! Centralized client configuration with the same defaults as the
//! reference `spamc` tool.

use std::time::Duration;

/// Default spamd port
pub const DEFAULT_PORT: u16 = 783;

/// Protocol version sent in every request line
pub const PROTOCOL_VERSION: &str = "1.5";

/// Client configuration, fixed once a [`Client`](crate::Client) is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// spamd host name or IP address
    pub host: String,

    /// spamd TCP port
    pub port: u16,

    /// Deadline for a whole exchange (connect, write, read until close)
    pub timeout_secs: u64,

    // -------------------------------------------------------------------------
    // Protocol Configuration
    // -------------------------------------------------------------------------
    /// Version advertised as `SPAMC/<version>`
    pub protocol_version: String,

    /// Sent as a `User:` header so spamd loads that user's preferences
    pub user: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            timeout_secs: 10,
            protocol_version: PROTOCOL_VERSION.to_string(),
            user: None,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// `host:port` string handed to the TCP connector
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Exchange deadline as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the spamd host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the spamd port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the exchange timeout (in seconds)
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    /// Override the advertised protocol version
    pub fn protocol_version(mut self, version: impl Into<String>) -> Self {
        self.config.protocol_version = version.into();
        self
    }

    /// Set the user whose preferences spamd should apply
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.config.user = Some(user.into());
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
