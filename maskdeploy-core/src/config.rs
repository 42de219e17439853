//! Connection parameters and session configuration.
//!
//! `ConnectionParams` holds what the operator typed at the prompts.
//! `SessionConfig` holds the operational knobs that come from CLI flags or
//! the environment.
//!
//! # Security
//! Neither type prints credentials. `Display` renders `host:port/database`.

use crate::security::Credentials;
use std::str::FromStr;
use std::time::Duration;

/// Upper bound for the connect timeout.
const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(300);

/// Parameters collected from the operator for a single connection.
#[derive(Debug, Clone)]
pub struct ConnectionParams {
    /// Cluster host name or address
    pub host: String,
    /// Database name
    pub database: String,
    /// Port number
    pub port: u16,
    /// User and password
    pub credentials: Credentials,
}

impl ConnectionParams {
    /// Creates connection parameters, moving the password into a zeroizing container.
    pub fn new(host: String, database: String, user: String, port: u16, password: String) -> Self {
        Self {
            host,
            database,
            port,
            credentials: Credentials::new(user, password),
        }
    }
}

impl std::fmt::Display for ConnectionParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Intentionally omit user and password
        write!(f, "{}:{}/{}", self.host, self.port, self.database)
    }
}

/// TLS negotiation mode for the cluster connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SslMode {
    /// Never use TLS
    Disable,
    /// Use TLS if the server offers it
    #[default]
    Prefer,
    /// Require TLS without certificate checks
    Require,
    /// Require TLS and verify the server certificate chain
    VerifyCa,
    /// Require TLS and verify chain and host name
    VerifyFull,
}

impl SslMode {
    /// Canonical name, as accepted by `FromStr`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disable => "disable",
            Self::Prefer => "prefer",
            Self::Require => "require",
            Self::VerifyCa => "verify-ca",
            Self::VerifyFull => "verify-full",
        }
    }
}

impl std::fmt::Display for SslMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SslMode {
    type Err = crate::error::MaskDeployError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disable" => Ok(Self::Disable),
            "prefer" => Ok(Self::Prefer),
            "require" => Ok(Self::Require),
            "verify-ca" | "verify_ca" => Ok(Self::VerifyCa),
            "verify-full" | "verify_full" => Ok(Self::VerifyFull),
            other => Err(crate::error::MaskDeployError::configuration(format!(
                "unknown ssl mode '{}' (expected disable, prefer, require, verify-ca, or verify-full)",
                other
            ))),
        }
    }
}

/// Operational settings for the cluster session.
///
/// # Example
/// ```rust
/// use maskdeploy_core::{SessionConfig, SslMode};
/// use std::time::Duration;
///
/// let config = SessionConfig::new()
///     .with_ssl_mode(SslMode::Require)
///     .with_connect_timeout(Duration::from_secs(10));
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long to wait for the connection handshake
    pub connect_timeout: Duration,
    /// TLS negotiation mode
    pub ssl_mode: SslMode,
    /// Reported to the server for connection tracking
    pub application_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            ssl_mode: SslMode::default(),
            application_name: format!("maskdeploy-{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl SessionConfig {
    /// Creates a session config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Builder method to set the TLS mode.
    pub fn with_ssl_mode(mut self, ssl_mode: SslMode) -> Self {
        self.ssl_mode = ssl_mode;
        self
    }

    /// Validates session configuration parameters.
    ///
    /// # Errors
    /// Returns error if the connect timeout is zero or above five minutes
    pub fn validate(&self) -> crate::Result<()> {
        if self.connect_timeout.is_zero() {
            return Err(crate::error::MaskDeployError::configuration(
                "connect timeout must be greater than 0",
            ));
        }

        if self.connect_timeout > MAX_CONNECT_TIMEOUT {
            return Err(crate::error::MaskDeployError::configuration(
                "connect timeout should not exceed 300 seconds",
            ));
        }

        if self.application_name.is_empty() {
            return Err(crate::error::MaskDeployError::configuration(
                "application name cannot be empty",
            ));
        }

        Ok(())
    }
}
