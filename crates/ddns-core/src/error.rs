//! Error types for the DDNS updater
//!
//! This module defines all error types used throughout the workspace.
//! A missing DNS record is deliberately absent here: record lookups return
//! [`RecordLookup::NotFound`](crate::traits::RecordLookup) instead.

use crate::types::IpVersion;
use thiserror::Error;

/// Result type alias for DDNS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the DDNS updater
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors (missing credential, invalid arguments)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The zone named on the command line does not exist at the provider
    #[error("Zone not found: {0}")]
    ZoneNotFound(String),

    /// No local interface address matched the requested version and filter
    #[error("No {version} address found{}", interface.as_deref().map(|i| format!(" on interface {i}")).unwrap_or_default())]
    NoAddressFound {
        /// Requested IP version
        version: IpVersion,
        /// Interface filter in effect, if any
        interface: Option<String>,
    },

    /// The external address-echo lookup failed
    #[error("External address lookup failed: {0}")]
    ExternalLookup(String),

    /// Local interface enumeration failed
    #[error("Interface enumeration failed: {0}")]
    Interfaces(#[from] std::io::Error),

    /// Authentication errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limiting errors
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Provider-specific error
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a "zone not found" error
    pub fn zone_not_found(zone: impl Into<String>) -> Self {
        Self::ZoneNotFound(zone.into())
    }

    /// Create an external lookup error
    pub fn external_lookup(msg: impl Into<String>) -> Self {
        Self::ExternalLookup(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a rate limit error
    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimited(msg.into())
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Whether this error comes from the user's configuration rather than the run itself
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Whether this error was raised while resolving the host address
    pub fn is_address_resolution(&self) -> bool {
        matches!(
            self,
            Self::NoAddressFound { .. } | Self::ExternalLookup(_) | Self::Interfaces(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_address_message_mentions_interface() {
        let err = Error::NoAddressFound {
            version: IpVersion::V6,
            interface: Some("eth0".to_string()),
        };
        assert_eq!(err.to_string(), "No IPv6 address found on interface eth0");

        let err = Error::NoAddressFound {
            version: IpVersion::V4,
            interface: None,
        };
        assert_eq!(err.to_string(), "No IPv4 address found");
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::config("missing token").is_config());
        assert!(!Error::zone_not_found("example.com").is_config());
        assert!(Error::external_lookup("timeout").is_address_resolution());
        assert!(!Error::provider("cloudflare", "boom").is_address_resolution());
    }
}
