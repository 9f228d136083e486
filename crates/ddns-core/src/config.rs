//! Configuration types for a single update run
//!
//! The driver fills an [`UpdateConfig`] from the command line and the
//! process environment; nothing in the core reads either directly.

use crate::error::{Error, Result};
use crate::types::IpVersion;
use serde::{Deserialize, Serialize};

/// Maximum length of a domain name (RFC 1035)
const MAX_NAME_LEN: usize = 253;

/// Maximum length of a single label (RFC 1035)
const MAX_LABEL_LEN: usize = 63;

/// Everything one invocation needs to know
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateConfig {
    /// Zone name (e.g. "example.com")
    pub zone: String,

    /// Host label, from `--hostname` or the OS hostname
    pub hostname: String,

    /// Optional label placed before the hostname
    #[serde(default)]
    pub prefix: Option<String>,

    /// Optional label placed between the hostname and the zone
    #[serde(default)]
    pub suffix: Option<String>,

    /// IP families to process
    #[serde(default)]
    pub families: IpFamilies,

    /// Where addresses come from
    #[serde(default)]
    pub source: AddressSource,

    /// Compute and report outcomes without writing
    #[serde(default)]
    pub dry_run: bool,
}

impl UpdateConfig {
    /// Create a configuration for `hostname` in `zone` with defaults
    /// (both families, interface lookup, live mode)
    pub fn new(zone: impl Into<String>, hostname: impl Into<String>) -> Self {
        Self {
            zone: zone.into(),
            hostname: hostname.into(),
            prefix: None,
            suffix: None,
            families: IpFamilies::default(),
            source: AddressSource::default(),
            dry_run: false,
        }
    }

    /// Set the prefix label; an empty string clears it
    pub fn with_prefix(mut self, prefix: Option<String>) -> Self {
        self.prefix = prefix.filter(|p| !p.is_empty());
        self
    }

    /// Set the suffix label; an empty string clears it
    pub fn with_suffix(mut self, suffix: Option<String>) -> Self {
        self.suffix = suffix.filter(|s| !s.is_empty());
        self
    }

    pub fn with_families(mut self, families: IpFamilies) -> Self {
        self.families = families;
        self
    }

    pub fn with_source(mut self, source: AddressSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// The fully-qualified record name: `[prefix.]hostname.[suffix.]zone`
    pub fn record_name(&self) -> String {
        let mut labels: Vec<&str> = Vec::with_capacity(4);
        if let Some(prefix) = self.prefix.as_deref() {
            labels.push(prefix);
        }
        labels.push(&self.hostname);
        if let Some(suffix) = self.suffix.as_deref() {
            labels.push(suffix);
        }
        labels.push(&self.zone);
        labels.join(".")
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.zone.is_empty() {
            return Err(Error::config("Zone name is required"));
        }
        if self.hostname.is_empty() {
            return Err(Error::config("Hostname cannot be empty"));
        }

        validate_domain_name(&self.record_name())
    }
}

/// Which address families a run processes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpFamilies {
    /// IPv4 only (A record)
    V4,
    /// IPv6 only (AAAA record)
    V6,
    /// IPv4 then IPv6
    #[default]
    Both,
}

impl IpFamilies {
    /// Selection from the `--ipv4` / `--ipv6` flags; neither means both
    pub fn from_flags(ipv4: bool, ipv6: bool) -> Self {
        match (ipv4, ipv6) {
            (true, false) => IpFamilies::V4,
            (false, true) => IpFamilies::V6,
            _ => IpFamilies::Both,
        }
    }

    /// Versions in processing order
    pub fn versions(self) -> &'static [IpVersion] {
        match self {
            IpFamilies::V4 => &[IpVersion::V4],
            IpFamilies::V6 => &[IpVersion::V6],
            IpFamilies::Both => &[IpVersion::V4, IpVersion::V6],
        }
    }
}

/// Where the host address is taken from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AddressSource {
    /// Ask the external address-echo service
    External,

    /// Pick an address from the local interfaces
    Interface {
        /// Only consider this interface (e.g. "eth0")
        interface: Option<String>,
    },
}

impl AddressSource {
    /// Interface lookup, restricted to `interface` when it is non-empty
    pub fn interface(interface: Option<String>) -> Self {
        AddressSource::Interface {
            interface: interface.filter(|i| !i.is_empty()),
        }
    }
}

impl Default for AddressSource {
    fn default() -> Self {
        AddressSource::Interface { interface: None }
    }
}

/// Basic RFC 1035 length checks on an assembled record name
fn validate_domain_name(name: &str) -> Result<()> {
    if name.len() > MAX_NAME_LEN {
        return Err(Error::config(format!(
            "Record name too long: {} chars (max {}). Got: {}",
            name.len(),
            MAX_NAME_LEN,
            name
        )));
    }

    for label in name.trim_end_matches('.').split('.') {
        if label.is_empty() {
            return Err(Error::config(format!(
                "Record name has empty label: '{}'",
                name
            )));
        }

        if label.len() > MAX_LABEL_LEN {
            return Err(Error::config(format!(
                "Record label too long: {} chars (max {}). Label: '{}'",
                label.len(),
                MAX_LABEL_LEN,
                label
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_name_with_prefix_and_suffix() {
        let config = UpdateConfig::new("example.com", "h")
            .with_prefix(Some("p".to_string()))
            .with_suffix(Some("s".to_string()));

        assert_eq!(config.record_name(), "p.h.s.example.com");
    }

    #[test]
    fn test_record_name_plain() {
        let config = UpdateConfig::new("example.com", "h");
        assert_eq!(config.record_name(), "h.example.com");
    }

    #[test]
    fn test_record_name_ignores_empty_labels() {
        let config = UpdateConfig::new("example.com", "h")
            .with_prefix(Some(String::new()))
            .with_suffix(Some("dyn".to_string()));

        assert_eq!(config.record_name(), "h.dyn.example.com");
    }

    #[test]
    fn test_families_from_flags() {
        assert_eq!(IpFamilies::from_flags(false, false), IpFamilies::Both);
        assert_eq!(IpFamilies::from_flags(true, true), IpFamilies::Both);
        assert_eq!(IpFamilies::from_flags(true, false).versions(), &[IpVersion::V4]);
        assert_eq!(
            IpFamilies::Both.versions(),
            &[IpVersion::V4, IpVersion::V6]
        );
    }

    #[test]
    fn test_validate_rejects_bad_names() {
        assert!(UpdateConfig::new("", "h").validate().is_err());
        assert!(UpdateConfig::new("example.com", "").validate().is_err());
        assert!(UpdateConfig::new("example..com", "h").validate().is_err());
        assert!(
            UpdateConfig::new("example.com", "a".repeat(64))
                .validate()
                .is_err()
        );
        assert!(UpdateConfig::new("example.com", "host").validate().is_ok());
    }

    #[test]
    fn test_interface_source_drops_empty_filter() {
        assert_eq!(
            AddressSource::interface(Some(String::new())),
            AddressSource::Interface { interface: None }
        );
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = UpdateConfig::new("example.com", "h")
            .with_source(AddressSource::External)
            .with_dry_run(true);

        let json = serde_json::to_string(&config).unwrap();
        let parsed: UpdateConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
