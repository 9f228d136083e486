//! Data model shared by the resolver, the reconciler and the provider crates

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

/// IP version (v4 or v6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpVersion {
    V4,
    V6,
}

impl IpVersion {
    /// Version of an address, by literal form
    pub fn of(addr: &IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => IpVersion::V4,
            IpAddr::V6(_) => IpVersion::V6,
        }
    }

    /// Whether `addr` belongs to this version
    pub fn matches(self, addr: &IpAddr) -> bool {
        Self::of(addr) == self
    }

    /// The DNS record type that carries addresses of this version
    pub fn record_type(self) -> RecordType {
        match self {
            IpVersion::V4 => RecordType::A,
            IpVersion::V6 => RecordType::Aaaa,
        }
    }
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpVersion::V4 => write!(f, "IPv4"),
            IpVersion::V6 => write!(f, "IPv6"),
        }
    }
}

/// DNS record type managed by this tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    /// A record (IPv4)
    #[serde(rename = "A")]
    A,
    /// AAAA record (IPv6)
    #[serde(rename = "AAAA")]
    Aaaa,
}

impl RecordType {
    /// Wire name of the record type
    pub fn as_str(self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An address assigned to a local network interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkAddress {
    /// The assigned address
    pub address: IpAddr,
    /// Name of the interface carrying the address (e.g. "eth0")
    pub interface: String,
}

impl NetworkAddress {
    pub fn new(address: IpAddr, interface: impl Into<String>) -> Self {
        Self {
            address,
            interface: interface.into(),
        }
    }

    pub fn version(&self) -> IpVersion {
        IpVersion::of(&self.address)
    }
}

/// A provider zone, resolved by name once per run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
}

/// A DNS record as stored by the provider
///
/// `id` is empty for records that have only been built locally (dry-run create).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub zone_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub content: String,
}

impl DnsRecord {
    /// The write payload that would reproduce this record with `content`
    pub fn draft_with_content(&self, content: impl Into<String>) -> RecordDraft {
        RecordDraft {
            name: self.name.clone(),
            record_type: self.record_type,
            content: content.into(),
        }
    }
}

/// Write payload for record create and update calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub content: String,
}

impl RecordDraft {
    /// Materialize the draft as a record that has not been persisted
    pub fn into_record(self, id: impl Into<String>, zone_id: impl Into<String>) -> DnsRecord {
        DnsRecord {
            id: id.into(),
            zone_id: zone_id.into(),
            name: self.name,
            record_type: self.record_type,
            content: self.content,
        }
    }
}
