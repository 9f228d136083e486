//! Core traits for the DDNS updater
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`IpSource`]: Look up the host address through an external service
//! - [`InterfaceSource`]: Enumerate addresses on local interfaces
//! - [`DnsProvider`]: Read and write DNS records via a provider API

pub mod dns_provider;
pub mod ip_source;

pub use dns_provider::{DnsProvider, RecordLookup};
pub use ip_source::{InterfaceSource, IpSource};
