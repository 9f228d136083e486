// # Address Source Traits
//
// Defines the two places a host address can come from.
//
// ## Implementations
//
// - External echo service: `ddns-ip-http` crate
// - Local interfaces: `ddns-ip-local` crate
//
// Both are consumed by [`AddressResolver`](crate::resolver::AddressResolver),
// which owns the selection policy. Sources only report what they see.

use crate::error::Result;
use crate::types::{IpVersion, NetworkAddress};
use async_trait::async_trait;
use std::net::IpAddr;

/// Trait for external address lookups
///
/// The address returned is the one a remote service sees for this host,
/// typically the public side of a NAT.
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Get the current external address for `version`
    ///
    /// # Returns
    ///
    /// - `Ok(IpAddr)`: The address reported by the service, of the requested version
    /// - `Err(Error::ExternalLookup)`: Transport failure, non-success status,
    ///   or a body that is not an address of the requested version
    async fn current(&self, version: IpVersion) -> Result<IpAddr>;
}

/// Trait for local interface enumeration
///
/// Enumeration is a local system call, so this trait is synchronous.
pub trait InterfaceSource: Send + Sync {
    /// List every address assigned to every local interface, in enumeration order
    ///
    /// Loopback addresses are included; filtering is the resolver's job.
    fn addresses(&self) -> Result<Vec<NetworkAddress>>;
}
