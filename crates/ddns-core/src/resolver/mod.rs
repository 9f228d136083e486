//! Address resolution
//!
//! Produces the one address a run publishes for a given IP version, either
//! from the external echo service or from the local interfaces.
//!
//! Interface selection is split into a pure part ([`classify`],
//! [`order_candidates`], [`select`]) and the [`AddressResolver`] that feeds it
//! from an [`InterfaceSource`].
//!
//! ## Selection order
//!
//! ```text
//! enumerate ──► drop loopback ──► public (enumeration order)
//!                               └► private (enumeration order)
//!                                        │
//!                                        ▼
//!                 first with matching version and interface
//! ```

use crate::config::AddressSource;
use crate::error::{Error, Result};
use crate::traits::{InterfaceSource, IpSource};
use crate::types::{IpVersion, NetworkAddress};
use std::net::{IpAddr, Ipv6Addr};
use tracing::debug;

/// Reachability class of an interface address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressScope {
    /// Globally routable as far as this tool can tell
    Public,
    /// RFC 1918 IPv4 or link-local IPv6
    Private,
}

/// Classify an address, or `None` for loopback addresses which are never candidates
pub fn classify(addr: &IpAddr) -> Option<AddressScope> {
    if addr.is_loopback() {
        return None;
    }

    let private = match addr {
        IpAddr::V4(v4) => v4.is_private(),
        IpAddr::V6(v6) => is_unicast_link_local(v6),
    };

    Some(if private {
        AddressScope::Private
    } else {
        AddressScope::Public
    })
}

// fe80::/10
fn is_unicast_link_local(addr: &Ipv6Addr) -> bool {
    (addr.segments()[0] & 0xffc0) == 0xfe80
}

/// Drop loopback addresses and put public addresses before private ones,
/// keeping enumeration order within each group
pub fn order_candidates(addresses: Vec<NetworkAddress>) -> Vec<NetworkAddress> {
    let (public, private): (Vec<_>, Vec<_>) = addresses
        .into_iter()
        .filter_map(|a| classify(&a.address).map(|scope| (scope, a)))
        .partition(|(scope, _)| *scope == AddressScope::Public);

    public
        .into_iter()
        .chain(private)
        .map(|(_, address)| address)
        .collect()
}

/// First ordered candidate of `version`, on `interface` when one is given
pub fn select<'a>(
    candidates: &'a [NetworkAddress],
    version: IpVersion,
    interface: Option<&str>,
) -> Option<&'a NetworkAddress> {
    candidates
        .iter()
        .find(|c| c.version() == version && interface.is_none_or(|name| c.interface == name))
}

/// Resolves the host address for one IP version
pub struct AddressResolver {
    /// External echo service
    external: Box<dyn IpSource>,

    /// Local interface enumeration
    interfaces: Box<dyn InterfaceSource>,
}

impl AddressResolver {
    pub fn new(external: Box<dyn IpSource>, interfaces: Box<dyn InterfaceSource>) -> Self {
        Self {
            external,
            interfaces,
        }
    }

    /// Resolve the address to publish for `version`
    ///
    /// # Returns
    ///
    /// - `Ok(IpAddr)`: An address of the requested version
    /// - `Err(Error::ExternalLookup)`: The echo service failed
    /// - `Err(Error::NoAddressFound)`: No interface address matched
    /// - `Err(Error::Interfaces)`: Enumeration itself failed
    pub async fn resolve(&self, version: IpVersion, source: &AddressSource) -> Result<IpAddr> {
        match source {
            AddressSource::External => {
                let addr = self.external.current(version).await?;
                debug!("External {} address: {}", version, addr);
                Ok(addr)
            }
            AddressSource::Interface { interface } => {
                self.resolve_from_interfaces(version, interface.as_deref())
            }
        }
    }

    fn resolve_from_interfaces(&self, version: IpVersion, interface: Option<&str>) -> Result<IpAddr> {
        let candidates = order_candidates(self.interfaces.addresses()?);

        for (index, candidate) in candidates.iter().enumerate() {
            debug!(
                "Candidate {}: {} on {}",
                index, candidate.address, candidate.interface
            );
        }

        select(&candidates, version, interface)
            .map(|c| c.address)
            .ok_or_else(|| Error::NoAddressFound {
                version,
                interface: interface.map(str::to_string),
            })
    }
}
