// # Local IP Source
//
// This crate provides the host-side inputs of a run:
// - [`LocalInterfaces`]: every address on every interface (`local-ip-address`)
// - [`local_hostname`]: the OS hostname (`hostname`)

use ddns_core::traits::InterfaceSource;
use ddns_core::types::NetworkAddress;
use ddns_core::{Error, Result};
use std::io;

/// Interface enumeration over the OS address table
///
/// Returns loopback and link-local addresses too. Selection happens in
/// `ddns_core::AddressResolver`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalInterfaces;

impl LocalInterfaces {
    pub fn new() -> Self {
        Self
    }
}

impl InterfaceSource for LocalInterfaces {
    fn addresses(&self) -> Result<Vec<NetworkAddress>> {
        let interfaces = local_ip_address::list_afinet_netifas()
            .map_err(|e| io::Error::other(e.to_string()))?;

        tracing::debug!("Enumerated {} interface addresses", interfaces.len());
        Ok(interfaces
            .into_iter()
            .map(|(name, address)| NetworkAddress::new(address, name))
            .collect())
    }
}

/// The OS hostname, used when no hostname is given on the command line
///
/// # Returns
///
/// - `Err(Error::Config)`: The hostname is unavailable, empty, or not UTF-8
pub fn local_hostname() -> Result<String> {
    let name = hostname::get()
        .map_err(|e| Error::config(format!("Failed to read the local hostname: {}", e)))?;

    let name = name
        .into_string()
        .map_err(|raw| Error::config(format!("The local hostname is not UTF-8: {:?}", raw)))?;

    if name.is_empty() {
        return Err(Error::config("The local hostname is empty; pass --hostname"));
    }
    Ok(name)
}
