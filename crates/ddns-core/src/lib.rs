// # ddns-core
//
// Core library for the cfddns one-shot DNS updater.
//
// ## Architecture Overview
//
// This library provides the core functionality for a single DDNS pass:
// - **IpSource / InterfaceSource**: Traits for finding the host address
// - **DnsProvider**: Trait for reading and writing records via a provider API
// - **AddressResolver**: Picks the address to publish for an IP version
// - **Reconciler**: Decides create / update / unchanged for one record
// - **Updater**: Runs the zone lookup and one reconcile per IP family
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from provider and OS code
// 2. **Explicit inputs**: Hostname and environment arrive through `UpdateConfig`
// 3. **Library-First**: The binary only parses arguments and reports results

pub mod config;
pub mod engine;
pub mod error;
pub mod reconcile;
pub mod resolver;
pub mod traits;
pub mod types;

// Re-export core types for convenience
pub use config::{AddressSource, IpFamilies, UpdateConfig};
pub use engine::Updater;
pub use error::{Error, Result};
pub use reconcile::{Outcome, Reconciler};
pub use resolver::AddressResolver;
pub use traits::{DnsProvider, InterfaceSource, IpSource, RecordLookup};
pub use types::{DnsRecord, IpVersion, NetworkAddress, RecordDraft, RecordType, Zone};
