// # DNS Provider Trait
//
// Defines the narrow interface the updater needs from a DNS provider API.
//
// ## Implementations
//
// - Cloudflare: `ddns-provider-cloudflare` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::DnsProvider;
// use ddns_core::types::RecordType;
//
// let zone = provider.zone_by_name("example.com").await?;
// match provider.lookup_record(&zone.id, "host.example.com", RecordType::A).await? {
//     RecordLookup::Found(record) => println!("current: {}", record.content),
//     RecordLookup::NotFound => println!("no record yet"),
// }
// ```

use crate::error::{Error, Result};
use crate::types::{DnsRecord, RecordDraft, RecordType, Zone};
use async_trait::async_trait;

/// Result of looking up a record by (zone, name, type)
///
/// A missing record is an expected condition that selects the create path,
/// so it is a variant here rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordLookup {
    /// The first record the provider returned for the key
    Found(DnsRecord),
    /// The provider has no record for the key
    NotFound,
}

/// Trait for DNS provider implementations
///
/// Every method is a single API round trip. Implementations must not retry,
/// cache, or decide whether a write is needed; that belongs to
/// [`Reconciler`](crate::reconcile::Reconciler).
///
/// # Errors
///
/// Transport, authentication, rate-limit and malformed-response failures are
/// returned as [`Error`] and abort the run.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// List the zones whose name equals `name`
    async fn list_zones_by_name(&self, name: &str) -> Result<Vec<Zone>>;

    /// List records in `zone_id` matching `name` and `record_type`
    async fn list_records(
        &self,
        zone_id: &str,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>>;

    /// Create a record and return it as stored (with its provider-assigned id)
    async fn create_record(&self, zone_id: &str, draft: &RecordDraft) -> Result<DnsRecord>;

    /// Replace the content of an existing record and return it as stored
    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        draft: &RecordDraft,
    ) -> Result<DnsRecord>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;

    /// Resolve a zone by name; the first zone returned wins
    async fn zone_by_name(&self, name: &str) -> Result<Zone> {
        let zones = self.list_zones_by_name(name).await?;
        tracing::debug!("Provider returned {} zone(s) for {}", zones.len(), name);

        zones
            .into_iter()
            .next()
            .ok_or_else(|| Error::zone_not_found(name))
    }

    /// Look up a record by (zone, name, type); the first match wins
    async fn lookup_record(
        &self,
        zone_id: &str,
        name: &str,
        record_type: RecordType,
    ) -> Result<RecordLookup> {
        let records = self.list_records(zone_id, name, record_type).await?;
        if records.len() > 1 {
            tracing::debug!(
                "Provider returned {} {} records for {}, using the first",
                records.len(),
                record_type,
                name
            );
        }

        Ok(match records.into_iter().next() {
            Some(record) => RecordLookup::Found(record),
            None => RecordLookup::NotFound,
        })
    }
}
