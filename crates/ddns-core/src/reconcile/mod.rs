//! Record reconciliation
//!
//! Decides whether the record for one (zone, name, type) must be created,
//! updated or left alone, and performs the write unless in dry-run mode.
//!
//! ```text
//!            lookup
//!   ┌──────────┴──────────┐
//! NotFound              Found
//!   │              ┌──────┴───────┐
//! create       same content    differs
//!   │              │              │
//! Created      Unchanged       update
//!                                 │
//!                              Updated
//! ```
//!
//! Any provider error on the way aborts reconciliation; there is no retry state.

use crate::error::Result;
use crate::traits::{DnsProvider, RecordLookup};
use crate::types::{DnsRecord, RecordDraft, RecordType};
use std::fmt;
use tracing::{debug, info};

/// What reconciliation did (or, in dry-run mode, would have done)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No record existed; one was created
    Created { record: DnsRecord },
    /// The record already carried the desired content
    Unchanged { record: DnsRecord },
    /// The record's content was replaced
    Updated {
        record: DnsRecord,
        previous_content: String,
    },
}

impl Outcome {
    /// The record as it stands after reconciliation
    pub fn record(&self) -> &DnsRecord {
        match self {
            Outcome::Created { record }
            | Outcome::Unchanged { record }
            | Outcome::Updated { record, .. } => record,
        }
    }

    /// Whether a write was (or would have been) needed
    pub fn is_change(&self) -> bool {
        !matches!(self, Outcome::Unchanged { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Created { record } => write!(
                f,
                "CREATED: {} {}: {}",
                record.name, record.record_type, record.content
            ),
            Outcome::Unchanged { record } => write!(
                f,
                "UNCHANGED: {} {}: {}",
                record.name, record.record_type, record.content
            ),
            Outcome::Updated {
                record,
                previous_content,
            } => write!(
                f,
                "UPDATED: {} {}: {} => {}",
                record.name, record.record_type, previous_content, record.content
            ),
        }
    }
}

/// Applies the create / update / unchanged decision against a provider
pub struct Reconciler<'a> {
    provider: &'a dyn DnsProvider,
    dry_run: bool,
}

impl<'a> Reconciler<'a> {
    pub fn new(provider: &'a dyn DnsProvider, dry_run: bool) -> Self {
        Self { provider, dry_run }
    }

    /// Bring the record for (`zone_id`, `name`, `record_type`) to `desired`
    ///
    /// In dry-run mode no write is issued and the outcome carries the locally
    /// built record; the outcome tag is the same as in live mode.
    pub async fn reconcile(
        &self,
        zone_id: &str,
        name: &str,
        record_type: RecordType,
        desired: &str,
    ) -> Result<Outcome> {
        let lookup = self
            .provider
            .lookup_record(zone_id, name, record_type)
            .await?;

        match lookup {
            RecordLookup::NotFound => {
                debug!("No {} record for {}, creating", record_type, name);
                let draft = RecordDraft {
                    name: name.to_string(),
                    record_type,
                    content: desired.to_string(),
                };

                let record = if self.dry_run {
                    info!("[DRY-RUN] Would create {} {} -> {}", name, record_type, desired);
                    draft.into_record(String::new(), zone_id)
                } else {
                    self.provider.create_record(zone_id, &draft).await?
                };

                Ok(Outcome::Created { record })
            }
            RecordLookup::Found(existing) if existing.content == desired => {
                debug!("{} {} already points at {}", name, record_type, desired);
                Ok(Outcome::Unchanged { record: existing })
            }
            RecordLookup::Found(existing) => {
                let draft = existing.draft_with_content(desired);

                let record = if self.dry_run {
                    info!(
                        "[DRY-RUN] Would update {} {}: {} -> {}",
                        name, record_type, existing.content, desired
                    );
                    draft.into_record(existing.id.clone(), existing.zone_id.clone())
                } else {
                    self.provider
                        .update_record(zone_id, &existing.id, &draft)
                        .await?
                };

                Ok(Outcome::Updated {
                    record,
                    previous_content: existing.content,
                })
            }
        }
    }
}
