//! One-shot update engine
//!
//! The [`Updater`] is responsible for:
//! - Resolving the zone once per run
//! - Resolving the host address for each requested IP family
//! - Reconciling the matching A / AAAA record
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────┐    zone_by_name    ┌─────────────┐
//! │   Updater    │───────────────────►│ DnsProvider │
//! └──────────────┘                    └─────────────┘
//!        │  for version in families (4, then 6)
//!        ▼
//! ┌──────────────────┐  address  ┌────────────┐  outcome
//! │ AddressResolver  │──────────►│ Reconciler │──────────► report
//! └──────────────────┘           └────────────┘
//! ```
//!
//! Families are processed sequentially. The first error ends the run; outcomes
//! already reported for earlier families stand.

use crate::config::UpdateConfig;
use crate::error::Result;
use crate::reconcile::{Outcome, Reconciler};
use crate::resolver::AddressResolver;
use crate::traits::DnsProvider;
use crate::types::{IpVersion, Zone};
use tracing::{debug, info, warn};

/// Runs one update pass for a single record name
pub struct Updater {
    /// DNS provider for reading and writing records
    provider: Box<dyn DnsProvider>,

    /// Address resolution for each family
    resolver: AddressResolver,

    /// Run configuration
    config: UpdateConfig,
}

impl Updater {
    /// Create an updater
    ///
    /// # Returns
    ///
    /// - `Err(Error::Config)`: If the configuration does not validate
    pub fn new(
        provider: Box<dyn DnsProvider>,
        resolver: AddressResolver,
        config: UpdateConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            provider,
            resolver,
            config,
        })
    }

    pub fn config(&self) -> &UpdateConfig {
        &self.config
    }

    /// Resolve the configured zone
    pub async fn resolve_zone(&self) -> Result<Zone> {
        let zone = self.provider.zone_by_name(&self.config.zone).await?;
        debug!("Zone {} has id {}", zone.name, zone.id);
        Ok(zone)
    }

    /// Resolve the address for `version` and reconcile its record in `zone`
    pub async fn update_family(&self, zone: &Zone, version: IpVersion) -> Result<Outcome> {
        let record_name = self.config.record_name();
        let record_type = version.record_type();

        let address = self.resolver.resolve(version, &self.config.source).await?;
        info!("Resolved {} address {} for {}", version, address, record_name);

        let reconciler = Reconciler::new(self.provider.as_ref(), self.config.dry_run);
        reconciler
            .reconcile(&zone.id, &record_name, record_type, &address.to_string())
            .await
    }

    /// Run the whole pass, calling `report` after each family completes
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Outcome>)`: One outcome per family, in processing order
    /// - `Err(Error)`: The first error; remaining families are not attempted
    pub async fn run<F>(&self, mut report: F) -> Result<Vec<Outcome>>
    where
        F: FnMut(IpVersion, &Outcome),
    {
        if self.config.dry_run {
            warn!("Dry-run mode: no records will be created or updated");
        }

        info!(
            "Updating {} via {}",
            self.config.record_name(),
            self.provider.provider_name()
        );

        let zone = self.resolve_zone().await?;

        let mut outcomes = Vec::with_capacity(2);
        for &version in self.config.families.versions() {
            let outcome = self.update_family(&zone, version).await?;
            if outcome.is_change() {
                info!("{}", outcome);
            } else {
                debug!("{}", outcome);
            }
            report(version, &outcome);
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }
}
