//! Test doubles and common utilities for contract tests
//!
//! These doubles count calls so tests can assert on exactly which provider
//! and source operations a run performed.

#![allow(dead_code)]

use ddns_core::error::{Error, Result};
use ddns_core::traits::{DnsProvider, InterfaceSource, IpSource};
use ddns_core::types::{DnsRecord, IpVersion, NetworkAddress, RecordDraft, RecordType, Zone};
use ddns_core::AddressResolver;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Id handed out by [`MockDnsProvider::create_record`]
pub const CREATED_ID: &str = "created-id";

/// A mock DnsProvider backed by in-memory zones and records
pub struct MockDnsProvider {
    zones: Arc<Mutex<Vec<Zone>>>,
    records: Arc<Mutex<Vec<DnsRecord>>>,
    /// Fail every list_records call with a provider error
    fail_lookups: bool,
    /// Fail every create/update call with a provider error
    fail_writes: bool,
    list_zones_calls: Arc<AtomicUsize>,
    list_records_calls: Arc<AtomicUsize>,
    create_calls: Arc<AtomicUsize>,
    update_calls: Arc<AtomicUsize>,
    /// Drafts passed to create/update, in call order
    writes: Arc<Mutex<Vec<(String, RecordDraft)>>>,
}

impl MockDnsProvider {
    /// A provider that knows one zone, `example.com` with id `zone1`
    pub fn new() -> Self {
        Self {
            zones: Arc::new(Mutex::new(vec![zone()])),
            records: Arc::new(Mutex::new(Vec::new())),
            fail_lookups: false,
            fail_writes: false,
            list_zones_calls: Arc::new(AtomicUsize::new(0)),
            list_records_calls: Arc::new(AtomicUsize::new(0)),
            create_calls: Arc::new(AtomicUsize::new(0)),
            update_calls: Arc::new(AtomicUsize::new(0)),
            writes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_record(self, record: DnsRecord) -> Self {
        self.records.lock().unwrap().push(record);
        self
    }

    pub fn without_zones(self) -> Self {
        self.zones.lock().unwrap().clear();
        self
    }

    pub fn failing_lookups(mut self) -> Self {
        self.fail_lookups = true;
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Create a new MockDnsProvider that shares state and counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            zones: Arc::clone(&other.zones),
            records: Arc::clone(&other.records),
            fail_lookups: other.fail_lookups,
            fail_writes: other.fail_writes,
            list_zones_calls: Arc::clone(&other.list_zones_calls),
            list_records_calls: Arc::clone(&other.list_records_calls),
            create_calls: Arc::clone(&other.create_calls),
            update_calls: Arc::clone(&other.update_calls),
            writes: Arc::clone(&other.writes),
        }
    }

    pub fn list_zones_calls(&self) -> usize {
        self.list_zones_calls.load(Ordering::SeqCst)
    }

    pub fn list_records_calls(&self) -> usize {
        self.list_records_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    /// Number of create plus update calls
    pub fn write_calls(&self) -> usize {
        self.create_calls() + self.update_calls()
    }

    pub fn writes(&self) -> Vec<(String, RecordDraft)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn list_zones_by_name(&self, name: &str) -> Result<Vec<Zone>> {
        self.list_zones_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .zones
            .lock()
            .unwrap()
            .iter()
            .filter(|z| z.name == name)
            .cloned()
            .collect())
    }

    async fn list_records(
        &self,
        zone_id: &str,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>> {
        self.list_records_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_lookups {
            return Err(Error::auth("token rejected"));
        }

        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.zone_id == zone_id && r.name == name && r.record_type == record_type)
            .cloned()
            .collect())
    }

    async fn create_record(&self, zone_id: &str, draft: &RecordDraft) -> Result<DnsRecord> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(Error::provider("mock", "create rejected"));
        }

        self.writes
            .lock()
            .unwrap()
            .push((String::new(), draft.clone()));
        let record = draft.clone().into_record(CREATED_ID, zone_id);
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        draft: &RecordDraft,
    ) -> Result<DnsRecord> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(Error::provider("mock", "update rejected"));
        }

        self.writes
            .lock()
            .unwrap()
            .push((record_id.to_string(), draft.clone()));

        let mut records = self.records.lock().unwrap();
        let stored = records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| Error::provider("mock", "unknown record id"))?;
        stored.content = draft.content.clone();
        debug_assert_eq!(stored.zone_id, zone_id);
        Ok(stored.clone())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// An IpSource returning fixed addresses and counting calls
pub struct FixedIpSource {
    v4: Option<IpAddr>,
    v6: Option<IpAddr>,
    calls: Arc<AtomicUsize>,
}

impl FixedIpSource {
    pub fn new(v4: Option<&str>, v6: Option<&str>) -> Self {
        Self {
            v4: v4.map(|a| a.parse().unwrap()),
            v6: v6.map(|a| a.parse().unwrap()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait::async_trait]
impl IpSource for FixedIpSource {
    async fn current(&self, version: IpVersion) -> Result<IpAddr> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let addr = match version {
            IpVersion::V4 => self.v4,
            IpVersion::V6 => self.v6,
        };
        addr.ok_or_else(|| Error::external_lookup(format!("no {} connectivity", version)))
    }
}

/// An InterfaceSource returning a fixed enumeration
pub struct FixedInterfaces {
    addresses: Vec<NetworkAddress>,
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl FixedInterfaces {
    pub fn new(addresses: &[(&str, &str)]) -> Self {
        Self {
            addresses: addresses
                .iter()
                .map(|(ip, iface)| NetworkAddress::new(ip.parse().unwrap(), *iface))
                .collect(),
            fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            addresses: Vec::new(),
            fail: true,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl InterfaceSource for FixedInterfaces {
    fn addresses(&self) -> Result<Vec<NetworkAddress>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(std::io::Error::other("interface enumeration failed").into());
        }
        Ok(self.addresses.clone())
    }
}

/// The zone every mock provider knows about
pub fn zone() -> Zone {
    Zone {
        id: "zone1".to_string(),
        name: "example.com".to_string(),
    }
}

/// A stored record in `zone1`
pub fn stored_record(name: &str, record_type: RecordType, content: &str) -> DnsRecord {
    DnsRecord {
        id: format!("rec-{}", record_type),
        zone_id: "zone1".to_string(),
        name: name.to_string(),
        record_type,
        content: content.to_string(),
    }
}

/// A resolver over a typical dual-stack host: a public and a private
/// address of each family behind a loopback interface
pub fn dual_stack_resolver() -> AddressResolver {
    AddressResolver::new(
        Box::new(FixedIpSource::new(Some("198.51.100.1"), Some("2001:db8::100"))),
        Box::new(FixedInterfaces::new(&[
            ("127.0.0.1", "lo"),
            ("::1", "lo"),
            ("192.168.1.20", "eth0"),
            ("fe80::20", "eth0"),
            ("203.0.113.20", "eth0"),
            ("2001:db8::20", "eth0"),
        ])),
    )
}
