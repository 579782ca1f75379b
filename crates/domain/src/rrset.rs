use super::dns_record::DnsRecord;
use super::RecordType;
use std::net::IpAddr;
use std::sync::Arc;

/// Non-empty ordered set of records sharing owner name and type.
///
/// This is the unit the cache stores and the resolver returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RRSet {
    name: Arc<str>,
    record_type: RecordType,
    records: Vec<DnsRecord>,
}

impl RRSet {
    /// Build an RRset from parsed records. Returns `None` when `records`
    /// is empty, which keeps "empty answer" and "answer" distinct types.
    pub fn new(
        name: impl Into<Arc<str>>,
        record_type: RecordType,
        records: Vec<DnsRecord>,
    ) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        Some(Self {
            name: name.into(),
            record_type,
            records,
        })
    }

    pub fn name(&self) -> &Arc<str> {
        &self.name
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    pub fn records(&self) -> &[DnsRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false: the constructor rejects empty record lists, so an
    /// `RRSet` that exists holds at least one record.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Smallest advertised TTL across the set. Drives the record-TTL
    /// cache policy.
    pub fn min_ttl(&self) -> u32 {
        self.records
            .iter()
            .map(|r| r.ttl)
            .min()
            .unwrap_or_default()
    }

    /// Address payloads in record order (A/AAAA sets).
    pub fn addresses(&self) -> Vec<IpAddr> {
        self.records.iter().filter_map(|r| r.data.as_ip()).collect()
    }

    /// Textual rdata in record order, for console output.
    pub fn values(&self) -> Vec<String> {
        self.records.iter().map(|r| r.data.to_string()).collect()
    }
}
