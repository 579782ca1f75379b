use super::RecordType;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

/// Typed rdata payload.
///
/// Name-valued payloads (CNAME, NS, PTR, MX exchange) are kept as
/// normalized lowercase names without the trailing dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Cname(Arc<str>),
    Ns(Arc<str>),
    Mx {
        preference: u16,
        exchange: Arc<str>,
    },
    Txt(String),
    Ptr(Arc<str>),
    Soa {
        mname: Arc<str>,
        minimum: u32,
    },
}

impl RecordData {
    pub fn as_ip(&self) -> Option<IpAddr> {
        match self {
            RecordData::A(addr) => Some(IpAddr::V4(*addr)),
            RecordData::Aaaa(addr) => Some(IpAddr::V6(*addr)),
            _ => None,
        }
    }

    pub fn as_target_name(&self) -> Option<&Arc<str>> {
        match self {
            RecordData::Cname(name) | RecordData::Ns(name) | RecordData::Ptr(name) => Some(name),
            RecordData::Mx { exchange, .. } => Some(exchange),
            _ => None,
        }
    }
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::A(addr) => write!(f, "{addr}"),
            RecordData::Aaaa(addr) => write!(f, "{addr}"),
            RecordData::Cname(name) => write!(f, "{name}"),
            RecordData::Ns(name) => write!(f, "{name}"),
            RecordData::Mx {
                preference,
                exchange,
            } => write!(f, "{preference} {exchange}"),
            RecordData::Txt(text) => write!(f, "{text}"),
            RecordData::Ptr(name) => write!(f, "{name}"),
            RecordData::Soa { mname, minimum } => write!(f, "{mname} {minimum}"),
        }
    }
}

/// A single resource record as parsed from a response message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    /// Owner name
    pub name: Arc<str>,
    /// Record type
    pub record_type: RecordType,
    /// Time to live in seconds, as advertised by the authority
    pub ttl: u32,
    /// Typed payload
    pub data: RecordData,
}

impl DnsRecord {
    pub fn new(
        name: impl Into<Arc<str>>,
        record_type: RecordType,
        ttl: u32,
        data: RecordData,
    ) -> Self {
        Self {
            name: name.into(),
            record_type,
            ttl,
            data,
        }
    }
}

impl fmt::Display for DnsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.name, self.ttl, self.record_type, self.data
        )
    }
}
