//! Response interpretation: answers, CNAME indirection and referral
//! extraction (authority NS names joined with additional-section glue).

use super::record_type_map::RecordTypeMapper;
use bytes::Bytes;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::{Name, RData, Record};
use rootwalk_domain::dns_record::{DnsRecord, RecordData};
use rootwalk_domain::{DomainError, RRSet, RecordType};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tracing::debug;

const DNS_PORT: u16 = 53;

/// One parsed response message, immutable after parse.
#[derive(Debug, Clone)]
pub struct ParsedResponse {
    pub rcode: ResponseCode,
    pub truncated: bool,
    /// Answer-section records the walk can interpret
    pub answers: Vec<DnsRecord>,
    /// Authority-section NS target names (normalized)
    pub authority_ns: Vec<Arc<str>>,
    /// Additional-section A records: (owner name, address)
    pub glue: Vec<(Arc<str>, Ipv4Addr)>,
}

impl ParsedResponse {
    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }

    pub fn is_server_error(&self) -> bool {
        matches!(
            self.rcode,
            ResponseCode::ServFail | ResponseCode::Refused | ResponseCode::NotImp
        )
    }

    /// Answer-section records of the requested type owned by `name`.
    pub fn answer_rrset(&self, name: &str, record_type: RecordType) -> Option<RRSet> {
        let records: Vec<DnsRecord> = self
            .answers
            .iter()
            .filter(|r| r.record_type == record_type && r.name.eq_ignore_ascii_case(name))
            .cloned()
            .collect();
        RRSet::new(name, record_type, records)
    }

    /// CNAME target for `name`, when the answer aliases it instead of
    /// answering the requested type.
    pub fn cname_target(&self, name: &str) -> Option<Arc<str>> {
        self.answers.iter().find_map(|r| {
            if r.record_type == RecordType::CNAME && r.name.eq_ignore_ascii_case(name) {
                r.data.as_target_name().cloned()
            } else {
                None
            }
        })
    }

    /// Addresses of the delegated nameservers: additional-section A glue
    /// whose owner is named by an authority-section NS record, in
    /// additional-section order. Empty when the response carries no
    /// usable referral.
    pub fn referral_servers(&self) -> Vec<SocketAddr> {
        let mut servers = Vec::new();
        for (owner, addr) in &self.glue {
            let named_in_authority = self
                .authority_ns
                .iter()
                .any(|ns| ns.eq_ignore_ascii_case(owner));
            if !named_in_authority {
                continue;
            }
            let server = SocketAddr::new(IpAddr::V4(*addr), DNS_PORT);
            if !servers.contains(&server) {
                servers.push(server);
            }
        }
        servers
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse_bytes(response_bytes: Bytes) -> Result<ParsedResponse, DomainError> {
        let message = Message::from_vec(&response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = message.response_code();
        let truncated = message.truncated();

        let answers: Vec<DnsRecord> = message
            .answers()
            .iter()
            .filter_map(convert_record)
            .collect();

        let authority_ns: Vec<Arc<str>> = message
            .name_servers()
            .iter()
            .filter_map(|r| match r.data() {
                RData::NS(ns) => Some(normalize_name(ns)),
                _ => None,
            })
            .collect();

        let glue: Vec<(Arc<str>, Ipv4Addr)> = message
            .additionals()
            .iter()
            .filter_map(|r| match r.data() {
                RData::A(a) => Some((normalize_name(r.name()), a.0)),
                _ => None,
            })
            .collect();

        debug!(
            rcode = ?rcode,
            answers = answers.len(),
            authority_ns = authority_ns.len(),
            glue = glue.len(),
            truncated = truncated,
            "DNS response parsed"
        );

        Ok(ParsedResponse {
            rcode,
            truncated,
            answers,
            authority_ns,
            glue,
        })
    }

    pub fn parse(response_bytes: &[u8]) -> Result<ParsedResponse, DomainError> {
        Self::parse_bytes(Bytes::copy_from_slice(response_bytes))
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}

/// Lowercased presentation form without the trailing dot.
fn normalize_name(name: &Name) -> Arc<str> {
    let mut s = name.to_utf8().to_ascii_lowercase();
    if s.len() > 1 && s.ends_with('.') {
        s.pop();
    }
    Arc::from(s)
}

fn convert_record(record: &Record) -> Option<DnsRecord> {
    let record_type = RecordTypeMapper::from_hickory(record.record_type())?;
    let name = normalize_name(record.name());
    let ttl = record.ttl();

    let data = match record.data() {
        RData::A(a) => RecordData::A(a.0),
        RData::AAAA(aaaa) => RecordData::Aaaa(aaaa.0),
        RData::CNAME(cname) => RecordData::Cname(normalize_name(cname)),
        RData::NS(ns) => RecordData::Ns(normalize_name(ns)),
        RData::MX(mx) => RecordData::Mx {
            preference: mx.preference(),
            exchange: normalize_name(mx.exchange()),
        },
        RData::TXT(txt) => RecordData::Txt(txt.to_string()),
        RData::PTR(ptr) => RecordData::Ptr(normalize_name(ptr)),
        RData::SOA(soa) => RecordData::Soa {
            mname: normalize_name(soa.mname()),
            minimum: soa.minimum(),
        },
        _ => return None,
    };

    Some(DnsRecord::new(name, record_type, ttl, data))
}
