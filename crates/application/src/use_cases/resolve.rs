use crate::ports::{DnsResolution, DnsResolver};
use rootwalk_domain::{DnsQuery, DomainError, RecordType};
use std::sync::Arc;
use tracing::debug;

/// Resolve one question through a configured resolver.
///
/// Validates the domain and defaults the record type to A before the
/// resolver sees the question.
pub struct ResolveQuery {
    resolver: Arc<dyn DnsResolver>,
}

impl ResolveQuery {
    pub fn new(resolver: Arc<dyn DnsResolver>) -> Self {
        Self { resolver }
    }

    pub async fn execute(
        &self,
        domain: &str,
        record_type: Option<RecordType>,
    ) -> Result<DnsResolution, DomainError> {
        let domain = normalize_domain(domain)?;
        let query = DnsQuery::new(domain, record_type.unwrap_or_default());

        debug!(query = %query, "Executing resolution");
        self.resolver.resolve(&query).await
    }
}

/// Lowercase, strip the trailing dot, reject names the wire format
/// cannot carry.
fn normalize_domain(domain: &str) -> Result<String, DomainError> {
    let trimmed = domain.trim().trim_end_matches('.').to_ascii_lowercase();

    if trimmed.is_empty() {
        return Err(DomainError::InvalidDomainName(
            "domain cannot be empty".to_string(),
        ));
    }
    if trimmed.len() > 253 {
        return Err(DomainError::InvalidDomainName(format!(
            "domain exceeds 253 octets: {domain}"
        )));
    }
    for label in trimmed.split('.') {
        if label.is_empty() || label.len() > 63 {
            return Err(DomainError::InvalidDomainName(format!(
                "invalid label in domain: {domain}"
            )));
        }
        if !label
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(DomainError::InvalidDomainName(format!(
                "invalid character in domain: {domain}"
            )));
        }
    }

    Ok(trimmed)
}
