use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Transport timeout contacting {server}")]
    TransportTimeout { server: String },

    #[error("Server unreachable: {server}")]
    TransportUnreachable { server: String },

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("All {attempted} servers in the current set failed")]
    AllServersFailed { attempted: usize },

    #[error("No answer and no usable referral for {domain}")]
    NoAnswer { domain: String },

    #[error("Domain not found (NXDOMAIN): {domain}")]
    NxDomain { domain: String },

    #[error("Resolution loop detected for {domain} after {hops} hops")]
    LoopDetected { domain: String, hops: u32 },

    #[error("Overall deadline exceeded while resolving {domain}")]
    DeadlineExceeded { domain: String },
}

impl DomainError {
    /// Failures recovered locally by advancing to the next server in the
    /// current set. Everything else is terminal for the resolution.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            DomainError::TransportTimeout { .. }
                | DomainError::TransportUnreachable { .. }
                | DomainError::InvalidDnsResponse(_)
                | DomainError::IoError(_)
        )
    }
}
