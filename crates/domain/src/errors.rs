use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid CIDR format: {0}")]
    InvalidCidr(String),

    #[error("Invalid upstream server: {0}")]
    InvalidUpstream(String),

    #[error("Invalid DNS message: {0}")]
    InvalidDnsMessage(String),

    #[error("DNS message has no question")]
    EmptyQuestion,

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Transport timeout talking to {server}")]
    TransportTimeout { server: String },

    #[error("Transport connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("Transport error with {server}: {reason}")]
    TransportFailure { server: String, reason: String },

    #[error("No upstream servers selected for {0}")]
    NoUpstreamServers(String),

    #[error("All upstream servers are unreachable")]
    TransportAllServersUnreachable,
}
