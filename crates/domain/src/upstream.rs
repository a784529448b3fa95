use crate::DomainError;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

const DEFAULT_DNS_PORT: u16 = 53;
const DEFAULT_TLS_PORT: u16 = 853;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transport {
    Udp,
    Tcp,
    TcpTls,
}

impl Transport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transport::Udp => "udp",
            Transport::Tcp => "tcp",
            Transport::TcpTls => "tcp-tls",
        }
    }

    fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme.to_ascii_lowercase().as_str() {
            "udp" => Some(Transport::Udp),
            "tcp" => Some(Transport::Tcp),
            "tls" => Some(Transport::TcpTls),
            _ => None,
        }
    }

    fn default_port(&self) -> u16 {
        match self {
            Transport::TcpTls => DEFAULT_TLS_PORT,
            Transport::Udp | Transport::Tcp => DEFAULT_DNS_PORT,
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One upstream resolver a zone forwards to, parsed from `scheme://host[:port]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UpstreamServer {
    pub transport: Transport,
    pub address: IpAddr,
    pub port: u16,
}

impl UpstreamServer {
    pub fn new(transport: Transport, address: IpAddr, port: u16) -> Self {
        Self {
            transport,
            address,
            port,
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

/// Splits `host[:port]`, where an IPv6 host must be bracketed.
fn split_host_port(s: &str) -> Result<(&str, Option<&str>), String> {
    if let Some(rest) = s.strip_prefix('[') {
        let end = rest
            .find(']')
            .ok_or_else(|| format!("Unterminated IPv6 address in '{}'", s))?;
        let host = &rest[..end];
        let tail = &rest[end + 1..];
        if tail.is_empty() {
            return Ok((host, None));
        }
        let port = tail
            .strip_prefix(':')
            .ok_or_else(|| format!("Unexpected characters after address in '{}'", s))?;
        return Ok((host, Some(port)));
    }

    match s.split_once(':') {
        Some((host, port)) => Ok((host, Some(port))),
        None => Ok((s, None)),
    }
}

impl FromStr for UpstreamServer {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (scheme, rest) = s.split_once("://").ok_or_else(|| {
            DomainError::InvalidUpstream(format!(
                "Invalid server format '{}'. Expected 'scheme://host[:port]'",
                s
            ))
        })?;

        let transport = Transport::from_scheme(scheme).ok_or_else(|| {
            DomainError::InvalidUpstream(format!(
                "Unsupported scheme '{}://' in '{}'. Expected udp, tcp or tls",
                scheme, s
            ))
        })?;

        let (host, port) = split_host_port(rest).map_err(DomainError::InvalidUpstream)?;

        let address: IpAddr = host.parse().map_err(|_| {
            DomainError::InvalidUpstream(format!("Invalid IP address '{}' in '{}'", host, s))
        })?;

        let port = match port {
            None => transport.default_port(),
            Some(p) => match p.parse::<u16>() {
                Ok(port) if port != 0 => port,
                _ => {
                    return Err(DomainError::InvalidUpstream(format!(
                        "Invalid port '{}' in '{}'",
                        p, s
                    )))
                }
            },
        };

        Ok(UpstreamServer::new(transport, address, port))
    }
}

impl fmt::Display for UpstreamServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scheme = match self.transport {
            Transport::TcpTls => "tls",
            other => other.as_str(),
        };
        write!(f, "{}://{}", scheme, self.socket_addr())
    }
}
