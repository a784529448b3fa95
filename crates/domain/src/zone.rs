use crate::UpstreamServer;
use ipnetwork::IpNetwork;
use std::fmt::Write;
use std::net::IpAddr;
use tracing::warn;

/// What server selection gets to look at for one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryContext<'a> {
    /// Reverse lookup, carrying the address decoded from the query name.
    Reverse(IpAddr),
    /// Forward lookup by query name.
    Forward(&'a str),
}

/// Binds client networks and/or query domains to an ordered list of upstream servers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRule {
    pub networks: Vec<IpNetwork>,
    pub domains: Vec<String>,
    pub servers: Vec<UpstreamServer>,
    catch_all: bool,
}

impl ZoneRule {
    pub fn new(networks: Vec<IpNetwork>, domains: Vec<String>, servers: Vec<UpstreamServer>) -> Self {
        let catch_all = networks.is_empty() && domains.is_empty();
        let domains = domains
            .iter()
            .filter_map(|d| {
                let name = normalize_name(d);
                if name.is_empty() {
                    warn!(domain = %d, "Skipping empty zone domain");
                    None
                } else {
                    Some(name)
                }
            })
            .collect();
        Self {
            networks,
            domains,
            servers,
            catch_all,
        }
    }

    /// A zone declared without network or domain constraints catches everything else.
    /// A zone whose domains were all dropped as empty stays constrained.
    pub fn is_default(&self) -> bool {
        self.catch_all
    }

    pub fn contains_ip(&self, ip: IpAddr) -> bool {
        self.networks.iter().any(|network| network.contains(ip))
    }

    pub fn matches_domain(&self, fqdn: &str) -> bool {
        let fqdn = normalize_name(fqdn);
        self.domains.iter().any(|domain| domain_matches(domain, &fqdn))
    }
}

/// `domain` matches `fqdn` when they are equal or `fqdn` is a subdomain of it.
/// Both sides must already be normalized.
fn domain_matches(domain: &str, fqdn: &str) -> bool {
    match fqdn.strip_suffix(domain) {
        Some("") => true,
        Some(prefix) => prefix.ends_with('.'),
        None => false,
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().trim_end_matches('.').to_ascii_lowercase()
}

/// Ordered zone list plus the precomputed default server list.
#[derive(Debug, Clone, Default)]
pub struct ZoneTable {
    zones: Vec<ZoneRule>,
    default_servers: Vec<UpstreamServer>,
}

impl ZoneTable {
    pub fn new(zones: Vec<ZoneRule>) -> Self {
        // Every default zone contributes, in declaration order.
        let default_servers = zones
            .iter()
            .filter(|zone| zone.is_default())
            .flat_map(|zone| zone.servers.iter().copied())
            .collect();

        Self {
            zones,
            default_servers,
        }
    }

    pub fn zones(&self) -> &[ZoneRule] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn default_servers(&self) -> &[UpstreamServer] {
        &self.default_servers
    }

    /// Picks the upstream servers for a query: first matching zone in declaration
    /// order, otherwise the default servers.
    pub fn select_servers(&self, context: QueryContext<'_>) -> &[UpstreamServer] {
        let matched = match context {
            QueryContext::Reverse(ip) => self.find_by_ip(ip),
            QueryContext::Forward(name) => self.find_by_domain(name),
        };

        match matched {
            Some(zone) if !zone.servers.is_empty() => &zone.servers,
            _ => &self.default_servers,
        }
    }

    fn find_by_ip(&self, ip: IpAddr) -> Option<&ZoneRule> {
        self.zones.iter().find(|zone| zone.contains_ip(ip))
    }

    fn find_by_domain(&self, name: &str) -> Option<&ZoneRule> {
        let fqdn = normalize_name(name);
        self.zones
            .iter()
            .find(|zone| zone.domains.iter().any(|d| domain_matches(d, &fqdn)))
    }

    /// Human readable dump of the table, one block per zone.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for zone in &self.zones {
            let servers: Vec<String> = zone.servers.iter().map(|s| s.to_string()).collect();
            let _ = writeln!(out, "* Servers: [{}]", servers.join(", "));
            let _ = writeln!(out, "  Networks:");
            for network in &zone.networks {
                let _ = writeln!(out, "    {}", network);
            }
            let _ = writeln!(out, "  Domains: [{}]", zone.domains.join(", "));
            out.push('\n');
        }
        out
    }
}
