#![allow(dead_code)]
use owns_dns_domain::{UpstreamServer, ZoneRule};

pub struct ZoneRuleBuilder {
    networks: Vec<String>,
    domains: Vec<String>,
    servers: Vec<String>,
}

impl ZoneRuleBuilder {
    pub fn new() -> Self {
        Self {
            networks: vec![],
            domains: vec![],
            servers: vec![],
        }
    }

    pub fn network(mut self, cidr: &str) -> Self {
        self.networks.push(cidr.to_string());
        self
    }

    pub fn domain(mut self, domain: &str) -> Self {
        self.domains.push(domain.to_string());
        self
    }

    pub fn server(mut self, url: &str) -> Self {
        self.servers.push(url.to_string());
        self
    }

    pub fn build(self) -> ZoneRule {
        ZoneRule::new(
            self.networks.iter().map(|n| n.parse().unwrap()).collect(),
            self.domains,
            self.servers
                .iter()
                .map(|s| s.parse::<UpstreamServer>().unwrap())
                .collect(),
        )
    }
}

pub fn server(url: &str) -> UpstreamServer {
    url.parse().unwrap()
}
