use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use super::errors::ConfigError;
use crate::{DomainError, UpstreamServer, ZoneRule, ZoneTable};

/// One entry of `forward.yaml`, as written by the operator.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ForwardZoneConfig {
    #[serde(default)]
    pub networks: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domains: Vec<String>,
}

impl ForwardZoneConfig {
    /// Builds the zone, dropping (and logging) every network or server that fails to parse.
    pub fn into_zone(self) -> ZoneRule {
        let networks = self
            .networks
            .iter()
            .filter_map(|cidr| match parse_cidr(cidr) {
                Ok(network) => Some(network),
                Err(e) => {
                    warn!(cidr = %cidr, error = %e, "Skipping unparsable network");
                    None
                }
            })
            .collect();

        let servers = self
            .servers
            .iter()
            .filter_map(|url| match url.parse::<UpstreamServer>() {
                Ok(server) => Some(server),
                Err(e) => {
                    warn!(server = %url, error = %e, "Skipping unparsable server");
                    None
                }
            })
            .collect();

        ZoneRule::new(networks, self.domains, servers)
    }
}

pub fn parse_cidr(cidr: &str) -> Result<IpNetwork, DomainError> {
    let cidr = cidr.trim();
    if !cidr.contains('/') {
        return Err(DomainError::InvalidCidr(format!(
            "'{}' must include a prefix length (e.g., 192.168.1.0/24)",
            cidr
        )));
    }
    cidr.parse::<IpNetwork>()
        .map_err(|e| DomainError::InvalidCidr(format!("'{}': {}", cidr, e)))
}

/// Parses a YAML forward-zone document into a zone table.
pub fn parse_zone_table(contents: &str) -> Result<ZoneTable, ConfigError> {
    // An empty document means no zones.
    let entries: Option<Vec<ForwardZoneConfig>> =
        serde_yaml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;

    let zones = entries
        .unwrap_or_default()
        .into_iter()
        .map(ForwardZoneConfig::into_zone)
        .collect();

    Ok(ZoneTable::new(zones))
}

pub fn load_zone_table(path: &Path) -> Result<ZoneTable, ConfigError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::FileRead(path.display().to_string(), e.to_string()))?;

    let table = parse_zone_table(&contents)?;

    info!(
        zones = table.len(),
        default_servers = table.default_servers().len(),
        path = %path.display(),
        "Loaded forward zones"
    );

    Ok(table)
}
