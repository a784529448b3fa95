use anyhow::Context;
use owns_dns_application::ports::CacheMaintenancePort;
use owns_dns_application::use_cases::HandleDnsQueryUseCase;
use owns_dns_domain::config::{load_local_records, load_zone_table};
use owns_dns_domain::{Config, LocalRecordStore, ZoneTable};
use owns_dns_infrastructure::dns::{DnsCacheSweeper, ResponseCache, UpstreamForwarder};
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub zones: Arc<ZoneTable>,
    pub local_records: Arc<LocalRecordStore>,
    pub cache_sweeper: Arc<dyn CacheMaintenancePort>,
    pub handler_use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServices {
    /// Loads both configuration files; either one failing aborts startup.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let forward_path = config.forwarding.forward_path();
        let zones = Arc::new(
            load_zone_table(&forward_path)
                .with_context(|| format!("Cannot load forward zones from {}", forward_path.display()))?,
        );

        let hosts_path = config.forwarding.hosts_path();
        let local_records = Arc::new(
            load_local_records(&hosts_path)
                .with_context(|| format!("Cannot load hosts from {}", hosts_path.display()))?,
        );

        info!(
            zones = zones.len(),
            default_servers = zones.default_servers().len(),
            hosts = local_records.len(),
            "DNS services initialized"
        );

        let cache = Arc::new(ResponseCache::new());
        let cache_sweeper: Arc<dyn CacheMaintenancePort> =
            Arc::new(DnsCacheSweeper::new(cache.clone()));

        let handler_use_case = Arc::new(HandleDnsQueryUseCase::new(
            cache.clone(),
            local_records.clone(),
            zones.clone(),
            Arc::new(UpstreamForwarder::new()),
        ));

        Ok(Self {
            zones,
            local_records,
            cache_sweeper,
            handler_use_case,
        })
    }
}
