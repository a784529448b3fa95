mod cache_maintenance_port;
mod response_cache;
mod upstream_exchange;

pub use cache_maintenance_port::{CacheMaintenancePort, CacheSweepOutcome};
pub use response_cache::ResponseCachePort;
pub use upstream_exchange::UpstreamExchange;
