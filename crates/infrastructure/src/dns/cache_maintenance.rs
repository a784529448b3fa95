use super::cache::ResponseCache;

use async_trait::async_trait;
use owns_dns_application::ports::{CacheMaintenancePort, CacheSweepOutcome};
use owns_dns_domain::DomainError;
use std::sync::Arc;
use tracing::debug;

/// Infrastructure adapter implementing `CacheMaintenancePort`.
pub struct DnsCacheSweeper {
    cache: Arc<ResponseCache>,
}

impl DnsCacheSweeper {
    pub fn new(cache: Arc<ResponseCache>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl CacheMaintenancePort for DnsCacheSweeper {
    async fn run_sweep_cycle(&self) -> Result<CacheSweepOutcome, DomainError> {
        let entries_removed = self.cache.sweep();
        let cache_size = self.cache.len();

        debug!(entries_removed, cache_size, "Cache sweep completed");

        Ok(CacheSweepOutcome {
            entries_removed,
            cache_size,
        })
    }
}
