use async_trait::async_trait;
use owns_dns_domain::DomainError;

/// Outcome of a cache sweep cycle.
#[derive(Debug, Default, Clone)]
pub struct CacheSweepOutcome {
    pub entries_removed: usize,
    pub cache_size: usize,
}

/// Port for periodic response cache maintenance.
#[async_trait]
pub trait CacheMaintenancePort: Send + Sync {
    /// Remove every entry whose expiry has passed.
    async fn run_sweep_cycle(&self) -> Result<CacheSweepOutcome, DomainError>;
}
