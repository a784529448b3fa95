use super::key::CacheKey;
use dashmap::DashMap;
use hickory_proto::op::{Message, Query};
use owns_dns_application::ports::ResponseCachePort;
use rustc_hash::FxBuildHasher;
use std::time::{Duration, Instant};
use tracing::debug;

struct CacheEntry {
    response: Message,
    expiry: Instant,
}

/// Upstream answers keyed by question. DashMap shards give concurrent reads
/// and exclusive writes per shard, so lookups, inserts and sweeps interleave
/// without a global lock.
pub struct ResponseCache {
    entries: DashMap<CacheKey, CacheEntry, FxBuildHasher>,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher),
        }
    }

    /// Hit only while `now` is strictly before the entry's expiry. Answer TTLs
    /// are rewritten to the remaining lifetime, rounded up so a live entry never
    /// advertises zero.
    pub fn get_at(&self, key: &CacheKey, now: Instant) -> Option<Message> {
        let entry = self.entries.get(key)?;
        if entry.expiry <= now {
            return None;
        }

        let remaining = remaining_secs(entry.expiry - now);
        let mut response = entry.response.clone();
        drop(entry);

        for record in response.answers_mut() {
            record.set_ttl(remaining);
        }
        Some(response)
    }

    /// Stores `response` until `now` + TTL of its first answer record.
    /// Responses without answers are ignored.
    pub fn put_at(&self, key: CacheKey, response: &Message, now: Instant) {
        let Some(first) = response.answers().first() else {
            return;
        };

        let expiry = now + Duration::from_secs(u64::from(first.ttl()));
        self.entries.insert(
            key,
            CacheEntry {
                response: response.clone(),
                expiry,
            },
        );
    }

    /// Drops every entry whose expiry has passed. Returns how many were removed.
    pub fn sweep_at(&self, now: Instant) -> usize {
        let mut removed = 0;
        self.entries.retain(|key, entry| {
            let keep = entry.expiry > now;
            if !keep {
                debug!(key = %key, "Pruning cache entry");
                removed += 1;
            }
            keep
        });
        removed
    }

    pub fn sweep(&self) -> usize {
        self.sweep_at(Instant::now())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn remaining_secs(remaining: Duration) -> u32 {
    let secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
    u32::try_from(secs).unwrap_or(u32::MAX)
}

impl ResponseCachePort for ResponseCache {
    fn get(&self, query: &Query) -> Option<Message> {
        self.get_at(&CacheKey::from_query(query), Instant::now())
    }

    fn put(&self, query: &Query, response: &Message) {
        self.put_at(CacheKey::from_query(query), response, Instant::now());
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
