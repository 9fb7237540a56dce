//! Last processed transaction hash per watched address.
//!
//! Lives only in memory and is lost on restart. It lets the poller skip
//! addresses whose newest transaction has not changed; the store's unique
//! hash constraint remains the dedup authority.

use moka::future::Cache;
use std::time::Duration;
use tracing::debug;

#[derive(Clone)]
pub struct LastSeenCache {
    cache: Cache<String, String>,
}

impl LastSeenCache {
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();

        Self { cache }
    }

    pub async fn get(&self, address: &str) -> Option<String> {
        self.cache.get(&address.to_lowercase()).await
    }

    pub async fn set(&self, address: &str, tx_hash: &str) {
        self.cache.insert(address.to_lowercase(), tx_hash.to_string()).await;
        debug!("Last seen for {} = {}", address, tx_hash);
    }

    /// True when `tx_hash` is the hash already recorded for `address`.
    pub async fn is_unchanged(&self, address: &str, tx_hash: &str) -> bool {
        self.get(address).await.as_deref() == Some(tx_hash)
    }

    pub async fn invalidate(&self, address: &str) {
        self.cache.invalidate(&address.to_lowercase()).await;
        debug!("Invalidated last seen for {}", address);
    }
}
