pub mod last_seen;

pub use last_seen::LastSeenCache;

use crate::config::Config;

pub fn init_cache(config: &Config) -> LastSeenCache {
    LastSeenCache::new(config.cache_max_capacity, config.cache_ttl)
}
