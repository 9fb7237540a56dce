use crate::cache::LastSeenCache;
use crate::config::Config;
use crate::sources::WatchList;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Everything an iteration needs, built once at startup and shared with
/// the HTTP surface.
pub struct AppState {
    pub config: Config,
    pub db_pool: SqlitePool,
    pub cache: LastSeenCache,
    pub watchlist: Arc<Mutex<WatchList>>,
}

impl AppState {
    pub fn new(config: Config, db_pool: SqlitePool) -> Self {
        let cache = crate::cache::init_cache(&config);
        let watchlist = WatchList::load(&config.wallet_file);

        Self {
            config,
            db_pool,
            cache,
            watchlist: Arc::new(Mutex::new(watchlist)),
        }
    }
}
