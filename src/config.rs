// Service configuration:
// - explorer / bot credentials (required)
// - database connection string
// - watch-list and known-address files
// - polling interval, thresholds and fetch strategy
// - cache settings (size, TTL)
// - optional HTTP server

use dotenv::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

use crate::explorer::FetchStrategy;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVariable(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub etherscan_api_key: String,
    pub telegram_bot_token: String,
    pub telegram_chat_id: String,
    pub database_url: String,
    pub explorer_api_url: String,
    pub explorer_tx_url: String,
    pub telegram_api_url: String,
    pub wallet_file: String,
    pub flagged_file: String,
    pub exchange_file: String,
    pub poll_interval: Duration,
    pub value_threshold: f64,
    pub max_age_secs: i64,
    pub fetch_strategy: FetchStrategy,
    pub history_limit: usize,
    pub backfill_window: usize,
    pub request_timeout_secs: u64,
    pub cache_max_capacity: u64,
    pub cache_ttl: Duration,
    pub refresh_watchlist: bool,
    pub server_enabled: bool,
    pub server_host: String,
    pub server_port: u16,
    pub token_decimals: u32,
    pub token_symbol: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let etherscan_api_key = required("ETHERSCAN_API_KEY")?;
        let telegram_bot_token = required("TELEGRAM_BOT_TOKEN")?;
        let telegram_chat_id = required("TELEGRAM_CHAT_ID")?;

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:transactions.db".to_string());
        let explorer_api_url = env::var("EXPLORER_API_URL")
            .unwrap_or_else(|_| "https://api.etherscan.io/api".to_string());
        let explorer_tx_url = env::var("EXPLORER_TX_URL")
            .unwrap_or_else(|_| "https://etherscan.io/tx/".to_string());
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .unwrap_or_else(|_| "https://api.telegram.org".to_string());
        let wallet_file = env::var("WALLET_FILE").unwrap_or_else(|_| "tracked_wallets.txt".to_string());
        let flagged_file = env::var("FLAGGED_FILE").unwrap_or_else(|_| "hacker_addresses.json".to_string());
        let exchange_file = env::var("EXCHANGE_FILE").unwrap_or_else(|_| "exchange_list.txt".to_string());

        let poll_interval = Duration::from_secs(parsed_or("POLL_INTERVAL_SECS", 60));
        let value_threshold = parsed_or("VALUE_THRESHOLD", 1.0);
        let max_age_secs = parsed_or("MAX_AGE_SECS", 300);
        let fetch_strategy = parsed_or("FETCH_STRATEGY", FetchStrategy::LatestOnly);
        let history_limit = parsed_or("HISTORY_LIMIT", 5);
        let backfill_window = parsed_or("BACKFILL_WINDOW", 10);
        let request_timeout_secs = parsed_or("REQUEST_TIMEOUT_SECS", 10);
        let cache_max_capacity = parsed_or("CACHE_MAX_CAPACITY", 10_000);
        let cache_ttl = Duration::from_secs(parsed_or("CACHE_TTL_SECS", 3600));
        let refresh_watchlist = parsed_or("REFRESH_WATCHLIST", true);
        let server_enabled = parsed_or("SERVER_ENABLED", false);
        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let server_port = parsed_or("SERVER_PORT", 8080);
        let token_decimals = parsed_or("TOKEN_DECIMALS", 18);
        let token_symbol = env::var("TOKEN_SYMBOL").unwrap_or_else(|_| "ETH".to_string());

        Ok(Self {
            etherscan_api_key,
            telegram_bot_token,
            telegram_chat_id,
            database_url,
            explorer_api_url,
            explorer_tx_url,
            telegram_api_url,
            wallet_file,
            flagged_file,
            exchange_file,
            poll_interval,
            value_threshold,
            max_age_secs,
            fetch_strategy,
            history_limit,
            backfill_window,
            request_timeout_secs,
            cache_max_capacity,
            cache_ttl,
            refresh_watchlist,
            server_enabled,
            server_host,
            server_port,
            token_decimals,
            token_symbol,
        })
    }

    /// Defaults for everything except credentials. Used by tests and tools.
    pub fn with_credentials(api_key: &str, bot_token: &str, chat_id: &str) -> Self {
        Self {
            etherscan_api_key: api_key.to_string(),
            telegram_bot_token: bot_token.to_string(),
            telegram_chat_id: chat_id.to_string(),
            database_url: "sqlite::memory:".to_string(),
            explorer_api_url: "https://api.etherscan.io/api".to_string(),
            explorer_tx_url: "https://etherscan.io/tx/".to_string(),
            telegram_api_url: "https://api.telegram.org".to_string(),
            wallet_file: "tracked_wallets.txt".to_string(),
            flagged_file: "hacker_addresses.json".to_string(),
            exchange_file: "exchange_list.txt".to_string(),
            poll_interval: Duration::from_secs(60),
            value_threshold: 1.0,
            max_age_secs: 300,
            fetch_strategy: FetchStrategy::LatestOnly,
            history_limit: 5,
            backfill_window: 10,
            request_timeout_secs: 10,
            cache_max_capacity: 10_000,
            cache_ttl: Duration::from_secs(3600),
            refresh_watchlist: true,
            server_enabled: false,
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            token_decimals: 18,
            token_symbol: "ETH".to_string(),
        }
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVariable(name)),
    }
}

fn parsed_or<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid value for {}: {:?}", name, raw);
            default
        }),
        Err(_) => default,
    }
}
