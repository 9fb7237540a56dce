use futures::future::join_all;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::cache::LastSeenCache;
use crate::explorer::client::TransactionSource;
use crate::models::Transaction;

/// How transactions are pulled from the explorer each iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStrategy {
    /// Recent history per address.
    FullHistory,
    /// One request for the whole watch-list.
    Batch,
    /// Newest transaction per address, widened to a backfill window when it changed.
    LatestOnly,
}

impl FromStr for FetchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" | "full_history" | "history" => Ok(FetchStrategy::FullHistory),
            "batch" => Ok(FetchStrategy::Batch),
            "latest" | "latest_only" => Ok(FetchStrategy::LatestOnly),
            other => Err(format!("unknown fetch strategy: {}", other)),
        }
    }
}

/// Transactions for one watched address that have not been seen yet,
/// newest first.
#[derive(Debug, Clone, Default)]
pub struct AddressBatch {
    pub address: String,
    pub transactions: Vec<Transaction>,
    /// Hash of the newest transaction the explorer returned, if any.
    pub newest_hash: Option<String>,
}

impl AddressBatch {
    fn empty(address: &str) -> Self {
        Self {
            address: address.to_string(),
            ..Default::default()
        }
    }
}

pub struct Fetcher<S> {
    source: S,
    strategy: FetchStrategy,
    history_limit: usize,
    backfill_window: usize,
}

impl<S: TransactionSource + Sync> Fetcher<S> {
    pub fn new(source: S, strategy: FetchStrategy, history_limit: usize, backfill_window: usize) -> Self {
        Self {
            source,
            strategy,
            history_limit: history_limit.max(1),
            backfill_window: backfill_window.max(1),
        }
    }

    pub fn strategy(&self) -> FetchStrategy {
        self.strategy
    }

    /// Fetch every address. Never fails: an address whose request errors
    /// comes back with no transactions.
    pub async fn fetch(&self, addresses: &[String], last_seen: &LastSeenCache) -> Vec<AddressBatch> {
        match self.strategy {
            FetchStrategy::Batch => self.fetch_batched(addresses, last_seen).await,
            FetchStrategy::FullHistory | FetchStrategy::LatestOnly => {
                join_all(addresses.iter().map(|address| self.fetch_one(address, last_seen))).await
            }
        }
    }

    async fn fetch_one(&self, address: &str, last_seen: &LastSeenCache) -> AddressBatch {
        match self.strategy {
            FetchStrategy::LatestOnly => self.fetch_latest(address, last_seen).await,
            _ => match self.source.fetch_transactions(address, self.history_limit).await {
                Ok(transactions) => unseen(address, transactions, last_seen).await,
                Err(e) => {
                    warn!("Failed to fetch transactions for {}: {}", address, e);
                    AddressBatch::empty(address)
                }
            },
        }
    }

    async fn fetch_latest(&self, address: &str, last_seen: &LastSeenCache) -> AddressBatch {
        let latest = match self.source.fetch_transactions(address, 1).await {
            Ok(latest) => latest,
            Err(e) => {
                warn!("Failed to fetch latest transaction for {}: {}", address, e);
                return AddressBatch::empty(address);
            }
        };

        let Some(newest) = latest.first() else {
            return AddressBatch::empty(address);
        };

        if last_seen.is_unchanged(address, &newest.hash).await {
            debug!("No new activity for {}", address);
            return AddressBatch {
                address: address.to_string(),
                transactions: Vec::new(),
                newest_hash: Some(newest.hash.clone()),
            };
        }

        // The newest hash moved; more than one transaction may have landed
        let window = match self.source.fetch_transactions(address, self.backfill_window).await {
            Ok(window) if !window.is_empty() => window,
            other => {
                if let Err(e) = other {
                    warn!("Backfill fetch failed for {}, using latest only: {}", address, e);
                }
                // Without the window the cache must keep its old hash so the
                // next pass backfills again
                let mut partial = unseen(address, latest, last_seen).await;
                partial.newest_hash = None;
                return partial;
            }
        };

        let cached = last_seen.get(address).await;
        if let Some(cached) = &cached {
            let found = window.iter().any(|tx| &tx.hash == cached);
            if !found && window.len() >= self.backfill_window {
                warn!(
                    "Possible missed burst for {}: last seen {} is older than the {} newest transactions",
                    address, cached, self.backfill_window
                );
            }
        }

        unseen(address, window, last_seen).await
    }

    async fn fetch_batched(&self, addresses: &[String], last_seen: &LastSeenCache) -> Vec<AddressBatch> {
        if addresses.is_empty() {
            return Vec::new();
        }

        let transactions = match self.source.fetch_batch(addresses, self.history_limit).await {
            Ok(transactions) => transactions,
            Err(e) => {
                warn!("Batch fetch for {} addresses failed: {}", addresses.len(), e);
                return addresses.iter().map(|a| AddressBatch::empty(a)).collect();
            }
        };

        let mut batches = Vec::with_capacity(addresses.len());
        for address in addresses {
            let own: Vec<Transaction> = transactions
                .iter()
                .filter(|tx| tx.sender.eq_ignore_ascii_case(address) || tx.receiver.eq_ignore_ascii_case(address))
                .take(self.history_limit)
                .cloned()
                .collect();
            batches.push(unseen(address, own, last_seen).await);
        }
        batches
    }
}

/// Keep the transactions newer than the last processed hash.
async fn unseen(address: &str, transactions: Vec<Transaction>, last_seen: &LastSeenCache) -> AddressBatch {
    let newest_hash = transactions.first().map(|tx| tx.hash.clone());
    let transactions = match last_seen.get(address).await {
        Some(cached) => transactions
            .into_iter()
            .take_while(|tx| tx.hash != cached)
            .collect(),
        None => transactions,
    };

    AddressBatch {
        address: address.to_string(),
        transactions,
        newest_hash,
    }
}
