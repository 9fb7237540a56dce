use chrono::Utc;
use std::sync::Arc;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::explorer::{AddressBatch, Fetcher, TransactionSource};
use crate::models::Outcome;
use crate::notify::Notifier;
use crate::pipeline::classifier::{classify, AlertPolicy};
use crate::pipeline::processor::AlertProcessor;
use crate::sources::{load_exchange_list, load_flagged_addresses, KnownAddressList};
use crate::state::AppState;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IterationStats {
    pub addresses: usize,
    pub fetched: usize,
    pub inserted: usize,
    pub duplicates: usize,
    pub errors: usize,
}

pub struct Poller<S, N> {
    state: Arc<AppState>,
    fetcher: Fetcher<S>,
    processor: AlertProcessor<N>,
    policy: AlertPolicy,
}

impl<S, N> Poller<S, N>
where
    S: TransactionSource + Sync,
    N: Notifier,
{
    pub fn new(state: Arc<AppState>, source: S, notifier: N) -> Self {
        let config = &state.config;
        let fetcher = Fetcher::new(source, config.fetch_strategy, config.history_limit, config.backfill_window);
        let processor = AlertProcessor::new(state.db_pool.clone(), notifier);
        let policy = AlertPolicy::from(config);

        Self {
            state,
            fetcher,
            processor,
            policy,
        }
    }

    /// One fetch → classify → persist → notify pass over the watch-list.
    pub async fn run_iteration(&self, now: i64) -> IterationStats {
        let config = &self.state.config;

        let addresses = {
            let mut watchlist = self.state.watchlist.lock().await;
            if config.refresh_watchlist {
                watchlist.refresh();
            }
            watchlist.addresses()
        };

        let mut stats = IterationStats {
            addresses: addresses.len(),
            ..Default::default()
        };
        if addresses.is_empty() {
            debug!("Watch-list is empty, nothing to poll");
            return stats;
        }

        // Re-read every pass so edits to the lists apply without a restart
        let flagged = load_flagged_addresses(&config.flagged_file);
        let exchanges = load_exchange_list(&config.exchange_file);

        let batches = self.fetcher.fetch(&addresses, &self.state.cache).await;
        for batch in batches {
            self.process_batch(batch, &flagged, &exchanges, now, &mut stats).await;
        }

        stats
    }

    async fn process_batch(
        &self,
        batch: AddressBatch,
        flagged: &KnownAddressList,
        exchanges: &KnownAddressList,
        now: i64,
        stats: &mut IterationStats,
    ) {
        stats.fetched += batch.transactions.len();
        let mut failed = false;

        // Oldest first so notifications arrive in chain order
        for tx in batch.transactions.iter().rev() {
            let Some(alert) = classify(tx, flagged, exchanges, &self.policy, now) else {
                continue;
            };

            match self.processor.process(&alert).await {
                Ok(Outcome::Inserted) => stats.inserted += 1,
                Ok(Outcome::DuplicateSkipped) => stats.duplicates += 1,
                Err(e) => {
                    error!("Failed to persist alert {}: {}", alert.hash(), e);
                    stats.errors += 1;
                    failed = true;
                }
            }
        }

        // Leave the cache alone on failure so the address is retried next pass
        if !failed {
            if let Some(hash) = &batch.newest_hash {
                self.state.cache.set(&batch.address, hash).await;
            }
        }
    }

    pub async fn run(&self, shutdown: CancellationToken) {
        let poll_interval = self.state.config.poll_interval;
        info!(
            "Starting polling every {:?} with {:?} fetch strategy",
            poll_interval,
            self.fetcher.strategy()
        );

        let mut ticker = interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let stats = self.run_iteration(Utc::now().timestamp()).await;
                    if stats.inserted > 0 || stats.errors > 0 {
                        info!(
                            "Polled {} addresses: {} new alerts, {} duplicates, {} errors",
                            stats.addresses, stats.inserted, stats.duplicates, stats.errors
                        );
                    } else {
                        debug!("Polled {} addresses: {:?}", stats.addresses, stats);
                    }
                }
                _ = shutdown.cancelled() => {
                    info!("Shutting down polling loop");
                    break;
                }
            }
        }
    }
}

/// Build a poller from shared state and run it until `shutdown` fires.
pub async fn start_polling<S, N>(state: Arc<AppState>, source: S, notifier: N, shutdown: CancellationToken)
where
    S: TransactionSource + Sync,
    N: Notifier,
{
    Poller::new(state, source, notifier).run(shutdown).await;
}
