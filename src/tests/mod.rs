//! Shared fixtures for the service's tests.

mod pipeline_tests;
mod validation_tests;

use crate::config::Config;
use crate::db::connection;
use crate::explorer::{ClientError, TransactionSource};
use crate::models::{ClassifiedAlert, Transaction};
use crate::notify::{Notifier, NotifyError};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const SOURCE_ADDRESS: &str = "0xAbC0000000000000000000000000000000000001";
pub const EXCHANGE_ADDRESS: &str = "0xExchange";

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A fresh path under the system temp dir. The file is not created.
pub fn temp_path(name: &str) -> PathBuf {
    let n = TEMP_COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!("hawk-eye-{}-{}-{}", std::process::id(), n, name))
}

pub fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = temp_path(name);
    std::fs::write(&path, contents).unwrap();
    path
}

pub async fn memory_pool() -> SqlitePool {
    connection::establish_connection("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database")
}

pub fn tx(hash: &str, sender: &str, receiver: &str, value: f64, timestamp: i64) -> Transaction {
    Transaction {
        hash: hash.to_string(),
        sender: sender.to_string(),
        receiver: receiver.to_string(),
        value,
        timestamp,
    }
}

/// Config with test credentials and every file pointed at a temp path.
pub fn test_config() -> Config {
    let mut config = Config::with_credentials("test-key", "test-token", "42");
    config.wallet_file = temp_path("wallets.txt").display().to_string();
    config.flagged_file = temp_path("flagged.json").display().to_string();
    config.exchange_file = temp_path("exchanges.txt").display().to_string();
    config
}

/// In-memory explorer. Addresses mapped to `None` fail with an API error.
#[derive(Clone, Default)]
pub struct StubSource {
    histories: Arc<Mutex<HashMap<String, Option<Vec<Transaction>>>>>,
    batch: Option<Vec<Transaction>>,
    window_failures: Arc<AtomicUsize>,
    pub calls: Arc<Mutex<Vec<(String, usize)>>>,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(self, address: &str, transactions: Vec<Transaction>) -> Self {
        self.histories.lock().unwrap().insert(address.to_lowercase(), Some(transactions));
        self
    }

    pub fn failing(self, address: &str) -> Self {
        self.histories.lock().unwrap().insert(address.to_lowercase(), None);
        self
    }

    /// The next `count` requests for more than one row fail.
    pub fn failing_windows(self, count: usize) -> Self {
        self.window_failures.store(count, Ordering::SeqCst);
        self
    }

    /// A new transaction lands on `address`; it becomes the newest.
    pub fn push(&self, address: &str, transaction: Transaction) {
        self.histories
            .lock()
            .unwrap()
            .entry(address.to_lowercase())
            .or_insert_with(|| Some(Vec::new()))
            .get_or_insert_with(Vec::new)
            .insert(0, transaction);
    }

    pub fn with_batch(mut self, transactions: Vec<Transaction>) -> Self {
        self.batch = Some(transactions);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl TransactionSource for StubSource {
    async fn fetch_transactions(&self, address: &str, limit: usize) -> Result<Vec<Transaction>, ClientError> {
        self.calls.lock().unwrap().push((address.to_string(), limit));
        if limit > 1
            && self
                .window_failures
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
        {
            return Err(ClientError::Api("gateway timeout".to_string()));
        }
        match self.histories.lock().unwrap().get(&address.to_lowercase()) {
            Some(Some(history)) => Ok(history.iter().take(limit).cloned().collect()),
            Some(None) => Err(ClientError::Api("connection reset".to_string())),
            None => Ok(Vec::new()),
        }
    }

    async fn fetch_batch(&self, addresses: &[String], limit: usize) -> Result<Vec<Transaction>, ClientError> {
        self.calls.lock().unwrap().push((addresses.join(","), limit));
        self.batch
            .clone()
            .ok_or_else(|| ClientError::Api("batch unavailable".to_string()))
    }
}

/// Records every hash it is asked to announce.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub sent: Arc<Mutex<Vec<String>>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    async fn notify(&self, alert: &ClassifiedAlert) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(alert.hash().to_string());
        if self.fail {
            return Err(NotifyError::Rejected("chat not found".to_string()));
        }
        Ok(())
    }
}
