use reqwest::{Client, StatusCode};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::explorer::models::{extract_transaction, Envelope};
use crate::models::Transaction;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0}")]
    Status(StatusCode),

    #[error("Explorer API error: {0}")]
    Api(String),

    #[error("Invalid explorer payload: {0}")]
    Decode(String),
}

/// Anything that can list transactions for addresses, newest first.
pub trait TransactionSource {
    fn fetch_transactions(
        &self,
        address: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Transaction>, ClientError>> + Send;

    /// One request covering several addresses.
    fn fetch_batch(
        &self,
        addresses: &[String],
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Transaction>, ClientError>> + Send;
}

/// Etherscan-compatible `account/txlist` client.
#[derive(Clone)]
pub struct EtherscanClient {
    http: Client,
    api_url: String,
    api_key: String,
    decimals: u32,
}

impl EtherscanClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!("Initializing explorer client with endpoint: {}", config.explorer_api_url);

        Ok(Self {
            http,
            api_url: config.explorer_api_url.clone(),
            api_key: config.etherscan_api_key.clone(),
            decimals: config.token_decimals,
        })
    }

    async fn txlist(&self, address: &str, limit: usize) -> Result<Vec<Transaction>, ClientError> {
        let offset = limit.max(1).to_string();
        let response = self
            .http
            .get(&self.api_url)
            .query(&[
                ("module", "account"),
                ("action", "txlist"),
                ("address", address),
                ("startblock", "0"),
                ("endblock", "99999999"),
                ("page", "1"),
                ("offset", offset.as_str()),
                ("sort", "desc"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }

        let envelope: Envelope = response.json().await?;
        let transactions: Vec<Transaction> = envelope
            .into_raw_transactions()?
            .into_iter()
            .filter_map(|raw| extract_transaction(raw, self.decimals))
            .collect();

        debug!("Fetched {} transactions for {}", transactions.len(), address);
        Ok(transactions)
    }
}

impl TransactionSource for EtherscanClient {
    async fn fetch_transactions(&self, address: &str, limit: usize) -> Result<Vec<Transaction>, ClientError> {
        self.txlist(address, limit).await
    }

    async fn fetch_batch(&self, addresses: &[String], limit: usize) -> Result<Vec<Transaction>, ClientError> {
        // Explorers that accept multi-address txlist take a comma separated list
        let joined = addresses.join(",");
        self.txlist(&joined, limit.saturating_mul(addresses.len())).await
    }
}
