use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::explorer::client::ClientError;
use crate::models::Transaction;

/// Response envelope shared by every explorer `account` endpoint.
/// `result` is a list on success and a string on error.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub result: Value,
}

#[derive(Debug, Deserialize)]
pub struct RawTransaction {
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub value: String,
    #[serde(rename = "timeStamp", default)]
    pub time_stamp: String,
}

impl Envelope {
    /// Decode the transaction list, treating any non-success status as an
    /// error. "No transactions found" is reported with status 0 but is just
    /// an empty history.
    pub fn into_raw_transactions(self) -> Result<Vec<RawTransaction>, ClientError> {
        if self.status != "1" {
            let message = self.message.unwrap_or_default();
            if message.starts_with("No transactions found") {
                return Ok(Vec::new());
            }
            let detail = self.result.as_str().unwrap_or_default();
            return Err(ClientError::Api(format!("{} {}", message, detail).trim().to_string()));
        }

        serde_json::from_value(self.result).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

/// Convert an integer minor-unit amount (wei) into major units.
pub fn to_major_units(raw: &str, decimals: u32) -> Option<f64> {
    let minor: u128 = raw.trim().parse().ok()?;
    Some(minor as f64 / 10f64.powi(decimals as i32))
}

/// Map an explorer row to our model. Rows with an unparseable value or
/// timestamp are dropped.
pub fn extract_transaction(raw: RawTransaction, decimals: u32) -> Option<Transaction> {
    let value = match to_major_units(&raw.value, decimals) {
        Some(value) => value,
        None => {
            warn!("Skipping transaction {} with invalid value {:?}", raw.hash, raw.value);
            return None;
        }
    };
    let timestamp = match raw.time_stamp.trim().parse::<i64>() {
        Ok(ts) => ts,
        Err(_) => {
            warn!("Skipping transaction {} with invalid timestamp {:?}", raw.hash, raw.time_stamp);
            return None;
        }
    };

    Some(Transaction {
        hash: raw.hash,
        sender: raw.from,
        receiver: raw.to,
        value,
        timestamp,
    })
}
