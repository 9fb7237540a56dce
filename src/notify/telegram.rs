use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use super::{Notifier, NotifyError};
use crate::config::Config;
use crate::models::ClassifiedAlert;

/// Bot API `sendMessage` client.
#[derive(Clone)]
pub struct TelegramNotifier {
    http: Client,
    endpoint: String,
    chat_id: String,
    tx_url: String,
    symbol: String,
}

#[derive(Deserialize)]
struct SendMessageResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramNotifier {
    pub fn new(config: &Config) -> Result<Self, NotifyError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: format!(
                "{}/bot{}/sendMessage",
                config.telegram_api_url.trim_end_matches('/'),
                config.telegram_bot_token
            ),
            chat_id: config.telegram_chat_id.clone(),
            tx_url: config.explorer_tx_url.clone(),
            symbol: config.token_symbol.clone(),
        })
    }
}

impl Notifier for TelegramNotifier {
    async fn notify(&self, alert: &ClassifiedAlert) -> Result<(), NotifyError> {
        let text = format_alert(alert, &self.symbol, &self.tx_url);
        let response = self
            .http
            .post(&self.endpoint)
            .json(&json!({
                "chat_id": self.chat_id,
                "text": text,
                "disable_web_page_preview": true,
            }))
            .send()
            .await?;

        let status = response.status();
        let body: SendMessageResponse = response.json().await?;
        if !status.is_success() || !body.ok {
            return Err(NotifyError::Rejected(
                body.description.unwrap_or_else(|| status.to_string()),
            ));
        }
        Ok(())
    }
}

pub fn format_alert(alert: &ClassifiedAlert, symbol: &str, tx_url: &str) -> String {
    let tx = &alert.transaction;
    let detected = if alert.labels.is_empty() {
        "None".to_string()
    } else {
        alert.labels_joined()
    };

    format!(
        "🚨 ALERT: Funds Moved! 🚨\nFrom: {}\nTo: {}\nAmount: {:.6} {}\nDetected: {}\nTx: {}{}",
        tx.sender, tx.receiver, tx.value, symbol, detected, tx_url, tx.hash
    )
}
