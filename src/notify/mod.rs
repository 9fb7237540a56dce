pub mod telegram;

use std::future::Future;
use thiserror::Error;

use crate::models::ClassifiedAlert;

pub use telegram::{format_alert, TelegramNotifier};

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Messaging API rejected the message: {0}")]
    Rejected(String),
}

/// Outbound alert channel. Delivery is fire-and-forget from the
/// pipeline's point of view.
pub trait Notifier {
    fn notify(&self, alert: &ClassifiedAlert) -> impl Future<Output = Result<(), NotifyError>> + Send;
}
