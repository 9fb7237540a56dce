//! Filtering and labelling of fetched transactions.
//!
//! Pure: no I/O, no clock. The caller passes `now`.

use crate::config::Config;
use crate::models::{ClassifiedAlert, Label, Transaction};
use crate::sources::KnownAddressList;

/// Value and recency limits a transaction must pass to alert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertPolicy {
    /// Minimum value in major units, inclusive.
    pub threshold: f64,
    /// Maximum age in seconds, inclusive.
    pub max_age_secs: i64,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            threshold: 1.0,
            max_age_secs: 300,
        }
    }
}

impl From<&Config> for AlertPolicy {
    fn from(config: &Config) -> Self {
        Self {
            threshold: config.value_threshold,
            max_age_secs: config.max_age_secs,
        }
    }
}

/// Decide whether `tx` alerts, and with which labels.
///
/// Rejects transactions without a hash, older than the policy's window, or
/// below its threshold. Labels only annotate: an alert with no label is
/// still an alert.
pub fn classify(
    tx: &Transaction,
    flagged_senders: &KnownAddressList,
    known_receivers: &KnownAddressList,
    policy: &AlertPolicy,
    now: i64,
) -> Option<ClassifiedAlert> {
    if tx.hash.trim().is_empty() {
        return None;
    }

    if now.saturating_sub(tx.timestamp) > policy.max_age_secs {
        return None;
    }

    if tx.value < policy.threshold {
        return None;
    }

    let mut labels = Vec::new();
    if flagged_senders.contains(&tx.sender) {
        labels.push(Label::FlaggedSender);
    }
    if known_receivers.contains(&tx.receiver) {
        labels.push(Label::KnownReceiver);
    }

    Some(ClassifiedAlert {
        transaction: tx.clone(),
        labels,
    })
}
