// Transactions as read from the explorer, classified alerts and the
// persisted alert row.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A transfer observed on chain. Read-only view of explorer data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub hash: String,
    pub sender: String,
    pub receiver: String,
    /// Amount in major units (ETH, not wei).
    pub value: f64,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    FlaggedSender,
    KnownReceiver,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::FlaggedSender => "flagged-sender",
            Label::KnownReceiver => "known-receiver",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transaction that passed the age and value filters, annotated with
/// whatever classification matched. `labels` may be empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedAlert {
    pub transaction: Transaction,
    pub labels: Vec<Label>,
}

impl ClassifiedAlert {
    pub fn hash(&self) -> &str {
        &self.transaction.hash
    }

    /// Comma separated label names as stored in the `labels` column.
    pub fn labels_joined(&self) -> String {
        self.labels
            .iter()
            .map(Label::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Inserted,
    DuplicateSkipped,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedAlert {
    pub id: i64,
    pub sender: String,
    pub tx_hash: String,
    pub receiver: String,
    pub value: f64,
    pub timestamp: i64,
    pub labels: String,
}
