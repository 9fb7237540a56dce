//! Static address inputs: the watch-list and the known-address lists.
//!
//! Loaders fail soft. A missing or malformed file yields an empty
//! collection and a warning so the polling loop keeps running.

pub mod known;
pub mod watchlist;

use thiserror::Error;

pub use known::{load_exchange_list, load_flagged_addresses, KnownAddressList};
pub use watchlist::WatchList;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
