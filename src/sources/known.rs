use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use super::SourceError;

/// Immutable set of lower-cased addresses used for membership lookup.
#[derive(Debug, Clone, Default)]
pub struct KnownAddressList {
    addresses: HashSet<String>,
}

impl KnownAddressList {
    pub fn new<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let addresses = addresses
            .into_iter()
            .map(|a| a.as_ref().trim().to_lowercase())
            .filter(|a| !a.is_empty())
            .collect();

        Self { addresses }
    }

    /// Case-insensitive membership check.
    pub fn contains(&self, address: &str) -> bool {
        self.addresses.contains(&address.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

/// Flagged addresses from a JSON object of the form
/// `{ "<any key>": { "eth": ["0x..", ...] }, ... }`.
/// Entries that are not objects, or lack an `eth` array, are skipped.
pub fn read_flagged_addresses(path: impl AsRef<Path>) -> Result<KnownAddressList, SourceError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let data: Value = serde_json::from_str(&raw).map_err(|source| SourceError::Json {
        path: path.display().to_string(),
        source,
    })?;

    let addresses = data
        .as_object()
        .into_iter()
        .flat_map(|outer| outer.values())
        .filter_map(|entry| entry.get("eth").and_then(Value::as_array))
        .flatten()
        .filter_map(Value::as_str);

    Ok(KnownAddressList::new(addresses))
}

/// Newline-delimited address list, blank lines ignored.
pub fn read_exchange_list(path: impl AsRef<Path>) -> Result<KnownAddressList, SourceError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.display().to_string(),
        source,
    })?;

    Ok(KnownAddressList::new(raw.lines()))
}

pub fn load_flagged_addresses(path: impl AsRef<Path>) -> KnownAddressList {
    match read_flagged_addresses(path) {
        Ok(list) => {
            debug!("Loaded {} flagged addresses", list.len());
            list
        }
        Err(e) => {
            warn!("Error loading flagged addresses: {}", e);
            KnownAddressList::default()
        }
    }
}

pub fn load_exchange_list(path: impl AsRef<Path>) -> KnownAddressList {
    match read_exchange_list(path) {
        Ok(list) => {
            debug!("Loaded {} exchange addresses", list.len());
            list
        }
        Err(e) => {
            warn!("Error loading exchange list: {}", e);
            KnownAddressList::default()
        }
    }
}
