use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::SourceError;

/// The set of addresses being monitored, backed by a plain text file.
///
/// Case is preserved as written; the file is rewritten in full on every
/// change.
#[derive(Debug, Clone)]
pub struct WatchList {
    path: PathBuf,
    addresses: BTreeSet<String>,
}

impl WatchList {
    /// Load from `path`. A missing or unreadable file gives an empty list.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let addresses = match read_addresses(&path) {
            Ok(addresses) => addresses,
            Err(e) => {
                warn!("Error loading watch-list: {}", e);
                BTreeSet::new()
            }
        };

        Self { path, addresses }
    }

    /// Re-read the backing file, keeping the current set if that fails.
    pub fn refresh(&mut self) {
        match read_addresses(&self.path) {
            Ok(addresses) => self.addresses = addresses,
            Err(e) => warn!("Keeping previous watch-list, reload failed: {}", e),
        }
    }

    pub fn addresses(&self) -> Vec<String> {
        self.addresses.iter().cloned().collect()
    }

    pub fn contains(&self, address: &str) -> bool {
        self.addresses.iter().any(|a| a.eq_ignore_ascii_case(address))
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Returns `false` if the address was already tracked.
    pub fn add(&mut self, address: &str) -> Result<bool, SourceError> {
        let address = address.trim();
        if self.contains(address) {
            return Ok(false);
        }
        let mut updated = self.addresses.clone();
        updated.insert(address.to_string());
        write_addresses(&self.path, &updated)?;
        self.addresses = updated;
        info!("Now tracking {}", address);
        Ok(true)
    }

    /// Returns `false` if the address was not tracked.
    pub fn remove(&mut self, address: &str) -> Result<bool, SourceError> {
        let mut updated = self.addresses.clone();
        updated.retain(|a| !a.eq_ignore_ascii_case(address.trim()));
        if updated.len() == self.addresses.len() {
            return Ok(false);
        }
        write_addresses(&self.path, &updated)?;
        self.addresses = updated;
        info!("Stopped tracking {}", address);
        Ok(true)
    }

    pub fn save(&self) -> Result<(), SourceError> {
        write_addresses(&self.path, &self.addresses)
    }
}

fn write_addresses(path: &Path, addresses: &BTreeSet<String>) -> Result<(), SourceError> {
    let mut contents = String::new();
    for address in addresses {
        contents.push_str(address);
        contents.push('\n');
    }
    fs::write(path, contents).map_err(|source| SourceError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn read_addresses(path: &Path) -> Result<BTreeSet<String>, SourceError> {
    let raw = fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.display().to_string(),
        source,
    })?;

    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
