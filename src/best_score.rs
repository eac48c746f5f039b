//! Best score record
//!
//! Persisted to LocalStorage under a fixed key as plain decimal text. Read
//! once at startup, written through every time a new best is reached.

use crate::parse_int_prefix;
use crate::platform::{KeyValueStore, StorageError};

/// The best score seen across sessions sharing the same storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestScore {
    value: u64,
}

impl BestScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "bestScore";

    pub fn new(value: u64) -> Self {
        Self { value }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Parse a stored value. Absent, unparsable or negative text is 0.
    pub fn parse(text: &str) -> Self {
        let value = parse_int_prefix(text)
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(0);
        Self { value }
    }

    /// Load from storage, degrading to 0 on any failure
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get_item(Self::STORAGE_KEY) {
            Ok(Some(text)) => {
                let best = Self::parse(&text);
                log::info!("Loaded best score {}", best.value);
                best
            }
            Ok(None) => {
                log::info!("No best score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read best score: {}", e);
                Self::default()
            }
        }
    }

    /// Raise the record if `score` beats it. Returns true when it did.
    pub fn offer(&mut self, score: u64) -> bool {
        if score > self.value {
            self.value = score;
            true
        } else {
            false
        }
    }

    /// Write the record to storage
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        store.set_item(Self::STORAGE_KEY, &self.value.to_string())
    }
}
