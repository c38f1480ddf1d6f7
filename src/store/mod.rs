//! Persisted application state
//!
//! Two independently keyed records: the collation collection and the theme
//! preference. Both hydrate when opened and flush after every change.
//! Persistence is fire-and-forget: a failed write is logged, the in-memory
//! state stays authoritative.

pub mod collections;
pub mod name_check;
pub mod storage;
pub mod theme;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use collections::{CollationStore, ExportFile, ListenerId};
pub use name_check::{NameCheck, NameCheckOutcome, NameTicket};
pub use storage::{FileStorage, LocalStorage, MemoryStorage, StateStorage};
pub use theme::ThemeStore;

/// Namespace key of the collation collection
pub const DATA_KEY: &str = "collatex-editor-data";

/// Namespace key of the theme preference
pub const THEME_KEY: &str = "collatex-editor-theme";

/// Version stamped on persisted records
pub const STATE_VERSION: u32 = 0;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Collation {0} not found")]
    NotFound(String),

    /// Export needs a loaded alignment table
    #[error("Export Failed: collation \"{0}\" has no alignment table")]
    NothingToExport(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Envelope around every persisted record
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Persisted<T> {
    pub state: T,
    #[serde(default)]
    pub version: u32,
}

impl<T> Persisted<T> {
    pub fn new(state: T) -> Self {
        Self {
            state,
            version: STATE_VERSION,
        }
    }
}

/// Read and decode a record, logging and discarding anything unreadable
pub(crate) fn hydrate<T, S>(storage: &S, key: &str) -> Option<T>
where
    T: for<'de> Deserialize<'de>,
    S: StateStorage,
{
    let raw = match storage.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("Could not read {}: {}", key, e);
            return None;
        }
    };
    match serde_json::from_str::<Persisted<T>>(&raw) {
        Ok(persisted) => Some(persisted.state),
        Err(e) => {
            log::warn!("Ignoring unreadable {}: {}", key, e);
            None
        }
    }
}

/// Encode and write a record; failures are logged, not returned
pub(crate) fn flush<T, S>(storage: &mut S, key: &str, state: &T)
where
    T: Serialize,
    S: StateStorage,
{
    let result = serde_json::to_string(&Persisted::new(state))
        .map_err(StoreError::from)
        .and_then(|raw| storage.write(key, &raw));
    if let Err(e) = result {
        log::warn!("Could not persist {}: {}", key, e);
    }
}
