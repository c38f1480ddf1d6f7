//! The collation collection
//!
//! All writes go through the command methods (`import`, `update`, `delete`,
//! `export`); each one flushes to storage and notifies subscribers with the
//! new snapshot.

use serde::{Deserialize, Serialize};

use super::storage::StateStorage;
use super::{flush, hydrate, StoreError, DATA_KEY};
use crate::grid::AlignmentGrid;
use crate::models::serde_helpers::deserialize_lenient_collations;
use crate::models::{Collation, CollationSummary, Direction};

/// Handle returned by `subscribe`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

type Listener = Box<dyn FnMut(&[Collation]) + Send>;

#[derive(Serialize, Deserialize, Default)]
struct DataState {
    #[serde(default, deserialize_with = "deserialize_lenient_collations")]
    collations: Vec<Collation>,
}

/// A downloadable export of a collation's table
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExportFile {
    /// `<collation name>.json`
    pub filename: String,
    /// Pretty-printed table JSON
    pub contents: String,
}

impl ExportFile {
    pub fn as_bytes(&self) -> &[u8] {
        self.contents.as_bytes()
    }
}

pub struct CollationStore<S: StateStorage> {
    collations: Vec<Collation>,
    storage: S,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: usize,
}

impl<S: StateStorage> CollationStore<S> {
    /// Open the store, hydrating from whatever `storage` holds
    pub fn open(storage: S) -> Self {
        let collations = hydrate::<DataState, S>(&storage, DATA_KEY)
            .map(|state| state.collations)
            .unwrap_or_default();
        log::info!("Hydrated {} collation(s)", collations.len());
        Self {
            collations,
            storage,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Current collections snapshot
    pub fn snapshot(&self) -> &[Collation] {
        &self.collations
    }

    pub fn get(&self, id: &str) -> Option<&Collation> {
        self.collations.iter().find(|c| c.id == id)
    }

    pub fn summaries(&self) -> Vec<CollationSummary> {
        self.collations.iter().map(Collation::summary).collect()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Insert a collation, replacing any with the same id
    pub fn import(&mut self, collation: Collation) {
        match self.collations.iter_mut().find(|c| c.id == collation.id) {
            Some(existing) => *existing = collation,
            None => self.collations.push(collation),
        }
        self.commit();
    }

    /// Replace a collation by id; unknown ids are ignored
    pub fn update(&mut self, collation: Collation) -> bool {
        let Some(existing) = self.collations.iter_mut().find(|c| c.id == collation.id) else {
            log::debug!("Ignoring update of unknown collation {}", collation.id);
            return false;
        };
        *existing = collation;
        self.commit();
        true
    }

    /// Change a collation's reading direction
    pub fn set_direction(&mut self, id: &str, dir: Direction) -> bool {
        match self.get(id) {
            Some(collation) => {
                let updated = Collation {
                    dir,
                    ..collation.clone()
                };
                self.update(updated)
            }
            None => false,
        }
    }

    /// Write an edited grid back into its collation
    pub fn commit_grid(&mut self, grid: &AlignmentGrid) -> Result<(), StoreError> {
        let not_found = || StoreError::NotFound(grid.collation_id.clone());
        let updated = grid.to_collation(self.get(&grid.collation_id).ok_or_else(not_found)?);
        if self.update(updated) {
            Ok(())
        } else {
            Err(not_found())
        }
    }

    /// Remove a collation by id; unknown ids are ignored
    pub fn delete(&mut self, id: &str) {
        let before = self.collations.len();
        self.collations.retain(|c| c.id != id);
        if self.collations.len() != before {
            log::info!("Deleted collation {}", id);
            self.commit();
        }
    }

    pub fn delete_many(&mut self, ids: &[String]) {
        let before = self.collations.len();
        self.collations.retain(|c| !ids.contains(&c.id));
        if self.collations.len() != before {
            self.commit();
        }
    }

    /// Serialize a collation's table for download
    ///
    /// The store is never modified.
    pub fn export(&self, id: &str) -> Result<ExportFile, StoreError> {
        let collation = self.get(id).ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let table = collation
            .alignment_table
            .as_ref()
            .ok_or_else(|| StoreError::NothingToExport(collation.name.clone()))?;
        Ok(ExportFile {
            filename: format!("{}.json", collation.name),
            contents: serde_json::to_string_pretty(table)?,
        })
    }

    pub fn export_many(&self, ids: &[String]) -> Vec<(String, Result<ExportFile, StoreError>)> {
        ids.iter().map(|id| (id.clone(), self.export(id))).collect()
    }

    /// Register a callback run with the new snapshot after every change
    pub fn subscribe(&mut self, listener: impl FnMut(&[Collation]) + Send + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    fn commit(&mut self) {
        flush(
            &mut self.storage,
            DATA_KEY,
            &DataState {
                collations: self.collations.clone(),
            },
        );
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.collations);
        }
    }
}
