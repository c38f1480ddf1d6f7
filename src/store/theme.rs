//! Persisted theme preference

use serde::{Deserialize, Serialize};

use super::storage::StateStorage;
use super::{flush, hydrate, THEME_KEY};
use crate::models::ThemeMode;

#[derive(Serialize, Deserialize, Default)]
struct ThemeState {
    theme: ThemeMode,
}

pub struct ThemeStore<S: StateStorage> {
    mode: ThemeMode,
    storage: S,
}

impl<S: StateStorage> ThemeStore<S> {
    pub fn open(storage: S) -> Self {
        let mode = hydrate::<ThemeState, S>(&storage, THEME_KEY)
            .map(|state| state.theme)
            .unwrap_or_default();
        Self { mode, storage }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ThemeMode) {
        self.mode = mode;
        flush(&mut self.storage, THEME_KEY, &ThemeState { theme: mode });
    }

    /// Concrete light/dark mode given the browser's color scheme
    pub fn resolved(&self, prefers_dark: bool) -> ThemeMode {
        self.mode.resolve(prefers_dark)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
