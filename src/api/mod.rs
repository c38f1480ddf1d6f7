//! Collation Editor WASM API
//!
//! This module provides the JavaScript-facing API for the collation editor.
//!
//! # Module Structure
//!
//! - `helpers`: Shared utilities for serialization, argument parsing, error handling, and logging
//! - `state`: WASM-owned store, open grid, theme and name checker
//! - `collections`: Collation CRUD, import/export and form validation
//! - `grid`: Column insert/delete, row reorder and token drag on the open grid
//! - `theme`: Theme preference

pub mod helpers;
pub mod state;
pub mod collections;
pub mod grid;
pub mod theme;

pub use collections::*;
pub use grid::*;
pub use theme::*;
