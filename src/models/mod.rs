//! Models module for the collation editor
//!
//! This module contains the data models shared by the codec, the grid
//! mutation engine and the collation store.

pub mod token;
pub mod table;
pub mod collation;
pub mod theme;
pub mod serde_helpers;

// Re-export commonly used types
pub use token::*;
pub use table::*;
pub use collation::*;
pub use theme::ThemeMode;
