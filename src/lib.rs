//! Collation Editor WASM Module
//!
//! Editing model for CollateX alignment tables: the table codec, the grid
//! mutation engine and the persisted collation store, exposed to the
//! browser front end through `api`.

pub mod models;
pub mod schema;
pub mod codec;
pub mod grid;
pub mod store;
pub mod api;

// Re-export commonly used types
pub use models::*;
pub use codec::{to_editable_rows, to_persisted_table};
pub use grid::{AlignmentGrid, GridError, Side};
pub use schema::ValidationError;
pub use store::{CollationStore, StoreError};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        api::helpers::log_warn(&format!("Logger already initialized: {}", e));
    }

    log::info!("Collation Editor WASM module initialized");
}
