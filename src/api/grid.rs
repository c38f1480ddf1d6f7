//! Alignment grid operations
//!
//! One collation's grid is open at a time. Every successful mutation is
//! committed to the collation store before the new grid is returned, so the
//! store stays the single source of truth. A rejected mutation changes
//! nothing.

use wasm_bindgen::prelude::*;

use super::helpers::{js_error, parse_side, serialize};
use super::state::{set_grid, with_grid, with_store};
use crate::grid::{AlignmentGrid, GridError};
use crate::{wasm_info, wasm_log, wasm_warn};

/// Write the grid back into its collation
fn commit(grid: &AlignmentGrid) -> Result<(), JsValue> {
    with_store(|store| store.commit_grid(grid).map_err(js_error))
}

/// Apply a mutation to a copy of the open grid, commit it, then keep it
///
/// The open grid is replaced only once the store has accepted the change.
fn mutate(
    name: &str,
    op: impl FnOnce(&mut AlignmentGrid) -> Result<(), GridError>,
) -> Result<JsValue, JsValue> {
    let mut grid = with_grid(|grid| Ok(grid.clone()))?;
    op(&mut grid).map_err(|e| {
        wasm_warn!("{} rejected: {}", name, e);
        JsValue::from_str(&e.to_string())
    })?;
    commit(&grid)?;
    wasm_log!("  {} committed: {} rows, {} columns", name, grid.rows.len(), grid.num_cols);
    let result = serialize(&grid, "Grid serialization error")?;
    set_grid(Some(grid))?;
    Ok(result)
}

/// Load a collation into the editor
///
/// Fails when the collation's table could not be loaded; the only remedy
/// offered to the user is deleting the collation.
#[wasm_bindgen(js_name = openGrid)]
pub fn open_grid(collation_id: &str) -> Result<JsValue, JsValue> {
    wasm_info!("openGrid called: id={}", collation_id);
    let collation = with_store(|store| {
        store
            .get(collation_id)
            .cloned()
            .ok_or_else(|| js_error("No such collation found"))
    })?;
    let grid = AlignmentGrid::load(&collation).map_err(js_error)?;
    let result = serialize(&grid, "Grid serialization error")?;
    set_grid(Some(grid))?;
    Ok(result)
}

#[wasm_bindgen(js_name = closeGrid)]
pub fn close_grid() -> Result<(), JsValue> {
    set_grid(None)
}

#[wasm_bindgen(js_name = getGrid)]
pub fn get_grid() -> Result<JsValue, JsValue> {
    with_grid(|grid| serialize(grid, "Grid serialization error"))
}

/// Insert an empty column to the "left" or "right" of `col`
#[wasm_bindgen(js_name = insertColumn)]
pub fn insert_column(col: usize, side: &str) -> Result<JsValue, JsValue> {
    wasm_info!("insertColumn called: col={}, side={}", col, side);
    let side = parse_side(side)?;
    mutate("insertColumn", |grid| grid.insert_column(col, side))
}

/// Whether the "Remove column" action is enabled
#[wasm_bindgen(js_name = canDeleteColumn)]
pub fn can_delete_column(col: usize) -> Result<bool, JsValue> {
    with_grid(|grid| Ok(grid.can_delete_column(col)))
}

#[wasm_bindgen(js_name = deleteColumn)]
pub fn delete_column(col: usize) -> Result<JsValue, JsValue> {
    wasm_info!("deleteColumn called: col={}", col);
    mutate("deleteColumn", |grid| grid.delete_column(col))
}

#[wasm_bindgen(js_name = moveRow)]
pub fn move_row(from: usize, to: usize) -> Result<JsValue, JsValue> {
    wasm_info!("moveRow called: from={}, to={}", from, to);
    mutate("moveRow", |grid| grid.move_row(from, to))
}

/// Finish a token drag by dropping it on column `target_col`
#[wasm_bindgen(js_name = relocateToken)]
pub fn relocate_token(edit_id: &str, target_col: usize) -> Result<JsValue, JsValue> {
    wasm_info!("relocateToken called: token={}, target={}", edit_id, target_col);
    mutate("relocateToken", |grid| grid.relocate_token(edit_id, target_col))
}

/// Look up the token being dragged, or null
#[wasm_bindgen(js_name = findToken)]
pub fn find_token(edit_id: &str) -> Result<JsValue, JsValue> {
    with_grid(|grid| match grid.find_token(edit_id) {
        Some(token) => serialize(token, "Token serialization error"),
        None => Ok(JsValue::NULL),
    })
}

/// Pixel width hint for each column at the given font size
#[wasm_bindgen(js_name = getColumnWidths)]
pub fn get_column_widths(font_size: f32) -> Result<Vec<f32>, JsValue> {
    with_grid(|grid| Ok(grid.column_widths(font_size)))
}
