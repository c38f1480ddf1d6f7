//! Structural operations on the editable grid
//!
//! Every operation takes the current rows by reference and returns new rows;
//! nothing is mutated in place. Column indices in the returned rows are
//! dense, and every token's `row`/`col` marks agree with where it lives.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::GridError;
use crate::codec::find_token_row;
use crate::models::{EditToken, Row};

/// Which side of the target column a new column is inserted on
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

fn check_col(col: usize, num_cols: usize) -> Result<(), GridError> {
    if col >= num_cols {
        return Err(GridError::ColumnOutOfRange { col, num_cols });
    }
    Ok(())
}

fn restamp_col(cell: &[EditToken], col: usize) -> Vec<EditToken> {
    cell.iter()
        .cloned()
        .map(|mut token| {
            token.col = col;
            token
        })
        .collect()
}

/// Insert an empty column beside `target`
///
/// With `Side::Right` the target keeps its cell and `target + 1` is empty;
/// with `Side::Left` the target becomes empty and its cell moves to
/// `target + 1`. Every later column shifts up by one.
pub fn insert_column(
    rows: &[Row],
    num_cols: usize,
    target: usize,
    side: Side,
) -> Result<Vec<Row>, GridError> {
    check_col(target, num_cols)?;
    let empty_at = match side {
        Side::Right => target + 1,
        Side::Left => target,
    };

    Ok(rows
        .iter()
        .map(|row| {
            let mut cells = BTreeMap::new();
            for (&col, cell) in &row.cells {
                if col < empty_at {
                    cells.insert(col, cell.clone());
                } else {
                    cells.insert(col + 1, restamp_col(cell, col + 1));
                }
            }
            cells.insert(empty_at, Vec::new());
            Row {
                witness: row.witness.clone(),
                cells,
            }
        })
        .collect())
}

/// Check whether a column can be removed (no token anywhere sits in it)
pub fn can_delete_column(rows: &[Row], target: usize) -> bool {
    !rows.iter().flat_map(Row::tokens).any(|token| token.col == target)
}

/// Remove an empty column; later columns shift down by one
pub fn delete_column(rows: &[Row], num_cols: usize, target: usize) -> Result<Vec<Row>, GridError> {
    check_col(target, num_cols)?;
    if !can_delete_column(rows, target) {
        return Err(GridError::ColumnNotEmpty(target));
    }

    Ok(rows
        .iter()
        .map(|row| {
            let mut cells = BTreeMap::new();
            for (&col, cell) in &row.cells {
                if col < target {
                    cells.insert(col, cell.clone());
                } else if col > target {
                    cells.insert(col - 1, restamp_col(cell, col - 1));
                }
            }
            Row {
                witness: row.witness.clone(),
                cells,
            }
        })
        .collect())
}

/// Move the row at `from` so it ends up at index `to`
///
/// Tokens' `row` marks are re-stamped to their row's new position.
pub fn move_row(rows: &[Row], from: usize, to: usize) -> Result<Vec<Row>, GridError> {
    let len = rows.len();
    for index in [from, to] {
        if index >= len {
            return Err(GridError::RowOutOfRange { index, len });
        }
    }

    let mut moved = rows.to_vec();
    let row = moved.remove(from);
    moved.insert(to, row);

    for (index, row) in moved.iter_mut().enumerate() {
        for token in row.cells.values_mut().flatten() {
            token.row = index;
        }
    }
    Ok(moved)
}

/// Drag a token to another column, carrying the tokens between
///
/// Moving left takes every token of the witness with `order` at or below the
/// active token's that sits in a column after `target` and up to the active
/// token's column; they are appended to the target cell. Moving right takes
/// every token with `order` at or above the active token's from its column up
/// to (not including) `target`; they are prepended. The target cell is then
/// sorted by `order`, so reading order within the witness never changes.
pub fn relocate_token(
    rows: &[Row],
    num_cols: usize,
    active: &EditToken,
    target: usize,
) -> Result<Vec<Row>, GridError> {
    check_col(target, num_cols)?;

    let row_index = find_token_row(rows, &active.edit_id)
        .ok_or_else(|| GridError::TokenNotFound(active.edit_id.clone()))?;
    let row = &rows[row_index];
    let (source, order) = row
        .tokens()
        .find(|token| token.edit_id == active.edit_id)
        .map(|token| (token.col, token.order))
        .ok_or_else(|| GridError::TokenNotFound(active.edit_id.clone()))?;

    if source == target {
        return Ok(rows.to_vec());
    }

    let moving_left = target < source;
    let window = if moving_left {
        target + 1..=source
    } else {
        source..=target - 1
    };
    let in_window = |token: &EditToken| {
        if moving_left {
            token.order <= order
        } else {
            token.order >= order
        }
    };

    let mut updated = row.clone();
    let mut carried: Vec<EditToken> = Vec::new();
    for col in window {
        if let Some(cell) = updated.cells.get_mut(&col) {
            let (take, keep): (Vec<EditToken>, Vec<EditToken>) =
                cell.drain(..).partition(|token| in_window(token));
            *cell = keep;
            carried.extend(take);
        }
    }
    for token in carried.iter_mut() {
        token.col = target;
        token.row = row_index;
    }

    log::debug!(
        "Relocating {} token(s) of row {} from column {} to {}",
        carried.len(),
        row_index,
        source,
        target
    );

    let cell = updated.cell_mut(target);
    if moving_left {
        cell.extend(carried);
    } else {
        carried.append(cell);
        *cell = carried;
    }
    cell.sort_by_key(|token| token.order);

    let mut result = rows.to_vec();
    result[row_index] = updated;
    Ok(result)
}
