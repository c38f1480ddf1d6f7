//! Grid mutation engine
//!
//! `AlignmentGrid` holds the editable rows of one collation together with its
//! column count, and applies the structural operations from `operations`.
//! Each operation either succeeds completely or leaves the grid untouched.

pub mod layout;
pub mod operations;

use serde::Serialize;
use thiserror::Error;

use crate::codec::{find_token, to_editable_rows, to_persisted_table};
use crate::models::{Collation, EditToken, Row, Table};

pub use layout::column_widths;
pub use operations::{can_delete_column, delete_column, insert_column, move_row, relocate_token, Side};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("Column {col} out of bounds (columns: {num_cols})")]
    ColumnOutOfRange { col: usize, num_cols: usize },

    #[error("Row {index} out of bounds (rows: {len})")]
    RowOutOfRange { index: usize, len: usize },

    /// Columns can only be removed while empty
    #[error("Column {0} still holds tokens")]
    ColumnNotEmpty(usize),

    #[error("Token {0} not found")]
    TokenNotFound(String),

    #[error("The selected collation table could not be loaded")]
    MissingTable,
}

/// Editable state of one collation's alignment table
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentGrid {
    pub collation_id: String,
    pub rows: Vec<Row>,
    pub num_cols: usize,
}

impl AlignmentGrid {
    /// Load a collation's table into editable form
    pub fn load(collation: &Collation) -> Result<Self, GridError> {
        let table = collation.alignment_table.as_ref().ok_or(GridError::MissingTable)?;
        Ok(Self::from_table(collation.id.clone(), table))
    }

    pub fn from_table(collation_id: impl Into<String>, table: &Table) -> Self {
        Self {
            collation_id: collation_id.into(),
            rows: to_editable_rows(table),
            num_cols: table.column_count(),
        }
    }

    pub fn insert_column(&mut self, target: usize, side: Side) -> Result<(), GridError> {
        self.rows = insert_column(&self.rows, self.num_cols, target, side)?;
        self.num_cols += 1;
        log::info!("Inserted column {:?} of {} ({} columns)", side, target, self.num_cols);
        Ok(())
    }

    pub fn can_delete_column(&self, target: usize) -> bool {
        target < self.num_cols && can_delete_column(&self.rows, target)
    }

    pub fn delete_column(&mut self, target: usize) -> Result<(), GridError> {
        self.rows = delete_column(&self.rows, self.num_cols, target)?;
        self.num_cols -= 1;
        log::info!("Deleted column {} ({} columns)", target, self.num_cols);
        Ok(())
    }

    pub fn move_row(&mut self, from: usize, to: usize) -> Result<(), GridError> {
        self.rows = move_row(&self.rows, from, to)?;
        log::info!("Moved row {} to {}", from, to);
        Ok(())
    }

    /// Drop the token with `edit_id` onto column `target`
    pub fn relocate_token(&mut self, edit_id: &str, target: usize) -> Result<(), GridError> {
        let active = self
            .find_token(edit_id)
            .cloned()
            .ok_or_else(|| GridError::TokenNotFound(edit_id.to_string()))?;
        self.rows = relocate_token(&self.rows, self.num_cols, &active, target)?;
        log::info!("Relocated token {} to column {}", edit_id, target);
        Ok(())
    }

    pub fn find_token(&self, edit_id: &str) -> Option<&EditToken> {
        find_token(&self.rows, edit_id)
    }

    /// Persisted form of the current state
    ///
    /// Columns past the last row cell still count, so a table whose trailing
    /// columns are empty keeps them.
    pub fn to_table(&self) -> Table {
        let mut table = to_persisted_table(&self.rows);
        while table.table.len() < self.num_cols {
            table.table.push(vec![Vec::new(); self.rows.len()]);
        }
        table
    }

    /// The collation with its table replaced by the current state
    pub fn to_collation(&self, base: &Collation) -> Collation {
        Collation {
            alignment_table: Some(self.to_table()),
            ..base.clone()
        }
    }

    pub fn column_widths(&self, font_size: f32) -> Vec<f32> {
        column_widths(&self.rows, self.num_cols, font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Direction, Token};

    fn collation() -> Collation {
        Collation::new(
            "Sample",
            Direction::Ltr,
            Some(Table::new(
                vec!["A".into(), "B".into()],
                vec![
                    vec![vec![Token::new("a1")], vec![Token::new("b1")]],
                    vec![vec![Token::new("a2")], vec![]],
                ],
            )),
        )
    }

    #[test]
    fn test_load_missing_table() {
        let broken = Collation::new("Broken", Direction::Ltr, None);
        assert_eq!(AlignmentGrid::load(&broken), Err(GridError::MissingTable));
    }

    #[test]
    fn test_failed_operation_leaves_grid() {
        let mut grid = AlignmentGrid::load(&collation()).unwrap();
        let before = grid.clone();

        assert_eq!(grid.delete_column(0), Err(GridError::ColumnNotEmpty(0)));
        assert_eq!(
            grid.insert_column(5, Side::Left),
            Err(GridError::ColumnOutOfRange { col: 5, num_cols: 2 })
        );
        assert_eq!(grid, before);
    }

    #[test]
    fn test_column_count_tracks_operations() {
        let mut grid = AlignmentGrid::load(&collation()).unwrap();
        grid.insert_column(1, Side::Right).unwrap();
        assert_eq!(grid.num_cols, 3);
        assert!(grid.can_delete_column(2));
        assert!(!grid.can_delete_column(3));

        grid.delete_column(2).unwrap();
        assert_eq!(grid.num_cols, 2);
    }

    #[test]
    fn test_trailing_empty_columns_survive_commit() {
        let base = collation();
        let mut grid = AlignmentGrid::load(&base).unwrap();
        grid.insert_column(1, Side::Right).unwrap();

        let table = grid.to_collation(&base).alignment_table.unwrap();
        assert_eq!(table.table.len(), 3);
        assert_eq!(table.table[2], vec![Vec::<Token>::new(), Vec::new()]);
    }

    #[test]
    fn test_relocate_by_edit_id() {
        let mut grid = AlignmentGrid::load(&collation()).unwrap();
        let id = grid.rows[1].cell(0)[0].edit_id.clone();

        grid.relocate_token(&id, 1).unwrap();
        assert_eq!(grid.find_token(&id).unwrap().col, 1);
        assert!(!grid.can_delete_column(0));
        assert_eq!(
            grid.relocate_token("nope", 0),
            Err(GridError::TokenNotFound("nope".into()))
        );
    }
}
