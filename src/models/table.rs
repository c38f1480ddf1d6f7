//! Alignment table structures
//!
//! Two shapes of the same data: the persisted `Table` is column-major (one
//! `Column` per alignment position, one cell per witness), while the editor
//! works on witness-major `Row`s keyed by column index.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::token::{EditToken, Token};

/// Ordered tokens for one (witness, column) position
pub type Cell = Vec<Token>;

/// One alignment position: a cell per witness, in witness order
pub type Column = Vec<Cell>;

/// Persisted alignment table, as produced by the collation tool
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Table {
    /// Witness labels (sigla), in row order
    pub witnesses: Vec<String>,

    /// Columns, in reading order
    pub table: Vec<Column>,
}

impl Table {
    pub fn new(witnesses: Vec<String>, table: Vec<Column>) -> Self {
        Self { witnesses, table }
    }

    /// Number of alignment columns
    pub fn column_count(&self) -> usize {
        self.table.len()
    }

    /// Number of witnesses
    pub fn witness_count(&self) -> usize {
        self.witnesses.len()
    }

    /// Get the cell for a witness at a column, if both exist
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.table.get(col).and_then(|column| column.get(row))
    }

    /// Total number of tokens across all cells
    pub fn token_count(&self) -> usize {
        self.table
            .iter()
            .flat_map(|column| column.iter())
            .map(|cell| cell.len())
            .sum()
    }
}

/// Editor view of one witness: its label and a cell per column index
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Row {
    /// Witness label
    pub witness: String,

    /// Cells keyed by column index
    pub cells: BTreeMap<usize, Vec<EditToken>>,
}

impl Row {
    /// Create a row with no cells
    pub fn new(witness: impl Into<String>) -> Self {
        Self {
            witness: witness.into(),
            cells: BTreeMap::new(),
        }
    }

    /// Get the cell at a column (empty slice when the index is absent)
    pub fn cell(&self, col: usize) -> &[EditToken] {
        self.cells.get(&col).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Get a mutable cell at a column, creating it if absent
    pub fn cell_mut(&mut self, col: usize) -> &mut Vec<EditToken> {
        self.cells.entry(col).or_default()
    }

    /// Highest column index present in this row
    pub fn max_col(&self) -> Option<usize> {
        self.cells.keys().next_back().copied()
    }

    /// All tokens in this row, column by column
    pub fn tokens(&self) -> impl Iterator<Item = &EditToken> {
        self.cells.values().flat_map(|cell| cell.iter())
    }
}
