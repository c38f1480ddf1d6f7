//! Table codec: persisted column-major tables <-> editable witness rows
//!
//! Loading a table numbers every token in reading order within its witness
//! and gives it a fresh edit id. Writing rows back is a transpose; the editor
//! marks stay on the tokens unless the caller strips them.

use std::collections::BTreeMap;

use crate::models::{Cell, Column, EditToken, Row, Table};

/// Convert a persisted table into editable rows, one per witness
pub fn to_editable_rows(table: &Table) -> Vec<Row> {
    table
        .witnesses
        .iter()
        .enumerate()
        .map(|(row_index, witness)| {
            let mut order: u32 = 0;
            let mut cells = BTreeMap::new();
            for (col_index, column) in table.table.iter().enumerate() {
                let cell: Vec<EditToken> = column
                    .get(row_index)
                    .map(|cell| cell.as_slice())
                    .unwrap_or(&[])
                    .iter()
                    .map(|token| {
                        let edit = EditToken::new(token.clone(), order, row_index, col_index);
                        order += 1;
                        edit
                    })
                    .collect();
                cells.insert(col_index, cell);
            }
            Row {
                witness: witness.clone(),
                cells,
            }
        })
        .collect()
}

/// Number of columns spanned by a set of rows (one past the highest index)
pub fn column_count(rows: &[Row]) -> usize {
    rows.iter()
        .filter_map(Row::max_col)
        .max()
        .map(|max| max + 1)
        .unwrap_or(0)
}

/// Convert editable rows back to the persisted table shape
///
/// Editor marks are merged into each token's fields; missing cells become
/// empty cells.
pub fn to_persisted_table(rows: &[Row]) -> Table {
    let num_cols = column_count(rows);
    let table: Vec<Column> = (0..num_cols)
        .map(|col| {
            rows.iter()
                .map(|row| -> Cell { row.cell(col).iter().map(EditToken::to_persisted).collect() })
                .collect()
        })
        .collect();
    let witnesses = rows.iter().map(|row| row.witness.clone()).collect();
    Table { witnesses, table }
}

/// Copy of a table with every editor mark removed, for clean export
pub fn strip_editor_marks(table: &Table) -> Table {
    let mut clean = table.clone();
    for token in clean.table.iter_mut().flatten().flatten() {
        token.strip_editor_marks();
    }
    clean
}

/// Every token in the grid, row by row then column by column
pub fn flatten_tokens(rows: &[Row]) -> Vec<&EditToken> {
    rows.iter().flat_map(Row::tokens).collect()
}

/// Find a token by its edit id
pub fn find_token<'a>(rows: &'a [Row], edit_id: &str) -> Option<&'a EditToken> {
    rows.iter()
        .flat_map(Row::tokens)
        .find(|token| token.edit_id == edit_id)
}

/// Find the index of the row holding a token
pub fn find_token_row(rows: &[Row], edit_id: &str) -> Option<usize> {
    rows.iter()
        .position(|row| row.tokens().any(|token| token.edit_id == edit_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Token, COL_KEY, ORDER_KEY};
    use std::collections::HashSet;

    fn sample_table() -> Table {
        Table::new(
            vec!["A".into(), "B".into()],
            vec![
                vec![vec![Token::new("a1"), Token::new("a2")], vec![Token::new("b1")]],
                vec![vec![], vec![Token::new("b2")]],
                vec![vec![Token::new("a3")], vec![Token::with_normalized("B3", "b3")]],
            ],
        )
    }

    #[test]
    fn test_orders_are_dense_per_witness() {
        let rows = to_editable_rows(&sample_table());

        let a: Vec<u32> = rows[0].tokens().map(|t| t.order).collect();
        let b: Vec<u32> = rows[1].tokens().map(|t| t.order).collect();
        assert_eq!(a, vec![0, 1, 2]);
        assert_eq!(b, vec![0, 1, 2]);
    }

    #[test]
    fn test_positions_and_ids_assigned() {
        let rows = to_editable_rows(&sample_table());

        let a3 = &rows[0].cell(2)[0];
        assert_eq!((a3.row, a3.col), (0, 2));
        let b2 = &rows[1].cell(1)[0];
        assert_eq!((b2.row, b2.col), (1, 1));

        let ids: HashSet<&str> = flatten_tokens(&rows).into_iter().map(|t| t.edit_id.as_str()).collect();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_every_row_has_every_column() {
        let rows = to_editable_rows(&sample_table());
        for row in &rows {
            assert_eq!(row.cells.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
        }
    }

    #[test]
    fn test_reload_mints_fresh_ids() {
        let first = to_editable_rows(&sample_table());
        let second = to_editable_rows(&to_persisted_table(&first));
        assert_ne!(first[0].cell(0)[0].edit_id, second[0].cell(0)[0].edit_id);
        assert_eq!(first[0].cell(0)[0].order, second[0].cell(0)[0].order);
    }

    #[test]
    fn test_persisted_table_keeps_marks() {
        let rows = to_editable_rows(&sample_table());
        let table = to_persisted_table(&rows);

        let token = &table.table[2][0][0];
        assert_eq!(token.t, "a3");
        assert!(token.extra.contains_key(ORDER_KEY));
        assert!(token.extra.contains_key(COL_KEY));

        let clean = strip_editor_marks(&table);
        assert_eq!(clean, sample_table());
    }

    #[test]
    fn test_missing_cells_become_empty() {
        let mut rows = to_editable_rows(&sample_table());
        rows[1].cells.remove(&2);

        let table = to_persisted_table(&rows);
        assert_eq!(table.table.len(), 3);
        assert!(table.table[2][1].is_empty());
    }

    #[test]
    fn test_find_token() {
        let rows = to_editable_rows(&sample_table());
        let id = rows[1].cell(2)[0].edit_id.clone();

        assert_eq!(find_token(&rows, &id).unwrap().display(), "b3");
        assert_eq!(find_token_row(&rows, &id), Some(1));
        assert!(find_token(&rows, "missing").is_none());
    }

    #[test]
    fn test_empty_table() {
        let rows = to_editable_rows(&Table::default());
        assert!(rows.is_empty());
        assert_eq!(to_persisted_table(&rows), Table::default());
    }
}
