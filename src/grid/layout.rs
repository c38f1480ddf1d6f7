//! Column width hints for the grid renderer

use crate::models::Row;

/// Narrowest a column is ever drawn
pub const MIN_COLUMN_WIDTH: f32 = 75.0;

/// Horizontal space reserved around each token chip
pub const TOKEN_PADDING: f32 = 50.0;

/// Horizontal space reserved around a cell's contents
pub const CELL_PADDING: f32 = 50.0;

/// Average glyph width as a fraction of the font size
pub const GLYPH_WIDTH_RATIO: f32 = 0.5;

/// Estimate the rendered width of a string
pub fn estimate_text_width(text: &str, font_size: f32) -> f32 {
    font_size * GLYPH_WIDTH_RATIO * text.chars().count() as f32
}

/// Width for each column, wide enough for its widest cell
pub fn column_widths(rows: &[Row], num_cols: usize, font_size: f32) -> Vec<f32> {
    (0..num_cols)
        .map(|col| {
            rows.iter()
                .map(|row| {
                    let cell = row.cell(col);
                    let text = cell
                        .iter()
                        .map(|token| token.display())
                        .collect::<Vec<_>>()
                        .join(" ");
                    estimate_text_width(&text, font_size)
                        + TOKEN_PADDING * cell.len() as f32
                        + CELL_PADDING
                })
                .fold(MIN_COLUMN_WIDTH, f32::max)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::to_editable_rows;
    use crate::models::{Table, Token};

    #[test]
    fn test_widths() {
        let table = Table::new(
            vec!["A".into(), "B".into()],
            vec![
                vec![vec![], vec![]],
                vec![
                    vec![Token::new("abcd"), Token::new("ef")],
                    vec![Token::with_normalized("XYZ", "x")],
                ],
            ],
        );
        let rows = to_editable_rows(&table);
        let widths = column_widths(&rows, 2, 16.0);

        assert_eq!(widths[0], MIN_COLUMN_WIDTH);
        // "abcd ef" is 7 glyphs at 8px, plus two chips and the cell padding
        assert_eq!(widths[1], 56.0 + 100.0 + 50.0);
    }
}
