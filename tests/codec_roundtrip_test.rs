// Round-trip tests: persisted table -> editable rows -> persisted table

use collation_editor_wasm::codec::{strip_editor_marks, to_editable_rows, to_persisted_table};
use collation_editor_wasm::schema::parse_table;
use collation_editor_wasm::{Table, ORDER_KEY};

const COLLATEX_OUTPUT: &str = r#"{
  "witnesses": ["W1", "W2", "W3"],
  "table": [
    [[{"t": "Der ", "n": "der", "_sigil": "W1", "_token_array_position": 0}],
     [{"t": "Der ", "n": "der"}],
     [{"t": "Die ", "n": "die"}]],
    [[{"t": "kleine ", "n": "kleine"}, {"t": "braune ", "n": "braune"}],
     [],
     [{"t": "kleine ", "n": "kleine"}]],
    [[{"t": "Fuchs", "n": "fuchs"}],
     [{"t": "Fuchs", "n": "fuchs"}],
     [{"t": "Katze", "n": "katze", "rank": 2.5}]]
  ]
}"#;

fn sample() -> Table {
    parse_table(COLLATEX_OUTPUT.as_bytes()).expect("sample should parse")
}

#[test]
fn test_round_trip_preserves_content() {
    let original = sample();
    let rows = to_editable_rows(&original);
    let restored = to_persisted_table(&rows);

    assert_eq!(restored.witnesses, original.witnesses);
    assert_eq!(restored.table.len(), original.table.len());

    for (col, column) in original.table.iter().enumerate() {
        assert_eq!(restored.table[col].len(), column.len());
        for (row, cell) in column.iter().enumerate() {
            let got: Vec<(&str, Option<&str>)> = restored.table[col][row]
                .iter()
                .map(|t| (t.t.as_str(), t.n.as_deref()))
                .collect();
            let want: Vec<(&str, Option<&str>)> =
                cell.iter().map(|t| (t.t.as_str(), t.n.as_deref())).collect();
            assert_eq!(got, want, "cell ({}, {})", row, col);
        }
    }
}

#[test]
fn test_round_trip_only_adds_marks() {
    let original = sample();
    let restored = to_persisted_table(&to_editable_rows(&original));

    assert!(restored.table[0][0][0].extra.contains_key(ORDER_KEY));
    assert_eq!(restored.table[0][0][0].extra["_sigil"], original.table[0][0][0].extra["_sigil"]);
    assert_eq!(strip_editor_marks(&restored), original);
}

#[test]
fn test_reloading_exported_table_is_stable() {
    let first = to_persisted_table(&to_editable_rows(&sample()));
    let json = serde_json::to_string(&first).unwrap();
    let reparsed = parse_table(json.as_bytes()).unwrap();
    let second = to_persisted_table(&to_editable_rows(&reparsed));

    assert_eq!(strip_editor_marks(&second), sample());
}

#[test]
fn test_orders_restart_per_witness() {
    let rows = to_editable_rows(&sample());

    let w1: Vec<(usize, u32)> = rows[0].tokens().map(|t| (t.col, t.order)).collect();
    assert_eq!(w1, vec![(0, 0), (1, 1), (1, 2), (2, 3)]);

    let w2: Vec<(usize, u32)> = rows[1].tokens().map(|t| (t.col, t.order)).collect();
    assert_eq!(w2, vec![(0, 0), (2, 1)]);
}
