//! WASM API test
//!
//! Exercises the JavaScript-facing API in a browser, where localStorage is
//! available. Run with `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]

use collation_editor_wasm::api::*;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const TABLE: &str = r#"{"witnesses":["A","B"],"table":[[[{"t":"a"}],[{"t":"b"}]],[[],[]]]}"#;

fn submit(name: &str) -> String {
    let collation = submit_collation(None, name.to_string(), "ltr", Some(TABLE.to_string())).unwrap();
    js_sys::Reflect::get(&collation, &JsValue::from_str("id"))
        .unwrap()
        .as_string()
        .unwrap()
}

#[wasm_bindgen_test]
fn test_submit_and_export() {
    let id = submit("Browser export");
    let file = export_collation(&id).unwrap();
    let filename = js_sys::Reflect::get(&file, &JsValue::from_str("filename")).unwrap();
    assert_eq!(filename.as_string().unwrap(), "Browser export.json");
    delete_collation(&id).unwrap();
}

#[wasm_bindgen_test]
fn test_grid_mutations_commit() {
    let id = submit("Browser grid");
    open_grid(&id).unwrap();

    assert!(can_delete_column(1).unwrap());
    assert!(!can_delete_column(0).unwrap());
    delete_column(1).unwrap();
    assert!(delete_column(0).is_err());

    let summaries = get_collation_summaries().unwrap();
    assert!(summaries.is_object());
    close_grid().unwrap();
    delete_collation(&id).unwrap();
}

fn grid_columns() -> f64 {
    let grid = get_grid().unwrap();
    js_sys::Reflect::get(&grid, &JsValue::from_str("numCols"))
        .unwrap()
        .as_f64()
        .unwrap()
}

#[wasm_bindgen_test]
fn test_failed_commit_leaves_grid_unchanged() {
    let id = submit("Browser orphan");
    open_grid(&id).unwrap();
    let before = grid_columns();

    delete_collation(&id).unwrap();
    assert!(insert_column(0, "right").is_err());
    assert_eq!(grid_columns(), before);
    close_grid().unwrap();
}

#[wasm_bindgen_test]
fn test_invalid_table_is_rejected() {
    assert!(parse_alignment_table("{\"witnesses\":[]").is_err());
    assert!(parse_alignment_table(TABLE).is_ok());
}
