//! Collation collection operations
//!
//! JavaScript-facing commands over the persisted collation store, plus the
//! collation form's validation entry points.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::helpers::{deserialize, js_error, parse_direction, serialize};
use super::state::{add_listener, rehydrate_store, remove_listener, with_name_check, with_store};
use crate::models::Collation;
use crate::schema::{parse_table, validate_name, CollationDraft};
use crate::store::{NameCheck, NameCheckOutcome, NameTicket};
use crate::{wasm_info, wasm_warn};

/// Re-read the store from browser storage and return the collections
#[wasm_bindgen(js_name = hydrate)]
pub fn hydrate() -> Result<JsValue, JsValue> {
    wasm_info!("hydrate called");
    rehydrate_store()?;
    get_collations()
}

/// Current collections snapshot
#[wasm_bindgen(js_name = getCollations)]
pub fn get_collations() -> Result<JsValue, JsValue> {
    with_store(|store| serialize(&store.snapshot(), "Collections serialization error"))
}

/// One collation by id, or null
#[wasm_bindgen(js_name = getCollation)]
pub fn get_collation(id: &str) -> Result<JsValue, JsValue> {
    with_store(|store| match store.get(id) {
        Some(collation) => serialize(collation, "Collation serialization error"),
        None => Ok(JsValue::NULL),
    })
}

/// Name, witness and column counts for the collections list
#[wasm_bindgen(js_name = getCollationSummaries)]
pub fn get_collation_summaries() -> Result<JsValue, JsValue> {
    with_store(|store| serialize(&store.summaries(), "Summary serialization error"))
}

/// Insert or replace a collation
#[wasm_bindgen(js_name = importCollation)]
pub fn import_collation(collation_js: JsValue) -> Result<(), JsValue> {
    let collation: Collation = deserialize(collation_js, "Collation deserialization error")?;
    wasm_info!("importCollation called: id={}, name={}", collation.id, collation.name);
    with_store(|store| {
        store.import(collation);
        Ok(())
    })
}

/// Validate a collation form and import the result
///
/// # Parameters
/// - `id`: id of the collation being edited, or undefined for a new one
/// - `name`: collation name
/// - `dir`: "ltr" or "rtl"
/// - `table_json`: contents of the CollateX JSON file, or undefined to keep
///   the edited collation's table
#[wasm_bindgen(js_name = submitCollation)]
pub fn submit_collation(
    id: Option<String>,
    name: String,
    dir: &str,
    table_json: Option<String>,
) -> Result<JsValue, JsValue> {
    wasm_info!("submitCollation called: name={}", name);
    let dir = parse_direction(dir)?;

    with_store(|store| {
        let mut draft = match id.as_deref().and_then(|id| store.get(id)) {
            Some(existing) => CollationDraft::from_collation(existing),
            None => CollationDraft::new(),
        };
        draft.name = name;
        draft.dir = dir;
        if let Some(json) = table_json {
            draft.load_table(json.as_bytes()).map_err(js_error)?;
        }

        let collation = draft.submit(store.snapshot()).map_err(js_error)?;
        let result = serialize(&collation, "Collation serialization error")?;
        store.import(collation);
        Ok(result)
    })
}

/// Replace a collation by id; returns false when the id is unknown
#[wasm_bindgen(js_name = updateCollation)]
pub fn update_collation(collation_js: JsValue) -> Result<bool, JsValue> {
    let collation: Collation = deserialize(collation_js, "Collation deserialization error")?;
    with_store(|store| Ok(store.update(collation)))
}

#[wasm_bindgen(js_name = setCollationDirection)]
pub fn set_collation_direction(id: &str, dir: &str) -> Result<bool, JsValue> {
    let dir = parse_direction(dir)?;
    with_store(|store| Ok(store.set_direction(id, dir)))
}

#[wasm_bindgen(js_name = deleteCollation)]
pub fn delete_collation(id: &str) -> Result<(), JsValue> {
    wasm_info!("deleteCollation called: id={}", id);
    with_store(|store| {
        store.delete(id);
        Ok(())
    })
}

#[wasm_bindgen(js_name = deleteCollations)]
pub fn delete_collations(ids_js: JsValue) -> Result<(), JsValue> {
    let ids: Vec<String> = deserialize(ids_js, "Id list deserialization error")?;
    with_store(|store| {
        store.delete_many(&ids);
        Ok(())
    })
}

/// Export a collation's table as `{ filename, contents }`
///
/// Fails without touching the store when the collation has no table.
#[wasm_bindgen(js_name = exportCollation)]
pub fn export_collation(id: &str) -> Result<JsValue, JsValue> {
    wasm_info!("exportCollation called: id={}", id);
    with_store(|store| {
        let file = store.export(id).map_err(|e| {
            wasm_warn!("{}", e);
            JsValue::from_str("Export Failed")
        })?;
        serialize(&file, "Export serialization error")
    })
}

/// Register a callback receiving the collections after every change
#[wasm_bindgen(js_name = subscribeCollations)]
pub fn subscribe_collations(callback: js_sys::Function) -> usize {
    add_listener(callback)
}

#[wasm_bindgen(js_name = unsubscribeCollations)]
pub fn unsubscribe_collations(id: usize) {
    remove_listener(id);
}

/// Parse a CollateX JSON file into a table, or fail with a field message
#[wasm_bindgen(js_name = parseAlignmentTable)]
pub fn parse_alignment_table(json: &str) -> Result<JsValue, JsValue> {
    let table = parse_table(json.as_bytes()).map_err(js_error)?;
    serialize(&table, "Table serialization error")
}

/// Full synchronous name check (length and uniqueness)
#[wasm_bindgen(js_name = validateCollationName)]
pub fn validate_collation_name(name: &str, own_id: Option<String>) -> Result<(), JsValue> {
    with_store(|store| validate_name(name, store.snapshot(), own_id.as_deref()).map_err(js_error))
}

/// Start a fresh name checker when the collation form opens
#[wasm_bindgen(js_name = resetNameCheck)]
pub fn reset_name_check(own_id: Option<String>) -> Result<(), JsValue> {
    with_name_check(|check| {
        *check = match own_id {
            Some(id) => NameCheck::for_collation(id),
            None => NameCheck::new(),
        };
    })
}

/// Schedule a debounced uniqueness check; superseded tickets resolve stale
#[wasm_bindgen(js_name = scheduleNameCheck)]
pub fn schedule_name_check(name: String, now_ms: f64) -> Result<JsValue, JsValue> {
    let ticket = with_name_check(|check| check.schedule(name, now_ms.max(0.0) as u64))?;
    serialize(&ticket, "Ticket serialization error")
}

#[derive(Serialize)]
struct NameCheckReport {
    status: &'static str,
    message: Option<String>,
}

/// Resolve a ticket: `{ status: "pending" | "stale" | "valid" | "invalid", message }`
#[wasm_bindgen(js_name = resolveNameCheck)]
pub fn resolve_name_check(ticket_js: JsValue, now_ms: f64) -> Result<JsValue, JsValue> {
    let ticket: NameTicket = deserialize(ticket_js, "Ticket deserialization error")?;
    let existing = with_store(|store| Ok(store.snapshot().to_vec()))?;
    let outcome = with_name_check(|check| check.resolve(&ticket, now_ms.max(0.0) as u64, &existing))?;

    let report = match outcome {
        NameCheckOutcome::Pending => NameCheckReport { status: "pending", message: None },
        NameCheckOutcome::Stale => NameCheckReport { status: "stale", message: None },
        NameCheckOutcome::Done(Ok(())) => NameCheckReport { status: "valid", message: None },
        NameCheckOutcome::Done(Err(e)) => NameCheckReport {
            status: "invalid",
            message: Some(e.to_string()),
        },
    };
    serialize(&report, "Name check serialization error")
}
