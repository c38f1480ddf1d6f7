//! Theme preference operations

use wasm_bindgen::prelude::*;

use super::helpers::{parse_theme, serialize};
use super::state::with_theme;

fn prefers_dark() -> bool {
    web_sys::window()
        .and_then(|window| window.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false)
}

/// Stored preference: "light", "dark" or "device"
#[wasm_bindgen(js_name = getTheme)]
pub fn get_theme() -> Result<JsValue, JsValue> {
    let mode = with_theme(|theme| theme.mode())?;
    serialize(&mode, "Theme serialization error")
}

#[wasm_bindgen(js_name = setTheme)]
pub fn set_theme(mode: &str) -> Result<(), JsValue> {
    let mode = parse_theme(mode)?;
    with_theme(|theme| theme.set_mode(mode))
}

/// Preference resolved against the browser's color scheme: "light" or "dark"
#[wasm_bindgen(js_name = getResolvedTheme)]
pub fn get_resolved_theme() -> Result<JsValue, JsValue> {
    let dark = prefers_dark();
    let mode = with_theme(|theme| theme.resolved(dark))?;
    serialize(&mode, "Theme serialization error")
}
