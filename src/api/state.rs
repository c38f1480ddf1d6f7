//! WASM-owned application state
//!
//! The collation store, the open grid, the theme preference and the name
//! checker live here. JavaScript listeners are kept per thread since JS
//! functions cannot cross threads; the store's own subscription marks the
//! snapshot dirty and `notify_listeners` forwards it.

use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use lazy_static::lazy_static;
use wasm_bindgen::prelude::*;

use super::helpers::{js_error, serialize};
use crate::grid::AlignmentGrid;
use crate::store::{CollationStore, LocalStorage, NameCheck, ThemeStore};

lazy_static! {
    static ref STORE: Mutex<Option<CollationStore<LocalStorage>>> = Mutex::new(None);
    static ref GRID: Mutex<Option<AlignmentGrid>> = Mutex::new(None);
    static ref THEME: Mutex<Option<ThemeStore<LocalStorage>>> = Mutex::new(None);
    static ref NAME_CHECK: Mutex<NameCheck> = Mutex::new(NameCheck::new());
}

static SNAPSHOT_DIRTY: AtomicBool = AtomicBool::new(false);

thread_local! {
    static LISTENERS: RefCell<Vec<(usize, js_sys::Function)>> = RefCell::new(Vec::new());
    static NEXT_LISTENER: RefCell<usize> = RefCell::new(0);
}

fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> Result<MutexGuard<'a, T>, JsValue> {
    mutex
        .lock()
        .map_err(|_| js_error(format!("{} state is poisoned", what)))
}

fn open_store() -> CollationStore<LocalStorage> {
    let mut store = CollationStore::open(LocalStorage);
    store.subscribe(|_| SNAPSHOT_DIRTY.store(true, Ordering::SeqCst));
    store
}

/// Run `f` against the collation store, hydrating it on first use
pub fn with_store<R>(
    f: impl FnOnce(&mut CollationStore<LocalStorage>) -> Result<R, JsValue>,
) -> Result<R, JsValue> {
    let result = {
        let mut guard = lock(&STORE, "Collation store")?;
        let store = guard.get_or_insert_with(open_store);
        f(store)?
    };
    notify_listeners()?;
    Ok(result)
}

/// Drop and re-read the collation store from storage
pub fn rehydrate_store() -> Result<(), JsValue> {
    *lock(&STORE, "Collation store")? = Some(open_store());
    Ok(())
}

/// Run `f` against the open grid
pub fn with_grid<R>(f: impl FnOnce(&mut AlignmentGrid) -> Result<R, JsValue>) -> Result<R, JsValue> {
    let mut guard = lock(&GRID, "Grid")?;
    let grid = guard
        .as_mut()
        .ok_or_else(|| js_error("No collation is open for editing"))?;
    f(grid)
}

pub fn set_grid(grid: Option<AlignmentGrid>) -> Result<(), JsValue> {
    *lock(&GRID, "Grid")? = grid;
    Ok(())
}

pub fn with_theme<R>(f: impl FnOnce(&mut ThemeStore<LocalStorage>) -> R) -> Result<R, JsValue> {
    let mut guard = lock(&THEME, "Theme")?;
    let theme = guard.get_or_insert_with(|| ThemeStore::open(LocalStorage));
    Ok(f(theme))
}

pub fn with_name_check<R>(f: impl FnOnce(&mut NameCheck) -> R) -> Result<R, JsValue> {
    let mut guard = lock(&NAME_CHECK, "Name check")?;
    Ok(f(&mut guard))
}

pub fn add_listener(callback: js_sys::Function) -> usize {
    let id = NEXT_LISTENER.with(|next| {
        let mut next = next.borrow_mut();
        *next += 1;
        *next
    });
    LISTENERS.with(|listeners| listeners.borrow_mut().push((id, callback)));
    id
}

pub fn remove_listener(id: usize) {
    LISTENERS.with(|listeners| listeners.borrow_mut().retain(|(listener_id, _)| *listener_id != id));
}

/// Call every JavaScript listener with the snapshot if the store changed
fn notify_listeners() -> Result<(), JsValue> {
    if !SNAPSHOT_DIRTY.swap(false, Ordering::SeqCst) {
        return Ok(());
    }
    let snapshot = {
        let guard = lock(&STORE, "Collation store")?;
        match guard.as_ref() {
            Some(store) => serialize(&store.snapshot(), "Collections serialization error")?,
            None => return Ok(()),
        }
    };
    let callbacks: Vec<js_sys::Function> =
        LISTENERS.with(|listeners| listeners.borrow().iter().map(|(_, f)| f.clone()).collect());
    for callback in callbacks {
        callback.call1(&JsValue::NULL, &snapshot)?;
    }
    Ok(())
}
