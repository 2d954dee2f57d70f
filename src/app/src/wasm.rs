//! WebAssembly bindings for the page.
//!
//! The page script forwards user actions and effect results through these
//! functions and executes the returned effect requests (fetch, timers, upload,
//! reload/alert). All payloads are bincode encoded.

use lazy_static::lazy_static;
use wasm_bindgen::prelude::wasm_bindgen;

use crux_core::{bridge::Bridge, Core};

use crate::App;

lazy_static! {
    static ref CORE: Bridge<App> = Bridge::new(Core::new());
}

/// Runs once when the module is instantiated
#[wasm_bindgen(start)]
pub fn init_wasm() {
    // A second instantiation in the same page keeps the first logger
    if console_log::init_with_level(log::Level::Debug).is_err() {
        log::warn!("logger already initialised");
    }
}

/// Process an event from the page and return the requested effects
#[wasm_bindgen]
pub fn process_event(event_bytes: &[u8]) -> Result<Vec<u8>, String> {
    let mut effects = Vec::new();
    CORE.update(event_bytes, &mut effects)
        .map_err(|e| format!("failed to process event: {e}"))?;
    Ok(effects)
}

/// Current view model
#[wasm_bindgen]
pub fn view() -> Result<Vec<u8>, String> {
    let mut view = Vec::new();
    CORE.view(&mut view)
        .map_err(|e| format!("failed to serialize view model: {e}"))?;
    Ok(view)
}

/// Resolve the effect `id` (timer fired, HTTP response, upload result) and
/// return the effects that follow from it
#[wasm_bindgen]
pub fn handle_response(id: u32, response_bytes: &[u8]) -> Result<Vec<u8>, String> {
    let mut effects = Vec::new();
    CORE.resolve(
        crux_core::bridge::EffectId(id),
        response_bytes,
        &mut effects,
    )
    .map_err(|e| format!("failed to resolve effect {id}: {e}"))?;
    Ok(effects)
}
