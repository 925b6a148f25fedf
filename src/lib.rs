//! Live results client for the race timing server.
//!
//! Fetches flat race snapshots, links them into an object graph and keeps
//! them in a Yew store for the views in the binary.

use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod api;
pub mod config;
pub mod format;
pub mod linker;
pub mod model;
pub mod store;
pub mod viewport;

pub use format::hhmmss;
pub use linker::{link, LinkedGroup, LinkedPerson, LinkedRace, LinkedResult};
pub use model::{Course, Group, Id, Organization, Person, RaceResult, RawRace, ServerStatus};

/// Link a raw race snapshot handed over from JavaScript.
///
/// Returns the linked graph as a plain JS object, references embedded.
#[wasm_bindgen]
pub fn link_race(raw_js: JsValue) -> Result<JsValue, JsValue> {
    let raw: RawRace = serde_wasm_bindgen::from_value(raw_js)
        .map_err(|e| JsValue::from_str(&format!("Failed to deserialize race: {}", e)))?;
    let linked = link(raw);
    linked
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize race: {}", e)))
}

/// Stop the results server.
///
/// Exported from the wasm module as `shutDown`; with Trunk's default loader
/// that is `window.wasmBindings.shutDown()`.
#[wasm_bindgen(js_name = shutDown)]
pub fn shut_down() {
    api::shutdown();
}
