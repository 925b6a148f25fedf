//! Keeps an element as tall as the browser viewport minus a fixed offset.

use log::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

const RESIZE_EVENT: &str = "resize";

/// Height in pixels an element should get for the given viewport.
pub fn synced_height(viewport_height: f64, offset: f64) -> f64 {
    viewport_height - offset
}

/// One attachment of the resize behavior to one element.
///
/// Owns its own listener closure; dropping the value unregisters exactly
/// that listener and leaves other attachments alone.
pub struct ViewportSync {
    listener: Closure<dyn FnMut()>,
}

impl ViewportSync {
    pub fn attach(element: HtmlElement, offset: f64) -> Result<Self, JsValue> {
        element.style().set_property("overflow", "auto")?;
        sync(&element, offset);

        let listener = Closure::<dyn FnMut()>::new(move || sync(&element, offset));
        gloo_utils::window()
            .add_event_listener_with_callback(RESIZE_EVENT, listener.as_ref().unchecked_ref())?;

        Ok(Self { listener })
    }
}

impl Drop for ViewportSync {
    fn drop(&mut self) {
        if let Err(e) = gloo_utils::window().remove_event_listener_with_callback(
            RESIZE_EVENT,
            self.listener.as_ref().unchecked_ref(),
        ) {
            warn!("Failed to remove resize listener: {:?}", e);
        }
    }
}

fn sync(element: &HtmlElement, offset: f64) {
    let viewport_height = gloo_utils::window()
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0);
    let height = format!("{}px", synced_height(viewport_height, offset));
    if let Err(e) = element.style().set_property("height", &height) {
        warn!("Failed to set element height: {:?}", e);
    }
}
