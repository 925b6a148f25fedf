use gloo_timers::callback::Interval;
use log::{error, warn};
use race_live::{
    api,
    config::POLL_INTERVAL_MS,
    store::{Action, Poller, StoreHandle},
    viewport::ViewportSync,
};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::HtmlElement;
use yew::prelude::*;

/// The store provided by `App`.
#[hook]
pub fn use_store() -> StoreHandle {
    use_context::<StoreHandle>().expect("store context is provided by App")
}

/// Keep the element behind `node` as tall as the viewport minus `offset`.
///
/// Each call owns its own resize listener, removed on unmount.
#[hook]
pub fn use_viewport_height(node: NodeRef, offset: f64) {
    use_effect_with(offset, move |&offset| {
        let sync = node.cast::<HtmlElement>().and_then(|element| {
            ViewportSync::attach(element, offset)
                .map_err(|e| warn!("Viewport sync not attached: {:?}", e))
                .ok()
        });
        move || drop(sync)
    });
}

/// Poll the server for changes and load the race when it reports one.
///
/// Polls once on mount, then every `POLL_INTERVAL_MS` until unmount.
#[hook]
pub fn use_race_poller(store: StoreHandle) {
    let poller = use_mut_ref(Poller::default);

    use_effect_with((), move |_| {
        let tick = move || {
            let store = store.clone();
            let poller = poller.clone();
            wasm_bindgen_futures::spawn_local(refresh(store, poller));
        };
        tick();
        let interval = Interval::new(POLL_INTERVAL_MS, tick);
        move || drop(interval)
    });
}

fn dispatch_all(store: &StoreHandle, actions: Vec<Action>) {
    for action in actions {
        store.dispatch(action);
    }
}

async fn refresh(store: StoreHandle, poller: Rc<RefCell<Poller>>) {
    poll_once(&store, &poller).await;
    dispatch_all(&store, poller.borrow().finish_actions());
}

async fn poll_once(store: &StoreHandle, poller: &RefCell<Poller>) {
    let status = match api::fetch_status().await {
        Ok(status) => status,
        Err(e) => {
            warn!("Status poll failed: {}", e);
            dispatch_all(store, poller.borrow().status_actions(None));
            return;
        }
    };
    dispatch_all(store, poller.borrow().status_actions(Some(&status)));

    if !poller.borrow().needs_refresh(&status) {
        return;
    }

    match api::fetch_race().await {
        Ok(raw) => {
            let actions = poller.borrow_mut().snapshot_actions(raw, &status);
            dispatch_all(store, actions);
        }
        Err(e) => error!("Failed to load race: {}", e),
    }
}
