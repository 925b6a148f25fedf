//! Live results page: store, router and shell.

use race_live::{
    config::LOG_LEVEL,
    store::{AppAction, Store, StoreHandle},
};
use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod hooks;
mod routes;

use components::DiagnosticsPanel;
use hooks::use_store;
use routes::{switch, Route};

/// Page frame around the routed view.
///
/// Raises the loading flag whenever the route changes; the routed view
/// clears it once its data load has finished.
#[function_component(Shell)]
fn shell() -> Html {
    let store = use_store();
    let route = use_route::<Route>();

    {
        let store = store.clone();
        use_effect_with(route, move |_| {
            store.dispatch(AppAction::SetLoading(true).into());
            || ()
        });
    }

    html! {
        <div class="app">
            if store.app.is_loading {
                <div class="loading-indicator">{ "Loading..." }</div>
            }
            <main>
                <Switch<Route> render={switch} />
            </main>
            <DiagnosticsPanel />
        </div>
    }
}

/// App wrapper providing the store context and the router.
#[function_component]
pub fn App() -> Html {
    let store = use_reducer(Store::default);

    html! {
        <ContextProvider<StoreHandle> context={store}>
            <HashRouter>
                <Shell />
            </HashRouter>
        </ContextProvider<StoreHandle>>
    }
}

/// Entry point: installs logging and renders the App component.
fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(LOG_LEVEL) {
        web_sys::console::warn_1(&format!("Logger not installed: {}", e).into());
    }
    yew::Renderer::<App>::new().render();
}
