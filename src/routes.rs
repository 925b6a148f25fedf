use crate::components::RaceInfo;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    RaceInfo,
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(route: Route) -> Html {
    match route {
        Route::RaceInfo => html! { <RaceInfo /> },
        Route::NotFound => html! { <Redirect<Route> to={Route::RaceInfo} /> },
    }
}
