//! Views of the live results page.

use crate::hooks::{use_race_poller, use_store, use_viewport_height};
use race_live::{
    api,
    config::{GROUP_LIST_OFFSET_PX, RESULTS_OFFSET_PX},
    hhmmss, Id, LinkedGroup, LinkedResult,
};
use serde_json::Value;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use yew::prelude::*;

/// Wall-clock rendering of an epoch-milliseconds timestamp.
fn format_updated_time(ms: f64) -> String {
    if ms == 0.0 {
        return String::new();
    }
    js_sys::Date::new(&JsValue::from_f64(ms))
        .to_locale_time_string("default")
        .into()
}

fn format_place(place: Option<&Value>) -> String {
    match place {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// The single routed page: group list on the left, results on the right.
#[function_component(RaceInfo)]
pub fn race_info() -> Html {
    let store = use_store();
    use_race_poller(store.clone());
    let selected = use_state(|| None::<Id>);

    let race = store.race.race();
    let groups = store.race.groups().to_vec();

    // Fall back to the first group until the user picks one.
    let current = (*selected)
        .clone()
        .filter(|id| groups.iter().any(|g| g.group.id == *id))
        .or_else(|| groups.first().map(|g| g.group.id.clone()));

    let on_select = {
        let selected = selected.clone();
        Callback::from(move |id: Id| selected.set(Some(id)))
    };

    let results = current
        .as_ref()
        .map(|id| race.results_for_group(id))
        .unwrap_or_default();

    html! {
        <div class="race-info">
            <header class="race-header">
                <h1>{ race.title() }</h1>
                <span class="updated-time">
                    { format!("Updated: {}", format_updated_time(store.race.updated_time())) }
                </span>
            </header>
            if !store.race.is_loaded() {
                <div class="no-results-message">
                    <p>{ "Waiting for race data..." }</p>
                </div>
            } else {
                <div class="race-body">
                    <GroupList groups={Rc::new(groups)} selected={current} {on_select} />
                    <ResultsTable results={Rc::new(results)} />
                </div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct GroupListProps {
    pub groups: Rc<Vec<Rc<LinkedGroup>>>,
    pub selected: Option<Id>,
    pub on_select: Callback<Id>,
}

#[function_component(GroupList)]
pub fn group_list(props: &GroupListProps) -> Html {
    let node = use_node_ref();
    use_viewport_height(node.clone(), GROUP_LIST_OFFSET_PX);

    html! {
        <ul class="group-list" ref={node}>
            { props.groups.iter().map(|g| {
                let id = g.group.id.clone();
                let active = props.selected.as_ref() == Some(&id);
                let onclick = props.on_select.reform(move |_: MouseEvent| id.clone());
                let course = g.course.as_ref().map(|c| c.name.clone()).unwrap_or_default();
                html! {
                    <li class={classes!("group-item", active.then_some("active"))} {onclick}>
                        <span class="group-name">{ &g.group.name }</span>
                        <span class="group-course">{ course }</span>
                    </li>
                }
            }).collect::<Html>() }
        </ul>
    }
}

#[derive(Properties, PartialEq)]
pub struct ResultsTableProps {
    pub results: Rc<Vec<Rc<LinkedResult>>>,
}

#[function_component(ResultsTable)]
pub fn results_table(props: &ResultsTableProps) -> Html {
    let node = use_node_ref();
    use_viewport_height(node.clone(), RESULTS_OFFSET_PX);

    if props.results.is_empty() {
        return html! {
            <div class="results" ref={node}>
                <p class="no-results-message">{ "No results to display" }</p>
            </div>
        };
    }

    html! {
        <div class="results" ref={node}>
            <table class="results-table">
                <thead>
                    <tr>
                        <th>{ "Place" }</th>
                        <th>{ "Bib" }</th>
                        <th>{ "Name" }</th>
                        <th>{ "Organization" }</th>
                        <th>{ "Result" }</th>
                    </tr>
                </thead>
                <tbody>
                    { props.results.iter().map(render_result_row).collect::<Html>() }
                </tbody>
            </table>
        </div>
    }
}

fn render_result_row(result: &Rc<LinkedResult>) -> Html {
    let person = result.person.as_ref();
    let bib = person
        .and_then(|p| p.person.bib)
        .map(|b| b.to_string())
        .unwrap_or_default();
    let name = person.map(|p| p.person.full_name()).unwrap_or_default();
    let organization = person
        .and_then(|p| p.organization.as_ref())
        .map(|o| o.name.clone())
        .unwrap_or_default();

    html! {
        <tr>
            <td>{ format_place(result.result.place.as_ref()) }</td>
            <td>{ bib }</td>
            <td>{ name }</td>
            <td>{ organization }</td>
            <td>{ hhmmss(result.result.result_msec) }</td>
        </tr>
    }
}

/// Operator controls for the results server.
#[function_component(DiagnosticsPanel)]
pub fn diagnostics_panel() -> Html {
    let store = use_store();
    let onclick = Callback::from(|_: MouseEvent| api::shutdown());

    html! {
        <footer class="diagnostics">
            if !store.app.server_alive {
                <span class="server-status offline">{ "Server is not responding" }</span>
            }
            <button class="btn-secondary small" {onclick}>{ "Shut down server" }</button>
        </footer>
    }
}
