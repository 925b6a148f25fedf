//! Application state shared by all views.
//!
//! Two independent slices: [`AppState`] (UI signals) and [`RaceState`] (the
//! linked snapshot). [`Store`] combines them behind Yew's `Reducible` so
//! components hold a [`StoreHandle`] from context and dispatch [`Action`]s.

use crate::linker::{link, LinkedGroup, LinkedRace};
use crate::model::{RawRace, ServerStatus};
use log::debug;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub is_loading: bool,
    /// Last liveness reported by the results server.
    pub server_alive: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            is_loading: true,
            server_alive: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    SetLoading(bool),
    SetServerAlive(bool),
}

impl AppState {
    pub fn apply(&mut self, action: AppAction) {
        match action {
            AppAction::SetLoading(is_loading) => self.is_loading = is_loading,
            AppAction::SetServerAlive(alive) => self.server_alive = alive,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RaceState {
    race: Option<Rc<LinkedRace>>,
    updated_time: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RaceAction {
    /// Link and store a freshly fetched snapshot, replacing the current one.
    SetRace(RawRace),
    /// Epoch milliseconds of the snapshot's last change.
    SetUpdatedTime(f64),
}

impl RaceState {
    pub fn apply(&mut self, action: RaceAction) {
        match action {
            RaceAction::SetRace(raw) => {
                let race = link(raw);
                debug!(
                    "Race replaced: {} groups, {} results",
                    race.groups.len(),
                    race.results.len()
                );
                self.race = Some(Rc::new(race));
            }
            RaceAction::SetUpdatedTime(ms) => self.updated_time = ms,
        }
    }

    /// Current snapshot; empty until the first `SetRace`.
    pub fn race(&self) -> Rc<LinkedRace> {
        self.race.clone().unwrap_or_default()
    }

    pub fn is_loaded(&self) -> bool {
        self.race.is_some()
    }

    pub fn updated_time(&self) -> f64 {
        self.updated_time
    }

    pub fn groups(&self) -> &[Rc<LinkedGroup>] {
        self.race
            .as_deref()
            .map(|race| race.groups.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    App(AppAction),
    Race(RaceAction),
}

impl From<AppAction> for Action {
    fn from(action: AppAction) -> Self {
        Action::App(action)
    }
}

impl From<RaceAction> for Action {
    fn from(action: RaceAction) -> Self {
        Action::Race(action)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    pub app: AppState,
    pub race: RaceState,
}

impl Reducible for Store {
    type Action = Action;

    /// Hands back the same `Rc` when an app action changes nothing, so
    /// repeated polls do not re-render the tree.
    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            Action::App(action) => {
                let mut app = self.app.clone();
                app.apply(action);
                if app == self.app {
                    return self;
                }
                Rc::new(Store {
                    app,
                    race: self.race.clone(),
                })
            }
            Action::Race(action) => {
                let mut race = self.race.clone();
                race.apply(action);
                Rc::new(Store {
                    app: self.app.clone(),
                    race,
                })
            }
        }
    }
}

/// Bookkeeping of the polling loop.
///
/// Remembers which server time the store already holds and turns every poll
/// outcome into the actions to dispatch, in order.
#[derive(Debug, Default)]
pub struct Poller {
    applied: Option<f64>,
}

impl Poller {
    pub fn applied(&self) -> Option<f64> {
        self.applied
    }

    /// The race is fetched only when the server reports a different time.
    pub fn needs_refresh(&self, status: &ServerStatus) -> bool {
        self.applied != Some(status.updated_time_ms())
    }

    /// Liveness from a status reply, or `None` when the server was unreachable.
    pub fn status_actions(&self, status: Option<&ServerStatus>) -> Vec<Action> {
        let alive = status.is_some_and(|s| s.is_alive);
        vec![AppAction::SetServerAlive(alive).into()]
    }

    /// Store a fetched snapshot: the race first, then its time.
    pub fn snapshot_actions(&mut self, raw: RawRace, status: &ServerStatus) -> Vec<Action> {
        let updated = status.updated_time_ms();
        self.applied = Some(updated);
        vec![
            RaceAction::SetRace(raw).into(),
            RaceAction::SetUpdatedTime(updated).into(),
        ]
    }

    /// Closes every poll cycle, whatever happened in it.
    pub fn finish_actions(&self) -> Vec<Action> {
        vec![AppAction::SetLoading(false).into()]
    }
}

/// What components receive from the store context.
pub type StoreHandle = UseReducerHandle<Store>;
