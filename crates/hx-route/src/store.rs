//! `TravelStore` — the single-writer, multi-reader observable state cell.
//!
//! # Why this exists
//!
//! Route editing, playback, and the UI all read travel state, but only the
//! editing operations and the playback scheduler may write it — and always
//! through this store, one synchronous mutation at a time.  Listeners are
//! notified *after* a mutation is fully applied, so they never observe a
//! torn state.  There is exactly one store per active travel session.
//!
//! # Patch model
//!
//! [`TravelStore::set`] shallow-merges a [`TravelPatch`] — every field
//! optional, absent fields untouched — so callers update exactly the fields
//! a transition owns and nothing else.  [`TravelStore::replace`] swaps the
//! whole snapshot.

use hx_core::Oddr;

use crate::node::RouteNode;
use crate::state::TravelState;

/// Handle returned by [`TravelStore::subscribe`]; pass to
/// [`TravelStore::unsubscribe`] to detach the listener.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&TravelState)>;

/// A partial [`TravelState`] for shallow-merge updates.
///
/// Build with the fluent setters; unset fields keep their current value.
#[derive(Default)]
#[must_use]
pub struct TravelPatch {
    pub token:        Option<Oddr>,
    pub route:        Option<Vec<RouteNode>>,
    pub edit_idx:     Option<Option<usize>>,
    pub token_speed:  Option<f64>,
    pub current_tile: Option<Option<Oddr>>,
    pub playing:      Option<bool>,
    pub tempo:        Option<f64>,
    pub clock_hours:  Option<f64>,
}

impl TravelPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(mut self, v: Oddr) -> Self {
        self.token = Some(v);
        self
    }

    pub fn route(mut self, v: Vec<RouteNode>) -> Self {
        self.route = Some(v);
        self
    }

    pub fn edit_idx(mut self, v: Option<usize>) -> Self {
        self.edit_idx = Some(v);
        self
    }

    pub fn token_speed(mut self, v: f64) -> Self {
        self.token_speed = Some(v);
        self
    }

    pub fn current_tile(mut self, v: Option<Oddr>) -> Self {
        self.current_tile = Some(v);
        self
    }

    pub fn playing(mut self, v: bool) -> Self {
        self.playing = Some(v);
        self
    }

    pub fn tempo(mut self, v: f64) -> Self {
        self.tempo = Some(v);
        self
    }

    pub fn clock_hours(mut self, v: f64) -> Self {
        self.clock_hours = Some(v);
        self
    }

    fn apply(self, state: &mut TravelState) {
        if let Some(v) = self.token {
            state.token = v;
        }
        if let Some(v) = self.route {
            state.route = v;
        }
        if let Some(v) = self.edit_idx {
            state.edit_idx = v;
        }
        if let Some(v) = self.token_speed {
            state.token_speed = v;
        }
        if let Some(v) = self.current_tile {
            state.current_tile = v;
        }
        if let Some(v) = self.playing {
            state.playing = v;
        }
        if let Some(v) = self.tempo {
            state.tempo = v;
        }
        if let Some(v) = self.clock_hours {
            state.clock_hours = v;
        }
    }
}

/// The observable travel-state cell.  Single writer by construction: every
/// mutation goes through `&mut self`.
#[derive(Default)]
pub struct TravelStore {
    state:     TravelState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id:   u64,
}

impl TravelStore {
    pub fn new(initial: TravelState) -> Self {
        Self {
            state:     initial,
            listeners: Vec::new(),
            next_id:   0,
        }
    }

    /// The current snapshot.
    #[inline]
    pub fn get(&self) -> &TravelState {
        &self.state
    }

    /// Shallow-merge `patch` and notify all listeners exactly once.
    pub fn set(&mut self, patch: TravelPatch) {
        patch.apply(&mut self.state);
        self.notify();
    }

    /// Replace the entire snapshot and notify all listeners.
    pub fn replace(&mut self, next: TravelState) {
        self.state = next;
        self.notify();
    }

    /// Register `listener` and immediately invoke it with the current state.
    pub fn subscribe(&mut self, mut listener: impl FnMut(&TravelState) + 'static) -> SubscriptionId {
        listener(&self.state);
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Detach a listener.  Unknown ids are a no-op.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(sid, _)| *sid != id);
    }

    fn notify(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener(&self.state);
        }
    }
}
