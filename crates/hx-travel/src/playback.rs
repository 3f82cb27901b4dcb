//! Playback scheduler.
//!
//! Host-driven stepping: the host calls [`Playback::advance`] once per
//! frame with the elapsed wall seconds, and the scheduler moves the token
//! along the route one node at a time.  Per tile it
//!
//! 1. reads the terrain of the next node and derives in-game hours,
//! 2. converts hours to a wall-clock tween duration via the tempo,
//! 3. animates the token and, on arrival, commits the new position and
//!    drains the consumed node (and any already-passed ones) from the
//!    route.
//!
//! A 1 Hz ticker advances the in-game clock by `tempo` hours per wall
//! second independently of tile boundaries; every whole-hour crossing
//! rolls once for a random encounter.

use hx_core::{Oddr, TravelRng};
use hx_route::state::TEMPO_MIN;
use hx_route::{TravelPatch, TravelStore};
use tracing::{debug, warn};

use crate::abort::AbortSignal;
use crate::clock::{TravelTicker, crossed_hour};
use crate::error::{TravelError, TravelResult};
use crate::notify::{FailureKind, FailureNotices};
use crate::render::RenderAdapter;
use crate::tables::{RegionTable, TerrainTable};
use crate::tiles::{TileStore, write_token};
use crate::tween::{MoveOutcome, TokenTween};

/// In-game hours needed to cross one tile.
#[inline]
pub fn hours_per_tile(token_speed: f64, terrain_mult: f64) -> f64 {
    (3.0 / token_speed.max(0.1)) * terrain_mult
}

/// Wall seconds for one tile at the given tempo, floored so fast routes
/// stay visible.
#[inline]
pub fn seconds_for_tile(hours: f64, tempo: f64, min_seconds: f64) -> f64 {
    (hours / tempo.max(TEMPO_MIN)).max(min_seconds)
}

/// What happened during an [`Playback::advance`] step.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    /// The token finished a tween and committed to this tile.
    TileReached(Oddr),
    /// A whole-hour crossing rolled an encounter and it came up.
    EncounterTriggered {
        coord: Oddr,
        region: String,
        odds: u32,
    },
    /// The route ran dry; playback stopped itself.
    RouteFinished,
}

/// Borrowed collaborators threaded through one playback step.
pub struct PlaybackIo<'a, T: TileStore, A: RenderAdapter> {
    pub tiles: &'a mut T,
    pub adapter: &'a mut A,
    pub terrain: &'a TerrainTable,
    pub regions: &'a RegionTable,
    pub rng: &'a mut TravelRng,
    pub notices: &'a mut FailureNotices,
    pub signal: &'a AbortSignal,
}

/// The Idle/Playing state machine driving the token.
///
/// `Playing` is exactly `store.playing == true`; the tween and ticker here
/// are derived scratch state that is dropped whenever playback leaves
/// `Playing`.
#[derive(Debug, Default)]
pub struct Playback {
    min_seconds_per_tile: f64,
    tween: Option<TokenTween>,
    ticker: TravelTicker,
}

impl Playback {
    pub fn new(min_seconds_per_tile: f64) -> Self {
        Playback {
            min_seconds_per_tile: min_seconds_per_tile.max(0.0),
            tween: None,
            ticker: TravelTicker::new(),
        }
    }

    /// Whether a tween is currently in flight.
    pub fn moving(&self) -> bool {
        self.tween.is_some()
    }

    /// Enters `Playing`.  No-op while already playing or when the route is
    /// empty.
    pub fn play(&mut self, store: &mut TravelStore) {
        let s = store.get();
        if s.playing || s.route.is_empty() {
            return;
        }
        debug!(route_len = s.route.len(), "playback started");
        self.ticker.reset();
        store.set(TravelPatch::new().playing(true));
    }

    /// Leaves `Playing`, discarding any in-flight tween.  Idempotent.
    ///
    /// Returns [`MoveOutcome::Cancelled`] when a tween was discarded
    /// mid-flight (its destination node stays on the route), otherwise
    /// [`MoveOutcome::Moved`].
    pub fn pause(&mut self, store: &mut TravelStore) -> MoveOutcome {
        let outcome = match self.tween.take() {
            Some(tween) => {
                debug!(dest = %tween.dest(), "move cancelled");
                MoveOutcome::Cancelled
            }
            None => MoveOutcome::Moved,
        };
        self.ticker.reset();
        if store.get().playing {
            store.set(TravelPatch::new().playing(false));
        }
        outcome
    }

    /// Advances playback by `dt` wall seconds.
    ///
    /// Does nothing when aborted or idle.  Events are returned in the
    /// order they occurred; an encounter trigger ends the step early so
    /// the session can pause before anything else happens.
    pub fn advance<T: TileStore, A: RenderAdapter>(
        &mut self,
        dt: f64,
        store: &mut TravelStore,
        io: &mut PlaybackIo<'_, T, A>,
    ) -> Vec<PlaybackEvent> {
        let mut events = Vec::new();
        if io.signal.aborted() || !store.get().playing {
            return events;
        }

        let ticks = self.ticker.advance(dt);
        for _ in 0..ticks {
            let (before, tempo) = {
                let s = store.get();
                (s.clock_hours, s.tempo)
            };
            let after = before + tempo;
            store.set(TravelPatch::new().clock_hours(after));
            if crossed_hour(before, after)
                && let Some(event) = self.roll_encounter(store, io)
            {
                events.push(event);
                return events;
            }
        }

        if self.tween.is_none() {
            match self.begin_next_move(store, io) {
                Ok(true) => {}
                Ok(false) => {
                    self.ticker.reset();
                    store.set(TravelPatch::new().playing(false));
                    events.push(PlaybackEvent::RouteFinished);
                    return events;
                }
                Err(err) => {
                    warn!(%err, "stopping playback");
                    self.ticker.reset();
                    store.set(TravelPatch::new().playing(false));
                    return events;
                }
            }
        }

        let mut arrived = None;
        if let Some(tween) = &mut self.tween {
            let pos = tween.advance(dt);
            io.adapter.place_token(pos);
            if tween.finished() {
                arrived = Some(tween.dest());
            }
        }
        if let Some(dest) = arrived {
            self.tween = None;
            self.commit_arrival(dest, store, io);
            events.push(PlaybackEvent::TileReached(dest));
        }
        events
    }

    /// Sets up the tween toward the head of the route.  `Ok(false)` means
    /// the route is empty.
    fn begin_next_move<T: TileStore, A: RenderAdapter>(
        &mut self,
        store: &TravelStore,
        io: &mut PlaybackIo<'_, T, A>,
    ) -> TravelResult<bool> {
        let (head, token, speed, tempo) = {
            let s = store.get();
            match s.route.first() {
                Some(node) => (node.coord, s.token, s.token_speed, s.tempo),
                None => return Ok(false),
            }
        };
        io.adapter.ensure_polys(&[head]);
        let mult = match io.tiles.load_tile(head) {
            Ok(Some(data)) => io.terrain.multiplier(&data.terrain),
            Ok(None) => 1.0,
            Err(err) => {
                io.notices.report(FailureKind::TileLoad, &err);
                1.0
            }
        };
        let hours = hours_per_tile(speed, mult);
        let secs = seconds_for_tile(hours, tempo, self.min_seconds_per_tile);
        let to = io
            .adapter
            .center_of(head)
            .ok_or(TravelError::NoRenderedCenter(head))?;
        // A token on an undrawn tile snaps straight to the destination.
        let from = io.adapter.center_of(token).unwrap_or(to);
        self.tween = Some(TokenTween::new(from, to, head, secs));
        Ok(true)
    }

    /// One encounter roll at the token's current position.
    fn roll_encounter<T: TileStore, A: RenderAdapter>(
        &mut self,
        store: &TravelStore,
        io: &mut PlaybackIo<'_, T, A>,
    ) -> Option<PlaybackEvent> {
        let pos = {
            let s = store.get();
            s.current_tile.unwrap_or(s.token)
        };
        let data = match io.tiles.load_tile(pos) {
            Ok(Some(data)) => data,
            Ok(None) => return None,
            Err(err) => {
                io.notices.report(FailureKind::TileLoad, &err);
                return None;
            }
        };
        let region = data.region?;
        let odds = io.regions.odds(&region)?;
        io.rng.roll_1_in(odds).then(|| PlaybackEvent::EncounterTriggered {
            coord: pos,
            region,
            odds,
        })
    }

    /// Commits an arrival: position, route drain, and token persistence.
    fn commit_arrival<T: TileStore, A: RenderAdapter>(
        &mut self,
        dest: Oddr,
        store: &mut TravelStore,
        io: &mut PlaybackIo<'_, T, A>,
    ) {
        let (route, edit_idx) = {
            let s = store.get();
            let mut route = s.route.clone();
            let drained = match route.iter().position(|n| n.coord == dest) {
                Some(i) => {
                    route.drain(..=i);
                    i + 1
                }
                None => 0,
            };
            // Selection shifts with the drained prefix and clears when the
            // selected node itself was consumed.
            let edit_idx = s.edit_idx.and_then(|e| e.checked_sub(drained));
            (route, edit_idx)
        };
        store.set(
            TravelPatch::new()
                .token(dest)
                .current_tile(Some(dest))
                .route(route)
                .edit_idx(edit_idx),
        );
        if let Err(err) = write_token(io.tiles, dest) {
            io.notices.report(FailureKind::TilePersist, &err);
        }
    }
}
