//! `TravelSession` — the lifecycle facade hosts talk to.
//!
//! One session per open map.  The session owns the store, the playback
//! scheduler, the RNG, and the encounter-sync cursor; the host injects the
//! tile store, the render adapter, the lookup tables, and an abort signal.
//!
//! Every entry point is total: bad indices, stale selections, and failed
//! tile I/O degrade to no-ops or logged notices instead of panics, and
//! once the abort signal fires all mutating calls return immediately.

use hx_core::{Oddr, TravelRng};
use hx_route::{SubscriptionId, TravelPatch, TravelState, TravelStore, edit};
use hx_sync::{EncounterBus, EncounterDraft, EncounterEvent, EncounterSource, EncounterSync, EventId, SyncAction};
use tracing::info;

use crate::abort::AbortSignal;
use crate::config::TravelConfig;
use crate::notify::{FailureKind, FailureNotices};
use crate::observer::TravelObserver;
use crate::playback::{Playback, PlaybackEvent, PlaybackIo};
use crate::render::RenderAdapter;
use crate::tables::{RegionTable, TerrainTable};
use crate::tiles::{TileData, TileStore, find_token, write_token};
use crate::tween::MoveOutcome;

/// An active travel session over one map.
pub struct TravelSession<T: TileStore, A: RenderAdapter> {
    store: TravelStore,
    playback: Playback,
    tiles: T,
    adapter: A,
    terrain: TerrainTable,
    regions: RegionTable,
    rng: TravelRng,
    sync: EncounterSync,
    notices: FailureNotices,
    signal: AbortSignal,
    map_path: Option<String>,
    map_name: Option<String>,
}

impl<T: TileStore, A: RenderAdapter> TravelSession<T, A> {
    pub fn new(config: TravelConfig, tiles: T, adapter: A, signal: AbortSignal) -> Self {
        TravelSession {
            store: TravelStore::new(config.initial_state()),
            playback: Playback::new(config.min_seconds_per_tile),
            tiles,
            adapter,
            terrain: TerrainTable::new(),
            regions: RegionTable::new(),
            rng: TravelRng::new(config.seed),
            sync: EncounterSync::new(),
            notices: FailureNotices::new(),
            signal,
            map_path: None,
            map_name: None,
        }
    }

    // ── Wiring ────────────────────────────────────────────────────────────────

    /// Swap in fresh lookup snapshots when the host's datasets change.
    pub fn set_tables(&mut self, terrain: TerrainTable, regions: RegionTable) {
        self.terrain = terrain;
        self.regions = regions;
    }

    /// Identify the map this session runs on; stamped onto every
    /// encounter event the session publishes.
    pub fn set_map(&mut self, path: impl Into<String>, name: impl Into<String>) {
        self.map_path = Some(path.into());
        self.map_name = Some(name.into());
    }

    #[inline]
    pub fn state(&self) -> &TravelState {
        self.store.get()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&TravelState) + 'static) -> SubscriptionId {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.store.unsubscribe(id);
    }

    pub fn tile_store(&self) -> &T {
        &self.tiles
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Which failure kinds this session has already degraded on.
    pub fn notices(&self) -> &FailureNotices {
        &self.notices
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────────

    /// Restore the token from the persisted marker, or write the marker
    /// back when no tile carries one.
    pub fn init_token_from_tiles(&mut self) {
        if self.signal.aborted() {
            return;
        }
        let mut write_back = false;
        let token = match find_token(&self.tiles) {
            Ok(Some(coord)) => coord,
            Ok(None) => {
                write_back = true;
                self.store.get().token
            }
            Err(err) => {
                self.notices.report(FailureKind::TileLoad, &err);
                self.store.get().token
            }
        };
        info!(%token, restored = !write_back, "token initialized");
        let introduced = edit::move_token_to(&mut self.store, token);
        self.adapter.ensure_polys(&introduced);
        if let Some(center) = self.adapter.center_of(token) {
            self.adapter.place_token(center);
        }
        if write_back && let Err(err) = write_token(&mut self.tiles, token) {
            self.notices.report(FailureKind::TilePersist, &err);
        }
        self.redraw();
    }

    /// Clear the route and selection, stop playback, and re-seat the token
    /// from the persisted marker.  The travel clock keeps its value.
    pub fn reset(&mut self) {
        if self.signal.aborted() {
            return;
        }
        self.playback.pause(&mut self.store);
        self.store.set(
            TravelPatch::new()
                .route(Vec::new())
                .edit_idx(None)
                .current_tile(None),
        );
        self.init_token_from_tiles();
    }

    /// Flush the token marker.  Safe to call repeatedly; the usual last
    /// call before the host drops the session.
    pub fn teardown(&mut self) {
        self.playback.pause(&mut self.store);
        self.persist_token();
    }

    // ── Route editing ─────────────────────────────────────────────────────────

    pub fn handle_hex_click(&mut self, coord: Oddr) {
        if self.signal.aborted() {
            return;
        }
        let introduced = edit::handle_hex_click(&mut self.store, coord);
        self.refresh(&introduced);
    }

    pub fn move_selected_to(&mut self, coord: Oddr) {
        if self.signal.aborted() {
            return;
        }
        let introduced = edit::move_selected_to(&mut self.store, coord);
        self.refresh(&introduced);
    }

    pub fn delete_user_at(&mut self, idx: usize) {
        if self.signal.aborted() {
            return;
        }
        let introduced = edit::delete_user_at(&mut self.store, idx);
        self.refresh(&introduced);
    }

    /// Teleport the token.  Cancels any in-flight move first; the route is
    /// rebuilt from the surviving anchors.
    pub fn move_token_to(&mut self, coord: Oddr) {
        if self.signal.aborted() {
            return;
        }
        self.playback.pause(&mut self.store);
        let introduced = edit::move_token_to(&mut self.store, coord);
        self.adapter.ensure_polys(&introduced);
        if let Some(center) = self.adapter.center_of(coord) {
            self.adapter.place_token(center);
        }
        self.persist_token();
        self.redraw();
    }

    pub fn select_dot(&mut self, idx: Option<usize>) {
        if self.signal.aborted() {
            return;
        }
        edit::select_dot(&mut self.store, idx);
        self.redraw();
    }

    pub fn set_token_speed(&mut self, v: f64) {
        if self.signal.aborted() {
            return;
        }
        edit::set_token_speed(&mut self.store, v);
    }

    pub fn set_tempo(&mut self, v: f64) {
        if self.signal.aborted() {
            return;
        }
        edit::set_tempo(&mut self.store, v);
    }

    // ── Playback ──────────────────────────────────────────────────────────────

    pub fn play(&mut self) {
        if self.signal.aborted() {
            return;
        }
        self.playback.play(&mut self.store);
    }

    pub fn pause(&mut self) -> MoveOutcome {
        self.playback.pause(&mut self.store)
    }

    /// Host frame callback: advance playback by `dt` wall seconds.
    ///
    /// Triggered encounters pause playback and are published on `bus`
    /// before this returns; everything else is relayed to `observer`.
    pub fn advance(
        &mut self,
        dt: f64,
        bus: &mut impl EncounterBus,
        observer: &mut impl TravelObserver,
    ) {
        if self.signal.aborted() {
            return;
        }
        let mut io = PlaybackIo {
            tiles: &mut self.tiles,
            adapter: &mut self.adapter,
            terrain: &self.terrain,
            regions: &self.regions,
            rng: &mut self.rng,
            notices: &mut self.notices,
            signal: &self.signal,
        };
        let events = self.playback.advance(dt, &mut self.store, &mut io);
        for event in events {
            match event {
                PlaybackEvent::TileReached(coord) => {
                    observer.on_tile_reached(coord, self.store.get().clock_hours);
                    self.redraw();
                }
                PlaybackEvent::EncounterTriggered { coord, region, odds } => {
                    self.pause();
                    observer.on_paused();
                    let draft = EncounterDraft {
                        region_name: Some(region),
                        map_path: self.map_path.clone(),
                        map_name: self.map_name.clone(),
                        odds: Some(odds),
                        travel_clock_hours: Some(self.store.get().clock_hours),
                        ..EncounterDraft::new(EncounterSource::Travel, coord)
                    };
                    self.sync.handle_travel_encounter(bus, draft);
                    observer.on_encounter_rolled(coord, odds);
                }
                PlaybackEvent::RouteFinished => {
                    observer.on_route_finished();
                }
            }
        }
    }

    // ── Encounters ────────────────────────────────────────────────────────────

    /// Check the bus for encounters published by other tools.  A returned
    /// event means playback was paused and the host must open its
    /// encounter surface with it.
    pub fn poll_encounters(&mut self, bus: &impl EncounterBus) -> Option<EncounterEvent> {
        if self.signal.aborted() {
            return None;
        }
        match self.sync.poll(bus)? {
            SyncAction::OpenEncounter(event) => {
                self.pause();
                Some(event)
            }
        }
    }

    /// Operator-initiated encounter on a specific route node.  Returns the
    /// published id, or `None` when the index is out of range.
    pub fn publish_manual_encounter(
        &mut self,
        bus: &mut impl EncounterBus,
        route_idx: usize,
    ) -> Option<EventId> {
        if self.signal.aborted() {
            return None;
        }
        let coord = self.store.get().route.get(route_idx)?.coord;
        let region_name = match self.tiles.load_tile(coord) {
            Ok(Some(data)) => data.region,
            Ok(None) => None,
            Err(err) => {
                self.notices.report(FailureKind::TileLoad, &err);
                None
            }
        };
        let draft = EncounterDraft {
            region_name,
            map_path: self.map_path.clone(),
            map_name: self.map_name.clone(),
            travel_clock_hours: Some(self.store.get().clock_hours),
            ..EncounterDraft::new(EncounterSource::Manual, coord)
        };
        Some(bus.publish(draft))
    }

    /// Persist a tile edit and repaint it with the host-supplied color.
    /// Failures degrade to a notice; the repaint is skipped on failure.
    pub fn update_tile(&mut self, coord: Oddr, data: TileData, fill: Option<&str>) {
        if self.signal.aborted() {
            return;
        }
        if let Err(err) = self.tiles.save_tile(coord, data) {
            self.notices.report(FailureKind::TilePersist, &err);
            return;
        }
        if let Some(color) = fill {
            self.adapter.ensure_polys(&[coord]);
            self.adapter.set_fill(coord, color);
        }
    }

    /// Record that the host failed to open the encounter surface.
    pub fn note_open_failure(&mut self, detail: impl std::fmt::Display) {
        self.notices.report(FailureKind::EncounterOpen, detail);
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    fn persist_token(&mut self) {
        let token = self.store.get().token;
        if let Err(err) = write_token(&mut self.tiles, token) {
            self.notices.report(FailureKind::TilePersist, &err);
        }
    }

    fn refresh(&mut self, introduced: &[Oddr]) {
        if !introduced.is_empty() {
            self.adapter.ensure_polys(introduced);
        }
        self.redraw();
    }

    fn redraw(&mut self) {
        let s = self.store.get();
        self.adapter.draw_route(&s.route, s.token, s.edit_idx);
    }
}
