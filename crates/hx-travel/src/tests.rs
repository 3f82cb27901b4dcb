use hx_core::Oddr;
use hx_route::NodeKind;
use hx_sync::{EncounterBus, EncounterDraft, EncounterSource, LocalBus};

use crate::abort::{AbortHandle, AbortSignal};
use crate::config::TravelConfig;
use crate::error::{TravelError, TravelResult};
use crate::observer::TravelObserver;
use crate::render::{NullAdapter, RenderAdapter};
use crate::session::TravelSession;
use crate::tiles::{MemoryTileStore, TileData, TileStore, find_token, write_token};
use crate::tween::MoveOutcome;

fn rc(r: i32, c: i32) -> Oddr {
    Oddr { r, c }
}

type MemSession = TravelSession<MemoryTileStore, NullAdapter>;

fn mem_session(tiles: MemoryTileStore) -> MemSession {
    TravelSession::new(
        TravelConfig::default(),
        tiles,
        NullAdapter::default(),
        AbortSignal::never(),
    )
}

fn session_with_route(anchors: &[(i32, i32)]) -> MemSession {
    let mut session = mem_session(MemoryTileStore::new());
    for &(r, c) in anchors {
        session.handle_hex_click(rc(r, c));
    }
    session
}

#[derive(Default)]
struct Recorder {
    tiles: Vec<Oddr>,
    encounters: Vec<(Oddr, u32)>,
    finished: bool,
    paused: u32,
}

impl TravelObserver for Recorder {
    fn on_tile_reached(&mut self, coord: Oddr, _clock_hours: f64) {
        self.tiles.push(coord);
    }

    fn on_encounter_rolled(&mut self, coord: Oddr, odds: u32) {
        self.encounters.push((coord, odds));
    }

    fn on_route_finished(&mut self) {
        self.finished = true;
    }

    fn on_paused(&mut self) {
        self.paused += 1;
    }
}

fn run_until_idle<T: TileStore, A: RenderAdapter>(
    session: &mut TravelSession<T, A>,
    bus: &mut LocalBus,
    observer: &mut Recorder,
) {
    for _ in 0..100_000 {
        if !session.state().playing {
            return;
        }
        session.advance(0.05, bus, observer);
    }
    panic!("playback never went idle");
}

mod formula {
    use crate::playback::{hours_per_tile, seconds_for_tile};

    #[test]
    fn doubling_speed_halves_hours() {
        assert_eq!(hours_per_tile(2.0, 1.0), hours_per_tile(1.0, 1.0) / 2.0);
    }

    #[test]
    fn speed_is_floored() {
        assert_eq!(hours_per_tile(0.05, 1.0), hours_per_tile(0.1, 1.0));
        assert_eq!(hours_per_tile(0.0, 1.0), 30.0);
    }

    #[test]
    fn terrain_scales_hours() {
        assert_eq!(hours_per_tile(1.0, 2.0), 6.0);
        assert_eq!(hours_per_tile(1.0, 0.5), 1.5);
    }

    #[test]
    fn doubling_tempo_halves_seconds() {
        assert_eq!(seconds_for_tile(3.0, 1.0, 0.05), 3.0);
        assert_eq!(seconds_for_tile(3.0, 2.0, 0.05), 1.5);
    }

    #[test]
    fn seconds_floor_wins_for_fast_routes() {
        assert_eq!(seconds_for_tile(0.01, 10.0, 0.05), 0.05);
    }
}

mod tween {
    use hx_core::PixelPoint;

    use super::rc;
    use crate::tween::TokenTween;

    fn px(x: f64, y: f64) -> PixelPoint {
        PixelPoint { x, y }
    }

    #[test]
    fn interpolates_linearly() {
        let mut t = TokenTween::new(px(0.0, 0.0), px(10.0, 20.0), rc(0, 1), 2.0);
        let mid = t.advance(1.0);
        assert!((mid.x - 5.0).abs() < 1e-12);
        assert!((mid.y - 10.0).abs() < 1e-12);
        assert!(!t.finished());
    }

    #[test]
    fn clamps_at_destination() {
        let mut t = TokenTween::new(px(0.0, 0.0), px(10.0, 0.0), rc(0, 1), 1.0);
        let end = t.advance(5.0);
        assert!(t.finished());
        assert_eq!(end.x, 10.0);
        assert_eq!(t.advance(1.0).x, 10.0);
    }

    #[test]
    fn zero_duration_is_instant() {
        let mut t = TokenTween::new(px(0.0, 0.0), px(4.0, 0.0), rc(0, 1), 0.0);
        assert!(t.finished());
        assert_eq!(t.position().x, 4.0);
        assert_eq!(t.advance(0.0).x, 4.0);
    }
}

mod ticker {
    use crate::clock::{TravelTicker, crossed_hour};

    #[test]
    fn accumulates_fractional_frames() {
        let mut t = TravelTicker::new();
        assert_eq!(t.advance(0.4), 0);
        assert_eq!(t.advance(0.4), 0);
        assert_eq!(t.advance(0.4), 1);
        assert_eq!(t.advance(0.8), 1);
    }

    #[test]
    fn large_delta_yields_multiple_ticks() {
        let mut t = TravelTicker::new();
        assert_eq!(t.advance(3.5), 3);
        assert_eq!(t.advance(0.5), 1);
    }

    #[test]
    fn reset_drops_partial_second() {
        let mut t = TravelTicker::new();
        t.advance(0.9);
        t.reset();
        assert_eq!(t.advance(0.9), 0);
    }

    #[test]
    fn hour_crossing() {
        assert!(!crossed_hour(0.5, 0.9));
        assert!(crossed_hour(0.9, 1.0));
        assert!(crossed_hour(1.2, 3.4));
        assert!(!crossed_hour(2.0, 2.99));
    }
}

mod tables {
    use crate::tables::{RegionTable, TerrainTable};

    #[test]
    fn unknown_terrain_defaults_to_one() {
        let t: TerrainTable = [("Forest".to_string(), 2.0)].into_iter().collect();
        assert_eq!(t.multiplier("Forest"), 2.0);
        assert_eq!(t.multiplier("Swamp"), 1.0);
        assert_eq!(t.multiplier(""), 1.0);
    }

    #[test]
    fn bad_multipliers_default_to_one() {
        let t: TerrainTable = [
            ("Zero".to_string(), 0.0),
            ("Neg".to_string(), -2.0),
            ("Nan".to_string(), f64::NAN),
        ]
        .into_iter()
        .collect();
        assert_eq!(t.multiplier("Zero"), 1.0);
        assert_eq!(t.multiplier("Neg"), 1.0);
        assert_eq!(t.multiplier("Nan"), 1.0);
    }

    #[test]
    fn zero_odds_never_roll() {
        let r: RegionTable = [("Wilds".to_string(), 6), ("Safe".to_string(), 0)]
            .into_iter()
            .collect();
        assert_eq!(r.odds("Wilds"), Some(6));
        assert_eq!(r.odds("Safe"), None);
        assert_eq!(r.odds("Elsewhere"), None);
    }
}

mod tiles {
    use super::*;

    #[test]
    fn write_token_moves_the_marker() {
        let mut tiles = MemoryTileStore::new();
        tiles.insert(
            rc(0, 0),
            TileData {
                token: true,
                ..TileData::with_terrain("Plains")
            },
        );
        tiles.insert(rc(1, 1), TileData::with_terrain("Hills"));

        write_token(&mut tiles, rc(1, 1)).unwrap();
        assert_eq!(find_token(&tiles).unwrap(), Some(rc(1, 1)));
        assert!(!tiles.load_tile(rc(0, 0)).unwrap().unwrap().token);
    }

    #[test]
    fn write_token_creates_missing_tiles() {
        let mut tiles = MemoryTileStore::new();
        write_token(&mut tiles, rc(3, 4)).unwrap();
        let data = tiles.load_tile(rc(3, 4)).unwrap().unwrap();
        assert!(data.token);
        assert_eq!(data.terrain, "");
    }

    #[test]
    fn update_tile_persists_the_edit() {
        let mut session = mem_session(MemoryTileStore::new());
        session.update_tile(rc(1, 2), TileData::with_terrain("Swamp"), Some("#4a6"));
        let data = session.tile_store().load_tile(rc(1, 2)).unwrap().unwrap();
        assert_eq!(data.terrain, "Swamp");
    }

    #[test]
    fn find_token_scans_listing_order() {
        let mut tiles = MemoryTileStore::new();
        let marked = TileData {
            token: true,
            ..TileData::default()
        };
        tiles.insert(rc(2, 0), marked.clone());
        tiles.insert(rc(0, 5), marked);
        // row-major listing puts (0,5) first
        assert_eq!(find_token(&tiles).unwrap(), Some(rc(0, 5)));
    }
}

mod playback_flow {
    use super::*;

    #[test]
    fn play_with_empty_route_is_noop() {
        let mut session = session_with_route(&[]);
        session.play();
        assert!(!session.state().playing);
    }

    #[test]
    fn token_walks_the_route_and_persists() {
        let mut session = session_with_route(&[(0, 1), (0, 2)]);
        let mut bus = LocalBus::new();
        let mut obs = Recorder::default();

        session.play();
        assert!(session.state().playing);
        run_until_idle(&mut session, &mut bus, &mut obs);

        let s = session.state();
        assert_eq!(s.token, rc(0, 2));
        assert_eq!(s.current_tile, Some(rc(0, 2)));
        assert!(s.route.is_empty());
        assert!(obs.finished);
        assert_eq!(obs.tiles, vec![rc(0, 1), rc(0, 2)]);
        assert_eq!(find_token(session.tile_store()).unwrap(), Some(rc(0, 2)));
    }

    #[test]
    fn play_twice_consumes_each_tile_once() {
        let mut session = session_with_route(&[(0, 1), (0, 2)]);
        let mut bus = LocalBus::new();
        let mut obs = Recorder::default();

        session.play();
        session.play();
        run_until_idle(&mut session, &mut bus, &mut obs);

        assert_eq!(obs.tiles, vec![rc(0, 1), rc(0, 2)]);
        assert!(session.state().route.is_empty());
    }

    #[test]
    fn pause_mid_move_keeps_the_node() {
        // anchor three tiles out, so the route is [auto, auto, user]
        let mut session = session_with_route(&[(0, 3)]);
        let mut bus = LocalBus::new();
        let mut obs = Recorder::default();

        session.play();
        session.advance(0.05, &mut bus, &mut obs);
        assert_eq!(session.pause(), MoveOutcome::Cancelled);

        let s = session.state();
        assert!(!s.playing);
        assert_eq!(s.token, rc(0, 0));
        assert_eq!(s.route.len(), 3);
    }

    #[test]
    fn pause_while_idle_reports_moved() {
        let mut session = session_with_route(&[(0, 1)]);
        assert_eq!(session.pause(), MoveOutcome::Moved);
    }

    #[test]
    fn moving_the_token_cancels_playback() {
        let mut session = session_with_route(&[(0, 3)]);
        let mut bus = LocalBus::new();
        let mut obs = Recorder::default();

        session.play();
        session.advance(0.05, &mut bus, &mut obs);
        session.move_token_to(rc(2, 2));

        let s = session.state();
        assert!(!s.playing);
        assert_eq!(s.token, rc(2, 2));
        // route rebuilt from the surviving anchor
        assert_eq!(s.route.last().map(|n| (n.coord, n.kind)), Some((rc(0, 3), NodeKind::User)));
        assert_eq!(s.route.len(), 2);
    }

    #[test]
    fn clock_advances_by_tempo_per_second() {
        let mut session = session_with_route(&[(0, 5)]);
        let mut bus = LocalBus::new();
        let mut obs = Recorder::default();

        session.set_tempo(2.0);
        session.play();
        session.advance(1.0, &mut bus, &mut obs);
        assert_eq!(session.state().clock_hours, 2.0);
    }

    #[test]
    fn selection_shifts_as_tiles_are_consumed() {
        let mut session = session_with_route(&[(0, 2), (0, 4)]);
        // select the far anchor, index 3 of [auto, user, auto, user]
        session.select_dot(Some(3));
        let mut bus = LocalBus::new();
        let mut obs = Recorder::default();

        session.play();
        while obs.tiles.is_empty() {
            session.advance(0.05, &mut bus, &mut obs);
        }
        assert_eq!(obs.tiles, vec![rc(0, 1)]);
        assert_eq!(session.state().edit_idx, Some(2));

        run_until_idle(&mut session, &mut bus, &mut obs);
        // everything consumed, selection gone with it
        assert_eq!(session.state().edit_idx, None);
    }

    #[test]
    fn abort_freezes_the_session() {
        let handle = AbortHandle::new();
        let mut session = TravelSession::new(
            TravelConfig::default(),
            MemoryTileStore::new(),
            NullAdapter::default(),
            handle.signal(),
        );
        session.handle_hex_click(rc(0, 2));
        session.play();
        handle.abort();

        let mut bus = LocalBus::new();
        let mut obs = Recorder::default();
        session.advance(5.0, &mut bus, &mut obs);
        session.handle_hex_click(rc(3, 3));

        let s = session.state();
        assert_eq!(s.clock_hours, 0.0);
        assert_eq!(s.token, rc(0, 0));
        assert_eq!(s.route.len(), 2);
        assert!(obs.tiles.is_empty());
    }

    #[test]
    fn reset_clears_route_but_keeps_clock() {
        let mut session = session_with_route(&[(0, 1)]);
        let mut bus = LocalBus::new();
        let mut obs = Recorder::default();
        session.play();
        run_until_idle(&mut session, &mut bus, &mut obs);
        let hours = session.state().clock_hours;
        assert!(hours > 0.0);

        session.handle_hex_click(rc(2, 2));
        session.select_dot(Some(0));
        session.reset();

        let s = session.state();
        assert!(s.route.is_empty());
        assert_eq!(s.edit_idx, None);
        assert!(!s.playing);
        assert_eq!(s.clock_hours, hours);
        // reset re-seats from the persisted marker
        assert_eq!(s.token, rc(0, 1));
    }
}

mod degraded {
    use super::*;
    use crate::notify::FailureKind;

    /// Tile backend where every call fails.
    struct FailingTiles;

    impl TileStore for FailingTiles {
        fn load_tile(&self, coord: Oddr) -> TravelResult<Option<TileData>> {
            Err(TravelError::tile_io(coord, "read refused"))
        }

        fn save_tile(&mut self, coord: Oddr, _data: TileData) -> TravelResult<()> {
            Err(TravelError::tile_io(coord, "write refused"))
        }

        fn delete_tile(&mut self, coord: Oddr) -> TravelResult<()> {
            Err(TravelError::tile_io(coord, "delete refused"))
        }

        fn list_tiles(&self) -> TravelResult<Vec<(Oddr, TileData)>> {
            Err(TravelError::tile_io(Oddr { r: 0, c: 0 }, "list refused"))
        }
    }

    /// Adapter that has drawn nothing.
    struct BlindAdapter;

    impl RenderAdapter for BlindAdapter {
        fn ensure_polys(&mut self, _coords: &[Oddr]) {}

        fn center_of(&self, _coord: Oddr) -> Option<hx_core::PixelPoint> {
            None
        }

        fn set_fill(&mut self, _coord: Oddr, _color: &str) {}

        fn place_token(&mut self, _pos: hx_core::PixelPoint) {}

        fn draw_route(&mut self, _route: &[hx_route::RouteNode], _token: Oddr, _edit: Option<usize>) {}
    }

    #[test]
    fn playback_survives_failing_tiles() {
        let mut session = TravelSession::new(
            TravelConfig::default(),
            FailingTiles,
            NullAdapter::default(),
            AbortSignal::never(),
        );
        session.handle_hex_click(rc(0, 1));
        let mut bus = LocalBus::new();
        let mut obs = Recorder::default();

        session.play();
        run_until_idle(&mut session, &mut bus, &mut obs);

        assert_eq!(session.state().token, rc(0, 1));
        assert!(session.notices().reported(FailureKind::TileLoad));
        assert!(session.notices().reported(FailureKind::TilePersist));
    }

    #[test]
    fn init_degrades_when_listing_fails() {
        let mut session = TravelSession::new(
            TravelConfig::default(),
            FailingTiles,
            NullAdapter::default(),
            AbortSignal::never(),
        );
        session.init_token_from_tiles();
        assert_eq!(session.state().token, rc(0, 0));
        assert!(session.notices().reported(FailureKind::TileLoad));
    }

    #[test]
    fn missing_center_stops_playback() {
        let mut session = TravelSession::new(
            TravelConfig::default(),
            MemoryTileStore::new(),
            BlindAdapter,
            AbortSignal::never(),
        );
        session.handle_hex_click(rc(0, 1));
        let mut bus = LocalBus::new();
        let mut obs = Recorder::default();

        session.play();
        session.advance(0.05, &mut bus, &mut obs);

        let s = session.state();
        assert!(!s.playing);
        assert_eq!(s.route.len(), 1);
        assert_eq!(s.token, rc(0, 0));
    }
}

mod init {
    use super::*;

    #[test]
    fn restores_token_from_marker() {
        let mut tiles = MemoryTileStore::new();
        tiles.insert(
            rc(4, 4),
            TileData {
                token: true,
                ..TileData::with_terrain("Plains")
            },
        );

        let mut session = mem_session(tiles);
        session.init_token_from_tiles();
        assert_eq!(session.state().token, rc(4, 4));
    }

    #[test]
    fn writes_marker_back_when_absent() {
        let mut tiles = MemoryTileStore::new();
        tiles.insert(rc(0, 0), TileData::with_terrain("Plains"));

        let mut session = mem_session(tiles);
        session.init_token_from_tiles();
        assert_eq!(find_token(session.tile_store()).unwrap(), Some(rc(0, 0)));
    }

    #[test]
    fn rebuilds_route_from_surviving_anchors() {
        let mut tiles = MemoryTileStore::new();
        tiles.insert(
            rc(0, 2),
            TileData {
                token: true,
                ..TileData::default()
            },
        );

        let mut session = mem_session(tiles);
        session.handle_hex_click(rc(0, 5));
        session.init_token_from_tiles();

        let s = session.state();
        assert_eq!(s.token, rc(0, 2));
        assert_eq!(s.route.last().map(|n| n.coord), Some(rc(0, 5)));
        assert_eq!(s.route.len(), 3);
    }
}

mod encounters {
    use super::*;

    fn session_in_region(odds: u32) -> MemSession {
        let mut tiles = MemoryTileStore::new();
        let mut start = TileData::with_terrain("Plains");
        start.region = Some("Wilds".to_string());
        tiles.insert(rc(0, 0), start);

        let mut session = mem_session(tiles);
        session.set_tables(
            crate::tables::TerrainTable::new(),
            [("Wilds".to_string(), odds)].into_iter().collect(),
        );
        session.set_map("maps/overworld.md", "Overworld");
        session.handle_hex_click(rc(0, 5));
        session
    }

    #[test]
    fn hour_crossing_in_a_hot_region_triggers() {
        let mut session = session_in_region(1);
        let mut bus = LocalBus::new();
        let mut obs = Recorder::default();

        session.play();
        session.advance(1.0, &mut bus, &mut obs);

        assert!(!session.state().playing);
        assert_eq!(obs.encounters, vec![(rc(0, 0), 1)]);
        assert_eq!(obs.paused, 1);

        let event = bus.peek_latest().unwrap();
        assert_eq!(event.source, EncounterSource::Travel);
        assert_eq!(event.coord, rc(0, 0));
        assert_eq!(event.region_name.as_deref(), Some("Wilds"));
        assert_eq!(event.map_path.as_deref(), Some("maps/overworld.md"));
        assert_eq!(event.map_name.as_deref(), Some("Overworld"));
        assert_eq!(event.odds, Some(1));
        assert_eq!(event.travel_clock_hours, Some(1.0));

        // our own publication never comes back through the poll path
        assert_eq!(session.poll_encounters(&bus), None);
    }

    #[test]
    fn regions_without_odds_never_trigger() {
        let mut session = session_in_region(0);
        let mut bus = LocalBus::new();
        let mut obs = Recorder::default();

        session.play();
        session.advance(1.0, &mut bus, &mut obs);

        assert!(session.state().playing);
        assert!(obs.encounters.is_empty());
        assert_eq!(session.state().clock_hours, 1.0);
    }

    #[test]
    fn foreign_events_pause_playback() {
        let mut session = session_with_route(&[(0, 5)]);
        let mut bus = LocalBus::new();
        session.play();

        bus.publish(EncounterDraft::new(
            EncounterSource::Other("inspector".to_string()),
            rc(7, 7),
        ));

        let event = session.poll_encounters(&bus).unwrap();
        assert_eq!(event.coord, rc(7, 7));
        assert!(!session.state().playing);
        assert_eq!(session.poll_encounters(&bus), None);
    }

    #[test]
    fn manual_encounters_round_trip_through_the_bus() {
        let mut session = session_in_region(6);
        let mut bus = LocalBus::new();

        let id = session.publish_manual_encounter(&mut bus, 0).unwrap();
        assert_eq!(bus.peek_latest().map(|e| e.id), Some(id));
        assert_eq!(bus.peek_latest().map(|e| e.source.clone()), Some(EncounterSource::Manual));

        // manual events open the surface like any foreign event
        let event = session.poll_encounters(&bus).unwrap();
        assert_eq!(event.id, id);
    }

    #[test]
    fn manual_encounter_rejects_bad_indices() {
        let mut session = session_with_route(&[(0, 1)]);
        let mut bus = LocalBus::new();
        assert_eq!(session.publish_manual_encounter(&mut bus, 5), None);
    }
}
