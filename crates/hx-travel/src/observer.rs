//! Session observer hooks.

use hx_core::Oddr;

/// Callbacks fired as playback progresses. All methods default to no-ops
/// so hosts implement only what they display.
pub trait TravelObserver {
    fn on_tile_reached(&mut self, _coord: Oddr, _clock_hours: f64) {}

    fn on_encounter_rolled(&mut self, _coord: Oddr, _odds: u32) {}

    fn on_route_finished(&mut self) {}

    fn on_paused(&mut self) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl TravelObserver for NoopObserver {}
