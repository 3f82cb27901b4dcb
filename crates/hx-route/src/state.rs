//! The travel state snapshot.

use hx_core::Oddr;

use crate::node::RouteNode;

/// Bounds for the playback tempo multiplier.
pub const TEMPO_MIN: f64 = 0.1;
pub const TEMPO_MAX: f64 = 10.0;

/// The single mutable record describing one travel session.
///
/// Replaced wholesale on every transition (copy-on-write through
/// [`TravelStore`][crate::TravelStore]); consumers only ever observe complete
/// snapshots, never partial mutation.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravelState {
    /// Current token position.
    pub token: Oddr,

    /// The expanded route, head first.  Playback consumes from the front.
    pub route: Vec<RouteNode>,

    /// Index of the node currently selected for editing, if any.
    pub edit_idx: Option<usize>,

    /// Travel speed in tiles of distance per hour.  Always `> 0`.
    pub token_speed: f64,

    /// The tile the token last arrived at during playback.
    pub current_tile: Option<Oddr>,

    /// Whether a playback loop is active.
    pub playing: bool,

    /// Playback tempo multiplier, clamped to `[0.1, 10]`.
    pub tempo: f64,

    /// In-world clock, hours elapsed since the session started.
    pub clock_hours: f64,
}

impl Default for TravelState {
    fn default() -> Self {
        Self {
            token:        Oddr::new(0, 0),
            route:        Vec::new(),
            edit_idx:     None,
            token_speed:  1.0,
            current_tile: None,
            playing:      false,
            tempo:        1.0,
            clock_hours:  0.0,
        }
    }
}

impl TravelState {
    /// Ordered positions of all `User` anchors in the route.
    pub fn user_indices(&self) -> Vec<usize> {
        self.route
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_user())
            .map(|(i, _)| i)
            .collect()
    }

    /// The last anchor coordinate, or `None` for an anchor-free route.
    pub fn last_anchor(&self) -> Option<Oddr> {
        self.route.iter().rev().find(|n| n.is_user()).map(|n| n.coord)
    }

    /// Clamp a tempo value into the legal range; non-finite input maps to 1.
    pub fn clamp_tempo(v: f64) -> f64 {
        if v.is_finite() { v.clamp(TEMPO_MIN, TEMPO_MAX) } else { 1.0 }
    }

    /// Sanitize a token speed; non-finite or non-positive input maps to 1.
    pub fn clamp_speed(v: f64) -> f64 {
        if v.is_finite() && v > 0.0 { v } else { 1.0 }
    }
}
