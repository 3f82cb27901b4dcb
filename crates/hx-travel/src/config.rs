//! Session configuration.

use hx_route::TravelState;

/// Tunable knobs for a travel session.
///
/// | Field | Meaning |
/// |---|---|
/// | `min_seconds_per_tile` | Floor on per-tile animation duration, in wall seconds. |
/// | `default_token_speed` | Party speed (mph) used until the host sets one. |
/// | `seed` | Seed for the encounter-roll RNG. |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelConfig {
    pub min_seconds_per_tile: f64,
    pub default_token_speed: f64,
    pub seed: u64,
}

impl Default for TravelConfig {
    fn default() -> Self {
        TravelConfig {
            min_seconds_per_tile: 0.05,
            default_token_speed: 1.0,
            seed: 0xD20,
        }
    }
}

impl TravelConfig {
    /// The state a fresh session starts from.
    pub fn initial_state(&self) -> TravelState {
        TravelState {
            token_speed: TravelState::clamp_speed(self.default_token_speed),
            ..TravelState::default()
        }
    }
}
