//! Travel clock bookkeeping.

/// Accumulates frame deltas into whole 1 Hz ticks.
///
/// Each tick advances the in-game clock by the current tempo in hours, so
/// the clock keeps wall-time pacing no matter how irregular the host's
/// frame callbacks are.
#[derive(Debug, Clone, Copy, Default)]
pub struct TravelTicker {
    accum_secs: f64,
}

impl TravelTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops any partial second, e.g. when playback pauses.
    pub fn reset(&mut self) {
        self.accum_secs = 0.0;
    }

    /// Feeds `dt` wall seconds and returns how many whole ticks elapsed.
    pub fn advance(&mut self, dt: f64) -> u32 {
        self.accum_secs += dt.max(0.0);
        let ticks = self.accum_secs.floor();
        self.accum_secs -= ticks;
        ticks as u32
    }
}

/// True when the clock passed a whole-hour boundary between two readings.
#[inline]
pub fn crossed_hour(before: f64, after: f64) -> bool {
    after.floor() > before.floor()
}
