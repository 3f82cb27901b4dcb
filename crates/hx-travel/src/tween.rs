//! Linear token animation between two pixel centers.

use hx_core::{Oddr, PixelPoint};

/// How a token move ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The tween ran to completion and the destination was committed.
    Moved,
    /// The tween was discarded before reaching the destination.
    Cancelled,
}

/// An in-flight move toward a single route node.
#[derive(Debug, Clone)]
pub struct TokenTween {
    from: PixelPoint,
    to: PixelPoint,
    dest: Oddr,
    duration_secs: f64,
    elapsed_secs: f64,
}

impl TokenTween {
    /// Durations at or below zero snap to completion on the first advance.
    pub fn new(from: PixelPoint, to: PixelPoint, dest: Oddr, duration_secs: f64) -> Self {
        TokenTween {
            from,
            to,
            dest,
            duration_secs: duration_secs.max(0.0),
            elapsed_secs: 0.0,
        }
    }

    #[inline]
    pub fn dest(&self) -> Oddr {
        self.dest
    }

    #[inline]
    pub fn finished(&self) -> bool {
        self.elapsed_secs >= self.duration_secs
    }

    /// Fraction of the move completed, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            1.0
        } else {
            (self.elapsed_secs / self.duration_secs).min(1.0)
        }
    }

    /// Current interpolated position.
    pub fn position(&self) -> PixelPoint {
        self.from.lerp(self.to, self.progress())
    }

    /// Advances by `dt` wall seconds and returns the new position. Clamps
    /// at the destination; further calls keep returning it.
    pub fn advance(&mut self, dt: f64) -> PixelPoint {
        self.elapsed_secs = (self.elapsed_secs + dt.max(0.0)).min(self.duration_secs);
        self.position()
    }
}
