//! Cooperative cancellation for a session's lifetime.
//!
//! The host keeps the [`AbortHandle`] and hands the session an
//! [`AbortSignal`]. Once aborted, every mutating session entry point and
//! every playback step becomes a no-op, so late frame callbacks after
//! teardown cannot touch the store.

use std::cell::Cell;
use std::rc::Rc;

/// Host-side switch that aborts all signals cloned from it.
#[derive(Debug, Clone, Default)]
pub struct AbortHandle(Rc<Cell<bool>>);

/// Session-side view of the abort flag.
#[derive(Debug, Clone)]
pub struct AbortSignal(Rc<Cell<bool>>);

impl AbortHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signal(&self) -> AbortSignal {
        AbortSignal(Rc::clone(&self.0))
    }

    /// Flips the flag. Irreversible for this handle's signals.
    pub fn abort(&self) {
        self.0.set(true);
    }
}

impl AbortSignal {
    /// A signal that never fires, for hosts without a teardown path.
    pub fn never() -> Self {
        AbortSignal(Rc::new(Cell::new(false)))
    }

    #[inline]
    pub fn aborted(&self) -> bool {
        self.0.get()
    }
}
