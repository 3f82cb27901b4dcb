//! Deduplicated failure reporting.
//!
//! Degraded operation (a tile that will not load, a marker that will not
//! persist) is logged once per failure kind per session instead of on
//! every frame.

use std::fmt::Display;

use rustc_hash::FxHashSet;
use tracing::{debug, warn};

/// Categories of host-side failure the engine survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// A tile could not be read; terrain falls back to the default speed.
    TileLoad,
    /// The token marker could not be written back.
    TilePersist,
    /// The host could not open the encounter surface.
    EncounterOpen,
}

impl FailureKind {
    fn describe(self) -> &'static str {
        match self {
            FailureKind::TileLoad => "tile read failed, using default terrain speed",
            FailureKind::TilePersist => "token position could not be persisted",
            FailureKind::EncounterOpen => "encounter surface could not be opened",
        }
    }
}

/// Per-session record of which failure kinds were already surfaced.
#[derive(Debug, Default)]
pub struct FailureNotices {
    seen: FxHashSet<FailureKind>,
}

impl FailureNotices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs at warn level the first time a kind is seen, debug afterwards.
    pub fn report(&mut self, kind: FailureKind, detail: impl Display) {
        if self.seen.insert(kind) {
            warn!(?kind, %detail, "{}", kind.describe());
        } else {
            debug!(?kind, %detail, "repeat failure");
        }
    }

    pub fn reported(&self, kind: FailureKind) -> bool {
        self.seen.contains(&kind)
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }
}
