//! `hx-travel` — playback, session lifecycle, and host seams.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`config`]   | `TravelConfig` — per-session knobs                         |
//! | [`session`]  | `TravelSession` — the facade hosts drive                   |
//! | [`playback`] | `Playback` — host-stepped Idle/Playing scheduler           |
//! | [`tween`]    | `TokenTween`, `MoveOutcome` — per-tile animation           |
//! | [`clock`]    | `TravelTicker` — 1 Hz in-game clock accumulation           |
//! | [`tiles`]    | `TileStore` seam, token marker helpers, in-memory store    |
//! | [`render`]   | `RenderAdapter` seam and the headless `NullAdapter`        |
//! | [`tables`]   | Immutable terrain-speed and region-odds snapshots          |
//! | [`observer`] | `TravelObserver` progress callbacks                        |
//! | [`abort`]    | `AbortHandle`/`AbortSignal` cooperative cancellation       |
//! | [`notify`]   | Once-per-kind degraded-operation notices                   |
//! | [`error`]    | `TravelError`, `TravelResult`                              |
//!
//! # Driving a session
//!
//! The host constructs a [`TravelSession`] with its tile store and render
//! adapter, seats the token with
//! [`init_token_from_tiles`](TravelSession::init_token_from_tiles), routes
//! pointer input to the editing methods, and calls
//! [`advance`](TravelSession::advance) from its frame callback while
//! playback runs.  Dropping the session after
//! [`teardown`](TravelSession::teardown) (or firing the abort handle)
//! ends it.

pub mod abort;
pub mod clock;
pub mod config;
pub mod error;
pub mod notify;
pub mod observer;
pub mod playback;
pub mod render;
pub mod session;
pub mod tables;
pub mod tiles;
pub mod tween;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use abort::{AbortHandle, AbortSignal};
pub use config::TravelConfig;
pub use error::{TravelError, TravelResult};
pub use notify::{FailureKind, FailureNotices};
pub use observer::{NoopObserver, TravelObserver};
pub use playback::{Playback, PlaybackEvent, PlaybackIo};
pub use render::{NullAdapter, RenderAdapter};
pub use session::TravelSession;
pub use tables::{RegionTable, TerrainTable};
pub use tiles::{MemoryTileStore, TileData, TileStore};
pub use tween::{MoveOutcome, TokenTween};
