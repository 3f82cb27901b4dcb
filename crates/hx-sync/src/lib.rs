//! `hx-sync` — encounter events and their synchronisation.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                   |
//! |-----------|------------------------------------------------------------|
//! | [`event`] | `EventId`, `EncounterSource`, `EncounterEvent` + draft     |
//! | [`bus`]   | `EncounterBus` trait, `LocalBus` in-memory implementation  |
//! | [`sync`]  | `EncounterSync` — dedup + relay between travel and surface |
//!
//! # Flow
//!
//! The playback scheduler's own rolls go through
//! [`EncounterSync::handle_travel_encounter`], which publishes a
//! travel-sourced event and marks its id handled so the poll path never
//! re-processes it.  Events from any *other* source (manual triggers,
//! other tools sharing the bus) are picked up by [`EncounterSync::poll`],
//! which asks the caller to pause playback and open the encounter surface.

pub mod bus;
pub mod event;
pub mod sync;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use bus::{EncounterBus, LocalBus};
pub use event::{EncounterDraft, EncounterEvent, EncounterSource, EventId};
pub use sync::{EncounterSync, SyncAction};
