//! `EncounterSync` — deduplicates and relays encounter events.

use tracing::debug;

use crate::bus::EncounterBus;
use crate::event::{EncounterDraft, EncounterEvent, EncounterSource, EventId};

/// What the caller must do in response to a polled event.
#[derive(Clone, PartialEq, Debug)]
pub enum SyncAction {
    /// A foreign (non-travel) encounter arrived: pause playback and open the
    /// encounter surface with this event.
    OpenEncounter(EncounterEvent),
}

/// Tracks the id of the last encounter event this session has handled.
///
/// One instance per travel session.  Travel-sourced events are marked
/// handled at publication time so the poll path only ever reacts to events
/// from *other* sources.
#[derive(Default)]
pub struct EncounterSync {
    last_handled: Option<EventId>,
}

impl EncounterSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the bus for an event newer than the last handled one.
    ///
    /// Travel-sourced events only advance `last_handled` (they were produced
    /// by this engine's own roll and already acted on).  Any other source
    /// yields a [`SyncAction::OpenEncounter`] the caller must honor by
    /// pausing playback and opening the encounter surface.
    pub fn poll(&mut self, bus: &impl EncounterBus) -> Option<SyncAction> {
        let latest = bus.peek_latest()?;
        if self.last_handled == Some(latest.id) {
            return None;
        }
        self.last_handled = Some(latest.id);

        if latest.source == EncounterSource::Travel {
            debug!(id = latest.id.0, "skipping own travel encounter");
            return None;
        }
        Some(SyncAction::OpenEncounter(latest.clone()))
    }

    /// Publish a travel-rolled encounter and mark it handled.
    ///
    /// Called by the session when the playback loop's roll triggers; the
    /// caller pauses playback itself.  Returns the published id.
    pub fn handle_travel_encounter(
        &mut self,
        bus:   &mut impl EncounterBus,
        draft: EncounterDraft,
    ) -> EventId {
        let draft = EncounterDraft {
            source: EncounterSource::Travel,
            ..draft
        };
        let id = bus.publish(draft);
        self.last_handled = Some(id);
        debug!(id = id.0, "published travel encounter");
        id
    }

    /// The id of the most recently handled event, if any.
    pub fn last_handled(&self) -> Option<EventId> {
        self.last_handled
    }
}
