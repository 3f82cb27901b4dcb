//! The encounter event bus.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::event::{EncounterDraft, EncounterEvent, EventId};

/// A broadcast channel for encounter events, shared between the travel
/// engine and whatever else wants to raise or observe encounters.
///
/// The bus owns id assignment: [`publish`][Self::publish] takes a draft,
/// stamps it with a fresh `EventId` and a timestamp, and returns the id.
/// Consumers poll [`peek_latest`][Self::peek_latest] and deduplicate by id.
pub trait EncounterBus {
    /// Stamp and record `draft`; returns the assigned id.
    fn publish(&mut self, draft: EncounterDraft) -> EventId;

    /// The most recently published event, if any.
    fn peek_latest(&self) -> Option<&EncounterEvent>;
}

/// How many past events [`LocalBus`] retains for late readers.
const HISTORY_LIMIT: usize = 64;

/// In-memory single-process bus with a bounded history.
#[derive(Default)]
pub struct LocalBus {
    events:  Vec<EncounterEvent>,
    next_id: u64,
}

impl LocalBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// All retained events, oldest first.
    pub fn history(&self) -> &[EncounterEvent] {
        &self.events
    }
}

impl EncounterBus for LocalBus {
    fn publish(&mut self, draft: EncounterDraft) -> EventId {
        let id = EventId(self.next_id);
        self.next_id += 1;

        let triggered_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);

        self.events.push(EncounterEvent {
            id,
            source: draft.source,
            triggered_at,
            coord: draft.coord,
            region_name: draft.region_name,
            map_path: draft.map_path,
            map_name: draft.map_name,
            odds: draft.odds,
            travel_clock_hours: draft.travel_clock_hours,
        });
        if self.events.len() > HISTORY_LIMIT {
            self.events.remove(0);
        }
        id
    }

    fn peek_latest(&self) -> Option<&EncounterEvent> {
        self.events.last()
    }
}
