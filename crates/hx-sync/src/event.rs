//! Encounter event types.

use std::fmt;

use hx_core::Oddr;

/// Identifier of a published encounter event.
///
/// Assigned by the bus from a monotonic counter, so within one bus two
/// events never share an id — which is what the dedup-by-last-id logic in
/// [`EncounterSync`][crate::EncounterSync] relies on.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventId({})", self.0)
    }
}

/// Where an encounter event originated.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncounterSource {
    /// Rolled by the travel engine's own playback loop.
    Travel,
    /// Triggered by the operator on a specific route node.
    Manual,
    /// Published by some other tool sharing the bus.
    Other(String),
}

/// A published encounter event, as seen by every bus subscriber.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterEvent {
    pub id:                 EventId,
    pub source:             EncounterSource,
    /// Unix seconds at publication time.
    pub triggered_at:       i64,
    pub coord:              Oddr,
    pub region_name:        Option<String>,
    pub map_path:           Option<String>,
    pub map_name:           Option<String>,
    /// The 1-in-N odds that produced the roll, when known.
    pub odds:               Option<u32>,
    pub travel_clock_hours: Option<f64>,
}

/// An event minus the fields the bus assigns (`id`, `triggered_at`).
#[derive(Clone, PartialEq, Debug)]
pub struct EncounterDraft {
    pub source:             EncounterSource,
    pub coord:              Oddr,
    pub region_name:        Option<String>,
    pub map_path:           Option<String>,
    pub map_name:           Option<String>,
    pub odds:               Option<u32>,
    pub travel_clock_hours: Option<f64>,
}

impl EncounterDraft {
    /// A minimal draft; fill the optional context with the struct-update
    /// syntax.
    pub fn new(source: EncounterSource, coord: Oddr) -> Self {
        Self {
            source,
            coord,
            region_name:        None,
            map_path:           None,
            map_name:           None,
            odds:               None,
            travel_clock_hours: None,
        }
    }
}
