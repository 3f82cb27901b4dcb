//! `hx-route` — route state and anchor-based editing.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                      |
//! |-----------|---------------------------------------------------------------|
//! | [`node`]  | `RouteNode`, `NodeKind` — user anchors vs. derived fillers    |
//! | [`state`] | `TravelState` — the single source of truth for a session      |
//! | [`store`] | `TravelStore` — single-writer observable cell + `TravelPatch` |
//! | [`edit`]  | Expansion and structural editing of the route                 |
//!
//! # Route model
//!
//! A route is an ordered list of nodes.  `User` nodes are anchors placed by
//! the operator; `Auto` nodes are derived, filling the straight hex line
//! between consecutive anchors (or between the token and the first anchor).
//! Every editing operation re-derives exactly the `Auto` runs it invalidated
//! and leaves all other anchors untouched, so the invariant
//!
//! > every `User` node is reachable from the previous anchor (or the token)
//! > through a contiguous run of line-algorithm `Auto` nodes
//!
//! holds after any sequence of edits.

pub mod edit;
pub mod node;
pub mod state;
pub mod store;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use node::{NodeKind, RouteNode};
pub use state::TravelState;
pub use store::{SubscriptionId, TravelPatch, TravelStore};
