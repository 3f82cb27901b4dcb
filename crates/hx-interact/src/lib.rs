//! `hx-interact` — pointer-driven direct manipulation of the route.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`pointer`] | `ScreenPoint`, `DragTarget`, `DragCommand`               |
//! | [`hit`]     | `HitTester` trait, `GridIndex` coordinate lookup         |
//! | [`drag`]    | `DragController` — the drag state machine                |
//!
//! # Command pattern
//!
//! The controller never mutates travel state itself.  Pointer events go in,
//! [`DragCommand`]s come out, and the host applies them to the session at a
//! single site — selection on press, a move commit on release, nothing in
//! between (pointer motion only repositions a visual ghost).  This keeps the
//! controller total and trivially testable: feed it events, assert commands.

pub mod drag;
pub mod hit;
pub mod pointer;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use drag::DragController;
pub use hit::{GridIndex, HitTester};
pub use pointer::{DragCommand, DragTarget, ScreenPoint};
