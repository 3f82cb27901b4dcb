//! The drag state machine.
//!
//! # Protocol
//!
//! ```text
//! begin(target, pos)  — pointer down on a dot or the token
//! update(pos)*        — pointer moves; returns a ghost coord only when the
//!                       resolved tile changed since the last move
//! finish(pos)         — pointer up / primary button lost; commits at most
//!                       one DragCommand, iff the final tile differs from
//!                       the drag origin
//! cancel()            — pointer capture lost; discards everything
//! ```
//!
//! A drag that visited any other tile marks the next synthetic click as
//! suppressed; the host checks [`DragController::consume_click_suppression`]
//! before treating a click as a tile click, so a drag is never also a click.

use hx_core::Oddr;

use crate::hit::HitTester;
use crate::pointer::{DragCommand, DragTarget, ScreenPoint};

struct ActiveDrag {
    target: DragTarget,
    /// Tile the dragged entity started on.
    origin: Option<Oddr>,
    /// Most recent tile the pointer resolved to.
    last:   Option<Oddr>,
    /// Whether the pointer ever resolved to a tile other than the origin.
    moved:  bool,
}

/// Pointer-event-driven drag controller for route dots and the token.
#[derive(Default)]
pub struct DragController {
    active:         Option<ActiveDrag>,
    suppress_click: bool,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` while a drag is in progress.  The host uses this to disable
    /// pointer events on the route-line layer so hit-testing falls through
    /// to the grid.
    pub fn dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Pointer down over `target`.  Resolves the starting tile through
    /// `hit` and, for dots, returns the selection command to apply.
    pub fn begin(
        &mut self,
        target: DragTarget,
        pos:    ScreenPoint,
        hit:    &impl HitTester,
    ) -> Option<DragCommand> {
        let origin = hit.coord_at(pos);
        self.active = Some(ActiveDrag {
            target,
            origin,
            last: origin,
            moved: false,
        });
        match target {
            DragTarget::Dot(idx) => Some(DragCommand::SelectDot(idx)),
            DragTarget::Token => None,
        }
    }

    /// Pointer moved.  Returns the tile to reposition the visual ghost to,
    /// but only when the resolved tile actually changed — repeated motion
    /// inside one hex is free.  No travel state is mutated here.
    pub fn update(&mut self, pos: ScreenPoint, hit: &impl HitTester) -> Option<Oddr> {
        let drag = self.active.as_mut()?;
        let coord = hit.coord_at(pos)?;
        if drag.last == Some(coord) {
            return None;
        }
        drag.last = Some(coord);
        if drag.origin != Some(coord) {
            drag.moved = true;
        }
        Some(coord)
    }

    /// Pointer up (or cancel, or loss of the primary button).  Commits the
    /// drag: exactly one command iff the final tile differs from the origin.
    pub fn finish(&mut self, pos: ScreenPoint, hit: &impl HitTester) -> Option<DragCommand> {
        let drag = self.active.take()?;
        let final_coord = hit.coord_at(pos).or(drag.last);

        if drag.moved {
            self.suppress_click = true;
        }

        let dest = final_coord?;
        if drag.origin == Some(dest) {
            return None;
        }
        match drag.target {
            DragTarget::Dot(_) => Some(DragCommand::MoveSelected(dest)),
            DragTarget::Token => Some(DragCommand::MoveToken(dest)),
        }
    }

    /// Abandon the drag without committing anything.
    pub fn cancel(&mut self) {
        if let Some(drag) = self.active.take()
            && drag.moved
        {
            self.suppress_click = true;
        }
    }

    /// One-shot check for the synthetic click that follows a drag.  Returns
    /// `true` (and clears the flag) when that click must be ignored.
    pub fn consume_click_suppression(&mut self) -> bool {
        std::mem::take(&mut self.suppress_click)
    }
}
