//! Pointer-facing types.

use hx_core::{Oddr, PixelPoint};

/// A pointer position in the same pixel space the grid is rendered in.
pub type ScreenPoint = PixelPoint;

/// What the pointer went down on.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DragTarget {
    /// An existing route node, by its index in the route.
    Dot(usize),
    /// The token itself.
    Token,
}

/// An edit the host must apply to the travel session.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DragCommand {
    /// Select the route node at this index (pointer went down on a dot).
    SelectDot(usize),
    /// Commit a drag of the selected node to this tile.
    MoveSelected(Oddr),
    /// Commit a drag of the token to this tile.
    MoveToken(Oddr),
}
