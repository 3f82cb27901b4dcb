//! Rendering seam.
//!
//! The engine computes in hex coordinates and asks the adapter for pixel
//! centers; it never inspects what the adapter actually draws. Hosts back
//! this with SVG, canvas, or nothing at all.

use hx_core::pixel::axial_to_pixel;
use hx_core::{Oddr, PixelPoint};
use hx_route::RouteNode;

/// Host-implemented drawing surface.
pub trait RenderAdapter {
    /// Makes sure polygons exist for `coords` before they are styled or
    /// animated across. Idempotent.
    fn ensure_polys(&mut self, coords: &[Oddr]);

    /// Pixel center of `coord`, or `None` when the tile is not drawn.
    fn center_of(&self, coord: Oddr) -> Option<PixelPoint>;

    /// Repaints one tile, e.g. after its terrain changes.  Color strings
    /// are host vocabulary; the engine passes them through untouched.
    fn set_fill(&mut self, coord: Oddr, color: &str);

    /// Moves the token sprite to an absolute pixel position.
    fn place_token(&mut self, pos: PixelPoint);

    /// Redraws the route overlay: dots for every node, highlight for the
    /// selected one.
    fn draw_route(&mut self, route: &[RouteNode], token: Oddr, edit_idx: Option<usize>);
}

/// Adapter for headless hosts and tests.
///
/// Centers come from pure geometry with a fixed hex size, so playback can
/// animate without anything on screen; the drawing calls are no-ops.
#[derive(Debug, Clone)]
pub struct NullAdapter {
    size: f64,
}

impl NullAdapter {
    pub fn new(size: f64) -> Self {
        NullAdapter { size }
    }
}

impl Default for NullAdapter {
    fn default() -> Self {
        NullAdapter::new(1.0)
    }
}

impl RenderAdapter for NullAdapter {
    fn ensure_polys(&mut self, _coords: &[Oddr]) {}

    fn center_of(&self, coord: Oddr) -> Option<PixelPoint> {
        Some(axial_to_pixel(coord.to_axial(), self.size))
    }

    fn set_fill(&mut self, _coord: Oddr, _color: &str) {}

    fn place_token(&mut self, _pos: PixelPoint) {}

    fn draw_route(&mut self, _route: &[RouteNode], _token: Oddr, _edit_idx: Option<usize>) {}
}
