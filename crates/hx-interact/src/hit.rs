//! Grid hit-testing.
//!
//! Resolving a pointer position to a tile is a pure lookup: the render
//! adapter maintains a [`GridIndex`] of every tile it has drawn, and the
//! drag controller queries it through the [`HitTester`] trait.  No live
//! render objects are ever walked.

use hx_core::{Oddr, pixel};
use rustc_hash::FxHashSet;

use crate::pointer::ScreenPoint;

/// Pure screen-position → tile lookup.
pub trait HitTester {
    /// The drawn tile under `point`, or `None` when the pointer is over
    /// empty canvas (or an undrawn coordinate).
    fn coord_at(&self, point: ScreenPoint) -> Option<Oddr>;
}

/// Coordinate-keyed hit-test index over a regular pointy-top grid.
///
/// Keeps the grid geometry (hex size, canvas origin) plus the set of
/// coordinates that currently have a drawn polygon.  Lookup inverts the
/// pixel math and then checks membership, so pointer positions over
/// undrawn tiles miss, exactly like hit-testing against real polygons.
pub struct GridIndex {
    /// Center-to-corner hex radius, pixels.
    size:   f64,
    /// Canvas position of the `(0,0)` tile's center.
    origin: ScreenPoint,
    drawn:  FxHashSet<Oddr>,
}

impl GridIndex {
    pub fn new(size: f64, origin: ScreenPoint) -> Self {
        Self {
            size,
            origin,
            drawn: FxHashSet::default(),
        }
    }

    /// Record that `coord` now has a polygon.
    pub fn insert(&mut self, coord: Oddr) {
        self.drawn.insert(coord);
    }

    /// Record a batch of drawn tiles.
    pub fn extend(&mut self, coords: impl IntoIterator<Item = Oddr>) {
        self.drawn.extend(coords);
    }

    /// Remove a tile (its polygon was destroyed).
    pub fn remove(&mut self, coord: Oddr) {
        self.drawn.remove(&coord);
    }

    pub fn contains(&self, coord: Oddr) -> bool {
        self.drawn.contains(&coord)
    }

    pub fn len(&self) -> usize {
        self.drawn.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawn.is_empty()
    }

    /// Pixel center of `coord` under this index's geometry.
    pub fn center_of(&self, coord: Oddr) -> ScreenPoint {
        let p = pixel::axial_to_pixel(coord.to_axial(), self.size);
        ScreenPoint::new(p.x + self.origin.x, p.y + self.origin.y)
    }
}

impl HitTester for GridIndex {
    fn coord_at(&self, point: ScreenPoint) -> Option<Oddr> {
        let local = ScreenPoint::new(point.x - self.origin.x, point.y - self.origin.y);
        let coord = pixel::pixel_to_axial(local, self.size).to_oddr();
        self.drawn.contains(&coord).then_some(coord)
    }
}
