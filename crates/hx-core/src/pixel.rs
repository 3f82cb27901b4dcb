//! Pointy-top pixel conversions.
//!
//! Everything here is pure geometry over a regular pointy-top hex grid of a
//! given `size` (center-to-corner radius, pixels).  Render adapters use
//! [`axial_to_pixel`] to place polygons and tokens; the hit-test index uses
//! [`pixel_to_axial`] to turn pointer positions back into grid coordinates
//! without touching any live render objects.

use crate::coords::{Axial, FracCube};

/// √3 — flat-to-flat width factor for pointy-top hexes.
const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// A screen/canvas position in pixels.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line interpolation toward `other` at `t ∈ [0, 1]`.
    #[inline]
    pub fn lerp(self, other: PixelPoint, t: f64) -> PixelPoint {
        PixelPoint {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

/// Pixel center of `coord` on a grid of the given hex `size`.
pub fn axial_to_pixel(coord: Axial, size: f64) -> PixelPoint {
    PixelPoint {
        x: size * (SQRT_3 * coord.q as f64 + SQRT_3 / 2.0 * coord.r as f64),
        y: size * (1.5 * coord.r as f64),
    }
}

/// Nearest hex for a pixel position.  Inverse of [`axial_to_pixel`], with
/// fractional cube rounding for correct behavior near tile edges.
pub fn pixel_to_axial(p: PixelPoint, size: f64) -> Axial {
    let q = (SQRT_3 / 3.0 * p.x - p.y / 3.0) / size;
    let r = (2.0 / 3.0 * p.y) / size;
    FracCube { q, r, s: -q - r }.round().to_axial()
}

/// The six corner points of a pointy-top hex centered at `center`.
///
/// First vertex at the top, then clockwise — the order SVG-style polygon
/// renderers expect.
pub fn hex_corners(center: PixelPoint, size: f64) -> [PixelPoint; 6] {
    std::array::from_fn(|i| {
        let angle = (60.0 * i as f64 - 90.0).to_radians();
        PixelPoint {
            x: center.x + size * angle.cos(),
            y: center.y + size * angle.sin(),
        }
    })
}
