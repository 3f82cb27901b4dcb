//! Hex coordinate types and conversions.
//!
//! # Coordinate systems
//!
//! Tiles are addressed externally in **odd-r offset** coordinates ([`Oddr`]):
//! row `r`, column `c`, with odd rows shoved half a hex to the right.  That is
//! the scheme tile data is keyed by and the only one that ever leaves this
//! workspace.
//!
//! Distance and line drawing are easier in **axial** ([`Axial`]) and **cube**
//! ([`Cube`]) coordinates, so the kernel converts internally:
//!
//! ```text
//! Oddr ⟷ Axial ⟷ Cube          (exact bijections on integers)
//!                  Cube ⟶ FracCube ⟶ round ⟶ Cube   (line sampling)
//! ```
//!
//! Cube coordinates satisfy the invariant `q + r + s = 0`; every constructor
//! and conversion in this module preserves it.

use std::fmt;
use std::str::FromStr;

use crate::error::HexError;

// ── Oddr ─────────────────────────────────────────────────────────────────────

/// An odd-r offset coordinate: row `r`, column `c`.
///
/// The externally visible addressing scheme for tiles.  Also usable as a
/// string key via `Display`/`FromStr` (`"r,c"`), which is how tile stores
/// index their maps.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Oddr {
    pub r: i32,
    pub c: i32,
}

impl Oddr {
    #[inline]
    pub const fn new(r: i32, c: i32) -> Self {
        Self { r, c }
    }

    /// Convert to axial coordinates.  Exact for all integer inputs.
    #[inline]
    pub fn to_axial(self) -> Axial {
        // `r & 1` is 1 for odd rows (including negative ones in two's
        // complement), so the subtraction is always even and the division
        // exact.
        Axial {
            q: self.c - (self.r - (self.r & 1)) / 2,
            r: self.r,
        }
    }

    /// Hex distance to `other`.
    #[inline]
    pub fn distance(self, other: Oddr) -> u32 {
        self.to_axial().to_cube().distance(other.to_axial().to_cube())
    }

    /// The six neighboring tiles, clockwise from east.
    pub fn neighbors(self) -> [Oddr; 6] {
        let a = self.to_axial();
        AXIAL_DIRECTIONS.map(|d| {
            Axial {
                q: a.q + d.q,
                r: a.r + d.r,
            }
            .to_oddr()
        })
    }
}

impl fmt::Display for Oddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.r, self.c)
    }
}

impl FromStr for Oddr {
    type Err = HexError;

    /// Parse the `"r,c"` key form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, HexError> {
        let bad = || HexError::ParseKey(s.to_owned());
        let (r, c) = s.split_once(',').ok_or_else(bad)?;
        Ok(Oddr {
            r: r.trim().parse().map_err(|_| bad())?,
            c: c.trim().parse().map_err(|_| bad())?,
        })
    }
}

// ── Axial ────────────────────────────────────────────────────────────────────

/// An axial coordinate (`q` column-ish, `r` row).  Internal use only; never
/// persisted.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Axial {
    pub q: i32,
    pub r: i32,
}

/// Neighbor offsets in axial space, clockwise from east.
const AXIAL_DIRECTIONS: [Axial; 6] = [
    Axial { q: 1, r: 0 },  // E
    Axial { q: 1, r: -1 }, // NE
    Axial { q: 0, r: -1 }, // NW
    Axial { q: -1, r: 0 }, // W
    Axial { q: -1, r: 1 }, // SW
    Axial { q: 0, r: 1 },  // SE
];

impl Axial {
    #[inline]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Convert back to odd-r offset.  Inverse of [`Oddr::to_axial`].
    #[inline]
    pub fn to_oddr(self) -> Oddr {
        Oddr {
            r: self.r,
            c: self.q + (self.r - (self.r & 1)) / 2,
        }
    }

    /// Lift into cube space (`s` derived from the zero-sum invariant).
    #[inline]
    pub fn to_cube(self) -> Cube {
        Cube {
            q: self.q,
            r: self.r,
            s: -self.q - self.r,
        }
    }
}

// ── Cube ─────────────────────────────────────────────────────────────────────

/// A cube coordinate with the invariant `q + r + s = 0`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cube {
    pub q: i32,
    pub r: i32,
    pub s: i32,
}

impl Cube {
    /// Drop the redundant `s` component.
    #[inline]
    pub fn to_axial(self) -> Axial {
        Axial { q: self.q, r: self.r }
    }

    /// Integer hex distance: `(|Δq| + |Δr| + |Δs|) / 2`.
    ///
    /// Symmetric, zero exactly on equal inputs, and satisfies the triangle
    /// inequality.
    #[inline]
    pub fn distance(self, other: Cube) -> u32 {
        let dq = self.q.abs_diff(other.q);
        let dr = self.r.abs_diff(other.r);
        let ds = self.s.abs_diff(other.s);
        (dq + dr + ds) / 2
    }

    /// Lift into fractional cube space for interpolation.
    #[inline]
    pub fn to_frac(self) -> FracCube {
        FracCube {
            q: self.q as f64,
            r: self.r as f64,
            s: self.s as f64,
        }
    }
}

// ── FracCube ─────────────────────────────────────────────────────────────────

/// A fractional cube coordinate — an intermediate value during line sampling.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct FracCube {
    pub q: f64,
    pub r: f64,
    pub s: f64,
}

impl FracCube {
    /// Linear interpolation between `a` and `b` at `t ∈ [0, 1]`.
    #[inline]
    pub fn lerp(a: Cube, b: Cube, t: f64) -> FracCube {
        FracCube {
            q: a.q as f64 + (b.q - a.q) as f64 * t,
            r: a.r as f64 + (b.r - a.r) as f64 * t,
            s: a.s as f64 + (b.s - a.s) as f64 * t,
        }
    }

    /// Round to the nearest valid cube coordinate.
    ///
    /// All three components are rounded independently, then the one with the
    /// largest rounding error is recomputed from the other two so that
    /// `q + r + s = 0` holds again.  Ties resolve r before s, matching the
    /// reference line algorithm tile for tile.
    pub fn round(self) -> Cube {
        let mut q = self.q.round();
        let mut r = self.r.round();
        let mut s = self.s.round();

        let q_diff = (q - self.q).abs();
        let r_diff = (r - self.r).abs();
        let s_diff = (s - self.s).abs();

        if q_diff > r_diff && q_diff > s_diff {
            q = -r - s;
        } else if r_diff > s_diff {
            r = -q - s;
        } else {
            s = -q - r;
        }

        Cube {
            q: q as i32,
            r: r as i32,
            s: s as i32,
        }
    }
}

// ── Line drawing ─────────────────────────────────────────────────────────────

/// The ordered straight hex line from `a` to `b`, both endpoints inclusive.
///
/// Converts to cube space, samples `distance + 1` evenly spaced points,
/// rounds each back onto the grid.  `a == b` yields `[a]`.
pub fn line_oddr(a: Oddr, b: Oddr) -> Vec<Oddr> {
    let ca = a.to_axial().to_cube();
    let cb = b.to_axial().to_cube();
    let n = ca.distance(cb);
    if n == 0 {
        return vec![a];
    }

    (0..=n)
        .map(|i| {
            let t = i as f64 / n as f64;
            FracCube::lerp(ca, cb, t).round().to_axial().to_oddr()
        })
        .collect()
}
