//! `hx-core` — foundational types for the `hexcrawl` travel engine.
//!
//! This crate is a dependency of every other `hx-*` crate.  It intentionally
//! has no `hx-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                |
//! |-------------|---------------------------------------------------------|
//! | [`coords`]  | `Oddr`, `Axial`, `Cube`, `FracCube`, hex line drawing   |
//! | [`pixel`]   | Pointy-top pixel conversions, polygon corner points     |
//! | [`rng`]     | `TravelRng` — deterministic encounter dice              |
//! | [`error`]   | `HexError`, `HexResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod coords;
pub mod error;
pub mod pixel;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use coords::{Axial, Cube, FracCube, Oddr, line_oddr};
pub use error::{HexError, HexResult};
pub use pixel::PixelPoint;
pub use rng::TravelRng;
