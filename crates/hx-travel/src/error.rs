//! Error types for travel playback and tile persistence.

use hx_core::{HexError, Oddr};
use thiserror::Error;

/// Errors raised by tile stores, render adapters, and the playback loop.
#[derive(Debug, Error)]
pub enum TravelError {
    /// The tile backend failed to read or write a tile.
    #[error("tile I/O failed at {coord}: {message}")]
    TileIo { coord: Oddr, message: String },

    /// Playback asked for the pixel center of a tile the adapter has not drawn.
    #[error("tile {0} has no rendered center")]
    NoRenderedCenter(Oddr),

    /// A coordinate key failed to parse.
    #[error(transparent)]
    Hex(#[from] HexError),
}

impl TravelError {
    pub fn tile_io(coord: Oddr, message: impl Into<String>) -> Self {
        TravelError::TileIo {
            coord,
            message: message.into(),
        }
    }
}

pub type TravelResult<T> = Result<T, TravelError>;
