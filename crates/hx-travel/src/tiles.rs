//! Tile persistence seam.
//!
//! The engine never touches the host's storage directly. Everything goes
//! through [`TileStore`], so a vault-backed store, a database, and the
//! in-memory store used in tests are interchangeable.

use hx_core::Oddr;
use rustc_hash::FxHashMap;

use crate::error::TravelResult;

/// Persisted per-tile payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileData {
    pub terrain: String,
    pub region: Option<String>,
    pub note: Option<String>,
    /// Marker for the tile currently holding the travel token.
    pub token: bool,
}

impl TileData {
    pub fn with_terrain(terrain: impl Into<String>) -> Self {
        TileData {
            terrain: terrain.into(),
            ..TileData::default()
        }
    }
}

/// Host-implemented tile backend.
pub trait TileStore {
    fn load_tile(&self, coord: Oddr) -> TravelResult<Option<TileData>>;
    fn save_tile(&mut self, coord: Oddr, data: TileData) -> TravelResult<()>;
    fn delete_tile(&mut self, coord: Oddr) -> TravelResult<()>;
    fn list_tiles(&self) -> TravelResult<Vec<(Oddr, TileData)>>;
}

/// First tile carrying the token marker, scanning in listing order.
pub fn find_token<T: TileStore + ?Sized>(tiles: &T) -> TravelResult<Option<Oddr>> {
    let listed = tiles.list_tiles()?;
    Ok(listed
        .into_iter()
        .find_map(|(coord, data)| data.token.then_some(coord)))
}

/// Moves the token marker to `coord`, clearing it everywhere else.
///
/// Creates the destination tile when it does not exist yet so the marker
/// survives a reload even on unexplored ground.
pub fn write_token<T: TileStore + ?Sized>(tiles: &mut T, coord: Oddr) -> TravelResult<()> {
    for (at, mut data) in tiles.list_tiles()? {
        if data.token && at != coord {
            data.token = false;
            tiles.save_tile(at, data)?;
        }
    }
    let mut dest = tiles.load_tile(coord)?.unwrap_or_default();
    if !dest.token {
        dest.token = true;
        tiles.save_tile(coord, dest)?;
    }
    Ok(())
}

/// In-memory [`TileStore`] for tests and headless hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryTileStore {
    tiles: FxHashMap<Oddr, TileData>,
}

impl MemoryTileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, coord: Oddr, data: TileData) {
        self.tiles.insert(coord, data);
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

impl TileStore for MemoryTileStore {
    fn load_tile(&self, coord: Oddr) -> TravelResult<Option<TileData>> {
        Ok(self.tiles.get(&coord).cloned())
    }

    fn save_tile(&mut self, coord: Oddr, data: TileData) -> TravelResult<()> {
        self.tiles.insert(coord, data);
        Ok(())
    }

    fn delete_tile(&mut self, coord: Oddr) -> TravelResult<()> {
        self.tiles.remove(&coord);
        Ok(())
    }

    fn list_tiles(&self) -> TravelResult<Vec<(Oddr, TileData)>> {
        let mut listed: Vec<_> = self
            .tiles
            .iter()
            .map(|(&coord, data)| (coord, data.clone()))
            .collect();
        listed.sort_by_key(|(coord, _)| (coord.r, coord.c));
        Ok(listed)
    }
}
