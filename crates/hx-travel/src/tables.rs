//! Immutable terrain and region lookup tables.
//!
//! Both tables are snapshots injected at session construction. When the
//! host's datasets change it swaps in fresh tables via
//! [`TravelSession::set_tables`](crate::TravelSession::set_tables); nothing
//! here watches files or caches lazily.

use rustc_hash::FxHashMap;

/// Terrain name to travel-time multiplier applied to the base hours per tile.
#[derive(Debug, Clone, Default)]
pub struct TerrainTable {
    multipliers: FxHashMap<String, f64>,
}

impl TerrainTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Multiplier for `name`, or `1.0` when the terrain is unknown or unnamed.
    pub fn multiplier(&self, name: &str) -> f64 {
        match self.multipliers.get(name) {
            Some(&m) if m.is_finite() && m > 0.0 => m,
            _ => 1.0,
        }
    }

    pub fn len(&self) -> usize {
        self.multipliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.multipliers.is_empty()
    }
}

impl FromIterator<(String, f64)> for TerrainTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        TerrainTable {
            multipliers: iter.into_iter().collect(),
        }
    }
}

/// Region name to encounter odds. Odds `n` mean a 1-in-`n` chance per
/// travelled in-game hour; regions without an entry never roll.
#[derive(Debug, Clone, Default)]
pub struct RegionTable {
    odds: FxHashMap<String, u32>,
}

impl RegionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn odds(&self, region: &str) -> Option<u32> {
        self.odds.get(region).copied().filter(|&n| n > 0)
    }

    pub fn len(&self) -> usize {
        self.odds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.odds.is_empty()
    }
}

impl FromIterator<(String, u32)> for RegionTable {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        RegionTable {
            odds: iter.into_iter().collect(),
        }
    }
}
