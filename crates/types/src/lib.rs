//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core rules, scheduler, persistence, presentation).
//!
//! # Grid Dimensions
//!
//! The playfield is a square grid:
//!
//! - **Size**: 4x4 cells, indexed `0..4` on both axes
//! - **Cells**: 16 in total; a board holding 16 tiles is full
//!
//! # Rule Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GRID_SIZE` | 4 | Cells per row and per column |
//! | `CELL_COUNT` | 16 | Maximum number of live tiles |
//! | `MIN_SPAWN_TIER` | 1 | Lowest tier a spawned tile can have |
//! | `MAX_SPAWN_TIER` | 2 | Highest tier a spawned tile can have |
//! | `SCORE_PER_TIER` | 10 | A merge producing tier `T` scores `T * 10` |
//! | `DEFAULT_SPAWN_ATTEMPTS` | 10 | Random draws before a spawn gives up |
//! | `INITIAL_TILES` | 2 | Tiles spawned when a round starts |
//!
//! # Examples
//!
//! ```
//! use tap_merge_types::{GridPos, Outcome, Phase, CELL_COUNT, GRID_SIZE};
//!
//! let pos = GridPos::new(3, 1).unwrap();
//! assert_eq!(pos.index(), 7);
//! assert_eq!(GridPos::from_index(7), Some(pos));
//! assert!(GridPos::new(GRID_SIZE, 0).is_none());
//!
//! assert_eq!(GridPos::all().count(), CELL_COUNT);
//!
//! let phase = Phase::Ended(Outcome::Victory);
//! assert!(!phase.is_playing());
//! assert_eq!(phase.as_str(), "victory");
//! ```

use std::fmt;

/// Cells per row and per column
pub const GRID_SIZE: u8 = 4;

/// Total number of cells on the grid
pub const CELL_COUNT: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);

/// Lowest tier a freshly spawned tile can have
pub const MIN_SPAWN_TIER: u32 = 1;

/// Highest tier a freshly spawned tile can have
pub const MAX_SPAWN_TIER: u32 = 2;

/// Points per tier of the tile produced by a merge
pub const SCORE_PER_TIER: u32 = 10;

/// Random placement draws before a spawn reports "no space"
pub const DEFAULT_SPAWN_ATTEMPTS: u32 = 10;

/// Tiles placed at the start of every round
pub const INITIAL_TILES: usize = 2;

/// Version tag written into every save record
pub const SAVE_FORMAT_VERSION: &str = "1.0";

/// Storage key of the persisted progress record
pub const PROGRESS_KEY: &str = "gameProgress";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_constants_are_consistent() {
        assert_eq!(GRID_SIZE, 4);
        assert_eq!(CELL_COUNT, 16);
        assert!(MIN_SPAWN_TIER <= MAX_SPAWN_TIER);
        assert_eq!(DEFAULT_SPAWN_ATTEMPTS, 10);
        assert_eq!(INITIAL_TILES, 2);
    }

    #[test]
    fn grid_pos_bounds() {
        assert!(GridPos::new(0, 0).is_some());
        assert!(GridPos::new(3, 3).is_some());
        assert!(GridPos::new(4, 0).is_none());
        assert!(GridPos::new(0, 4).is_none());
    }

    #[test]
    fn grid_pos_index_round_trip() {
        for (i, pos) in GridPos::all().enumerate() {
            assert_eq!(pos.index(), i);
            assert_eq!(GridPos::from_index(i), Some(pos));
        }
        assert_eq!(GridPos::from_index(CELL_COUNT), None);
    }

    #[test]
    fn phase_helpers() {
        assert!(Phase::Playing.is_playing());
        assert_eq!(Phase::Playing.outcome(), None);
        assert_eq!(
            Phase::Ended(Outcome::Defeat).outcome(),
            Some(Outcome::Defeat)
        );
        assert_eq!(Phase::default(), Phase::Playing);
    }
}

/// A cell coordinate on the grid
///
/// `x` grows left to right, `y` grows top to bottom. Values are always
/// within `0..GRID_SIZE`; construction through [`GridPos::new`] enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    pub x: u8,
    pub y: u8,
}

impl GridPos {
    /// Create a position, returning `None` if it lies outside the grid
    pub fn new(x: u8, y: u8) -> Option<Self> {
        if x >= GRID_SIZE || y >= GRID_SIZE {
            return None;
        }
        Some(Self { x, y })
    }

    /// Row-major flat index (`y * GRID_SIZE + x`)
    #[inline(always)]
    pub fn index(&self) -> usize {
        (self.y as usize) * (GRID_SIZE as usize) + (self.x as usize)
    }

    /// Inverse of [`GridPos::index`]
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= CELL_COUNT {
            return None;
        }
        let size = GRID_SIZE as usize;
        Some(Self {
            x: (index % size) as u8,
            y: (index / size) as u8,
        })
    }

    /// Every cell in row-major order
    pub fn all() -> impl Iterator<Item = GridPos> {
        (0..CELL_COUNT).filter_map(Self::from_index)
    }

    /// Whether the coordinate lies on the grid
    pub fn in_bounds(&self) -> bool {
        self.x < GRID_SIZE && self.y < GRID_SIZE
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Unique identifier of a live tile
///
/// Ids are handed out by a monotonic counter and never reused within a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Score reached the level goal
    Victory,
    /// A spawn found no room on the grid
    Defeat,
}

/// Coarse round lifecycle
///
/// `Ended` is terminal until the round is restarted or the level changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Playing,
    Ended(Outcome),
}

impl Phase {
    pub fn is_playing(&self) -> bool {
        matches!(self, Phase::Playing)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Phase::Playing => None,
            Phase::Ended(outcome) => Some(*outcome),
        }
    }

    /// Lowercase label for logs and observers
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Playing => "playing",
            Phase::Ended(Outcome::Victory) => "victory",
            Phase::Ended(Outcome::Defeat) => "defeat",
        }
    }
}
