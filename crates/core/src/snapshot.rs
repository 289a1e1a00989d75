use std::time::Duration;

use arrayvec::ArrayVec;

use crate::board::Tile;
use crate::levels::LevelId;
use crate::types::{Phase, TileId, CELL_COUNT, GRID_SIZE};

/// Read-only view of a game for presentation layers
///
/// Snapshots are plain values: cheap to clone, safe to send across threads and
/// comparable, so observers can diff consecutive ones.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    /// Live tiles in insertion order
    pub tiles: ArrayVec<Tile, CELL_COUNT>,
    /// Tier per cell, row-major (`grid[y][x]`), 0 = empty
    pub grid: [[u32; GRID_SIZE as usize]; GRID_SIZE as usize],
    pub selected: Option<TileId>,
    pub score: u32,
    pub phase: Phase,
    pub level_id: LevelId,
    pub required_score: u32,
    pub spawn_interval: Duration,
    pub round_id: u32,
    pub seed: u64,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.grid = [[0u32; GRID_SIZE as usize]; GRID_SIZE as usize];
        self.selected = None;
        self.score = 0;
        self.phase = Phase::Playing;
        self.level_id = 0;
        self.required_score = 0;
        self.spawn_interval = Duration::ZERO;
        self.round_id = 0;
        self.seed = 0;
    }

    pub fn playable(&self) -> bool {
        self.phase.is_playing()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            tiles: ArrayVec::new(),
            grid: [[0u32; GRID_SIZE as usize]; GRID_SIZE as usize],
            selected: None,
            score: 0,
            phase: Phase::Playing,
            level_id: 0,
            required_score: 0,
            spawn_interval: Duration::ZERO,
            round_id: 0,
            seed: 0,
        };
        s.clear();
        s
    }
}
