//! Board module - the 4x4 grid of placed tiles and the player's selection
//!
//! Tiles are kept in insertion order (spawns and merge results are appended),
//! alongside a flat row-major occupancy array for O(1) cell lookups. Both are
//! fixed-capacity, so the board never allocates.
//!
//! Coordinates: (x, y) where both range 0..3, x left to right, y top to bottom.

use arrayvec::ArrayVec;

use crate::types::{GridPos, TileId, CELL_COUNT, GRID_SIZE};

/// A placed game piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub id: TileId,
    /// Merge tier (1 and 2 spawn; every merge adds one)
    pub tier: u32,
    pub pos: GridPos,
}

/// The grid of live tiles plus the current selection
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    tiles: ArrayVec<Tile, CELL_COUNT>,
    /// Flat array of occupants, row-major order (y * GRID_SIZE + x)
    cells: [Option<TileId>; CELL_COUNT],
    selected: Option<TileId>,
    /// Next tile id; survives `reset` so ids are never reused
    next_id: u32,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            tiles: ArrayVec::new(),
            cells: [None; CELL_COUNT],
            selected: None,
            next_id: 1,
        }
    }

    /// Get the side length of the grid
    pub fn size(&self) -> u8 {
        GRID_SIZE
    }

    /// Live tiles in insertion order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// True when every cell holds a tile
    pub fn is_full(&self) -> bool {
        self.tiles.len() >= CELL_COUNT
    }

    /// Look up a live tile by id
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.id == id)
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.get(id).is_some()
    }

    /// The tile occupying `pos`, if any
    pub fn tile_at(&self, pos: GridPos) -> Option<&Tile> {
        let id = self.occupant(pos)?;
        self.get(id)
    }

    fn occupant(&self, pos: GridPos) -> Option<TileId> {
        if !pos.in_bounds() {
            return None;
        }
        self.cells[pos.index()]
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, pos: GridPos) -> bool {
        self.occupant(pos).is_some()
    }

    /// Empty cells in row-major order
    pub fn free_cells(&self) -> ArrayVec<GridPos, CELL_COUNT> {
        GridPos::all().filter(|pos| !self.is_occupied(*pos)).collect()
    }

    /// Place a new tile
    ///
    /// Returns `None` without touching the board if `pos` is off the grid or
    /// already occupied, or if `tier` is zero.
    pub fn place(&mut self, tier: u32, pos: GridPos) -> Option<TileId> {
        if tier == 0 || !pos.in_bounds() || self.is_occupied(pos) || self.is_full() {
            return None;
        }

        let id = TileId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        self.tiles.push(Tile { id, tier, pos });
        self.cells[pos.index()] = Some(id);
        Some(id)
    }

    /// Remove a tile, clearing the selection if it pointed at it
    pub fn remove(&mut self, id: TileId) -> Option<Tile> {
        let idx = self.tiles.iter().position(|tile| tile.id == id)?;
        let tile = self.tiles.remove(idx);
        self.cells[tile.pos.index()] = None;
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some(tile)
    }

    /// Select a live tile. Selecting an absent tile is ignored.
    pub fn select(&mut self, id: TileId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.selected = Some(id);
        true
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<TileId> {
        self.selected
    }

    pub fn selected_tile(&self) -> Option<&Tile> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Remove every tile and the selection
    pub fn reset(&mut self) {
        self.tiles.clear();
        self.cells = [None; CELL_COUNT];
        self.selected = None;
    }

    /// Write tiers into a row-major grid (0 = empty)
    pub fn write_tier_grid(&self, out: &mut [[u32; GRID_SIZE as usize]; GRID_SIZE as usize]) {
        for row in out.iter_mut() {
            row.fill(0);
        }
        for tile in &self.tiles {
            out[tile.pos.y as usize][tile.pos.x as usize] = tile.tier;
        }
    }

    /// Build a board from `(x, y, tier)` triples for testing
    #[cfg(test)]
    pub fn from_tiers(tiers: &[(u8, u8, u32)]) -> Self {
        let mut board = Self::new();
        for &(x, y, tier) in tiers {
            let pos = GridPos::new(x, y).expect("test position off the grid");
            board.place(tier, pos).expect("test position already occupied");
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
