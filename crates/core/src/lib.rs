//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and progression logic.
//! It has **no dependencies** on timers, storage, or presentation, making it:
//!
//! - **Deterministic**: Same seed and same taps produce identical games
//! - **Testable**: Every rule is exercised without a runtime
//! - **Portable**: Can be driven by any host loop (async task, UI timer, test)
//! - **Allocation-free board**: Tiles live in fixed-capacity storage
//!
//! # Module Structure
//!
//! - [`board`]: 4x4 grid of tiles with selection and occupancy lookups
//! - [`game_state`]: Complete game state: spawning, tapping, merging, win/lose
//! - [`levels`]: The fixed ten-level catalog
//! - [`progression`]: Unlock state, current level and the versioned save record
//! - [`scoring`]: Merge points and goal checks
//! - [`spawn`]: Seeded RNG and free-cell placement strategies
//! - [`snapshot`]: Plain-value views for presentation layers
//!
//! # Game Rules
//!
//! - **Spawning**: Every spawn interval one tile of tier 1 or 2 lands on a random free cell
//! - **Selection**: Tap a tile to select it, tap it again to deselect, tap a different tier to switch
//! - **Merging**: Tapping a second tile of the selected tier merges both into one tile of the
//!   next tier at the selected tile's cell, scoring `new tier * 10`
//! - **Victory**: The score reaches the level goal; the next level unlocks
//! - **Defeat**: A spawn finds no room
//!
//! # Example
//!
//! ```
//! use tap_merge_core::{GameState, TapResult};
//! use tap_merge_core::types::{GridPos, Phase};
//!
//! let mut game = GameState::new(12345);
//! let a = game.place_tile(1, GridPos::new(0, 0).unwrap()).unwrap();
//! let b = game.place_tile(1, GridPos::new(3, 3).unwrap()).unwrap();
//!
//! assert_eq!(game.tap(a), TapResult::Selected);
//! assert!(matches!(game.tap(b), TapResult::Merged(_)));
//!
//! assert_eq!(game.score(), 20);
//! assert_eq!(game.tiles().len(), 1);
//! assert_eq!(game.phase(), Phase::Playing);
//! ```
//!
//! # Timing
//!
//! The core never reads a clock. Call
//! [`GameState::spawn_random_tile`](game_state::GameState::spawn_random_tile) once per
//! elapsed [`Level::spawn_interval`](levels::Level::spawn_interval) of the current level.

pub mod board;
pub mod game_state;
pub mod levels;
pub mod progression;
pub mod scoring;
pub mod snapshot;
pub mod spawn;

pub use tap_merge_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Tile};
pub use game_state::{
    GameEvent, GameState, SaveRequest, SpawnResult, TapResult, MAX_PENDING_EVENTS,
};
pub use levels::{default_levels, Level, LevelId, LEVEL_COUNT};
pub use progression::{Progression, SaveRecord};
pub use scoring::{merge_score, reaches_goal};
pub use snapshot::GameSnapshot;
pub use spawn::{PlacementStrategy, SpawnRng};
