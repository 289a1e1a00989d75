//! Game state module - manages the complete game state
//!
//! This module ties together the board, spawn RNG, scoring and progression.
//! It implements the merge rules, the tap-to-select interaction, win/lose
//! detection and the round lifecycle. Timing lives elsewhere: callers invoke
//! [`GameState::spawn_random_tile`] whenever the spawn interval elapses.

use std::collections::VecDeque;

use crate::board::{Board, Tile};
use crate::levels::{Level, LevelId};
use crate::progression::{Progression, SaveRecord};
use crate::scoring::{add_merge_score, merge_score, reaches_goal};
use crate::snapshot::GameSnapshot;
use crate::spawn::{PlacementStrategy, SpawnRng};
use crate::types::*;

/// Result of tapping a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapResult {
    /// Nothing was selected; the tile is now selected
    Selected,
    /// The selected tile was tapped again and is no longer selected
    Deselected,
    /// A tile of a different tier replaced the selection
    Replaced,
    /// The tapped tile merged with the selection into the given tile
    Merged(TileId),
    /// Round over, unknown tile, or a merge whose preconditions failed
    Ignored,
}

/// Result of a spawn attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnResult {
    Placed(TileId),
    /// No room was found; the round is now lost
    Defeat,
    /// The round is not being played
    Skipped,
}

/// Most events kept for [`GameState::take_events`]; older ones are dropped
pub const MAX_PENDING_EVENTS: usize = 64;

/// One-shot notifications for observers (consumed with [`GameState::take_events`])
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    RoundStarted {
        round_id: u32,
        level: LevelId,
    },
    TileSpawned {
        id: TileId,
        tier: u32,
        pos: GridPos,
    },
    TilesMerged {
        consumed: [TileId; 2],
        result: TileId,
        tier: u32,
        pos: GridPos,
        points: u32,
    },
    RoundEnded {
        outcome: Outcome,
        level: LevelId,
        score: u32,
    },
    LevelUnlocked {
        level: LevelId,
    },
}

/// Persistence work produced by the rules, executed by the storage layer
#[derive(Debug, Clone, PartialEq)]
pub enum SaveRequest {
    Save(SaveRecord),
    Clear,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    score: u32,
    phase: Phase,
    progression: Progression,
    rng: SpawnRng,
    placement: PlacementStrategy,
    /// Monotonic round id (increments on restart).
    round_id: u32,
    events: VecDeque<GameEvent>,
    save_request: Option<SaveRequest>,
}

impl GameState {
    /// Create a new game with the given RNG seed, the default catalog and an
    /// empty board in the Playing phase.
    pub fn new(seed: u64) -> Self {
        Self::with_progression(seed, Progression::new())
    }

    /// Create a new game on top of restored progression
    pub fn with_progression(seed: u64, progression: Progression) -> Self {
        Self {
            board: Board::new(),
            score: 0,
            phase: Phase::Playing,
            progression,
            rng: SpawnRng::new(seed),
            placement: PlacementStrategy::default(),
            round_id: 0,
            events: VecDeque::new(),
            save_request: None,
        }
    }

    pub fn with_placement(mut self, placement: PlacementStrategy) -> Self {
        self.placement = placement;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tiles(&self) -> &[Tile] {
        self.board.tiles()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selected(&self) -> Option<TileId> {
        self.board.selected()
    }

    pub fn is_full(&self) -> bool {
        self.board.is_full()
    }

    pub fn current_level(&self) -> &Level {
        self.progression.current()
    }

    pub fn levels(&self) -> &[Level] {
        self.progression.levels()
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn placement(&self) -> PlacementStrategy {
        self.placement
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn round_id(&self) -> u32 {
        self.round_id
    }

    /// Clear the board, zero the score and return to Playing
    ///
    /// Does not spawn anything; see [`GameState::restart`] for a fresh round.
    pub fn reset(&mut self) {
        self.board.reset();
        self.score = 0;
        self.phase = Phase::Playing;
    }

    /// Start a new round on the current level with the initial tiles
    pub fn restart(&mut self) {
        self.reset();
        self.round_id = self.round_id.wrapping_add(1);

        let level = self.progression.current_id();
        log::info!("round {} started on level {}", self.round_id, level);
        self.push_event(GameEvent::RoundStarted {
            round_id: self.round_id,
            level,
        });

        for _ in 0..INITIAL_TILES {
            self.spawn_random_tile();
        }
    }

    /// Place a tile at a specific cell while the round is being played
    pub fn place_tile(&mut self, tier: u32, pos: GridPos) -> Option<TileId> {
        if !self.phase.is_playing() {
            return None;
        }
        self.board.place(tier, pos)
    }

    /// Place one random tile, or lose the round if there is no room
    pub fn spawn_random_tile(&mut self) -> SpawnResult {
        if !self.phase.is_playing() {
            return SpawnResult::Skipped;
        }

        let Some(pos) = self.rng.pick_cell(&self.board, self.placement) else {
            self.end_round(Outcome::Defeat);
            return SpawnResult::Defeat;
        };
        let tier = self.rng.next_tier();

        match self.board.place(tier, pos) {
            Some(id) => {
                log::debug!("spawned tier {} tile {} at {}", tier, id, pos);
                self.push_event(GameEvent::TileSpawned { id, tier, pos });
                SpawnResult::Placed(id)
            }
            None => {
                self.end_round(Outcome::Defeat);
                SpawnResult::Defeat
            }
        }
    }

    /// Select a tile while the round is being played
    pub fn select(&mut self, id: TileId) -> bool {
        self.phase.is_playing() && self.board.select(id)
    }

    pub fn deselect(&mut self) {
        self.board.deselect();
    }

    /// Apply the tap interaction rule to `id`
    pub fn tap(&mut self, id: TileId) -> TapResult {
        if !self.phase.is_playing() {
            return TapResult::Ignored;
        }
        let Some(tapped) = self.board.get(id).copied() else {
            return TapResult::Ignored;
        };

        match self.board.selected_tile().copied() {
            None => {
                self.board.select(id);
                TapResult::Selected
            }
            Some(selected) if selected.id == tapped.id => {
                self.board.deselect();
                TapResult::Deselected
            }
            Some(selected) if selected.tier == tapped.tier => {
                match self.attempt_merge(selected.id, tapped.id) {
                    Some(result) => TapResult::Merged(result),
                    None => TapResult::Ignored,
                }
            }
            Some(_) => {
                self.board.select(id);
                TapResult::Replaced
            }
        }
    }

    /// Merge two equal-tier tiles into one tile of the next tier at `a`'s cell
    ///
    /// Returns the new tile's id, or `None` without changing anything when the
    /// round is over, the ids are equal or absent, or the tiers differ.
    pub fn attempt_merge(&mut self, a: TileId, b: TileId) -> Option<TileId> {
        if !self.phase.is_playing() || a == b {
            return None;
        }
        let first = *self.board.get(a)?;
        let second = *self.board.get(b)?;
        if first.tier != second.tier || first.pos == second.pos {
            return None;
        }

        let tier = first.tier.saturating_add(1);
        self.board.remove(a);
        self.board.remove(b);
        let result = self.board.place(tier, first.pos)?;
        self.board.deselect();

        let points = merge_score(tier);
        self.score = add_merge_score(self.score, tier);
        log::debug!(
            "merged {} + {} into tier {} at {} (+{}, score {})",
            a,
            b,
            tier,
            first.pos,
            points,
            self.score
        );
        self.push_event(GameEvent::TilesMerged {
            consumed: [a, b],
            result,
            tier,
            pos: first.pos,
            points,
        });

        if reaches_goal(self.score, self.current_level().required_score) {
            self.end_round(Outcome::Victory);
        }

        Some(result)
    }

    /// Switch to an unlocked level and start a new round on it
    pub fn set_level(&mut self, id: LevelId) -> bool {
        if !self.progression.set_current(id) {
            return false;
        }
        log::info!("level {} selected", id);
        self.restart();
        true
    }

    /// Move to the next unlocked level and start a new round on it
    pub fn advance_to_next_level(&mut self) -> bool {
        if !self.progression.advance() {
            return false;
        }
        log::info!("advanced to level {}", self.progression.current_id());
        self.restart();
        true
    }

    /// Relock every level but the first, drop the saved progress and restart
    pub fn reset_progress(&mut self) {
        self.progression.reset_all();
        self.save_request = Some(SaveRequest::Clear);
        log::info!("progress reset");
        self.restart();
    }

    fn end_round(&mut self, outcome: Outcome) {
        if !self.phase.is_playing() {
            return;
        }
        self.phase = Phase::Ended(outcome);
        self.board.deselect();

        let level = self.progression.current_id();
        log::info!(
            "round {} on level {} ended: {} with score {}",
            self.round_id,
            level,
            self.phase.as_str(),
            self.score
        );
        self.push_event(GameEvent::RoundEnded {
            outcome,
            level,
            score: self.score,
        });

        if outcome == Outcome::Victory && self.progression.unlock_next(level) {
            let next = crate::levels::next_after(self.progression.levels(), level).map(|l| l.id);
            if let Some(next) = next {
                self.push_event(GameEvent::LevelUnlocked { level: next });
            }
            self.save_request = Some(SaveRequest::Save(self.progression.to_save_record()));
        }
    }

    fn push_event(&mut self, event: GameEvent) {
        if self.events.len() == MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Take and clear the pending events, oldest first.
    ///
    /// At most [`MAX_PENDING_EVENTS`] are retained between calls.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    /// Take the pending persistence work, if any.
    pub fn take_save_request(&mut self) -> Option<SaveRequest> {
        self.save_request.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let level = self.current_level();

        out.tiles.clear();
        out.tiles.extend(self.board.tiles().iter().copied());
        self.board.write_tier_grid(&mut out.grid);
        out.selected = self.board.selected();
        out.score = self.score;
        out.phase = self.phase;
        out.level_id = level.id;
        out.required_score = level.required_score;
        out.spawn_interval = level.spawn_interval();
        out.round_id = self.round_id;
        out.seed = self.rng.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
