//! Game session - the handle a presentation layer holds
//!
//! A `Session` owns one game, its progress store and its spawn scheduler behind
//! a single mutex. Scheduler ticks and player operations each hold the lock for
//! their whole read-modify-write, so a spawn can never land in the middle of a
//! merge. Nothing awaits while the lock is held.
//!
//! After every mutation the session:
//!
//! 1. executes pending persistence work (save on unlock, clear on progress reset),
//! 2. stops the scheduler if the round ended,
//! 3. publishes a fresh [`GameSnapshot`] to subscribers.

use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::runtime::Handle;
use tokio::sync::watch;

use tap_merge_core::{
    GameEvent, GameSnapshot, GameState, Level, LevelId, Progression, SpawnResult, SpawnRng,
    TapResult,
};
use tap_merge_store::{progress, KeyValueStore};

use crate::config::EngineConfig;
use crate::scheduler::SpawnScheduler;
use crate::types::{GridPos, TileId};

struct Inner {
    game: GameState,
    store: Box<dyn KeyValueStore>,
    scheduler: SpawnScheduler,
    /// Bumped whenever the spawn task is replaced or stopped. A tick that was
    /// already waiting on the lock compares it before spawning.
    spawn_generation: u64,
    updates: watch::Sender<GameSnapshot>,
}

impl Inner {
    /// Persist, halt the scheduler if needed and notify observers
    fn stop_spawning(&mut self) {
        self.spawn_generation = self.spawn_generation.wrapping_add(1);
        self.scheduler.stop();
    }

    fn settle(&mut self) {
        if let Some(request) = self.game.take_save_request() {
            progress::apply(&mut *self.store, &request);
        }
        if !self.game.phase().is_playing() {
            self.stop_spawning();
        }
        self.updates.send_replace(self.game.snapshot());
    }
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One scheduler tick
///
/// Aborting the task does not cancel a tick that is already blocked on the
/// lock, so a tick from a replaced or stopped task ends without spawning.
fn spawn_tick(shared: &Weak<Mutex<Inner>>, generation: u64) -> ControlFlow<()> {
    let Some(shared) = shared.upgrade() else {
        return ControlFlow::Break(());
    };
    let mut inner = lock(&shared);
    if inner.spawn_generation != generation {
        log::debug!("dropping tick from a replaced spawn task");
        return ControlFlow::Break(());
    }

    let result = inner.game.spawn_random_tile();
    inner.settle();
    match result {
        SpawnResult::Placed(_) => ControlFlow::Continue(()),
        SpawnResult::Defeat | SpawnResult::Skipped => ControlFlow::Break(()),
    }
}

/// One running game
#[derive(Clone)]
pub struct Session {
    inner: Arc<Mutex<Inner>>,
    runtime: Handle,
}

impl Session {
    /// Load progress from `store`, start round one on the current level and
    /// begin spawning. Must be called from within a tokio runtime.
    pub fn start(config: &EngineConfig, store: Box<dyn KeyValueStore>) -> Result<Self> {
        let progression = Progression::restore(progress::load_progress(&*store));
        let seed = config.seed.unwrap_or_else(|| SpawnRng::from_entropy().seed());

        let mut game =
            GameState::with_progression(seed, progression).with_placement(config.placement);
        game.restart();

        log::info!(
            "session started (seed {}, placement {}, level {})",
            seed,
            config.placement.as_str(),
            game.current_level().id
        );
        Self::resume(game, store)
    }

    /// [`Session::start`] with the store named by `config`
    pub fn with_config(config: &EngineConfig) -> Result<Self> {
        Self::start(config, config.open_store())
    }

    /// Configure from the environment and start
    pub fn start_from_env() -> Result<Self> {
        Self::with_config(&EngineConfig::from_env())
    }

    /// Adopt an existing game as-is; spawning resumes if the round is live
    pub fn resume(game: GameState, store: Box<dyn KeyValueStore>) -> Result<Self> {
        let runtime = Handle::try_current().context("a game session needs a tokio runtime")?;
        let (updates, _) = watch::channel(game.snapshot());

        let session = Self {
            inner: Arc::new(Mutex::new(Inner {
                game,
                store,
                scheduler: SpawnScheduler::new(),
                spawn_generation: 0,
                updates,
            })),
            runtime,
        };

        {
            let mut inner = lock(&session.inner);
            session.restart_spawner(&mut inner);
            inner.settle();
        }
        Ok(session)
    }

    fn restart_spawner(&self, inner: &mut Inner) {
        inner.stop_spawning();
        if !inner.game.phase().is_playing() {
            return;
        }

        let period = inner.game.current_level().spawn_interval();
        let generation = inner.spawn_generation;
        let weak: Weak<Mutex<Inner>> = Arc::downgrade(&self.inner);
        inner
            .scheduler
            .start(&self.runtime, period, move || spawn_tick(&weak, generation));
    }

    /// Run a player operation under the lock, then settle
    fn mutate<R>(&self, op: impl FnOnce(&mut GameState) -> R) -> R {
        let mut inner = lock(&self.inner);
        let result = op(&mut inner.game);
        inner.settle();
        result
    }

    /// Run a round-restarting operation, then restart the scheduler when it changed anything
    fn mutate_round(&self, op: impl FnOnce(&mut GameState) -> bool) -> bool {
        let mut inner = lock(&self.inner);
        let changed = op(&mut inner.game);
        if changed {
            self.restart_spawner(&mut inner);
        }
        inner.settle();
        changed
    }

    pub fn snapshot(&self) -> GameSnapshot {
        lock(&self.inner).game.snapshot()
    }

    /// Receive a new snapshot after every change
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        lock(&self.inner).updates.subscribe()
    }

    /// Take the events produced since the last call
    pub fn take_events(&self) -> Vec<GameEvent> {
        lock(&self.inner).game.take_events()
    }

    pub fn levels(&self) -> Vec<Level> {
        lock(&self.inner).game.levels().to_vec()
    }

    pub fn current_level(&self) -> Level {
        lock(&self.inner).game.current_level().clone()
    }

    /// Whether the spawn task is alive
    pub fn is_spawning(&self) -> bool {
        lock(&self.inner).scheduler.is_running()
    }

    /// Cadence of the most recently started spawn task
    pub fn spawn_interval(&self) -> Option<Duration> {
        lock(&self.inner).scheduler.period()
    }

    pub fn tap(&self, id: TileId) -> TapResult {
        self.mutate(|game| game.tap(id))
    }

    pub fn select(&self, id: TileId) -> bool {
        self.mutate(|game| game.select(id))
    }

    pub fn deselect(&self) {
        self.mutate(|game| game.deselect())
    }

    pub fn attempt_merge(&self, a: TileId, b: TileId) -> Option<TileId> {
        self.mutate(|game| game.attempt_merge(a, b))
    }

    /// Place a tile at a specific cell (scripted setups, tutorials)
    pub fn place_tile(&self, tier: u32, pos: GridPos) -> Option<TileId> {
        self.mutate(|game| game.place_tile(tier, pos))
    }

    /// Start a new round on the current level
    pub fn restart(&self) {
        self.mutate_round(|game| {
            game.restart();
            true
        });
    }

    /// Empty the board and zero the score without spawning initial tiles
    pub fn reset(&self) {
        self.mutate_round(|game| {
            game.reset();
            true
        });
    }

    /// Switch to an unlocked level; locked or unknown ids are ignored
    pub fn set_level(&self, id: LevelId) -> bool {
        self.mutate_round(|game| game.set_level(id))
    }

    pub fn advance_to_next_level(&self) -> bool {
        self.mutate_round(|game| game.advance_to_next_level())
    }

    /// Relock every level but the first, clear saved progress and restart
    pub fn reset_progress(&self) {
        self.mutate_round(|game| {
            game.reset_progress();
            true
        });
    }

    /// Stop spawning (view teardown). Idempotent.
    pub fn stop(&self) {
        lock(&self.inner).stop_spawning();
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = lock(&self.inner);
        f.debug_struct("Session")
            .field("round_id", &inner.game.round_id())
            .field("phase", &inner.game.phase())
            .field("spawning", &inner.scheduler.is_running())
            .finish()
    }
}
