//! Engine module - timing and session plumbing around the pure game core
//!
//! The core rules never read a clock. This crate adds the two things a live
//! game needs on top of them:
//!
//! - [`scheduler`]: a cancellable tokio task that fires once per spawn interval
//! - [`session`]: the [`Session`] handle that serializes scheduler ticks with
//!   player operations, persists progress and publishes snapshots
//!
//! # Lifecycle
//!
//! 1. [`Session::start`] restores saved progress, starts round one on the first
//!    unlocked level and begins spawning.
//! 2. The presentation layer polls [`Session::snapshot`] or watches
//!    [`Session::subscribe`], and forwards taps with [`Session::tap`].
//! 3. When a round ends the scheduler halts; [`Session::restart`],
//!    [`Session::set_level`] or [`Session::advance_to_next_level`] start the
//!    next one with that level's cadence.
//!
//! # Example
//!
//! ```no_run
//! use tap_merge_engine::{EngineConfig, Session};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let session = Session::with_config(&EngineConfig::default())?;
//! let mut updates = session.subscribe();
//! while updates.changed().await.is_ok() {
//!     let snapshot = updates.borrow_and_update().clone();
//!     if !snapshot.playable() {
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod scheduler;
pub mod session;

pub use tap_merge_core as core;
pub use tap_merge_store as store;
pub use tap_merge_types as types;

pub use config::EngineConfig;
pub use scheduler::SpawnScheduler;
pub use session::Session;
