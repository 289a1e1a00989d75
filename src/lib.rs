//! Tap Merge (workspace facade crate).
//!
//! This package exposes the workspace members under one roof as
//! `tap_merge::{types, core, store, engine}` while the implementation lives in
//! dedicated crates under `crates/`.

pub use tap_merge_core as core;
pub use tap_merge_engine as engine;
pub use tap_merge_store as store;
pub use tap_merge_types as types;
