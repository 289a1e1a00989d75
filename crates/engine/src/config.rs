//! Engine configuration
//!
//! Built with `Default` or from environment variables:
//!
//! - `TAP_MERGE_SEED`: RNG seed (default: random per session)
//! - `TAP_MERGE_PLACEMENT`: `retry` (default) or `exhaustive`
//! - `TAP_MERGE_SPAWN_ATTEMPTS`: random draws per spawn under `retry` (default 10)
//! - `TAP_MERGE_SAVE_DIR`: directory for saved progress (default: kept in memory)

use std::path::PathBuf;

use tap_merge_core::PlacementStrategy;
use tap_merge_store::{FileStore, KeyValueStore, MemoryStore};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngineConfig {
    pub seed: Option<u64>,
    pub placement: PlacementStrategy,
    pub save_dir: Option<PathBuf>,
}

impl EngineConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any variable source; unparsable values fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let seed = lookup("TAP_MERGE_SEED").and_then(|s| s.trim().parse().ok());

        let mut placement = lookup("TAP_MERGE_PLACEMENT")
            .and_then(|s| PlacementStrategy::from_str(&s))
            .unwrap_or_default();
        if let PlacementStrategy::BoundedRetry { attempts } = &mut placement {
            if let Some(n) = lookup("TAP_MERGE_SPAWN_ATTEMPTS").and_then(|s| s.trim().parse::<u32>().ok()) {
                *attempts = n.max(1);
            }
        }

        let save_dir = lookup("TAP_MERGE_SAVE_DIR")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        Self {
            seed,
            placement,
            save_dir,
        }
    }

    /// The store this configuration points at
    pub fn open_store(&self) -> Box<dyn KeyValueStore> {
        match &self.save_dir {
            Some(dir) => Box::new(FileStore::new(dir)),
            None => Box::new(MemoryStore::new()),
        }
    }
}
