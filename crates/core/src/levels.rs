//! Level catalog - the fixed ladder of score goals and spawn cadences
//!
//! Ten levels, ordered by id. Each level raises the score goal by 1000 and
//! shortens the spawn interval. Only level 1 starts unlocked.
//!
//! The serialized field names (`requiredScore`, `spawnInterval`, `isUnlocked`)
//! are part of the save format and must not change.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Level identifier (1-based)
pub type LevelId = u32;

/// One rung of the level ladder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub id: LevelId,
    pub required_score: u32,
    /// Seconds between spawns while this level is being played
    #[serde(rename = "spawnInterval")]
    pub spawn_interval_secs: f64,
    pub is_unlocked: bool,
}

impl Level {
    pub const fn new(id: LevelId, required_score: u32, spawn_interval_secs: f64) -> Self {
        Self {
            id,
            required_score,
            spawn_interval_secs,
            is_unlocked: false,
        }
    }

    /// Spawn cadence as a `Duration`
    ///
    /// Intervals from a hand-edited save are clamped to
    /// `MIN_SPAWN_INTERVAL..=MAX_SPAWN_INTERVAL` so the scheduler never spins
    /// and never overflows its deadline arithmetic.
    pub fn spawn_interval(&self) -> Duration {
        if self.spawn_interval_secs.is_nan() || self.spawn_interval_secs <= 0.0 {
            return MIN_SPAWN_INTERVAL;
        }
        Duration::try_from_secs_f64(self.spawn_interval_secs)
            .unwrap_or(MAX_SPAWN_INTERVAL)
            .clamp(MIN_SPAWN_INTERVAL, MAX_SPAWN_INTERVAL)
    }
}

/// Shortest cadence the scheduler accepts
pub const MIN_SPAWN_INTERVAL: Duration = Duration::from_millis(1);

/// Longest cadence the scheduler accepts
pub const MAX_SPAWN_INTERVAL: Duration = Duration::from_secs(3600);

/// (id, required score, spawn interval in seconds)
const CATALOG: [(LevelId, u32, f64); 10] = [
    (1, 1000, 2.0),
    (2, 2000, 1.8),
    (3, 3000, 1.6),
    (4, 4000, 1.4),
    (5, 5000, 1.2),
    (6, 6000, 1.0),
    (7, 7000, 0.9),
    (8, 8000, 0.8),
    (9, 9000, 0.7),
    (10, 10000, 0.6),
];

/// Number of levels in the built-in catalog
pub const LEVEL_COUNT: usize = CATALOG.len();

/// The built-in catalog with only the first level unlocked
pub fn default_levels() -> Vec<Level> {
    CATALOG
        .iter()
        .enumerate()
        .map(|(i, &(id, required_score, interval))| Level {
            is_unlocked: i == 0,
            ..Level::new(id, required_score, interval)
        })
        .collect()
}

/// Position of `id` in catalog order
pub fn index_of(levels: &[Level], id: LevelId) -> Option<usize> {
    levels.iter().position(|level| level.id == id)
}

/// Look up a level by id
pub fn find(levels: &[Level], id: LevelId) -> Option<&Level> {
    levels.iter().find(|level| level.id == id)
}

/// The level following `id` in catalog order, if any
pub fn next_after(levels: &[Level], id: LevelId) -> Option<&Level> {
    let idx = index_of(levels, id)?;
    levels.get(idx + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_ten_ordered_levels() {
        let levels = default_levels();
        assert_eq!(levels.len(), LEVEL_COUNT);
        assert_eq!(levels.len(), 10);
        for (i, level) in levels.iter().enumerate() {
            assert_eq!(level.id, i as u32 + 1);
        }
    }

    #[test]
    fn catalog_goals_rise_and_intervals_shrink() {
        let levels = default_levels();
        for pair in levels.windows(2) {
            assert!(pair[0].required_score < pair[1].required_score);
            assert!(pair[0].spawn_interval_secs > pair[1].spawn_interval_secs);
        }
        assert!(levels.iter().all(|l| l.required_score > 0));
        assert!(levels.iter().all(|l| l.spawn_interval_secs > 0.0));
    }

    #[test]
    fn only_first_level_unlocked_by_default() {
        let levels = default_levels();
        assert!(levels[0].is_unlocked);
        assert!(levels[1..].iter().all(|l| !l.is_unlocked));
    }

    #[test]
    fn lookup_and_traversal() {
        let levels = default_levels();
        assert_eq!(find(&levels, 3).map(|l| l.required_score), Some(3000));
        assert!(find(&levels, 11).is_none());
        assert_eq!(next_after(&levels, 1).map(|l| l.id), Some(2));
        assert!(next_after(&levels, 10).is_none());
        assert!(next_after(&levels, 42).is_none());
        assert_eq!(index_of(&levels, 10), Some(9));
    }

    #[test]
    fn spawn_interval_duration() {
        let levels = default_levels();
        assert_eq!(levels[0].spawn_interval(), Duration::from_secs(2));
        assert!((levels[9].spawn_interval().as_secs_f64() - 0.6).abs() < 1e-6);

        let broken = Level::new(1, 100, -3.0);
        assert_eq!(broken.spawn_interval(), MIN_SPAWN_INTERVAL);
        let nan = Level::new(1, 100, f64::NAN);
        assert_eq!(nan.spawn_interval(), MIN_SPAWN_INTERVAL);
        let forever = Level::new(1, 100, f64::INFINITY);
        assert_eq!(forever.spawn_interval(), MAX_SPAWN_INTERVAL);
    }

    #[test]
    fn level_serializes_with_save_field_names() {
        let level = default_levels().remove(0);
        let json = serde_json::to_value(&level).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["requiredScore"], 1000);
        assert_eq!(json["spawnInterval"], 2.0);
        assert_eq!(json["isUnlocked"], true);
    }
}
