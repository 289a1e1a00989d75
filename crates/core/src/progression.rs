//! Progression module - level unlocks, current level and the save record
//!
//! `Progression` owns the working copy of the level catalog. It is pure state:
//! it decides *what* must be persisted (a [`SaveRecord`]) while the storage
//! crate decides *how*. A record whose version differs from
//! [`SAVE_FORMAT_VERSION`] is treated exactly like a missing one.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::levels::{self, default_levels, Level, LevelId};
use crate::types::SAVE_FORMAT_VERSION;

/// Versioned snapshot of the level catalog and its unlock flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    #[serde(rename = "version")]
    pub format_version: String,
    pub levels: Vec<Level>,
}

impl SaveRecord {
    /// Record tagged with the current format version
    pub fn new(levels: Vec<Level>) -> Self {
        Self {
            format_version: SAVE_FORMAT_VERSION.to_string(),
            levels,
        }
    }

    /// Whether this record can be restored by this engine
    pub fn is_current(&self) -> bool {
        self.format_version == SAVE_FORMAT_VERSION && !self.levels.is_empty()
    }

    /// Whether the levels are usable: non-empty, unique ids, non-zero goals
    pub fn is_well_formed(&self) -> bool {
        let mut ids = HashSet::with_capacity(self.levels.len());
        !self.levels.is_empty()
            && self
                .levels
                .iter()
                .all(|level| level.required_score > 0 && ids.insert(level.id))
    }

    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}

/// Level ladder plus the level being played
#[derive(Debug, Clone, PartialEq)]
pub struct Progression {
    levels: Vec<Level>,
    /// Index into `levels`; always valid because `levels` is never empty
    current: usize,
}

impl Progression {
    /// Built-in catalog, level 1 current
    pub fn new() -> Self {
        Self {
            levels: default_levels(),
            current: 0,
        }
    }

    /// Load-or-default
    ///
    /// A missing, outdated or malformed record yields [`Progression::new`]. Otherwise
    /// the stored catalog is used and the current level is the first unlocked
    /// one in catalog order (falling back to the first entry).
    pub fn restore(record: Option<SaveRecord>) -> Self {
        let Some(record) = record else {
            return Self::new();
        };

        if !record.is_current() {
            log::info!(
                "ignoring save record with version {:?} (expected {:?})",
                record.format_version,
                SAVE_FORMAT_VERSION
            );
            return Self::new();
        }
        if !record.is_well_formed() {
            log::warn!("ignoring malformed save record ({} levels)", record.levels.len());
            return Self::new();
        }

        let current = record
            .levels
            .iter()
            .position(|level| level.is_unlocked)
            .unwrap_or(0);

        Self {
            levels: record.levels,
            current,
        }
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn current(&self) -> &Level {
        &self.levels[self.current]
    }

    pub fn current_id(&self) -> LevelId {
        self.current().id
    }

    pub fn is_unlocked(&self, id: LevelId) -> bool {
        levels::find(&self.levels, id).is_some_and(|level| level.is_unlocked)
    }

    /// Unlock the level after `current_id`
    ///
    /// Returns `true` when a successor exists, meaning the catalog must be
    /// persisted. The last level has no successor and leaves the catalog as is.
    pub fn unlock_next(&mut self, current_id: LevelId) -> bool {
        let Some(idx) = levels::index_of(&self.levels, current_id) else {
            return false;
        };
        let Some(next) = self.levels.get_mut(idx + 1) else {
            return false;
        };

        if !next.is_unlocked {
            log::info!("level {} unlocked", next.id);
        }
        next.is_unlocked = true;
        true
    }

    /// Make `id` the current level. Locked or unknown levels are ignored.
    pub fn set_current(&mut self, id: LevelId) -> bool {
        match levels::index_of(&self.levels, id) {
            Some(idx) if self.levels[idx].is_unlocked => {
                self.current = idx;
                true
            }
            _ => false,
        }
    }

    /// Move to the next level if it exists and is unlocked
    pub fn advance(&mut self) -> bool {
        match self.levels.get(self.current + 1) {
            Some(next) if next.is_unlocked => {
                self.current += 1;
                true
            }
            _ => false,
        }
    }

    /// Lock everything but the first level and make it current
    pub fn reset_all(&mut self) {
        for (i, level) in self.levels.iter_mut().enumerate() {
            level.is_unlocked = i == 0;
        }
        self.current = 0;
    }

    pub fn to_save_record(&self) -> SaveRecord {
        SaveRecord::new(self.levels.clone())
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_progression_starts_at_level_one() {
        let p = Progression::new();
        assert_eq!(p.current_id(), 1);
        assert_eq!(p.levels().len(), 10);
        assert!(p.is_unlocked(1));
        assert!(!p.is_unlocked(2));
    }

    #[test]
    fn test_unlock_next() {
        let mut p = Progression::new();
        assert!(p.unlock_next(1));
        assert!(p.is_unlocked(2));
        assert!(!p.is_unlocked(3));
    }

    #[test]
    fn test_unlock_after_last_level_changes_nothing() {
        let mut p = Progression::new();
        let before = p.clone();
        assert!(!p.unlock_next(10));
        assert!(!p.unlock_next(77));
        assert_eq!(p, before);
    }

    #[test]
    fn test_set_current_requires_unlock() {
        let mut p = Progression::new();
        assert!(!p.set_current(3));
        assert_eq!(p.current_id(), 1);

        p.unlock_next(2);
        assert!(p.set_current(3));
        assert_eq!(p.current_id(), 3);
        assert!(!p.set_current(99));
    }

    #[test]
    fn test_advance() {
        let mut p = Progression::new();
        assert!(!p.advance());
        p.unlock_next(1);
        assert!(p.advance());
        assert_eq!(p.current_id(), 2);
    }

    #[test]
    fn test_advance_on_last_level_is_noop() {
        let mut levels = default_levels();
        for level in &mut levels {
            level.is_unlocked = true;
        }
        let mut p = Progression::restore(Some(SaveRecord::new(levels)));
        assert!(p.set_current(10));
        assert!(!p.advance());
        assert_eq!(p.current_id(), 10);
    }

    #[test]
    fn test_reset_all() {
        let mut p = Progression::new();
        for id in 1..10 {
            p.unlock_next(id);
        }
        p.set_current(7);

        p.reset_all();
        assert_eq!(p, Progression::new());
    }

    #[test]
    fn test_restore_picks_first_unlocked_level() {
        let mut levels = default_levels();
        levels[0].is_unlocked = false;
        levels[3].is_unlocked = true;
        levels[5].is_unlocked = true;

        let p = Progression::restore(Some(SaveRecord::new(levels)));
        assert_eq!(p.current_id(), 4);
    }

    #[test]
    fn test_restore_falls_back_to_first_entry() {
        let mut levels = default_levels();
        for level in &mut levels {
            level.is_unlocked = false;
        }
        let p = Progression::restore(Some(SaveRecord::new(levels)));
        assert_eq!(p.current_id(), 1);
    }

    #[test]
    fn test_restore_version_mismatch_equals_default() {
        let mut levels = default_levels();
        levels[4].is_unlocked = true;
        let record = SaveRecord {
            format_version: "0.9".to_string(),
            levels,
        };

        assert_eq!(Progression::restore(Some(record)), Progression::restore(None));
    }

    #[test]
    fn test_restore_empty_record_equals_default() {
        let record = SaveRecord::new(Vec::new());
        assert_eq!(Progression::restore(Some(record)), Progression::new());
    }

    #[test]
    fn test_restore_rejects_zero_goal() {
        let mut levels = default_levels();
        levels[0].required_score = 0;
        let record = SaveRecord::new(levels);

        assert!(!record.is_well_formed());
        assert_eq!(Progression::restore(Some(record)), Progression::new());
    }

    #[test]
    fn test_restore_rejects_duplicate_ids() {
        let mut levels = default_levels();
        levels[3].id = 2;
        levels[3].is_unlocked = true;
        let record = SaveRecord::new(levels);

        assert!(!record.is_well_formed());
        assert_eq!(Progression::restore(Some(record)), Progression::new());
    }

    #[test]
    fn test_default_catalog_is_well_formed() {
        assert!(Progression::new().to_save_record().is_well_formed());
    }

    #[test]
    fn test_save_record_json_shape() {
        let mut p = Progression::new();
        p.unlock_next(1);
        let bytes = p.to_save_record().to_json().unwrap();

        let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v["version"], "1.0");
        assert_eq!(v["levels"].as_array().map(|a| a.len()), Some(10));
        assert_eq!(v["levels"][1]["isUnlocked"], true);

        let back = SaveRecord::from_json(&bytes).unwrap();
        assert_eq!(Progression::restore(Some(back)), p);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(SaveRecord::from_json(b"not json").is_err());
        assert!(SaveRecord::from_json(br#"{"version":"1.0"}"#).is_err());
    }
}
