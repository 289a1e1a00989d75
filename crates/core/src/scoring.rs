//! Scoring module - merge points and level goals
//!
//! A merge producing a tile of tier `T` is worth `T * SCORE_PER_TIER` points.
//! Two tier-1 tiles therefore score 20, two tier-2 tiles score 30, and so on.
//! A round is won as soon as the score reaches the level's required score.

use crate::types::SCORE_PER_TIER;

/// Points awarded for producing a tile of `result_tier`
pub fn merge_score(result_tier: u32) -> u32 {
    result_tier.saturating_mul(SCORE_PER_TIER)
}

/// Add merge points to a running score without overflowing
pub fn add_merge_score(score: u32, result_tier: u32) -> u32 {
    score.saturating_add(merge_score(result_tier))
}

/// Whether `score` meets the goal (inclusive)
pub fn reaches_goal(score: u32, required_score: u32) -> bool {
    score >= required_score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_score_per_tier() {
        assert_eq!(merge_score(2), 20);
        assert_eq!(merge_score(3), 30);
        assert_eq!(merge_score(11), 110);
    }

    #[test]
    fn test_merge_score_saturates() {
        assert_eq!(merge_score(u32::MAX), u32::MAX);
        assert_eq!(add_merge_score(u32::MAX - 5, 2), u32::MAX);
    }

    #[test]
    fn test_goal_is_inclusive() {
        assert!(!reaches_goal(990, 1000));
        assert!(reaches_goal(1000, 1000));
        assert!(reaches_goal(1010, 1000));
    }
}
