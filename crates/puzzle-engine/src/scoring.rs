//! Level completion scoring.
//!
//! Scoring is additive and deterministic. Completing a level awards the base
//! reward, plus the twist bonus when a twist is still active at the moment
//! of completion. There is no partial credit and no time component, so the
//! score only ever moves on completion.

use crate::config::ScoringConfig;

/// Points awarded for one completion.
pub const fn completion_points(config: &ScoringConfig, twist_active: bool) -> u64 {
    if twist_active {
        config
            .level_completion_reward
            .saturating_add(config.twist_engagement_bonus)
    } else {
        config.level_completion_reward
    }
}

/// Add points to a score without wrapping.
pub const fn award(score: u64, points: u64) -> u64 {
    score.saturating_add(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_reward_without_twist() {
        let config = ScoringConfig::default();
        assert_eq!(completion_points(&config, false), 100);
    }

    #[test]
    fn twist_adds_bonus() {
        let config = ScoringConfig::default();
        assert_eq!(completion_points(&config, true), 150);
    }

    #[test]
    fn award_saturates() {
        assert_eq!(award(u64::MAX, 100), u64::MAX);
        assert_eq!(award(250, 100), 350);
    }
}
