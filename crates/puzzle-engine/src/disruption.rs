//! Disruption ("twist") triggering and effect application.
//!
//! # Triggering
//!
//! A [`TwistTrigger`] evaluates the configured [`TriggerPolicy`] after each
//! applied placement. The random policy draws from a `SmallRng` seeded from
//! the configuration, so a session replayed with the same seed and the same
//! intents fires the same twists.
//!
//! # Effects
//!
//! [`apply_effect`] changes the working level and the placements together.
//! An effect that clashes with existing content is skipped, never partially
//! applied.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use puzzle_types::{ActivityCategory, DisruptionId, Level, PlacedItem, TwistEffect};

use crate::config::{TriggerPolicy, TwistConfig};

/// Largest meaningful `chance_percent`.
const PERCENT: u32 = 100;

/// Evaluates the automatic trigger policy.
#[derive(Debug, Clone)]
pub struct TwistTrigger {
    /// The configured policy.
    policy: TriggerPolicy,
    /// Deterministic randomness for [`TriggerPolicy::Random`].
    rng: SmallRng,
}

impl TwistTrigger {
    /// Create a trigger from configuration.
    pub fn new(config: &TwistConfig) -> Self {
        Self {
            policy: config.trigger,
            rng: SmallRng::seed_from_u64(config.seed),
        }
    }

    /// Return the configured policy.
    pub const fn policy(&self) -> TriggerPolicy {
        self.policy
    }

    /// Decide whether a twist fires after a placement.
    ///
    /// `placements` is the number of placements applied during the current
    /// level attempt, including the one just made. The caller is responsible
    /// for the one-twist-per-attempt rule.
    pub fn poll(&mut self, level: &Level, placements: u32) -> Option<DisruptionId> {
        if level.disruption_events.is_empty() {
            return None;
        }

        match self.policy {
            TriggerPolicy::Never => None,
            TriggerPolicy::AfterPlacements { count } => {
                if placements >= count {
                    level.disruption_events.first().map(|e| e.id.clone())
                } else {
                    None
                }
            }
            TriggerPolicy::Random {
                chance_percent,
                min_placements,
            } => {
                if placements < min_placements {
                    return None;
                }
                let roll = self.rng.random_range(0..PERCENT);
                if roll >= chance_percent.min(PERCENT) {
                    return None;
                }
                let index = self.rng.random_range(0..level.disruption_events.len());
                level.disruption_events.get(index).map(|e| e.id.clone())
            }
        }
    }
}

/// What happened when an effect was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectOutcome {
    /// The working level or the placements changed.
    Applied,
    /// The effect clashed with existing content and was ignored.
    Skipped,
    /// The effect is descriptive only.
    Narrative,
}

/// Apply one effect to the working level and its placements.
pub fn apply_effect(
    level: &mut Level,
    placed: &mut Vec<PlacedItem>,
    effect: &TwistEffect,
) -> EffectOutcome {
    match effect {
        TwistEffect::AddActivity { activity } => {
            if level.activity(&activity.id).is_some() {
                return EffectOutcome::Skipped;
            }
            let mut injected = activity.clone();
            injected.category = ActivityCategory::Twist;
            level.activities.push(injected);
            EffectOutcome::Applied
        }
        TwistEffect::RemoveActivity { activity_id } => {
            if level.activity(activity_id).is_none() {
                return EffectOutcome::Skipped;
            }
            level.activities.retain(|a| &a.id != activity_id);
            placed.retain(|p| &p.activity_id != activity_id);
            EffectOutcome::Applied
        }
        TwistEffect::AddSpatialSlot { slot } => {
            if level.spatial_slot(&slot.id).is_some() {
                return EffectOutcome::Skipped;
            }
            level.spatial_slots.push(slot.clone());
            EffectOutcome::Applied
        }
        TwistEffect::RemoveSpatialSlot { slot_id } => {
            if level.spatial_slot(slot_id).is_none() {
                return EffectOutcome::Skipped;
            }
            level.spatial_slots.retain(|s| &s.id != slot_id);
            for item in placed.iter_mut() {
                if item.spatial_slot_id.as_ref() == Some(slot_id) {
                    item.spatial_slot_id = None;
                }
            }
            placed.retain(|p| !p.is_empty());
            EffectOutcome::Applied
        }
        TwistEffect::AddTimeSlot { slot } => {
            if level.time_slot(&slot.id).is_some() {
                return EffectOutcome::Skipped;
            }
            level.time_slots.push(slot.clone());
            EffectOutcome::Applied
        }
        TwistEffect::RemoveTimeSlot { slot_id } => {
            if level.time_slot(slot_id).is_none() {
                return EffectOutcome::Skipped;
            }
            level.time_slots.retain(|s| &s.id != slot_id);
            for item in placed.iter_mut() {
                if item.time_slot_id.as_ref() == Some(slot_id) {
                    item.time_slot_id = None;
                }
            }
            placed.retain(|p| !p.is_empty());
            EffectOutcome::Applied
        }
        TwistEffect::Narrative => EffectOutcome::Narrative,
    }
}
