//! Session journal entries.
//!
//! The engine appends one [`GameEvent`] per observable change. The journal is
//! in-memory only; callers drain it to drive animations, narration, or their
//! own analytics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::{ActivityId, ChoiceId, DisruptionId, EventId, SpatialSlotId, TimeSlotId};
use crate::structs::TwistEffect;

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum GameEventKind {
    /// The level briefing was left and play began.
    LevelStarted {
        /// 1-based level position.
        level: u32,
        /// Whether this restarted an already completed level.
        replay: bool,
    },
    /// An activity was placed or moved.
    ItemPlaced {
        /// The activity.
        activity: ActivityId,
        /// Spatial component after the update.
        spatial: Option<SpatialSlotId>,
        /// Time component after the update.
        time: Option<TimeSlotId>,
    },
    /// An activity was taken off the board.
    ItemRemoved {
        /// The activity.
        activity: ActivityId,
    },
    /// The click-to-place selection changed.
    SelectionChanged {
        /// The new selection.
        selected: Option<ActivityId>,
    },
    /// The level was scored.
    LevelCompleted {
        /// 1-based level position.
        level: u32,
        /// Points awarded for this completion.
        points: u64,
        /// Score after the award.
        score: u64,
        /// Whether the twist bonus was included.
        twist_bonus: bool,
    },
    /// Play moved on to the next level.
    AdvancedToLevel {
        /// 1-based level position.
        level: u32,
    },
    /// The scenario was restarted from the menu.
    ReturnedToMenu,
    /// A disruption became active.
    TwistTriggered {
        /// The disruption.
        event: DisruptionId,
    },
    /// The active twist was accepted and now awaits an adaptation choice.
    TwistAccepted {
        /// The disruption.
        event: DisruptionId,
    },
    /// The active twist was dismissed.
    TwistRejected {
        /// The disruption.
        event: DisruptionId,
    },
    /// The active twist was resolved.
    TwistResolved {
        /// The disruption.
        event: DisruptionId,
        /// The adaptation taken, if the twist offered any.
        choice: Option<ChoiceId>,
    },
    /// A twist effect changed the working level.
    EffectApplied {
        /// The effect.
        effect: TwistEffect,
    },
    /// The accessibility presentation was toggled.
    AccessibilityModeChanged {
        /// New setting.
        enabled: bool,
    },
}

/// One journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct GameEvent {
    /// Unique entry id.
    pub id: EventId,
    /// Monotonic position within the session, starting at 0.
    pub sequence: u64,
    /// Wall-clock time the change was applied.
    pub recorded_at: DateTime<Utc>,
    /// What happened.
    pub kind: GameEventKind,
}
