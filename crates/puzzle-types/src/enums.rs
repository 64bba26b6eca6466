//! Enumeration types for the placement puzzle.
//!
//! Wire names are camelCase like every other presentation-facing name
//! (`"twist"`, `"playing"`, `"slotOccupied"`), so scenario files and
//! snapshots stay readable by the presentation layer.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Activities
// ---------------------------------------------------------------------------

/// Category of an activity.
///
/// Authored activities are [`Normal`](Self::Normal). Activities injected by a
/// twist's effect are always [`Twist`](Self::Twist), which the presentation
/// layer renders with a badge.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum ActivityCategory {
    /// A regular authored activity.
    #[default]
    Normal,
    /// An activity introduced by a disruption.
    Twist,
}

/// How far an activity has been placed on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum PlacementStatus {
    /// No placement record exists.
    Unplaced,
    /// Timeline levels only: exactly one of spatial/time is set.
    Partial,
    /// The activity satisfies the level's completion rule.
    Full,
}

// ---------------------------------------------------------------------------
// Disruptions
// ---------------------------------------------------------------------------

/// Kind of a disruption event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum DisruptionType {
    /// An unexpected phone call.
    Call,
    /// Someone rings the doorbell.
    Visitor,
    /// The weather turns.
    Rain,
    /// Roads are congested.
    Traffic,
    /// An appointment is moved or added.
    Meeting,
}

// ---------------------------------------------------------------------------
// Game phases
// ---------------------------------------------------------------------------

/// Phase of the level lifecycle.
///
/// ```text
/// instructions --start--> playing --complete--> success
///      ^                     ^                     |
///      |                     +------replay---------+
///      +------------------next level---------------+
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum GamePhase {
    /// The level briefing is shown; nothing can be placed yet.
    #[default]
    Instructions,
    /// The board accepts placements.
    Playing,
    /// The level was completed and scored.
    Success,
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

/// Why an intent was rejected.
///
/// A rejected intent never mutates the game state. The presentation layer
/// treats rejections as no-ops (for example, a drop on an occupied slot just
/// snaps the card back).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum RejectionReason {
    /// The intent is not allowed in the current phase.
    WrongPhase,
    /// The activity does not exist in the current level.
    UnknownActivity,
    /// The spatial slot does not exist in the current level.
    UnknownSpatialSlot,
    /// The time slot does not exist in the current level.
    UnknownTimeSlot,
    /// A placement named neither a spatial nor a time slot.
    NoSlotGiven,
    /// A time slot was given on a level without a timeline.
    TimelineDisabled,
    /// The target slot already holds a different activity.
    SlotOccupied,
    /// The activity has no placement to remove.
    NotPlaced,
    /// The activity is already fully placed and cannot be selected.
    AlreadyPlaced,
    /// Click-to-place was used without a selected activity.
    NoSelection,
    /// The level is not complete yet.
    LevelIncomplete,
    /// The current level is the last one in the scenario.
    FinalLevel,
    /// No twist is active.
    NoActiveTwist,
    /// A twist is already active or was already triggered this attempt.
    TwistAlreadyTriggered,
    /// The disruption event does not exist in the current level.
    UnknownDisruption,
    /// The choice id is not among the active twist's adaptation choices.
    UnknownChoice,
    /// The accepted twist is waiting for an adaptation choice.
    AdaptationPending,
    /// The intent would not change anything.
    Unchanged,
}

impl RejectionReason {
    /// Short human-readable description, suitable for narration.
    pub const fn describe(self) -> &'static str {
        match self {
            Self::WrongPhase => "that is not possible right now",
            Self::UnknownActivity => "that activity is not part of this level",
            Self::UnknownSpatialSlot => "that place is not on the map",
            Self::UnknownTimeSlot => "that time is not on the timeline",
            Self::NoSlotGiven => "choose a place or a time first",
            Self::TimelineDisabled => "this level has no timeline",
            Self::SlotOccupied => "that spot is already taken",
            Self::NotPlaced => "that activity has not been placed",
            Self::AlreadyPlaced => "that activity is already placed",
            Self::NoSelection => "select an activity first",
            Self::LevelIncomplete => "some activities still need a place",
            Self::FinalLevel => "this is the last level",
            Self::NoActiveTwist => "there is nothing to respond to",
            Self::TwistAlreadyTriggered => "a surprise has already happened in this level",
            Self::UnknownDisruption => "that surprise does not belong to this level",
            Self::UnknownChoice => "that option is not available",
            Self::AdaptationPending => "choose how to adapt first",
            Self::Unchanged => "nothing changed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_word_wire_names_stay_lowercase() {
        let phase = serde_json::to_string(&GamePhase::Instructions).ok();
        assert_eq!(phase.as_deref(), Some("\"instructions\""));

        let category = serde_json::to_string(&ActivityCategory::Twist).ok();
        assert_eq!(category.as_deref(), Some("\"twist\""));

        let kind: Result<DisruptionType, _> = serde_json::from_str("\"visitor\"");
        assert_eq!(kind.ok(), Some(DisruptionType::Visitor));
    }

    #[test]
    fn rejection_reasons_use_camel_case() {
        let json = serde_json::to_string(&RejectionReason::SlotOccupied).ok();
        assert_eq!(json.as_deref(), Some("\"slotOccupied\""));
        let json = serde_json::to_string(&RejectionReason::TwistAlreadyTriggered).ok();
        assert_eq!(json.as_deref(), Some("\"twistAlreadyTriggered\""));
        let back: Result<RejectionReason, _> = serde_json::from_str("\"adaptationPending\"");
        assert!(matches!(back, Ok(RejectionReason::AdaptationPending)));
    }

    #[test]
    fn category_defaults_to_normal() {
        assert_eq!(ActivityCategory::default(), ActivityCategory::Normal);
    }
}
