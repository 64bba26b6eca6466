//! Player intents: the only way the presentation layer changes game state.
//!
//! Each variant maps to one engine operation. The engine answers with an
//! [`IntentResult`]: `Ok(())` when the intent was applied, or the
//! [`RejectionReason`] explaining why it was ignored.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::RejectionReason;
use crate::ids::{ActivityId, ChoiceId, DisruptionId, SpatialSlotId, TimeSlotId};

/// Outcome of applying an intent.
pub type IntentResult = Result<(), RejectionReason>;

/// A discrete user action (click, drag-drop release, button press).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "intent", rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum Intent {
    /// Drop an activity onto a place, a time, or both.
    PlaceItem {
        /// The activity being placed.
        #[serde(rename = "activityId")]
        activity_id: ActivityId,
        /// Target map location.
        #[serde(default, rename = "spatialSlotId")]
        spatial_slot_id: Option<SpatialSlotId>,
        /// Target time of day.
        #[serde(default, rename = "timeSlotId")]
        time_slot_id: Option<TimeSlotId>,
    },
    /// Take an activity off the board (place and time together).
    RemoveItem {
        /// The activity being removed.
        #[serde(rename = "activityId")]
        activity_id: ActivityId,
    },
    /// Pick an activity for click-to-place.
    SelectActivity {
        /// The activity being selected.
        #[serde(rename = "activityId")]
        activity_id: ActivityId,
    },
    /// Drop the click-to-place selection.
    ClearSelection,
    /// Place the selected activity, then clear the selection.
    PlaceSelected {
        /// Target map location.
        #[serde(default, rename = "spatialSlotId")]
        spatial_slot_id: Option<SpatialSlotId>,
        /// Target time of day.
        #[serde(default, rename = "timeSlotId")]
        time_slot_id: Option<TimeSlotId>,
    },
    /// Leave the briefing (or replay a completed level).
    StartLevel,
    /// Score a fully placed level.
    CompleteLevel,
    /// Advance to the next level of the scenario.
    NextLevel,
    /// Restart the scenario from level 1 with a zero score.
    BackToMenu,
    /// Fire a specific twist from the level's pool.
    TriggerTwist {
        /// The disruption to activate.
        #[serde(rename = "eventId")]
        event_id: DisruptionId,
    },
    /// Accept the active twist.
    AcceptTwist,
    /// Dismiss the active twist without any effect.
    RejectTwist,
    /// Resolve the active twist with one of its adaptation choices.
    ChooseAdaptation {
        /// The chosen response.
        #[serde(rename = "choiceId")]
        choice_id: ChoiceId,
    },
    /// Switch the accessibility presentation on or off.
    SetAccessibilityMode {
        /// New setting.
        enabled: bool,
    },
}

impl Intent {
    /// Stable short name used in logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PlaceItem { .. } => "place_item",
            Self::RemoveItem { .. } => "remove_item",
            Self::SelectActivity { .. } => "select_activity",
            Self::ClearSelection => "clear_selection",
            Self::PlaceSelected { .. } => "place_selected",
            Self::StartLevel => "start_level",
            Self::CompleteLevel => "complete_level",
            Self::NextLevel => "next_level",
            Self::BackToMenu => "back_to_menu",
            Self::TriggerTwist { .. } => "trigger_twist",
            Self::AcceptTwist => "accept_twist",
            Self::RejectTwist => "reject_twist",
            Self::ChooseAdaptation { .. } => "choose_adaptation",
            Self::SetAccessibilityMode { .. } => "set_accessibility_mode",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_item_parses_with_optional_slots() {
        let json = r#"{ "intent": "placeItem", "activityId": "coffee", "timeSlotId": "morning" }"#;
        let intent: Result<Intent, _> = serde_json::from_str(json);
        assert_eq!(
            intent.ok(),
            Some(Intent::PlaceItem {
                activity_id: ActivityId::from("coffee"),
                spatial_slot_id: None,
                time_slot_id: Some(TimeSlotId::from("morning")),
            })
        );
    }

    #[test]
    fn unit_intents_parse_from_tag_only() {
        let intent: Result<Intent, _> = serde_json::from_str(r#"{ "intent": "rejectTwist" }"#);
        assert_eq!(intent.ok(), Some(Intent::RejectTwist));
    }

    #[test]
    fn names_are_snake_case() {
        assert_eq!(Intent::BackToMenu.name(), "back_to_menu");
        assert_eq!(
            Intent::ChooseAdaptation {
                choice_id: ChoiceId::from("later")
            }
            .name(),
            "choose_adaptation"
        );
    }
}
