//! Mutable per-session state: placements, the game state record, and the
//! UI-state record that sits alongside it.
//!
//! None of this is persisted. A session's state lives as long as the engine
//! that owns it.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::GamePhase;
use crate::ids::{ActivityId, ScenarioId, SessionId, SpatialSlotId, TimeSlotId};
use crate::structs::{DisruptionEvent, Level};

/// Where an activity currently sits on the board.
///
/// At most one record exists per activity. Placing an already-placed
/// activity updates this record instead of creating another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct PlacedItem {
    /// The placed activity.
    pub activity_id: ActivityId,
    /// The map location, if placed spatially.
    #[serde(default)]
    pub spatial_slot_id: Option<SpatialSlotId>,
    /// The time of day, if placed on the timeline.
    #[serde(default)]
    pub time_slot_id: Option<TimeSlotId>,
}

impl PlacedItem {
    /// Whether the record still points at anything.
    pub const fn is_empty(&self) -> bool {
        self.spatial_slot_id.is_none() && self.time_slot_id.is_none()
    }
}

/// The game state record driven by the engine's intents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct GameState {
    /// 1-based position of the current level in the scenario.
    pub current_level: u32,
    /// Lifecycle phase of the current level.
    pub game_phase: GamePhase,
    /// Placements on the current level's board.
    pub placed_items: Vec<PlacedItem>,
    /// Cumulative score for the scenario run. Never decreases.
    pub score: u64,
    /// The disruption currently interrupting play, if any.
    pub active_twist: Option<DisruptionEvent>,
    /// Whether the larger-text, slower-pace presentation is on.
    pub accessibility_mode: bool,
}

impl GameState {
    /// Fresh state at the start of a scenario.
    pub const fn new(accessibility_mode: bool) -> Self {
        Self {
            current_level: 1,
            game_phase: GamePhase::Instructions,
            placed_items: Vec::new(),
            score: 0,
            active_twist: None,
            accessibility_mode,
        }
    }

    /// Find the placement record for an activity.
    pub fn placement(&self, activity: &ActivityId) -> Option<&PlacedItem> {
        self.placed_items.iter().find(|p| &p.activity_id == activity)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Session-scoped UI record kept next to [`GameState`].
///
/// Holds the click-to-place selection and whether an accepted twist is
/// waiting for the player to pick an adaptation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct UiState {
    /// Activity picked in click-to-place mode.
    pub selected_activity: Option<ActivityId>,
    /// An accepted twist is blocking on an adaptation choice.
    pub adaptation_pending: bool,
}

/// Everything the presentation layer needs to render one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct GameSnapshot {
    /// The session this snapshot belongs to.
    pub session_id: SessionId,
    /// The scenario being played.
    pub scenario_id: ScenarioId,
    /// Number of levels in the scenario.
    pub level_count: u32,
    /// The working copy of the current level, including twist effects.
    pub level: Level,
    /// The game state record.
    pub state: GameState,
    /// The UI-state record.
    pub ui: UiState,
    /// Whether every activity on the current level is fully placed.
    pub complete: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_starts_at_level_one() {
        let state = GameState::new(true);
        assert_eq!(state.current_level, 1);
        assert_eq!(state.game_phase, GamePhase::Instructions);
        assert_eq!(state.score, 0);
        assert!(state.placed_items.is_empty());
        assert!(state.active_twist.is_none());
        assert!(state.accessibility_mode);
    }

    #[test]
    fn placed_item_serializes_camel_case() {
        let item = PlacedItem {
            activity_id: ActivityId::from("walk"),
            spatial_slot_id: Some(SpatialSlotId::from("park")),
            time_slot_id: None,
        };
        let json = serde_json::to_value(&item).ok();
        assert_eq!(
            json,
            Some(serde_json::json!({
                "activityId": "walk",
                "spatialSlotId": "park",
                "timeSlotId": null
            }))
        );
        assert!(!item.is_empty());
    }
}
