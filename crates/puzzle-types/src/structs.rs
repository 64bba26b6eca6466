//! Authored scenario content: scenarios, levels, activities, slots, twists.
//!
//! Everything in this module is immutable configuration. The engine clones a
//! [`Level`] into a per-attempt working copy before any twist effect touches
//! it, so the authored [`Scenario`] is never modified during play.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ActivityCategory, DisruptionType};
use crate::ids::{ActivityId, ChoiceId, DisruptionId, ScenarioId, SpatialSlotId, TimeSlotId};

// ---------------------------------------------------------------------------
// Placeable units and targets
// ---------------------------------------------------------------------------

/// A task or errand the player positions into slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Activity {
    /// Identifier, unique within the level.
    pub id: ActivityId,
    /// Display name ("Have breakfast").
    pub name: String,
    /// Emoji or icon key shown on the card.
    #[serde(default)]
    pub icon: String,
    /// Whether this is an authored activity or one injected by a twist.
    #[serde(default)]
    pub category: ActivityCategory,
}

/// A location placeholder on the spatial map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SpatialSlot {
    /// Identifier, unique within the level.
    pub id: SpatialSlotId,
    /// Display label ("Kitchen").
    pub label: String,
    /// Emoji or icon key.
    #[serde(default)]
    pub icon: String,
    /// Horizontal map position (percent of map width).
    #[serde(default)]
    pub x: i32,
    /// Vertical map position (percent of map height).
    #[serde(default)]
    pub y: i32,
}

/// A time-of-day placeholder on the timeline.
///
/// Time slots are ordered by their position in [`Level::time_slots`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TimeSlot {
    /// Identifier, unique within the level.
    pub id: TimeSlotId,
    /// Display label ("Morning").
    pub label: String,
    /// Emoji or icon key.
    #[serde(default)]
    pub icon: String,
}

// ---------------------------------------------------------------------------
// Twists
// ---------------------------------------------------------------------------

/// A structural change a twist or an adaptation choice applies to the
/// working level.
///
/// Effects that would clash with existing content (adding an id that already
/// exists, removing one that does not) are skipped rather than failing, so
/// applying an effect can never leave the board inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum TwistEffect {
    /// Inject a new activity. Its category is forced to `twist`.
    AddActivity {
        /// The activity to add.
        activity: Activity,
    },
    /// Remove an activity together with its placement.
    RemoveActivity {
        /// The activity to remove.
        #[serde(rename = "activityId")]
        activity_id: ActivityId,
    },
    /// Add a location to the map.
    AddSpatialSlot {
        /// The slot to add.
        slot: SpatialSlot,
    },
    /// Remove a location; placements there lose their spatial component.
    RemoveSpatialSlot {
        /// The slot to remove.
        #[serde(rename = "slotId")]
        slot_id: SpatialSlotId,
    },
    /// Add a time to the timeline (appended at the end).
    AddTimeSlot {
        /// The slot to add.
        slot: TimeSlot,
    },
    /// Remove a time; placements there lose their time component.
    RemoveTimeSlot {
        /// The slot to remove.
        #[serde(rename = "slotId")]
        slot_id: TimeSlotId,
    },
    /// Purely descriptive; the board is unchanged.
    Narrative,
}

/// A predefined response to a twist. Selecting one resolves the twist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct AdaptationChoice {
    /// Identifier, unique within the twist.
    pub id: ChoiceId,
    /// What the player decides to do ("Call back after lunch").
    pub description: String,
    /// Free-text consequence shown to the player.
    #[serde(default)]
    pub effect_text: Option<String>,
    /// Structural changes applied when this choice is taken.
    #[serde(default)]
    pub effects: Vec<TwistEffect>,
}

/// A scripted interruption ("twist") within a level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct DisruptionEvent {
    /// Identifier, unique within the level.
    pub id: DisruptionId,
    /// Kind of interruption.
    #[serde(rename = "type")]
    pub kind: DisruptionType,
    /// What happens ("Your daughter calls to visit this afternoon").
    pub description: String,
    /// Free-text consequence shown to the player.
    #[serde(default)]
    pub effect_text: Option<String>,
    /// Structural changes applied when the twist is accepted.
    #[serde(default)]
    pub effects: Vec<TwistEffect>,
    /// Responses offered on acceptance. Empty means accept resolves
    /// the twist directly.
    #[serde(default)]
    pub adaptation_choices: Vec<AdaptationChoice>,
}

impl DisruptionEvent {
    /// Look up an adaptation choice by id.
    pub fn choice(&self, id: &ChoiceId) -> Option<&AdaptationChoice> {
        self.adaptation_choices.iter().find(|c| &c.id == id)
    }

    /// Whether the twist requires the player to pick an adaptation.
    pub fn requires_choice(&self) -> bool {
        !self.adaptation_choices.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Levels and scenarios
// ---------------------------------------------------------------------------

/// One playable puzzle instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Level {
    /// Authored level number.
    pub id: u32,
    /// Display name ("Morning routine").
    pub name: String,
    /// Briefing shown in the instructions phase.
    #[serde(default)]
    pub description: String,
    /// Activities that must all be placed to complete the level.
    pub activities: Vec<Activity>,
    /// Locations on the map.
    pub spatial_slots: Vec<SpatialSlot>,
    /// Ordered times of day. Empty on spatial-only levels.
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
    /// Whether activities need a time as well as a place.
    #[serde(default)]
    pub enable_timeline: bool,
    /// Twist pool for this level.
    #[serde(default)]
    pub disruption_events: Vec<DisruptionEvent>,
}

impl Level {
    /// Look up an activity by id.
    pub fn activity(&self, id: &ActivityId) -> Option<&Activity> {
        self.activities.iter().find(|a| &a.id == id)
    }

    /// Look up a spatial slot by id.
    pub fn spatial_slot(&self, id: &SpatialSlotId) -> Option<&SpatialSlot> {
        self.spatial_slots.iter().find(|s| &s.id == id)
    }

    /// Look up a time slot by id.
    pub fn time_slot(&self, id: &TimeSlotId) -> Option<&TimeSlot> {
        self.time_slots.iter().find(|s| &s.id == id)
    }

    /// Look up a disruption event by id.
    pub fn disruption(&self, id: &DisruptionId) -> Option<&DisruptionEvent> {
        self.disruption_events.iter().find(|d| &d.id == id)
    }
}

/// A named set of levels sharing a theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Scenario {
    /// Identifier ("home", "city").
    pub id: ScenarioId,
    /// Display name ("A day at home").
    pub name: String,
    /// Levels in play order. Level 1 is the first entry.
    pub levels: Vec<Level>,
}

impl Scenario {
    /// Return the level at a 1-based position, if it exists.
    pub fn level(&self, number: u32) -> Option<&Level> {
        let index = usize::try_from(number.checked_sub(1)?).ok()?;
        self.levels.get(index)
    }

    /// Number of levels in the scenario.
    pub fn level_count(&self) -> u32 {
        u32::try_from(self.levels.len()).unwrap_or(u32::MAX)
    }
}
