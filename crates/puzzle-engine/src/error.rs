//! Error types for the `puzzle-engine` crate.
//!
//! Only scenario loading and validation can fail. Player intents never
//! error: they are either applied or rejected with a
//! [`RejectionReason`](puzzle_types::RejectionReason).

use puzzle_types::{ActivityId, ChoiceId, DisruptionId, SpatialSlotId, TimeSlotId};

/// Errors that can occur while loading or validating a scenario.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// Failed to read a scenario file from disk.
    #[error("failed to read scenario file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse JSON scenario content.
    #[error("failed to parse scenario JSON: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// Failed to parse YAML scenario content.
    #[error("failed to parse scenario YAML: {source}")]
    Yaml {
        /// The underlying YAML error.
        #[from]
        source: serde_yml::Error,
    },

    /// The file extension is not `.json`, `.yaml` or `.yml`.
    #[error("unsupported scenario format: {path}")]
    UnsupportedFormat {
        /// The offending path.
        path: String,
    },

    /// No built-in scenario has the requested id.
    #[error("unknown scenario: {0}")]
    UnknownScenario(String),

    /// The scenario has no levels.
    #[error("scenario {0} has no levels")]
    NoLevels(String),

    /// Two levels share an id.
    #[error("duplicate level id: {0}")]
    DuplicateLevel(u32),

    /// A level has nothing to place.
    #[error("level {0} has no activities")]
    NoActivities(u32),

    /// Two activities in a level share an id.
    #[error("level {level}: duplicate activity id {activity}")]
    DuplicateActivity {
        /// The level.
        level: u32,
        /// The repeated id.
        activity: ActivityId,
    },

    /// Two spatial slots in a level share an id.
    #[error("level {level}: duplicate spatial slot id {slot}")]
    DuplicateSpatialSlot {
        /// The level.
        level: u32,
        /// The repeated id.
        slot: SpatialSlotId,
    },

    /// Two time slots in a level share an id.
    #[error("level {level}: duplicate time slot id {slot}")]
    DuplicateTimeSlot {
        /// The level.
        level: u32,
        /// The repeated id.
        slot: TimeSlotId,
    },

    /// Two disruption events in a level share an id.
    #[error("level {level}: duplicate disruption id {event}")]
    DuplicateDisruption {
        /// The level.
        level: u32,
        /// The repeated id.
        event: DisruptionId,
    },

    /// Two adaptation choices of one twist share an id.
    #[error("level {level}: twist {event} repeats choice id {choice}")]
    DuplicateChoice {
        /// The level.
        level: u32,
        /// The twist.
        event: DisruptionId,
        /// The repeated id.
        choice: ChoiceId,
    },

    /// A timeline level has no time slots.
    #[error("level {0} enables the timeline but has no time slots")]
    MissingTimeSlots(u32),

    /// Slots are exclusive, so a level with fewer slots than activities can
    /// never be completed.
    #[error("level {level}: {activities} activities but only {slots} {kind} slots")]
    NotEnoughSlots {
        /// The level.
        level: u32,
        /// Slot kind (`spatial` or `time`).
        kind: &'static str,
        /// Number of activities.
        activities: usize,
        /// Number of slots of that kind.
        slots: usize,
    },

    /// A twist effect names a missing target or repeats an existing id.
    #[error("level {level}: twist {event}{} has an effect that does not apply", chosen(.choice.as_ref()))]
    InvalidEffect {
        /// The level.
        level: u32,
        /// The twist.
        event: DisruptionId,
        /// The adaptation choice whose effects were applied, if any.
        choice: Option<ChoiceId>,
    },

    /// Resolving a twist leaves a board that can never be completed.
    #[error("level {level}: twist {event}{} leaves the level uncompletable: {source}", chosen(.choice.as_ref()))]
    UncompletableTwist {
        /// The level.
        level: u32,
        /// The twist.
        event: DisruptionId,
        /// The adaptation choice whose effects were applied, if any.
        choice: Option<ChoiceId>,
        /// The check the resolved level fails.
        source: Box<ScenarioError>,
    },
}

/// Error message suffix naming an adaptation choice.
fn chosen(choice: Option<&ChoiceId>) -> String {
    choice.map_or_else(String::new, |c| format!(" with choice {c}"))
}
