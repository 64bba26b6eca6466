//! Scenario loading and validation.
//!
//! Scenarios are authored once as JSON or YAML (field names as in the
//! presentation layer, camelCase). Every scenario goes through [`validate`]
//! before an engine accepts it, so the reducer can rely on unique ids and a
//! completable board, both as authored and after any way of resolving one of
//! the level's twists.

use std::collections::BTreeSet;
use std::path::Path;

use puzzle_types::{AdaptationChoice, DisruptionEvent, Level, Scenario};

use crate::disruption::{self, EffectOutcome};
use crate::error::ScenarioError;

/// Load a scenario file, choosing the parser by extension, and validate it.
///
/// # Errors
///
/// Returns [`ScenarioError::UnsupportedFormat`] for unknown extensions,
/// an I/O or parse error, or the first validation failure.
pub fn load(path: &Path) -> Result<Scenario, ScenarioError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let contents = match extension.as_deref() {
        Some("json" | "yaml" | "yml") => std::fs::read_to_string(path)?,
        _ => {
            return Err(ScenarioError::UnsupportedFormat {
                path: path.display().to_string(),
            });
        }
    };

    if extension.as_deref() == Some("json") {
        parse_json(&contents)
    } else {
        parse_yaml(&contents)
    }
}

/// Parse and validate a JSON scenario.
///
/// # Errors
///
/// Returns [`ScenarioError::Json`] or the first validation failure.
pub fn parse_json(json: &str) -> Result<Scenario, ScenarioError> {
    let scenario: Scenario = serde_json::from_str(json)?;
    validate(&scenario)?;
    Ok(scenario)
}

/// Parse and validate a YAML scenario.
///
/// # Errors
///
/// Returns [`ScenarioError::Yaml`] or the first validation failure.
pub fn parse_yaml(yaml: &str) -> Result<Scenario, ScenarioError> {
    let scenario: Scenario = serde_yml::from_str(yaml)?;
    validate(&scenario)?;
    Ok(scenario)
}

/// Check that a scenario is playable.
///
/// # Errors
///
/// Returns the first problem found, in level order.
pub fn validate(scenario: &Scenario) -> Result<(), ScenarioError> {
    if scenario.levels.is_empty() {
        return Err(ScenarioError::NoLevels(scenario.id.to_string()));
    }

    let mut level_ids = BTreeSet::new();
    for level in &scenario.levels {
        if !level_ids.insert(level.id) {
            return Err(ScenarioError::DuplicateLevel(level.id));
        }
        validate_level(level)?;
    }
    Ok(())
}

/// Check a single level.
///
/// # Errors
///
/// Returns the first problem found.
pub fn validate_level(level: &Level) -> Result<(), ScenarioError> {
    let mut seen = BTreeSet::new();
    for activity in &level.activities {
        if !seen.insert(&activity.id) {
            return Err(ScenarioError::DuplicateActivity {
                level: level.id,
                activity: activity.id.clone(),
            });
        }
    }

    let mut seen = BTreeSet::new();
    for slot in &level.spatial_slots {
        if !seen.insert(&slot.id) {
            return Err(ScenarioError::DuplicateSpatialSlot {
                level: level.id,
                slot: slot.id.clone(),
            });
        }
    }

    let mut seen = BTreeSet::new();
    for slot in &level.time_slots {
        if !seen.insert(&slot.id) {
            return Err(ScenarioError::DuplicateTimeSlot {
                level: level.id,
                slot: slot.id.clone(),
            });
        }
    }

    check_capacity(level)?;

    let mut events = BTreeSet::new();
    for event in &level.disruption_events {
        if !events.insert(&event.id) {
            return Err(ScenarioError::DuplicateDisruption {
                level: level.id,
                event: event.id.clone(),
            });
        }
        let mut choices = BTreeSet::new();
        for choice in &event.adaptation_choices {
            if !choices.insert(&choice.id) {
                return Err(ScenarioError::DuplicateChoice {
                    level: level.id,
                    event: event.id.clone(),
                    choice: choice.id.clone(),
                });
            }
        }
        check_twist(level, event)?;
    }

    Ok(())
}

/// Slots are exclusive, so every activity needs a slot of its own.
fn check_capacity(level: &Level) -> Result<(), ScenarioError> {
    if level.activities.is_empty() {
        return Err(ScenarioError::NoActivities(level.id));
    }

    if level.activities.len() > level.spatial_slots.len() {
        return Err(ScenarioError::NotEnoughSlots {
            level: level.id,
            kind: "spatial",
            activities: level.activities.len(),
            slots: level.spatial_slots.len(),
        });
    }

    if level.enable_timeline {
        if level.time_slots.is_empty() {
            return Err(ScenarioError::MissingTimeSlots(level.id));
        }
        if level.activities.len() > level.time_slots.len() {
            return Err(ScenarioError::NotEnoughSlots {
                level: level.id,
                kind: "time",
                activities: level.activities.len(),
                slots: level.time_slots.len(),
            });
        }
    }
    Ok(())
}

/// Resolve a twist every way the player can and check each resulting board.
///
/// A twist without choices resolves by accepting it. A twist with choices
/// resolves through one of them, applying the event's effects first.
/// Rejecting a twist changes nothing, so it needs no check.
fn check_twist(level: &Level, event: &DisruptionEvent) -> Result<(), ScenarioError> {
    if event.adaptation_choices.is_empty() {
        return check_resolution(level, event, None);
    }
    for choice in &event.adaptation_choices {
        check_resolution(level, event, Some(choice))?;
    }
    Ok(())
}

fn check_resolution(
    level: &Level,
    event: &DisruptionEvent,
    choice: Option<&AdaptationChoice>,
) -> Result<(), ScenarioError> {
    let choice_id = choice.map(|c| c.id.clone());
    let mut working = level.clone();
    let mut placed = Vec::new();

    let choice_effects = choice.map(|c| c.effects.as_slice()).unwrap_or_default();
    for effect in event.effects.iter().chain(choice_effects) {
        if disruption::apply_effect(&mut working, &mut placed, effect) == EffectOutcome::Skipped {
            return Err(ScenarioError::InvalidEffect {
                level: level.id,
                event: event.id.clone(),
                choice: choice_id,
            });
        }
    }

    check_capacity(&working).map_err(|source| ScenarioError::UncompletableTwist {
        level: level.id,
        event: event.id.clone(),
        choice: choice_id,
        source: Box::new(source),
    })
}
