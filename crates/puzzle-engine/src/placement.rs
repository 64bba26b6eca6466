//! Placement rules for the puzzle board.
//!
//! The board is the working [`Level`] plus the list of [`PlacedItem`]
//! records. These functions are pure over those two values; the engine
//! owns sequencing, phase checks and the journal.
//!
//! # Invariants
//!
//! - At most one record per activity. Placing again updates the record.
//! - Each slot holds at most one activity. A drop on a slot held by a
//!   different activity is rejected.
//! - A record always points at a spatial slot, a time slot, or both.

use puzzle_types::{
    ActivityId, Level, PlacedItem, PlacementStatus, RejectionReason, SpatialSlotId, TimeSlotId,
};

/// Placement status of one activity under the level's completion rule.
///
/// Spatial-only levels need a spatial slot. Timeline levels need both a
/// spatial and a time slot; one of the two counts as partial.
pub fn status(level: &Level, placed: &[PlacedItem], activity: &ActivityId) -> PlacementStatus {
    let Some(item) = placed.iter().find(|p| &p.activity_id == activity) else {
        return PlacementStatus::Unplaced;
    };

    let spatial = item.spatial_slot_id.is_some();
    let time = item.time_slot_id.is_some();

    if level.enable_timeline {
        match (spatial, time) {
            (true, true) => PlacementStatus::Full,
            (false, false) => PlacementStatus::Unplaced,
            _ => PlacementStatus::Partial,
        }
    } else if spatial {
        PlacementStatus::Full
    } else {
        PlacementStatus::Unplaced
    }
}

/// Whether every activity of the level is fully placed.
pub fn is_complete(level: &Level, placed: &[PlacedItem]) -> bool {
    level
        .activities
        .iter()
        .all(|a| status(level, placed, &a.id) == PlacementStatus::Full)
}

/// Count of fully placed activities.
pub fn fully_placed_count(level: &Level, placed: &[PlacedItem]) -> usize {
    level
        .activities
        .iter()
        .filter(|a| status(level, placed, &a.id) == PlacementStatus::Full)
        .count()
}

/// The activity currently occupying a spatial slot.
pub fn spatial_occupant<'a>(placed: &'a [PlacedItem], slot: &SpatialSlotId) -> Option<&'a ActivityId> {
    placed
        .iter()
        .find(|p| p.spatial_slot_id.as_ref() == Some(slot))
        .map(|p| &p.activity_id)
}

/// The activity currently occupying a time slot.
pub fn time_occupant<'a>(placed: &'a [PlacedItem], slot: &TimeSlotId) -> Option<&'a ActivityId> {
    placed
        .iter()
        .find(|p| p.time_slot_id.as_ref() == Some(slot))
        .map(|p| &p.activity_id)
}

/// Check a placement against the board without changing anything.
///
/// # Errors
///
/// - [`RejectionReason::NoSlotGiven`] when both slots are `None`
/// - [`RejectionReason::UnknownActivity`] for an activity not in the level
/// - [`RejectionReason::UnknownSpatialSlot`] / [`RejectionReason::UnknownTimeSlot`]
/// - [`RejectionReason::TimelineDisabled`] for a time slot on a spatial-only level
/// - [`RejectionReason::SlotOccupied`] when a different activity holds a target slot
/// - [`RejectionReason::Unchanged`] when the activity already sits exactly there
pub fn validate(
    level: &Level,
    placed: &[PlacedItem],
    activity: &ActivityId,
    spatial: Option<&SpatialSlotId>,
    time: Option<&TimeSlotId>,
) -> Result<(), RejectionReason> {
    if spatial.is_none() && time.is_none() {
        return Err(RejectionReason::NoSlotGiven);
    }

    if level.activity(activity).is_none() {
        return Err(RejectionReason::UnknownActivity);
    }

    if let Some(slot) = spatial {
        if level.spatial_slot(slot).is_none() {
            return Err(RejectionReason::UnknownSpatialSlot);
        }
        if spatial_occupant(placed, slot).is_some_and(|holder| holder != activity) {
            return Err(RejectionReason::SlotOccupied);
        }
    }

    if let Some(slot) = time {
        if !level.enable_timeline {
            return Err(RejectionReason::TimelineDisabled);
        }
        if level.time_slot(slot).is_none() {
            return Err(RejectionReason::UnknownTimeSlot);
        }
        if time_occupant(placed, slot).is_some_and(|holder| holder != activity) {
            return Err(RejectionReason::SlotOccupied);
        }
    }

    let existing = placed.iter().find(|p| &p.activity_id == activity);
    if let Some(item) = existing {
        let spatial_same = spatial.is_none_or(|s| item.spatial_slot_id.as_ref() == Some(s));
        let time_same = time.is_none_or(|t| item.time_slot_id.as_ref() == Some(t));
        if spatial_same && time_same {
            return Err(RejectionReason::Unchanged);
        }
    }

    Ok(())
}

/// Insert or update the record for an activity, merging in whichever
/// components are given. Returns the record as it stands afterwards.
///
/// Call [`validate`] first; this function does not check slot exclusivity.
pub fn upsert(
    placed: &mut Vec<PlacedItem>,
    activity: ActivityId,
    spatial: Option<SpatialSlotId>,
    time: Option<TimeSlotId>,
) -> PlacedItem {
    if let Some(item) = placed.iter_mut().find(|p| p.activity_id == activity) {
        if spatial.is_some() {
            item.spatial_slot_id = spatial;
        }
        if time.is_some() {
            item.time_slot_id = time;
        }
        return item.clone();
    }

    let item = PlacedItem {
        activity_id: activity,
        spatial_slot_id: spatial,
        time_slot_id: time,
    };
    placed.push(item.clone());
    item
}

/// Delete the record for an activity (both components together).
///
/// # Errors
///
/// Returns [`RejectionReason::NotPlaced`] if there is no record.
pub fn remove(placed: &mut Vec<PlacedItem>, activity: &ActivityId) -> Result<(), RejectionReason> {
    let before = placed.len();
    placed.retain(|p| &p.activity_id != activity);
    if placed.len() == before {
        return Err(RejectionReason::NotPlaced);
    }
    Ok(())
}
