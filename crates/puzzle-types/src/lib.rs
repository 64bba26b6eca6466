//! Shared type definitions for the cognitive placement puzzle.
//!
//! This crate is the single source of truth for the puzzle's data model.
//! Types flow to `TypeScript` via `ts-rs` so the presentation layer renders
//! exactly what the engine produces.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe identifiers (authored string keys, UUID v7 ids)
//! - [`enums`] -- Categories, phases, disruption kinds, rejection reasons
//! - [`structs`] -- Authored content: scenarios, levels, slots, twists
//! - [`state`] -- Per-session game state, UI state, render snapshots
//! - [`intents`] -- Player intents and the intent result type
//! - [`events`] -- Session journal entries

pub mod enums;
pub mod events;
pub mod ids;
pub mod intents;
pub mod state;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{ActivityCategory, DisruptionType, GamePhase, PlacementStatus, RejectionReason};
pub use events::{GameEvent, GameEventKind};
pub use ids::{
    ActivityId, ChoiceId, DisruptionId, EventId, ScenarioId, SessionId, SpatialSlotId, TimeSlotId,
};
pub use intents::{Intent, IntentResult};
pub use state::{GameSnapshot, GameState, PlacedItem, UiState};
pub use structs::{
    Activity, AdaptationChoice, DisruptionEvent, Level, Scenario, SpatialSlot, TimeSlot,
    TwistEffect,
};

#[cfg(test)]
mod tests {
    //! Binding generation for the presentation layer.

    #[test]
    fn export_bindings() {
        // ts-rs writes the files to `bindings/` relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::ScenarioId::export_all();
        let _ = crate::ids::ActivityId::export_all();
        let _ = crate::ids::SpatialSlotId::export_all();
        let _ = crate::ids::TimeSlotId::export_all();
        let _ = crate::ids::DisruptionId::export_all();
        let _ = crate::ids::ChoiceId::export_all();
        let _ = crate::ids::EventId::export_all();
        let _ = crate::ids::SessionId::export_all();

        // Enums
        let _ = crate::enums::ActivityCategory::export_all();
        let _ = crate::enums::PlacementStatus::export_all();
        let _ = crate::enums::DisruptionType::export_all();
        let _ = crate::enums::GamePhase::export_all();
        let _ = crate::enums::RejectionReason::export_all();

        // Content
        let _ = crate::structs::Activity::export_all();
        let _ = crate::structs::SpatialSlot::export_all();
        let _ = crate::structs::TimeSlot::export_all();
        let _ = crate::structs::TwistEffect::export_all();
        let _ = crate::structs::AdaptationChoice::export_all();
        let _ = crate::structs::DisruptionEvent::export_all();
        let _ = crate::structs::Level::export_all();
        let _ = crate::structs::Scenario::export_all();

        // State
        let _ = crate::state::PlacedItem::export_all();
        let _ = crate::state::GameState::export_all();
        let _ = crate::state::UiState::export_all();
        let _ = crate::state::GameSnapshot::export_all();

        // Intents and journal
        let _ = crate::intents::Intent::export_all();
        let _ = crate::events::GameEventKind::export_all();
        let _ = crate::events::GameEvent::export_all();
    }
}
