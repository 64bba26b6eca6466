//! The puzzle engine: a reducer over [`GameState`] and [`UiState`].
//!
//! Every change goes through [`PuzzleEngine::apply`]. An intent is either
//! applied in full or rejected with a [`RejectionReason`]; a rejected intent
//! leaves the game state, UI state, working level and journal untouched.
//!
//! # Level attempts
//!
//! Each attempt at a level plays on a clone of the authored level, so twist
//! effects never leak into the scenario. The clone is rebuilt when the
//! attempt ends: next level, replay, or back to menu.

use puzzle_types::{
    ActivityId, ChoiceId, DisruptionId, GameEvent, GameEventKind, GamePhase, GameSnapshot, GameState, Intent,
    IntentResult, Level, PlacementStatus, RejectionReason, Scenario, SessionId, SpatialSlotId,
    TimeSlotId, TwistEffect, UiState,
};
use tracing::{debug, info, warn};

use crate::config::{PuzzleConfig, ScoringConfig};
use crate::disruption::{self, EffectOutcome, TwistTrigger};
use crate::error::ScenarioError;
use crate::journal::Journal;
use crate::{placement, scenario, scoring};

/// Bookkeeping for the current level attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Attempt {
    /// Placements applied during this attempt.
    placements: u32,
    /// A twist already fired during this attempt.
    twist_fired: bool,
}

/// What [`PuzzleEngine::narration`] should describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NarrationTopic {
    /// The current level's briefing.
    Instructions,
    /// The active twist and its options.
    ActiveTwist,
    /// How many activities are placed and the score.
    Progress,
}

/// Owns one play session of a scenario.
#[derive(Debug, Clone)]
pub struct PuzzleEngine {
    session_id: SessionId,
    scenario: Scenario,
    scoring: ScoringConfig,
    trigger: TwistTrigger,
    level: Level,
    state: GameState,
    ui: UiState,
    attempt: Attempt,
    journal: Journal,
}

impl PuzzleEngine {
    /// Start a session at level 1 in the instructions phase.
    ///
    /// # Errors
    ///
    /// Returns a [`ScenarioError`] if the scenario fails validation.
    pub fn new(scenario: Scenario, config: &PuzzleConfig) -> Result<Self, ScenarioError> {
        scenario::validate(&scenario)?;
        let level = scenario
            .level(1)
            .cloned()
            .ok_or_else(|| ScenarioError::NoLevels(scenario.id.to_string()))?;

        let session_id = SessionId::new();
        info!(
            %session_id,
            scenario = %scenario.id,
            levels = scenario.levels.len(),
            trigger = ?config.twists.trigger,
            "Puzzle session started"
        );

        Ok(Self {
            session_id,
            scenario,
            scoring: config.scoring.clone(),
            trigger: TwistTrigger::new(&config.twists),
            level,
            state: GameState::new(config.session.accessibility_mode),
            ui: UiState::default(),
            attempt: Attempt::default(),
            journal: Journal::new(),
        })
    }

    // -------------------------------------------------------------------
    // Reducer
    // -------------------------------------------------------------------

    /// Apply one intent.
    ///
    /// # Errors
    ///
    /// Returns the [`RejectionReason`] when the intent is ignored. State is
    /// unchanged in that case.
    pub fn apply(&mut self, intent: Intent) -> IntentResult {
        let name = intent.name();
        let result = match intent {
            Intent::PlaceItem {
                activity_id,
                spatial_slot_id,
                time_slot_id,
            } => self.handle_place(activity_id, spatial_slot_id, time_slot_id),
            Intent::RemoveItem { activity_id } => self.handle_remove(&activity_id),
            Intent::SelectActivity { activity_id } => self.handle_select(activity_id),
            Intent::ClearSelection => self.handle_clear_selection(),
            Intent::PlaceSelected {
                spatial_slot_id,
                time_slot_id,
            } => self.handle_place_selected(spatial_slot_id, time_slot_id),
            Intent::StartLevel => self.handle_start_level(),
            Intent::CompleteLevel => self.handle_complete_level(),
            Intent::NextLevel => self.handle_next_level(),
            Intent::BackToMenu => {
                self.handle_back_to_menu();
                Ok(())
            }
            Intent::TriggerTwist { event_id } => self.handle_trigger_twist(&event_id),
            Intent::AcceptTwist => self.handle_accept_twist(),
            Intent::RejectTwist => self.handle_reject_twist(),
            Intent::ChooseAdaptation { choice_id } => self.handle_choose_adaptation(&choice_id),
            Intent::SetAccessibilityMode { enabled } => self.handle_accessibility(enabled),
        };

        if let Err(reason) = result {
            debug!(
                session_id = %self.session_id,
                intent = name,
                ?reason,
                level = self.state.current_level,
                phase = ?self.state.game_phase,
                "Intent rejected"
            );
        }
        result
    }

    // -------------------------------------------------------------------
    // Named operations
    // -------------------------------------------------------------------

    /// Place an activity on a spatial slot, a time slot, or both.
    ///
    /// # Errors
    ///
    /// See [`placement::validate`]; also [`RejectionReason::WrongPhase`].
    pub fn place_item(
        &mut self,
        activity_id: ActivityId,
        spatial_slot_id: Option<SpatialSlotId>,
        time_slot_id: Option<TimeSlotId>,
    ) -> IntentResult {
        self.apply(Intent::PlaceItem {
            activity_id,
            spatial_slot_id,
            time_slot_id,
        })
    }

    /// Remove an activity's placement entirely.
    ///
    /// # Errors
    ///
    /// [`RejectionReason::NotPlaced`] or [`RejectionReason::WrongPhase`].
    pub fn remove_item(&mut self, activity_id: ActivityId) -> IntentResult {
        self.apply(Intent::RemoveItem { activity_id })
    }

    /// Select an activity for click-to-place.
    ///
    /// # Errors
    ///
    /// [`RejectionReason::AlreadyPlaced`] for fully placed activities.
    pub fn select_activity(&mut self, activity_id: ActivityId) -> IntentResult {
        self.apply(Intent::SelectActivity { activity_id })
    }

    /// Place the selected activity and clear the selection.
    ///
    /// # Errors
    ///
    /// [`RejectionReason::NoSelection`] or any placement rejection.
    pub fn place_selected(
        &mut self,
        spatial_slot_id: Option<SpatialSlotId>,
        time_slot_id: Option<TimeSlotId>,
    ) -> IntentResult {
        self.apply(Intent::PlaceSelected {
            spatial_slot_id,
            time_slot_id,
        })
    }

    /// Leave the briefing, or replay a completed level.
    ///
    /// # Errors
    ///
    /// [`RejectionReason::WrongPhase`] while already playing.
    pub fn start_level(&mut self) -> IntentResult {
        self.apply(Intent::StartLevel)
    }

    /// Score the current level.
    ///
    /// # Errors
    ///
    /// [`RejectionReason::LevelIncomplete`] or [`RejectionReason::WrongPhase`].
    pub fn complete_level(&mut self) -> IntentResult {
        self.apply(Intent::CompleteLevel)
    }

    /// Move on to the next level after completing the current one.
    ///
    /// # Errors
    ///
    /// [`RejectionReason::WrongPhase`] unless the level was completed, or
    /// [`RejectionReason::FinalLevel`] on the scenario's last level.
    pub fn next_level(&mut self) -> IntentResult {
        self.apply(Intent::NextLevel)
    }

    /// Restart the scenario from level 1 with a zero score.
    pub fn back_to_menu(&mut self) {
        self.handle_back_to_menu();
    }

    /// Fire a twist from the current level's pool.
    ///
    /// # Errors
    ///
    /// [`RejectionReason::UnknownDisruption`] or
    /// [`RejectionReason::TwistAlreadyTriggered`].
    pub fn trigger_twist(&mut self, event_id: DisruptionId) -> IntentResult {
        self.apply(Intent::TriggerTwist { event_id })
    }

    /// Accept the active twist.
    ///
    /// # Errors
    ///
    /// [`RejectionReason::NoActiveTwist`].
    pub fn accept_twist(&mut self) -> IntentResult {
        self.apply(Intent::AcceptTwist)
    }

    /// Dismiss the active twist.
    ///
    /// # Errors
    ///
    /// [`RejectionReason::NoActiveTwist`], or
    /// [`RejectionReason::AdaptationPending`] once the twist was accepted and
    /// waits for a choice.
    pub fn reject_twist(&mut self) -> IntentResult {
        self.apply(Intent::RejectTwist)
    }

    /// Resolve the active twist with an adaptation choice.
    ///
    /// # Errors
    ///
    /// [`RejectionReason::UnknownChoice`] or [`RejectionReason::NoActiveTwist`].
    pub fn choose_adaptation(&mut self, choice_id: ChoiceId) -> IntentResult {
        self.apply(Intent::ChooseAdaptation { choice_id })
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    /// Whether every activity of the current level is fully placed.
    pub fn check_completion(&self) -> bool {
        placement::is_complete(&self.level, &self.state.placed_items)
    }

    /// Placement status of one activity.
    pub fn placement_status(&self, activity: &ActivityId) -> PlacementStatus {
        placement::status(&self.level, &self.state.placed_items, activity)
    }

    /// The activity occupying a spatial slot.
    pub fn spatial_occupant(&self, slot: &SpatialSlotId) -> Option<&ActivityId> {
        placement::spatial_occupant(&self.state.placed_items, slot)
    }

    /// The activity occupying a time slot.
    pub fn time_occupant(&self, slot: &TimeSlotId) -> Option<&ActivityId> {
        placement::time_occupant(&self.state.placed_items, slot)
    }

    /// Whether the current level is the scenario's last.
    pub fn is_final_level(&self) -> bool {
        self.state.current_level >= self.scenario.level_count()
    }

    /// The game state record.
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// The UI-state record.
    pub const fn ui(&self) -> &UiState {
        &self.ui
    }

    /// The working copy of the current level.
    pub const fn level(&self) -> &Level {
        &self.level
    }

    /// The authored scenario.
    pub const fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// This session's id.
    pub const fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Journal entries not yet drained.
    pub fn pending_events(&self) -> &[GameEvent] {
        self.journal.pending()
    }

    /// Take all journal entries recorded since the last drain.
    pub fn drain_journal(&mut self) -> Vec<GameEvent> {
        self.journal.drain()
    }

    /// Everything the presentation layer needs to render.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            session_id: self.session_id,
            scenario_id: self.scenario.id.clone(),
            level_count: self.scenario.level_count(),
            level: self.level.clone(),
            state: self.state.clone(),
            ui: self.ui.clone(),
            complete: self.check_completion(),
        }
    }

    /// Text for the speech side-channel. Never spoken automatically.
    pub fn narration(&self, topic: NarrationTopic) -> String {
        match topic {
            NarrationTopic::Instructions => {
                let mut text = format!(
                    "Level {}: {}.",
                    self.state.current_level, self.level.name
                );
                if !self.level.description.is_empty() {
                    text.push(' ');
                    text.push_str(&self.level.description);
                }
                if self.level.enable_timeline {
                    text.push_str(" Give each activity a place and a time.");
                } else {
                    text.push_str(" Give each activity a place.");
                }
                text
            }
            NarrationTopic::ActiveTwist => self.twist_narration(),
            NarrationTopic::Progress => format!(
                "{} of {} activities placed. Score: {}.",
                placement::fully_placed_count(&self.level, &self.state.placed_items),
                self.level.activities.len(),
                self.state.score
            ),
        }
    }

    fn twist_narration(&self) -> String {
        let Some(twist) = &self.state.active_twist else {
            return "There is no surprise right now.".to_owned();
        };
        let mut text = twist.description.clone();
        if let Some(effect) = &twist.effect_text {
            text.push(' ');
            text.push_str(effect);
        }
        for (n, choice) in twist.adaptation_choices.iter().enumerate() {
            text.push_str(&format!(
                " Option {}: {}.",
                n.saturating_add(1),
                choice.description
            ));
        }
        text
    }

    // -------------------------------------------------------------------
    // Handlers
    // -------------------------------------------------------------------

    fn require_phase(&self, phase: GamePhase) -> IntentResult {
        if self.state.game_phase == phase {
            Ok(())
        } else {
            Err(RejectionReason::WrongPhase)
        }
    }

    fn handle_place(
        &mut self,
        activity: ActivityId,
        spatial: Option<SpatialSlotId>,
        time: Option<TimeSlotId>,
    ) -> IntentResult {
        self.require_phase(GamePhase::Playing)?;
        placement::validate(
            &self.level,
            &self.state.placed_items,
            &activity,
            spatial.as_ref(),
            time.as_ref(),
        )?;

        let item = placement::upsert(&mut self.state.placed_items, activity, spatial, time);
        self.attempt.placements = self.attempt.placements.saturating_add(1);

        // A now fully placed selection is no longer selectable.
        if self.ui.selected_activity.as_ref() == Some(&item.activity_id)
            && self.placement_status(&item.activity_id) == PlacementStatus::Full
        {
            self.ui.selected_activity = None;
            self.journal
                .record(GameEventKind::SelectionChanged { selected: None });
        }

        self.journal.record(GameEventKind::ItemPlaced {
            activity: item.activity_id,
            spatial: item.spatial_slot_id,
            time: item.time_slot_id,
        });

        self.poll_trigger();
        Ok(())
    }

    fn handle_remove(&mut self, activity: &ActivityId) -> IntentResult {
        self.require_phase(GamePhase::Playing)?;
        placement::remove(&mut self.state.placed_items, activity)?;
        self.journal.record(GameEventKind::ItemRemoved {
            activity: activity.clone(),
        });
        Ok(())
    }

    fn handle_select(&mut self, activity: ActivityId) -> IntentResult {
        self.require_phase(GamePhase::Playing)?;
        if self.level.activity(&activity).is_none() {
            return Err(RejectionReason::UnknownActivity);
        }
        if self.placement_status(&activity) == PlacementStatus::Full {
            return Err(RejectionReason::AlreadyPlaced);
        }
        if self.ui.selected_activity.as_ref() == Some(&activity) {
            return Err(RejectionReason::Unchanged);
        }
        self.ui.selected_activity = Some(activity.clone());
        self.journal.record(GameEventKind::SelectionChanged {
            selected: Some(activity),
        });
        Ok(())
    }

    fn handle_clear_selection(&mut self) -> IntentResult {
        if self.ui.selected_activity.take().is_none() {
            return Err(RejectionReason::Unchanged);
        }
        self.journal
            .record(GameEventKind::SelectionChanged { selected: None });
        Ok(())
    }

    fn handle_place_selected(
        &mut self,
        spatial: Option<SpatialSlotId>,
        time: Option<TimeSlotId>,
    ) -> IntentResult {
        self.require_phase(GamePhase::Playing)?;
        let selected = self
            .ui
            .selected_activity
            .clone()
            .ok_or(RejectionReason::NoSelection)?;
        self.handle_place(selected, spatial, time)?;
        if self.ui.selected_activity.take().is_some() {
            self.journal
                .record(GameEventKind::SelectionChanged { selected: None });
        }
        Ok(())
    }

    fn handle_start_level(&mut self) -> IntentResult {
        let replay = match self.state.game_phase {
            GamePhase::Instructions => false,
            GamePhase::Success => {
                self.reset_attempt();
                true
            }
            GamePhase::Playing => return Err(RejectionReason::WrongPhase),
        };
        self.state.game_phase = GamePhase::Playing;
        self.journal.record(GameEventKind::LevelStarted {
            level: self.state.current_level,
            replay,
        });
        info!(
            session_id = %self.session_id,
            level = self.state.current_level,
            replay,
            "Level started"
        );
        Ok(())
    }

    fn handle_complete_level(&mut self) -> IntentResult {
        self.require_phase(GamePhase::Playing)?;
        if !self.check_completion() {
            return Err(RejectionReason::LevelIncomplete);
        }

        let twist_bonus = self.state.active_twist.is_some();
        let points = scoring::completion_points(&self.scoring, twist_bonus);
        self.state.score = scoring::award(self.state.score, points);
        self.state.game_phase = GamePhase::Success;
        if self.ui.selected_activity.take().is_some() {
            self.journal
                .record(GameEventKind::SelectionChanged { selected: None });
        }

        self.journal.record(GameEventKind::LevelCompleted {
            level: self.state.current_level,
            points,
            score: self.state.score,
            twist_bonus,
        });
        info!(
            session_id = %self.session_id,
            level = self.state.current_level,
            points,
            score = self.state.score,
            twist_bonus,
            "Level completed"
        );
        Ok(())
    }

    fn handle_next_level(&mut self) -> IntentResult {
        self.require_phase(GamePhase::Success)?;
        if self.is_final_level() {
            return Err(RejectionReason::FinalLevel);
        }
        let next = self
            .state
            .current_level
            .checked_add(1)
            .ok_or(RejectionReason::FinalLevel)?;

        self.state.current_level = next;
        self.reset_attempt();
        self.state.game_phase = GamePhase::Instructions;
        self.journal
            .record(GameEventKind::AdvancedToLevel { level: next });
        info!(session_id = %self.session_id, level = next, "Advanced to next level");
        Ok(())
    }

    fn handle_back_to_menu(&mut self) {
        self.state = GameState::new(self.state.accessibility_mode);
        self.reset_attempt();
        self.journal.record(GameEventKind::ReturnedToMenu);
        info!(session_id = %self.session_id, "Returned to menu");
    }

    fn handle_trigger_twist(&mut self, event_id: &DisruptionId) -> IntentResult {
        self.require_phase(GamePhase::Playing)?;
        if self.state.active_twist.is_some() || self.attempt.twist_fired {
            return Err(RejectionReason::TwistAlreadyTriggered);
        }
        if self.level.disruption(event_id).is_none() {
            return Err(RejectionReason::UnknownDisruption);
        }
        self.activate_twist(event_id);
        Ok(())
    }

    fn handle_accept_twist(&mut self) -> IntentResult {
        self.require_phase(GamePhase::Playing)?;
        let Some(twist) = self.state.active_twist.as_ref() else {
            return Err(RejectionReason::NoActiveTwist);
        };

        if twist.requires_choice() {
            if self.ui.adaptation_pending {
                return Err(RejectionReason::Unchanged);
            }
            let event = twist.id.clone();
            self.ui.adaptation_pending = true;
            self.journal.record(GameEventKind::TwistAccepted { event });
            return Ok(());
        }

        let Some(twist) = self.state.active_twist.take() else {
            return Err(RejectionReason::NoActiveTwist);
        };
        self.apply_effects(&twist.effects);
        self.journal.record(GameEventKind::TwistResolved {
            event: twist.id,
            choice: None,
        });
        Ok(())
    }

    fn handle_reject_twist(&mut self) -> IntentResult {
        self.require_phase(GamePhase::Playing)?;
        if self.ui.adaptation_pending {
            return Err(RejectionReason::AdaptationPending);
        }
        let Some(twist) = self.state.active_twist.take() else {
            return Err(RejectionReason::NoActiveTwist);
        };
        self.ui.adaptation_pending = false;
        self.journal
            .record(GameEventKind::TwistRejected { event: twist.id });
        Ok(())
    }

    fn handle_choose_adaptation(&mut self, choice_id: &ChoiceId) -> IntentResult {
        self.require_phase(GamePhase::Playing)?;
        let Some(twist) = self.state.active_twist.as_ref() else {
            return Err(RejectionReason::NoActiveTwist);
        };
        let Some(choice) = twist.choice(choice_id) else {
            return Err(RejectionReason::UnknownChoice);
        };

        let mut effects: Vec<TwistEffect> = twist.effects.clone();
        effects.extend(choice.effects.iter().cloned());
        let event = twist.id.clone();

        self.state.active_twist = None;
        self.ui.adaptation_pending = false;
        self.apply_effects(&effects);
        self.journal.record(GameEventKind::TwistResolved {
            event,
            choice: Some(choice_id.clone()),
        });
        Ok(())
    }

    fn handle_accessibility(&mut self, enabled: bool) -> IntentResult {
        if self.state.accessibility_mode == enabled {
            return Err(RejectionReason::Unchanged);
        }
        self.state.accessibility_mode = enabled;
        self.journal
            .record(GameEventKind::AccessibilityModeChanged { enabled });
        Ok(())
    }

    // -------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------

    /// Start a fresh attempt at the current level.
    fn reset_attempt(&mut self) {
        if let Some(level) = self.scenario.level(self.state.current_level) {
            self.level = level.clone();
        }
        self.state.placed_items.clear();
        self.state.active_twist = None;
        self.ui = UiState::default();
        self.attempt = Attempt::default();
    }

    fn poll_trigger(&mut self) {
        if self.state.active_twist.is_some() || self.attempt.twist_fired {
            return;
        }
        if let Some(event_id) = self.trigger.poll(&self.level, self.attempt.placements) {
            self.activate_twist(&event_id);
        }
    }

    fn activate_twist(&mut self, event_id: &DisruptionId) {
        let Some(event) = self.level.disruption(event_id).cloned() else {
            return;
        };
        info!(
            session_id = %self.session_id,
            level = self.state.current_level,
            event = %event.id,
            kind = ?event.kind,
            "Twist triggered"
        );
        self.state.active_twist = Some(event);
        self.attempt.twist_fired = true;
        self.ui.adaptation_pending = false;
        self.journal.record(GameEventKind::TwistTriggered {
            event: event_id.clone(),
        });
    }

    fn apply_effects(&mut self, effects: &[TwistEffect]) {
        for effect in effects {
            match disruption::apply_effect(&mut self.level, &mut self.state.placed_items, effect) {
                EffectOutcome::Applied => {
                    self.journal.record(GameEventKind::EffectApplied {
                        effect: effect.clone(),
                    });
                }
                EffectOutcome::Skipped => {
                    warn!(
                        session_id = %self.session_id,
                        level = self.state.current_level,
                        ?effect,
                        "Twist effect skipped"
                    );
                }
                EffectOutcome::Narrative => {}
            }
        }

        // The selection may point at an activity an effect removed.
        if let Some(selected) = &self.ui.selected_activity
            && self.level.activity(selected).is_none()
        {
            self.ui.selected_activity = None;
            self.journal
                .record(GameEventKind::SelectionChanged { selected: None });
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use puzzle_types::{
        Activity, ActivityCategory, AdaptationChoice, DisruptionEvent, DisruptionType,
        SpatialSlot, TimeSlot,
    };

    use super::*;
    use crate::config::{TriggerPolicy, TwistConfig};

    fn activity(id: &str) -> Activity {
        Activity {
            id: id.into(),
            name: id.to_owned(),
            icon: String::new(),
            category: ActivityCategory::Normal,
        }
    }

    fn spatial(id: &str) -> SpatialSlot {
        SpatialSlot {
            id: id.into(),
            label: id.to_owned(),
            icon: String::new(),
            x: 0,
            y: 0,
        }
    }

    fn time(id: &str) -> TimeSlot {
        TimeSlot {
            id: id.into(),
            label: id.to_owned(),
            icon: String::new(),
        }
    }

    fn call_twist() -> DisruptionEvent {
        DisruptionEvent {
            id: "call".into(),
            kind: DisruptionType::Call,
            description: "The phone rings.".to_owned(),
            effect_text: Some("Answer it somewhere.".to_owned()),
            effects: vec![TwistEffect::AddActivity {
                activity: activity("answer"),
            }],
            adaptation_choices: vec![AdaptationChoice {
                id: "drop_b".into(),
                description: "Skip b".to_owned(),
                effect_text: None,
                effects: vec![TwistEffect::RemoveActivity {
                    activity_id: "b".into(),
                }],
            }],
        }
    }

    /// Level 1: two activities, spatial only. Level 2: timeline with a twist.
    fn scenario() -> Scenario {
        Scenario {
            id: "test".into(),
            name: "Test".to_owned(),
            levels: vec![
                Level {
                    id: 1,
                    name: "One".to_owned(),
                    description: String::new(),
                    activities: vec![activity("a"), activity("b")],
                    spatial_slots: vec![spatial("s1"), spatial("s2")],
                    time_slots: Vec::new(),
                    enable_timeline: false,
                    disruption_events: Vec::new(),
                },
                Level {
                    id: 2,
                    name: "Two".to_owned(),
                    description: "Plan it.".to_owned(),
                    activities: vec![activity("a"), activity("b")],
                    spatial_slots: vec![spatial("s1"), spatial("s2"), spatial("s3")],
                    time_slots: vec![time("t1"), time("t2"), time("t3")],
                    enable_timeline: true,
                    disruption_events: vec![call_twist()],
                },
            ],
        }
    }

    fn engine_with(config: &PuzzleConfig) -> PuzzleEngine {
        PuzzleEngine::new(scenario(), config).unwrap()
    }

    fn playing() -> PuzzleEngine {
        let mut engine = engine_with(&PuzzleConfig::default());
        assert_eq!(engine.start_level(), Ok(()));
        engine
    }

    /// Complete level 1 and move to level 2, playing.
    fn playing_level_two(config: &PuzzleConfig) -> PuzzleEngine {
        let mut engine = engine_with(config);
        assert_eq!(engine.start_level(), Ok(()));
        assert_eq!(engine.place_item("a".into(), Some("s1".into()), None), Ok(()));
        assert_eq!(engine.place_item("b".into(), Some("s2".into()), None), Ok(()));
        assert_eq!(engine.complete_level(), Ok(()));
        assert_eq!(engine.next_level(), Ok(()));
        assert_eq!(engine.start_level(), Ok(()));
        engine
    }

    #[test]
    fn new_session_starts_at_instructions() {
        let engine = engine_with(&PuzzleConfig::default());
        assert_eq!(engine.state().current_level, 1);
        assert_eq!(engine.state().game_phase, GamePhase::Instructions);
        assert_eq!(engine.state().score, 0);
        assert!(engine.state().placed_items.is_empty());
        assert!(engine.state().active_twist.is_none());
    }

    #[test]
    fn invalid_scenario_is_refused() {
        let mut bad = scenario();
        bad.levels.clear();
        let result = PuzzleEngine::new(bad, &PuzzleConfig::default());
        assert!(matches!(result, Err(ScenarioError::NoLevels(_))));
    }

    #[test]
    fn placing_before_start_is_rejected() {
        let mut engine = engine_with(&PuzzleConfig::default());
        assert_eq!(
            engine.place_item("a".into(), Some("s1".into()), None),
            Err(RejectionReason::WrongPhase)
        );
        assert!(engine.pending_events().is_empty());
    }

    #[test]
    fn rejected_intent_leaves_everything_untouched() {
        let mut engine = playing();
        assert_eq!(engine.place_item("a".into(), Some("s1".into()), None), Ok(()));
        let before = engine.snapshot();
        let journal_len = engine.pending_events().len();

        assert_eq!(
            engine.place_item("b".into(), Some("s1".into()), None),
            Err(RejectionReason::SlotOccupied)
        );
        assert_eq!(engine.snapshot(), before);
        assert_eq!(engine.pending_events().len(), journal_len);
    }

    #[test]
    fn complete_requires_full_placement() {
        let mut engine = playing();
        assert_eq!(engine.place_item("a".into(), Some("s1".into()), None), Ok(()));
        assert_eq!(engine.complete_level(), Err(RejectionReason::LevelIncomplete));
        assert_eq!(engine.state().game_phase, GamePhase::Playing);
        assert_eq!(engine.state().score, 0);
    }

    #[test]
    fn click_to_place_clears_selection() {
        let mut engine = playing();
        assert_eq!(engine.place_selected(Some("s1".into()), None), Err(RejectionReason::NoSelection));
        assert_eq!(engine.select_activity("a".into()), Ok(()));
        assert_eq!(engine.select_activity("a".into()), Err(RejectionReason::Unchanged));
        assert_eq!(engine.place_selected(Some("s1".into()), None), Ok(()));
        assert!(engine.ui().selected_activity.is_none());
        assert_eq!(engine.placement_status(&"a".into()), PlacementStatus::Full);
        assert_eq!(engine.select_activity("a".into()), Err(RejectionReason::AlreadyPlaced));
    }

    #[test]
    fn failed_click_to_place_keeps_selection() {
        let mut engine = playing();
        assert_eq!(engine.place_item("a".into(), Some("s1".into()), None), Ok(()));
        assert_eq!(engine.select_activity("b".into()), Ok(()));
        assert_eq!(
            engine.place_selected(Some("s1".into()), None),
            Err(RejectionReason::SlotOccupied)
        );
        assert_eq!(engine.ui().selected_activity, Some("b".into()));
    }

    #[test]
    fn partial_placement_stays_selectable() {
        let mut engine = playing_level_two(&PuzzleConfig::default());
        assert_eq!(engine.place_item("a".into(), Some("s1".into()), None), Ok(()));
        assert_eq!(engine.placement_status(&"a".into()), PlacementStatus::Partial);
        assert_eq!(engine.select_activity("a".into()), Ok(()));
        assert_eq!(engine.place_selected(None, Some("t1".into())), Ok(()));
        assert_eq!(engine.placement_status(&"a".into()), PlacementStatus::Full);
    }

    #[test]
    fn replay_resets_attempt_and_keeps_score() {
        let mut engine = playing();
        assert_eq!(engine.place_item("a".into(), Some("s1".into()), None), Ok(()));
        assert_eq!(engine.place_item("b".into(), Some("s2".into()), None), Ok(()));
        assert_eq!(engine.complete_level(), Ok(()));
        assert_eq!(engine.start_level(), Ok(()));

        assert_eq!(engine.state().game_phase, GamePhase::Playing);
        assert!(engine.state().placed_items.is_empty());
        assert_eq!(engine.state().score, 100);
        assert_eq!(engine.state().current_level, 1);
    }

    #[test]
    fn next_level_requires_success() {
        let mut engine = engine_with(&PuzzleConfig::default());
        assert_eq!(engine.next_level(), Err(RejectionReason::WrongPhase));
        assert_eq!(engine.state().current_level, 1);

        assert_eq!(engine.start_level(), Ok(()));
        assert_eq!(engine.place_item("a".into(), Some("s1".into()), None), Ok(()));
        assert_eq!(engine.next_level(), Err(RejectionReason::WrongPhase));
        assert_eq!(engine.state().current_level, 1);
        assert_eq!(engine.state().game_phase, GamePhase::Playing);
        assert_eq!(engine.state().placed_items.len(), 1);
    }

    #[test]
    fn final_level_is_checked_after_phase() {
        let mut engine = playing_level_two(&PuzzleConfig::default());
        assert_eq!(engine.next_level(), Err(RejectionReason::WrongPhase));

        assert_eq!(engine.place_item("a".into(), Some("s1".into()), Some("t1".into())), Ok(()));
        assert_eq!(engine.place_item("b".into(), Some("s2".into()), Some("t2".into())), Ok(()));
        assert_eq!(engine.complete_level(), Ok(()));
        assert_eq!(engine.next_level(), Err(RejectionReason::FinalLevel));
        assert_eq!(engine.state().game_phase, GamePhase::Success);
    }

    #[test]
    fn completion_leaves_no_stale_selection() {
        let mut engine = playing();
        assert_eq!(engine.select_activity("a".into()), Ok(()));
        assert_eq!(engine.place_item("a".into(), Some("s1".into()), None), Ok(()));
        assert_eq!(engine.place_item("b".into(), Some("s2".into()), None), Ok(()));
        assert_eq!(engine.complete_level(), Ok(()));

        assert!(engine.ui().selected_activity.is_none());
        let last_selection = engine
            .drain_journal()
            .into_iter()
            .rev()
            .find_map(|e| match e.kind {
                GameEventKind::SelectionChanged { selected } => Some(selected),
                _ => None,
            });
        assert_eq!(last_selection, Some(None));
    }

    #[test]
    fn start_while_playing_is_rejected() {
        let mut engine = playing();
        assert_eq!(engine.start_level(), Err(RejectionReason::WrongPhase));
    }

    #[test]
    fn back_to_menu_keeps_accessibility_preference() {
        let mut engine = playing_level_two(&PuzzleConfig::default());
        assert_eq!(engine.apply(Intent::SetAccessibilityMode { enabled: true }), Ok(()));
        engine.back_to_menu();

        assert_eq!(engine.state().current_level, 1);
        assert_eq!(engine.state().score, 0);
        assert_eq!(engine.state().game_phase, GamePhase::Instructions);
        assert!(engine.state().accessibility_mode);
        assert_eq!(engine.level().id, 1);
    }

    #[test]
    fn twist_effects_stay_in_the_attempt() {
        let mut engine = playing_level_two(&PuzzleConfig::default());
        assert_eq!(engine.trigger_twist("call".into()), Ok(()));
        assert_eq!(engine.accept_twist(), Ok(()));
        assert!(engine.ui().adaptation_pending);
        assert_eq!(engine.accept_twist(), Err(RejectionReason::Unchanged));

        assert_eq!(engine.choose_adaptation("drop_b".into()), Ok(()));
        assert!(engine.state().active_twist.is_none());
        assert!(!engine.ui().adaptation_pending);
        assert!(engine.level().activity(&"answer".into()).is_some());
        assert!(engine.level().activity(&"b".into()).is_none());

        // The authored level is untouched.
        assert_eq!(
            engine.scenario().level(2).map(|l| l.activities.len()),
            Some(2)
        );
    }

    #[test]
    fn one_twist_per_attempt() {
        let mut engine = playing_level_two(&PuzzleConfig::default());
        assert_eq!(engine.trigger_twist("call".into()), Ok(()));
        assert_eq!(
            engine.trigger_twist("call".into()),
            Err(RejectionReason::TwistAlreadyTriggered)
        );
        assert_eq!(engine.reject_twist(), Ok(()));
        assert_eq!(
            engine.trigger_twist("call".into()),
            Err(RejectionReason::TwistAlreadyTriggered)
        );
    }

    #[test]
    fn reject_after_accept_is_refused() {
        let mut engine = playing_level_two(&PuzzleConfig::default());
        assert_eq!(engine.trigger_twist("call".into()), Ok(()));
        assert_eq!(engine.accept_twist(), Ok(()));
        let journal_len = engine.pending_events().len();

        assert_eq!(engine.reject_twist(), Err(RejectionReason::AdaptationPending));
        assert!(engine.state().active_twist.is_some());
        assert!(engine.ui().adaptation_pending);
        assert_eq!(engine.pending_events().len(), journal_len);

        assert_eq!(engine.choose_adaptation("drop_b".into()), Ok(()));
        assert!(engine.level().activity(&"answer".into()).is_some());
    }

    #[test]
    fn unknown_choice_keeps_twist_active() {
        let mut engine = playing_level_two(&PuzzleConfig::default());
        assert_eq!(engine.trigger_twist("call".into()), Ok(()));
        assert_eq!(
            engine.choose_adaptation("nope".into()),
            Err(RejectionReason::UnknownChoice)
        );
        assert!(engine.state().active_twist.is_some());
    }

    #[test]
    fn effect_removing_selection_clears_it() {
        let mut engine = playing_level_two(&PuzzleConfig::default());
        assert_eq!(engine.select_activity("b".into()), Ok(()));
        assert_eq!(engine.trigger_twist("call".into()), Ok(()));
        assert_eq!(engine.choose_adaptation("drop_b".into()), Ok(()));
        assert!(engine.ui().selected_activity.is_none());
    }

    #[test]
    fn auto_trigger_fires_after_placements() {
        let config = PuzzleConfig {
            twists: TwistConfig {
                trigger: TriggerPolicy::AfterPlacements { count: 2 },
                seed: 7,
            },
            ..PuzzleConfig::default()
        };
        let mut engine = playing_level_two(&config);
        assert_eq!(engine.place_item("a".into(), Some("s1".into()), None), Ok(()));
        assert!(engine.state().active_twist.is_none());
        assert_eq!(engine.place_item("a".into(), None, Some("t1".into())), Ok(()));
        assert_eq!(
            engine.state().active_twist.as_ref().map(|t| t.id.clone()),
            Some("call".into())
        );
    }

    #[test]
    fn narration_covers_each_topic() {
        let mut engine = playing_level_two(&PuzzleConfig::default());
        let intro = engine.narration(NarrationTopic::Instructions);
        assert!(intro.starts_with("Level 2: Two."));
        assert!(intro.contains("place and a time"));

        assert_eq!(
            engine.narration(NarrationTopic::ActiveTwist),
            "There is no surprise right now."
        );
        assert_eq!(engine.trigger_twist("call".into()), Ok(()));
        let twist = engine.narration(NarrationTopic::ActiveTwist);
        assert!(twist.contains("The phone rings."));
        assert!(twist.contains("Option 1: Skip b."));

        assert_eq!(
            engine.narration(NarrationTopic::Progress),
            "0 of 2 activities placed. Score: 100."
        );
    }

    #[test]
    fn journal_records_applied_changes_in_order() {
        let mut engine = playing();
        assert_eq!(engine.place_item("a".into(), Some("s1".into()), None), Ok(()));
        let events = engine.drain_journal();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events.first().map(|e| &e.kind),
            Some(GameEventKind::LevelStarted { level: 1, replay: false })
        ));
        assert!(matches!(
            events.get(1).map(|e| &e.kind),
            Some(GameEventKind::ItemPlaced { .. })
        ));
        assert!(engine.pending_events().is_empty());
    }
}
