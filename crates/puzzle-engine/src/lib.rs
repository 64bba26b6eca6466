//! Placement state machine, scoring, and twist handling for the cognitive
//! placement puzzle.
//!
//! A [`PuzzleEngine`] plays one [`Scenario`] level by level. The player drops
//! activities onto spatial slots (and, on timeline levels, time slots), then
//! completes the level for points. Twists interrupt a level attempt and may
//! change the board.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `puzzle-config.yaml` into
//!   strongly-typed structs.
//! - [`disruption`] -- Twist trigger policies and effect application.
//! - [`engine`] -- The [`PuzzleEngine`] reducer.
//! - [`error`] -- Error types for scenario loading and validation.
//! - [`journal`] -- In-memory log of applied changes.
//! - [`placement`] -- Placement validation, status, and upsert rules.
//! - [`scenario`] -- Scenario parsing (JSON/YAML) and validation.
//! - [`scoring`] -- Completion reward and twist bonus.
//! - [`speech`] -- [`SpeechSink`] trait and the [`Narrator`] gate.
//! - [`starting_scenarios`] -- The built-in "home" and "city" scenarios.
//!
//! [`Scenario`]: puzzle_types::Scenario
//! [`SpeechSink`]: speech::SpeechSink
//! [`Narrator`]: speech::Narrator

pub mod config;
pub mod disruption;
pub mod engine;
pub mod error;
pub mod journal;
pub mod placement;
pub mod scenario;
pub mod scoring;
pub mod speech;
pub mod starting_scenarios;

// Re-export primary types at crate root.
pub use config::{ConfigError, PuzzleConfig, TriggerPolicy};
pub use engine::{NarrationTopic, PuzzleEngine};
pub use error::ScenarioError;
pub use speech::{Narrator, RecordingSpeech, SpeechSink, TracingSpeech};
pub use starting_scenarios::{builtin_scenario, builtin_scenarios};
