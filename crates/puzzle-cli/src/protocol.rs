//! Line protocol between the CLI and whatever drives it.
//!
//! Each input line is one JSON object:
//!
//! - an intent, tagged by `intent` (`{"intent":"placeItem","activityId":"a","spatialSlotId":"s1"}`)
//! - a speech request (`{"speak":"progress","force":true}`)
//! - a voice toggle (`{"voice":false}`)
//!
//! Each line is answered with exactly one [`Reply`]. Malformed lines get an
//! `invalid` reply and the session goes on.

use puzzle_engine::{NarrationTopic, Narrator, PuzzleEngine, SpeechSink};
use puzzle_types::{GameEvent, GameSnapshot, Intent, RejectionReason};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Command {
    /// A player intent for the engine.
    Intent(Intent),
    /// Read narration aloud.
    Speak {
        /// What to narrate.
        speak: NarrationTopic,
        /// Speak even when voice is switched off.
        #[serde(default)]
        force: bool,
    },
    /// Switch voice narration on or off.
    Voice {
        /// The new voice setting.
        voice: bool,
    },
}

/// The answer to one input line.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum Reply {
    /// Session start: the initial snapshot.
    Started {
        /// The initial state.
        snapshot: Box<GameSnapshot>,
    },
    /// The intent was applied.
    Applied {
        /// State after the intent.
        snapshot: Box<GameSnapshot>,
        /// Journal entries produced by the intent.
        events: Vec<GameEvent>,
    },
    /// The intent was rejected; nothing changed.
    Rejected {
        /// Machine-readable reason.
        reason: RejectionReason,
        /// Human-readable reason.
        message: &'static str,
    },
    /// A speech request was handled.
    Narrated {
        /// The narration text.
        text: String,
        /// Whether it was handed to the speech sink.
        spoken: bool,
    },
    /// The voice setting changed.
    VoiceSet {
        /// The new setting.
        enabled: bool,
    },
    /// The line could not be parsed.
    Invalid {
        /// Parser message.
        error: String,
    },
}

/// The reply announcing a new session.
pub fn started(engine: &PuzzleEngine) -> Reply {
    Reply::Started {
        snapshot: Box::new(engine.snapshot()),
    }
}

/// Parse and execute one input line.
pub fn handle<S: SpeechSink>(
    engine: &mut PuzzleEngine,
    narrator: &mut Narrator<S>,
    line: &str,
) -> Reply {
    let command = match serde_json::from_str::<Command>(line.trim()) {
        Ok(command) => command,
        Err(e) => {
            warn!(error = %e, line, "Unparseable command");
            return Reply::Invalid {
                error: e.to_string(),
            };
        }
    };

    match command {
        Command::Intent(intent) => match engine.apply(intent) {
            Ok(()) => Reply::Applied {
                snapshot: Box::new(engine.snapshot()),
                events: engine.drain_journal(),
            },
            Err(reason) => Reply::Rejected {
                reason,
                message: reason.describe(),
            },
        },
        Command::Speak { speak, force } => {
            let text = engine.narration(speak);
            let spoken = narrator.on_speak(&text, force);
            Reply::Narrated { text, spoken }
        }
        Command::Voice { voice } => {
            narrator.set_voice_enabled(voice);
            Reply::VoiceSet { enabled: voice }
        }
    }
}
