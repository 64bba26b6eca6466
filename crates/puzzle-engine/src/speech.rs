//! Text-to-speech side-channel.
//!
//! Speech is fire-and-forget and never part of game state. The presentation
//! layer calls [`Narrator::on_speak`] when the player explicitly asks for
//! something to be read out; the engine itself never speaks on its own.

use tracing::info;

use crate::config::SpeechConfig;

/// Something that can say text out loud.
pub trait SpeechSink {
    /// Speak the given text. Must not block the caller.
    fn speak(&mut self, text: &str);
}

/// A sink that writes utterances to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSpeech;

impl SpeechSink for TracingSpeech {
    fn speak(&mut self, text: &str) {
        info!(target: "puzzle::speech", text, "speak");
    }
}

/// A sink that keeps utterances in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingSpeech {
    /// Everything spoken so far, in order.
    pub utterances: Vec<String>,
}

impl SpeechSink for RecordingSpeech {
    fn speak(&mut self, text: &str) {
        self.utterances.push(text.to_owned());
    }
}

/// Gates speech requests on the player's voice setting.
#[derive(Debug, Clone)]
pub struct Narrator<S> {
    sink: S,
    voice_enabled: bool,
}

impl<S: SpeechSink> Narrator<S> {
    /// Create a narrator around a sink.
    pub const fn new(sink: S, voice_enabled: bool) -> Self {
        Self {
            sink,
            voice_enabled,
        }
    }

    /// Create a narrator using the configured voice setting.
    pub const fn from_config(sink: S, config: &SpeechConfig) -> Self {
        Self::new(sink, config.voice_enabled)
    }

    /// Whether narration is spoken without forcing.
    pub const fn voice_enabled(&self) -> bool {
        self.voice_enabled
    }

    /// Change the voice setting.
    pub const fn set_voice_enabled(&mut self, enabled: bool) {
        self.voice_enabled = enabled;
    }

    /// Speak `text` if voice is enabled, or unconditionally when
    /// `force_speak` is set. Returns whether anything was spoken.
    pub fn on_speak(&mut self, text: &str, force_speak: bool) -> bool {
        if text.trim().is_empty() || !(self.voice_enabled || force_speak) {
            return false;
        }
        self.sink.speak(text);
        true
    }

    /// Borrow the underlying sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the narrator and return the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}
