//! In-memory session journal.
//!
//! One entry per applied change, numbered from 0 for the lifetime of the
//! engine. Entries are handed out with [`Journal::drain`]; sequence numbers
//! keep counting across drains.

use chrono::Utc;
use puzzle_types::{EventId, GameEvent, GameEventKind};

/// Ordered log of game events not yet collected by the caller.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    next_sequence: u64,
    pending: Vec<GameEvent>,
}

impl Journal {
    /// Create an empty journal.
    pub const fn new() -> Self {
        Self {
            next_sequence: 0,
            pending: Vec::new(),
        }
    }

    /// Append an entry stamped with the current time.
    pub fn record(&mut self, kind: GameEventKind) {
        let event = GameEvent {
            id: EventId::new(),
            sequence: self.next_sequence,
            recorded_at: Utc::now(),
            kind,
        };
        self.next_sequence = self.next_sequence.saturating_add(1);
        self.pending.push(event);
    }

    /// Entries not yet drained.
    pub fn pending(&self) -> &[GameEvent] {
        &self.pending
    }

    /// Total number of entries ever recorded.
    pub const fn recorded(&self) -> u64 {
        self.next_sequence
    }

    /// Take all pending entries.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }
}
