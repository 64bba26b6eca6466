//! Type-safe identifier wrappers.
//!
//! Authored scenario content (activities, slots, twists, choices) is keyed by
//! short human-readable strings such as `"breakfast"` or `"kitchen"`, so
//! those identifiers wrap a [`String`]. Runtime-generated identifiers for
//! journal events and sessions wrap a [`Uuid`] (v7, time-ordered).
//!
//! Every identifier is its own type so that an activity id can never be
//! passed where a slot id is expected.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around an authored [`String`] key.
macro_rules! define_key {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub String);

        impl $name {
            /// Create an identifier from any string-like value.
            pub fn new(key: impl Into<String>) -> Self {
                Self(key.into())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(key: &str) -> Self {
                Self(key.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(key: String) -> Self {
                Self(key)
            }
        }
    };
}

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_uuid {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

define_key! {
    /// Identifier of a scenario (a themed set of levels, e.g. `"home"`).
    ScenarioId
}

define_key! {
    /// Identifier of a placeable activity within a level.
    ActivityId
}

define_key! {
    /// Identifier of a location placeholder on the spatial map.
    SpatialSlotId
}

define_key! {
    /// Identifier of a time-of-day placeholder on the timeline.
    TimeSlotId
}

define_key! {
    /// Identifier of a disruption event ("twist").
    DisruptionId
}

define_key! {
    /// Identifier of an adaptation choice offered by a twist.
    ChoiceId
}

define_uuid! {
    /// Unique identifier of an entry in the session journal.
    EventId
}

define_uuid! {
    /// Unique identifier of one play session (engine lifetime).
    SessionId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_serialize_as_plain_strings() {
        let id = ActivityId::new("breakfast");
        let json = serde_json::to_string(&id).ok();
        assert_eq!(json.as_deref(), Some("\"breakfast\""));

        let back: Result<ActivityId, _> = serde_json::from_str("\"breakfast\"");
        assert_eq!(back.ok(), Some(id));
    }

    #[test]
    fn key_display_is_raw_value() {
        assert_eq!(SpatialSlotId::from("kitchen").to_string(), "kitchen");
    }

    #[test]
    fn uuid_ids_are_unique() {
        let first = EventId::new();
        let second = EventId::new();
        assert_ne!(first.into_inner(), Uuid::nil());
        assert_ne!(first, second);
    }
}
