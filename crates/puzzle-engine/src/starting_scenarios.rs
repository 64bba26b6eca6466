//! Built-in scenarios.
//!
//! Two scenarios ship with the engine: "home" (a day around the house, three
//! levels) and "city" (running errands in town, two levels). Both pass
//! [`crate::scenario::validate`]; custom scenarios are loaded from files.

use puzzle_types::{
    Activity, ActivityCategory, AdaptationChoice, DisruptionEvent, DisruptionType, Level,
    Scenario, SpatialSlot, TimeSlot, TwistEffect,
};

/// Identifier of the home scenario.
pub const HOME: &str = "home";

/// Identifier of the city scenario.
pub const CITY: &str = "city";

/// Helper to build an authored [`Activity`].
fn activity(id: &str, name: &str, icon: &str) -> Activity {
    Activity {
        id: id.into(),
        name: name.to_string(),
        icon: icon.to_string(),
        category: ActivityCategory::Normal,
    }
}

/// Helper to build an [`Activity`] that a twist injects.
fn twist_activity(id: &str, name: &str, icon: &str) -> Activity {
    Activity {
        category: ActivityCategory::Twist,
        ..activity(id, name, icon)
    }
}

/// Helper to build a [`SpatialSlot`] at a map position.
fn place(id: &str, label: &str, icon: &str, x: i32, y: i32) -> SpatialSlot {
    SpatialSlot {
        id: id.into(),
        label: label.to_string(),
        icon: icon.to_string(),
        x,
        y,
    }
}

/// Helper to build a [`TimeSlot`].
fn time(id: &str, label: &str, icon: &str) -> TimeSlot {
    TimeSlot {
        id: id.into(),
        label: label.to_string(),
        icon: icon.to_string(),
    }
}

/// Helper to build an [`AdaptationChoice`].
fn choice(id: &str, description: &str, effects: Vec<TwistEffect>) -> AdaptationChoice {
    AdaptationChoice {
        id: id.into(),
        description: description.to_string(),
        effect_text: None,
        effects,
    }
}

/// Helper to build a [`DisruptionEvent`].
fn twist(
    id: &str,
    kind: DisruptionType,
    description: &str,
    effect_text: &str,
    effects: Vec<TwistEffect>,
    choices: Vec<AdaptationChoice>,
) -> DisruptionEvent {
    DisruptionEvent {
        id: id.into(),
        kind,
        description: description.to_string(),
        effect_text: Some(effect_text.to_string()),
        effects,
        adaptation_choices: choices,
    }
}

/// Standard timeline for the home levels.
fn home_times() -> Vec<TimeSlot> {
    vec![
        time("morning", "Morning", "🌅"),
        time("noon", "Noon", "☀️"),
        time("afternoon", "Afternoon", "🌤️"),
        time("evening", "Evening", "🌙"),
    ]
}

// ---------------------------------------------------------------------------
// Home
// ---------------------------------------------------------------------------

/// "A day at home".
///
/// 1. Morning routine: three activities, spatial only.
/// 2. Planning the day: timeline on, a phone call that offers choices.
/// 3. A busy day: timeline on, a visitor or the rain may interfere.
pub fn home_scenario() -> Scenario {
    let morning_routine = Level {
        id: 1,
        name: "Morning routine".to_string(),
        description: "Put each activity in the room where it happens.".to_string(),
        activities: vec![
            activity("breakfast", "Have breakfast", "🍳"),
            activity("shower", "Take a shower", "🚿"),
            activity("get_dressed", "Get dressed", "👕"),
        ],
        spatial_slots: vec![
            place("kitchen", "Kitchen", "🍽️", 20, 30),
            place("bathroom", "Bathroom", "🛁", 70, 25),
            place("bedroom", "Bedroom", "🛏️", 50, 70),
        ],
        time_slots: Vec::new(),
        enable_timeline: false,
        disruption_events: Vec::new(),
    };

    let planning = Level {
        id: 2,
        name: "Planning the day".to_string(),
        description: "Choose where and when each activity happens.".to_string(),
        activities: vec![
            activity("breakfast", "Have breakfast", "🍳"),
            activity("laundry", "Do the laundry", "🧺"),
            activity("read", "Read a book", "📖"),
        ],
        spatial_slots: vec![
            place("kitchen", "Kitchen", "🍽️", 20, 30),
            place("laundry_room", "Laundry room", "🫧", 75, 30),
            place("living_room", "Living room", "🛋️", 45, 70),
            place("garden", "Garden", "🌳", 80, 75),
        ],
        time_slots: home_times(),
        enable_timeline: true,
        disruption_events: vec![twist(
            "phone_call",
            DisruptionType::Call,
            "The phone rings: a friend wants to talk.",
            "A call needs a place and a time in your day.",
            vec![TwistEffect::AddActivity {
                activity: twist_activity("phone_call", "Answer the phone", "📞"),
            }],
            vec![
                choice(
                    "talk_now",
                    "Talk now and read later",
                    vec![TwistEffect::Narrative],
                ),
                choice(
                    "call_back",
                    "Call back in the evening and skip reading",
                    vec![TwistEffect::RemoveActivity {
                        activity_id: "read".into(),
                    }],
                ),
            ],
        )],
    };

    let busy_day = Level {
        id: 3,
        name: "A busy day".to_string(),
        description: "Plan the whole day. Something unexpected may happen.".to_string(),
        activities: vec![
            activity("breakfast", "Have breakfast", "🍳"),
            activity("clean", "Clean the house", "🧹"),
            activity("water_plants", "Water the plants", "🪴"),
            activity("dinner", "Cook dinner", "🍲"),
        ],
        spatial_slots: vec![
            place("kitchen", "Kitchen", "🍽️", 20, 30),
            place("living_room", "Living room", "🛋️", 45, 70),
            place("garden", "Garden", "🌳", 80, 75),
            place("dining_room", "Dining room", "🪑", 25, 75),
            place("balcony", "Balcony", "🪟", 75, 20),
        ],
        time_slots: home_times(),
        enable_timeline: true,
        disruption_events: vec![
            twist(
                "visitor",
                DisruptionType::Visitor,
                "A neighbour knocks on the door.",
                "Make time for the visit.",
                vec![TwistEffect::AddActivity {
                    activity: twist_activity("visit", "Welcome the neighbour", "🚪"),
                }],
                vec![
                    choice(
                        "invite_in",
                        "Invite them in for tea",
                        vec![TwistEffect::AddTimeSlot {
                            slot: time("late_evening", "Late evening", "🌌"),
                        }],
                    ),
                    choice(
                        "skip_cleaning",
                        "Chat for a while and clean another day",
                        vec![TwistEffect::RemoveActivity {
                            activity_id: "clean".into(),
                        }],
                    ),
                ],
            ),
            twist(
                "rain",
                DisruptionType::Rain,
                "It starts to rain.",
                "The garden is out of reach, and the rain waters the plants.",
                vec![
                    TwistEffect::RemoveSpatialSlot {
                        slot_id: "garden".into(),
                    },
                    TwistEffect::RemoveActivity {
                        activity_id: "water_plants".into(),
                    },
                ],
                Vec::new(),
            ),
        ],
    };

    Scenario {
        id: HOME.into(),
        name: "A day at home".to_string(),
        levels: vec![morning_routine, planning, busy_day],
    }
}

// ---------------------------------------------------------------------------
// City
// ---------------------------------------------------------------------------

/// "An outing in the city".
///
/// 1. Errands: four activities, spatial only.
/// 2. A full agenda: timeline on, traffic or a meeting may interfere.
pub fn city_scenario() -> Scenario {
    let errands = Level {
        id: 1,
        name: "Errands".to_string(),
        description: "Match each errand with the place where it gets done.".to_string(),
        activities: vec![
            activity("groceries", "Buy groceries", "🛒"),
            activity("medicine", "Pick up medicine", "💊"),
            activity("mail", "Send a letter", "✉️"),
            activity("cash", "Withdraw cash", "💶"),
        ],
        spatial_slots: vec![
            place("supermarket", "Supermarket", "🏬", 15, 25),
            place("pharmacy", "Pharmacy", "🏥", 60, 20),
            place("post_office", "Post office", "🏤", 35, 70),
            place("bank", "Bank", "🏦", 80, 65),
        ],
        time_slots: Vec::new(),
        enable_timeline: false,
        disruption_events: Vec::new(),
    };

    let agenda = Level {
        id: 2,
        name: "A full agenda".to_string(),
        description: "Plan where and when each errand happens.".to_string(),
        activities: vec![
            activity("groceries", "Buy groceries", "🛒"),
            activity("doctor", "See the doctor", "🩺"),
            activity("lunch", "Have lunch", "🥪"),
        ],
        spatial_slots: vec![
            place("supermarket", "Supermarket", "🏬", 15, 25),
            place("clinic", "Clinic", "🏥", 60, 20),
            place("cafe", "Café", "☕", 35, 70),
            place("park", "Park", "🌳", 80, 65),
        ],
        time_slots: vec![
            time("nine", "9:00", "🕘"),
            time("eleven", "11:00", "🕚"),
            time("one", "13:00", "🕐"),
            time("four", "16:00", "🕓"),
        ],
        enable_timeline: true,
        disruption_events: vec![
            twist(
                "traffic_jam",
                DisruptionType::Traffic,
                "There is a traffic jam on the main road.",
                "The 9:00 slot is lost.",
                vec![TwistEffect::RemoveTimeSlot {
                    slot_id: "nine".into(),
                }],
                vec![
                    choice("wait", "Wait in the car", vec![TwistEffect::Narrative]),
                    choice(
                        "take_bus",
                        "Take the bus and add a stop at the bus station",
                        vec![TwistEffect::AddSpatialSlot {
                            slot: place("bus_station", "Bus station", "🚌", 50, 45),
                        }],
                    ),
                ],
            ),
            twist(
                "meeting",
                DisruptionType::Meeting,
                "A friend asks to meet up.",
                "Find a place and a time for the meeting.",
                vec![TwistEffect::AddActivity {
                    activity: twist_activity("meet_friend", "Meet a friend", "🤝"),
                }],
                Vec::new(),
            ),
        ],
    };

    Scenario {
        id: CITY.into(),
        name: "An outing in the city".to_string(),
        levels: vec![errands, agenda],
    }
}

/// Look up a built-in scenario by id.
pub fn builtin_scenario(id: &str) -> Option<Scenario> {
    match id {
        HOME => Some(home_scenario()),
        CITY => Some(city_scenario()),
        _ => None,
    }
}

/// All built-in scenarios.
pub fn builtin_scenarios() -> Vec<Scenario> {
    vec![home_scenario(), city_scenario()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario;

    #[test]
    fn builtin_scenarios_validate() {
        for s in builtin_scenarios() {
            let result = scenario::validate(&s);
            assert!(result.is_ok(), "{} failed validation: {result:?}", s.id);
        }
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(builtin_scenario(HOME).map(|s| s.level_count()), Some(3));
        assert_eq!(builtin_scenario(CITY).map(|s| s.level_count()), Some(2));
        assert!(builtin_scenario("moon").is_none());
    }

    #[test]
    fn first_levels_are_spatial_only() {
        for s in builtin_scenarios() {
            let first = s.level(1);
            assert!(first.is_some_and(|l| !l.enable_timeline && l.disruption_events.is_empty()));
        }
    }

    #[test]
    fn twist_activities_are_marked() {
        let home = home_scenario();
        let injected = home
            .levels
            .iter()
            .flat_map(|l| &l.disruption_events)
            .flat_map(|e| &e.effects)
            .filter_map(|effect| match effect {
                TwistEffect::AddActivity { activity } => Some(activity.category),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert!(!injected.is_empty());
        assert!(injected.iter().all(|c| *c == ActivityCategory::Twist));
    }

    #[test]
    fn builtins_serialize_to_json() {
        let json = serde_json::to_string(&home_scenario());
        assert!(json.is_ok());
        if let Ok(json) = json {
            let parsed = scenario::parse_json(&json);
            assert_eq!(parsed.ok(), Some(home_scenario()));
        }
    }
}
