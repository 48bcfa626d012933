//! Canned model output and request data.

use serde_json::{Value, json};
use viewfinder_core::{LocationCandidate, PlanningContext, Turn};

/// Schema names used by the generation stages.
pub const CONTEXT_SCHEMA: &str = "planning_context";
#[allow(dead_code)]
pub const LOCATIONS_SCHEMA: &str = "location_candidates";
#[allow(dead_code)]
pub const SHOTS_SCHEMA: &str = "shot_plan";

/// A context response that omits duration and experience level.
#[allow(dead_code)]
pub fn context_json() -> String {
    json!({
        "shootType": "engagement",
        "subject": "Maya and Theo with their corgi",
        "mood": ["romantic", "playful"],
        "timeOfDay": "sunset",
        "equipment": ["Sony A7 IV", "85mm f/1.8"],
        "locationPreference": "clustered"
    })
    .to_string()
}

fn location(name: &str) -> Value {
    json!({
        "name": name,
        "address": format!("1 {} Way", name),
        "description": format!("{} has sweeping views and soft grass", name),
        "bestTime": "45 minutes before sunset",
        "lightingNotes": "Warm side light",
        "accessibilityNotes": "Short walk from parking",
        "permitNotes": "None for small sessions",
        "alternatives": ["Nearby overlook"]
    })
}

/// A locations response with `count` entries named `Spot 0`, `Spot 1`, ...
#[allow(dead_code)]
pub fn locations_json(count: usize) -> String {
    let locations: Vec<Value> = (0..count).map(|i| location(&format!("Spot {}", i))).collect();
    json!({ "locations": locations }).to_string()
}

/// A shots response with one shot per `(location_index, shot_number, composition)`.
#[allow(dead_code)]
pub fn shots_json(shots: &[(i64, i64, &str)]) -> String {
    let shots: Vec<Value> = shots
        .iter()
        .map(|(index, number, composition)| {
            json!({
                "locationIndex": index,
                "shotNumber": number,
                "composition": composition,
                "technical": "85mm, f/2, 1/500s",
                "direction": "Walk hand in hand"
            })
        })
        .collect();
    json!({ "shots": shots }).to_string()
}

/// `count` valid shots spread over `location_count` locations.
#[allow(dead_code)]
pub fn many_shots_json(count: usize, location_count: usize) -> String {
    let shots: Vec<(i64, i64, String)> = (0..count)
        .map(|i| {
            (
                (i % location_count) as i64,
                (i + 1) as i64,
                format!("Composition {}", i + 1),
            )
        })
        .collect();
    let borrowed: Vec<(i64, i64, &str)> = shots
        .iter()
        .map(|(index, number, composition)| (*index, *number, composition.as_str()))
        .collect();
    shots_json(&borrowed)
}

/// A short two-turn conversation.
#[allow(dead_code)]
pub fn conversation_turns() -> Vec<Turn> {
    vec![
        Turn::agent("Hi! What kind of shoot are you planning?"),
        Turn::user("An engagement shoot at sunset with our corgi, something playful."),
        Turn::agent("   "),
    ]
}

/// A complete planning context for requests that reuse upstream output.
#[allow(dead_code)]
pub fn planning_context() -> PlanningContext {
    PlanningContext::builder()
        .shoot_type("portrait")
        .mood(vec!["moody".to_string(), "editorial".to_string()])
        .time_of_day("blue hour")
        .subject("a cellist")
        .duration("90 minutes")
        .experience_level("advanced")
        .location_preference("spread out")
        .build()
        .expect("complete context")
}

/// Parsed locations matching [`locations_json`].
#[allow(dead_code)]
pub fn locations(count: usize) -> Vec<LocationCandidate> {
    let value: Value = serde_json::from_str(&locations_json(count)).expect("fixture json");
    serde_json::from_value(value["locations"].clone()).expect("fixture locations")
}
