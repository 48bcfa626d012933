//! Documented defaults substituted for missing or failed output.

use viewfinder_core::{LocationCandidate, ShotPlan};

/// Duration when the conversation never mentions one.
pub const DEFAULT_DURATION: &str = "2 hours";
/// Experience level when the conversation never mentions one.
pub const DEFAULT_EXPERIENCE_LEVEL: &str = "intermediate";
/// Location preference when the conversation never mentions one.
pub const DEFAULT_LOCATION_PREFERENCE: &str = "clustered";
/// Time of day when the conversation never mentions one.
pub const DEFAULT_TIME_OF_DAY: &str = "golden hour";
/// Mood descriptors used to pad a short mood list, in order.
pub const DEFAULT_MOOD: [&str; 2] = ["natural", "relaxed"];

/// Minimum and maximum mood descriptors in a planning context.
pub const MOOD_RANGE: (usize, usize) = (2, 3);
/// Minimum and maximum location candidates in a generated list.
pub const LOCATION_RANGE: (usize, usize) = (4, 5);

/// Two generic locations used when location generation fails.
///
/// # Examples
///
/// ```
/// use viewfinder_pipeline::default_locations;
///
/// let locations = default_locations();
/// assert_eq!(locations.len(), 2);
/// assert_eq!(locations[0].name, "City Park");
/// ```
pub fn default_locations() -> Vec<LocationCandidate> {
    vec![
        LocationCandidate {
            name: "City Park".to_string(),
            address: None,
            description: "Open lawns, mature trees and winding paths that give \
                          natural framing and soft backgrounds"
                .to_string(),
            best_time: "Early morning or the hour before sunset".to_string(),
            lighting_notes: "Open shade under trees; backlight across the lawn late in the day"
                .to_string(),
            accessibility_notes: "Paved paths, street parking nearby".to_string(),
            permit_notes: "Usually not required for small personal sessions; check local rules"
                .to_string(),
            alternatives: vec!["Botanical garden".to_string(), "Riverside trail".to_string()],
        },
        LocationCandidate {
            name: "Historic Downtown".to_string(),
            address: None,
            description: "Brick facades, storefronts and alleys with texture and leading lines"
                .to_string(),
            best_time: "Golden hour, or overcast days for even light".to_string(),
            lighting_notes: "Buildings create shade pockets; window reflections add fill"
                .to_string(),
            accessibility_notes: "Flat sidewalks, paid parking garages".to_string(),
            permit_notes: "Avoid blocking sidewalks; private storefronts need owner consent"
                .to_string(),
            alternatives: vec!["Old train station".to_string(), "Arts district".to_string()],
        },
    ]
}

struct ShotTemplate {
    composition: &'static str,
    technical: &'static str,
    direction: &'static str,
}

const DEFAULT_SHOT_TEMPLATES: [ShotTemplate; 4] = [
    ShotTemplate {
        composition: "Wide establishing shot placing the subject small in the scene, \
                      using the location's strongest leading lines",
        technical: "24-35mm, f/5.6, 1/250s, ISO 100-400; expose for the highlights",
        direction: "Walk slowly toward the camera, look at each other or the horizon",
    },
    ShotTemplate {
        composition: "Medium portrait from the waist up, subject off-center on a third",
        technical: "50mm, f/2.8, 1/320s, ISO 200; focus on the nearest eye",
        direction: "Relax the shoulders, shift weight to the back foot, soft smile",
    },
    ShotTemplate {
        composition: "Close-up detail of hands, textures or meaningful props",
        technical: "85mm, f/2, 1/500s, ISO 200; shallow depth of field",
        direction: "Keep hands loose and moving, interact with the prop naturally",
    },
    ShotTemplate {
        composition: "Candid moment framed through foreground elements",
        technical: "85mm, f/2.2, 1/640s, continuous autofocus, burst mode",
        direction: "Talk, laugh and forget the camera for a minute",
    },
];

/// Generic shot plans spread across `location_count` locations.
///
/// Location indices cycle through `0..location_count`, so the plans are
/// valid against any non-empty location list.
///
/// # Examples
///
/// ```
/// use viewfinder_pipeline::default_shots;
///
/// let shots = default_shots(3);
/// assert_eq!(shots.len(), 4);
/// assert_eq!(shots[3].location_index, 0);
/// assert_eq!(shots[0].shot_number, 1);
/// ```
pub fn default_shots(location_count: usize) -> Vec<ShotPlan> {
    let count = location_count.max(1);
    DEFAULT_SHOT_TEMPLATES
        .iter()
        .enumerate()
        .map(|(i, template)| ShotPlan {
            location_index: i % count,
            shot_number: (i + 1) as u32,
            composition: template.composition.to_string(),
            technical: template.technical.to_string(),
            direction: template.direction.to_string(),
            image: None,
        })
        .collect()
}
