//! Candidate shooting locations.

use serde::{Deserialize, Serialize};

/// A place the shoot could happen, with practical notes.
///
/// # Examples
///
/// ```
/// use viewfinder_core::LocationCandidate;
///
/// let json = r#"{
///     "name": "Lands End Labyrinth",
///     "description": "Stone labyrinth on a cliff above the Golden Gate",
///     "bestTime": "Sunset",
///     "lightingNotes": "Backlight from the west",
///     "accessibilityNotes": "Steep stairs from the trail",
///     "permitNotes": "None for small groups"
/// }"#;
///
/// let location: LocationCandidate = serde_json::from_str(json).unwrap();
/// assert!(location.address.is_none());
/// assert!(location.alternatives.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationCandidate {
    /// Location name
    pub name: String,
    /// Street address, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// What the place looks like
    pub description: String,
    /// Best time window to shoot there
    pub best_time: String,
    /// Light quality and direction
    pub lighting_notes: String,
    /// Parking, walking distance, stairs
    pub accessibility_notes: String,
    /// Permit requirements
    pub permit_notes: String,
    /// Nearby alternatives by name
    #[serde(default)]
    pub alternatives: Vec<String>,
}
