//! Location candidate generation.

use crate::defaults::LOCATION_RANGE;
use crate::{GenerationStage, default_locations, prompts};
use serde::Deserialize;
use serde_json::Value;
use viewfinder_core::{
    FieldType, LocationCandidate, OutputSchema, PlanningContext, SchemaField, Stage,
};

/// Proposes [`LocationCandidate`]s for a planning context.
///
/// Falls back to [`default_locations`] when generation fails.
#[derive(Debug, Clone, Copy)]
pub struct LocationsStage<'a> {
    context: &'a PlanningContext,
}

impl<'a> LocationsStage<'a> {
    /// Stage for the given context.
    pub fn new(context: &'a PlanningContext) -> Self {
        Self { context }
    }
}

#[derive(Debug, Deserialize)]
struct RawLocations {
    locations: Vec<LocationCandidate>,
}

impl GenerationStage for LocationsStage<'_> {
    type Output = Vec<LocationCandidate>;

    const STAGE: Stage = Stage::Locations;

    fn schema(&self) -> OutputSchema {
        locations_schema()
    }

    fn prompt(&self, schema: &OutputSchema) -> String {
        prompts::locations_prompt(self.context, schema)
    }

    fn interpret(&self, value: Value) -> Result<Vec<LocationCandidate>, String> {
        let raw: RawLocations = serde_json::from_value(value).map_err(|e| e.to_string())?;
        check_locations(raw.locations)
    }

    fn fallback(&self) -> Option<Vec<LocationCandidate>> {
        Some(default_locations())
    }
}

/// Output schema of the locations stage.
pub fn locations_schema() -> OutputSchema {
    OutputSchema::new(
        "location_candidates",
        "Four or five candidate shooting locations",
        vec![SchemaField::required(
            "locations",
            FieldType::ObjectArray(vec![
                SchemaField::required("name", FieldType::String, "Name of the place"),
                SchemaField::optional("address", FieldType::String, "Street address or area"),
                SchemaField::required(
                    "description",
                    FieldType::String,
                    "What the place looks like and why it suits the shoot",
                ),
                SchemaField::required("bestTime", FieldType::String, "When to shoot there"),
                SchemaField::required(
                    "lightingNotes",
                    FieldType::String,
                    "How the light behaves at the best time",
                ),
                SchemaField::required(
                    "accessibilityNotes",
                    FieldType::String,
                    "Parking, walking distance, terrain",
                ),
                SchemaField::required(
                    "permitNotes",
                    FieldType::String,
                    "Whether a permit or permission is needed",
                ),
                SchemaField::optional(
                    "alternatives",
                    FieldType::StringArray,
                    "Similar nearby places",
                ),
            ]),
            "Candidate locations, best first",
        )],
    )
}

/// Enforce the location count: too few is invalid, extras are dropped.
fn check_locations(mut locations: Vec<LocationCandidate>) -> Result<Vec<LocationCandidate>, String> {
    let (min, max) = LOCATION_RANGE;
    if locations.len() < min {
        return Err(format!(
            "expected at least {} locations, got {}",
            min,
            locations.len()
        ));
    }
    if let Some(blank) = locations.iter().position(|l| l.name.trim().is_empty()) {
        return Err(format!("locations[{}].name: blank", blank));
    }
    locations.truncate(max);
    Ok(locations)
}
