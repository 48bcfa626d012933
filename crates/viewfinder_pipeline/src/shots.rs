//! Shot plan generation.

use crate::{GenerationStage, default_shots, prompts};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use viewfinder_core::{
    FieldType, LocationCandidate, OutputSchema, PlanningContext, SchemaField, ShotPlan, Stage,
};

/// Plans [`ShotPlan`]s across a list of locations.
///
/// Every accepted plan satisfies `location_index < locations.len()`, has a
/// unique shot number of at least 1 and is sorted by shot number. The
/// fallback is [`default_shots`] built against the same location count.
#[derive(Debug, Clone, Copy)]
pub struct ShotsStage<'a> {
    context: &'a PlanningContext,
    locations: &'a [LocationCandidate],
}

impl<'a> ShotsStage<'a> {
    /// Stage for the given context and locations.
    pub fn new(context: &'a PlanningContext, locations: &'a [LocationCandidate]) -> Self {
        Self { context, locations }
    }
}

/// Model output with indices kept signed so negatives can be reported.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawShot {
    location_index: i64,
    shot_number: i64,
    composition: String,
    technical: String,
    direction: String,
}

#[derive(Debug, Deserialize)]
struct RawShots {
    shots: Vec<RawShot>,
}

impl GenerationStage for ShotsStage<'_> {
    type Output = Vec<ShotPlan>;

    const STAGE: Stage = Stage::Shots;

    fn schema(&self) -> OutputSchema {
        shots_schema()
    }

    fn prompt(&self, schema: &OutputSchema) -> String {
        prompts::shots_prompt(self.context, self.locations, schema)
    }

    fn interpret(&self, value: Value) -> Result<Vec<ShotPlan>, String> {
        let raw: RawShots = serde_json::from_value(value).map_err(|e| e.to_string())?;
        check_shots(raw.shots, self.locations.len())
    }

    fn fallback(&self) -> Option<Vec<ShotPlan>> {
        Some(default_shots(self.locations.len()))
    }
}

/// Output schema of the shots stage.
pub fn shots_schema() -> OutputSchema {
    OutputSchema::new(
        "shot_plan",
        "Ordered shot list for the session",
        vec![SchemaField::required(
            "shots",
            FieldType::ObjectArray(vec![
                SchemaField::required(
                    "locationIndex",
                    FieldType::Integer,
                    "Zero-based index into the location list",
                ),
                SchemaField::required("shotNumber", FieldType::Integer, "Shot number, from 1"),
                SchemaField::required(
                    "composition",
                    FieldType::String,
                    "Framing, subject placement and background",
                ),
                SchemaField::required(
                    "technical",
                    FieldType::String,
                    "Lens, aperture, shutter speed, ISO and lighting",
                ),
                SchemaField::required("direction", FieldType::String, "Posing and direction"),
            ]),
            "Shots in the order they should be taken",
        )],
    )
}

fn check_shots(raw: Vec<RawShot>, location_count: usize) -> Result<Vec<ShotPlan>, String> {
    if raw.is_empty() {
        return Err("shots: empty list".to_string());
    }

    let mut seen = HashSet::new();
    let mut shots = Vec::with_capacity(raw.len());
    for (i, shot) in raw.into_iter().enumerate() {
        let location_index = usize::try_from(shot.location_index)
            .ok()
            .filter(|index| *index < location_count)
            .ok_or_else(|| {
                format!(
                    "shots[{}].locationIndex: {} out of range for {} locations",
                    i, shot.location_index, location_count
                )
            })?;
        let shot_number = u32::try_from(shot.shot_number)
            .ok()
            .filter(|number| *number >= 1)
            .ok_or_else(|| format!("shots[{}].shotNumber: {} is not positive", i, shot.shot_number))?;
        if !seen.insert(shot_number) {
            return Err(format!("shots[{}].shotNumber: duplicate {}", i, shot_number));
        }

        shots.push(ShotPlan {
            location_index,
            shot_number,
            composition: shot.composition,
            technical: shot.technical,
            direction: shot.direction,
            image: None,
        });
    }

    shots.sort_by_key(|shot| shot.shot_number);
    Ok(shots)
}
