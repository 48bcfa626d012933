//! Planning context extraction.

use crate::defaults::{
    DEFAULT_DURATION, DEFAULT_EXPERIENCE_LEVEL, DEFAULT_LOCATION_PREFERENCE, DEFAULT_MOOD,
    DEFAULT_TIME_OF_DAY, MOOD_RANGE,
};
use crate::{GenerationStage, prompts};
use serde::Deserialize;
use serde_json::Value;
use viewfinder_core::{FieldType, OutputSchema, PlanningContext, SchemaField, Stage, TranscriptText};

/// Extracts a [`PlanningContext`] from a transcript.
///
/// Has no fallback: a shoot's intent cannot be defaulted.
#[derive(Debug, Clone, Copy)]
pub struct ContextStage<'a> {
    transcript: &'a TranscriptText,
}

impl<'a> ContextStage<'a> {
    /// Stage over the given transcript.
    pub fn new(transcript: &'a TranscriptText) -> Self {
        Self { transcript }
    }
}

/// Model output before defaults are applied.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContext {
    shoot_type: String,
    subject: String,
    mood: Option<Vec<String>>,
    time_of_day: Option<String>,
    duration: Option<String>,
    equipment: Option<Vec<String>>,
    experience_level: Option<String>,
    special_requests: Option<String>,
    location_name: Option<String>,
    date: Option<String>,
    start_time: Option<String>,
    location_preference: Option<String>,
}

impl GenerationStage for ContextStage<'_> {
    type Output = PlanningContext;

    const STAGE: Stage = Stage::Context;

    fn schema(&self) -> OutputSchema {
        context_schema()
    }

    fn prompt(&self, schema: &OutputSchema) -> String {
        prompts::context_prompt(self.transcript, schema)
    }

    fn interpret(&self, value: Value) -> Result<PlanningContext, String> {
        let raw: RawContext = serde_json::from_value(value).map_err(|e| e.to_string())?;
        apply_defaults(raw)
    }

    fn fallback(&self) -> Option<PlanningContext> {
        None
    }
}

/// Output schema of the context stage.
pub fn context_schema() -> OutputSchema {
    OutputSchema::new(
        "planning_context",
        "What the client wants from the shoot",
        vec![
            SchemaField::required(
                "shootType",
                FieldType::String,
                "Kind of shoot, e.g. portrait, engagement, family, product",
            ),
            SchemaField::required(
                "subject",
                FieldType::String,
                "Who or what is being photographed",
            ),
            SchemaField::optional(
                "mood",
                FieldType::StringArray,
                "Two or three words describing the feel of the images",
            ),
            SchemaField::optional("timeOfDay", FieldType::String, "Preferred time of day"),
            SchemaField::optional("duration", FieldType::String, "Expected length of the shoot"),
            SchemaField::optional(
                "equipment",
                FieldType::StringArray,
                "Cameras, lenses or lighting mentioned",
            ),
            SchemaField::optional(
                "experienceLevel",
                FieldType::String,
                "Photographer experience: beginner, intermediate or advanced",
            ),
            SchemaField::optional(
                "specialRequests",
                FieldType::String,
                "Anything else the client asked for",
            ),
            SchemaField::optional(
                "locationName",
                FieldType::String,
                "A specific place the client named",
            ),
            SchemaField::optional("date", FieldType::String, "Shoot date"),
            SchemaField::optional("startTime", FieldType::String, "Start time"),
            SchemaField::optional(
                "locationPreference",
                FieldType::String,
                "clustered (close together) or spread out",
            ),
        ],
    )
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn or_default(value: Option<String>, default: &str) -> String {
    non_blank(value).unwrap_or_else(|| default.to_string())
}

fn normalize_mood(mood: Vec<String>) -> Vec<String> {
    let (min, max) = MOOD_RANGE;
    let mut normalized: Vec<String> = mood
        .into_iter()
        .filter_map(|m| non_blank(Some(m)))
        .take(max)
        .collect();

    for default in DEFAULT_MOOD {
        if normalized.len() >= min {
            break;
        }
        if !normalized.iter().any(|m| m.eq_ignore_ascii_case(default)) {
            normalized.push(default.to_string());
        }
    }
    normalized
}

fn apply_defaults(raw: RawContext) -> Result<PlanningContext, String> {
    let shoot_type = non_blank(Some(raw.shoot_type)).ok_or("shootType is blank")?;
    let subject = non_blank(Some(raw.subject)).ok_or("subject is blank")?;

    let equipment = raw
        .equipment
        .unwrap_or_default()
        .into_iter()
        .filter_map(|e| non_blank(Some(e)))
        .collect::<Vec<_>>();

    let mut builder = PlanningContext::builder();
    builder
        .shoot_type(shoot_type)
        .subject(subject)
        .mood(normalize_mood(raw.mood.unwrap_or_default()))
        .time_of_day(or_default(raw.time_of_day, DEFAULT_TIME_OF_DAY))
        .duration(or_default(raw.duration, DEFAULT_DURATION))
        .equipment(equipment)
        .experience_level(or_default(raw.experience_level, DEFAULT_EXPERIENCE_LEVEL))
        .location_preference(or_default(
            raw.location_preference,
            DEFAULT_LOCATION_PREFERENCE,
        ));

    if let Some(special_requests) = non_blank(raw.special_requests) {
        builder.special_requests(special_requests);
    }
    if let Some(location_name) = non_blank(raw.location_name) {
        builder.location_name(location_name);
    }
    if let Some(date) = non_blank(raw.date) {
        builder.date(date);
    }
    if let Some(start_time) = non_blank(raw.start_time) {
        builder.start_time(start_time);
    }

    builder.build().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stage_transcript() -> TranscriptText {
        TranscriptText::parse("user: family photos in the park", "transcript")
            .expect("non-empty transcript")
    }

    #[test]
    fn missing_fields_get_documented_defaults() {
        let transcript = stage_transcript();
        let stage = ContextStage::new(&transcript);

        let context = stage
            .interpret(json!({"shootType": "family", "subject": "parents and two kids"}))
            .expect("interpretable context");

        assert_eq!(context.duration(), DEFAULT_DURATION);
        assert_eq!(context.experience_level(), DEFAULT_EXPERIENCE_LEVEL);
        assert_eq!(context.location_preference(), DEFAULT_LOCATION_PREFERENCE);
        assert_eq!(context.time_of_day(), DEFAULT_TIME_OF_DAY);
        assert_eq!(context.mood(), &vec!["natural".to_string(), "relaxed".to_string()]);
        assert!(context.special_requests().is_none());
    }

    #[test]
    fn blank_subject_is_rejected() {
        let transcript = stage_transcript();
        let stage = ContextStage::new(&transcript);

        let err = stage
            .interpret(json!({"shootType": "family", "subject": "   "}))
            .unwrap_err();
        assert!(err.contains("subject"));
    }

    #[test]
    fn mood_is_truncated_and_padded() {
        assert_eq!(
            normalize_mood(vec!["a".into(), "b".into(), "c".into(), "d".into()]),
            vec!["a", "b", "c"]
        );
        assert_eq!(normalize_mood(vec!["Natural".into()]), vec!["Natural", "relaxed"]);
        assert_eq!(normalize_mood(vec![" ".into()]), vec!["natural", "relaxed"]);
    }

    #[test]
    fn blank_optional_strings_become_absent() {
        let transcript = stage_transcript();
        let stage = ContextStage::new(&transcript);

        let context = stage
            .interpret(json!({
                "shootType": "portrait",
                "subject": "a chef",
                "date": "",
                "startTime": " 6pm ",
                "duration": "   "
            }))
            .expect("interpretable context");

        assert!(context.date().is_none());
        assert_eq!(context.start_time().as_deref(), Some("6pm"));
        assert_eq!(context.duration(), DEFAULT_DURATION);
    }
}
