//! Tests for the schema-guided generator and its fallback policy.

mod test_utils;

use std::sync::Arc;
use test_utils::*;
use viewfinder_core::{ErrorKind, TranscriptText};
use viewfinder_pipeline::{
    ContextStage, LocationsStage, RunContext, SchemaGuidedGenerator, ShotsStage, StageOutcome,
    default_locations, default_shots,
};

fn transcript() -> TranscriptText {
    TranscriptText::parse("User: engagement shoot at sunset", "transcript").expect("transcript")
}

#[tokio::test]
async fn test_unparseable_locations_fall_back_to_documented_defaults() {
    let mock = Arc::new(
        MockStructuredGenerator::new()
            .text(LOCATIONS_SCHEMA, "Sorry, I can't help with that.")
            .text(LOCATIONS_SCHEMA, "{\"locations\": [ oops"),
    );
    let generator = SchemaGuidedGenerator::new(mock.clone(), 2);
    let context = planning_context();

    let outcome = generator
        .run(&LocationsStage::new(&context), &RunContext::new())
        .await;

    assert!(outcome.is_default());
    assert_eq!(mock.call_count(LOCATIONS_SCHEMA), 2);
    let locations = outcome.into_result().expect("default is success");
    assert_eq!(locations, default_locations());
    assert_eq!(locations.len(), 2);
}

#[tokio::test]
async fn test_second_attempt_recovers_before_fallback() {
    let mock = Arc::new(
        MockStructuredGenerator::new()
            .text(LOCATIONS_SCHEMA, "not json at all")
            .text(
                LOCATIONS_SCHEMA,
                format!("Here you go:\n```json\n{}\n```", locations_json(4)),
            ),
    );
    let generator = SchemaGuidedGenerator::new(mock.clone(), 2);
    let context = planning_context();

    let outcome = generator
        .run(&LocationsStage::new(&context), &RunContext::new())
        .await;

    assert!(matches!(outcome, StageOutcome::Ok(ref l) if l.len() == 4));
    assert_eq!(mock.call_count(LOCATIONS_SCHEMA), 2);
}

#[tokio::test]
async fn test_prose_wrapped_output_is_accepted_first_time() {
    let mock = Arc::new(MockStructuredGenerator::new().text(
        CONTEXT_SCHEMA,
        format!("Based on the conversation, {} Let me know!", context_json()),
    ));
    let generator = SchemaGuidedGenerator::new(mock.clone(), 2);
    let transcript = transcript();

    let outcome = generator
        .run(&ContextStage::new(&transcript), &RunContext::new())
        .await;

    assert!(matches!(outcome, StageOutcome::Ok(_)));
    assert_eq!(mock.call_count(CONTEXT_SCHEMA), 1);
}

#[tokio::test]
async fn test_context_omitting_duration_and_experience_gets_defaults() {
    let mock = Arc::new(MockStructuredGenerator::new().text(CONTEXT_SCHEMA, context_json()));
    let generator = SchemaGuidedGenerator::new(mock, 2);
    let transcript = transcript();

    let context = generator
        .run(&ContextStage::new(&transcript), &RunContext::new())
        .await
        .into_result()
        .expect("context");

    assert_eq!(context.duration(), "2 hours");
    assert_eq!(context.experience_level(), "intermediate");
    assert_eq!(context.shoot_type(), "engagement");
    assert_eq!(context.equipment().len(), 2);
}

#[tokio::test]
async fn test_unavailable_context_is_fatal_upstream_unavailable() {
    let mock = Arc::new(
        MockStructuredGenerator::new()
            .respond(CONTEXT_SCHEMA, MockResponse::Unavailable("503".to_string())),
    );
    let generator = SchemaGuidedGenerator::new(mock.clone(), 2);
    let transcript = transcript();

    let outcome = generator
        .run(&ContextStage::new(&transcript), &RunContext::new())
        .await;

    assert!(outcome.is_fatal());
    assert_eq!(outcome.error_kind(), Some(ErrorKind::UpstreamUnavailable));
    assert_eq!(mock.call_count(CONTEXT_SCHEMA), 2);
}

#[tokio::test]
async fn test_invalid_context_is_fatal_generation_failed() {
    let mock = Arc::new(
        MockStructuredGenerator::new().text(CONTEXT_SCHEMA, r#"{"shootType": "portrait"}"#),
    );
    let generator = SchemaGuidedGenerator::new(mock.clone(), 3);
    let transcript = transcript();

    let outcome = generator
        .run(&ContextStage::new(&transcript), &RunContext::new())
        .await;

    assert_eq!(outcome.error_kind(), Some(ErrorKind::GenerationFailed));
    assert_eq!(mock.call_count(CONTEXT_SCHEMA), 3);
    let message = outcome.into_result().unwrap_err().summary();
    assert!(message.contains("subject: missing required field"), "{}", message);
}

#[tokio::test]
async fn test_out_of_range_shots_fall_back_to_valid_defaults() {
    let mock = Arc::new(
        MockStructuredGenerator::new().text(SHOTS_SCHEMA, shots_json(&[(0, 1, "a"), (7, 2, "b")])),
    );
    let generator = SchemaGuidedGenerator::new(mock.clone(), 2);
    let context = planning_context();
    let locations = locations(4);

    let outcome = generator
        .run(&ShotsStage::new(&context, &locations), &RunContext::new())
        .await;

    assert!(outcome.is_default());
    assert_eq!(mock.call_count(SHOTS_SCHEMA), 2);
    let shots = outcome.into_result().expect("default shots");
    assert_eq!(shots, default_shots(4));
    assert!(shots.iter().all(|s| s.location_index < locations.len()));
}

#[tokio::test]
async fn test_generated_shots_respect_location_count() {
    let mock = Arc::new(MockStructuredGenerator::new().text(SHOTS_SCHEMA, many_shots_json(8, 5)));
    let generator = SchemaGuidedGenerator::new(mock, 2);
    let context = planning_context();
    let locations = locations(5);

    let shots = generator
        .run(&ShotsStage::new(&context, &locations), &RunContext::new())
        .await
        .into_result()
        .expect("shots");

    assert_eq!(shots.len(), 8);
    assert!(shots.iter().all(|s| s.location_index < 5));
    assert!(shots.windows(2).all(|w| w[0].shot_number < w[1].shot_number));
}

#[tokio::test]
async fn test_prompts_carry_upstream_data_and_schema() {
    let mock = Arc::new(MockStructuredGenerator::new().text(SHOTS_SCHEMA, many_shots_json(4, 4)));
    let generator = SchemaGuidedGenerator::new(mock.clone(), 2);
    let context = planning_context();
    let locations = locations(4);

    generator
        .run(&ShotsStage::new(&context, &locations), &RunContext::new())
        .await
        .into_result()
        .expect("shots");

    let prompts = mock.prompts_for(SHOTS_SCHEMA);
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("a cellist"));
    assert!(prompts[0].contains("3. Spot 3"));
    assert!(prompts[0].contains("- locationIndex (integer, required)"));
}

#[tokio::test]
async fn test_zero_attempts_is_clamped_to_one() {
    let mock = Arc::new(MockStructuredGenerator::new().text(LOCATIONS_SCHEMA, "nope"));
    let generator = SchemaGuidedGenerator::new(mock.clone(), 0);
    let context = planning_context();

    let outcome = generator
        .run(&LocationsStage::new(&context), &RunContext::new())
        .await;

    assert_eq!(generator.attempts(), 1);
    assert!(outcome.is_default());
    assert_eq!(mock.call_count(LOCATIONS_SCHEMA), 1);
}
