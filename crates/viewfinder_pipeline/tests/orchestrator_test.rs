//! End-to-end tests for the session pipeline with mock capabilities.

mod test_utils;

use std::sync::Arc;
use test_utils::*;
use viewfinder_core::{
    ErrorKind, IntakeForm, PipelineConfig, SessionRequest, SessionResponse, Stage, StageSelector,
};
use viewfinder_pipeline::{SessionPipeline, default_locations};

const TRANSCRIPT: &str = "Agent: What are we shooting?\nUser: Engagement photos at sunset with our corgi.";

fn scripted() -> MockStructuredGenerator {
    let failing_shot = format!("Ring close-up {}", FAIL_MARKER);
    MockStructuredGenerator::new()
        .text(CONTEXT_SCHEMA, context_json())
        .text(LOCATIONS_SCHEMA, locations_json(4))
        .text(
            SHOTS_SCHEMA,
            shots_json(&[
                (0, 1, "Wide establishing shot"),
                (2, 2, failing_shot.as_str()),
                (3, 3, "Silhouette kiss"),
            ]),
        )
}

fn pipeline(generator: &Arc<MockStructuredGenerator>) -> SessionPipeline {
    SessionPipeline::builder()
        .generator(generator.clone())
        .build()
        .expect("pipeline")
}

fn failure(response: &SessionResponse) -> (ErrorKind, Stage) {
    let failure = response.as_failure().expect("failure envelope");
    (failure.error_kind, failure.stage)
}

#[tokio::test]
async fn test_full_run_produces_every_output() {
    let generator = Arc::new(scripted());

    let response = pipeline(&generator)
        .process(SessionRequest::for_transcript(TRANSCRIPT))
        .await;

    let success = response.as_success().expect("success envelope");
    let context = success.context.as_ref().expect("context");
    let locations = success.locations.as_ref().expect("locations");
    let shots = success.shots.as_ref().expect("shots");

    assert_eq!(context.duration(), "2 hours");
    assert_eq!(locations.len(), 4);
    assert_eq!(shots.len(), 3);
    assert!(shots.iter().all(|s| s.location_index < locations.len()));
    assert!(shots.iter().all(|s| s.image.is_none()));
}

#[tokio::test]
async fn test_failed_image_does_not_fail_the_session() {
    let generator = Arc::new(scripted());
    let images = Arc::new(MockImageGenerator::default());
    let storage = Arc::new(MemoryStorage::new());
    let pipeline = SessionPipeline::builder()
        .generator(generator.clone())
        .images(images.clone())
        .storage(storage.clone())
        .build()
        .expect("pipeline");

    let response = pipeline
        .process(SessionRequest::for_transcript(TRANSCRIPT).with_images(None))
        .await;

    assert!(response.is_success());
    let shots = response
        .as_success()
        .and_then(|s| s.shots.clone())
        .expect("shots");
    assert!(shots[0].image.is_some());
    assert!(shots[1].image.is_none());
    assert!(shots[2].image.is_some());
    assert_eq!(images.call_count(), 3);
    assert_eq!(storage.keys().len(), 2);
}

#[tokio::test]
async fn test_default_cap_is_six_images() {
    let generator = Arc::new(
        MockStructuredGenerator::new()
            .text(CONTEXT_SCHEMA, context_json())
            .text(LOCATIONS_SCHEMA, locations_json(5))
            .text(SHOTS_SCHEMA, many_shots_json(10, 5)),
    );
    let images = Arc::new(MockImageGenerator::default());
    let pipeline = SessionPipeline::builder()
        .generator(generator.clone())
        .images(images.clone())
        .storage(Arc::new(MemoryStorage::new()))
        .build()
        .expect("pipeline");

    let response = pipeline
        .process(SessionRequest::for_transcript(TRANSCRIPT).with_images(None))
        .await;

    assert!(response.is_success());
    assert_eq!(images.call_count(), 6);

    let response = pipeline
        .process(SessionRequest::for_transcript(TRANSCRIPT).with_images(Some(2)))
        .await;
    assert!(response.is_success());
    assert_eq!(images.call_count(), 8);
}

#[tokio::test]
async fn test_context_selector_stops_after_context() {
    let generator = Arc::new(scripted());

    let response = pipeline(&generator)
        .process(SessionRequest::for_transcript(TRANSCRIPT).with_stage(StageSelector::Context))
        .await;

    let success = response.as_success().expect("success envelope");
    assert!(success.context.is_some());
    assert!(success.locations.is_none());
    assert!(success.shots.is_none());
    assert_eq!(generator.call_count(LOCATIONS_SCHEMA), 0);
    assert_eq!(generator.call_count(SHOTS_SCHEMA), 0);
}

#[tokio::test]
async fn test_shots_selector_reuses_supplied_upstream_outputs() {
    let generator = Arc::new(scripted());
    let mut request = SessionRequest::for_transcript(TRANSCRIPT).with_stage(StageSelector::Shots);
    request.context = Some(planning_context());
    request.locations = Some(locations(4));

    let response = pipeline(&generator).process(request).await;

    let success = response.as_success().expect("success envelope");
    assert!(success.context.is_none());
    assert!(success.locations.is_none());
    assert_eq!(success.shots.as_ref().map(Vec::len), Some(3));
    assert_eq!(generator.call_count(CONTEXT_SCHEMA), 0);
    assert_eq!(generator.call_count(LOCATIONS_SCHEMA), 0);
    assert!(generator.prompts_for(SHOTS_SCHEMA)[0].contains("a cellist"));
}

#[tokio::test]
async fn test_full_selector_ignores_supplied_context() {
    let generator = Arc::new(scripted());
    let mut request = SessionRequest::for_transcript(TRANSCRIPT);
    request.context = Some(planning_context());

    let response = pipeline(&generator).process(request).await;

    assert!(response.is_success());
    assert_eq!(generator.call_count(CONTEXT_SCHEMA), 1);
}

#[tokio::test]
async fn test_empty_supplied_locations_are_rejected() {
    let generator = Arc::new(scripted());
    let mut request = SessionRequest::for_transcript(TRANSCRIPT).with_stage(StageSelector::Shots);
    request.context = Some(planning_context());
    request.locations = Some(Vec::new());

    let response = pipeline(&generator).process(request).await;

    assert_eq!(failure(&response), (ErrorKind::InvalidInput, Stage::Request));
    assert_eq!(generator.total_calls(), 0);
}

#[tokio::test]
async fn test_missing_and_multiple_sources_are_invalid_input() {
    let generator = Arc::new(scripted());
    let pipeline = pipeline(&generator);

    let response = pipeline.process(SessionRequest::default()).await;
    assert_eq!(failure(&response), (ErrorKind::InvalidInput, Stage::Request));

    let mut request = SessionRequest::for_transcript(TRANSCRIPT);
    request.conversation_id = Some("conv_1".to_string());
    let response = pipeline.process(request).await;
    assert_eq!(failure(&response), (ErrorKind::InvalidInput, Stage::Request));

    assert_eq!(generator.total_calls(), 0);
}

#[tokio::test]
async fn test_blank_transcript_has_no_usable_content() {
    let generator = Arc::new(scripted());

    let response = pipeline(&generator)
        .process(SessionRequest::for_transcript("   \n\t"))
        .await;

    assert_eq!(
        failure(&response),
        (ErrorKind::NoUsableContent, Stage::Transcript)
    );
    assert_eq!(generator.total_calls(), 0);
}

#[tokio::test]
async fn test_blank_transcript_is_rejected_when_context_is_supplied() {
    let generator = Arc::new(scripted());
    let mut request =
        SessionRequest::for_transcript("   \n\t").with_stage(StageSelector::Locations);
    request.context = Some(planning_context());

    let response = pipeline(&generator).process(request).await;

    assert_eq!(
        failure(&response),
        (ErrorKind::NoUsableContent, Stage::Transcript)
    );
    assert_eq!(generator.total_calls(), 0);
}

#[tokio::test]
async fn test_blank_intake_form_is_rejected_when_upstream_is_supplied() {
    let generator = Arc::new(scripted());
    let mut request =
        SessionRequest::for_intake(IntakeForm::default()).with_stage(StageSelector::Shots);
    request.context = Some(planning_context());
    request.locations = Some(locations(4));

    let response = pipeline(&generator).process(request).await;

    assert_eq!(
        failure(&response),
        (ErrorKind::NoUsableContent, Stage::Transcript)
    );
    assert_eq!(generator.total_calls(), 0);
}

#[tokio::test]
async fn test_context_failure_aborts_later_stages() {
    let generator = Arc::new(
        MockStructuredGenerator::new()
            .respond(CONTEXT_SCHEMA, MockResponse::Unavailable("quota".to_string()))
            .text(LOCATIONS_SCHEMA, locations_json(4)),
    );

    let response = pipeline(&generator)
        .process(SessionRequest::for_transcript(TRANSCRIPT))
        .await;

    assert_eq!(
        failure(&response),
        (ErrorKind::UpstreamUnavailable, Stage::Context)
    );
    assert_eq!(generator.call_count(LOCATIONS_SCHEMA), 0);
}

#[tokio::test]
async fn test_location_fallback_still_reports_success() {
    let generator = Arc::new(
        MockStructuredGenerator::new()
            .text(CONTEXT_SCHEMA, context_json())
            .text(LOCATIONS_SCHEMA, "I could not think of any places.")
            .text(SHOTS_SCHEMA, "also not json"),
    );

    let response = pipeline(&generator)
        .process(SessionRequest::for_transcript(TRANSCRIPT))
        .await;

    let success = response.as_success().expect("success envelope");
    assert_eq!(success.locations.as_ref(), Some(&default_locations()));
    let shots = success.shots.as_ref().expect("shots");
    assert_eq!(shots.len(), 4);
    assert!(shots.iter().all(|s| s.location_index < 2));
}

#[tokio::test(start_paused = true)]
async fn test_conversation_timeout_is_reported_at_transcript_stage() {
    let generator = Arc::new(scripted());
    let conversations = Arc::new(MockConversationSource::stuck());
    let config = PipelineConfig::builder()
        .poll_attempts(3u32)
        .poll_interval_ms(100u64)
        .build()
        .expect("config");
    let pipeline = SessionPipeline::builder()
        .generator(generator.clone())
        .conversations(conversations.clone())
        .config(config)
        .build()
        .expect("pipeline");

    let response = pipeline
        .process(SessionRequest::for_conversation("conv_slow"))
        .await;

    assert_eq!(
        failure(&response),
        (ErrorKind::UpstreamTimeout, Stage::Transcript)
    );
    assert_eq!(conversations.call_count(), 3);
    assert_eq!(generator.total_calls(), 0);
}

#[tokio::test]
async fn test_conversation_request_runs_end_to_end() {
    let generator = Arc::new(scripted());
    let conversations = Arc::new(MockConversationSource::done(conversation_turns()));
    let pipeline = SessionPipeline::builder()
        .generator(generator.clone())
        .conversations(conversations)
        .build()
        .expect("pipeline");

    let response = pipeline
        .process(SessionRequest::for_conversation("conv_ok"))
        .await;

    assert!(response.is_success());
    assert!(generator.prompts_for(CONTEXT_SCHEMA)[0].contains("something playful"));
}

#[tokio::test]
async fn test_images_without_capability_are_skipped() {
    let generator = Arc::new(scripted());

    let response = pipeline(&generator)
        .process(SessionRequest::for_transcript(TRANSCRIPT).with_images(None))
        .await;

    let shots = response
        .as_success()
        .and_then(|s| s.shots.clone())
        .expect("shots");
    assert!(shots.iter().all(|s| s.image.is_none()));
}

#[tokio::test]
async fn test_envelopes_serialize_to_the_wire_shape() {
    let generator = Arc::new(scripted());
    let pipeline = pipeline(&generator);

    let response = pipeline
        .process(SessionRequest::for_transcript(TRANSCRIPT).with_stage(StageSelector::Locations))
        .await;
    let json = serde_json::to_value(&response).expect("serializable");
    assert_eq!(json["success"], true);
    assert_eq!(json["context"]["shootType"], "engagement");
    assert_eq!(json["locations"][0]["bestTime"], "45 minutes before sunset");
    assert!(json.get("shots").is_none());
    assert!(json["timestamp"].is_string());

    let response = pipeline.process(SessionRequest::default()).await;
    let json = serde_json::to_value(&response).expect("serializable");
    assert_eq!(json["success"], false);
    assert_eq!(json["errorKind"], "invalid-input");
    assert_eq!(json["stage"], "request");
    assert!(json["message"].as_str().unwrap_or_default().contains("No transcript source"));
}
