use viewfinder_core::{
    ErrorKind, GeneratedImageAsset, LocationCandidate, PipelineOutputs, SessionResponse,
    ShotPlan, Stage,
};
use viewfinder_error::{
    AcquisitionError, AcquisitionErrorKind, GenerationError, GenerationErrorKind, InputError,
    InputErrorKind, ViewfinderError,
};

fn location(name: &str) -> LocationCandidate {
    LocationCandidate {
        name: name.to_string(),
        address: None,
        description: "Open lawn with old oaks".to_string(),
        best_time: "Morning".to_string(),
        lighting_notes: "Dappled".to_string(),
        accessibility_notes: "Flat paths".to_string(),
        permit_notes: "None".to_string(),
        alternatives: vec![],
    }
}

#[test]
fn success_envelope_omits_stages_not_run() {
    let response = SessionResponse::success(PipelineOutputs {
        locations: Some(vec![location("Park")]),
        ..Default::default()
    });

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["success"], true);
    assert!(json.get("context").is_none());
    assert!(json.get("shots").is_none());
    assert_eq!(json["locations"][0]["bestTime"], "Morning");
    assert!(json["timestamp"].is_string());
    assert!(response.is_success());
}

#[test]
fn shot_image_reference_serializes_without_error_text() {
    let shot = ShotPlan {
        location_index: 0,
        shot_number: 1,
        composition: "Wide".to_string(),
        technical: "35mm f/4".to_string(),
        direction: "Walk toward camera".to_string(),
        image: Some(GeneratedImageAsset::generated(1, "file:///tmp/a.png")),
    };

    let json = serde_json::to_value(&shot).unwrap();
    assert_eq!(json["locationIndex"], 0);
    assert_eq!(json["image"]["uri"], "file:///tmp/a.png");
    assert!(json["image"].get("error").is_none());
}

#[test]
fn failure_envelope_carries_kind_and_stage() {
    let err: ViewfinderError = AcquisitionError::new(AcquisitionErrorKind::Failed(
        "conv_1".into(),
    ))
    .into();
    let response = SessionResponse::from_error(&err, Stage::Transcript);

    let failure = response.as_failure().unwrap();
    assert_eq!(failure.error_kind, ErrorKind::UpstreamFailed);
    assert_eq!(failure.stage, Stage::Transcript);
    assert!(!failure.message.contains("line"));

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["errorKind"], "upstream-failed");
    assert_eq!(json["stage"], "transcript");
}

#[test]
fn classification_follows_error_taxonomy() {
    let cases: Vec<(ViewfinderError, ErrorKind)> = vec![
        (
            InputError::new(InputErrorKind::MultipleTranscriptSources(2)).into(),
            ErrorKind::InvalidInput,
        ),
        (
            InputError::new(InputErrorKind::NoUsableContent("transcript".into())).into(),
            ErrorKind::NoUsableContent,
        ),
        (
            AcquisitionError::new(AcquisitionErrorKind::Unavailable("refused".into())).into(),
            ErrorKind::UpstreamUnavailable,
        ),
        (
            AcquisitionError::new(AcquisitionErrorKind::Timeout {
                conversation_id: "c".into(),
                attempts: 30,
                waited_ms: 60_000,
            })
            .into(),
            ErrorKind::UpstreamTimeout,
        ),
        (
            GenerationError::new(GenerationErrorKind::Unavailable("503".into())).into(),
            ErrorKind::UpstreamUnavailable,
        ),
        (
            GenerationError::new(GenerationErrorKind::Exhausted {
                stage: "context".into(),
                attempts: 2,
                reason: "no JSON".into(),
            })
            .into(),
            ErrorKind::GenerationFailed,
        ),
    ];

    for (err, expected) in cases {
        assert_eq!(ErrorKind::classify(&err), expected, "{}", err);
    }
}
