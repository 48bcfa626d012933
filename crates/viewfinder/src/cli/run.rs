//! Session command handler.

use super::ProcessArgs;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};
use viewfinder::{
    InputError, InputErrorKind, IntakeForm, SessionRequest, SessionResponse, ViewfinderConfig,
    ViewfinderError, ViewfinderResult, build_pipeline,
};

/// Build the request described by the command-line arguments.
///
/// A request file supplies the whole request; `--stage`, `--images` and
/// `--max-images` override its fields when given.
///
/// # Errors
///
/// Returns an [`InputError`] when a file cannot be read or parsed.
pub fn build_request(args: &ProcessArgs) -> ViewfinderResult<SessionRequest> {
    let mut request = if let Some(id) = &args.conversation_id {
        SessionRequest::for_conversation(id.clone())
    } else if let Some(path) = &args.transcript_file {
        SessionRequest::for_transcript(read_input(path)?)
    } else if let Some(path) = &args.intake_file {
        let form: IntakeForm = parse_json(path, &read_input(path)?)?;
        SessionRequest::for_intake(form)
    } else if let Some(path) = &args.request_file {
        parse_json(path, &read_input(path)?)?
    } else {
        SessionRequest::default()
    };

    if let Some(stage) = args.stage {
        request = request.with_stage(stage);
    }
    if args.images {
        request = request.with_images(args.max_images);
    }
    Ok(request)
}

/// Load configuration, run one session and return its envelope.
///
/// # Errors
///
/// Returns an error only when the pipeline cannot be set up. Failures inside
/// the session are reported in the envelope.
pub async fn run_session(
    args: &ProcessArgs,
    config_path: Option<&Path>,
) -> ViewfinderResult<SessionResponse> {
    let config = ViewfinderConfig::load_with(config_path)?;
    let request = build_request(args)?;
    debug!(
        stage = %request.stage_selector,
        images = request.generate_images,
        "Request built"
    );

    let pipeline = build_pipeline(&config, request.generate_images)?;
    let response = pipeline.process(request).await;
    info!(success = response.is_success(), "Session complete");
    Ok(response)
}

fn read_input(path: &Path) -> ViewfinderResult<String> {
    let result = if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text).map(|_| text)
    } else {
        std::fs::read_to_string(path)
    };
    result.map_err(|e| {
        ViewfinderError::from(InputError::new(InputErrorKind::InvalidRequest(format!(
            "cannot read {}: {}",
            path.display(),
            e
        ))))
    })
}

fn parse_json<T: serde::de::DeserializeOwned>(path: &Path, text: &str) -> ViewfinderResult<T> {
    serde_json::from_str(text).map_err(|e| {
        ViewfinderError::from(InputError::new(InputErrorKind::InvalidRequest(format!(
            "{} is not valid JSON: {}",
            path.display(),
            e
        ))))
    })
}
