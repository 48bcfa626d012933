//! Session orchestration.

use crate::{
    ContextStage, GenerationStage, ImageFanOut, LocationsStage, RunContext, SchemaGuidedGenerator,
    ShotsStage, TranscriptAcquirer,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use viewfinder_core::{
    LocationCandidate, PipelineConfig, PipelineOutputs, SessionRequest,
    SessionResponse, ShotPlan, Stage, StageSelector,
};
use viewfinder_error::{InputError, InputErrorKind, ViewfinderError};
use viewfinder_interface::{ConversationSource, ImageGenerator, StructuredGenerator};
use viewfinder_storage::ObjectStorage;

type StageResult<T> = Result<T, (Stage, ViewfinderError)>;

/// Runs a [`SessionRequest`] through the stages its selector needs.
///
/// Stages run strictly in order: transcript, context, locations, shots,
/// then the optional image fan-out. A fatal failure stops the run and is
/// reported with the failing stage; recoverable failures are resolved
/// inside the stage and never reach the envelope.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use viewfinder_core::{SessionRequest, StageSelector};
/// use viewfinder_interface::StructuredGenerator;
/// use viewfinder_pipeline::SessionPipeline;
///
/// # async fn example(generator: Arc<dyn StructuredGenerator>) {
/// let pipeline = SessionPipeline::builder()
///     .generator(generator)
///     .build()
///     .unwrap();
///
/// let request = SessionRequest::for_transcript("user: beach portraits at sunrise")
///     .with_stage(StageSelector::Locations);
/// let response = pipeline.process(request).await;
/// println!("{}", serde_json::to_string_pretty(&response).unwrap());
/// # }
/// ```
#[derive(Clone, derive_builder::Builder)]
#[builder(pattern = "owned")]
pub struct SessionPipeline {
    /// Structured generation capability used by every generation stage
    generator: Arc<dyn StructuredGenerator>,
    /// Conversation capability, required for conversation-id requests
    #[builder(default, setter(strip_option))]
    conversations: Option<Arc<dyn ConversationSource>>,
    /// Image capability, required for illustration
    #[builder(default, setter(strip_option))]
    images: Option<Arc<dyn ImageGenerator>>,
    /// Object storage for generated images
    #[builder(default, setter(strip_option))]
    storage: Option<Arc<dyn ObjectStorage>>,
    /// Pipeline tuning
    #[builder(default)]
    config: PipelineConfig,
}

impl std::fmt::Debug for SessionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionPipeline")
            .field("provider", &self.generator.provider_name())
            .field("model", &self.generator.model_name())
            .field("conversations", &self.conversations.is_some())
            .field("images", &self.images.as_ref().map(|i| i.model_name().to_string()))
            .field("storage", &self.storage.as_ref().map(|s| s.backend_name()))
            .field("config", &self.config)
            .finish()
    }
}

impl SessionPipeline {
    /// Creates a new pipeline builder.
    pub fn builder() -> SessionPipelineBuilder {
        SessionPipelineBuilder::default()
    }

    /// Pipeline tuning in effect.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process one request into a response envelope.
    ///
    /// Never panics and never returns an error: every failure becomes a
    /// failure envelope.
    pub async fn process(&self, request: SessionRequest) -> SessionResponse {
        let ctx = RunContext::new();
        self.process_with(request, &ctx).await
    }

    /// Process a request under an existing [`RunContext`].
    pub async fn process_with(&self, request: SessionRequest, ctx: &RunContext) -> SessionResponse {
        let started = Instant::now();
        tracing::info!(
            parent: ctx.span(),
            selector = %request.stage_selector,
            generate_images = request.generate_images,
            "Session started"
        );

        let result = self.run(&request, ctx).instrument(ctx.span().clone()).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(outputs) => {
                tracing::info!(
                    parent: ctx.span(),
                    elapsed_ms,
                    context = outputs.context.is_some(),
                    locations = outputs.locations.as_ref().map_or(0, Vec::len),
                    shots = outputs.shots.as_ref().map_or(0, Vec::len),
                    "Session succeeded"
                );
                SessionResponse::success(outputs)
            }
            Err((stage, error)) => {
                let response = SessionResponse::from_error(&error, stage);
                tracing::error!(
                    parent: ctx.span(),
                    elapsed_ms,
                    stage = %stage,
                    error = %error,
                    "Session failed"
                );
                response
            }
        }
    }

    async fn run(&self, request: &SessionRequest, ctx: &RunContext) -> StageResult<PipelineOutputs> {
        self.config
            .validate()
            .map_err(|e| (Stage::Request, ViewfinderError::from(e)))?;
        let source = request
            .transcript_source()
            .map_err(|e| (Stage::Request, ViewfinderError::from(e)))?;
        // Inline text is checked even when a supplied context skips acquisition
        if let Some(Err(e)) = TranscriptAcquirer::inline(source) {
            return Err((Stage::Transcript, e));
        }
        let selector = request.stage_selector;
        let reuse = selector != StageSelector::Full;

        let supplied_locations = match (&request.locations, reuse && selector.wants_shots()) {
            (Some(locations), true) if locations.is_empty() => {
                return Err((
                    Stage::Request,
                    ViewfinderError::from(InputError::new(InputErrorKind::InvalidRequest(
                        "locations is empty".to_string(),
                    ))),
                ));
            }
            (Some(locations), true) => Some(locations.clone()),
            _ => None,
        };
        let supplied_context = match (&request.context, reuse && selector.wants_locations()) {
            (Some(context), true) => Some(context.clone()),
            _ => None,
        };

        let mut outputs = PipelineOutputs::default();

        let context = match supplied_context {
            Some(context) => {
                tracing::debug!(parent: ctx.span(), "Reusing supplied planning context");
                context
            }
            None => {
                let acquirer = TranscriptAcquirer::new(
                    self.conversations.clone(),
                    self.config.poll_interval(),
                    *self.config.poll_attempts(),
                );
                let transcript = timed(ctx, Stage::Transcript, acquirer.acquire(source, ctx)).await?;
                let context = self.generate(&ContextStage::new(&transcript), ctx).await?;
                outputs.context = Some(context.clone());
                context
            }
        };

        if !selector.wants_locations() {
            return Ok(outputs);
        }

        let locations = match supplied_locations {
            Some(locations) => {
                tracing::debug!(parent: ctx.span(), count = locations.len(), "Reusing supplied locations");
                locations
            }
            None => {
                let locations = self.generate(&LocationsStage::new(&context), ctx).await?;
                outputs.locations = Some(locations.clone());
                locations
            }
        };

        if !selector.wants_shots() {
            return Ok(outputs);
        }

        let mut shots = self.generate(&ShotsStage::new(&context, &locations), ctx).await?;
        if request.generate_images {
            self.illustrate(request, &mut shots, &locations, ctx).await;
        }
        outputs.shots = Some(shots);

        Ok(outputs)
    }

    async fn generate<S: GenerationStage>(&self, stage: &S, ctx: &RunContext) -> StageResult<S::Output> {
        let generator = SchemaGuidedGenerator::new(
            Arc::clone(&self.generator),
            *self.config.generation_attempts(),
        );
        let started = Instant::now();
        tracing::info!(parent: ctx.span(), stage = %S::STAGE, "Stage started");

        let outcome = generator.run(stage, ctx).await;
        tracing::info!(
            parent: ctx.span(),
            stage = %S::STAGE,
            outcome = outcome.label(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Stage finished"
        );

        outcome.into_result().map_err(|e| (S::STAGE, e))
    }

    async fn illustrate(
        &self,
        request: &SessionRequest,
        shots: &mut [ShotPlan],
        locations: &[LocationCandidate],
        ctx: &RunContext,
    ) {
        let (Some(images), Some(storage)) = (&self.images, &self.storage) else {
            tracing::warn!(
                parent: ctx.span(),
                stage = %Stage::Images,
                "Images requested but no image capability or storage configured"
            );
            return;
        };

        let cap = request
            .max_images
            .unwrap_or(*self.config.max_images())
            .min(shots.len());
        let fan_out = ImageFanOut::new(
            Arc::clone(images),
            Arc::clone(storage),
            *self.config.aspect_ratio(),
            self.config.image_key_prefix().as_str(),
        );

        let started = Instant::now();
        tracing::info!(parent: ctx.span(), stage = %Stage::Images, cap, "Stage started");
        let report = fan_out.illustrate(shots, locations, cap, ctx).await;
        tracing::info!(
            parent: ctx.span(),
            stage = %Stage::Images,
            attempted = report.attempted,
            succeeded = report.succeeded,
            failed = report.failed(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Stage finished"
        );
    }
}

async fn timed<T>(
    ctx: &RunContext,
    stage: Stage,
    fut: impl std::future::Future<Output = viewfinder_error::ViewfinderResult<T>>,
) -> StageResult<T> {
    let started = Instant::now();
    tracing::info!(parent: ctx.span(), stage = %stage, "Stage started");
    let result = fut.await;
    tracing::info!(
        parent: ctx.span(),
        stage = %stage,
        outcome = if result.is_ok() { "ok" } else { "fatal" },
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Stage finished"
    );
    result.map_err(|e| (stage, e))
}
