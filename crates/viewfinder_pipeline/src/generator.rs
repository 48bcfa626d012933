//! Schema-guided generation with a bounded recovery chain.
//!
//! Every generation stage goes through [`SchemaGuidedGenerator::run`]:
//!
//! 1. ask the structured-generation capability for output matching the
//!    stage schema;
//! 2. strict-parse the text, then lenient-parse it on failure;
//! 3. validate against the schema and the stage's own invariants;
//! 4. on any failure, regenerate until the attempt budget is spent;
//! 5. resolve the last failure through the fallback [`policy`](crate::resolve).

use crate::{FailureMode, Resolution, RunContext, StageOutcome, lenient_parse, resolve, strict_parse};
use serde_json::Value;
use std::sync::Arc;
use viewfinder_core::{ErrorKind, OutputSchema, Stage};
use viewfinder_error::{GenerationError, GenerationErrorKind};
use viewfinder_interface::StructuredGenerator;

/// One generation stage: its schema, prompt, interpretation and default.
pub trait GenerationStage {
    /// Value the stage produces.
    type Output;

    /// Stage name used in logs, envelopes and the fallback policy.
    const STAGE: Stage;

    /// Shape the output must have.
    fn schema(&self) -> OutputSchema;

    /// Full prompt, including upstream data and the schema description.
    fn prompt(&self, schema: &OutputSchema) -> String;

    /// Turn a schema-valid value into the stage output.
    ///
    /// Returns a description of the violated invariant when the value is
    /// well-formed but unusable.
    fn interpret(&self, value: Value) -> Result<Self::Output, String>;

    /// Documented default, if the stage has one.
    fn fallback(&self) -> Option<Self::Output>;
}

/// Drives [`GenerationStage`]s against a structured-generation capability.
#[derive(Clone)]
pub struct SchemaGuidedGenerator {
    generator: Arc<dyn StructuredGenerator>,
    attempts: u32,
}

impl std::fmt::Debug for SchemaGuidedGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaGuidedGenerator")
            .field("provider", &self.generator.provider_name())
            .field("model", &self.generator.model_name())
            .field("attempts", &self.attempts)
            .finish()
    }
}

impl SchemaGuidedGenerator {
    /// Wrap a capability; `attempts` is clamped to at least one.
    pub fn new(generator: Arc<dyn StructuredGenerator>, attempts: u32) -> Self {
        Self {
            generator,
            attempts: attempts.max(1),
        }
    }

    /// Generation attempts per stage.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Run one stage to a [`StageOutcome`].
    pub async fn run<S: GenerationStage>(&self, stage: &S, ctx: &RunContext) -> StageOutcome<S::Output> {
        let schema = stage.schema();
        let prompt = stage.prompt(&schema);
        let mut last_failure = (FailureMode::Unavailable, String::from("no attempt made"));

        for attempt in 1..=self.attempts {
            tracing::debug!(
                parent: ctx.span(),
                stage = %S::STAGE,
                attempt,
                max_attempts = self.attempts,
                model = self.generator.model_name(),
                "Requesting structured output"
            );

            match self.attempt(stage, &schema, &prompt).await {
                Ok(output) => {
                    tracing::debug!(parent: ctx.span(), stage = %S::STAGE, attempt, "Structured output accepted");
                    return StageOutcome::Ok(output);
                }
                Err((mode, reason)) => {
                    tracing::warn!(
                        parent: ctx.span(),
                        stage = %S::STAGE,
                        attempt,
                        failure = %mode,
                        reason = %reason,
                        "Generation attempt failed"
                    );
                    last_failure = (mode, reason);
                }
            }
        }

        let (mode, reason) = last_failure;
        match resolve(S::STAGE, mode) {
            Resolution::UseDefault => match stage.fallback() {
                Some(value) => {
                    tracing::warn!(
                        parent: ctx.span(),
                        stage = %S::STAGE,
                        failure = %mode,
                        attempts = self.attempts,
                        "Substituting documented default"
                    );
                    StageOutcome::RecoverableDefault { value, reason }
                }
                None => StageOutcome::Fatal(self.exhausted(S::STAGE, reason).into()),
            },
            Resolution::Fatal(ErrorKind::UpstreamUnavailable) => {
                StageOutcome::Fatal(GenerationError::new(GenerationErrorKind::Unavailable(reason)).into())
            }
            Resolution::Fatal(_) => StageOutcome::Fatal(self.exhausted(S::STAGE, reason).into()),
        }
    }

    /// One generate → parse → validate → interpret pass.
    async fn attempt<S: GenerationStage>(
        &self,
        stage: &S,
        schema: &OutputSchema,
        prompt: &str,
    ) -> Result<S::Output, (FailureMode, String)> {
        let text = self
            .generator
            .generate(prompt, schema)
            .await
            .map_err(|e| (FailureMode::Unavailable, e.summary()))?;

        let value = match strict_parse(&text) {
            Ok(value) => value,
            Err(_) => lenient_parse(&text).map_err(|e| (FailureMode::Unparseable, e.message))?,
        };

        let violations = schema.validate(&value);
        if !violations.is_empty() {
            return Err((FailureMode::Invalid, violations.join("; ")));
        }

        stage
            .interpret(value)
            .map_err(|reason| (FailureMode::Invalid, reason))
    }

    #[track_caller]
    fn exhausted(&self, stage: Stage, reason: String) -> GenerationError {
        GenerationError::new(GenerationErrorKind::Exhausted {
            stage: stage.to_string(),
            attempts: self.attempts,
            reason,
        })
    }
}
