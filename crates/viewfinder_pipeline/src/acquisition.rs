//! Transcript acquisition.

use crate::RunContext;
use std::sync::Arc;
use std::time::Duration;
use viewfinder_core::{ConversationStatus, TranscriptSource, TranscriptText};
use viewfinder_error::{AcquisitionError, AcquisitionErrorKind, ViewfinderError, ViewfinderResult};
use viewfinder_interface::ConversationSource;

/// Turns any transcript source into non-empty [`TranscriptText`].
///
/// Conversation ids are polled at a fixed interval until the record reaches
/// a terminal status or the attempt budget runs out. The only wait in the
/// whole pipeline happens here.
#[derive(Clone)]
pub struct TranscriptAcquirer {
    conversations: Option<Arc<dyn ConversationSource>>,
    interval: Duration,
    attempts: u32,
}

impl std::fmt::Debug for TranscriptAcquirer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranscriptAcquirer")
            .field("has_conversations", &self.conversations.is_some())
            .field("interval", &self.interval)
            .field("attempts", &self.attempts)
            .finish()
    }
}

impl TranscriptAcquirer {
    /// Create an acquirer; `attempts` is clamped to at least one.
    pub fn new(
        conversations: Option<Arc<dyn ConversationSource>>,
        interval: Duration,
        attempts: u32,
    ) -> Self {
        Self {
            conversations,
            interval,
            attempts: attempts.max(1),
        }
    }

    /// Resolve `source` to transcript text.
    ///
    /// # Errors
    ///
    /// - `NoUsableContent` when the text is empty after flattening
    /// - `Unavailable` when the conversation capability errors or is missing
    /// - `Failed` when the conversation ends in a failed status
    /// - `Timeout` when the attempt budget is spent without a terminal status
    pub async fn acquire(
        &self,
        source: TranscriptSource<'_>,
        ctx: &RunContext,
    ) -> ViewfinderResult<TranscriptText> {
        let label = source.label();
        let text = match source {
            TranscriptSource::Conversation(id) => return self.poll(id, &label, ctx).await,
            TranscriptSource::Raw(text) => TranscriptText::parse(text, &label)?,
            TranscriptSource::Intake(form) => TranscriptText::parse(form.render(), &label)?,
        };

        tracing::debug!(parent: ctx.span(), source = %label, chars = text.len(), "Transcript supplied inline");
        Ok(text)
    }

    /// Check an inline transcript or intake form without polling.
    ///
    /// Returns `None` for conversation sources, which only [`acquire`](Self::acquire)
    /// can resolve. The inner result is `NoUsableContent` when the text is blank.
    pub fn inline(source: TranscriptSource<'_>) -> Option<ViewfinderResult<TranscriptText>> {
        let label = source.label();
        let parsed = match source {
            TranscriptSource::Conversation(_) => return None,
            TranscriptSource::Raw(text) => TranscriptText::parse(text, &label),
            TranscriptSource::Intake(form) => TranscriptText::parse(form.render(), &label),
        };
        Some(parsed.map_err(ViewfinderError::from))
    }

    async fn poll(
        &self,
        conversation_id: &str,
        label: &str,
        ctx: &RunContext,
    ) -> ViewfinderResult<TranscriptText> {
        let Some(conversations) = &self.conversations else {
            return Err(AcquisitionError::new(AcquisitionErrorKind::Unavailable(
                "no conversation capability configured".to_string(),
            ))
            .into());
        };

        for attempt in 1..=self.attempts {
            let record = conversations.get(conversation_id).await.map_err(|e| {
                tracing::error!(parent: ctx.span(), conversation_id, attempt, error = %e, "Conversation query failed");
                AcquisitionError::new(AcquisitionErrorKind::Unavailable(e.summary()))
            })?;

            tracing::debug!(
                parent: ctx.span(),
                conversation_id,
                attempt,
                max_attempts = self.attempts,
                status = %record.status,
                "Polled conversation"
            );

            match record.status {
                ConversationStatus::Done => {
                    let text = record.transcript().flatten(label)?;
                    tracing::info!(
                        parent: ctx.span(),
                        conversation_id,
                        attempts = attempt,
                        turns = record.turns.len(),
                        chars = text.len(),
                        "Conversation transcript ready"
                    );
                    return Ok(text);
                }
                ConversationStatus::Failed => {
                    return Err(AcquisitionError::new(AcquisitionErrorKind::Failed(
                        conversation_id.to_string(),
                    ))
                    .into());
                }
                ConversationStatus::Pending | ConversationStatus::Processing => {
                    if attempt < self.attempts {
                        tokio::time::sleep(self.interval).await;
                    }
                }
            }
        }

        let waited_ms = self.interval.as_millis() as u64 * u64::from(self.attempts - 1);
        tracing::warn!(parent: ctx.span(), conversation_id, attempts = self.attempts, waited_ms, "Conversation polling timed out");
        Err(AcquisitionError::new(AcquisitionErrorKind::Timeout {
            conversation_id: conversation_id.to_string(),
            attempts: self.attempts,
            waited_ms,
        })
        .into())
    }
}
