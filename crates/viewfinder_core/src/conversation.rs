//! Conversation records returned by the conversation capability.

use crate::{Transcript, Turn};
use serde::{Deserialize, Serialize};

/// Processing status of a recorded conversation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStatus {
    /// Recorded but not yet picked up for processing
    #[display("pending")]
    Pending,
    /// Transcription or analysis still running
    #[display("processing")]
    Processing,
    /// Transcript is final
    #[display("done")]
    Done,
    /// Processing failed and will not recover
    #[display("failed")]
    Failed,
}

impl ConversationStatus {
    /// Whether polling should stop at this status.
    ///
    /// # Examples
    ///
    /// ```
    /// use viewfinder_core::ConversationStatus;
    ///
    /// assert!(ConversationStatus::Done.is_terminal());
    /// assert!(ConversationStatus::Failed.is_terminal());
    /// assert!(!ConversationStatus::Processing.is_terminal());
    /// ```
    pub fn is_terminal(&self) -> bool {
        matches!(self, ConversationStatus::Done | ConversationStatus::Failed)
    }
}

/// Snapshot of a conversation as reported by the conversation capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationRecord {
    /// Conversation identifier
    pub conversation_id: String,
    /// Current processing status
    pub status: ConversationStatus,
    /// Turns recorded so far, in spoken order
    #[serde(default)]
    pub turns: Vec<Turn>,
}

impl ConversationRecord {
    /// Convert the recorded turns into a [`Transcript`].
    pub fn transcript(&self) -> Transcript {
        Transcript::new(self.turns.clone())
    }
}
