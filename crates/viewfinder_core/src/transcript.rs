//! Conversation transcripts and their flattened text form.

use crate::SpeakerRole;
use serde::{Deserialize, Serialize};
use viewfinder_error::{InputError, InputErrorKind};

/// One utterance in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Turn {
    /// Who spoke
    pub role: SpeakerRole,
    /// What was said; may be empty for silent or tool-only turns
    pub text: String,
}

impl Turn {
    /// A turn spoken by the user.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: SpeakerRole::User,
            text: text.into(),
        }
    }

    /// A turn spoken by the agent.
    pub fn agent(text: impl Into<String>) -> Self {
        Self {
            role: SpeakerRole::Agent,
            text: text.into(),
        }
    }

    /// Whether the turn carries any non-whitespace content.
    pub fn has_content(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Ordered sequence of conversation turns.
///
/// # Examples
///
/// ```
/// use viewfinder_core::{Transcript, Turn};
///
/// let transcript = Transcript::new(vec![
///     Turn::agent("What are we shooting?"),
///     Turn::user("   "),
///     Turn::user("Engagement photos at the beach."),
/// ]);
///
/// let text = transcript.flatten("conversation conv_1").unwrap();
/// assert_eq!(
///     text.as_str(),
///     "Agent: What are we shooting?\nUser: Engagement photos at the beach."
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Create a transcript from turns in spoken order.
    pub fn new(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    /// All turns, including empty ones.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Turns with non-whitespace content, in order.
    pub fn usable_turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter().filter(|turn| turn.has_content())
    }

    /// Collapse the dialogue into one text blob, dropping empty turns.
    ///
    /// # Errors
    ///
    /// Returns [`InputErrorKind::NoUsableContent`] naming `source` when no turn
    /// has non-whitespace content.
    pub fn flatten(&self, source: &str) -> Result<TranscriptText, InputError> {
        let text = self
            .usable_turns()
            .map(|turn| format!("{}: {}", turn.role, turn.text.trim()))
            .collect::<Vec<_>>()
            .join("\n");
        TranscriptText::parse(text, source)
    }
}

/// A flattened transcript that is guaranteed to contain non-whitespace text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
#[serde(transparent)]
pub struct TranscriptText(String);

impl TranscriptText {
    /// Validate raw transcript text.
    ///
    /// # Errors
    ///
    /// Returns [`InputErrorKind::NoUsableContent`] naming `source` when the text
    /// is empty or whitespace only.
    ///
    /// # Examples
    ///
    /// ```
    /// use viewfinder_core::TranscriptText;
    ///
    /// assert!(TranscriptText::parse(" \n\t ", "transcript").is_err());
    /// assert_eq!(TranscriptText::parse("  hi  ", "transcript").unwrap().as_str(), "hi");
    /// ```
    #[track_caller]
    pub fn parse(raw: impl Into<String>, source: &str) -> Result<Self, InputError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InputError::new(InputErrorKind::NoUsableContent(
                source.to_string(),
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Borrow the text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the text in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a value produced by [`TranscriptText::parse`].
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
