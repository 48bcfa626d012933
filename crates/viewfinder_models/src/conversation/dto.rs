//! Wire types for the conversations endpoint.

use serde::Deserialize;
use viewfinder_core::{ConversationRecord, ConversationStatus, SpeakerRole, Turn};

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ConversationDto {
    pub conversation_id: String,
    pub status: String,
    #[serde(default)]
    pub transcript: Vec<TranscriptEntryDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TranscriptEntryDto {
    pub role: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Map the service's status strings onto the pipeline's four states.
///
/// Unknown strings are treated as still processing so polling continues
/// until the attempt budget runs out.
pub(crate) fn map_status(status: &str) -> ConversationStatus {
    match status {
        "initiated" | "pending" | "queued" => ConversationStatus::Pending,
        "done" | "completed" => ConversationStatus::Done,
        "failed" | "error" => ConversationStatus::Failed,
        "in-progress" | "processing" => ConversationStatus::Processing,
        other => {
            tracing::warn!(status = other, "Unknown conversation status, treating as processing");
            ConversationStatus::Processing
        }
    }
}

fn map_role(role: &str) -> SpeakerRole {
    match role {
        "user" => SpeakerRole::User,
        _ => SpeakerRole::Agent,
    }
}

impl From<ConversationDto> for ConversationRecord {
    fn from(dto: ConversationDto) -> Self {
        let status = map_status(&dto.status);
        let turns = dto
            .transcript
            .into_iter()
            .map(|entry| Turn {
                role: map_role(&entry.role),
                text: entry.message.unwrap_or_default(),
            })
            .collect();
        ConversationRecord {
            conversation_id: dto.conversation_id,
            status,
            turns,
        }
    }
}
