//! Speaker roles for conversation turns.

use serde::{Deserialize, Serialize};

/// Who spoke a turn of the planning conversation.
///
/// # Examples
///
/// ```
/// use viewfinder_core::SpeakerRole;
///
/// assert_ne!(SpeakerRole::User, SpeakerRole::Agent);
///
/// // Display implementation is used when flattening transcripts
/// assert_eq!(format!("{}", SpeakerRole::Agent), "Agent");
///
/// // "assistant" is accepted as an alias on the wire
/// let role: SpeakerRole = serde_json::from_str("\"assistant\"").unwrap();
/// assert_eq!(role, SpeakerRole::Agent);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum SpeakerRole {
    /// The person planning the shoot
    User,
    /// The voice agent conducting the interview
    #[serde(alias = "assistant")]
    Agent,
}
