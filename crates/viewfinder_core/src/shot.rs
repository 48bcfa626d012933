//! Shot plans and their illustrative images.

use serde::{Deserialize, Serialize};

/// One planned shot at one of the candidate locations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotPlan {
    /// Index into the location candidate list
    pub location_index: usize,
    /// 1-based, unique shot number
    pub shot_number: u32,
    /// Framing, angle, subject placement
    pub composition: String,
    /// Lens, aperture, shutter, lighting setup
    pub technical: String,
    /// Posing and direction for the subject
    pub direction: String,
    /// Storyboard sketch, when one was generated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<GeneratedImageAsset>,
}

/// Outcome of illustrating a single shot.
///
/// # Examples
///
/// ```
/// use viewfinder_core::GeneratedImageAsset;
///
/// let ok = GeneratedImageAsset::generated(3, "https://cdn.example.com/s/shot-03.png");
/// assert!(ok.succeeded);
///
/// let failed = GeneratedImageAsset::failed(4, "quota exceeded");
/// assert!(!failed.succeeded);
/// assert!(failed.uri.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImageAsset {
    /// Shot the image illustrates
    pub shot_number: u32,
    /// Where the persisted image can be fetched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Whether generation and persistence both succeeded
    pub succeeded: bool,
    /// Failure description, for logs only
    #[serde(skip)]
    pub error: Option<String>,
}

impl GeneratedImageAsset {
    /// An image that was generated and persisted at `uri`.
    pub fn generated(shot_number: u32, uri: impl Into<String>) -> Self {
        Self {
            shot_number,
            uri: Some(uri.into()),
            succeeded: true,
            error: None,
        }
    }

    /// An attempt that failed at generation or persistence.
    pub fn failed(shot_number: u32, error: impl Into<String>) -> Self {
        Self {
            shot_number,
            uri: None,
            succeeded: false,
            error: Some(error.into()),
        }
    }
}
