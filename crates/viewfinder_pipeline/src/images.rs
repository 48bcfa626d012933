//! Concurrent illustration of shot plans.

use crate::RunContext;
use futures_util::future::join_all;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;
use viewfinder_core::{AspectRatio, GeneratedImageAsset, LocationCandidate, ShotPlan};
use viewfinder_error::ViewfinderResult;
use viewfinder_interface::ImageGenerator;
use viewfinder_storage::ObjectStorage;

/// Style applied to every illustrative image.
pub const SKETCH_STYLE: &str = "Loose monochrome pencil sketch on off-white paper, \
     storyboard style, clean confident linework with light cross-hatching for shadows, \
     no color, no text, no watermark.";

/// Outcome of one fan-out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FanOutReport {
    /// Shots an image was requested for
    pub attempted: usize,
    /// Shots that received a stored image
    pub succeeded: usize,
    /// One entry per attempted shot, in shot order
    pub assets: Vec<GeneratedImageAsset>,
}

impl FanOutReport {
    /// Attempted shots that received no image.
    pub fn failed(&self) -> usize {
        self.attempted - self.succeeded
    }
}

/// Illustrates shots with an image capability and persists the results.
///
/// Requests run concurrently and settle independently. A failed image
/// leaves its shot without a reference and never affects siblings.
#[derive(Clone)]
pub struct ImageFanOut {
    generator: Arc<dyn ImageGenerator>,
    storage: Arc<dyn ObjectStorage>,
    aspect_ratio: AspectRatio,
    key_prefix: String,
}

impl std::fmt::Debug for ImageFanOut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFanOut")
            .field("model", &self.generator.model_name())
            .field("storage", &self.storage.backend_name())
            .field("aspect_ratio", &self.aspect_ratio)
            .field("key_prefix", &self.key_prefix)
            .finish()
    }
}

impl ImageFanOut {
    /// Create a fan-out writing under `key_prefix`.
    pub fn new(
        generator: Arc<dyn ImageGenerator>,
        storage: Arc<dyn ObjectStorage>,
        aspect_ratio: AspectRatio,
        key_prefix: impl Into<String>,
    ) -> Self {
        Self {
            generator,
            storage,
            aspect_ratio,
            key_prefix: key_prefix.into().trim_matches('/').to_string(),
        }
    }

    /// Illustrate the first `cap` shots.
    ///
    /// Each task writes only its own shot's `image` slot. Returns after
    /// every task has settled.
    pub async fn illustrate(
        &self,
        shots: &mut [ShotPlan],
        locations: &[LocationCandidate],
        cap: usize,
        ctx: &RunContext,
    ) -> FanOutReport {
        let tasks = shots.iter_mut().take(cap).map(|shot| {
            let prompt = image_prompt(shot, locations.get(shot.location_index));
            async move {
                let asset = match self.render(shot.shot_number, &prompt, ctx).await {
                    Ok(uri) => {
                        tracing::debug!(shot_number = shot.shot_number, uri = %uri, "Shot illustrated");
                        GeneratedImageAsset::generated(shot.shot_number, uri)
                    }
                    Err(e) => {
                        tracing::warn!(shot_number = shot.shot_number, error = %e, "Shot illustration failed");
                        GeneratedImageAsset::failed(shot.shot_number, e.summary())
                    }
                };
                if asset.succeeded {
                    shot.image = Some(asset.clone());
                }
                asset
            }
            .instrument(ctx.span().clone())
        });

        let assets = join_all(tasks).await;
        let succeeded = assets.iter().filter(|a| a.succeeded).count();

        FanOutReport {
            attempted: assets.len(),
            succeeded,
            assets,
        }
    }

    async fn render(&self, shot_number: u32, prompt: &str, ctx: &RunContext) -> ViewfinderResult<String> {
        let image = self
            .generator
            .generate_image(prompt, self.aspect_ratio)
            .await?;

        let key = image_key(
            &self.key_prefix,
            ctx.correlation_id(),
            shot_number,
            chrono::Utc::now().timestamp_millis(),
            image.extension(),
        );
        let stored = self
            .storage
            .put(&key, image.bytes(), image.mime_type())
            .await?;

        Ok(stored.uri().clone())
    }
}

/// Storage key of one shot's image.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use viewfinder_pipeline::image_key;
///
/// let id = Uuid::nil();
/// assert_eq!(
///     image_key("sessions", id, 3, 1_700_000_000_000, "png"),
///     "sessions/00000000-0000-0000-0000-000000000000/shot-03-1700000000000.png"
/// );
/// ```
pub fn image_key(
    prefix: &str,
    correlation_id: Uuid,
    shot_number: u32,
    unix_millis: i64,
    extension: &str,
) -> String {
    format!(
        "{}/{}/shot-{:02}-{}.{}",
        prefix, correlation_id, shot_number, unix_millis, extension
    )
}

/// Deterministic image prompt for a shot.
///
/// Built from the shot's composition and technical notes, the resolved
/// location's description and [`SKETCH_STYLE`].
pub fn image_prompt(shot: &ShotPlan, location: Option<&LocationCandidate>) -> String {
    let setting = match location {
        Some(location) => format!("{}: {}", location.name, location.description),
        None => "an unspecified outdoor location".to_string(),
    };
    format!(
        "Setting: {}\nComposition: {}\nCamera: {}\nStyle: {}",
        setting, shot.composition, shot.technical, SKETCH_STYLE
    )
}
