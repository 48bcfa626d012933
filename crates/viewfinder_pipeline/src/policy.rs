//! Fallback policy: what happens when a generation stage runs out of attempts.

use viewfinder_core::{ErrorKind, Stage};

/// How a generation attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum FailureMode {
    /// The generation capability returned an error
    Unavailable,
    /// The response could not be parsed as JSON, even leniently
    Unparseable,
    /// The response parsed but violated the schema or a stage invariant
    Invalid,
}

/// What the generator does once attempts are exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// Substitute the stage's documented default and report success
    UseDefault,
    /// Abort the pipeline with this error category
    Fatal(ErrorKind),
}

/// Look up the resolution for `stage` failing with `mode`.
///
/// | stage     | unavailable            | unparseable         | invalid             |
/// |-----------|------------------------|---------------------|---------------------|
/// | context   | fatal upstream-unavailable | fatal generation-failed | fatal generation-failed |
/// | locations | default                | default             | default             |
/// | shots     | default                | default             | default             |
///
/// # Examples
///
/// ```
/// use viewfinder_core::{ErrorKind, Stage};
/// use viewfinder_pipeline::{FailureMode, Resolution, resolve};
///
/// assert_eq!(resolve(Stage::Locations, FailureMode::Unparseable), Resolution::UseDefault);
/// assert_eq!(
///     resolve(Stage::Context, FailureMode::Unavailable),
///     Resolution::Fatal(ErrorKind::UpstreamUnavailable)
/// );
/// ```
pub fn resolve(stage: Stage, mode: FailureMode) -> Resolution {
    match (stage, mode) {
        (Stage::Locations | Stage::Shots, _) => Resolution::UseDefault,
        (_, FailureMode::Unavailable) => Resolution::Fatal(ErrorKind::UpstreamUnavailable),
        (_, FailureMode::Unparseable | FailureMode::Invalid) => {
            Resolution::Fatal(ErrorKind::GenerationFailed)
        }
    }
}
