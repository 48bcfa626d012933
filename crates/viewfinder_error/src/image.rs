//! Image generation error types.

/// Image generation failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ImageErrorKind {
    /// The image capability returned an error
    #[display("Image generation unavailable: {}", _0)]
    Unavailable(String),
    /// The capability answered but produced no image (e.g. safety filtered)
    #[display("No image returned: {}", _0)]
    NoImage(String),
    /// The capability returned a zero-length image
    #[display("Image generation returned empty bytes")]
    EmptyImage,
}

/// Image generation error with location tracking.
///
/// # Examples
///
/// ```
/// use viewfinder_error::{ImageError, ImageErrorKind};
///
/// let err = ImageError::new(ImageErrorKind::EmptyImage);
/// assert!(format!("{}", err).contains("empty"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Image Error: {} at line {} in {}", kind, line, file)]
pub struct ImageError {
    /// The specific error condition
    pub kind: ImageErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ImageError {
    /// Create a new ImageError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ImageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
