//! Top-level error wrapper types.

use crate::{
    AcquisitionError, ConfigError, GenerationError, HttpError, ImageError, InputError, JsonError,
    ProviderError, StorageError,
};

/// Every error condition a Viewfinder crate can raise.
///
/// # Examples
///
/// ```
/// use viewfinder_error::{ViewfinderError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: ViewfinderError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ViewfinderErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Provider (remote API) error
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Request rejected before any stage ran
    #[from(InputError)]
    Input(InputError),
    /// Transcript acquisition error
    #[from(AcquisitionError)]
    Acquisition(AcquisitionError),
    /// Structured generation error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Image generation error
    #[from(ImageError)]
    Image(ImageError),
    /// Object storage error
    #[from(StorageError)]
    Storage(StorageError),
}

/// Viewfinder error with kind discrimination.
///
/// # Examples
///
/// ```
/// use viewfinder_error::{ViewfinderResult, ConfigError, ViewfinderErrorKind};
///
/// fn might_fail() -> ViewfinderResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), ViewfinderErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Viewfinder Error: {}", _0)]
pub struct ViewfinderError(Box<ViewfinderErrorKind>);

impl ViewfinderError {
    /// Create a new error from a kind.
    pub fn new(kind: ViewfinderErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ViewfinderErrorKind {
        &self.0
    }

    /// Consume the wrapper and return the kind.
    pub fn into_kind(self) -> ViewfinderErrorKind {
        *self.0
    }

    /// Description of the underlying condition without source location.
    ///
    /// # Examples
    ///
    /// ```
    /// use viewfinder_error::{InputError, InputErrorKind, ViewfinderError};
    ///
    /// let err: ViewfinderError = InputError::new(InputErrorKind::NoUsableContent("transcript".into())).into();
    /// assert_eq!(err.summary(), "No usable content in transcript");
    /// ```
    pub fn summary(&self) -> String {
        match self.kind() {
            ViewfinderErrorKind::Http(e) => e.message.clone(),
            ViewfinderErrorKind::Json(e) => e.message.clone(),
            ViewfinderErrorKind::Config(e) => e.message.clone(),
            ViewfinderErrorKind::Provider(e) => e.kind.to_string(),
            ViewfinderErrorKind::Input(e) => e.kind.to_string(),
            ViewfinderErrorKind::Acquisition(e) => e.kind.to_string(),
            ViewfinderErrorKind::Generation(e) => e.kind.to_string(),
            ViewfinderErrorKind::Image(e) => e.kind.to_string(),
            ViewfinderErrorKind::Storage(e) => e.kind.to_string(),
        }
    }
}

// Generic From implementation for any type that converts to ViewfinderErrorKind
impl<T> From<T> for ViewfinderError
where
    T: Into<ViewfinderErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Viewfinder operations.
///
/// # Examples
///
/// ```
/// use viewfinder_error::{ViewfinderResult, HttpError};
///
/// fn fetch_data() -> ViewfinderResult<String> {
///     Err(HttpError::new("404 Not Found"))?
/// }
/// ```
pub type ViewfinderResult<T> = std::result::Result<T, ViewfinderError>;
