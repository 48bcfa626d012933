//! Object key validation.

use viewfinder_error::{StorageError, StorageErrorKind};

/// Check that a key is a non-empty relative path that stays under the
/// storage root.
///
/// # Examples
///
/// ```
/// use viewfinder_storage::validate_key;
///
/// assert!(validate_key("sessions/abc/shot-01.png").is_ok());
/// assert!(validate_key("").is_err());
/// assert!(validate_key("/etc/passwd").is_err());
/// assert!(validate_key("sessions/../../escape.png").is_err());
/// assert!(validate_key("sessions//shot.png").is_err());
/// ```
#[track_caller]
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let reject = |reason: &str| {
        Err(StorageError::new(StorageErrorKind::InvalidKey(format!(
            "'{}' {}",
            key, reason
        ))))
    };

    if key.trim().is_empty() {
        return reject("is empty");
    }
    if key.starts_with('/') || key.contains('\\') || key.contains(':') {
        return reject("must be a relative path");
    }
    if key
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return reject("contains an empty or relative segment");
    }
    Ok(())
}
