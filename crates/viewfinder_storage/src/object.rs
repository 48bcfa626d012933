//! Storage trait and the reference it hands back.

use serde::Serialize;
use viewfinder_error::ViewfinderResult;

/// Where an object landed and what was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_getters::Getters)]
#[serde(rename_all = "camelCase")]
pub struct StoredObject {
    /// Key the object was stored under
    key: String,
    /// Public or local URI for fetching the object
    uri: String,
    /// Hex SHA-256 of the content
    content_hash: String,
    /// Content length
    size_bytes: u64,
    /// MIME type recorded at write time
    mime_type: String,
}

impl StoredObject {
    /// Assemble a reference for a completed write.
    pub fn new(
        key: impl Into<String>,
        uri: impl Into<String>,
        content_hash: impl Into<String>,
        size_bytes: u64,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            uri: uri.into(),
            content_hash: content_hash.into(),
            size_bytes,
            mime_type: mime_type.into(),
        }
    }
}

/// Trait for pluggable object storage backends.
///
/// Keys are relative, `/`-separated paths. Writing to an existing key
/// replaces the object.
#[async_trait::async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store bytes under `key` and return a fetchable reference.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the key is invalid, the payload is
    /// empty, or the backend fails to persist it.
    async fn put(&self, key: &str, data: &[u8], mime_type: &str)
    -> ViewfinderResult<StoredObject>;

    /// Read back the bytes stored under `key`.
    async fn get(&self, key: &str) -> ViewfinderResult<Vec<u8>>;

    /// Whether an object exists under `key`.
    async fn exists(&self, key: &str) -> ViewfinderResult<bool>;

    /// Backend name for logs (e.g., "filesystem").
    fn backend_name(&self) -> &'static str;
}
