//! Filesystem-backed object storage.

use crate::{ObjectStorage, StoredObject, validate_key};
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use uuid::Uuid;
use viewfinder_error::{StorageError, StorageErrorKind, ViewfinderResult};

/// Filesystem storage backend.
///
/// Objects are written to `{base_path}/{key}`:
///
/// ```text
/// /var/lib/viewfinder/
/// └── sessions/
///     └── 5f0c.../
///         ├── shot-01-1718000000123.png
///         └── shot-02-1718000000131.png
/// ```
///
/// Writes go to a uniquely named temp file in the target directory and are
/// renamed into place, so readers never observe a partial object.
///
/// URIs point at `{public_base_url}/{key}` when a public base URL is set
/// (e.g. a CDN or static file server in front of the directory), otherwise
/// at a `file://` URI of the written file.
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    base_path: PathBuf,
    public_base_url: Option<String>,
}

impl FileSystemStorage {
    /// Create a new filesystem storage backend.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or resolved.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> ViewfinderResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;
        let base_path = std::fs::canonicalize(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Opened filesystem storage");
        Ok(Self {
            base_path,
            public_base_url: None,
        })
    }

    /// Serve objects from `url` instead of `file://` URIs.
    pub fn with_public_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.public_base_url = Some(url.trim_end_matches('/').to_string());
        self
    }

    /// Root directory objects are written under.
    pub fn base_path(&self) -> &std::path::Path {
        &self.base_path
    }

    fn compute_hash(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("{:x}", hasher.finalize())
    }

    fn path_for(&self, key: &str) -> PathBuf {
        key.split('/')
            .fold(self.base_path.clone(), |path, segment| path.join(segment))
    }

    fn uri_for(&self, key: &str, path: &std::path::Path) -> String {
        match &self.public_base_url {
            Some(base) => format!("{}/{}", base, key),
            None => format!("file://{}", path.display()),
        }
    }
}

#[async_trait::async_trait]
impl ObjectStorage for FileSystemStorage {
    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    async fn put(
        &self,
        key: &str,
        data: &[u8],
        mime_type: &str,
    ) -> ViewfinderResult<StoredObject> {
        validate_key(key)?;
        if data.is_empty() {
            return Err(StorageError::new(StorageErrorKind::EmptyObject(key.to_string())).into());
        }

        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let temp_path = path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::Write(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        if let Err(e) = tokio::fs::rename(&temp_path, &path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(StorageError::new(StorageErrorKind::Write(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
            .into());
        }

        let hash = Self::compute_hash(data);
        let uri = self.uri_for(key, &path);
        tracing::info!(
            key,
            hash = %hash,
            size = data.len(),
            "Stored object"
        );

        Ok(StoredObject::new(
            key,
            uri,
            hash,
            data.len() as u64,
            mime_type,
        ))
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, key: &str) -> ViewfinderResult<Vec<u8>> {
        validate_key(key)?;
        let path = self.path_for(key);

        let data = tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(key.to_string()))
            } else {
                StorageError::new(StorageErrorKind::Read(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        })?;

        tracing::debug!(key, size = data.len(), "Read object");
        Ok(data)
    }

    async fn exists(&self, key: &str) -> ViewfinderResult<bool> {
        validate_key(key)?;
        Ok(tokio::fs::try_exists(self.path_for(key))
            .await
            .unwrap_or(false))
    }

    fn backend_name(&self) -> &'static str {
        "filesystem"
    }
}
