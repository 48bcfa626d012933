//! Mock image capability and in-memory object storage.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use viewfinder_core::AspectRatio;
use viewfinder_error::{
    ImageError, ImageErrorKind, StorageError, StorageErrorKind, ViewfinderError, ViewfinderResult,
};
use viewfinder_interface::{GeneratedImage, ImageGenerator};
use viewfinder_storage::{ObjectStorage, StoredObject};

/// Prompts containing this text make [`MockImageGenerator`] fail.
pub const FAIL_MARKER: &str = "FAIL_IMAGE";

/// Mock image generator.
///
/// Each call holds for a short delay so concurrent calls overlap, which
/// lets tests observe how many requests were in flight at once.
#[derive(Debug)]
pub struct MockImageGenerator {
    delay: Duration,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl Default for MockImageGenerator {
    fn default() -> Self {
        Self::new(Duration::from_millis(20))
    }
}

#[allow(dead_code)]
impl MockImageGenerator {
    /// Mock whose calls each take `delay`.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Number of image requests received.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of requests observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Prompts received, in arrival order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate_image(
        &self,
        prompt: &str,
        _aspect_ratio: AspectRatio,
    ) -> ViewfinderResult<GeneratedImage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if prompt.contains(FAIL_MARKER) {
            return Err(ViewfinderError::from(ImageError::new(
                ImageErrorKind::NoImage("filtered by mock".to_string()),
            )));
        }
        Ok(GeneratedImage::png(vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a]))
    }

    fn model_name(&self) -> &str {
        "mock-image"
    }
}

/// Object storage that keeps everything in a map.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    reject_containing: Option<String>,
}

#[allow(dead_code)]
impl MemoryStorage {
    /// Empty storage that accepts every write.
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that rejects keys containing `fragment`.
    pub fn rejecting(fragment: impl Into<String>) -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            reject_containing: Some(fragment.into()),
        }
    }

    /// Keys written so far, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn put(&self, key: &str, data: &[u8], mime_type: &str) -> ViewfinderResult<StoredObject> {
        let rejected = self
            .reject_containing
            .as_deref()
            .is_some_and(|fragment| key.contains(fragment));
        if rejected {
            return Err(ViewfinderError::from(StorageError::new(
                StorageErrorKind::Unavailable("mock storage rejected key".to_string()),
            )));
        }

        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), data.to_vec());
        Ok(StoredObject::new(
            key,
            format!("memory://{}", key),
            "mock-hash",
            data.len() as u64,
            mime_type,
        ))
    }

    async fn get(&self, key: &str) -> ViewfinderResult<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| {
                ViewfinderError::from(StorageError::new(StorageErrorKind::NotFound(
                    key.to_string(),
                )))
            })
    }

    async fn exists(&self, key: &str) -> ViewfinderResult<bool> {
        Ok(self.objects.lock().unwrap().contains_key(key))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
