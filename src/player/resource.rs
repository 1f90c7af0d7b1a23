//! Playable resources and locator ownership.
//!
//! A [`Locator`] makes an in-memory blob addressable by the media element.
//! Locators are a finite host resource, so each one lives inside a
//! [`LocatorHandle`] that revokes it exactly once: on explicit release or
//! when the handle is dropped, whichever comes first.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use super::PlayerError;

/// Binary audio content supplied by the host.
///
/// The bytes are shared and never mutated here.
#[derive(Debug, Clone)]
pub struct AudioBlob {
    /// Original file name
    pub name: String,
    /// MIME type, if the host knows it
    pub mime_type: Option<String>,
    bytes: Arc<[u8]>,
}

impl AudioBlob {
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            mime_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Read a file from disk into a blob.
    pub fn from_path(path: &std::path::Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        Ok(Self::new(name, bytes))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Another handle on the same bytes, without copying them.
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// File extension of the blob name, lowercased.
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
    }
}

/// Identifies one attached resource for the lifetime of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub(crate) u64);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Addressable reference to a blob (an object URL in browser hosts).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator(String);

impl Locator {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Host facility that mints and revokes locators.
pub trait LocatorProvider: Send + Sync {
    /// Create a locator for `blob`.
    fn create(&self, blob: &AudioBlob) -> Result<Locator, PlayerError>;

    /// Revoke a locator previously returned by [`create`](Self::create).
    fn revoke(&self, locator: &Locator);
}

/// Owned locator that is revoked exactly once.
pub struct LocatorHandle {
    locator: Locator,
    provider: Arc<dyn LocatorProvider>,
    released: bool,
}

impl LocatorHandle {
    /// Mint a locator for `blob` through `provider`.
    pub fn acquire(
        provider: Arc<dyn LocatorProvider>,
        blob: &AudioBlob,
    ) -> Result<Self, PlayerError> {
        let locator = provider.create(blob)?;
        tracing::debug!("Created locator {}", locator);
        Ok(Self {
            locator,
            provider,
            released: false,
        })
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Revoke the locator. Subsequent calls are no-ops.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.provider.revoke(&self.locator);
        tracing::debug!("Revoked locator {}", self.locator);
    }
}

impl Drop for LocatorHandle {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for LocatorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocatorHandle")
            .field("locator", &self.locator)
            .field("released", &self.released)
            .finish()
    }
}

/// A blob bound to its live locator.
#[derive(Debug)]
pub struct AudioResource {
    id: ResourceId,
    blob: AudioBlob,
    handle: LocatorHandle,
}

impl AudioResource {
    pub(crate) fn new(id: ResourceId, blob: AudioBlob, handle: LocatorHandle) -> Self {
        Self { id, blob, handle }
    }

    pub fn id(&self) -> ResourceId {
        self.id
    }

    pub fn blob(&self) -> &AudioBlob {
        &self.blob
    }

    pub fn locator(&self) -> &Locator {
        self.handle.locator()
    }

    pub fn size_bytes(&self) -> usize {
        self.blob.len()
    }

    /// Size as megabytes with two decimals, e.g. `"3.42 MB"`.
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.blob.len() as f64 / (1024.0 * 1024.0))
    }

    /// Revoke the locator now instead of waiting for drop.
    pub(crate) fn release(&mut self) {
        self.handle.release();
    }
}

/// In-process locator provider.
///
/// Mints `blob:audio-insight/<n>` URLs and tracks which are still live, so
/// hosts without a native object-URL facility (and tests) can audit leaks.
#[derive(Debug, Default)]
pub struct ObjectUrlRegistry {
    next: AtomicU64,
    live: Mutex<HashSet<Locator>>,
    revoked: AtomicU64,
}

impl ObjectUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of locators created and not yet revoked.
    pub fn live_count(&self) -> usize {
        self.live.lock().len()
    }

    /// Total number of revocations performed.
    pub fn revoked_count(&self) -> u64 {
        self.revoked.load(Ordering::Relaxed)
    }

    pub fn is_live(&self, locator: &Locator) -> bool {
        self.live.lock().contains(locator)
    }
}

impl LocatorProvider for ObjectUrlRegistry {
    fn create(&self, blob: &AudioBlob) -> Result<Locator, PlayerError> {
        if blob.is_empty() {
            return Err(PlayerError::ResourceAcquisition(format!(
                "{} is empty",
                blob.name
            )));
        }
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        let locator = Locator::new(format!("blob:audio-insight/{}", n));
        self.live.lock().insert(locator.clone());
        Ok(locator)
    }

    fn revoke(&self, locator: &Locator) {
        if self.live.lock().remove(locator) {
            self.revoked.fetch_add(1, Ordering::Relaxed);
        } else {
            tracing::warn!("Revoke of unknown locator {}", locator);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob() -> AudioBlob {
        AudioBlob::new("song.mp3", vec![1u8, 2, 3])
    }

    #[test]
    fn test_shared_bytes_do_not_copy() {
        let blob = blob();
        let shared = blob.shared_bytes();
        assert!(Arc::ptr_eq(&shared, &blob.shared_bytes()));
        assert_eq!(&*shared, blob.bytes());
    }

    #[test]
    fn test_registry_mints_unique_locators() {
        let registry = ObjectUrlRegistry::new();
        let a = registry.create(&blob()).unwrap();
        let b = registry.create(&blob()).unwrap();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("blob:audio-insight/"));
        assert_eq!(registry.live_count(), 2);
    }

    #[test]
    fn test_registry_rejects_empty_blob() {
        let registry = ObjectUrlRegistry::new();
        let empty = AudioBlob::new("empty.wav", Vec::<u8>::new());
        let err = registry.create(&empty).unwrap_err();
        assert!(matches!(err, PlayerError::ResourceAcquisition(_)));
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn test_handle_releases_once() {
        let registry = Arc::new(ObjectUrlRegistry::new());
        let mut handle = LocatorHandle::acquire(registry.clone(), &blob()).unwrap();
        assert_eq!(registry.live_count(), 1);

        handle.release();
        handle.release();
        assert!(handle.is_released());
        drop(handle);

        assert_eq!(registry.live_count(), 0);
        assert_eq!(registry.revoked_count(), 1);
    }

    #[test]
    fn test_handle_releases_on_drop() {
        let registry = Arc::new(ObjectUrlRegistry::new());
        {
            let _handle = LocatorHandle::acquire(registry.clone(), &blob()).unwrap();
            assert_eq!(registry.live_count(), 1);
        }
        assert_eq!(registry.live_count(), 0);
        assert_eq!(registry.revoked_count(), 1);
    }

    #[test]
    fn test_size_label() {
        let registry = Arc::new(ObjectUrlRegistry::new());
        let blob = AudioBlob::new("big.wav", vec![0u8; 3 * 1024 * 1024 + 512 * 1024]);
        let handle = LocatorHandle::acquire(registry, &blob).unwrap();
        let resource = AudioResource::new(ResourceId(1), blob, handle);
        assert_eq!(resource.size_label(), "3.50 MB");
        assert_eq!(resource.size_bytes(), 3 * 1024 * 1024 + 512 * 1024);
    }

    #[test]
    fn test_blob_extension() {
        assert_eq!(blob().extension().as_deref(), Some("mp3"));
        let upper = AudioBlob::new("Track.FLAC", vec![1u8]);
        assert_eq!(upper.extension().as_deref(), Some("flac"));
        let bare = AudioBlob::new("noext", vec![1u8]);
        assert_eq!(bare.extension(), None);
    }
}
