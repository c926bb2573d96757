//! Embedded-media collaborator seam.
//!
//! The funnel requests that a host mount a video player at two points in the
//! phase sequence. Mount requests are idempotent per media id: the same
//! player is never mounted twice, however often a phase re-renders.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Something that can mount an embedded player for a media id.
pub trait EmbedHost: Send + Sync {
    fn mount(&self, media_id: &str);
}

/// Host that drops mount requests.
pub struct NoopEmbedHost;

impl EmbedHost for NoopEmbedHost {
    fn mount(&self, _media_id: &str) {}
}

/// Host that logs mount requests.
pub struct LogEmbedHost;

impl EmbedHost for LogEmbedHost {
    fn mount(&self, media_id: &str) {
        tracing::info!(media_id, "Mounting embedded player");
    }
}

/// Deduplicating front of an [`EmbedHost`].
#[derive(Clone)]
pub struct EmbedRegistry {
    host: Arc<dyn EmbedHost>,
    mounted: Arc<Mutex<HashSet<String>>>,
}

impl EmbedRegistry {
    pub fn new(host: Arc<dyn EmbedHost>) -> Self {
        Self {
            host,
            mounted: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Request a mount. Returns `true` if the host was asked to mount now,
    /// `false` if this id was already mounted.
    pub fn request_mount(&self, media_id: &str) -> bool {
        let fresh = self
            .mounted
            .lock()
            .expect("embed registry poisoned")
            .insert(media_id.to_string());
        if fresh {
            self.host.mount(media_id);
        } else {
            tracing::debug!(media_id, "Embed already mounted, ignoring request");
        }
        fresh
    }

    pub fn is_mounted(&self, media_id: &str) -> bool {
        self.mounted
            .lock()
            .expect("embed registry poisoned")
            .contains(media_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingHost {
        mounts: AtomicUsize,
    }

    impl EmbedHost for CountingHost {
        fn mount(&self, _media_id: &str) {
            self.mounts.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn mounts_each_id_exactly_once() {
        let host = Arc::new(CountingHost::default());
        let registry = EmbedRegistry::new(host.clone());

        assert!(registry.request_mount("vid-main"));
        assert!(!registry.request_mount("vid-main"));
        assert!(!registry.request_mount("vid-main"));
        assert!(registry.request_mount("vid-closer"));

        assert_eq!(host.mounts.load(Ordering::SeqCst), 2);
        assert!(registry.is_mounted("vid-main"));
        assert!(registry.is_mounted("vid-closer"));
        assert!(!registry.is_mounted("vid-other"));
    }

    #[test]
    fn clones_share_the_mounted_set() {
        let host = Arc::new(CountingHost::default());
        let registry = EmbedRegistry::new(host.clone());
        let clone = registry.clone();

        assert!(registry.request_mount("vid-main"));
        assert!(!clone.request_mount("vid-main"));
        assert_eq!(host.mounts.load(Ordering::SeqCst), 1);
    }
}
