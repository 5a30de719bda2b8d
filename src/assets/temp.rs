//! Temporary Handle Store
//!
//! Exposes user-supplied file bytes to the renderer under a `blob:` URI, the
//! way a browser object URL does, and tracks which handles are still live.
//!
//! # Ownership
//! - A [`TempHandle`] is the single owner of its entry; it is not `Clone`.
//! - [`TempHandle::revoke`] releases the entry. Calling it again is a no-op.
//! - Dropping an unrevoked handle revokes it, so every exit path releases storage.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use uuid::Uuid;

/// URI prefix of temporary handles.
pub const TEMP_URI_SCHEME: &str = "blob:";

#[derive(Debug)]
struct TempEntry {
    bytes: Arc<[u8]>,
    mime: String,
}

#[derive(Debug, Default)]
struct StoreInner {
    entries: FxHashMap<Uuid, TempEntry>,
    created: u64,
    revoked: u64,
}

/// Shared registry of live temporary handles. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct TempHandleStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl TempHandleStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `bytes` and returns the owning handle.
    pub fn create(&self, bytes: impl Into<Arc<[u8]>>, mime: &str) -> TempHandle {
        let id = Uuid::new_v4();
        {
            let mut guard = self.inner.write();
            guard.entries.insert(
                id,
                TempEntry {
                    bytes: bytes.into(),
                    mime: mime.to_string(),
                },
            );
            guard.created += 1;
        }
        log::debug!("Created temporary handle {TEMP_URI_SCHEME}{id}");
        TempHandle {
            id,
            uri: format!("{TEMP_URI_SCHEME}{id}"),
            store: self.clone(),
            revoked: false,
        }
    }

    /// Returns the bytes behind a live `blob:` URI.
    #[must_use]
    pub fn resolve(&self, uri: &str) -> Option<Arc<[u8]>> {
        let id = parse_temp_uri(uri)?;
        self.inner.read().entries.get(&id).map(|e| Arc::clone(&e.bytes))
    }

    #[must_use]
    pub fn mime_type(&self, uri: &str) -> Option<String> {
        let id = parse_temp_uri(uri)?;
        self.inner.read().entries.get(&id).map(|e| e.mime.clone())
    }

    #[must_use]
    pub fn is_live(&self, uri: &str) -> bool {
        parse_temp_uri(uri).is_some_and(|id| self.inner.read().entries.contains_key(&id))
    }

    /// Number of handles created and not yet revoked.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.inner.read().entries.len()
    }

    /// `(created, revoked)` totals since the store was made.
    #[must_use]
    pub fn totals(&self) -> (u64, u64) {
        let guard = self.inner.read();
        (guard.created, guard.revoked)
    }

    fn revoke_id(&self, id: Uuid) -> bool {
        let mut guard = self.inner.write();
        if guard.entries.remove(&id).is_some() {
            guard.revoked += 1;
            true
        } else {
            false
        }
    }
}

fn parse_temp_uri(uri: &str) -> Option<Uuid> {
    uri.strip_prefix(TEMP_URI_SCHEME)
        .and_then(|rest| Uuid::parse_str(rest).ok())
}

/// Exclusive owner of one temporary handle.
#[derive(Debug)]
pub struct TempHandle {
    id: Uuid,
    uri: String,
    store: TempHandleStore,
    revoked: bool,
}

impl TempHandle {
    #[inline]
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn is_revoked(&self) -> bool {
        self.revoked
    }

    /// Releases the handle's storage. Returns `false` if it was already released.
    pub fn revoke(&mut self) -> bool {
        if self.revoked {
            log::trace!("Temporary handle {} already revoked", self.uri);
            return false;
        }
        self.revoked = true;
        let removed = self.store.revoke_id(self.id);
        log::debug!("Revoked temporary handle {}", self.uri);
        removed
    }
}

impl Drop for TempHandle {
    fn drop(&mut self) {
        if !self.revoked {
            self.revoke();
        }
    }
}
