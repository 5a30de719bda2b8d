//! Asset Handle
//!
//! One loaded model bound to the viewport: where it came from, the root node
//! transforms are applied to, and the clips it embeds.
//!
//! # Lifecycle
//! - Created after the renderer decoded the source successfully.
//! - [`AssetHandle::release`] revokes a locally-owned temporary handle and
//!   removes the asset's nodes; repeated calls do nothing.
//! - After release [`AssetHandle::root`] is `None`.

use std::sync::Arc;

use crate::animation::AnimationClip;
use crate::assets::ingest::GLB_EXTENSION;
use crate::assets::temp::TempHandle;
use crate::host::{DecodedAsset, NodeTransforms};
use crate::scene::NodeHandle;

/// Where an asset's bytes come from.
#[derive(Debug)]
pub enum AssetSource {
    /// Opaque reference resolved entirely by the renderer.
    Uri(String),
    /// User-supplied file exposed through a temporary handle this asset owns.
    Local(TempHandle),
}

impl AssetSource {
    #[must_use]
    pub fn uri(&self) -> &str {
        match self {
            AssetSource::Uri(uri) => uri,
            AssetSource::Local(handle) => handle.uri(),
        }
    }

    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(self, AssetSource::Local(_))
    }

    /// Revokes the temporary handle, if any. Idempotent.
    pub fn release(&mut self) {
        if let AssetSource::Local(handle) = self {
            handle.revoke();
        }
    }
}

#[derive(Debug)]
pub struct AssetHandle {
    source: AssetSource,
    name: String,
    root: Option<NodeHandle>,
    clips: Vec<Arc<AnimationClip>>,
}

impl AssetHandle {
    #[must_use]
    pub fn new(source: AssetSource, name: impl Into<String>, decoded: DecodedAsset) -> Self {
        Self {
            source,
            name: name.into(),
            root: Some(decoded.root),
            clips: decoded.clips,
        }
    }

    #[must_use]
    pub fn source(&self) -> &AssetSource {
        &self.source
    }

    #[must_use]
    pub fn source_uri(&self) -> &str {
        self.source.uri()
    }

    /// Display name (the file name for local files).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> Option<NodeHandle> {
        self.root
    }

    /// Embedded clips in declaration order.
    #[must_use]
    pub fn clips(&self) -> &[Arc<AnimationClip>] {
        &self.clips
    }

    #[must_use]
    pub fn clip_names(&self) -> Vec<&str> {
        self.clips.iter().map(|c| c.name.as_str()).collect()
    }

    #[must_use]
    pub fn is_released(&self) -> bool {
        self.root.is_none()
    }

    /// Suggested download name: `animated-<name>`, with `.glb` appended when missing.
    #[must_use]
    pub fn export_name(&self) -> String {
        default_export_name(&self.name)
    }

    /// Revokes the temporary handle and drops the asset's nodes from the scene.
    pub fn release<S>(&mut self, scene: &mut S)
    where
        S: NodeTransforms + ?Sized,
    {
        self.source.release();
        if let Some(root) = self.root.take() {
            let removed = scene.remove_subtree(root);
            log::info!("Released asset '{}' ({removed} nodes)", self.name);
        }
    }
}

#[must_use]
pub fn default_export_name(name: &str) -> String {
    let name = format!("animated-{name}");
    if name.to_lowercase().ends_with(GLB_EXTENSION) {
        name
    } else {
        format!("{name}{GLB_EXTENSION}")
    }
}
