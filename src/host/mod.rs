//! Renderer-facing interfaces.
//!
//! The animator never talks to a concrete renderer. It consumes three narrow
//! capabilities:
//!
//! - [`AssetDecoder`]: turn a source URI into a root node plus embedded clips
//! - [`NodeTransforms`]: mutate node transforms and drop a decoded subtree
//! - [`FrameScheduler`]: per-frame registration with a matching cancellation
//!
//! [`HeadlessRenderer`] and [`ManualFrameLoop`] implement them in memory for the
//! CLI and the test suite.

pub mod frame;
pub mod headless;

use std::future::Future;
use std::sync::Arc;

use crate::animation::AnimationClip;
use crate::errors::Result;
use crate::scene::{NodeHandle, Transform};

pub use frame::{FrameTick, FrameToken, ManualFrameLoop};
pub use headless::HeadlessRenderer;

/// Output of a successful decode: the asset's root node and its embedded clips
/// in declaration order.
#[derive(Debug, Clone)]
pub struct DecodedAsset {
    pub root: NodeHandle,
    pub clips: Vec<Arc<AnimationClip>>,
}

/// Decode-and-load primitive of the scene renderer.
pub trait AssetDecoder {
    /// Resolves `uri`, decodes it and inserts its nodes into the scene.
    ///
    /// On failure nothing may be left behind in the scene.
    fn decode(&mut self, uri: &str) -> impl Future<Output = Result<DecodedAsset>>;
}

/// Node-transform mutation interface of the scene renderer.
pub trait NodeTransforms {
    fn transform_mut(&mut self, node: NodeHandle) -> Option<&mut Transform>;

    fn find_by_name(&self, root: NodeHandle, name: &str) -> Option<NodeHandle>;

    /// Removes a decoded asset's nodes. Stale handles must resolve to `None` afterwards.
    fn remove_subtree(&mut self, root: NodeHandle) -> usize;
}

/// Per-frame callback registration with matching cancellation.
///
/// A registration stays live until cancelled; the host delivers one
/// [`FrameTick`] per live registration per rendered frame.
pub trait FrameScheduler {
    fn register(&mut self) -> FrameToken;

    /// Invalidates `token`. Returns `false` if it was not live.
    fn cancel(&mut self, token: FrameToken) -> bool;

    fn is_live(&self, token: FrameToken) -> bool;
}
