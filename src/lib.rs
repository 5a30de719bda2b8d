#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod assets;
pub mod errors;
pub mod host;
pub mod motion;
pub mod scene;
pub mod session;
pub mod settings;

pub use animation::{AnimationAction, AnimationClip, Binder, ClipBinding};
pub use assets::{AssetHandle, AssetSource, GlbLoader, LocalFile, TempHandle, TempHandleStore};
pub use errors::{AnimatorError, Result};
pub use host::{
    AssetDecoder, DecodedAsset, FrameScheduler, FrameTick, FrameToken, HeadlessRenderer, ManualFrameLoop,
    NodeTransforms,
};
pub use motion::{AnimationDriver, ClipPolicy, ClipSelector, CustomParam, CustomParams, DriverState, ProfileId};
pub use scene::{Node, NodeHandle, SceneGraph, Transform};
pub use session::{ExportRequest, ViewerSession};
pub use settings::AnimatorSettings;
