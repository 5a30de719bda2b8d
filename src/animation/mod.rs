//! Embedded clip playback.
//!
//! Clips decoded from an asset are sampled by an [`AnimationAction`] and
//! written onto the asset's nodes through a [`ClipBinding`].

pub mod action;
pub mod binder;
pub mod binding;
pub mod clip;
pub mod player;
pub mod tracks;
pub mod values;

pub use action::{AnimationAction, TrackValue};
pub use binder::Binder;
pub use binding::{PropertyBinding, TargetPath};
pub use clip::{AnimationClip, Track, TrackData, TrackMeta};
pub use player::ClipBinding;
pub use tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
