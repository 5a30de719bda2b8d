use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::animation::{AnimationClip, ClipBinding};
use crate::host::NodeTransforms;
use crate::motion::profile::ProfileId;
use crate::scene::NodeHandle;

/// Case-insensitive name fragments that mark a clip as a locomotion clip.
pub const LOCOMOTION_KEYWORDS: [&str; 3] = ["walk", "run", "idle"];

/// Which profile selections an embedded clip may take over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipPolicy {
    /// Any non-custom profile plays an embedded clip when the asset has one.
    #[default]
    OverrideAll,
    /// Only `walk` plays an embedded clip; the other profiles stay procedural.
    WalkOnly,
}

/// Decides whether an embedded clip replaces the requested procedural profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClipSelector {
    pub policy: ClipPolicy,
}

impl ClipSelector {
    #[must_use]
    pub fn new(policy: ClipPolicy) -> Self {
        Self { policy }
    }

    /// Picks the clip to play for `requested`, or `None` to run the procedural profile.
    ///
    /// `walk` prefers the first clip whose name contains a locomotion keyword;
    /// every other eligible profile, and `walk` without such a clip, gets the
    /// first declared clip. `custom` is never overridden.
    #[must_use]
    pub fn select<'a>(
        &self,
        clips: &'a [Arc<AnimationClip>],
        requested: ProfileId,
    ) -> Option<&'a Arc<AnimationClip>> {
        if clips.is_empty() || requested == ProfileId::Custom {
            return None;
        }
        if self.policy == ClipPolicy::WalkOnly && requested != ProfileId::Walk {
            return None;
        }

        if requested == ProfileId::Walk
            && let Some(clip) = clips.iter().find(|c| is_locomotion_clip(&c.name))
        {
            return Some(clip);
        }

        clips.first()
    }

    /// Like [`select`](Self::select), and binds the chosen clip to the asset's nodes.
    pub fn bind<S>(
        &self,
        scene: &S,
        root: NodeHandle,
        clips: &[Arc<AnimationClip>],
        requested: ProfileId,
    ) -> Option<ClipBinding>
    where
        S: NodeTransforms + ?Sized,
    {
        let clip = self.select(clips, requested)?;
        log::debug!("Profile '{requested}' overridden by embedded clip '{}'", clip.name);
        Some(ClipBinding::bind(scene, root, Arc::clone(clip)))
    }
}

#[must_use]
pub fn is_locomotion_clip(name: &str) -> bool {
    let lower = name.to_lowercase();
    LOCOMOTION_KEYWORDS.iter().any(|k| lower.contains(k))
}
