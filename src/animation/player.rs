use std::sync::Arc;

use crate::animation::action::{AnimationAction, TrackValue};
use crate::animation::binder::Binder;
use crate::animation::binding::{PropertyBinding, TargetPath};
use crate::animation::clip::AnimationClip;
use crate::host::NodeTransforms;
use crate::scene::NodeHandle;

/// An embedded clip bound to a loaded asset and currently playing.
///
/// Owns the playback controller; dropping the binding stops playback.
#[derive(Debug)]
pub struct ClipBinding {
    action: AnimationAction,
    bindings: Vec<PropertyBinding>,
}

impl ClipBinding {
    /// Binds `clip` to the nodes under `root` and starts it from time 0.
    pub fn bind<S>(scene: &S, root: NodeHandle, clip: Arc<AnimationClip>) -> Self
    where
        S: NodeTransforms + ?Sized,
    {
        let bindings = Binder::bind(scene, root, &clip);
        let mut action = AnimationAction::new(clip);
        action.reset().play();
        Self { action, bindings }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.action.clip().name
    }

    #[must_use]
    pub fn action(&self) -> &AnimationAction {
        &self.action
    }

    #[must_use]
    pub fn bindings(&self) -> &[PropertyBinding] {
        &self.bindings
    }

    /// Advances playback by one frame and writes sampled values to the bound nodes.
    ///
    /// Returns the number of node properties written.
    pub fn update<S>(&mut self, dt: f32, scene: &mut S) -> usize
    where
        S: NodeTransforms + ?Sized,
    {
        self.action.update(dt);
        if !self.action.enabled {
            return 0;
        }

        let mut written = 0;
        for binding in &self.bindings {
            let Some(value) = self.action.sample_track(binding.track_index) else {
                continue;
            };
            let Some(transform) = scene.transform_mut(binding.node_handle) else {
                continue;
            };

            match (value, binding.target) {
                (TrackValue::Vector3(v), TargetPath::Translation) => transform.position = v,
                (TrackValue::Vector3(v), TargetPath::Scale) => transform.scale = v,
                (TrackValue::Quaternion(q), TargetPath::Rotation) => transform.set_rotation_quat(q),
                _ => continue,
            }
            written += 1;
        }
        written
    }
}
