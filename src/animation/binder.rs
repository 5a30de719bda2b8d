use crate::animation::binding::PropertyBinding;
use crate::animation::clip::AnimationClip;
use crate::host::NodeTransforms;
use crate::scene::NodeHandle;

pub struct Binder;

impl Binder {
    /// Resolves each track of `clip` to a node under `root` by name.
    ///
    /// Tracks whose node cannot be found are skipped.
    #[must_use]
    pub fn bind<S>(scene: &S, root: NodeHandle, clip: &AnimationClip) -> Vec<PropertyBinding>
    where
        S: NodeTransforms + ?Sized,
    {
        let mut bindings = Vec::with_capacity(clip.tracks.len());

        for (track_index, track) in clip.tracks.iter().enumerate() {
            if let Some(node_handle) = scene.find_by_name(root, &track.meta.node_name) {
                bindings.push(PropertyBinding {
                    track_index,
                    node_handle,
                    target: track.meta.target,
                });
            } else {
                log::debug!(
                    "Clip '{}': no node named '{}', track skipped",
                    clip.name,
                    track.meta.node_name
                );
            }
        }

        bindings
    }
}
