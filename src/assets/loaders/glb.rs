use std::sync::Arc;

use base64::Engine as _;
use glam::{Quat, Vec3};
use gltf::animation::util::ReadOutputs;

use crate::animation::{AnimationClip, InterpolationMode, KeyframeTrack, TargetPath, Track, TrackData, TrackMeta};
use crate::errors::{AnimatorError, Result};
use crate::host::DecodedAsset;
use crate::scene::{Node, NodeHandle, SceneGraph, Transform};

/// Name given to the node every decoded asset hangs under.
pub const ASSET_ROOT_NAME: &str = "gltf_root";

/// Decodes binary glTF into a [`SceneGraph`].
///
/// Everything that can fail (parsing, buffers, animation channels, hierarchy
/// checks) runs before the first node is inserted, so a failed decode leaves
/// the graph untouched.
pub struct GlbLoader;

impl GlbLoader {
    pub fn load(bytes: &[u8], graph: &mut SceneGraph) -> Result<DecodedAsset> {
        let gltf = gltf::Gltf::from_slice(bytes)?;
        let buffers = Self::load_buffers(&gltf)?;
        let clips = Self::load_animations(&gltf, &buffers)?;
        Self::check_hierarchy(&gltf)?;

        let root = Self::build_nodes(&gltf, graph);

        log::debug!(
            "Decoded GLB: {} nodes, {} clips",
            gltf.nodes().count(),
            clips.len()
        );
        Ok(DecodedAsset { root, clips })
    }

    fn load_buffers(gltf: &gltf::Gltf) -> Result<Vec<Vec<u8>>> {
        let mut buffer_data = Vec::new();
        for buffer in gltf.buffers() {
            let data = match buffer.source() {
                gltf::buffer::Source::Bin => gltf
                    .blob
                    .clone()
                    .ok_or_else(|| AnimatorError::Decode("missing GLB binary chunk".to_string()))?,
                gltf::buffer::Source::Uri(uri) => Self::decode_data_uri(uri)?,
            };
            if data.len() < buffer.length() {
                return Err(AnimatorError::Decode(format!(
                    "buffer {} holds {} bytes, expected {}",
                    buffer.index(),
                    data.len(),
                    buffer.length()
                )));
            }
            buffer_data.push(data);
        }
        Ok(buffer_data)
    }

    /// Only embedded `data:` buffers are supported; a GLB handed over as a
    /// temporary handle has no base path to resolve sibling files against.
    fn decode_data_uri(uri: &str) -> Result<Vec<u8>> {
        let payload = uri
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(";base64,"))
            .map(|(_, data)| data)
            .ok_or_else(|| AnimatorError::Decode(format!("external buffer '{uri}' is not supported")))?;

        base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| AnimatorError::Decode(format!("invalid data URI buffer: {e}")))
    }

    /// Node `children` links must form a forest: one parent at most and no
    /// node among its own ancestors. Anything else would leave nodes that the
    /// asset root can't reach.
    fn check_hierarchy(gltf: &gltf::Gltf) -> Result<()> {
        let count = gltf.nodes().count();
        let mut parents: Vec<Option<usize>> = vec![None; count];

        for node in gltf.nodes() {
            for child in node.children() {
                if let Some(other) = parents[child.index()].replace(node.index()) {
                    return Err(AnimatorError::Decode(format!(
                        "node {} is a child of both node {other} and node {}",
                        child.index(),
                        node.index()
                    )));
                }
            }
        }

        for (start, &first) in parents.iter().enumerate() {
            let mut current = first;
            let mut depth = 0;
            while let Some(parent) = current {
                depth += 1;
                if parent == start || depth > count {
                    return Err(AnimatorError::Decode(format!(
                        "node {start} has a cycle in its ancestry"
                    )));
                }
                current = parents[parent];
            }
        }

        Ok(())
    }

    fn build_nodes(gltf: &gltf::Gltf, graph: &mut SceneGraph) -> NodeHandle {
        let node_mapping: Vec<NodeHandle> = gltf
            .nodes()
            .map(|node| {
                let (t, r, s) = node.transform().decomposed();
                let transform = Transform::from_trs(Vec3::from_array(t), Quat::from_array(r), Vec3::from_array(s));
                graph.add_node(Node::new(node_name(&node)).with_transform(transform))
            })
            .collect();

        for node in gltf.nodes() {
            let parent = node_mapping[node.index()];
            for child in node.children() {
                graph.attach(node_mapping[child.index()], parent);
            }
        }

        let root = graph.add_node(Node::new(ASSET_ROOT_NAME));

        if let Some(scene) = gltf.default_scene().or_else(|| gltf.scenes().next()) {
            for node in scene.nodes() {
                graph.attach(node_mapping[node.index()], root);
            }
        }
        // nodes outside the displayed scene still belong to this asset
        for &handle in &node_mapping {
            if graph.get_node(handle).is_some_and(|n| n.parent().is_none()) {
                graph.attach(handle, root);
            }
        }

        root
    }

    fn load_animations(gltf: &gltf::Gltf, buffers: &[Vec<u8>]) -> Result<Vec<Arc<AnimationClip>>> {
        let mut animations = Vec::new();

        for anim in gltf.animations() {
            let mut tracks = Vec::new();

            for channel in anim.channels() {
                let reader = channel.reader(|buffer| buffers.get(buffer.index()).map(Vec::as_slice));
                let target = channel.target();
                let node_name = node_name(&target.node());

                let Some(inputs) = reader.read_inputs() else {
                    return Err(AnimatorError::Decode(format!(
                        "animation {} has a channel without keyframe times",
                        anim.index()
                    )));
                };
                let times: Vec<f32> = inputs.collect();

                let interpolation = match channel.sampler().interpolation() {
                    gltf::animation::Interpolation::Linear => InterpolationMode::Linear,
                    gltf::animation::Interpolation::Step => InterpolationMode::Step,
                    gltf::animation::Interpolation::CubicSpline => InterpolationMode::CubicSpline,
                };

                let (target_path, data) = match reader.read_outputs() {
                    Some(ReadOutputs::Translations(iter)) => (
                        TargetPath::Translation,
                        TrackData::Vector3(KeyframeTrack::new(times, iter.map(Vec3::from_array).collect(), interpolation)),
                    ),
                    Some(ReadOutputs::Rotations(iter)) => (
                        TargetPath::Rotation,
                        TrackData::Quaternion(KeyframeTrack::new(
                            times,
                            iter.into_f32().map(Quat::from_array).collect(),
                            interpolation,
                        )),
                    ),
                    Some(ReadOutputs::Scales(iter)) => (
                        TargetPath::Scale,
                        TrackData::Vector3(KeyframeTrack::new(times, iter.map(Vec3::from_array).collect(), interpolation)),
                    ),
                    Some(ReadOutputs::MorphTargetWeights(_)) => {
                        log::debug!("Skipping morph target weight channel on '{node_name}'");
                        continue;
                    }
                    None => {
                        return Err(AnimatorError::Decode(format!(
                            "animation {} has a channel without output values",
                            anim.index()
                        )));
                    }
                };

                if !data.is_well_formed() {
                    return Err(AnimatorError::Decode(format!(
                        "animation {} targets '{node_name}' with mismatched keyframe counts",
                        anim.index()
                    )));
                }

                tracks.push(Track {
                    meta: TrackMeta {
                        node_name,
                        target: target_path,
                    },
                    data,
                });
            }

            let name = anim
                .name()
                .map_or_else(|| format!("Animation_{}", anim.index()), ToString::to_string);
            animations.push(Arc::new(AnimationClip::new(name, tracks)));
        }

        Ok(animations)
    }
}

fn node_name(node: &gltf::Node) -> String {
    node.name()
        .map_or_else(|| format!("Node_{}", node.index()), ToString::to_string)
}
