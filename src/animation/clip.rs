use glam::{Quat, Vec3};

use crate::animation::binding::TargetPath;
use crate::animation::tracks::KeyframeTrack;

#[derive(Debug, Clone)]
pub struct TrackMeta {
    pub node_name: String,
    pub target: TargetPath,
}

#[derive(Debug, Clone)]
pub enum TrackData {
    Vector3(KeyframeTrack<Vec3>),
    Quaternion(KeyframeTrack<Quat>),
}

impl TrackData {
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        match self {
            TrackData::Vector3(track) => track.is_well_formed(),
            TrackData::Quaternion(track) => track.is_well_formed(),
        }
    }

    #[must_use]
    pub fn duration(&self) -> f32 {
        match self {
            TrackData::Vector3(track) => track.duration(),
            TrackData::Quaternion(track) => track.duration(),
        }
    }
}

/// One animated property of one node.
#[derive(Debug, Clone)]
pub struct Track {
    pub meta: TrackMeta,
    pub data: TrackData,
}

/// A named animation embedded in a loaded asset.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
    pub tracks: Vec<Track>,
}

impl AnimationClip {
    /// Creates a clip; the duration is the latest keyframe time across all tracks.
    #[must_use]
    pub fn new(name: impl Into<String>, tracks: Vec<Track>) -> Self {
        let duration = tracks
            .iter()
            .map(|t| t.data.duration())
            .fold(0.0_f32, f32::max);

        Self {
            name: name.into(),
            duration,
            tracks,
        }
    }

    /// A clip with no tracks. Useful as a placeholder for clips whose channels
    /// target unsupported properties.
    #[must_use]
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }
}
