use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::errors::AnimatorError;
use crate::motion::params::CustomParams;
use crate::scene::Transform;

/// Y rotation added by `rotate` every frame (radians).
pub const ROTATE_STEP: f32 = 0.01;
/// Vertical distance moved by `bounce` every frame.
pub const BOUNCE_STEP: f32 = 0.01;
/// `bounce` turns around once the offset leaves `[-BOUNCE_LIMIT, BOUNCE_LIMIT]`.
pub const BOUNCE_LIMIT: f32 = 0.5;
/// Scale change applied by `scale` every frame.
pub const SCALE_STEP: f32 = 0.01;
pub const SCALE_MAX: f32 = 1.3;
pub const SCALE_MIN: f32 = 0.7;
/// Phase advanced by `walk` every frame, independent of frame duration.
pub const WALK_PHASE_STEP: f32 = 0.1;

/// Identifier of a built-in motion profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileId {
    #[default]
    Rotate,
    Bounce,
    Scale,
    Walk,
    Custom,
}

impl ProfileId {
    pub const ALL: [ProfileId; 5] = [
        ProfileId::Rotate,
        ProfileId::Bounce,
        ProfileId::Scale,
        ProfileId::Walk,
        ProfileId::Custom,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProfileId::Rotate => "rotate",
            ProfileId::Bounce => "bounce",
            ProfileId::Scale => "scale",
            ProfileId::Walk => "walk",
            ProfileId::Custom => "custom",
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            ProfileId::Rotate => "Rotate",
            ProfileId::Bounce => "Bounce",
            ProfileId::Scale => "Scale",
            ProfileId::Walk => "Walk",
            ProfileId::Custom => "Custom",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            ProfileId::Rotate => "Rotate the model around its Y axis",
            ProfileId::Bounce => "Make the model bounce up and down",
            ProfileId::Scale => "Grow and shrink the model",
            ProfileId::Walk => "Make the model walk in place",
            ProfileId::Custom => "Create your own animation",
        }
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileId {
    type Err = AnimatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProfileId::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| AnimatorError::UnknownProfile(s.to_string()))
    }
}

/// A running procedural profile together with the state it carries between frames.
///
/// A fresh value starts every profile from its initial state; the driver
/// creates a new one on every (re)start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionState {
    Rotate,
    Bounce { pos_y: f32, direction: f32 },
    Scale { scale: f32, direction: f32 },
    Walk { phase: f32 },
    Custom { elapsed: f32 },
}

impl MotionState {
    #[must_use]
    pub fn new(id: ProfileId) -> Self {
        match id {
            ProfileId::Rotate => MotionState::Rotate,
            ProfileId::Bounce => MotionState::Bounce {
                pos_y: 0.0,
                direction: 1.0,
            },
            ProfileId::Scale => MotionState::Scale {
                scale: 1.0,
                direction: SCALE_STEP,
            },
            ProfileId::Walk => MotionState::Walk { phase: 0.0 },
            ProfileId::Custom => MotionState::Custom { elapsed: 0.0 },
        }
    }

    #[must_use]
    pub fn id(&self) -> ProfileId {
        match self {
            MotionState::Rotate => ProfileId::Rotate,
            MotionState::Bounce { .. } => ProfileId::Bounce,
            MotionState::Scale { .. } => ProfileId::Scale,
            MotionState::Walk { .. } => ProfileId::Walk,
            MotionState::Custom { .. } => ProfileId::Custom,
        }
    }

    /// Advances exactly one frame and writes the result into `transform`.
    ///
    /// `dt` is only consumed by `custom`; the other profiles move by fixed
    /// per-frame increments. `params` is read at call time.
    pub fn advance(&mut self, dt: f32, params: &CustomParams, transform: &mut Transform) {
        match self {
            MotionState::Rotate => {
                transform.rotation.y += ROTATE_STEP;
            }
            MotionState::Bounce { pos_y, direction } => {
                *pos_y += BOUNCE_STEP * *direction;
                if *pos_y > BOUNCE_LIMIT {
                    *direction = -1.0;
                }
                if *pos_y < -BOUNCE_LIMIT {
                    *direction = 1.0;
                }
                transform.position.y = *pos_y;
            }
            MotionState::Scale { scale, direction } => {
                *scale += *direction;
                if *scale > SCALE_MAX {
                    *direction = -SCALE_STEP;
                }
                if *scale < SCALE_MIN {
                    *direction = SCALE_STEP;
                }
                transform.set_uniform_scale(*scale);
            }
            MotionState::Walk { phase } => {
                *phase += WALK_PHASE_STEP;
                let pose = walk_pose(*phase);
                transform.position.y = pose.position_y;
                transform.rotation.z = pose.rotation_z;
                transform.rotation.x = pose.rotation_x;
            }
            MotionState::Custom { elapsed } => {
                *elapsed += dt;
                transform.rotation += Vec3::new(params.rotation_x, params.rotation_y, params.rotation_z);
                transform.position = custom_offset(*elapsed, params);
            }
        }
    }
}

/// Absolute pose of the procedural walk cycle at `phase`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkPose {
    pub position_y: f32,
    pub rotation_z: f32,
    pub rotation_x: f32,
}

#[must_use]
pub fn walk_pose(phase: f32) -> WalkPose {
    WalkPose {
        // bob
        position_y: (phase * 2.0).sin() * 0.1,
        // sway
        rotation_z: phase.sin() * 0.05,
        // lean
        rotation_x: (phase * 2.0).sin() * 0.05,
    }
}

/// Position of the custom profile after `elapsed` seconds.
#[must_use]
pub fn custom_offset(elapsed: f32, params: &CustomParams) -> Vec3 {
    let ms = elapsed * 1000.0;
    Vec3::new(
        (ms * 0.001).sin() * params.position_x,
        (ms * 0.002).sin() * params.position_y,
        (ms * 0.003).sin() * params.position_z,
    )
}
