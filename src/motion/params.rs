use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AnimatorError;

/// Per-frame rotation increments are limited to this magnitude (radians).
pub const ROTATION_STEP_RANGE: RangeInclusive<f32> = -0.05..=0.05;
/// Position amplitudes are limited to this range (scene units).
pub const POSITION_AMPLITUDE_RANGE: RangeInclusive<f32> = 0.0..=1.0;

/// Parameters of the `custom` motion profile.
///
/// Rotation components are added to the node's Euler rotation every frame;
/// position components are amplitudes of time-driven sine waves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomParams {
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub rotation_z: f32,
    pub position_x: f32,
    pub position_y: f32,
    pub position_z: f32,
}

impl Default for CustomParams {
    fn default() -> Self {
        Self {
            rotation_x: 0.0,
            rotation_y: 0.01,
            rotation_z: 0.0,
            position_x: 0.2,
            position_y: 0.2,
            position_z: 0.0,
        }
    }
}

impl CustomParams {
    /// All-zero parameters: the custom profile leaves the node at rest.
    pub const ZERO: Self = Self {
        rotation_x: 0.0,
        rotation_y: 0.0,
        rotation_z: 0.0,
        position_x: 0.0,
        position_y: 0.0,
        position_z: 0.0,
    };

    #[must_use]
    pub fn get(&self, param: CustomParam) -> f32 {
        match param {
            CustomParam::RotationX => self.rotation_x,
            CustomParam::RotationY => self.rotation_y,
            CustomParam::RotationZ => self.rotation_z,
            CustomParam::PositionX => self.position_x,
            CustomParam::PositionY => self.position_y,
            CustomParam::PositionZ => self.position_z,
        }
    }

    /// Stores `value` clamped to the parameter's range. Non-finite input counts as 0.
    pub fn set(&mut self, param: CustomParam, value: f32) {
        let value = param.clamp(value);
        let slot = match param {
            CustomParam::RotationX => &mut self.rotation_x,
            CustomParam::RotationY => &mut self.rotation_y,
            CustomParam::RotationZ => &mut self.rotation_z,
            CustomParam::PositionX => &mut self.position_x,
            CustomParam::PositionY => &mut self.position_y,
            CustomParam::PositionZ => &mut self.position_z,
        };
        *slot = value;
    }

    /// Returns a copy with every component clamped into range.
    #[must_use]
    pub fn clamped(self) -> Self {
        let mut out = Self::ZERO;
        for param in CustomParam::ALL {
            out.set(param, self.get(param));
        }
        out
    }
}

/// Identifies one field of [`CustomParams`]; parses from the camelCase field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomParam {
    RotationX,
    RotationY,
    RotationZ,
    PositionX,
    PositionY,
    PositionZ,
}

impl CustomParam {
    pub const ALL: [CustomParam; 6] = [
        CustomParam::RotationX,
        CustomParam::RotationY,
        CustomParam::RotationZ,
        CustomParam::PositionX,
        CustomParam::PositionY,
        CustomParam::PositionZ,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CustomParam::RotationX => "rotationX",
            CustomParam::RotationY => "rotationY",
            CustomParam::RotationZ => "rotationZ",
            CustomParam::PositionX => "positionX",
            CustomParam::PositionY => "positionY",
            CustomParam::PositionZ => "positionZ",
        }
    }

    #[must_use]
    pub fn range(self) -> RangeInclusive<f32> {
        match self {
            CustomParam::RotationX | CustomParam::RotationY | CustomParam::RotationZ => {
                ROTATION_STEP_RANGE
            }
            CustomParam::PositionX | CustomParam::PositionY | CustomParam::PositionZ => {
                POSITION_AMPLITUDE_RANGE
            }
        }
    }

    #[must_use]
    pub fn clamp(self, value: f32) -> f32 {
        if !value.is_finite() {
            return 0.0;
        }
        let range = self.range();
        value.clamp(*range.start(), *range.end())
    }
}

impl fmt::Display for CustomParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomParam {
    type Err = AnimatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CustomParam::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| AnimatorError::UnknownParameter(s.to_string()))
    }
}
