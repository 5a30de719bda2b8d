use glam::{EulerRot, Quat, Vec3};

/// Transform component.
///
/// Position, Euler rotation (XYZ order, radians) and scale of a node.
///
/// Procedural profiles add to the Euler components directly; quaternion
/// input from clips goes through [`Transform::set_rotation_quat`].
#[derive(Debug, Clone)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    /// Builds a transform from a decomposed TRS triple (as stored in glTF nodes).
    #[must_use]
    pub fn from_trs(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        let mut transform = Self::new();
        transform.position = translation;
        transform.set_rotation_quat(rotation);
        transform.scale = scale;
        transform
    }

    /// Rotation as a quaternion (XYZ Euler order).
    #[inline]
    #[must_use]
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Sets rotation from a quaternion, converting to XYZ Euler angles.
    pub fn set_rotation_quat(&mut self, rotation: Quat) {
        let (x, y, z) = rotation.to_euler(EulerRot::XYZ);
        self.rotation = Vec3::new(x, y, z);
    }

    /// Sets the same scale factor on all three axes.
    #[inline]
    pub fn set_uniform_scale(&mut self, s: f32) {
        self.scale = Vec3::splat(s);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
