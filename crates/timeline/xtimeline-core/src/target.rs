//! Scene objects driven by transform tracks.

use hashbrown::HashMap;
use nalgebra::{UnitQuaternion, Vector3};

use crate::binding::TargetHandle;
use crate::data::Vec3;

/// Anything with a settable local position and rotation.
pub trait TransformTarget {
    fn set_local_position(&mut self, position: Vec3);
    /// Rotation as Euler angles in degrees; implementors convert to their
    /// own rotation representation.
    fn set_local_euler_degrees(&mut self, euler: Vec3);
}

/// Lookup of targets by handle.
pub trait TargetRegistry {
    fn target_mut(&mut self, handle: &str) -> Option<&mut dyn TransformTarget>;
}

/// Convert Euler degrees to a quaternion, rotating about Z, then X, then Y.
pub fn euler_degrees_to_quat(euler: Vec3) -> UnitQuaternion<f32> {
    let [x, y, z] = euler;
    let qx = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), x.to_radians());
    let qy = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), y.to_radians());
    let qz = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), z.to_radians());
    qy * qx * qz
}

/// Local transform of a scene object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalTransform {
    pub position: Vector3<f32>,
    pub rotation: UnitQuaternion<f32>,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
        }
    }
}

impl TransformTarget for LocalTransform {
    fn set_local_position(&mut self, position: Vec3) {
        self.position = Vector3::from(position);
    }

    fn set_local_euler_degrees(&mut self, euler: Vec3) {
        self.rotation = euler_degrees_to_quat(euler);
    }
}

/// Flat set of named scene objects.
#[derive(Debug, Default)]
pub struct SceneTargets {
    targets: HashMap<TargetHandle, LocalTransform>,
}

impl SceneTargets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, handle: impl Into<TargetHandle>, transform: LocalTransform) {
        self.targets.insert(handle.into(), transform);
    }

    pub fn get(&self, handle: &str) -> Option<&LocalTransform> {
        self.targets.get(handle)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl TargetRegistry for SceneTargets {
    fn target_mut(&mut self, handle: &str) -> Option<&mut dyn TransformTarget> {
        self.targets
            .get_mut(handle)
            .map(|t| t as &mut dyn TransformTarget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn yaw_quarter_turn_about_y() {
        let q = euler_degrees_to_quat([0.0, 90.0, 0.0]);
        let v = q * Vector3::x();
        assert_relative_eq!(v, Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn z_is_applied_before_x() {
        // z maps x -> y, then x maps y -> z.
        let q = euler_degrees_to_quat([90.0, 0.0, 90.0]);
        let v = q * Vector3::x();
        assert_relative_eq!(v, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn registry_reaches_inserted_targets_only() {
        let mut scene = SceneTargets::new();
        scene.insert("cube", LocalTransform::default());
        {
            let target = scene.target_mut("cube").unwrap();
            target.set_local_position([1.0, 2.0, 3.0]);
        }
        assert!(scene.target_mut("ghost").is_none());
        assert_eq!(
            scene.get("cube").unwrap().position,
            Vector3::new(1.0, 2.0, 3.0)
        );
    }
}
