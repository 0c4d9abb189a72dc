//! Small geometric helpers shared by the oracle and the subsystems.
//!
//! Conventions: +Y is up, yaw spins around +Y in radians, and a yaw of zero
//! faces +Z.

use glam::{Affine3A, Quat, Vec3};

/// Converts points between world space and the local space of a parent node.
pub trait LocalSpace {
    fn world_to_local(&self, point: Vec3) -> Vec3;
    fn local_to_world(&self, point: Vec3) -> Vec3;
}

impl LocalSpace for Affine3A {
    fn world_to_local(&self, point: Vec3) -> Vec3 {
        self.inverse().transform_point3(point)
    }

    fn local_to_world(&self, point: Vec3) -> Vec3 {
        self.transform_point3(point)
    }
}

/// Axis-aligned box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Aabb {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
        }
    }

    pub fn cube(center: Vec3, half_extent: f32) -> Self {
        Self::new(center, Vec3::splat(half_extent))
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// Euclidean distance from `point` to the closest point of the box; zero inside.
    pub fn distance_to(&self, point: Vec3) -> f32 {
        let closest = point.clamp(self.min(), self.max());
        point.distance(closest)
    }

    pub fn contains(&self, point: Vec3) -> bool {
        self.distance_to(point) <= f32::EPSILON
    }
}

/// Yaw (radians) that turns an entity at `from` to face `to`, ignoring height.
pub fn yaw_towards(from: Vec3, to: Vec3) -> f32 {
    let dx = to.x - from.x;
    let dz = to.z - from.z;
    dx.atan2(dz)
}

/// World transform of a node placed at `position` and turned by `yaw`.
pub fn yaw_transform(position: Vec3, yaw: f32) -> Affine3A {
    Affine3A::from_rotation_translation(Quat::from_rotation_y(yaw), position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPSILON: f32 = 1e-5;

    fn approx_vec(a: Vec3, b: Vec3) {
        assert!(a.distance(b) <= EPSILON, "{a:?} != {b:?}");
    }

    #[test]
    fn yaw_zero_faces_positive_z() {
        assert!(yaw_towards(Vec3::ZERO, Vec3::new(0.0, 5.0, 3.0)).abs() < EPSILON);
        let forward = Quat::from_rotation_y(0.0) * Vec3::Z;
        approx_vec(forward, Vec3::Z);
    }

    #[test]
    fn yaw_towards_uses_x_over_z() {
        let yaw = yaw_towards(Vec3::new(2.15, 0.42, -1.0), Vec3::new(0.0, 0.0, -1.0));
        assert!((yaw + FRAC_PI_2).abs() < EPSILON, "yaw {yaw}");
        let behind = yaw_towards(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!((behind.abs() - PI).abs() < EPSILON, "yaw {behind}");
    }

    #[test]
    fn yaw_transform_faces_target() {
        let from = Vec3::new(1.0, 0.0, 1.0);
        let to = Vec3::new(-2.0, 0.0, 4.0);
        let transform = yaw_transform(from, yaw_towards(from, to));
        let forward = transform.transform_vector3(Vec3::Z);
        approx_vec(forward, (to - from).normalize());
    }

    #[test]
    fn local_space_round_trips_through_rotated_parent() {
        let parent = yaw_transform(Vec3::new(2.0, 0.0, -1.0), FRAC_PI_2);
        let world = Vec3::new(0.5, 1.2, 0.25);
        let local = parent.world_to_local(world);
        approx_vec(parent.local_to_world(local), world);
        approx_vec(Affine3A::IDENTITY.world_to_local(world), world);
    }

    #[test]
    fn aabb_distance_is_zero_inside_and_positive_outside() {
        let bounds = Aabb::cube(Vec3::new(0.0, 1.2, -0.5), 0.06);
        assert!(bounds.contains(Vec3::new(0.05, 1.2, -0.5)));
        let outside = bounds.distance_to(Vec3::new(0.1, 1.2, -0.5));
        assert!((outside - 0.04).abs() < EPSILON, "distance {outside}");
    }
}
