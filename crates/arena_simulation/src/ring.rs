//! Ring containment (planar geometry, vertical axis ignored).

use bevy::prelude::*;

/// Circular arena boundary on the x/z plane.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct RingBounds {
    pub center: Vec3,
    pub radius: f32,
}

impl Default for RingBounds {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            radius: 5.0,
        }
    }
}

impl RingBounds {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Planar offset from center (y = 0).
    fn planar_offset(&self, point: Vec3) -> Vec3 {
        Vec3::new(point.x - self.center.x, 0.0, point.z - self.center.z)
    }

    pub fn planar_distance(&self, point: Vec3) -> f32 {
        self.planar_offset(point).length()
    }

    pub fn contains(&self, point: Vec3) -> bool {
        self.planar_distance(point) <= self.radius
    }

    /// Corrects a move that would leave the ring.
    ///
    /// Inside the ring the candidate is returned unchanged. Outside, the result sits
    /// exactly on the boundary along the center → `current` direction (the pre-move
    /// position), keeping `current`'s height. When `current` is the center itself the
    /// candidate's direction is used instead.
    pub fn clamp(&self, candidate: Vec3, current: Vec3) -> Vec3 {
        if self.contains(candidate) {
            return candidate;
        }

        let direction = self
            .planar_offset(current)
            .try_normalize()
            .or_else(|| self.planar_offset(candidate).try_normalize())
            .unwrap_or(Vec3::X);

        let on_ring = self.center + direction * self.radius;
        Vec3::new(on_ring.x, current.y, on_ring.z)
    }

    /// Hard clamp of the candidate itself onto the ring (referee movement).
    pub fn confine(&self, candidate: Vec3) -> Vec3 {
        let offset = self.planar_offset(candidate);
        if offset.length() <= self.radius {
            return candidate;
        }

        let on_ring = self.center + offset.normalize() * self.radius;
        Vec3::new(on_ring.x, candidate.y, on_ring.z)
    }
}
