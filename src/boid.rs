/*
 * Boid Module
 *
 * This module defines the Boid struct: one flocking unit with a position,
 * a velocity and a per-tick force accumulator. The steering rules live in
 * `steering`; here we only accumulate forces and integrate them.
 */

use serde::Serialize;

use crate::math::{self, Quat, Vec3};

// Stable handle for a boid inside a flock. Never reused within one run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AgentId(pub u64);

#[derive(Clone, Debug)]
pub struct Boid {
    pub id: AgentId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    // Facing for renderers only, physics never reads it
    pub orientation: Quat,
}

impl Boid {
    pub fn new(id: AgentId, position: Vec3, velocity: Vec3) -> Self {
        let mut boid = Self {
            id,
            position,
            velocity,
            acceleration: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        };
        boid.update_orientation();
        boid
    }

    // Apply a force to the boid
    #[inline]
    pub fn apply_force(&mut self, force: Vec3) {
        self.acceleration += force;
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Advances the boid by one unit step.
    ///
    /// Adds the accumulated acceleration to the velocity, clamps the speed to
    /// `max_speed`, moves the boid and clears the accumulator.
    pub fn integrate(&mut self, max_speed: f32) {
        self.velocity += self.acceleration;

        // Limit speed
        self.velocity = math::clamp_length(self.velocity, 0.0, max_speed);

        self.position += self.velocity;
        self.acceleration = Vec3::ZERO;

        self.update_orientation();
    }

    // Look along the velocity, +Z forward. A stationary boid keeps its last facing.
    fn update_orientation(&mut self) {
        let heading = math::normalize_or_zero(self.velocity);
        if heading != Vec3::ZERO {
            self.orientation = Quat::from_rotation_arc(Vec3::Z, heading);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boid_at(position: Vec3, velocity: Vec3) -> Boid {
        Boid::new(AgentId(0), position, velocity)
    }

    #[test]
    fn integrate_moves_by_new_velocity_and_clears_acceleration() {
        let mut boid = boid_at(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        boid.apply_force(Vec3::new(0.0, 1.0, 0.0));
        boid.apply_force(Vec3::new(0.0, 1.0, 0.0));
        boid.integrate(10.0);

        assert_eq!(boid.velocity, Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(boid.position, Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(boid.acceleration, Vec3::ZERO);
    }

    #[test]
    fn integrate_clamps_speed_without_stopping() {
        let mut boid = boid_at(Vec3::ZERO, Vec3::new(0.0, 0.0, 9.0));
        boid.apply_force(Vec3::new(0.0, 0.0, 9.0));
        boid.integrate(3.0);

        assert!((boid.speed() - 3.0).abs() < 1.0e-5);
        assert!(boid.velocity.z > 0.0);
        assert!((boid.position.z - 3.0).abs() < 1.0e-5);
    }

    #[test]
    fn orientation_faces_velocity() {
        let mut boid = boid_at(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0));
        boid.integrate(5.0);
        let forward = boid.orientation * Vec3::Z;
        assert!((forward - Vec3::X).length() < 1.0e-5);
    }

    #[test]
    fn stationary_boid_keeps_orientation() {
        let mut boid = boid_at(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        let facing = boid.orientation;
        boid.velocity = Vec3::ZERO;
        boid.integrate(5.0);
        assert_eq!(boid.orientation, facing);
    }
}
