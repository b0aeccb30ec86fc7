/*
 * Follow Controller Module
 *
 * A virtual viewpoint that chases a chosen boid. It has its own position and
 * velocity and steers with the same seek rule the boids use, so it lags and
 * eases into the target's motion instead of being glued to it. Nothing here
 * feeds back into the flock.
 */

use crate::math::{self, Vec3};
use crate::steering::seek_from;

pub struct FollowController {
    position: Vec3,
    velocity: Vec3,
    acceleration: Vec3,
    pub max_speed: f32,
    pub max_force: f32,
    // Added to the target position, e.g. to trail behind and above
    pub offset: Vec3,
}

impl FollowController {
    pub fn new(position: Vec3, max_speed: f32, max_force: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            max_speed,
            max_force,
            offset: Vec3::ZERO,
        }
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    // One unit step towards `target`
    pub fn update(&mut self, target: Vec3) {
        self.acceleration += seek_from(
            self.position,
            self.velocity,
            target + self.offset,
            self.max_speed,
            self.max_force,
        );

        self.velocity = math::clamp_length(self.velocity + self.acceleration, 0.0, self.max_speed);
        self.position += self.velocity;
        self.acceleration = Vec3::ZERO;
    }

    // Teleport for discontinuous re-targeting
    pub fn snap_to(&mut self, position: Vec3) {
        self.position = position;
        self.velocity = Vec3::ZERO;
        self.acceleration = Vec3::ZERO;
    }
}
