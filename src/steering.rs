/*
 * Steering Behaviors Module
 *
 * The three flocking rules plus seek:
 * 1. Separation: Avoid crowding neighbors
 * 2. Alignment: Steer towards the average heading of neighbors
 * 3. Cohesion: Steer towards the average position of neighbors
 *
 * Every rule averages some neighbor quantity and then applies Reynolds'
 * "steering = desired - velocity", clamped to a maximum force. The neighbor
 * sets handed in are already filtered to the behavior's sensing radius
 * (see `neighbors::neighbors_within`). An empty set yields a zero force.
 */

use crate::boid::Boid;
use crate::math::{self, Vec3};

// Mean of the vectors, None when there are none
fn average(vectors: impl IntoIterator<Item = Vec3>) -> Option<Vec3> {
    let (sum, count) = vectors
        .into_iter()
        .fold((Vec3::ZERO, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f32)
    }
}

/// Reynolds steering: head along `direction` at `max_speed`, correcting the
/// current `velocity`, with the correction capped at `max_force`.
///
/// A zero `direction` normalizes to zero, which leaves a pure braking force.
#[inline]
pub fn steer_towards(direction: Vec3, velocity: Vec3, max_speed: f32, max_force: f32) -> Vec3 {
    let desired = math::set_length(direction, max_speed);
    math::clamp_length(desired - velocity, 0.0, max_force)
}

// Calculate separation force (avoid crowding neighbors).
// `weight` doubles as the force cap.
pub fn separation<'a>(
    boid: &Boid,
    neighbors: impl IntoIterator<Item = &'a Boid>,
    weight: f32,
    max_speed: f32,
) -> Vec3 {
    let pushes = neighbors.into_iter().map(|other| {
        let d = math::distance(boid.position, other.position);
        if d > 0.0 {
            // Weight by distance: closer neighbors push harder
            math::normalize_or_zero(boid.position - other.position) / d
        } else {
            Vec3::ZERO
        }
    });

    match average(pushes) {
        Some(push) => steer_towards(push, boid.velocity, max_speed, weight),
        None => Vec3::ZERO,
    }
}

// Calculate alignment force (steer towards average heading of neighbors).
// `weight` doubles as the force cap.
pub fn alignment<'a>(
    boid: &Boid,
    neighbors: impl IntoIterator<Item = &'a Boid>,
    weight: f32,
    max_speed: f32,
) -> Vec3 {
    match average(neighbors.into_iter().map(|other| other.velocity)) {
        Some(heading) => steer_towards(heading, boid.velocity, max_speed, weight),
        None => Vec3::ZERO,
    }
}

// Calculate cohesion force (steer towards average position of neighbors)
pub fn cohesion<'a>(
    boid: &Boid,
    neighbors: impl IntoIterator<Item = &'a Boid>,
    max_speed: f32,
    max_force: f32,
) -> Vec3 {
    match average(neighbors.into_iter().map(|other| other.position)) {
        Some(center) => seek(boid, center, max_speed, max_force),
        None => Vec3::ZERO,
    }
}

pub fn seek(boid: &Boid, target: Vec3, max_speed: f32, max_force: f32) -> Vec3 {
    seek_from(boid.position, boid.velocity, target, max_speed, max_force)
}

// Seek for anything that has a position and velocity but is not a boid
pub fn seek_from(
    position: Vec3,
    velocity: Vec3,
    target: Vec3,
    max_speed: f32,
    max_force: f32,
) -> Vec3 {
    steer_towards(target - position, velocity, max_speed, max_force)
}
