/*
 * Containment Module
 *
 * Soft boundary: instead of wrapping or clamping positions, every boid is
 * pushed back by an inverse-square repulsion from the walls of a box or
 * sphere centered at the origin. The push is scaled by speed^3 so fast boids,
 * which cover more ground per tick, turn earlier. Nothing stops a boid from
 * overshooting the wall for a tick or two.
 */

use crate::boid::Boid;
use crate::math::{self, Vec3};
use crate::params::Boundary;

// Wall clearances below this are treated as this, keeping 1/d^2 finite
pub const CONTAINMENT_EPSILON: f32 = 1.0e-3;

// Inward normals of the six box faces, paired with the axis they cut
const BOX_FACES: [(usize, Vec3); 6] = [
    (0, Vec3::NEG_X),
    (0, Vec3::X),
    (1, Vec3::NEG_Y),
    (1, Vec3::Y),
    (2, Vec3::NEG_Z),
    (2, Vec3::Z),
];

#[inline]
fn inverse_square(distance: f32) -> f32 {
    let d = distance.max(CONTAINMENT_EPSILON);
    1.0 / (d * d)
}

/// Repulsion keeping `boid` inside `boundary`.
///
/// `body_radius` is the boid's bounding radius; a wall starts to feel
/// infinitely hard once the boid is two body radii from it.
pub fn containment_force(boid: &Boid, boundary: Boundary, body_radius: f32) -> Vec3 {
    let speed = boid.speed();
    let speed_cubed = speed * speed * speed;
    if speed_cubed == 0.0 {
        return Vec3::ZERO;
    }

    let push = match boundary {
        Boundary::Box { half_extent } => box_push(boid.position, half_extent, body_radius),
        Boundary::Sphere { radius } => sphere_push(boid.position, radius, body_radius),
    };

    push * speed_cubed
}

// Sum of six single-wall pushes. Each wall pushes along its inward normal with
// the length of the vector from the wall-projection point to the boid, scaled
// by 1/d^2 where d is that length minus two body radii. Once the boid is within
// two body radii of a face (or past it) that vector can vanish or point out, so
// the unit inward normal is used instead and d is floored.
fn box_push(position: Vec3, half_extent: f32, body_radius: f32) -> Vec3 {
    let reach = 2.0 * body_radius;
    BOX_FACES
        .iter()
        .map(|&(axis, inward)| {
            // Wall-projection point: the boid's position moved onto the face plane
            let mut projection = position;
            projection[axis] = -inward[axis] * half_extent;

            let gap = (position - projection).dot(inward);
            if gap > reach {
                inward * gap * inverse_square(gap - reach)
            } else {
                inward * inverse_square(gap - reach)
            }
        })
        .fold(Vec3::ZERO, |sum, push| sum + push)
}

fn sphere_push(position: Vec3, radius: f32, body_radius: f32) -> Vec3 {
    let clearance = radius - position.length() - 2.0 * body_radius;
    math::normalize_or_zero(position) * -inverse_square(clearance)
}
