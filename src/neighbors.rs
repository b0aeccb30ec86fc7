/*
 * Neighbor Query Module
 *
 * Brute-force local sensing: every call scans the whole population, so a
 * tick costs O(n^2). Fine for a few hundred boids.
 */

use crate::boid::Boid;
use crate::math;

// Every other boid strictly closer than `radius`. `subject` is excluded by identity,
// not by position, so a coincident boid still counts as a neighbor.
pub fn neighbors_within<'a>(
    subject: &'a Boid,
    population: &'a [Boid],
    radius: f32,
) -> impl Iterator<Item = &'a Boid> + 'a {
    population.iter().filter(move |other| {
        !std::ptr::eq(*other, subject) && math::distance(subject.position, other.position) < radius
    })
}

pub fn count_within(subject: &Boid, population: &[Boid], radius: f32) -> usize {
    neighbors_within(subject, population, radius).count()
}
