/*
 * Behavior Settings Module
 *
 * This module defines the BehaviorSettings struct shared by every boid in a
 * run: speed and force limits, per-behavior weights and sensing radii, and
 * the containment boundary. A tuning UI may swap the whole record between
 * ticks; the engine never validates or mutates it.
 */

use serde::{Deserialize, Serialize};

// Shape of the containment volume centered at the origin
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryShape {
    Box,
    Sphere,
}

/// Containment volume centered at the origin.
///
/// A box is described by its half-size along every axis, a sphere by its radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Boundary {
    Box { half_extent: f32 },
    Sphere { radius: f32 },
}

impl Boundary {
    pub fn new(shape: BoundaryShape, extent: f32) -> Self {
        match shape {
            BoundaryShape::Box => Boundary::Box { half_extent: extent },
            BoundaryShape::Sphere => Boundary::Sphere { radius: extent },
        }
    }
}

// Parameters for the simulation that can be adjusted via a tuning UI
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorSettings {
    pub max_speed: f32,
    pub max_force: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub separation_dist: f32,
    pub alignment_dist: f32,
    pub cohesion_dist: f32,
    // Half-extent of the box or radius of the sphere
    pub center_dist: f32,
    pub shape: BoundaryShape,
    // Bounding radius of a single boid, used by containment
    pub body_radius: f32,
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self {
            max_speed: 5.0,
            max_force: 0.1,
            separation_weight: 0.2,
            alignment_weight: 0.1,
            cohesion_weight: 1.0,
            separation_dist: 70.0,
            alignment_dist: 100.0,
            cohesion_dist: 100.0,
            center_dist: 1200.0,
            shape: BoundaryShape::Sphere,
            body_radius: 2.0,
        }
    }
}

impl BehaviorSettings {
    pub fn boundary(&self) -> Boundary {
        Boundary::new(self.shape, self.center_dist)
    }

    // Get parameter ranges for UI sliders
    pub fn max_speed_range() -> std::ops::RangeInclusive<f32> {
        0.5..=20.0
    }

    pub fn max_force_range() -> std::ops::RangeInclusive<f32> {
        0.0..=1.0
    }

    pub fn weight_range() -> std::ops::RangeInclusive<f32> {
        0.0..=3.0
    }

    pub fn radius_range() -> std::ops::RangeInclusive<f32> {
        0.0..=300.0
    }

    pub fn center_dist_range() -> std::ops::RangeInclusive<f32> {
        100.0..=3000.0
    }
}
