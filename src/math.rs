/*
 * Vector Math Module
 *
 * Thin helpers over glam's Vec3 for the handful of operations the steering
 * code needs with slightly different semantics than glam ships:
 * normalizing a zero vector yields zero, and length clamping only enforces
 * an upper bound.
 */

pub use glam::{Quat, Vec3};

// Lengths at or below this are treated as zero when normalizing
pub const EPSILON: f32 = 1.0e-6;

// Unit vector in the direction of `v`, or the zero vector when `v` has no length
#[inline]
pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    let length = v.length();
    if length <= EPSILON {
        return Vec3::ZERO;
    }
    v / length
}

// Rescale `v` to `length`. A zero input stays zero.
#[inline]
pub fn set_length(v: Vec3, length: f32) -> Vec3 {
    normalize_or_zero(v) * length
}

/// Rescales `v` to `max` when it is longer than `max`, otherwise returns it untouched.
///
/// `min` is accepted so call sites read like the usual `clampLength(min, max)`,
/// but no lower bound is enforced.
#[inline]
pub fn clamp_length(v: Vec3, _min: f32, max: f32) -> Vec3 {
    if v.length() > max {
        set_length(v, max)
    } else {
        v
    }
}

#[inline]
pub fn distance(a: Vec3, b: Vec3) -> f32 {
    (a - b).length()
}
