/*
 * Vector Helpers
 *
 * Small numeric building blocks for the flocking engine. Every function
 * here is total: degenerate inputs (zero-length vectors, cosines that
 * overshoot [-1, 1] through rounding) produce a substituted value instead
 * of NaN or infinity.
 */

use glam::Vec2;

// Canonical heading used whenever a direction cannot be derived
pub const DEFAULT_DIRECTION: Vec2 = Vec2::X;

/// Unit vector in the direction of `v`, or zero when `v` has no length.
pub fn normalize_or_zero(v: Vec2) -> Vec2 {
    let length_squared = v.length_squared();
    if length_squared > 0.0 && length_squared.is_finite() {
        v / length_squared.sqrt()
    } else {
        Vec2::ZERO
    }
}

/// Unit vector in the direction of `v`, or `DEFAULT_DIRECTION` when `v` has no length.
pub fn normalize_or_default(v: Vec2) -> Vec2 {
    let unit = normalize_or_zero(v);
    if unit == Vec2::ZERO {
        DEFAULT_DIRECTION
    } else {
        unit
    }
}

/// Unsigned angle between two vectors in radians, in `[0, π]`.
///
/// The cosine is clamped before `acos` so rounding never leaves its domain.
/// A zero-length argument has no direction; the angle is reported as 0.
pub fn angle_between(a: Vec2, b: Vec2) -> f32 {
    let lengths = a.length() * b.length();
    if lengths <= 0.0 || !lengths.is_finite() {
        return 0.0;
    }

    let cosine = (a.dot(b) / lengths).clamp(-1.0, 1.0);
    cosine.acos()
}

/// Whether a neighbor at offset `offset` (self minus neighbor) lies inside
/// the field of view around `heading`.
pub fn within_fov(offset: Vec2, heading: Vec2, fov_angle: f32) -> bool {
    angle_between(offset, heading) <= fov_angle
}

pub fn lerp(from: Vec2, to: Vec2, t: f32) -> Vec2 {
    from + (to - from) * t
}

/// Rescales `velocity` onto the sphere of radius `max_speed` if it is outside it.
pub fn clamp_speed(velocity: Vec2, max_speed: f32) -> Vec2 {
    let speed_squared = velocity.length_squared();
    if speed_squared > max_speed * max_speed {
        velocity * (max_speed / speed_squared.sqrt())
    } else {
        velocity
    }
}
