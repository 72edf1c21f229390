// extensions/lerp.rs
//
// Interpolation helpers shared by tweens and game logic.
// No dependencies on Entity/Scene, just math.

use glam::Vec3;

/// Linearly interpolate between two values. `t` is not clamped.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two values with `t` clamped to [0, 1].
#[inline]
pub fn lerp_clamped(a: f32, b: f32, t: f32) -> f32 {
    lerp(a, b, t.clamp(0.0, 1.0))
}

/// Linearly interpolate between two points. `t` is not clamped.
#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}
