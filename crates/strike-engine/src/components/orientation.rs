// components/orientation.rs
//
// Yaw/pitch conventions shared by cameras and anything that "looks at" a point.
//
// Y is up and local forward is +Z. Angles are in degrees:
//   yaw:   rotation around world up, 0 faces +Z, 90 faces +X
//   pitch: positive tilts forward downward
// A rotation is built as yaw(Y) * pitch(X), so yaw is always around world up.

use glam::{EulerRot, Quat, Vec3};

/// Rotation for the given yaw and pitch (degrees).
pub fn yaw_pitch_rotation(yaw_deg: f32, pitch_deg: f32) -> Quat {
    Quat::from_euler(EulerRot::YXZ, yaw_deg.to_radians(), pitch_deg.to_radians(), 0.0)
}

/// Recover yaw and pitch (degrees) from a rotation's forward vector.
/// Yaw is in (-180, 180], pitch in [-90, 90]. Roll is ignored.
pub fn yaw_pitch_degrees(rotation: Quat) -> (f32, f32) {
    direction_angles((rotation * Vec3::Z).normalize_or_zero())
}

/// Rotation whose forward vector points along `dir`. Identity for a zero vector.
pub fn look_rotation(dir: Vec3) -> Quat {
    if dir.length_squared() <= f32::EPSILON {
        return Quat::IDENTITY;
    }
    let (yaw, pitch) = direction_angles(dir.normalize());
    yaw_pitch_rotation(yaw, pitch)
}

fn direction_angles(f: Vec3) -> (f32, f32) {
    let pitch = (-f.y).clamp(-1.0, 1.0).asin();
    let yaw = f.x.atan2(f.z);
    (yaw.to_degrees(), pitch.to_degrees())
}

/// Project onto the horizontal plane and normalize. Zero if `v` is vertical.
pub fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
}
