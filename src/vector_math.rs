//! Basic vector math helper functions.
//! Look-at rotations and the smoothing factor shared by the motion systems.
use glam::{Mat3, Quat, Vec3};

/// Returns the rotation whose forward axis (`-Z`) points along `direction`.
///
/// World `+Y` is used as the up hint. A direction parallel to it falls back
/// to an arbitrary orthonormal right axis. Returns `None` for zero or
/// non-finite directions.
///
/// # Examples
/// ```
/// use corral::vector_math::look_rotation;
/// use glam::Vec3;
///
/// let rotation = look_rotation(Vec3::X).expect("non-zero direction");
/// let forward = rotation * Vec3::NEG_Z;
/// assert!((forward - Vec3::X).length() < 1e-5);
/// assert!(look_rotation(Vec3::ZERO).is_none());
/// ```
#[must_use]
pub fn look_rotation(direction: Vec3) -> Option<Quat> {
    let back = -direction.try_normalize()?;
    let right = Vec3::Y
        .cross(back)
        .try_normalize()
        .unwrap_or_else(|| back.any_orthonormal_vector());
    let up = back.cross(right);
    Some(Quat::from_mat3(&Mat3::from_cols(right, up, back)))
}

/// Forward (`-Z`) axis of a rotation.
#[must_use]
pub fn forward_of(rotation: Quat) -> Vec3 {
    rotation * Vec3::NEG_Z
}

/// Blend factor for exponential smoothing at `rate` per second over `dt`.
///
/// The result is clamped to `[0, 1]`; a non-finite product yields `0` so a
/// corrupted frame time never snaps the orientation.
///
/// # Examples
/// ```
/// use corral::vector_math::smoothing_factor;
///
/// assert!((smoothing_factor(8.0, 0.05) - 0.4).abs() < 1e-6);
/// assert_eq!(smoothing_factor(8.0, 1.0), 1.0);
/// assert_eq!(smoothing_factor(8.0, -1.0), 0.0);
/// assert_eq!(smoothing_factor(8.0, f32::NAN), 0.0);
/// ```
#[must_use]
pub fn smoothing_factor(rate: f32, dt: f32) -> f32 {
    let raw = rate * dt;
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, 1.0)
}
