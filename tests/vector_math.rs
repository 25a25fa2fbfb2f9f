//! Look-at rotations and smoothing factors.
use corral::vector_math::{forward_of, look_rotation, smoothing_factor};
use glam::{Quat, Vec3};

#[test]
fn look_rotation_rejects_degenerate_directions() {
    assert!(look_rotation(Vec3::ZERO).is_none());
    assert!(look_rotation(Vec3::new(f32::NAN, 0.0, 1.0)).is_none());
}

#[test]
fn look_rotation_handles_vertical_directions() {
    let rotation = look_rotation(Vec3::Y).expect("vertical direction is valid");
    assert!(forward_of(rotation).distance(Vec3::Y) < 1e-5);
    assert!(rotation.is_normalized());
}

#[test]
fn horizontal_look_is_pure_yaw() {
    let rotation = look_rotation(Vec3::new(-2.0, 0.0, 2.0)).expect("valid direction");
    let up = rotation * Vec3::Y;
    assert!(up.distance(Vec3::Y) < 1e-5);
    let expected = Quat::from_rotation_y(3.0 * std::f32::consts::FRAC_PI_4);
    assert!(rotation.angle_between(expected) < 1e-4);
}

#[test]
fn smoothing_factor_saturates() {
    assert!((smoothing_factor(8.0, 10.0) - 1.0).abs() < f32::EPSILON);
    assert!(smoothing_factor(0.0, 1.0).abs() < f32::EPSILON);
}
