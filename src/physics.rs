//! Constraint follower.
//!
//! Stands in for the host's physics solver: bodies carrying a
//! [`PositionConstraint`] or [`OrientationConstraint`] are pulled toward the
//! constraint target at the constraint's responsiveness. Hosts with a real
//! solver leave [`follow_constraints_system`] out of their schedule.

use bevy::prelude::*;

use crate::components::{OrientationConstraint, PositionConstraint};
use crate::vector_math::smoothing_factor;

type ConstrainedBody<'w> = (
    &'w mut Transform,
    Option<&'w PositionConstraint>,
    Option<&'w OrientationConstraint>,
);

// Bodies with at least one constraint.
type Constrained = Or<(With<PositionConstraint>, With<OrientationConstraint>)>;

/// Moves `transform` toward whichever constraint targets are present.
///
/// # Examples
///
/// ```
/// use bevy::prelude::*;
/// use corral::components::PositionConstraint;
/// use corral::physics::follow_constraints;
///
/// let mut transform = Transform::IDENTITY;
/// let pull = PositionConstraint::new(Vec3::new(10.0, 0.0, 0.0), 5.0);
/// follow_constraints(&mut transform, Some(&pull), None, 0.1);
/// assert!((transform.translation.x - 5.0).abs() < 1e-5);
/// ```
pub fn follow_constraints(
    transform: &mut Transform,
    position: Option<&PositionConstraint>,
    orientation: Option<&OrientationConstraint>,
    dt: f32,
) {
    if let Some(constraint) = position {
        let factor = smoothing_factor(constraint.responsiveness, dt);
        transform.translation = transform.translation.lerp(constraint.target, factor);
    }
    if let Some(constraint) = orientation {
        let factor = smoothing_factor(constraint.responsiveness, dt);
        transform.rotation = transform
            .rotation
            .slerp(constraint.target, factor)
            .normalize();
    }
}

/// Applies [`follow_constraints`] to every constrained body each frame.
pub fn follow_constraints_system(
    time: Res<Time>,
    mut bodies: Query<ConstrainedBody<'_>, Constrained>,
) {
    let dt = time.delta_secs();
    for (mut transform, position, orientation) in &mut bodies {
        follow_constraints(&mut transform, position, orientation, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::partial(0.1, 5.0)]
    #[case::saturated(1.0, 10.0)]
    #[case::frozen(0.0, 0.0)]
    fn position_follows_target(#[case] dt: f32, #[case] expected_x: f32) {
        let mut transform = Transform::IDENTITY;
        let pull = PositionConstraint::new(Vec3::new(10.0, 0.0, 0.0), 5.0);

        follow_constraints(&mut transform, Some(&pull), None, dt);

        assert_relative_eq!(transform.translation.x, expected_x, epsilon = 1e-5);
    }

    #[test]
    fn orientation_reaches_target_when_saturated() {
        let mut transform = Transform::IDENTITY;
        let goal = Quat::from_rotation_y(1.0);
        let turn = OrientationConstraint::new(goal, 10.0);

        follow_constraints(&mut transform, None, Some(&turn), 1.0);

        assert!(transform.rotation.angle_between(goal) < 1e-4);
    }
}
