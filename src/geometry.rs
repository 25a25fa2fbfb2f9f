//! Plot bounds geometry.
//!
//! Positions are clamped in the plot's own frame so rotated plots confine
//! agents to their rectangle rather than to a world-aligned box. The vertical
//! axis of the frame is never touched.

use bevy::prelude::*;

use crate::components::Plot;

/// Local `(x, z)` limits of the usable area once `margin` is removed.
///
/// An axis whose half extent is smaller than the margin collapses to the plot
/// centre line instead of producing an inverted range.
#[must_use]
pub fn usable_half_extents(plot: &Plot, margin: f32) -> Vec2 {
    (plot.half_extents() - Vec2::splat(margin)).max(Vec2::ZERO)
}

/// Maps `position` to the nearest point inside the plot, minus `margin`.
///
/// `frame` is the plot entity's transform; its scale is ignored.
///
/// # Examples
/// ```
/// use bevy::prelude::*;
/// use corral::components::Plot;
/// use corral::geometry::clamp_to_plot;
///
/// let frame = Transform::IDENTITY;
/// let plot = Plot::new(20.0, 20.0);
/// let clamped = clamp_to_plot(&frame, &plot, Vec3::new(100.0, 0.0, 100.0), 2.0);
/// assert_eq!(clamped, Vec3::new(8.0, 0.0, 8.0));
/// ```
#[must_use]
pub fn clamp_to_plot(frame: &Transform, plot: &Plot, position: Vec3, margin: f32) -> Vec3 {
    let limits = usable_half_extents(plot, margin);
    let local = to_local(frame, position);
    let clamped = Vec3::new(
        local.x.clamp(-limits.x, limits.x),
        local.y,
        local.z.clamp(-limits.y, limits.y),
    );
    to_world(frame, clamped)
}

/// Whether `position` already lies inside the plot, minus `margin`.
#[must_use]
pub fn plot_contains(frame: &Transform, plot: &Plot, position: Vec3, margin: f32) -> bool {
    let limits = usable_half_extents(plot, margin);
    let local = to_local(frame, position);
    local.x.abs() <= limits.x && local.z.abs() <= limits.y
}

fn to_local(frame: &Transform, position: Vec3) -> Vec3 {
    frame.rotation.inverse() * (position - frame.translation)
}

fn to_world(frame: &Transform, local: Vec3) -> Vec3 {
    frame.translation + frame.rotation * local
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::far_corner(Vec3::new(100.0, 0.0, 100.0), Vec3::new(8.0, 0.0, 8.0))]
    #[case::negative_corner(Vec3::new(-30.0, 5.0, -9.0), Vec3::new(-8.0, 5.0, -8.0))]
    #[case::inside(Vec3::new(3.0, 1.0, -4.0), Vec3::new(3.0, 1.0, -4.0))]
    #[case::one_axis(Vec3::new(0.0, 0.0, 12.0), Vec3::new(0.0, 0.0, 8.0))]
    fn clamps_axis_aligned_plot(#[case] input: Vec3, #[case] expected: Vec3) {
        let plot = Plot::new(20.0, 20.0);
        let clamped = clamp_to_plot(&Transform::IDENTITY, &plot, input, 2.0);
        assert_relative_eq!(clamped.x, expected.x, epsilon = 1e-5);
        assert_relative_eq!(clamped.y, expected.y, epsilon = 1e-5);
        assert_relative_eq!(clamped.z, expected.z, epsilon = 1e-5);
    }

    #[test]
    fn narrow_plot_collapses_to_centre_line() {
        let plot = Plot::new(3.0, 40.0);
        let clamped = clamp_to_plot(&Transform::IDENTITY, &plot, Vec3::new(5.0, 0.0, 5.0), 2.0);
        assert_relative_eq!(clamped.x, 0.0);
        assert_relative_eq!(clamped.z, 5.0);
    }

    #[test]
    fn containment_matches_clamp() {
        let plot = Plot::new(10.0, 6.0);
        let frame = Transform::from_xyz(4.0, 0.0, -2.0);
        assert!(plot_contains(&frame, &plot, Vec3::new(7.0, 9.0, -1.0), 2.0));
        assert!(!plot_contains(&frame, &plot, Vec3::new(7.5, 0.0, -2.0), 2.0));
    }
}
