//! Bevy plugin wiring the motion subsystem into an app.

use bevy::prelude::*;

use crate::components::{OrientationConstraint, Plot, PositionConstraint};
use crate::config::MotionSettings;
use crate::error::log_motion_diagnostic;
use crate::lifecycle::init;
use crate::physics::follow_constraints_system;
use crate::tick::motion_tick_system;

/// Ordering labels for the systems added by [`MotionPlugin`].
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionSet {
    /// Agents advance toward their targets.
    Tick,
    /// Constrained bodies catch up with their targets.
    FollowConstraints,
}

/// Initialises the subsystem and ticks it every `Update`.
///
/// With `follow_constraints` disabled the host's own solver is expected to
/// move constrained bodies.
#[derive(Debug, Clone)]
pub struct MotionPlugin {
    /// Settings handed to [`init`].
    pub settings: MotionSettings,
    /// Whether to schedule the built-in constraint follower.
    pub follow_constraints: bool,
}

impl MotionPlugin {
    /// Plugin with `settings` and the built-in constraint follower.
    #[must_use]
    pub const fn new(settings: MotionSettings) -> Self {
        Self {
            settings,
            follow_constraints: true,
        }
    }
}

impl Default for MotionPlugin {
    fn default() -> Self {
        Self::new(MotionSettings::default())
    }
}

impl Plugin for MotionPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Plot>();
        app.register_type::<PositionConstraint>();
        app.register_type::<OrientationConstraint>();
        app.add_observer(log_motion_diagnostic);
        init(app.world_mut(), self.settings.clone());

        app.configure_sets(
            Update,
            (MotionSet::Tick, MotionSet::FollowConstraints).chain(),
        );
        app.add_systems(Update, motion_tick_system.in_set(MotionSet::Tick));
        if self.follow_constraints {
            app.add_systems(
                Update,
                follow_constraints_system.in_set(MotionSet::FollowConstraints),
            );
        }
    }
}
