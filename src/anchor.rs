//! Write strategy for an agent's position and orientation.
//!
//! Each axis is driven either through a smoothing constraint or straight
//! through the primary `Transform`. The choice is made once, at registration,
//! from the components present on the agent.

use bevy::prelude::*;

use crate::components::{OrientationConstraint, PositionConstraint};

/// How one quantity of the agent is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drive {
    /// Writes set the constraint target; the constraint solver moves the body.
    Constraint,
    /// Writes go straight to the `Transform`.
    Transform,
}

/// Position and orientation drives selected for an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    position: Drive,
    orientation: Drive,
}

impl Anchor {
    /// Builds an anchor from explicit drives.
    #[must_use]
    pub const fn new(position: Drive, orientation: Drive) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Picks constraint drives for whichever constraints the agent carries.
    #[must_use]
    pub fn select(world: &World, agent: Entity) -> Self {
        let drive_for = |present: bool| {
            if present {
                Drive::Constraint
            } else {
                Drive::Transform
            }
        };
        Self::new(
            drive_for(world.get::<PositionConstraint>(agent).is_some()),
            drive_for(world.get::<OrientationConstraint>(agent).is_some()),
        )
    }

    /// Drive used for position writes.
    #[must_use]
    pub const fn position(&self) -> Drive {
        self.position
    }

    /// Drive used for orientation writes.
    #[must_use]
    pub const fn orientation(&self) -> Drive {
        self.orientation
    }

    /// Moves the agent (or its constraint target) to `position`.
    ///
    /// A constraint removed after registration degrades to a direct write.
    pub fn write_position(self, world: &mut World, agent: Entity, position: Vec3) {
        if self.position == Drive::Constraint {
            if let Some(mut constraint) = world.get_mut::<PositionConstraint>(agent) {
                constraint.target = position;
                return;
            }
        }
        if let Some(mut transform) = world.get_mut::<Transform>(agent) {
            transform.translation = position;
        }
    }

    /// Blends the current orientation toward `goal` by `factor`.
    ///
    /// The current orientation is read from wherever this anchor writes, so a
    /// constraint blends its own target rather than the lagging body.
    pub fn blend_orientation(self, world: &mut World, agent: Entity, goal: Quat, factor: f32) {
        if self.orientation == Drive::Constraint {
            if let Some(mut constraint) = world.get_mut::<OrientationConstraint>(agent) {
                constraint.target = constraint.target.slerp(goal, factor).normalize();
                return;
            }
        }
        if let Some(mut transform) = world.get_mut::<Transform>(agent) {
            transform.rotation = transform.rotation.slerp(goal, factor).normalize();
        }
    }

    /// Turns the agent to face travel: smoothed through a constraint, or set
    /// outright on the transform.
    pub fn face(self, world: &mut World, agent: Entity, goal: Quat, factor: f32) {
        match self.orientation {
            Drive::Constraint => self.blend_orientation(world, agent, goal, factor),
            Drive::Transform => {
                if let Some(mut transform) = world.get_mut::<Transform>(agent) {
                    transform.rotation = goal;
                }
            }
        }
    }
}
