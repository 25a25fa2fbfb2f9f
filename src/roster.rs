//! Roster of actor-controlled bodies, sampled when agents register.

use std::fmt;
use std::sync::Arc;

use bevy::prelude::*;

use crate::components::ControlledBody;

/// Source of the bodies currently controlled by live actors.
pub trait Roster: Send + Sync {
    /// Bodies present right now.
    fn present_bodies(&self, world: &World) -> Vec<Entity>;
}

/// Default roster: every entity tagged [`ControlledBody`].
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkedBodies;

impl Roster for MarkedBodies {
    fn present_bodies(&self, world: &World) -> Vec<Entity> {
        world
            .try_query_filtered::<Entity, With<ControlledBody>>()
            .map(|mut query| query.iter(world).collect())
            .unwrap_or_default()
    }
}

/// Resource overriding the roster used by `add`.
#[derive(Resource, Clone)]
pub struct RosterSource(Arc<dyn Roster>);

impl RosterSource {
    /// Wraps a roster service.
    pub fn new(roster: impl Roster + 'static) -> Self {
        Self(Arc::new(roster))
    }
}

impl fmt::Debug for RosterSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RosterSource").finish_non_exhaustive()
    }
}

/// Samples the roster once, sorted for a stable order.
#[must_use]
pub fn snapshot(world: &World) -> Vec<Entity> {
    let mut bodies = world.get_resource::<RosterSource>().map_or_else(
        || MarkedBodies.present_bodies(world),
        |source| source.0.present_bodies(world),
    );
    bodies.sort_unstable();
    bodies.dedup();
    bodies
}
