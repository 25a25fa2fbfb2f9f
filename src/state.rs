//! Per-agent movement record.

use bevy::prelude::*;

use crate::anchor::Anchor;
use crate::components::{Animator, TrackHandle};

/// Cached outcome of run-track resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunTrackSlot {
    /// Resolution has not been attempted yet.
    #[default]
    Unresolved,
    /// A playable track was found.
    Ready(TrackHandle),
    /// Resolution failed; it is never retried for this registration.
    Missing,
}

/// Obstacle-avoidance bookkeeping.
///
/// Nothing drives these fields yet: `move_to` resets them and no tick reads
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AvoidanceState {
    /// Whether a detour is in progress.
    pub is_avoiding: bool,
    /// Detour waypoint.
    pub avoid_target: Option<Vec3>,
    /// Seconds left on the current detour.
    pub avoid_timer: f32,
    /// Seconds until the next obstacle probe.
    pub obstacle_check_timer: f32,
}

/// Movement record for one registered agent.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementState {
    pub(crate) agent: Entity,
    pub(crate) plot: Entity,
    pub(crate) anchor: Anchor,
    pub(crate) animator: Option<Entity>,
    pub(crate) run_track: RunTrackSlot,
    pub(crate) target: Option<Vec3>,
    pub(crate) duration: f32,
    pub(crate) speed: f32,
    pub(crate) moving: bool,
    pub(crate) last_dir: Vec3,
    pub(crate) avoidance: AvoidanceState,
    pub(crate) ignore_snapshot: Vec<Entity>,
}

impl MovementState {
    pub(crate) fn new(
        agent: Entity,
        plot: Entity,
        anchor: Anchor,
        animator: Option<Entity>,
        facing: Vec3,
        ignore_snapshot: Vec<Entity>,
    ) -> Self {
        Self {
            agent,
            plot,
            anchor,
            animator,
            run_track: RunTrackSlot::Unresolved,
            target: None,
            duration: 0.0,
            speed: 0.0,
            moving: false,
            last_dir: facing,
            avoidance: AvoidanceState::default(),
            ignore_snapshot,
        }
    }

    /// The controlled entity.
    #[must_use]
    pub const fn agent(&self) -> Entity {
        self.agent
    }

    /// The plot the agent is confined to.
    #[must_use]
    pub const fn plot(&self) -> Entity {
        self.plot
    }

    /// Write strategy chosen at registration.
    #[must_use]
    pub const fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Entity carrying the agent's `Animator`, if any.
    #[must_use]
    pub const fn animator(&self) -> Option<Entity> {
        self.animator
    }

    /// Cached run-track resolution.
    #[must_use]
    pub const fn run_track(&self) -> RunTrackSlot {
        self.run_track
    }

    /// Destination, already clamped into the plot.
    #[must_use]
    pub const fn target(&self) -> Option<Vec3> {
        self.target
    }

    /// Duration requested by the last effective `move_to`.
    #[must_use]
    pub const fn duration(&self) -> f32 {
        self.duration
    }

    /// Travel speed in units per second.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Whether the agent is travelling toward its target.
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        self.moving
    }

    /// Last travel direction; the agent faces it while idle.
    #[must_use]
    pub const fn last_dir(&self) -> Vec3 {
        self.last_dir
    }

    /// Avoidance bookkeeping.
    #[must_use]
    pub const fn avoidance(&self) -> &AvoidanceState {
        &self.avoidance
    }

    /// Actor bodies present when the agent was registered.
    ///
    /// Captured once by `add` and never refreshed, so actors that arrive later
    /// are absent from it.
    #[must_use]
    pub fn ignore_snapshot(&self) -> &[Entity] {
        &self.ignore_snapshot
    }

    pub(crate) fn halt(&mut self) {
        self.moving = false;
        self.speed = 0.0;
    }

    /// Animator entity and handle of the resolved run track.
    pub(crate) const fn resolved_track(&self) -> Option<(Entity, TrackHandle)> {
        match (self.run_track, self.animator) {
            (RunTrackSlot::Ready(handle), Some(holder)) => Some((holder, handle)),
            _ => None,
        }
    }

    /// Stops the run track if it was resolved. Unresolved tracks are left
    /// alone so stopping never triggers a lookup.
    pub(crate) fn stop_run_track(&self, world: &mut World) {
        let Some((holder, handle)) = self.resolved_track() else {
            return;
        };
        if let Some(mut animator) = world.get_mut::<Animator>(holder) {
            animator.stop(handle);
        }
    }
}
