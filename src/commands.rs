//! Fire-and-forget command API.
//!
//! Every command takes `&mut World` and returns nothing. A request that cannot
//! be honoured leaves the world untouched and is reported as a
//! [`MotionDiagnostic`](crate::error::MotionDiagnostic). Systems that only hold
//! `Commands` can queue a [`MotionCommand`] instead.

use bevy::prelude::*;

use crate::anchor::Anchor;
use crate::animation::{locate_animator, play_run_track};
use crate::components::{MotionAgent, Plot};
use crate::config::MotionSettings;
use crate::error::{report, MotionError, Operation};
use crate::geometry::clamp_to_plot;
use crate::registry::MotionRegistry;
use crate::roster;
use crate::state::{AvoidanceState, MovementState};
use crate::vector_math::forward_of;

/// Registers `agent` for movement inside `plot`.
///
/// Ignored when the subsystem is not initialised, the agent has no
/// `Transform`, the plot lacks its `Plot` or `Transform`, or the agent is
/// already registered.
pub fn add(world: &mut World, agent: Entity, plot: Entity) {
    if let Err(error) = try_add(world, agent, plot) {
        report(world, Operation::Add, error);
    }
}

/// Deregisters `agent`, stopping its run track.
pub fn remove(world: &mut World, agent: Entity) {
    if let Err(error) = try_remove(world, agent) {
        report(world, Operation::Remove, error);
    }
}

/// Deregisters every agent.
pub fn clear_all(world: &mut World) {
    let Some(registry) = world.get_resource::<MotionRegistry>() else {
        report(world, Operation::ClearAll, MotionError::NotInitialised);
        return;
    };
    for agent in registry.agents() {
        remove(world, agent);
    }
}

/// Sends `agent` toward `target`, aiming to arrive after `duration` seconds.
///
/// The target is clamped into the plot first. The implied speed is bounded by
/// the configured speed range, so the actual travel time may differ.
pub fn move_to(world: &mut World, agent: Entity, target: Vec3, duration: f32) {
    if let Err(error) = with_state(world, agent, |world, state, settings| {
        apply_move_to(world, state, settings, target, duration)
    }) {
        report(world, Operation::MoveTo, error);
    }
}

/// Overrides the travel speed, clamped into the configured range.
pub fn set_speed(world: &mut World, agent: Entity, speed: f32) {
    if let Err(error) = with_state(world, agent, |_, state, settings| {
        state.speed = settings.clamp_speed(speed);
        Ok(())
    }) {
        report(world, Operation::SetSpeed, error);
    }
}

/// Halts `agent` in place; its target is kept.
pub fn pause(world: &mut World, agent: Entity) {
    if let Err(error) = with_state(world, agent, |world, state, _| {
        state.halt();
        state.stop_run_track(world);
        Ok(())
    }) {
        report(world, Operation::Pause, error);
    }
}

/// Restarts travel toward the kept target.
///
/// The target is not recomputed. The current speed is only pulled back into
/// the configured range, which after [`pause`] means the minimum speed.
pub fn resume(world: &mut World, agent: Entity) {
    if let Err(error) = with_state(world, agent, |world, state, settings| {
        state.moving = true;
        state.speed = settings.clamp_speed(state.speed);
        play_run_track(world, state, settings, Operation::Resume);
        Ok(())
    }) {
        report(world, Operation::Resume, error);
    }
}

/// Whether `agent` is registered.
#[must_use]
pub fn is_registered(world: &World, agent: Entity) -> bool {
    world
        .get_resource::<MotionRegistry>()
        .is_some_and(|registry| registry.contains(agent))
}

/// Movement state of `agent`, if registered.
#[must_use]
pub fn movement_state(world: &World, agent: Entity) -> Option<&MovementState> {
    world.get_resource::<MotionRegistry>()?.get(agent)
}

/// Registered agents ordered by entity index.
#[must_use]
pub fn registered_agents(world: &World) -> Vec<Entity> {
    world
        .get_resource::<MotionRegistry>()
        .map(MotionRegistry::agents)
        .unwrap_or_default()
}

/// Deferred form of the command functions.
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use corral::commands::MotionCommand;
///
/// fn order(mut commands: Commands, agent: Entity) {
///     commands.queue(MotionCommand::MoveTo {
///         agent,
///         target: Vec3::new(4.0, 0.0, 4.0),
///         duration: 1.0,
///     });
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionCommand {
    /// See [`add`].
    Add {
        /// Agent to register.
        agent: Entity,
        /// Plot confining the agent.
        plot: Entity,
    },
    /// See [`remove`].
    Remove {
        /// Agent to deregister.
        agent: Entity,
    },
    /// See [`clear_all`].
    ClearAll,
    /// See [`move_to`].
    MoveTo {
        /// Agent to move.
        agent: Entity,
        /// Requested destination, clamped into the plot.
        target: Vec3,
        /// Requested travel time in seconds.
        duration: f32,
    },
    /// See [`set_speed`].
    SetSpeed {
        /// Agent to adjust.
        agent: Entity,
        /// Requested speed.
        speed: f32,
    },
    /// See [`pause`].
    Pause {
        /// Agent to halt.
        agent: Entity,
    },
    /// See [`resume`].
    Resume {
        /// Agent to restart.
        agent: Entity,
    },
}

impl Command for MotionCommand {
    fn apply(self, world: &mut World) {
        match self {
            Self::Add { agent, plot } => add(world, agent, plot),
            Self::Remove { agent } => remove(world, agent),
            Self::ClearAll => clear_all(world),
            Self::MoveTo {
                agent,
                target,
                duration,
            } => move_to(world, agent, target, duration),
            Self::SetSpeed { agent, speed } => set_speed(world, agent, speed),
            Self::Pause { agent } => pause(world, agent),
            Self::Resume { agent } => resume(world, agent),
        }
    }
}

/// Frame and extents of `plot`, if it still has both.
pub(crate) fn plot_frame(world: &World, plot: Entity) -> Option<(Transform, Plot)> {
    Some((*world.get::<Transform>(plot)?, *world.get::<Plot>(plot)?))
}

/// Stops the run track and drops the subscription of a state already taken
/// out of the registry.
pub(crate) fn detach(world: &mut World, state: &MovementState) {
    state.stop_run_track(world);
    if let Ok(mut entity) = world.get_entity_mut(state.agent()) {
        entity.remove::<MotionAgent>();
    }
}

fn try_add(world: &mut World, agent: Entity, plot: Entity) -> Result<(), MotionError> {
    let registry = world
        .get_resource::<MotionRegistry>()
        .ok_or(MotionError::NotInitialised)?;
    if registry.contains(agent) {
        return Err(MotionError::AlreadyRegistered(agent));
    }
    let rotation = world
        .get::<Transform>(agent)
        .ok_or(MotionError::MissingTransform(agent))?
        .rotation;
    plot_frame(world, plot).ok_or(MotionError::MissingPlot(plot))?;

    let state = MovementState::new(
        agent,
        plot,
        Anchor::select(world, agent),
        locate_animator(world, agent),
        forward_of(rotation),
        roster::snapshot(world),
    );
    world.resource_mut::<MotionRegistry>().insert(state);
    if let Ok(mut entity) = world.get_entity_mut(agent) {
        entity.insert(MotionAgent);
    }
    log::debug!("registered agent {agent} on plot {plot}");
    Ok(())
}

fn try_remove(world: &mut World, agent: Entity) -> Result<(), MotionError> {
    let state = world
        .get_resource_mut::<MotionRegistry>()
        .ok_or(MotionError::NotInitialised)?
        .take(agent)
        .ok_or(MotionError::NotRegistered(agent))?;
    detach(world, &state);
    log::debug!("removed agent {agent}");
    Ok(())
}

/// Runs `f` on the state of `agent`, taken out of the registry for the
/// duration of the call so `f` can borrow the world freely.
fn with_state<F>(world: &mut World, agent: Entity, f: F) -> Result<(), MotionError>
where
    F: FnOnce(&mut World, &mut MovementState, &MotionSettings) -> Result<(), MotionError>,
{
    let mut registry = world
        .get_resource_mut::<MotionRegistry>()
        .ok_or(MotionError::NotInitialised)?;
    let settings = registry.shared_settings();
    let mut state = registry
        .take(agent)
        .ok_or(MotionError::NotRegistered(agent))?;
    let outcome = f(world, &mut state, &settings);
    if let Some(mut restored) = world.get_resource_mut::<MotionRegistry>() {
        restored.insert(state);
    }
    outcome
}

fn apply_move_to(
    world: &mut World,
    state: &mut MovementState,
    settings: &MotionSettings,
    target: Vec3,
    duration: f32,
) -> Result<(), MotionError> {
    if !target.is_finite() {
        return Err(MotionError::InvalidTarget(state.agent));
    }
    let current = world
        .get::<Transform>(state.agent)
        .ok_or(MotionError::MissingTransform(state.agent))?
        .translation;
    let (frame, plot) =
        plot_frame(world, state.plot).ok_or(MotionError::MissingPlot(state.plot))?;

    let goal = clamp_to_plot(&frame, &plot, target, settings.margin);
    let offset = goal - current;
    let distance = offset.length();
    state.target = Some(goal);

    if distance <= settings.arrival_epsilon {
        state.halt();
        state.duration = 0.0;
        return Ok(());
    }

    state.duration = duration.max(settings.min_duration);
    state.speed = settings.clamp_speed(distance / state.duration);
    state.moving = true;
    state.avoidance = AvoidanceState::default();
    state.last_dir = offset / distance;
    play_run_track(world, state, settings, Operation::MoveTo);
    Ok(())
}
