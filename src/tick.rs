//! Per-tick movement update.
//!
//! Each tick an agent is in one of four situations, decided afresh from its
//! state:
//!
//! - *Correcting*: it drifted out of its plot and is snapped back first.
//! - *Idle*: not moving or without a target; it turns toward its last travel
//!   direction and its run track stops.
//! - *Arrived*: within the arrival tolerance of the target; it halts.
//! - *Moving*: it steps toward the target without overshooting and faces the
//!   direction of travel.

use bevy::prelude::*;

use crate::animation::play_run_track;
use crate::commands::plot_frame;
use crate::components::{MotionAgent, Plot};
use crate::config::MotionSettings;
use crate::error::Operation;
use crate::geometry::clamp_to_plot;
use crate::registry::MotionRegistry;
use crate::state::MovementState;
use crate::vector_math::{look_rotation, smoothing_factor};

/// Advances every registered agent by `dt` seconds, in entity index order.
///
/// A negative or non-finite `dt` counts as zero. Agents whose entity,
/// `Transform` or plot has disappeared are dropped without touching their
/// animation.
pub fn advance(world: &mut World, dt: f32) {
    let elapsed = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    let Some(registry) = world.get_resource::<MotionRegistry>() else {
        return;
    };
    let settings = registry.shared_settings();

    for agent in registry.agents() {
        let Some(mut state) = world
            .get_resource_mut::<MotionRegistry>()
            .and_then(|mut live| live.take(agent))
        else {
            continue;
        };
        let Some((frame, plot)) = live_parts(world, &state) else {
            prune(world, &state);
            continue;
        };
        update_agent(world, &mut state, &settings, &frame, &plot, elapsed);
        if let Some(mut live) = world.get_resource_mut::<MotionRegistry>() {
            live.insert(state);
        }
    }
}

/// Exclusive system feeding the frame time into [`advance`].
pub fn motion_tick_system(world: &mut World) {
    let dt = world
        .get_resource::<Time>()
        .map_or(0.0, |time| time.delta_secs());
    advance(world, dt);
}

/// Runs one tick for a single agent whose parts are known to exist.
fn update_agent(
    world: &mut World,
    state: &mut MovementState,
    settings: &MotionSettings,
    frame: &Transform,
    plot: &Plot,
    dt: f32,
) {
    let agent = state.agent;
    let Some(mut current) = world.get::<Transform>(agent).map(|t| t.translation) else {
        return;
    };

    let clamped = clamp_to_plot(frame, plot, current, settings.margin);
    if clamped.distance(current) > settings.drift_threshold {
        state.anchor.write_position(world, agent, clamped);
        current = clamped;
    }

    let factor = smoothing_factor(settings.lerp_speed, dt);
    let target = match state.target {
        Some(target) if state.moving => target,
        _ => {
            if let Some(goal) = look_rotation(state.last_dir) {
                state.anchor.blend_orientation(world, agent, goal, factor);
            }
            state.stop_run_track(world);
            return;
        }
    };

    let offset = target - current;
    let distance = offset.length();
    if distance <= settings.arrival_epsilon {
        state.halt();
        state.stop_run_track(world);
        return;
    }
    play_run_track(world, state, settings, Operation::Tick);

    let direction = offset / distance;
    state.last_dir = direction;
    let step = (state.speed * dt).min(distance);
    let next = clamp_to_plot(frame, plot, current + direction * step, settings.margin);
    state.anchor.write_position(world, agent, next);
    if let Some(goal) = look_rotation(direction) {
        state.anchor.face(world, agent, goal, factor);
    }
}

fn live_parts(world: &World, state: &MovementState) -> Option<(Transform, Plot)> {
    world.get::<Transform>(state.agent)?;
    plot_frame(world, state.plot)
}

fn prune(world: &mut World, state: &MovementState) {
    log::debug!(
        "dropping agent {}: agent or plot {} is gone",
        state.agent,
        state.plot
    );
    if let Ok(mut entity) = world.get_entity_mut(state.agent) {
        entity.remove::<MotionAgent>();
    }
}
