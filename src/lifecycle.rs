//! Start-up and tear-down of the motion subsystem.

use bevy::ecs::prelude::On;
use bevy::prelude::*;

use crate::commands::clear_all;
use crate::components::{Animator, MotionAgent};
use crate::config::MotionSettings;
use crate::registry::MotionRegistry;

/// Creates the registry and subscribes to agent detachment.
///
/// Calling it again while the subsystem is live changes nothing, including the
/// settings.
pub fn init(world: &mut World, settings: MotionSettings) {
    if world.contains_resource::<MotionRegistry>() {
        log::debug!("motion subsystem already initialised");
        return;
    }
    let mut registry = MotionRegistry::new(settings);
    registry.detach_observer = Some(world.add_observer(detach_on_remove).id());
    world.insert_resource(registry);
    log::info!("motion subsystem initialised");
}

/// Deregisters every agent and removes the registry.
///
/// Run tracks are stopped on the way out. Commands issued afterwards are
/// ignored until [`init`] runs again.
pub fn shutdown(world: &mut World) {
    let Some(detach_observer) = world
        .get_resource::<MotionRegistry>()
        .map(|registry| registry.detach_observer)
    else {
        return;
    };
    clear_all(world);
    if let Some(observer) = detach_observer {
        world.despawn(observer);
    }
    world.remove_resource::<MotionRegistry>();
    log::info!("motion subsystem shut down");
}

/// Drops the state of an agent whose [`MotionAgent`] marker went away,
/// whether by despawn or by removal of the marker itself.
///
/// `remove` and the tick driver take the state out before dropping the
/// marker, so this only acts on detachments they did not start.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn detach_on_remove(
    event: On<Remove, MotionAgent>,
    registry: Option<ResMut<MotionRegistry>>,
    mut animators: Query<&mut Animator>,
) {
    let agent = event.event().entity;
    let Some(state) = registry.and_then(|mut live| live.take(agent)) else {
        return;
    };
    if let Some((holder, handle)) = state.resolved_track() {
        if let Ok(mut animator) = animators.get_mut(holder) {
            animator.stop(handle);
        }
    }
    log::debug!("agent {agent} detached");
}
