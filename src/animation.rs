//! Run-track resolution.
//!
//! The external lookup service is consulted first; failing that, direct
//! children of the agent named after one of the configured aliases are loaded
//! as the track. The outcome is cached on the movement state, including a
//! miss, so each registration resolves at most once.

use std::fmt;
use std::sync::Arc;

use bevy::prelude::*;

use crate::components::{AgentKind, Animator, ClipSource, TrackHandle};
use crate::config::MotionSettings;
use crate::error::{report, MotionError, Operation};
use crate::state::{MovementState, RunTrackSlot};
use crate::DEFAULT_AGENT_KIND;

/// Animation lookup service.
///
/// Implementations load a clip matching `clip` for agents of type
/// `agent_kind` into `animator` and return its handle.
pub trait AnimationLookup: Send + Sync {
    /// Resolves a clip into a playable track, or `None` when unknown.
    fn resolve(&self, animator: &mut Animator, clip: &str, agent_kind: &str) -> Option<TrackHandle>;
}

/// Resource holding the host's [`AnimationLookup`].
#[derive(Resource, Clone)]
pub struct AnimationLibrary(Arc<dyn AnimationLookup>);

impl AnimationLibrary {
    /// Wraps a lookup service.
    pub fn new(lookup: impl AnimationLookup + 'static) -> Self {
        Self(Arc::new(lookup))
    }

    /// Forwards to the wrapped service.
    pub fn resolve(
        &self,
        animator: &mut Animator,
        clip: &str,
        agent_kind: &str,
    ) -> Option<TrackHandle> {
        self.0.resolve(animator, clip, agent_kind)
    }
}

impl fmt::Debug for AnimationLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationLibrary").finish_non_exhaustive()
    }
}

/// Finds the entity carrying the agent's `Animator`: the agent itself, else
/// its first direct child with one.
#[must_use]
pub fn locate_animator(world: &World, agent: Entity) -> Option<Entity> {
    if world.get::<Animator>(agent).is_some() {
        return Some(agent);
    }
    child_entities(world, agent)
        .into_iter()
        .find(|child| world.get::<Animator>(*child).is_some())
}

/// Returns the cached run track, resolving it on first use.
///
/// A failed first resolution is reported once as
/// [`MotionError::MissingRunTrack`] under `operation`; later calls return
/// `None` silently.
pub fn resolve_run_track(
    world: &mut World,
    state: &mut MovementState,
    settings: &MotionSettings,
    operation: Operation,
) -> Option<TrackHandle> {
    match state.run_track {
        RunTrackSlot::Ready(handle) => return Some(handle),
        RunTrackSlot::Missing => return None,
        RunTrackSlot::Unresolved => {}
    }

    let resolved = state
        .animator
        .and_then(|holder| load_run_track(world, state.agent, holder, settings));
    state.run_track = resolved.map_or(RunTrackSlot::Missing, RunTrackSlot::Ready);
    if resolved.is_none() {
        report(world, operation, MotionError::MissingRunTrack(state.agent));
    }
    resolved
}

/// Starts the run track, resolving it if needed.
pub(crate) fn play_run_track(
    world: &mut World,
    state: &mut MovementState,
    settings: &MotionSettings,
    operation: Operation,
) {
    let Some(handle) = resolve_run_track(world, state, settings, operation) else {
        return;
    };
    let Some(holder) = state.animator else {
        return;
    };
    if let Some(mut animator) = world.get_mut::<Animator>(holder) {
        if !animator.is_playing(handle) {
            animator.play(handle);
        }
    }
}

fn load_run_track(
    world: &mut World,
    agent: Entity,
    holder: Entity,
    settings: &MotionSettings,
) -> Option<TrackHandle> {
    let kind = world
        .get::<AgentKind>(agent)
        .map_or_else(
            || DEFAULT_AGENT_KIND.to_owned(),
            |kind| kind.as_str().to_owned(),
        );
    let library = world.get_resource::<AnimationLibrary>().cloned();
    let alias_clip = find_alias_clip(world, agent, &settings.run_aliases);

    let mut animator = world.get_mut::<Animator>(holder)?;
    if let Some(handle) = library
        .as_ref()
        .and_then(|lookup| lookup.resolve(&mut animator, &settings.run_clip, &kind))
    {
        return Some(handle);
    }
    alias_clip.map(|clip| animator.load(clip))
}

/// Clip of the first alias, in configured order, found among the agent's
/// direct children.
fn find_alias_clip(world: &World, agent: Entity, aliases: &[String]) -> Option<String> {
    let children = child_entities(world, agent);
    aliases.iter().find_map(|alias| {
        children
            .iter()
            .copied()
            .find(|child| {
                world
                    .get::<Name>(*child)
                    .is_some_and(|name| name.as_str() == alias.as_str())
            })
            .map(|child| {
                world
                    .get::<ClipSource>(child)
                    .map_or_else(|| alias.clone(), |source| source.0.clone())
            })
    })
}

fn child_entities(world: &World, parent: Entity) -> Vec<Entity> {
    world
        .get::<Children>(parent)
        .map(|children| children.to_vec())
        .unwrap_or_default()
}
