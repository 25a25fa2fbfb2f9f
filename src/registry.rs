//! Agent registry owned by the motion subsystem.

use std::sync::Arc;

use bevy::prelude::*;
use hashbrown::HashMap;

use crate::config::MotionSettings;
use crate::state::MovementState;

/// Resource mapping each registered agent to its [`MovementState`].
///
/// Created by [`crate::lifecycle::init`] and removed by
/// [`crate::lifecycle::shutdown`]; while it is absent every command is a
/// no-op.
#[derive(Resource, Debug, Default)]
pub struct MotionRegistry {
    settings: Arc<MotionSettings>,
    states: HashMap<Entity, MovementState>,
    pub(crate) detach_observer: Option<Entity>,
}

impl MotionRegistry {
    /// Creates an empty registry using `settings`.
    #[must_use]
    pub fn new(settings: MotionSettings) -> Self {
        Self {
            settings: Arc::new(settings),
            states: HashMap::new(),
            detach_observer: None,
        }
    }

    /// Settings every command and tick reads.
    #[must_use]
    pub fn settings(&self) -> &MotionSettings {
        &self.settings
    }

    pub(crate) fn shared_settings(&self) -> Arc<MotionSettings> {
        Arc::clone(&self.settings)
    }

    /// Movement state for `agent`, if registered.
    #[must_use]
    pub fn get(&self, agent: Entity) -> Option<&MovementState> {
        self.states.get(&agent)
    }

    pub(crate) fn get_mut(&mut self, agent: Entity) -> Option<&mut MovementState> {
        self.states.get_mut(&agent)
    }

    /// Whether `agent` is registered.
    #[must_use]
    pub fn contains(&self, agent: Entity) -> bool {
        self.states.contains_key(&agent)
    }

    /// Registered agents ordered by entity index, then generation.
    #[must_use]
    pub fn agents(&self) -> Vec<Entity> {
        let mut agents: Vec<Entity> = self.states.keys().copied().collect();
        agents.sort_unstable_by_key(|agent| (agent.index(), agent.generation().to_bits()));
        agents
    }

    /// Number of registered agents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether no agent is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub(crate) fn insert(&mut self, state: MovementState) {
        self.states.insert(state.agent(), state);
    }

    pub(crate) fn take(&mut self, agent: Entity) -> Option<MovementState> {
        self.states.remove(&agent)
    }
}
