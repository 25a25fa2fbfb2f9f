//! Failure reporting for the fire-and-forget motion API.
//!
//! Commands never return errors to their callers. Each swallowed failure is
//! instead triggered as a [`MotionDiagnostic`] event, which the plugin logs and
//! which any observer may capture.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use thiserror::Error;

/// Reasons a motion operation did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MotionError {
    /// The registry resource is missing; `init` was never called or
    /// `shutdown` already ran.
    #[error("motion subsystem is not initialised")]
    NotInitialised,
    /// The agent entity is gone or has no `Transform`.
    #[error("agent {0} has no primary transform")]
    MissingTransform(Entity),
    /// The plot entity is gone or lacks its `Plot` or `Transform`.
    #[error("plot {0} is missing or incomplete")]
    MissingPlot(Entity),
    /// `add` was called for an agent that is already registered.
    #[error("agent {0} is already registered")]
    AlreadyRegistered(Entity),
    /// The agent has no movement state.
    #[error("agent {0} is not registered")]
    NotRegistered(Entity),
    /// `move_to` was given a target with a non-finite coordinate.
    #[error("agent {0} was sent to a non-finite target")]
    InvalidTarget(Entity),
    /// No run track could be resolved; movement continues without one.
    #[error("agent {0} has no run animation")]
    MissingRunTrack(Entity),
}

impl MotionError {
    /// Whether the failure degrades presentation rather than rejecting a
    /// command.
    #[must_use]
    pub const fn is_degradation(&self) -> bool {
        matches!(self, Self::MissingRunTrack(_))
    }
}

/// Operation during which a [`MotionError`] was swallowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `add`.
    Add,
    /// `remove`.
    Remove,
    /// `clear_all`.
    ClearAll,
    /// `move_to`.
    MoveTo,
    /// `set_speed`.
    SetSpeed,
    /// `pause`.
    Pause,
    /// `resume`.
    Resume,
    /// The per-tick updater.
    Tick,
}

/// Event raised whenever the motion subsystem ignores a request or degrades.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{operation:?}: {error}")]
pub struct MotionDiagnostic {
    /// Where the failure occurred.
    pub operation: Operation,
    /// What went wrong.
    pub error: MotionError,
}

impl MotionDiagnostic {
    /// Pairs an error with the operation that swallowed it.
    #[must_use]
    pub const fn new(operation: Operation, error: MotionError) -> Self {
        Self { operation, error }
    }
}

/// Reports a swallowed failure on the diagnostic channel.
pub(crate) fn report(world: &mut World, operation: Operation, error: MotionError) {
    world.trigger(MotionDiagnostic::new(operation, error));
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
pub(crate) fn log_motion_diagnostic(event: On<MotionDiagnostic>) {
    let MotionDiagnostic { operation, error } = *event.event();
    if error.is_degradation() {
        log::warn!("{operation:?}: {error}; continuing without animation");
    } else {
        log::debug!("{operation:?}: {error}");
    }
}
