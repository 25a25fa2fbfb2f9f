//! Plot-confined agent motion for Bevy worlds.
//!
//! Agents are registered against a rectangular plot, given move orders, and
//! advanced every tick toward their targets while a "run" animation track
//! follows their motion state. See [`plugin::MotionPlugin`] for the usual
//! entry point and [`commands`] for the command API.
pub mod anchor;
pub mod animation;
pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod lifecycle;
pub mod logging;
pub mod physics;
pub mod plugin;
pub mod registry;
pub mod roster;
pub mod state;
pub mod tick;
pub mod vector_math;
pub use constants::*;

// Re-export commonly used items
pub use anchor::{Anchor, Drive};
pub use animation::{AnimationLibrary, AnimationLookup};
pub use commands::{
    add, clear_all, is_registered, move_to, movement_state, pause, registered_agents, remove,
    resume, set_speed, MotionCommand,
};
pub use components::{
    AgentKind, AnimationTrack, Animator, ClipSource, ControlledBody, MotionAgent,
    OrientationConstraint, Plot, PositionConstraint, TrackHandle,
};
pub use config::{MotionSettings, SettingsError};
pub use error::{MotionDiagnostic, MotionError, Operation};
pub use geometry::{clamp_to_plot, plot_contains};
pub use lifecycle::{init, shutdown};
pub use logging::init as init_logging;
pub use plugin::{MotionPlugin, MotionSet};
pub use registry::MotionRegistry;
pub use roster::{MarkedBodies, Roster, RosterSource};
pub use state::{AvoidanceState, MovementState, RunTrackSlot};
pub use tick::{advance, motion_tick_system};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use corral::prelude::*;
    //! ```

    pub use crate::commands::{add, move_to, pause, remove, resume, set_speed, MotionCommand};
    pub use crate::components::{Animator, Plot};
    pub use crate::MotionDiagnostic;
    pub use crate::MotionPlugin;
    pub use crate::MotionSettings;
}
