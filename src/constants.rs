//! Motion constants forming the public contract of the subsystem.
//!
//! These are the defaults behind [`crate::config::MotionSettings`]; hosts
//! that never load a settings file get exactly these values.

/// Slowest travel speed, in world units per second, while an agent moves.
pub const MIN_SPEED: f32 = 8.0;
/// Fastest travel speed, in world units per second, while an agent moves.
pub const MAX_SPEED: f32 = 20.0;
/// Distance at which an agent counts as having reached its target.
pub const ARRIVAL_EPSILON: f32 = 0.05;
/// Rate of the exponential orientation smoothing, per second.
pub const LERP_SPEED: f32 = 8.0;
/// Distance kept between an agent and the edge of its plot.
pub const DEFAULT_MARGIN: f32 = 2.0;
/// Drift beyond this distance is corrected at the start of a tick.
pub const DRIFT_THRESHOLD: f32 = 0.2;
/// Smallest duration accepted by `move_to`; guards the speed division.
pub const MIN_DURATION: f32 = 0.01;
/// Clip name requested from the animation lookup service.
pub const RUN_CLIP_NAME: &str = "Run";
/// Child names searched on the agent when the lookup service has no clip.
pub const RUN_ALIASES: [&str; 3] = ["RunAnim", "Run", "run"];
/// Agent type name used for lookups when the agent carries no `AgentKind`.
pub const DEFAULT_AGENT_KIND: &str = "Agent";
