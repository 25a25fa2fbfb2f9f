//! ECS component types used by the motion subsystem.
//! Plots, smoothing constraints, animators and the markers tying agents to the
//! registry.
use bevy::prelude::*;

use crate::DEFAULT_AGENT_KIND;

/// Rectangular region an agent must stay inside.
///
/// The owning entity's `Transform` supplies the plot frame: translation is the
/// plot centre and rotation orients the rectangle. Scale is ignored.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct Plot {
    /// Extent along the plot's local X axis.
    pub width: f32,
    /// Extent along the plot's local Z axis.
    pub depth: f32,
}

impl Plot {
    /// Creates a plot with the given horizontal extents.
    #[must_use]
    pub const fn new(width: f32, depth: f32) -> Self {
        Self { width, depth }
    }

    /// Half the width and depth, as local `(x, z)` limits before margin.
    #[must_use]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width, self.depth) * 0.5
    }
}

/// Smoothing proxy for an agent's position.
///
/// When present at registration, position writes update `target` and the
/// constraint solver moves the body.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct PositionConstraint {
    /// Position the body is pulled toward.
    pub target: Vec3,
    /// Fraction of the remaining gap closed per second.
    pub responsiveness: f32,
}

impl PositionConstraint {
    /// Constraint holding the body at `target`.
    #[must_use]
    pub const fn new(target: Vec3, responsiveness: f32) -> Self {
        Self {
            target,
            responsiveness,
        }
    }
}

/// Smoothing proxy for an agent's orientation.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct OrientationConstraint {
    /// Rotation the body is turned toward.
    pub target: Quat,
    /// Fraction of the remaining angle closed per second.
    pub responsiveness: f32,
}

impl OrientationConstraint {
    /// Constraint holding the body at `target`.
    #[must_use]
    pub const fn new(target: Quat, responsiveness: f32) -> Self {
        Self {
            target,
            responsiveness,
        }
    }
}

/// Type name scoping animation lookups for an agent.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct AgentKind(pub String);

impl AgentKind {
    /// Wraps a type name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the type name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AgentKind {
    fn default() -> Self {
        Self::new(DEFAULT_AGENT_KIND)
    }
}

/// Clip reference carried by a run alias child.
///
/// Children without one load a clip named after the child itself.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct ClipSource(pub String);

/// Marker for bodies controlled by a live actor, as reported by the default
/// roster.
#[derive(Component, Reflect, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[reflect(Component)]
pub struct ControlledBody;

/// Detachment subscription inserted when an agent is registered.
///
/// Removing it, directly or by despawning the agent, deregisters the agent.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MotionAgent;

/// Index of a track loaded into an [`Animator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackHandle(usize);

impl TrackHandle {
    /// Position of the track inside its animator.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A clip loaded into an animator together with its playback state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationTrack {
    clip: String,
    playing: bool,
    starts: u32,
}

impl AnimationTrack {
    /// Name of the loaded clip.
    #[must_use]
    pub fn clip(&self) -> &str {
        &self.clip
    }

    /// Whether the track is currently playing.
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.playing
    }

    /// How many times playback was started.
    #[must_use]
    pub const fn starts(&self) -> u32 {
        self.starts
    }
}

/// Animation-playing handle for an agent.
///
/// Tracks are never unloaded, so handles stay valid for the animator's
/// lifetime.
#[derive(Component, Debug, Default, Clone, PartialEq, Eq)]
pub struct Animator {
    tracks: Vec<AnimationTrack>,
}

impl Animator {
    /// Loads `clip` as a new, stopped track.
    pub fn load(&mut self, clip: impl Into<String>) -> TrackHandle {
        self.tracks.push(AnimationTrack {
            clip: clip.into(),
            playing: false,
            starts: 0,
        });
        TrackHandle(self.tracks.len() - 1)
    }

    /// Looks up a loaded track.
    #[must_use]
    pub fn track(&self, handle: TrackHandle) -> Option<&AnimationTrack> {
        self.tracks.get(handle.0)
    }

    /// Starts playback unless the track is already playing.
    ///
    /// Returns `false` when the handle is unknown.
    pub fn play(&mut self, handle: TrackHandle) -> bool {
        let Some(track) = self.tracks.get_mut(handle.0) else {
            return false;
        };
        if !track.playing {
            track.playing = true;
            track.starts += 1;
        }
        true
    }

    /// Stops playback. Returns `false` when the handle is unknown.
    pub fn stop(&mut self, handle: TrackHandle) -> bool {
        let Some(track) = self.tracks.get_mut(handle.0) else {
            return false;
        };
        track.playing = false;
        true
    }

    /// Whether the track exists and is playing.
    #[must_use]
    pub fn is_playing(&self, handle: TrackHandle) -> bool {
        self.track(handle).is_some_and(AnimationTrack::is_playing)
    }

    /// Number of loaded tracks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether no track has been loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
