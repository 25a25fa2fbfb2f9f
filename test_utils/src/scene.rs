//! Builders for worlds, plots and agents used across the integration tests.
use bevy::prelude::*;
use corral::{Animator, MotionSettings, Plot};

/// Child name matching the first run-clip alias.
pub const RUN_CHILD: &str = "RunAnim";

/// World with the motion subsystem initialised with default settings.
pub fn motion_world() -> World {
    let mut world = World::new();
    corral::init(&mut world, MotionSettings::default());
    world
}

/// Spawns a square plot of side `size` centred on `frame`.
///
/// # Examples
/// ```
/// use bevy::prelude::*;
/// use test_utils::scene::spawn_plot;
///
/// let mut world = World::new();
/// let plot = spawn_plot(&mut world, Transform::IDENTITY, 20.0);
/// assert!(world.get::<corral::Plot>(plot).is_some());
/// ```
pub fn spawn_plot(world: &mut World, frame: Transform, size: f32) -> Entity {
    world.spawn((frame, Plot::new(size, size))).id()
}

/// Spawns a bare agent at `position` facing `-Z`.
pub fn spawn_agent(world: &mut World, position: Vec3) -> Entity {
    world.spawn(Transform::from_translation(position)).id()
}

/// Spawns an agent carrying an `Animator` and a `RunAnim` child.
pub fn spawn_animated_agent(world: &mut World, position: Vec3) -> Entity {
    world
        .spawn((Transform::from_translation(position), Animator::default()))
        .with_children(|parent| {
            parent.spawn(Name::new(RUN_CHILD));
        })
        .id()
}
