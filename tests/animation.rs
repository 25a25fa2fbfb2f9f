//! Run-track resolution through the lookup service and the alias fallback.

use std::sync::{Arc, Mutex, PoisonError};

use bevy::prelude::*;
use corral::{
    add, advance, move_to, movement_state, AgentKind, AnimationLibrary, AnimationLookup,
    AnimationTrack, Animator, ClipSource, MotionError, RunTrackSlot, TrackHandle,
};
use mockall::mock;
use rstest::{fixture, rstest};
use test_utils::{
    captured_diagnostics, install_diagnostic_capture, motion_world, spawn_animated_agent,
    spawn_plot,
};

mock! {
    pub Lookup {}
    impl AnimationLookup for Lookup {
        fn resolve(
            &self,
            animator: &mut Animator,
            clip: &str,
            agent_kind: &str,
        ) -> Option<TrackHandle>;
    }
}

type Requests = Arc<Mutex<Vec<(String, String)>>>;

struct Stage {
    world: World,
    plot: Entity,
}

#[fixture]
fn stage() -> Stage {
    let mut world = motion_world();
    install_diagnostic_capture(&mut world);
    let plot = spawn_plot(&mut world, Transform::IDENTITY, 20.0);
    Stage { world, plot }
}

/// Track currently cached for `agent`, read from its animator.
fn run_track(world: &World, agent: Entity) -> Option<AnimationTrack> {
    let state = movement_state(world, agent)?;
    let RunTrackSlot::Ready(handle) = state.run_track() else {
        return None;
    };
    world
        .get::<Animator>(state.animator()?)?
        .track(handle)
        .cloned()
}

fn missing_track_reports(world: &World) -> usize {
    captured_diagnostics(world)
        .iter()
        .filter(|d| matches!(d.error, MotionError::MissingRunTrack(_)))
        .count()
}

fn recording_lookup(requests: &Requests, clip: &'static str) -> MockLookup {
    let mut lookup = MockLookup::new();
    let seen = Arc::clone(requests);
    lookup
        .expect_resolve()
        .times(1)
        .returning(move |animator, requested, kind| {
            seen.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((requested.to_owned(), kind.to_owned()));
            Some(animator.load(clip))
        });
    lookup
}

#[rstest]
fn lookup_service_wins_over_aliases(mut stage: Stage) {
    let requests = Requests::default();
    stage
        .world
        .insert_resource(AnimationLibrary::new(recording_lookup(&requests, "LibraryRun")));
    let agent = spawn_animated_agent(&mut stage.world, Vec3::ZERO);
    stage.world.entity_mut(agent).insert(AgentKind::new("Horse"));
    add(&mut stage.world, agent, stage.plot);

    move_to(&mut stage.world, agent, Vec3::new(6.0, 0.0, 0.0), 1.0);
    move_to(&mut stage.world, agent, Vec3::new(-6.0, 0.0, 0.0), 1.0);

    let track = run_track(&stage.world, agent).expect("track resolved");
    assert_eq!(track.clip(), "LibraryRun");
    assert!(track.is_playing());
    assert_eq!(track.starts(), 1);
    assert_eq!(
        requests.lock().unwrap_or_else(PoisonError::into_inner).as_slice(),
        &[("Run".to_owned(), "Horse".to_owned())]
    );
}

#[rstest]
fn aliases_are_tried_in_configured_order(mut stage: Stage) {
    let agent = stage
        .world
        .spawn((Transform::IDENTITY, Animator::default()))
        .with_children(|parent| {
            parent.spawn(Name::new("run"));
            parent.spawn((Name::new("Run"), ClipSource("Sprint".to_owned())));
        })
        .id();
    add(&mut stage.world, agent, stage.plot);

    move_to(&mut stage.world, agent, Vec3::new(0.0, 0.0, 6.0), 1.0);

    let track = run_track(&stage.world, agent).expect("alias resolved");
    assert_eq!(track.clip(), "Sprint");
    assert!(track.is_playing());
}

#[rstest]
fn animator_may_live_on_a_child(mut stage: Stage) {
    let mut holder = None;
    let agent = stage
        .world
        .spawn(Transform::IDENTITY)
        .with_children(|parent| {
            parent.spawn(Name::new("Mesh"));
            holder = Some(parent.spawn(Animator::default()).id());
            parent.spawn(Name::new("RunAnim"));
        })
        .id();
    add(&mut stage.world, agent, stage.plot);
    move_to(&mut stage.world, agent, Vec3::new(5.0, 0.0, 0.0), 1.0);

    let state = movement_state(&stage.world, agent).expect("registered");
    assert_eq!(state.animator(), holder);
    let track = run_track(&stage.world, agent).expect("alias resolved");
    assert_eq!(track.clip(), "RunAnim");
}

#[rstest]
fn missing_track_is_reported_once_and_motion_continues(mut stage: Stage) {
    let agent = stage
        .world
        .spawn((Transform::IDENTITY, Animator::default()))
        .id();
    add(&mut stage.world, agent, stage.plot);

    move_to(&mut stage.world, agent, Vec3::new(6.0, 0.0, 0.0), 1.0);
    for _ in 0..3 {
        advance(&mut stage.world, 0.1);
    }
    move_to(&mut stage.world, agent, Vec3::new(-6.0, 0.0, 0.0), 1.0);
    advance(&mut stage.world, 0.1);

    let state = movement_state(&stage.world, agent).expect("registered");
    assert_eq!(state.run_track(), RunTrackSlot::Missing);
    assert!(state.is_moving());
    assert_eq!(missing_track_reports(&stage.world), 1);
    assert!(stage
        .world
        .get::<Animator>(agent)
        .is_some_and(Animator::is_empty));
}

#[rstest]
fn agents_without_an_animator_move_silently_after_one_report(mut stage: Stage) {
    let agent = stage.world.spawn(Transform::IDENTITY).id();
    add(&mut stage.world, agent, stage.plot);

    move_to(&mut stage.world, agent, Vec3::new(3.0, 0.0, 0.0), 1.0);
    advance(&mut stage.world, 1.0);

    let position = stage
        .world
        .get::<Transform>(agent)
        .map(|t| t.translation)
        .expect("agent has a transform");
    assert!((position.x - 3.0).abs() < 1e-4);
    assert_eq!(missing_track_reports(&stage.world), 1);
}

#[rstest]
fn track_stops_on_arrival(mut stage: Stage) {
    let agent = spawn_animated_agent(&mut stage.world, Vec3::ZERO);
    add(&mut stage.world, agent, stage.plot);

    move_to(&mut stage.world, agent, Vec3::new(2.0, 0.0, 0.0), 0.1);
    assert!(run_track(&stage.world, agent).is_some_and(|t| t.is_playing()));

    advance(&mut stage.world, 1.0);
    advance(&mut stage.world, 0.1);

    let track = run_track(&stage.world, agent).expect("track resolved");
    assert!(!track.is_playing());
    assert!(!movement_state(&stage.world, agent)
        .expect("registered")
        .is_moving());
}
