//! End-to-end runs of `MotionPlugin` inside a Bevy `App`.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use corral::{
    is_registered, MotionCommand, MotionPlugin, MotionSettings, OrientationConstraint,
    PositionConstraint,
};
use rstest::{fixture, rstest};
use test_utils::spawn_plot;

const FRAME: Duration = Duration::from_millis(16);

#[derive(Resource, Clone, Copy)]
struct Order {
    agent: Entity,
    plot: Entity,
}

fn issue_order(order: Res<Order>, mut commands: Commands) {
    commands.queue(MotionCommand::Add {
        agent: order.agent,
        plot: order.plot,
    });
    commands.queue(MotionCommand::MoveTo {
        agent: order.agent,
        target: Vec3::new(-6.0, 0.0, 4.0),
        duration: 0.5,
    });
}

#[fixture]
fn app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, MotionPlugin::new(MotionSettings::default())))
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));
    app.finish();
    app.cleanup();
    app
}

fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

fn translation(app: &App, entity: Entity) -> Vec3 {
    app.world()
        .get::<Transform>(entity)
        .map(|t| t.translation)
        .expect("entity has a transform")
}

#[rstest]
fn queued_order_reaches_its_target(mut app: App) {
    let plot = spawn_plot(app.world_mut(), Transform::IDENTITY, 20.0);
    let agent = app.world_mut().spawn(Transform::IDENTITY).id();
    app.insert_resource(Order { agent, plot });
    app.add_systems(Startup, issue_order);

    run_frames(&mut app, 120);

    assert!(is_registered(app.world(), agent));
    let position = translation(&app, agent);
    assert!(
        position.distance(Vec3::new(-6.0, 0.0, 4.0)) <= 0.05,
        "agent ended at {position:?}"
    );
}

#[rstest]
fn constrained_body_follows_its_targets(mut app: App) {
    let plot = spawn_plot(app.world_mut(), Transform::IDENTITY, 20.0);
    let agent = app
        .world_mut()
        .spawn((
            Transform::IDENTITY,
            PositionConstraint::new(Vec3::ZERO, 20.0),
            OrientationConstraint::new(Quat::IDENTITY, 20.0),
        ))
        .id();
    corral::add(app.world_mut(), agent, plot);
    corral::move_to(app.world_mut(), agent, Vec3::new(5.0, 0.0, 0.0), 0.5);

    run_frames(&mut app, 240);

    let target = app
        .world()
        .get::<PositionConstraint>(agent)
        .expect("constraint kept")
        .target;
    assert!(
        target.distance(Vec3::new(5.0, 0.0, 0.0)) <= 0.1,
        "target at {target:?}"
    );
    assert!(
        translation(&app, agent).distance(target) < 0.1,
        "body lags its constraint"
    );
}

#[test]
fn follower_can_be_left_to_the_host() {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        MotionPlugin {
            settings: MotionSettings::default(),
            follow_constraints: false,
        },
    ))
    .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));
    let body = app
        .world_mut()
        .spawn((
            Transform::IDENTITY,
            PositionConstraint::new(Vec3::new(3.0, 0.0, 0.0), 20.0),
        ))
        .id();

    run_frames(&mut app, 10);

    assert_eq!(translation(&app, body), Vec3::ZERO);
}
