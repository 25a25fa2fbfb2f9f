//! Headless demo: a ring of agents crosses a plot and reports where it ends.
use std::f32::consts::TAU;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use clap::Parser;
use corral::{
    init_logging, move_to, registered_agents, Animator, MotionPlugin, MotionSettings, Plot,
};

/// Plot-confined agents running across a field
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// Number of agents placed on the ring
    #[arg(long, default_value_t = 4)]
    agents: usize,
    /// Number of frames to simulate
    #[arg(long, default_value_t = 120)]
    ticks: u32,
    /// Seconds per simulated frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,
    /// Side length of the square plot
    #[arg(long, default_value_t = 40.0)]
    plot_size: f32,
    /// JSON file overriding the motion settings
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn load_settings(path: Option<&Path>) -> Result<MotionSettings> {
    let Some(path) = path else {
        return Ok(MotionSettings::default());
    };
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("reading settings from {}", path.display()))?;
    MotionSettings::from_json(&source)
        .with_context(|| format!("parsing settings from {}", path.display()))
}

fn spawn_ring(world: &mut World, plot: Entity, count: usize, radius: f32) -> Vec<(Entity, Vec3)> {
    (0..count)
        .map(|index| {
            #[expect(clippy::cast_precision_loss, reason = "agent counts are small")]
            let angle = TAU * index as f32 / count as f32;
            let start = Vec3::new(angle.cos(), 0.0, angle.sin()) * radius;
            let agent = world
                .spawn((Transform::from_translation(start), Animator::default()))
                .with_children(|parent| {
                    parent.spawn(Name::new("RunAnim"));
                })
                .id();
            corral::add(world, agent, plot);
            (agent, -start)
        })
        .collect()
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    ensure!(
        args.dt.is_finite() && args.dt > 0.0,
        "--dt must be positive"
    );

    let settings = load_settings(args.settings.as_deref())?;
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, MotionPlugin::new(settings)))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
            args.dt,
        )));
    app.finish();
    app.cleanup();

    let world = app.world_mut();
    let plot = world
        .spawn((Transform::IDENTITY, Plot::new(args.plot_size, args.plot_size)))
        .id();
    for (agent, target) in spawn_ring(world, plot, args.agents, args.plot_size * 0.5) {
        move_to(world, agent, target, 1.5);
    }

    for _ in 0..args.ticks {
        app.update();
    }

    let finished = app.world();
    for agent in registered_agents(finished) {
        if let Some(transform) = finished.get::<Transform>(agent) {
            log::info!("agent {agent} at {}", transform.translation);
        }
    }
    Ok(())
}
