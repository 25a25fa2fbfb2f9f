//! Shared helpers for observing `MotionDiagnostic` events in tests.
use bevy::ecs::prelude::On;
use bevy::prelude::*;
use corral::MotionDiagnostic;

/// Diagnostics captured in trigger order.
#[derive(Resource, Default, Debug)]
pub struct CapturedDiagnostics(pub Vec<MotionDiagnostic>);

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must take On<T> by value."
)]
fn record_diagnostic(event: On<MotionDiagnostic>, mut captured: ResMut<CapturedDiagnostics>) {
    captured.0.push(*event.event());
}

/// Installs the capturing observer and its resource on `world`.
pub fn install_diagnostic_capture(world: &mut World) {
    world.insert_resource(CapturedDiagnostics::default());
    world.add_observer(record_diagnostic);
}

/// Returns the diagnostics captured so far.
///
/// Requires [`install_diagnostic_capture`] to have been called on `world`.
pub fn captured_diagnostics(world: &World) -> Vec<MotionDiagnostic> {
    world
        .get_resource::<CapturedDiagnostics>()
        .map(|captured| captured.0.clone())
        .unwrap_or_default()
}
