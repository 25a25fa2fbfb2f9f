//! Utility helpers for tests.
//!
//! Scene builders for plots and agents, plus an observer that records motion
//! diagnostics so tests can assert on ignored commands.
pub mod diagnostics;
pub mod scene;

pub use diagnostics::{captured_diagnostics, install_diagnostic_capture, CapturedDiagnostics};
pub use scene::{motion_world, spawn_agent, spawn_animated_agent, spawn_plot, RUN_CHILD};
