//! Runtime configuration for the motion subsystem.
//!
//! [`MotionSettings`] defaults to the constants in [`crate::constants`] and can
//! be loaded from JSON, where any omitted field keeps its default.

use serde::Deserialize;
use thiserror::Error;

use crate::{
    ARRIVAL_EPSILON, DEFAULT_MARGIN, DRIFT_THRESHOLD, LERP_SPEED, MAX_SPEED, MIN_DURATION,
    MIN_SPEED, RUN_ALIASES, RUN_CLIP_NAME,
};

/// Reasons a settings document is rejected.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The document is not valid JSON for [`MotionSettings`].
    #[error("failed to parse motion settings: {0}")]
    Parse(#[from] serde_json::Error),
    /// `min_speed` exceeds `max_speed`, or either is not a positive number.
    #[error("invalid speed range [{min}, {max}]")]
    SpeedRange {
        /// Configured lower bound.
        min: f32,
        /// Configured upper bound.
        max: f32,
    },
    /// A value that must be strictly positive is not.
    #[error("{field} must be positive, got {value}")]
    NotPositive {
        /// Name of the offending field.
        field: &'static str,
        /// Value supplied for it.
        value: f32,
    },
    /// A value that must be zero or greater is not.
    #[error("{field} must not be negative, got {value}")]
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// Value supplied for it.
        value: f32,
    },
}

/// Tunables for travel, arrival, smoothing and animation lookup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionSettings {
    /// Lower speed bound while moving.
    pub min_speed: f32,
    /// Upper speed bound while moving.
    pub max_speed: f32,
    /// Arrival tolerance.
    pub arrival_epsilon: f32,
    /// Orientation smoothing rate per second.
    pub lerp_speed: f32,
    /// Distance kept from the plot edge.
    pub margin: f32,
    /// Drift beyond which a tick snaps the agent back inside.
    pub drift_threshold: f32,
    /// Smallest accepted `move_to` duration.
    pub min_duration: f32,
    /// Clip requested from the lookup service.
    pub run_clip: String,
    /// Child names tried, in order, when the lookup service has nothing.
    pub run_aliases: Vec<String>,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            min_speed: MIN_SPEED,
            max_speed: MAX_SPEED,
            arrival_epsilon: ARRIVAL_EPSILON,
            lerp_speed: LERP_SPEED,
            margin: DEFAULT_MARGIN,
            drift_threshold: DRIFT_THRESHOLD,
            min_duration: MIN_DURATION,
            run_clip: RUN_CLIP_NAME.to_owned(),
            run_aliases: RUN_ALIASES.iter().map(|alias| (*alias).to_owned()).collect(),
        }
    }
}

impl MotionSettings {
    /// Parses and validates a JSON settings document.
    ///
    /// # Errors
    /// Returns [`SettingsError::Parse`] for malformed JSON or unknown fields,
    /// and the other variants when [`MotionSettings::validate`] rejects the
    /// values.
    ///
    /// # Examples
    /// ```
    /// use corral::config::MotionSettings;
    ///
    /// let settings = MotionSettings::from_json(r#"{ "max_speed": 30.0 }"#)
    ///     .expect("valid settings");
    /// assert_eq!(settings.max_speed, 30.0);
    /// assert_eq!(settings.min_speed, 8.0);
    /// ```
    pub fn from_json(source: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks the numeric invariants the motion code relies on.
    ///
    /// # Errors
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let speeds_valid = self.min_speed > 0.0
            && self.max_speed.is_finite()
            && self.min_speed <= self.max_speed;
        if !speeds_valid {
            return Err(SettingsError::SpeedRange {
                min: self.min_speed,
                max: self.max_speed,
            });
        }
        require_positive("arrival_epsilon", self.arrival_epsilon)?;
        require_positive("min_duration", self.min_duration)?;
        require_non_negative("lerp_speed", self.lerp_speed)?;
        require_non_negative("margin", self.margin)?;
        require_non_negative("drift_threshold", self.drift_threshold)?;
        Ok(())
    }

    /// Clamps `speed` into the configured range; NaN maps to the minimum.
    #[must_use]
    pub fn clamp_speed(&self, speed: f32) -> f32 {
        if speed.is_nan() {
            return self.min_speed;
        }
        // f32::clamp panics on an inverted range.
        speed.max(self.min_speed).min(self.max_speed)
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SettingsError::NotPositive { field, value })
    }
}

fn require_non_negative(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SettingsError::Negative { field, value })
    }
}
