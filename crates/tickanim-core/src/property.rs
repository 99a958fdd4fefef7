//! Animated properties.
//!
//! An [`AnimatedProperty`] is one attribute's time-based interpolation unit.
//! The animation hands it a [`PlaybackContext`] when playback starts and then
//! an elapsed position on every tick; the property writes its value to the
//! target and reports when it has reached its end state.
//!
//! [`AttributeProperty`] is the built-in linear numeric implementation, built
//! from a [`PropertyConfig`]:
//!
//! ```ignore
//! let width = AttributeProperty::new(PropertyConfig::new("width", 0.0, 100.0, 250.0).with_unit("px"));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::element::AnimationTarget;
use crate::interpolate::{Interpolate, format_value, progress};
use crate::types::Direction;

/// Read-only playback parameters handed to properties when an animation starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackContext {
    pub direction: Direction,
    pub time_scale: f64,
}

/// A single attribute animated over time.
pub trait AnimatedProperty: fmt::Debug {
    /// Prepare for a new playback run. Called once per animation start.
    fn start_animation(&mut self, ctx: &PlaybackContext);

    /// Apply the value for `elapsed_ms` (already scaled, and already mapped
    /// from the end for backward playback) to the target.
    fn process_animation(&mut self, target: &mut dyn AnimationTarget, elapsed_ms: f64);

    /// Whether the last `process_animation` call reached the end state.
    fn has_ended(&self) -> bool;

    /// Full span of this property's animation in milliseconds.
    fn total_duration_ms(&self) -> f64;
}

/// Configuration of one linearly animated numeric attribute.
///
/// Missing fields default to zero / empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PropertyConfig {
    /// Attribute written on every tick.
    pub attribute: String,
    /// Value at position zero.
    pub from: f64,
    /// Value at the end of the duration.
    pub to: f64,
    /// Length of the transition in milliseconds.
    pub duration_ms: f64,
    /// Suffix appended to the written value, e.g. `px`.
    pub unit: String,
}

impl PropertyConfig {
    pub fn new(attribute: impl Into<String>, from: f64, to: f64, duration_ms: f64) -> Self {
        Self {
            attribute: attribute.into(),
            from,
            to,
            duration_ms,
            unit: String::new(),
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Duration with negative or non-finite values treated as zero.
    pub fn effective_duration_ms(&self) -> f64 {
        if self.duration_ms.is_finite() {
            self.duration_ms.max(0.0)
        } else {
            0.0
        }
    }
}

/// Linear numeric attribute animation.
#[derive(Debug, Clone)]
pub struct AttributeProperty {
    config: PropertyConfig,
    direction: Direction,
    ended: bool,
    last_value: Option<f64>,
}

impl AttributeProperty {
    pub fn new(config: PropertyConfig) -> Self {
        Self {
            config,
            direction: Direction::Forward,
            ended: false,
            last_value: None,
        }
    }

    pub fn config(&self) -> &PropertyConfig {
        &self.config
    }

    /// Last value written to the target, if any.
    pub fn last_value(&self) -> Option<f64> {
        self.last_value
    }

    /// Interpolated value at `position_ms`.
    pub fn value_at(&self, position_ms: f64) -> f64 {
        let t = progress(position_ms, self.config.effective_duration_ms()).unwrap_or(
            // Zero-length transitions jump straight to the endpoint of the run.
            match self.direction {
                Direction::Forward => 1.0,
                Direction::Backward => 0.0,
            },
        );
        self.config.from.interpolate(&self.config.to, t)
    }
}

impl AnimatedProperty for AttributeProperty {
    fn start_animation(&mut self, ctx: &PlaybackContext) {
        self.direction = ctx.direction;
        self.ended = false;
        self.last_value = None;
    }

    fn process_animation(&mut self, target: &mut dyn AnimationTarget, elapsed_ms: f64) {
        let duration = self.config.effective_duration_ms();
        let value = self.value_at(elapsed_ms);

        target.set_attribute(
            &self.config.attribute,
            format_value(value, &self.config.unit),
        );
        self.last_value = Some(value);

        self.ended = match self.direction {
            Direction::Forward => elapsed_ms >= duration,
            Direction::Backward => elapsed_ms <= 0.0,
        };
    }

    fn has_ended(&self) -> bool {
        self.ended
    }

    fn total_duration_ms(&self) -> f64 {
        self.config.effective_duration_ms()
    }
}
