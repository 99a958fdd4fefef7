//! Animation options as supplied by page script.
//!
//! Options are deliberately lenient: missing or malformed values fall back to
//! their defaults instead of being rejected.
//!
//! ```json
//! {
//!   "animationDirection": -1,
//!   "timeScale": 0.5,
//!   "properties": [
//!     { "attribute": "width", "from": 0, "to": 120, "durationMs": 300, "unit": "px" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::property::PropertyConfig;
use crate::types::Direction;

/// Construction options for an [`Animation`](crate::Animation).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationOptions {
    /// Initial direction: negative plays backward, anything else forward.
    #[serde(deserialize_with = "lenient_direction")]
    pub animation_direction: Option<i64>,
    /// One entry per animated attribute.
    #[serde(deserialize_with = "lenient_properties")]
    pub properties: Vec<PropertyConfig>,
    /// Multiplier applied to elapsed wall-clock time.
    #[serde(deserialize_with = "lenient_time_scale")]
    pub time_scale: Option<f64>,
}

impl AnimationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON description. `null` yields the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Option<Self> = serde_json::from_str(json)?;
        Ok(options.unwrap_or_default())
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.animation_direction = Some(direction.sign() as i64);
        self
    }

    pub fn with_time_scale(mut self, time_scale: f64) -> Self {
        self.time_scale = Some(time_scale);
        self
    }

    pub fn with_property(mut self, property: PropertyConfig) -> Self {
        self.properties.push(property);
        self
    }

    /// Fill in `time_scale` only when the description left it unset.
    pub fn with_default_time_scale(mut self, time_scale: f64) -> Self {
        if self.time_scale.is_none() {
            self.time_scale = Some(time_scale);
        }
        self
    }

    /// Resolved initial direction.
    pub fn direction(&self) -> Direction {
        self.animation_direction
            .map(Direction::from_sign)
            .unwrap_or_default()
    }

    /// Resolved time scale; non-positive or non-finite values become `1.0`.
    pub fn time_scale(&self) -> f64 {
        match self.time_scale {
            Some(scale) if scale.is_finite() && scale > 0.0 => scale,
            _ => 1.0,
        }
    }
}

fn lenient_direction<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_i64()
        .or_else(|| value.as_f64().map(|v| v.signum() as i64)))
}

fn lenient_time_scale<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

fn lenient_properties<'de, D>(deserializer: D) -> std::result::Result<Vec<PropertyConfig>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(entries) = value else {
        if !value.is_null() {
            warn!("ignoring non-array `properties` option");
        }
        return Ok(Vec::new());
    };

    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(config) => Some(config),
            Err(err) => {
                warn!(index, %err, "skipping malformed property configuration");
                None
            }
        })
        .collect())
}
