//! Time-based property animation bound to one element.
//!
//! An [`Animation`] owns a fixed list of [`AnimatedProperty`] values and drives
//! them from a recurring [`IntervalTimer`]. Every tick computes the scaled time
//! since start, hands each still-active property its position, and drops the
//! properties that report completion. Once none are left the timer is
//! cancelled.
//!
//! ```ignore
//! let element = Element::new("div").into_shared();
//! let options = AnimationOptions::new()
//!     .with_property(PropertyConfig::new("width", 0.0, 100.0, 200.0).with_unit("px"));
//! let mut animation = Animation::new(element.clone(), options);
//!
//! animation.start(Instant::now())?;
//! // host loop
//! while animation.is_playing() {
//!     animation.poll(Instant::now());
//! }
//! ```

use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use crate::element::SharedTarget;
use crate::error::{AnimationError, Result};
use crate::events::{AnimationEvent, EventQueue};
use crate::options::AnimationOptions;
use crate::property::{AnimatedProperty, AttributeProperty, PlaybackContext};
use crate::timer::{DEFAULT_TICK_INTERVAL, IntervalTimer};
use crate::types::{AnimationId, Direction, PlaybackState, StopReason};

/// A single-pass linear animation of one element's properties.
pub struct Animation {
    id: AnimationId,
    target: SharedTarget,
    direction: Direction,
    time_scale: f64,
    properties: Vec<Box<dyn AnimatedProperty>>,
    /// Indices into `properties` that have not finished this run.
    active: Vec<usize>,
    started_at: Option<Instant>,
    state: PlaybackState,
    interval: Duration,
    timer: Option<IntervalTimer>,
    events: EventQueue,
}

impl Animation {
    /// Create an animation with one [`AttributeProperty`] per configured entry.
    pub fn new(target: SharedTarget, options: AnimationOptions) -> Self {
        let properties = options
            .properties
            .iter()
            .cloned()
            .map(|config| Box::new(AttributeProperty::new(config)) as Box<dyn AnimatedProperty>)
            .collect();
        Self::with_properties(target, &options, properties)
    }

    /// Create an animation from custom properties.
    ///
    /// Direction and time scale come from `options`; its `properties` list is
    /// ignored.
    pub fn with_properties(
        target: SharedTarget,
        options: &AnimationOptions,
        properties: Vec<Box<dyn AnimatedProperty>>,
    ) -> Self {
        Self {
            id: AnimationId::new(),
            target,
            direction: options.direction(),
            time_scale: options.time_scale(),
            properties,
            active: Vec::new(),
            started_at: None,
            state: PlaybackState::Idle,
            interval: DEFAULT_TICK_INTERVAL,
            timer: None,
            events: EventQueue::new(),
        }
    }

    /// Parse a JSON description and build the animation from it.
    pub fn from_json(target: SharedTarget, json: &str) -> Result<Self> {
        Ok(Self::new(target, AnimationOptions::from_json(json)?))
    }

    /// Set the tick cadence used by the next `start`.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.set_interval(interval);
        self
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn id(&self) -> AnimationId {
        self.id
    }

    /// Handle to the animated element.
    pub fn target(&self) -> &SharedTarget {
        &self.target
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn properties_len(&self) -> usize {
        self.properties.len()
    }

    /// Number of properties still running in the current (or last) run.
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Construction-order indices of the properties still running.
    pub fn active_indices(&self) -> &[usize] {
        &self.active
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    /// When the timer fires next, if playing.
    pub fn next_tick_at(&self) -> Option<Instant> {
        self.timer.as_ref().map(IntervalTimer::next_due)
    }

    /// Drain lifecycle events recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<AnimationEvent> {
        self.events.drain().collect()
    }

    /// Flip the playback direction. Only allowed while idle.
    pub fn reverse(&mut self) -> Result<()> {
        if self.is_playing() {
            warn!(id = %self.id, "reverse rejected: animation is playing");
            return Err(AnimationError::InvalidOperation(
                "cannot reverse an animation that is already running",
            ));
        }
        self.direction = self.direction.reversed();
        debug!(id = %self.id, direction = ?self.direction, "animation reversed");
        Ok(())
    }

    /// Begin playback at `now`.
    ///
    /// Every per-run field is reinitialized, so a stopped animation can be
    /// started again. Fails without side effects if already playing.
    pub fn start(&mut self, now: Instant) -> Result<()> {
        if self.is_playing() {
            warn!(id = %self.id, "start rejected: animation is already playing");
            return Err(AnimationError::AlreadyPlaying);
        }

        self.started_at = Some(now);
        self.state = PlaybackState::Playing;

        let ctx = PlaybackContext {
            direction: self.direction,
            time_scale: self.time_scale,
        };
        for property in &mut self.properties {
            property.start_animation(&ctx);
        }

        self.active = (0..self.properties.len()).collect();
        self.timer = Some(IntervalTimer::new(self.interval, now));

        debug!(
            id = %self.id,
            direction = ?self.direction,
            time_scale = self.time_scale,
            properties = self.properties.len(),
            "animation started"
        );
        self.events.push(AnimationEvent::Started {
            direction: self.direction,
            property_count: self.active.len(),
        });
        Ok(())
    }

    /// Cancel the timer and return to idle. Safe to call at any time.
    ///
    /// The active set and start instant are left as they were.
    pub fn stop(&mut self) {
        self.halt(StopReason::Cancelled);
    }

    /// Discard the state left behind by the last run. Only allowed while idle.
    pub fn reset(&mut self) -> Result<()> {
        if self.is_playing() {
            return Err(AnimationError::InvalidOperation(
                "cannot reset an animation that is already running",
            ));
        }
        self.active.clear();
        self.started_at = None;
        self.events.clear();
        Ok(())
    }

    /// Run one progression step if the timer is due at `now`.
    ///
    /// Returns `true` when a tick ran.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(timer) = self.timer.as_mut() else {
            return false;
        };
        if !timer.fire(now) {
            return false;
        }
        self.progress(now);
        true
    }

    /// Run one progression step now, regardless of the timer.
    ///
    /// Returns `false` if the animation is idle.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.progress(now);
        true
    }

    /// Scaled milliseconds since start at `now`.
    pub fn elapsed_ms(&self, now: Instant) -> f64 {
        self.started_at.map_or(0.0, |started_at| {
            let real_ms = now.saturating_duration_since(started_at).as_nanos() as f64 / 1_000_000.0;
            real_ms * self.time_scale
        })
    }

    fn progress(&mut self, now: Instant) {
        let elapsed_ms = self.elapsed_ms(now);

        let Ok(mut target) = self.target.try_borrow_mut() else {
            // The host holds the element; the next tick catches up from elapsed time.
            warn!(id = %self.id, "target element busy, skipping tick");
            return;
        };

        let mut finished = Vec::new();
        for &index in &self.active {
            let property = &mut self.properties[index];
            let position = match self.direction {
                Direction::Forward => elapsed_ms,
                Direction::Backward => (property.total_duration_ms() - elapsed_ms).max(0.0),
            };
            property.process_animation(&mut *target, position);
            if property.has_ended() {
                finished.push((index, position));
            }
        }
        drop(target);

        trace!(
            id = %self.id,
            elapsed_ms,
            active = self.active.len(),
            finished = finished.len(),
            "animation tick"
        );

        if !finished.is_empty() {
            self.active
                .retain(|index| !finished.iter().any(|(done, _)| done == index));
            for (property_index, elapsed_ms) in finished {
                self.events.push(AnimationEvent::PropertyFinished {
                    property_index,
                    elapsed_ms,
                });
            }
        }

        if self.active.is_empty() {
            self.halt(StopReason::Completed);
        }
    }

    fn halt(&mut self, reason: StopReason) {
        let timer = self.timer.take();
        if self.state != PlaybackState::Playing {
            return;
        }
        self.state = PlaybackState::Idle;

        debug!(
            id = %self.id,
            ?reason,
            ticks = timer.map_or(0, |t| t.fired()),
            "animation stopped"
        );
        self.events.push(AnimationEvent::Stopped { reason });
    }
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("id", &self.id)
            .field("direction", &self.direction)
            .field("time_scale", &self.time_scale)
            .field("properties", &self.properties)
            .field("active", &self.active)
            .field("started_at", &self.started_at)
            .field("state", &self.state)
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}
