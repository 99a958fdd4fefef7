//! Host loop driving a set of animations.
//!
//! The `Timeline` plays the role of the page's event loop: it owns animations,
//! fires their interval timers from a [`Clock`], and can block until every
//! animation has stopped.
//!
//! # Usage
//!
//! ```ignore
//! let mut timeline = Timeline::new(SystemClock);
//! let id = timeline.create(element.clone(), options);
//! timeline.start(id)?;
//! timeline.run_until_idle();
//! for event in timeline.drain_events() {
//!     // react to lifecycle events
//! }
//! ```

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::animation::Animation;
use crate::clock::Clock;
use crate::element::SharedTarget;
use crate::error::{AnimationError, Result};
use crate::events::TimelineEvent;
use crate::options::AnimationOptions;
use crate::timer::DEFAULT_TICK_INTERVAL;
use crate::types::AnimationId;

/// Owner and driver of animations.
pub struct Timeline {
    clock: Box<dyn Clock>,
    interval: Duration,
    animations: BTreeMap<AnimationId, Animation>,
}

impl Timeline {
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            interval: DEFAULT_TICK_INTERVAL,
            animations: BTreeMap::new(),
        }
    }

    /// Tick cadence applied to animations added from now on.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Take ownership of an animation. Its tick cadence becomes the timeline's.
    pub fn add(&mut self, mut animation: Animation) -> AnimationId {
        animation.set_interval(self.interval);
        let id = animation.id();
        self.animations.insert(id, animation);
        id
    }

    /// Build an animation from options and add it.
    pub fn create(&mut self, target: SharedTarget, options: AnimationOptions) -> AnimationId {
        self.add(Animation::new(target, options))
    }

    pub fn get(&self, id: AnimationId) -> Option<&Animation> {
        self.animations.get(&id)
    }

    pub fn get_mut(&mut self, id: AnimationId) -> Option<&mut Animation> {
        self.animations.get_mut(&id)
    }

    /// Stop and hand back an animation.
    pub fn remove(&mut self, id: AnimationId) -> Option<Animation> {
        let mut animation = self.animations.remove(&id)?;
        animation.stop();
        Some(animation)
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    pub fn start(&mut self, id: AnimationId) -> Result<()> {
        let now = self.clock.now();
        self.animation_mut(id)?.start(now)
    }

    pub fn stop(&mut self, id: AnimationId) -> Result<()> {
        self.animation_mut(id)?.stop();
        Ok(())
    }

    pub fn reverse(&mut self, id: AnimationId) -> Result<()> {
        self.animation_mut(id)?.reverse()
    }

    /// Stop every playing animation.
    pub fn stop_all(&mut self) {
        for animation in self.animations.values_mut() {
            animation.stop();
        }
    }

    /// Fire every due timer at the clock's current time.
    ///
    /// Returns the number of ticks that ran.
    pub fn update(&mut self) -> usize {
        let now = self.clock.now();
        let ticks = self
            .animations
            .values_mut()
            .map(|animation| animation.poll(now))
            .filter(|&ticked| ticked)
            .count();
        if ticks > 0 {
            trace!(ticks, playing = self.playing_count(), "timeline update");
        }
        ticks
    }

    pub fn has_playing(&self) -> bool {
        self.animations.values().any(Animation::is_playing)
    }

    pub fn playing_count(&self) -> usize {
        self.animations.values().filter(|a| a.is_playing()).count()
    }

    /// Earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.animations
            .values()
            .filter_map(Animation::next_tick_at)
            .min()
    }

    /// Drive timers until no animation is playing.
    ///
    /// Returns the number of ticks that ran. Never returns while an animation
    /// has a property that does not finish.
    pub fn run_until_idle(&mut self) -> usize {
        let mut ticks = 0;
        loop {
            ticks += self.update();
            let Some(deadline) = self.next_deadline() else {
                break;
            };
            self.clock.sleep_until(deadline);
        }
        debug!(ticks, "timeline idle");
        ticks
    }

    /// Drain events from every animation, ordered by animation ID.
    pub fn drain_events(&mut self) -> Vec<TimelineEvent> {
        self.animations
            .iter_mut()
            .flat_map(|(&animation_id, animation)| {
                animation
                    .drain_events()
                    .into_iter()
                    .map(move |event| TimelineEvent {
                        animation_id,
                        event,
                    })
            })
            .collect()
    }

    fn animation_mut(&mut self, id: AnimationId) -> Result<&mut Animation> {
        self.animations
            .get_mut(&id)
            .ok_or(AnimationError::UnknownAnimation(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::element::{AnimationTarget, Element};
    use crate::events::AnimationEvent;
    use crate::property::PropertyConfig;
    use crate::types::{Direction, StopReason};

    fn width_options(duration_ms: f64) -> AnimationOptions {
        AnimationOptions::new()
            .with_property(PropertyConfig::new("width", 0.0, 100.0, duration_ms).with_unit("px"))
    }

    #[test]
    fn test_add_applies_interval() {
        let mut timeline = Timeline::new(ManualClock::new()).with_interval(Duration::from_millis(10));
        let element = Element::new("div").into_shared();
        let id = timeline.create(element, width_options(100.0));

        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.get(id).unwrap().interval(), Duration::from_millis(10));
    }

    #[test]
    fn test_unknown_animation() {
        let mut timeline = Timeline::new(ManualClock::new());
        let missing = AnimationId(u64::MAX);

        assert!(matches!(
            timeline.start(missing),
            Err(AnimationError::UnknownAnimation(id)) if id == missing
        ));
        assert!(timeline.stop(missing).is_err());
        assert!(timeline.reverse(missing).is_err());
    }

    #[test]
    fn test_update_fires_due_timers() {
        let clock = ManualClock::new();
        let mut timeline = Timeline::new(clock.clone());
        let element = Element::new("div").into_shared();
        let id = timeline.create(element.clone(), width_options(160.0));
        timeline.start(id).unwrap();

        assert_eq!(timeline.update(), 0);
        clock.advance_ms(16);
        assert_eq!(timeline.update(), 1);
        assert_eq!(element.borrow().attribute("width"), Some("10px"));
        assert_eq!(timeline.next_deadline(), Some(clock.at(Duration::from_millis(32))));
    }

    #[test]
    fn test_run_until_idle_completes() {
        let clock = ManualClock::new();
        let mut timeline = Timeline::new(clock.clone());
        let element = Element::new("div").into_shared();
        let id = timeline.create(element.clone(), width_options(100.0));
        timeline.start(id).unwrap();

        let ticks = timeline.run_until_idle();

        // Deadlines at 16, 32, .., 112; the tick at 112 ms passes the 100 ms end.
        assert_eq!(ticks, 7);
        assert!(!timeline.has_playing());
        assert_eq!(clock.elapsed(), Duration::from_millis(112));
        assert_eq!(element.borrow().attribute("width"), Some("100px"));

        let events = timeline.drain_events();
        assert!(events.iter().all(|e| e.animation_id == id));
        assert_eq!(
            events.last().map(|e| &e.event),
            Some(&AnimationEvent::Stopped {
                reason: StopReason::Completed
            })
        );
    }

    #[test]
    fn test_reverse_through_timeline() {
        let clock = ManualClock::new();
        let mut timeline = Timeline::new(clock.clone());
        let element = Element::new("div").into_shared();
        let id = timeline.create(element.clone(), width_options(64.0));

        timeline.reverse(id).unwrap();
        timeline.start(id).unwrap();
        assert!(timeline.reverse(id).is_err());
        assert_eq!(timeline.get(id).unwrap().direction(), Direction::Backward);

        timeline.run_until_idle();
        assert_eq!(element.borrow().attribute("width"), Some("0px"));
    }

    #[test]
    fn test_remove_stops_animation() {
        let mut timeline = Timeline::new(ManualClock::new());
        let element = Element::new("div").into_shared();
        let id = timeline.create(element, width_options(100.0));
        timeline.start(id).unwrap();

        let removed = timeline.remove(id).unwrap();
        assert!(!removed.is_playing());
        assert!(timeline.is_empty());
        assert!(timeline.next_deadline().is_none());
    }

    #[test]
    fn test_stop_all() {
        let clock = ManualClock::new();
        let mut timeline = Timeline::new(clock.clone());
        let a = timeline.create(Element::new("a").into_shared(), width_options(100.0));
        let b = timeline.create(Element::new("b").into_shared(), width_options(200.0));
        timeline.start(a).unwrap();
        timeline.start(b).unwrap();
        assert_eq!(timeline.playing_count(), 2);

        timeline.stop_all();
        assert!(!timeline.has_playing());
        assert_eq!(timeline.run_until_idle(), 0);
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }
}
