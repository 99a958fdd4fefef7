//! Animation lifecycle events.
//!
//! Each animation records its lifecycle in an [`EventQueue`]; hosts drain it
//! after driving ticks.
//!
//! ```ignore
//! timeline.update();
//! for TimelineEvent { animation_id, event } in timeline.drain_events() {
//!     if let AnimationEvent::Stopped { reason: StopReason::Completed } = event {
//!         println!("{animation_id} finished");
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::types::{AnimationId, Direction, StopReason};

/// Event emitted when an animation changes state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnimationEvent {
    /// Playback started and the timer was armed.
    Started {
        direction: Direction,
        /// Number of properties made active.
        property_count: usize,
    },
    /// One property reached its end state and left the active set.
    PropertyFinished {
        /// Index of the property in construction order.
        property_index: usize,
        /// Position passed to the property on its final tick.
        elapsed_ms: f64,
    },
    /// Playback stopped and the timer was cancelled.
    Stopped { reason: StopReason },
}

impl AnimationEvent {
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started { .. })
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::Stopped { .. })
    }

    /// Stop reason, for `Stopped` events.
    pub fn stop_reason(&self) -> Option<StopReason> {
        match self {
            Self::Stopped { reason } => Some(*reason),
            _ => None,
        }
    }
}

/// An animation event tagged with the animation that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub animation_id: AnimationId,
    pub event: AnimationEvent,
}

/// Queue for collecting animation events during ticks.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<AnimationEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: AnimationEvent) {
        self.events.push_back(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Pop the next event from the queue.
    pub fn pop(&mut self) -> Option<AnimationEvent> {
        self.events.pop_front()
    }

    /// Drain all events from the queue, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = AnimationEvent> + '_ {
        self.events.drain(..)
    }

    pub fn peek(&self) -> Option<&AnimationEvent> {
        self.events.front()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_predicates() {
        let started = AnimationEvent::Started {
            direction: Direction::Forward,
            property_count: 2,
        };
        assert!(started.is_started());
        assert!(!started.is_stopped());
        assert_eq!(started.stop_reason(), None);

        let stopped = AnimationEvent::Stopped {
            reason: StopReason::Completed,
        };
        assert!(stopped.is_stopped());
        assert_eq!(stopped.stop_reason(), Some(StopReason::Completed));
    }

    #[test]
    fn test_event_queue_operations() {
        let mut queue = EventQueue::new();
        assert!(queue.is_empty());

        queue.push(AnimationEvent::Started {
            direction: Direction::Backward,
            property_count: 1,
        });
        queue.push(AnimationEvent::Stopped {
            reason: StopReason::Cancelled,
        });
        assert_eq!(queue.len(), 2);
        assert!(queue.peek().is_some_and(AnimationEvent::is_started));

        assert!(queue.pop().is_some_and(|e| e.is_started()));
        let rest: Vec<_> = queue.drain().collect();
        assert_eq!(rest.len(), 1);
        assert!(queue.is_empty());
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_event_serialization() {
        let event = AnimationEvent::PropertyFinished {
            property_index: 3,
            elapsed_ms: 120.0,
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("property_finished"));
        assert!(json.contains("property_index"));

        let parsed: AnimationEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, parsed);
    }
}
