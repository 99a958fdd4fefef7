//! Time-based attribute animation for document elements.
//!
//! This crate provides:
//! - **Animation**: drives a fixed set of properties of one element from a
//!   recurring timer, forward or backward, until every property finishes
//! - **Properties**: the `AnimatedProperty` contract and a linear numeric
//!   attribute implementation
//! - **Timeline**: a host loop that owns animations and fires their timers
//! - **Events**: lifecycle notifications drained after ticks
//!
//! # Architecture
//!
//! ```text
//! Timeline (Clock)
//!   └── Animation (IntervalTimer, Direction, time scale)
//!         ├── AnimatedProperty × N ──writes──▶ AnimationTarget (Element)
//!         └── EventQueue
//! ```

pub mod animation;
pub mod clock;
pub mod element;
pub mod error;
pub mod events;
pub mod interpolate;
pub mod options;
pub mod property;
pub mod timeline;
pub mod timer;
pub mod types;

pub use animation::Animation;
pub use clock::{Clock, ManualClock, SystemClock};
pub use element::{AnimationTarget, Element, SharedTarget};
pub use error::{AnimationError, Result};
pub use events::{AnimationEvent, EventQueue, TimelineEvent};
pub use interpolate::Interpolate;
pub use options::AnimationOptions;
pub use property::{AnimatedProperty, AttributeProperty, PlaybackContext, PropertyConfig};
pub use timeline::Timeline;
pub use timer::{DEFAULT_TICK_INTERVAL, IntervalTimer};
pub use types::{AnimationId, Direction, PlaybackState, StopReason};
