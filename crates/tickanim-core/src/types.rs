//! Core animation types.
//!
//! - `AnimationId`: unique identifier for animations
//! - `Direction`: playback sense (forward or backward)
//! - `PlaybackState`: whether an animation's timer is armed
//! - `StopReason`: why playback ended

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for an animation instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AnimationId(pub u64);

impl AnimationId {
    /// Generate a new unique animation ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for AnimationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnimationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Playback direction of an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Elapsed time grows from zero towards each property's duration.
    Forward,
    /// Position shrinks from each property's full duration towards zero.
    Backward,
}

impl Default for Direction {
    fn default() -> Self {
        Self::Forward
    }
}

impl Direction {
    /// Map a signed direction value: negative values play backward, anything else forward.
    pub fn from_sign(sign: i64) -> Self {
        if sign < 0 { Self::Backward } else { Self::Forward }
    }

    /// `1` for forward, `-1` for backward.
    pub fn sign(self) -> i32 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }

    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// Whether an animation is currently driving its properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// Not playing. Initial state, and the state after every stop.
    Idle,
    /// Timer armed; every tick advances the active properties.
    Playing,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Why an animation left the playing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Every property reported that it reached its end state.
    Completed,
    /// `stop()` was called while properties were still running.
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_id_uniqueness() {
        let id1 = AnimationId::new();
        let id2 = AnimationId::new();
        let id3 = AnimationId::new();

        assert_ne!(id1, id2);
        assert_ne!(id2, id3);
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_direction_from_sign() {
        assert_eq!(Direction::from_sign(1), Direction::Forward);
        assert_eq!(Direction::from_sign(0), Direction::Forward);
        assert_eq!(Direction::from_sign(-1), Direction::Backward);
        assert_eq!(Direction::from_sign(-7), Direction::Backward);
    }

    #[test]
    fn test_direction_reversal() {
        assert_eq!(Direction::Forward.reversed(), Direction::Backward);
        assert_eq!(Direction::Backward.reversed().sign(), 1);
        assert_eq!(Direction::default().sign(), 1);
    }

    #[test]
    fn test_playback_state_default() {
        assert_eq!(PlaybackState::default(), PlaybackState::Idle);
    }
}
