//! Error types for animation playback.

use thiserror::Error;

use crate::types::AnimationId;

/// Result type for animation operations.
pub type Result<T> = std::result::Result<T, AnimationError>;

/// Errors that can occur while configuring or driving animations.
#[derive(Error, Debug)]
pub enum AnimationError {
    /// Operation not permitted in the current playback state.
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),

    /// `start()` called on an animation whose timer is already armed.
    #[error("animation is already playing")]
    AlreadyPlaying,

    /// No animation with this ID is registered on the timeline.
    #[error("unknown animation {0}")]
    UnknownAnimation(AnimationId),

    /// Animation description is not valid JSON.
    #[error("invalid animation description: {0}")]
    InvalidDescription(#[from] serde_json::Error),
}
