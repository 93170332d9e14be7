//! Error types for playback management

use thiserror::Error;

/// Playback errors
///
/// An empty active playlist is not an error: the sequencing engine answers
/// `None` and callers treat that as "nothing to play".
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The session adapter could not open or play a locator
    #[error("Playback unavailable for {locator}: {reason}")]
    PlaybackUnavailable { locator: String, reason: String },

    /// Event referenced something the state does not know about
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// A session operation failed after the track was loaded
    #[error("Session error: {0}")]
    Session(String),
}

impl PlaybackError {
    /// Create a playback unavailable error
    pub fn unavailable(locator: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PlaybackUnavailable {
            locator: locator.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid transition error
    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        Self::InvalidTransition(msg.into())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
