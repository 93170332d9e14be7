//! Playback session adapter contract
//!
//! Abstracts the platform player (decoding, buffering, audio routing) that
//! the controller drives. Implementors open one locator per session and
//! report transport status back over a [`ReportSender`].
//!
//! Units match the platform players this was designed against: positions in
//! milliseconds, volume as a 0.0-1.0 fraction.

use crate::error::Result;
use async_trait::async_trait;
use std::fmt;
use tokio::sync::mpsc;

/// Tag identifying one loaded session
///
/// Every report carries the handle of the session that produced it, which
/// lets the controller drop reports from sessions it already unloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionHandle(u64);

impl SessionHandle {
    /// Wrap a raw handle value
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw handle value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Platform playback session
///
/// `load` may be slow; the controller awaits each call and never has more
/// than one session loaded.
#[async_trait]
pub trait PlaybackSession: Send + Sync {
    /// Open `locator` and start playing at `initial_volume`
    ///
    /// # Returns
    /// * `Ok(handle)` - Session loaded and playing
    /// * `Err(PlaybackUnavailable)` - Locator could not be opened
    async fn load(&self, locator: &str, initial_volume: f32) -> Result<SessionHandle>;

    /// Pause the session
    async fn pause(&self, handle: SessionHandle) -> Result<()>;

    /// Resume the session
    async fn resume(&self, handle: SessionHandle) -> Result<()>;

    /// Seek to position (in milliseconds)
    async fn seek(&self, handle: SessionHandle, position_ms: u64) -> Result<()>;

    /// Set volume (0.0-1.0)
    async fn set_volume(&self, handle: SessionHandle, volume: f32) -> Result<()>;

    /// Release the session; it must stop reporting afterwards
    async fn unload(&self, handle: SessionHandle) -> Result<()>;
}

/// What a session reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Periodic status update
    Tick {
        /// Current position in milliseconds
        position_ms: u64,
        /// Total duration in milliseconds (0 when unknown)
        duration_ms: u64,
        /// Whether audio is being produced
        is_playing: bool,
    },

    /// Track played to its end
    Finished,
}

/// Transport report tagged with its session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportReport {
    /// Session that produced the report
    pub session: SessionHandle,
    /// Report payload
    pub kind: ReportKind,
}

impl TransportReport {
    /// Tick report
    pub fn tick(session: SessionHandle, position_ms: u64, duration_ms: u64, is_playing: bool) -> Self {
        Self {
            session,
            kind: ReportKind::Tick {
                position_ms,
                duration_ms,
                is_playing,
            },
        }
    }

    /// Finished report
    pub fn finished(session: SessionHandle) -> Self {
        Self {
            session,
            kind: ReportKind::Finished,
        }
    }
}

/// Sending half handed to session implementations
pub type ReportSender = mpsc::UnboundedSender<TransportReport>;

/// Receiving half polled by the host event loop
pub type ReportReceiver = mpsc::UnboundedReceiver<TransportReport>;

/// Create the report channel shared by a session and its host
///
/// Unbounded so a session never blocks while emitting ticks.
pub fn report_channel() -> (ReportSender, ReportReceiver) {
    mpsc::unbounded_channel()
}
