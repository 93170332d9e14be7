//! Cadence - Playback Sequencing
//!
//! Platform-agnostic playback management for Cadence.
//!
//! This crate provides:
//! - Playback state snapshot (current track, active playlist, transport, volume)
//! - Sequencing engine (next/previous with shuffle cycles and repeat modes)
//! - Transition reducer (pure `apply(state, event) -> state'`)
//! - Playback session contract for the platform player
//! - `PlaybackController`, the single mutable owner the UI talks to
//!
//! # Architecture
//!
//! `cadence-playback` never decodes audio. Platform code implements
//! [`PlaybackSession`]; the controller issues load/pause/resume/seek/volume
//! intents and consumes the tick/finished reports the session sends back.
//!
//! # Example: Sequencing without a player
//!
//! ```rust
//! use cadence_core::{Track, TrackId};
//! use cadence_playback::{compute_next, PlaybackEvent, PlaybackState, RepeatMode, SequenceRandom};
//!
//! let tracks: Vec<Track> = ["a", "b", "c"]
//!     .iter()
//!     .map(|id| Track::new(TrackId::new(*id), id.to_uppercase(), format!("/music/{id}.mp3")))
//!     .collect();
//!
//! let mut rng = SequenceRandom::default();
//! let state = PlaybackState::default()
//!     .apply(PlaybackEvent::SetActivePlaylist(tracks.clone()), &mut rng)
//!     .unwrap()
//!     .apply(PlaybackEvent::StartTrack(tracks[2].clone()), &mut rng)
//!     .unwrap();
//!
//! // End of the playlist with repeat off: nothing to play
//! assert!(compute_next(&state, &mut rng).is_none());
//!
//! let state = state
//!     .apply(PlaybackEvent::SetRepeatMode(RepeatMode::All), &mut rng)
//!     .unwrap();
//! assert_eq!(compute_next(&state, &mut rng).unwrap().track.id.as_str(), "a");
//! ```
//!
//! # Example: Platform Integration
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use cadence_playback::{
//!     PlaybackConfig, PlaybackController, PlaybackSession, Result, SessionHandle,
//! };
//!
//! struct MyPlayer;
//!
//! #[async_trait]
//! impl PlaybackSession for MyPlayer {
//!     async fn load(&self, locator: &str, initial_volume: f32) -> Result<SessionHandle> {
//!         // Open the locator with the platform player
//!         Ok(SessionHandle::new(1))
//!     }
//!     async fn pause(&self, _handle: SessionHandle) -> Result<()> { Ok(()) }
//!     async fn resume(&self, _handle: SessionHandle) -> Result<()> { Ok(()) }
//!     async fn seek(&self, _handle: SessionHandle, _position_ms: u64) -> Result<()> { Ok(()) }
//!     async fn set_volume(&self, _handle: SessionHandle, _volume: f32) -> Result<()> { Ok(()) }
//!     async fn unload(&self, _handle: SessionHandle) -> Result<()> { Ok(()) }
//! }
//!
//! # async fn run() -> Result<()> {
//! let mut controller = PlaybackController::new(MyPlayer, &PlaybackConfig::default());
//! controller.next().await?;
//! # Ok(())
//! # }
//! ```

mod controller;
mod error;
mod random;
mod reducer;
mod sequencer;
mod session;
mod state;
pub mod types;

// Public exports
pub use controller::PlaybackController;
pub use error::{PlaybackError, Result};
pub use random::{RandomSource, SeededRandom, SequenceRandom, ThreadRandom};
pub use reducer::{apply, PlaybackEvent};
pub use sequencer::{compute_next, compute_previous, Selection};
pub use session::{
    report_channel, PlaybackSession, ReportKind, ReportReceiver, ReportSender, SessionHandle,
    TransportReport,
};
pub use state::PlaybackState;
pub use types::{PlaybackConfig, RepeatMode, TransportState};
