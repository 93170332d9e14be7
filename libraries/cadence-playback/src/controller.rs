//! Playback controller - single entry point for the UI layer
//!
//! Owns the only mutable `PlaybackState` and the platform session. Every UI
//! action and every transport report goes through here:
//! - pure events are applied through the reducer
//! - track starts stage the next state, load the session, then commit
//! - transport calls go to the session first and commit on success
//!
//! Starting a track always unloads the previous session before loading the
//! next one, so at most one session is ever loaded. Reports tagged with any
//! other session are dropped.

use crate::{
    error::Result,
    random::{RandomSource, ThreadRandom},
    reducer::{apply, PlaybackEvent},
    sequencer::{compute_next, compute_previous},
    session::{PlaybackSession, ReportKind, SessionHandle, TransportReport},
    state::PlaybackState,
    types::PlaybackConfig,
};
use cadence_core::Track;
use tracing::{debug, info, warn};

/// Drives a `PlaybackSession` from reducer state
pub struct PlaybackController<S: PlaybackSession> {
    state: PlaybackState,
    session: S,
    active: Option<SessionHandle>,
    rng: Box<dyn RandomSource + Send>,
}

impl<S: PlaybackSession> PlaybackController<S> {
    /// Create a controller using the thread RNG for shuffle
    pub fn new(session: S, config: &PlaybackConfig) -> Self {
        Self::with_random(session, config, ThreadRandom)
    }

    /// Create a controller with an explicit random source
    pub fn with_random(
        session: S,
        config: &PlaybackConfig,
        rng: impl RandomSource + Send + 'static,
    ) -> Self {
        Self {
            state: PlaybackState::new(config),
            session,
            active: None,
            rng: Box::new(rng),
        }
    }

    /// Current state snapshot
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// The platform session
    pub fn session(&self) -> &S {
        &self.session
    }

    /// Handle of the loaded session, if any
    pub fn active_session(&self) -> Option<SessionHandle> {
        self.active
    }

    // ===== Event entry point =====

    /// Apply a UI event
    ///
    /// Transport events are routed to the matching controller operation so
    /// the session and the state never drift apart.
    pub async fn dispatch(&mut self, event: PlaybackEvent) -> Result<()> {
        match event {
            PlaybackEvent::StartTrack(track) => self.play_track(track, None).await,
            PlaybackEvent::TrackFinished => self.advance_after_finish().await,
            PlaybackEvent::Pause => self.pause().await,
            PlaybackEvent::Resume => self.resume().await,
            PlaybackEvent::Stop => self.stop().await,
            PlaybackEvent::Seek(position_ms) => self.seek(position_ms).await,
            PlaybackEvent::SetVolume(volume) => self.set_volume(volume).await,
            PlaybackEvent::SetActivePlaylist(tracks) => {
                self.commit(PlaybackEvent::SetActivePlaylist(tracks))?;
                if self.state.current_track().is_none() {
                    self.release().await;
                }
                Ok(())
            }
            other => self.commit(other),
        }
    }

    // ===== Playback Control =====

    /// Play `track`, optionally replacing the active playlist first
    ///
    /// Nothing is committed unless the session loads.
    pub async fn play_track(&mut self, track: Track, playlist: Option<Vec<Track>>) -> Result<()> {
        let mut staged = self.state.clone();
        if let Some(tracks) = playlist {
            staged = apply(&staged, PlaybackEvent::SetActivePlaylist(tracks), self.rng.as_mut())?;
        }
        let staged = apply(&staged, PlaybackEvent::StartTrack(track), self.rng.as_mut())?;
        self.load_and_commit(staged).await
    }

    /// Skip to the next track
    ///
    /// A no-op when the sequencing engine has nothing to offer.
    #[allow(clippy::should_implement_trait)]
    pub async fn next(&mut self) -> Result<()> {
        match self.stage_next()? {
            Some(staged) => self.load_and_commit(staged).await,
            None => {
                debug!("No next track");
                Ok(())
            }
        }
    }

    /// Go to the previous track
    pub async fn previous(&mut self) -> Result<()> {
        let Some(track) = compute_previous(&self.state) else {
            debug!("No previous track");
            return Ok(());
        };
        let staged = apply(&self.state, PlaybackEvent::StartTrack(track), self.rng.as_mut())?;
        self.load_and_commit(staged).await
    }

    /// Pause playback
    pub async fn pause(&mut self) -> Result<()> {
        if let Some(handle) = self.active {
            self.session.pause(handle).await?;
        }
        self.commit(PlaybackEvent::Pause)
    }

    /// Resume playback
    ///
    /// After a stop the session is gone, so the current track is reloaded
    /// from the start.
    pub async fn resume(&mut self) -> Result<()> {
        let Some(current) = self.state.current_track().cloned() else {
            debug!("Nothing to resume");
            return Ok(());
        };

        match self.active {
            Some(handle) => {
                self.session.resume(handle).await?;
                self.commit(PlaybackEvent::Resume)
            }
            None => {
                let staged = apply(&self.state, PlaybackEvent::StartTrack(current), self.rng.as_mut())?;
                self.load_and_commit(staged).await
            }
        }
    }

    /// Stop playback
    ///
    /// Unloads the session and rewinds; the current track is kept.
    pub async fn stop(&mut self) -> Result<()> {
        self.release().await;
        self.commit(PlaybackEvent::Stop)
    }

    /// Seek to position (in milliseconds), clamped to the track duration
    pub async fn seek(&mut self, position_ms: u64) -> Result<()> {
        let staged = apply(&self.state, PlaybackEvent::Seek(position_ms), self.rng.as_mut())?;
        if let Some(handle) = self.active {
            self.session.seek(handle, staged.position_ms()).await?;
        }
        self.state = staged;
        Ok(())
    }

    /// Set volume (0.0-1.0), clamped
    pub async fn set_volume(&mut self, volume: f32) -> Result<()> {
        let staged = apply(&self.state, PlaybackEvent::SetVolume(volume), self.rng.as_mut())?;
        if let Some(handle) = self.active {
            self.session.set_volume(handle, staged.volume()).await?;
        }
        self.state = staged;
        Ok(())
    }

    // ===== Transport reports =====

    /// Feed a report from the session back into the state
    ///
    /// Reports from sessions other than the loaded one are late arrivals
    /// from a superseded track and are dropped.
    pub async fn handle_report(&mut self, report: TransportReport) -> Result<()> {
        if self.active != Some(report.session) {
            debug!(session = %report.session, "Discarding report from inactive session");
            return Ok(());
        }

        match report.kind {
            ReportKind::Tick {
                position_ms,
                duration_ms,
                is_playing,
            } => self.commit(PlaybackEvent::TransportTick {
                position_ms,
                duration_ms,
                is_playing,
            }),
            ReportKind::Finished => self.advance_after_finish().await,
        }
    }

    /// Unload the session; the state is left as is
    pub async fn shutdown(&mut self) {
        self.release().await;
    }

    // ===== Internals =====

    fn commit(&mut self, event: PlaybackEvent) -> Result<()> {
        self.state = apply(&self.state, event, self.rng.as_mut())?;
        Ok(())
    }

    /// State with the next track started, or `None` when playback should stop
    fn stage_next(&mut self) -> Result<Option<PlaybackState>> {
        let Some(selection) = compute_next(&self.state, self.rng.as_mut()) else {
            return Ok(None);
        };

        let mut staged = self.state.clone();
        if selection.cycle_exhausted {
            staged = apply(&staged, PlaybackEvent::CycleExhausted, self.rng.as_mut())?;
        }
        let staged = apply(&staged, PlaybackEvent::StartTrack(selection.track), self.rng.as_mut())?;
        Ok(Some(staged))
    }

    async fn advance_after_finish(&mut self) -> Result<()> {
        match self.stage_next()? {
            Some(staged) => self.load_and_commit(staged).await,
            None => {
                info!("End of active playlist");
                self.release().await;
                self.commit(PlaybackEvent::TrackFinished)
            }
        }
    }

    /// Swap sessions for the staged current track and commit on success
    async fn load_and_commit(&mut self, staged: PlaybackState) -> Result<()> {
        let Some(track) = staged.current_track().cloned() else {
            self.state = staged;
            return Ok(());
        };

        self.commit(PlaybackEvent::SetLoading(true))?;
        self.release().await;

        match self.session.load(&track.locator, staged.volume()).await {
            Ok(handle) => {
                info!(
                    track_id = %track.id,
                    title = %track.title,
                    artist = %track.artist,
                    session = %handle,
                    "Started track"
                );
                self.active = Some(handle);
                self.state = staged;
                Ok(())
            }
            Err(e) => {
                warn!(track_id = %track.id, error = %e, "Failed to load track");
                self.commit(PlaybackEvent::SetLoading(false))?;
                Err(e)
            }
        }
    }

    async fn release(&mut self) {
        if let Some(handle) = self.active.take() {
            if let Err(e) = self.session.unload(handle).await {
                warn!(session = %handle, error = %e, "Failed to unload session");
            }
        }
    }
}
