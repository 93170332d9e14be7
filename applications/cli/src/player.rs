//! Playback loop
//!
//! Feeds session reports into the controller until the active playlist
//! ends, the track limit is hit, or the user interrupts.

use crate::error::{CliError, Result};
use cadence_core::{format_time, Track};
use cadence_playback::{
    PlaybackController, PlaybackEvent, PlaybackSession, ReportKind, ReportReceiver,
    SessionHandle, TransportState,
};
use std::future::Future;
use tracing::{debug, info, warn};

/// Options for one playback run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Stop after this many tracks have started
    pub max_tracks: Option<usize>,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Sequencing ran out of tracks
    PlaylistEnded,
    /// `max_tracks` reached
    TrackLimit,
    /// Shutdown signal received
    Interrupted,
    /// The report channel closed
    SessionClosed,
}

/// Outcome of a playback run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Tracks started, in order
    pub played: Vec<Track>,
    pub reason: StopReason,
}

/// Load `library`, start playback and drive it until it stops
///
/// `shutdown` resolves when the user asks to quit (Ctrl-C in the binary).
pub async fn run<S, F>(
    controller: &mut PlaybackController<S>,
    library: Vec<Track>,
    mut reports: ReportReceiver,
    options: RunOptions,
    shutdown: F,
) -> Result<RunSummary>
where
    S: PlaybackSession,
    F: Future<Output = ()>,
{
    controller
        .dispatch(PlaybackEvent::ReplaceLibrary(library.clone()))
        .await?;
    controller
        .dispatch(PlaybackEvent::SetActivePlaylist(library))
        .await?;

    if options.max_tracks == Some(0) {
        info!("Track limit is zero, nothing to start");
        return Ok(RunSummary {
            played: Vec::new(),
            reason: StopReason::TrackLimit,
        });
    }

    controller.next().await?;
    if controller.state().current_track().is_none() {
        return Err(CliError::NothingToPlay);
    }

    let mut tracker = StartTracker::default();
    tracker.observe(controller);

    tokio::pin!(shutdown);
    let reason = loop {
        tokio::select! {
            () = &mut shutdown => {
                info!("Interrupted");
                break StopReason::Interrupted;
            }
            report = reports.recv() => {
                let Some(report) = report else {
                    break StopReason::SessionClosed;
                };

                let finishing = report.kind == ReportKind::Finished
                    && controller.active_session() == Some(report.session);
                if finishing && options.max_tracks.is_some_and(|max| tracker.played.len() >= max) {
                    break StopReason::TrackLimit;
                }

                if let Err(e) = controller.handle_report(report).await {
                    // Load failures surface here; the state still holds the last good track
                    warn!(error = %e, "Could not advance");
                    controller.shutdown().await;
                    return Err(e.into());
                }

                if let Some(current) = controller.state().current_track() {
                    debug!(
                        track_id = %current.id,
                        position = %format_time(controller.state().position_ms()),
                        duration = %format_time(controller.state().duration_ms()),
                        "Tick"
                    );
                }

                tracker.observe(controller);
                if controller.state().transport() == TransportState::Stopped {
                    break StopReason::PlaylistEnded;
                }
            }
        }
    };

    controller.shutdown().await;

    let played = tracker.played;
    info!(tracks = played.len(), reason = ?reason, "Playback finished");
    Ok(RunSummary { played, reason })
}

/// Records a track each time a new session is loaded
#[derive(Default)]
struct StartTracker {
    last: Option<SessionHandle>,
    played: Vec<Track>,
}

impl StartTracker {
    fn observe<S: PlaybackSession>(&mut self, controller: &PlaybackController<S>) {
        let active = controller.active_session();
        if active.is_none() || active == self.last {
            return;
        }
        self.last = active;

        if let Some(track) = controller.state().current_track() {
            println!("Now playing: {} - {}", track.artist, track.title);
            self.played.push(track.clone());
        }
    }
}
