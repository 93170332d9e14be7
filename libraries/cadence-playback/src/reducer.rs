//! Transition reducer
//!
//! Applies discrete events to a `PlaybackState`, producing a new snapshot.
//! The input is never modified; a rejected event leaves the caller holding
//! the prior state.

use crate::error::{PlaybackError, Result};
use crate::random::RandomSource;
use crate::sequencer::compute_next;
use crate::state::PlaybackState;
use crate::types::{RepeatMode, TransportState};
use cadence_core::{Playlist, PlaylistId, Track, TrackId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Events accepted by the reducer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Replace the library; seeds the active playlist when it is empty
    ReplaceLibrary(Vec<Track>),

    /// Replace the active playlist and start a new shuffle cycle
    SetActivePlaylist(Vec<Track>),

    /// Start a track from the active playlist
    StartTrack(Track),

    /// Status reported by the playback session
    TransportTick {
        /// Position in milliseconds
        position_ms: u64,
        /// Duration in milliseconds (0 when unknown)
        duration_ms: u64,
        /// Whether the session is producing audio
        is_playing: bool,
    },

    /// The current track played to its end
    TrackFinished,

    /// Pause playback
    Pause,

    /// Resume playback
    Resume,

    /// Stop playback and rewind, keeping the current track
    Stop,

    /// A track load started or completed
    SetLoading(bool),

    /// Seek to position (in milliseconds)
    Seek(u64),

    /// Set volume (0.0-1.0)
    SetVolume(f32),

    /// Flip shuffle
    ToggleShuffle,

    /// Set repeat mode
    SetRepeatMode(RepeatMode),

    /// Every track in the shuffle cycle has been played
    CycleExhausted,

    /// Add a playlist to the collection
    AddPlaylist(Playlist),

    /// Remove a playlist from the collection
    DeletePlaylist(PlaylistId),
}

/// Apply `event` to `state`, returning the next snapshot
///
/// `InvalidTransition` errors are logged here; callers keep the prior state.
pub fn apply(
    state: &PlaybackState,
    event: PlaybackEvent,
    rng: &mut dyn RandomSource,
) -> Result<PlaybackState> {
    let mut next = state.clone();
    let result = reduce(&mut next, event, rng);

    match result {
        Ok(()) => Ok(next),
        Err(e) => {
            warn!(error = %e, "Rejected playback event");
            Err(e)
        }
    }
}

impl PlaybackState {
    /// Apply an event, returning the next snapshot
    ///
    /// See [`apply`].
    pub fn apply(&self, event: PlaybackEvent, rng: &mut dyn RandomSource) -> Result<Self> {
        apply(self, event, rng)
    }
}

fn reduce(
    state: &mut PlaybackState,
    event: PlaybackEvent,
    rng: &mut dyn RandomSource,
) -> Result<()> {
    match event {
        PlaybackEvent::ReplaceLibrary(tracks) => {
            let tracks = dedup_by_id(tracks);
            if state.active_playlist.is_empty() {
                state.active_playlist = tracks.clone();
                state.played_ids.clear();
            }
            state.library = tracks;
        }

        PlaybackEvent::SetActivePlaylist(tracks) => {
            state.active_playlist = dedup_by_id(tracks);
            state.played_ids.clear();

            let orphaned = state
                .current_track
                .as_ref()
                .is_some_and(|current| state.index_of(&current.id).is_none());
            if orphaned {
                debug!("Current track not in new active playlist, stopping");
                state.current_track = None;
                state.transport = TransportState::Stopped;
                state.position_ms = 0;
                state.duration_ms = 0;
            }
        }

        PlaybackEvent::StartTrack(track) => start_track(state, &track.id)?,

        PlaybackEvent::TransportTick {
            position_ms,
            duration_ms,
            is_playing,
        } => {
            if state.current_track.is_none() {
                debug!("Ignoring transport tick with no current track");
                return Ok(());
            }
            state.duration_ms = duration_ms;
            state.position_ms = clamp_position(position_ms, duration_ms);
            state.transport = match (is_playing, state.transport) {
                (true, _) => TransportState::Playing,
                (false, TransportState::Playing) => TransportState::Paused,
                (false, other) => other,
            };
        }

        PlaybackEvent::TrackFinished => match compute_next(state, rng) {
            Some(selection) => {
                if selection.cycle_exhausted {
                    state.played_ids.clear();
                }
                start_track(state, &selection.track.id)?;
            }
            None => {
                debug!("Nothing left to play, stopping");
                state.transport = TransportState::Stopped;
                state.position_ms = 0;
            }
        },

        PlaybackEvent::Pause => {
            if state.transport == TransportState::Playing {
                state.transport = TransportState::Paused;
            }
        }

        PlaybackEvent::Resume => {
            if state.current_track.is_some() {
                state.transport = TransportState::Playing;
            } else {
                debug!("Resume with no current track ignored");
            }
        }

        PlaybackEvent::Stop => {
            state.transport = TransportState::Stopped;
            state.position_ms = 0;
        }

        PlaybackEvent::SetLoading(loading) => state.is_loading = loading,

        PlaybackEvent::Seek(position_ms) => {
            state.position_ms = clamp_position(position_ms, state.duration_ms);
        }

        PlaybackEvent::SetVolume(volume) => {
            state.volume = if volume.is_nan() {
                0.0
            } else {
                volume.clamp(0.0, 1.0)
            };
        }

        PlaybackEvent::ToggleShuffle => state.is_shuffled = !state.is_shuffled,

        PlaybackEvent::SetRepeatMode(mode) => state.repeat_mode = mode,

        PlaybackEvent::CycleExhausted => state.played_ids.clear(),

        PlaybackEvent::AddPlaylist(playlist) => {
            if state.playlists.iter().any(|p| p.id == playlist.id) {
                return Err(PlaybackError::invalid_transition(format!(
                    "playlist {} already exists",
                    playlist.id
                )));
            }
            state.playlists.push(playlist);
        }

        PlaybackEvent::DeletePlaylist(id) => {
            let before = state.playlists.len();
            state.playlists.retain(|p| p.id != id);
            if state.playlists.len() == before {
                return Err(PlaybackError::invalid_transition(format!(
                    "unknown playlist {}",
                    id
                )));
            }
        }
    }

    Ok(())
}

/// Make the active-playlist entry with `id` current and start it
fn start_track(state: &mut PlaybackState, id: &TrackId) -> Result<()> {
    let Some(index) = state.index_of(id) else {
        return Err(PlaybackError::invalid_transition(format!(
            "track {} is not in the active playlist",
            id
        )));
    };

    let track = state.active_playlist[index].clone();
    state.duration_ms = track.duration_ms.unwrap_or(0);
    state.played_ids.insert(track.id.clone());
    state.current_track = Some(track);
    state.transport = TransportState::Playing;
    state.position_ms = 0;
    Ok(())
}

/// Clamp into `[0, duration]`; an unknown (zero) duration bounds nothing
fn clamp_position(position_ms: u64, duration_ms: u64) -> u64 {
    if duration_ms == 0 {
        position_ms
    } else {
        position_ms.min(duration_ms)
    }
}

fn dedup_by_id(tracks: Vec<Track>) -> Vec<Track> {
    let total = tracks.len();
    let mut seen = HashSet::with_capacity(total);
    let unique: Vec<Track> = tracks
        .into_iter()
        .filter(|track| seen.insert(track.id.clone()))
        .collect();

    if unique.len() != total {
        debug!(dropped = total - unique.len(), "Dropped tracks with duplicate ids");
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceRandom;

    fn track(id: &str) -> Track {
        Track::new(TrackId::new(id), id.to_uppercase(), format!("/music/{}.mp3", id))
    }

    fn tracks(ids: &[&str]) -> Vec<Track> {
        ids.iter().map(|id| track(id)).collect()
    }

    fn step(state: &PlaybackState, event: PlaybackEvent) -> PlaybackState {
        apply(state, event, &mut SequenceRandom::default()).unwrap()
    }

    fn playing(ids: &[&str], current: &str) -> PlaybackState {
        let state = step(
            &PlaybackState::default(),
            PlaybackEvent::SetActivePlaylist(tracks(ids)),
        );
        step(&state, PlaybackEvent::StartTrack(track(current)))
    }

    #[test]
    fn apply_does_not_mutate_input() {
        let state = PlaybackState::default();
        let next = step(&state, PlaybackEvent::SetVolume(0.3));
        assert_eq!(state.volume(), 1.0);
        assert_eq!(next.volume(), 0.3);
    }

    #[test]
    fn replace_library_seeds_empty_active_playlist() {
        let state = step(
            &PlaybackState::default(),
            PlaybackEvent::ReplaceLibrary(tracks(&["a", "b"])),
        );
        assert_eq!(state.library().len(), 2);
        assert_eq!(state.active_playlist().len(), 2);

        // A second import leaves the active playlist alone
        let state = step(&state, PlaybackEvent::ReplaceLibrary(tracks(&["a", "b", "c"])));
        assert_eq!(state.library().len(), 3);
        assert_eq!(state.active_playlist().len(), 2);
    }

    #[test]
    fn replace_library_drops_duplicate_ids() {
        let state = step(
            &PlaybackState::default(),
            PlaybackEvent::ReplaceLibrary(tracks(&["a", "b", "a"])),
        );
        assert_eq!(state.library().len(), 2);
    }

    #[test]
    fn start_track_sets_transport_and_history() {
        let state = playing(&["a", "b"], "b");
        assert_eq!(state.current_track().unwrap().id.as_str(), "b");
        assert!(state.is_playing());
        assert_eq!(state.position_ms(), 0);
        assert!(state.has_played(&TrackId::new("b")));
    }

    #[test]
    fn start_unknown_track_is_rejected() {
        let state = playing(&["a", "b"], "a");
        let err = apply(
            &state,
            PlaybackEvent::StartTrack(track("zzz")),
            &mut SequenceRandom::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PlaybackError::InvalidTransition(_)));
    }

    #[test]
    fn set_active_playlist_clears_played_ids() {
        let state = playing(&["a", "b"], "a");
        let state = step(&state, PlaybackEvent::SetActivePlaylist(tracks(&["a", "c"])));
        assert!(state.played_ids().is_empty());
        assert_eq!(state.current_track().unwrap().id.as_str(), "a");
        assert!(state.is_playing());
    }

    #[test]
    fn set_active_playlist_without_current_track_stops() {
        let state = playing(&["a", "b"], "a");
        let state = step(&state, PlaybackEvent::SetActivePlaylist(tracks(&["x", "y"])));
        assert!(state.current_track().is_none());
        assert_eq!(state.transport(), TransportState::Stopped);
    }

    #[test]
    fn tick_updates_and_clamps_position() {
        let state = playing(&["a"], "a");
        let state = step(
            &state,
            PlaybackEvent::TransportTick {
                position_ms: 12_000,
                duration_ms: 10_000,
                is_playing: true,
            },
        );
        assert_eq!(state.duration_ms(), 10_000);
        assert_eq!(state.position_ms(), 10_000);

        let state = step(
            &state,
            PlaybackEvent::TransportTick {
                position_ms: 4_000,
                duration_ms: 10_000,
                is_playing: false,
            },
        );
        assert_eq!(state.transport(), TransportState::Paused);
        assert_eq!(state.position_ms(), 4_000);
    }

    #[test]
    fn tick_without_current_track_is_ignored() {
        let state = PlaybackState::default();
        let next = step(
            &state,
            PlaybackEvent::TransportTick {
                position_ms: 1_000,
                duration_ms: 2_000,
                is_playing: true,
            },
        );
        assert_eq!(next, state);
    }

    #[test]
    fn finished_advances_sequentially() {
        let state = playing(&["a", "b"], "a");
        let state = step(&state, PlaybackEvent::TrackFinished);
        assert_eq!(state.current_track().unwrap().id.as_str(), "b");
        assert!(state.is_playing());
    }

    #[test]
    fn finished_at_end_stops() {
        let state = playing(&["a", "b"], "b");
        let state = step(
            &state,
            PlaybackEvent::TransportTick {
                position_ms: 9_000,
                duration_ms: 9_000,
                is_playing: true,
            },
        );
        let state = step(&state, PlaybackEvent::TrackFinished);
        assert_eq!(state.transport(), TransportState::Stopped);
        assert_eq!(state.position_ms(), 0);
        assert_eq!(state.current_track().unwrap().id.as_str(), "b");
    }

    #[test]
    fn finished_with_repeat_one_restarts_current() {
        let state = playing(&["a", "b"], "a");
        let state = step(&state, PlaybackEvent::SetRepeatMode(RepeatMode::One));
        let state = step(&state, PlaybackEvent::TrackFinished);
        assert_eq!(state.current_track().unwrap().id.as_str(), "a");
        assert!(state.is_playing());
    }

    #[test]
    fn finished_after_exhausted_shuffle_cycle_restarts_cycle() {
        let state = playing(&["a", "b"], "a");
        let state = step(&state, PlaybackEvent::StartTrack(track("b")));
        let state = step(&state, PlaybackEvent::ToggleShuffle);
        assert_eq!(state.played_ids().len(), 2);

        let state = apply(
            &state,
            PlaybackEvent::TrackFinished,
            &mut SequenceRandom::new([1]),
        )
        .unwrap();
        assert_eq!(state.current_track().unwrap().id.as_str(), "b");
        let expected: HashSet<TrackId> = [TrackId::new("b")].into();
        assert_eq!(state.played_ids(), &expected);
    }

    #[test]
    fn pause_resume_stop_transitions() {
        let state = playing(&["a"], "a");
        let paused = step(&state, PlaybackEvent::Pause);
        assert_eq!(paused.transport(), TransportState::Paused);

        let resumed = step(&paused, PlaybackEvent::Resume);
        assert_eq!(resumed.transport(), TransportState::Playing);

        let stopped = step(&resumed, PlaybackEvent::Stop);
        assert_eq!(stopped.transport(), TransportState::Stopped);
        assert!(stopped.current_track().is_some());

        // Pause does not leave Stopped
        let still = step(&stopped, PlaybackEvent::Pause);
        assert_eq!(still.transport(), TransportState::Stopped);
    }

    #[test]
    fn resume_without_track_is_noop() {
        let state = step(&PlaybackState::default(), PlaybackEvent::Resume);
        assert_eq!(state.transport(), TransportState::Stopped);
    }

    #[test]
    fn seek_clamps_to_duration() {
        let state = playing(&["a"], "a");
        let state = step(
            &state,
            PlaybackEvent::TransportTick {
                position_ms: 0,
                duration_ms: 60_000,
                is_playing: true,
            },
        );
        assert_eq!(step(&state, PlaybackEvent::Seek(90_000)).position_ms(), 60_000);
        assert_eq!(step(&state, PlaybackEvent::Seek(30_000)).position_ms(), 30_000);
        assert!(step(&state, PlaybackEvent::Seek(30_000)).is_playing());
    }

    #[test]
    fn volume_is_clamped() {
        let state = PlaybackState::default();
        assert_eq!(step(&state, PlaybackEvent::SetVolume(1.5)).volume(), 1.0);
        assert_eq!(step(&state, PlaybackEvent::SetVolume(-0.2)).volume(), 0.0);
        assert_eq!(step(&state, PlaybackEvent::SetVolume(f32::NAN)).volume(), 0.0);
    }

    #[test]
    fn toggle_shuffle_keeps_played_ids() {
        let state = playing(&["a", "b"], "a");
        let state = step(&state, PlaybackEvent::ToggleShuffle);
        assert!(state.is_shuffled());
        assert!(state.has_played(&TrackId::new("a")));
    }

    #[test]
    fn cycle_exhausted_clears_played_ids() {
        let state = playing(&["a", "b"], "a");
        let state = step(&state, PlaybackEvent::CycleExhausted);
        assert!(state.played_ids().is_empty());
    }

    #[test]
    fn playlists_add_and_delete() {
        let playlist = Playlist::new("Mix", tracks(&["a"])).unwrap();
        let id = playlist.id.clone();

        let state = step(&PlaybackState::default(), PlaybackEvent::AddPlaylist(playlist.clone()));
        assert_eq!(state.playlists().len(), 1);
        assert!(state.active_playlist().is_empty());

        let dup = apply(
            &state,
            PlaybackEvent::AddPlaylist(playlist),
            &mut SequenceRandom::default(),
        );
        assert!(matches!(dup, Err(PlaybackError::InvalidTransition(_))));

        let state = step(&state, PlaybackEvent::DeletePlaylist(id.clone()));
        assert!(state.playlists().is_empty());

        let missing = apply(
            &state,
            PlaybackEvent::DeletePlaylist(id),
            &mut SequenceRandom::default(),
        );
        assert!(matches!(missing, Err(PlaybackError::InvalidTransition(_))));
    }
}
