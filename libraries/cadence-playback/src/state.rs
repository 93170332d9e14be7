//! Playback state snapshot
//!
//! `PlaybackState` is the invariant-bearing aggregate the reducer produces.
//! Fields are crate-private: hosts read through accessors and change it only
//! by applying events.

use crate::types::{PlaybackConfig, RepeatMode, TransportState};
use cadence_core::{Playlist, Track, TrackId};
use serde::Serialize;
use std::collections::HashSet;

/// Canonical playback snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackState {
    /// Every known track, ids unique, insertion order
    pub(crate) library: Vec<Track>,

    /// User playlists
    pub(crate) playlists: Vec<Playlist>,

    /// Sequence traversed by next/previous
    pub(crate) active_playlist: Vec<Track>,

    /// Track currently loaded; always present in `active_playlist`
    pub(crate) current_track: Option<Track>,

    pub(crate) transport: TransportState,
    pub(crate) is_loading: bool,

    /// Milliseconds
    pub(crate) position_ms: u64,

    /// Milliseconds, 0 while unknown
    pub(crate) duration_ms: u64,

    /// 0.0-1.0
    pub(crate) volume: f32,

    pub(crate) is_shuffled: bool,
    pub(crate) repeat_mode: RepeatMode,

    /// Ids already selected in the current shuffle cycle
    pub(crate) played_ids: HashSet<TrackId>,
}

impl PlaybackState {
    /// Create an empty session state from configuration
    pub fn new(config: &PlaybackConfig) -> Self {
        let volume = if config.volume.is_nan() {
            0.0
        } else {
            config.volume.clamp(0.0, 1.0)
        };

        Self {
            library: Vec::new(),
            playlists: Vec::new(),
            active_playlist: Vec::new(),
            current_track: None,
            transport: TransportState::Stopped,
            is_loading: false,
            position_ms: 0,
            duration_ms: 0,
            volume,
            is_shuffled: config.shuffle,
            repeat_mode: config.repeat,
            played_ids: HashSet::new(),
        }
    }

    // ===== Library & playlists =====

    /// All known tracks
    pub fn library(&self) -> &[Track] {
        &self.library
    }

    /// User playlists
    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    /// User playlists, or the "All Songs" default when none exist yet
    pub fn playlists_or_default(&self) -> Vec<Playlist> {
        if self.playlists.is_empty() && !self.library.is_empty() {
            vec![Playlist::all_tracks(&self.library)]
        } else {
            self.playlists.clone()
        }
    }

    /// Sequence traversed by next/previous
    pub fn active_playlist(&self) -> &[Track] {
        &self.active_playlist
    }

    // ===== Current track & transport =====

    /// Track currently loaded, if any
    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    /// Position of the current track in the active playlist
    pub fn current_index(&self) -> Option<usize> {
        let current = self.current_track.as_ref()?;
        self.index_of(&current.id)
    }

    /// Transport state
    pub fn transport(&self) -> TransportState {
        self.transport
    }

    /// Whether audio is playing
    pub fn is_playing(&self) -> bool {
        self.transport == TransportState::Playing
    }

    /// Whether a track load is in flight
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Playback position in milliseconds
    pub fn position_ms(&self) -> u64 {
        self.position_ms
    }

    /// Track duration in milliseconds (0 while unknown)
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Fraction of the current track played, 0.0 when the duration is unknown
    pub fn progress(&self) -> f64 {
        if self.duration_ms == 0 {
            0.0
        } else {
            (self.position_ms as f64 / self.duration_ms as f64).min(1.0)
        }
    }

    /// Volume (0.0-1.0)
    pub fn volume(&self) -> f32 {
        self.volume
    }

    // ===== Sequencing flags =====

    /// Whether shuffle is on
    pub fn is_shuffled(&self) -> bool {
        self.is_shuffled
    }

    /// Repeat mode
    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat_mode
    }

    /// Ids already played in the current shuffle cycle
    pub fn played_ids(&self) -> &HashSet<TrackId> {
        &self.played_ids
    }

    /// Whether `id` was played in the current shuffle cycle
    pub fn has_played(&self, id: &TrackId) -> bool {
        self.played_ids.contains(id)
    }

    pub(crate) fn index_of(&self, id: &TrackId) -> Option<usize> {
        self.active_playlist.iter().position(|t| &t.id == id)
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(&PlaybackConfig::default())
    }
}
