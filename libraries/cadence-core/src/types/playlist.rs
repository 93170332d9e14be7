/// Playlist domain types
use crate::error::{CoreError, Result};
use crate::types::{PlaylistId, Track, TrackId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Name of the convenience playlist holding every imported track
pub const DEFAULT_PLAYLIST_NAME: &str = "All Songs";

/// Playlist
///
/// Tracks are embedded copies in playback order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name
    pub name: String,

    /// Tracks in playback order
    pub tracks: Vec<Track>,

    /// Optional artwork reference
    pub artwork: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Playlist {
    /// Create a new playlist
    ///
    /// The name is trimmed and must not be empty.
    pub fn new(name: impl AsRef<str>, tracks: Vec<Track>) -> Result<Self> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(CoreError::invalid_input("playlist name is required"));
        }

        Ok(Self {
            id: PlaylistId::generate(),
            name: name.to_string(),
            tracks,
            artwork: None,
            created_at: Utc::now(),
        })
    }

    /// Create a playlist from a user's selection
    ///
    /// Tracks keep their library order regardless of selection order.
    pub fn from_selection(
        name: impl AsRef<str>,
        library: &[Track],
        selected: &HashSet<TrackId>,
    ) -> Result<Self> {
        let tracks = library
            .iter()
            .filter(|track| selected.contains(&track.id))
            .cloned()
            .collect();
        Self::new(name, tracks)
    }

    /// The convenience default playlist containing every imported track
    pub fn all_tracks(library: &[Track]) -> Self {
        Self {
            id: PlaylistId::new("all-songs"),
            name: DEFAULT_PLAYLIST_NAME.to_string(),
            tracks: library.to_vec(),
            artwork: None,
            created_at: Utc::now(),
        }
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the playlist has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Human-readable track count ("1 song", "12 songs")
    pub fn track_count_label(&self) -> String {
        match self.tracks.len() {
            1 => "1 song".to_string(),
            n => format!("{} songs", n),
        }
    }
}
