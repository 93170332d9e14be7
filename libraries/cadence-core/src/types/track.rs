/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Placeholder title for files whose name yields nothing usable
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Placeholder artist until real metadata is known
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Placeholder album until real metadata is known
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// Audio track
///
/// Immutable once created; the importer assigns the id and the locator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    pub album: String,

    /// Track duration in milliseconds, unknown until reported by the player
    pub duration_ms: Option<u64>,

    /// Source locator (URI or path) handed to the playback session
    pub locator: String,

    /// Optional artwork reference
    pub artwork: Option<String>,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(id: TrackId, title: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            artist: UNKNOWN_ARTIST.to_string(),
            album: UNKNOWN_ALBUM.to_string(),
            duration_ms: None,
            locator: locator.into(),
            artwork: None,
        }
    }

    /// Set the artist name
    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    /// Set the album name
    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = album.into();
        self
    }

    /// Set a known duration in milliseconds
    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Attach an artwork reference
    #[must_use]
    pub fn with_artwork(mut self, artwork: impl Into<String>) -> Self {
        self.artwork = Some(artwork.into());
        self
    }

    /// Get the track duration as a Duration
    pub fn duration(&self) -> Option<Duration> {
        self.duration_ms.map(Duration::from_millis)
    }
}
