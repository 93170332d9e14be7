//! Domain types shared across Cadence crates

mod ids;
mod playlist;
mod track;

pub use ids::{PlaylistId, TrackId};
pub use playlist::{Playlist, DEFAULT_PLAYLIST_NAME};
pub use track::{Track, UNKNOWN_ALBUM, UNKNOWN_ARTIST, UNKNOWN_TITLE};
