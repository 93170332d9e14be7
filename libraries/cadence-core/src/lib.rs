//! Cadence Core
//!
//! Platform-agnostic domain types, library queries, and error handling for Cadence.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Playlist` and their identifiers
//! - **Library Queries**: search, album/artist grouping, time formatting
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use cadence_core::types::{Playlist, Track, TrackId};
//! use cadence_core::library;
//!
//! let track = Track::new(TrackId::new("t1"), "Blue in Green", "file:///music/blue.mp3")
//!     .with_artist("Miles Davis")
//!     .with_album("Kind of Blue");
//!
//! let playlist = Playlist::new("Late Night", vec![track.clone()]).unwrap();
//! assert_eq!(playlist.len(), 1);
//!
//! let hits = library::search(&[track], "miles");
//! assert_eq!(hits.len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod library;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use library::{format_time, group_by_album, group_by_artist, search, TrackGroup};
pub use types::{
    Playlist, PlaylistId, Track, TrackId, UNKNOWN_ALBUM, UNKNOWN_ARTIST, UNKNOWN_TITLE,
};
