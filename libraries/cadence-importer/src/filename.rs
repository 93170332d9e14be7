//! Filename parsing
//!
//! Guesses track metadata from common filename layouts:
//!
//! | Layout | Example |
//! |--------|---------|
//! | `Artist - Title` | `Daft Punk - One More Time.mp3` |
//! | `Artist_Title` | `Daft Punk_One More Time.mp3` |
//! | `Artist_Album_Title` | `Daft Punk_Discovery_One More Time.mp3` |
//!
//! Anything else becomes the title. Empty parts fall back to the unknown
//! placeholders.

use cadence_core::{UNKNOWN_ALBUM, UNKNOWN_ARTIST, UNKNOWN_TITLE};
use serde::Serialize;

/// Metadata guessed from a filename
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedName {
    pub title: String,
    pub artist: String,
    pub album: String,
}

/// Drop the last extension (`.mp3`, `.flac`, ...)
///
/// Only a trailing `.ext` without `/` or `.` inside counts, so `a.` and
/// `dir.v2/track` are returned unchanged.
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) => {
            let ext = &name[dot + 1..];
            if ext.is_empty() || ext.contains('/') {
                name
            } else {
                &name[..dot]
            }
        }
        None => name,
    }
}

/// Title-only metadata: the filename without extension
pub fn title_only(name: &str) -> ParsedName {
    ParsedName {
        title: or_unknown(strip_extension(name), UNKNOWN_TITLE),
        artist: UNKNOWN_ARTIST.to_string(),
        album: UNKNOWN_ALBUM.to_string(),
    }
}

/// Guess artist, album and title from a filename
pub fn parse_file_name(name: &str) -> ParsedName {
    let stem = strip_extension(name);

    let (artist, album, title) = if stem.contains(" - ") {
        let mut parts = stem.split(" - ");
        let artist = parts.next().unwrap_or_default();
        let title = parts.collect::<Vec<_>>().join(" - ");
        (artist, None, title)
    } else if stem.contains('_') {
        let parts: Vec<&str> = stem.split('_').collect();
        if parts.len() >= 3 {
            (parts[0], Some(parts[1]), parts[2..].join("_"))
        } else {
            (parts[0], None, parts[1..].join("_"))
        }
    } else {
        return ParsedName {
            title: or_unknown(stem, UNKNOWN_TITLE),
            artist: UNKNOWN_ARTIST.to_string(),
            album: UNKNOWN_ALBUM.to_string(),
        };
    };

    ParsedName {
        title: or_unknown(&title, UNKNOWN_TITLE),
        artist: or_unknown(artist, UNKNOWN_ARTIST),
        album: or_unknown(album.unwrap_or_default(), UNKNOWN_ALBUM),
    }
}

fn or_unknown(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
