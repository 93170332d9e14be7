//! Read-only library queries
//!
//! Search and browse helpers used by the UI layer to build the
//! song/album/artist views and the candidate lists handed to playback.

use crate::types::Track;

/// Tracks sharing an album or artist name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackGroup {
    /// Album or artist name
    pub name: String,
    /// Tracks in library order
    pub tracks: Vec<Track>,
}

/// Case-insensitive search over title, artist and album
///
/// A blank query matches nothing.
pub fn search(tracks: &[Track], query: &str) -> Vec<Track> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    tracks
        .iter()
        .filter(|track| {
            track.title.to_lowercase().contains(&needle)
                || track.artist.to_lowercase().contains(&needle)
                || track.album.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Group tracks by album, in order of first appearance
pub fn group_by_album(tracks: &[Track]) -> Vec<TrackGroup> {
    group_by(tracks, |track| &track.album)
}

/// Group tracks by artist, in order of first appearance
pub fn group_by_artist(tracks: &[Track]) -> Vec<TrackGroup> {
    group_by(tracks, |track| &track.artist)
}

fn group_by<F>(tracks: &[Track], key: F) -> Vec<TrackGroup>
where
    F: Fn(&Track) -> &String,
{
    let mut groups: Vec<TrackGroup> = Vec::new();

    for track in tracks {
        let name = key(track);
        match groups.iter_mut().find(|group| &group.name == name) {
            Some(group) => group.tracks.push(track.clone()),
            None => groups.push(TrackGroup {
                name: name.clone(),
                tracks: vec![track.clone()],
            }),
        }
    }

    groups
}

/// Format a millisecond position as `m:ss`
pub fn format_time(ms: u64) -> String {
    let total_seconds = ms / 1000;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}
