//! Common types for the importer

use crate::error::ImportError;
use cadence_core::Track;
use serde::{Deserialize, Serialize};

/// A file handed over by the host picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickedFile {
    /// Display name including extension (e.g. `Artist - Title.mp3`)
    pub name: String,

    /// Opaque locator the playback session can open
    pub locator: String,
}

impl PickedFile {
    /// Create a picked file
    pub fn new(name: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locator: locator.into(),
        }
    }
}

/// How track metadata is derived from a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    /// Title is the filename without extension; artist and album unknown
    #[default]
    TitleOnly,

    /// Guess artist, album and title from the filename layout
    ParseFilename,
}

/// Outcome of a batch import
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Tracks created, in input order
    pub tracks: Vec<Track>,

    /// Files that could not be imported
    pub skipped: Vec<ImportError>,
}

impl ImportReport {
    /// Number of tracks imported
    pub fn imported(&self) -> usize {
        self.tracks.len()
    }

    /// User-facing summary, e.g. "Imported 3 songs!"
    pub fn summary(&self) -> String {
        let mut summary = format!("Imported {} songs!", self.tracks.len());
        if !self.skipped.is_empty() {
            summary.push_str(&format!(" ({} skipped)", self.skipped.len()));
        }
        summary
    }
}
