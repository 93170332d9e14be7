//! Import orchestration
//!
//! Picked files become tracks with fresh ids and unknown durations; the
//! duration is filled in once the playback session reports it.

use crate::error::ImportError;
use crate::filename::{parse_file_name, title_only};
use crate::types::{ImportMode, ImportReport, PickedFile};
use cadence_core::{Track, TrackId};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Batch importer for picked files
#[derive(Debug, Clone, Copy, Default)]
pub struct Importer {
    mode: ImportMode,
}

impl Importer {
    /// Create an importer using `mode` for metadata
    pub fn new(mode: ImportMode) -> Self {
        Self { mode }
    }

    /// Metadata mode in use
    pub fn mode(&self) -> ImportMode {
        self.mode
    }

    /// Import a batch of picked files
    ///
    /// Files without a locator are reported in `skipped`; they never fail
    /// the rest of the batch.
    pub fn import(&self, files: impl IntoIterator<Item = PickedFile>) -> ImportReport {
        let mut report = ImportReport::default();

        for file in files {
            match self.import_file(&file) {
                Ok(track) => {
                    debug!(track_id = %track.id, title = %track.title, "Imported file");
                    report.tracks.push(track);
                }
                Err(e) => {
                    warn!(name = %file.name, error = %e, "Skipping file");
                    report.skipped.push(e);
                }
            }
        }

        info!(
            imported = report.tracks.len(),
            skipped = report.skipped.len(),
            mode = ?self.mode,
            "Import finished"
        );
        report
    }

    fn import_file(&self, file: &PickedFile) -> Result<Track, ImportError> {
        if file.locator.trim().is_empty() {
            return Err(ImportError::EmptyLocator {
                name: file.name.clone(),
            });
        }

        let parsed = match self.mode {
            ImportMode::TitleOnly => title_only(&file.name),
            ImportMode::ParseFilename => parse_file_name(&file.name),
        };

        Ok(Track::new(TrackId::generate(), parsed.title, file.locator.clone())
            .with_artist(parsed.artist)
            .with_album(parsed.album))
    }
}

/// Append `imported` to `existing`, skipping tracks already present
///
/// A track is a duplicate when its id or its locator is already in the
/// library (or earlier in the batch). Order is preserved.
pub fn merge_into_library(existing: &[Track], imported: Vec<Track>) -> Vec<Track> {
    let mut ids: HashSet<TrackId> = existing.iter().map(|t| t.id.clone()).collect();
    let mut locators: HashSet<String> = existing.iter().map(|t| t.locator.clone()).collect();

    let mut merged = existing.to_vec();
    for track in imported {
        if ids.contains(&track.id) || locators.contains(&track.locator) {
            debug!(track_id = %track.id, locator = %track.locator, "Skipping duplicate track");
            continue;
        }
        ids.insert(track.id.clone());
        locators.insert(track.locator.clone());
        merged.push(track);
    }
    merged
}
