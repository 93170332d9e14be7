//! Cadence Music Importer
//!
//! Turns files handed over by the host file picker into library tracks.
//! The importer never touches the file system: each file is a display name
//! plus an opaque locator the playback session understands.
//!
//! # Architecture
//!
//! - `filename`: artist/album/title guesses from common filename layouts
//! - `importer`: batch import and merging into an existing library
//!
//! # Example
//!
//! ```rust
//! use cadence_importer::{ImportMode, Importer, PickedFile};
//!
//! let files = vec![PickedFile::new("Daft Punk - One More Time.mp3", "file:///music/1.mp3")];
//! let report = Importer::new(ImportMode::ParseFilename).import(files);
//!
//! assert_eq!(report.tracks[0].artist, "Daft Punk");
//! assert_eq!(report.tracks[0].title, "One More Time");
//! ```

mod error;
mod types;

pub mod filename;
pub mod importer;

pub use error::ImportError;
pub use filename::{parse_file_name, strip_extension, ParsedName};
pub use importer::{merge_into_library, Importer};
pub use types::*;

/// Result type for import operations
pub type Result<T> = std::result::Result<T, ImportError>;
