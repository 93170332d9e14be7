//! Cadence CLI
//!
//! Command-line host for the Cadence playback engine. Audio output is
//! simulated: each track "plays" for a configured length while the
//! controller sequences through the active playlist.

pub mod config;
pub mod error;
pub mod player;
pub mod session;

pub use error::{CliError, Result};
