//! Core types for playback management

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Transport state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransportState {
    /// Nothing playing
    #[default]
    Stopped,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when the active playlist ends
    #[default]
    Off,

    /// Loop current track only
    One,

    /// Loop entire active playlist
    All,
}

impl RepeatMode {
    /// Lowercase name as used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            RepeatMode::Off => "off",
            RepeatMode::One => "one",
            RepeatMode::All => "all",
        }
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepeatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(RepeatMode::Off),
            "one" => Ok(RepeatMode::One),
            "all" => Ok(RepeatMode::All),
            other => Err(format!("unknown repeat mode: {other} (expected off, one or all)")),
        }
    }
}

/// Initial settings for a playback session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume (0.0-1.0, default: 1.0)
    pub volume: f32,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// Start with shuffle enabled (default: false)
    pub shuffle: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            repeat: RepeatMode::Off,
            shuffle: false,
        }
    }
}
