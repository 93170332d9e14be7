/// CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Playback error: {0}")]
    Playback(#[from] cadence_playback::PlaybackError),

    #[error("Nothing to play")]
    NothingToPlay,
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}
