/// CLI configuration
use crate::error::{CliError, Result};
use cadence_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "cadence.toml";

/// Environment variable prefix (`CADENCE_SIMULATION__TICK_INTERVAL_MS=...`)
pub const ENV_PREFIX: &str = "CADENCE";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub logging: LoggingSettings,

    #[serde(default)]
    pub simulation: SimulationSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directives used when `RUST_LOG` is unset
    #[serde(default)]
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationSettings {
    /// How long every simulated track plays
    #[serde(default = "default_track_length_ms")]
    pub track_length_ms: u64,

    /// Interval between transport ticks
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            track_length_ms: default_track_length_ms(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `cadence.toml` is used when
    /// present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    /// Same as [`CliConfig::load`] with a custom environment prefix
    pub fn load_with_prefix(path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with CADENCE_)
        settings = settings.add_source(
            config::Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.simulation.tick_interval_ms == 0 {
            return Err(CliError::Config(
                "simulation.tick_interval_ms must be greater than zero".to_string(),
            ));
        }

        if self.simulation.track_length_ms == 0 {
            return Err(CliError::Config(
                "simulation.track_length_ms must be greater than zero".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.playback.volume) {
            return Err(CliError::Config(format!(
                "playback.volume must be between 0.0 and 1.0 (got {})",
                self.playback.volume
            )));
        }

        Ok(())
    }

    /// Filter directives from the config file, or `cadence=info`
    ///
    /// `RUST_LOG` still takes precedence when the subscriber is built.
    pub fn log_filter(&self) -> String {
        self.logging
            .filter
            .clone()
            .unwrap_or_else(|| "cadence=info".to_string())
    }
}

// Default values
fn default_track_length_ms() -> u64 {
    5_000
}

fn default_tick_interval_ms() -> u64 {
    250
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_playback::RepeatMode;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = CliConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.simulation.tick_interval_ms, 250);
        assert_eq!(config.log_filter(), "cadence=info");
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[playback]
volume = 0.5
repeat = "all"
shuffle = true

[logging]
filter = "cadence_playback=debug"

[simulation]
track_length_ms = 1000
"#
        )
        .unwrap();

        let config = CliConfig::load_with_prefix(Some(file.path()), "CADENCE_TEST_FILE").unwrap();

        assert_eq!(config.playback.volume, 0.5);
        assert_eq!(config.playback.repeat, RepeatMode::All);
        assert!(config.playback.shuffle);
        assert_eq!(config.simulation.track_length_ms, 1000);
        assert_eq!(config.simulation.tick_interval_ms, 250);
        assert_eq!(config.log_filter(), "cadence_playback=debug");
    }

    #[test]
    fn environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[simulation]\ntick_interval_ms = 100").unwrap();

        std::env::set_var("CADENCE_TEST_ENV_SIMULATION__TICK_INTERVAL_MS", "40");
        let config = CliConfig::load_with_prefix(Some(file.path()), "CADENCE_TEST_ENV").unwrap();
        std::env::remove_var("CADENCE_TEST_ENV_SIMULATION__TICK_INTERVAL_MS");

        assert_eq!(config.simulation.tick_interval_ms, 40);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = CliConfig::load_with_prefix(
            Some(Path::new("/nonexistent/cadence.toml")),
            "CADENCE_TEST_MISSING",
        );
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = CliConfig::default();
        config.simulation.tick_interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = CliConfig::default();
        config.simulation.track_length_ms = 0;
        assert!(config.validate().is_err());

        let mut config = CliConfig::default();
        config.playback.volume = 1.5;
        assert!(config.validate().is_err());
    }
}
