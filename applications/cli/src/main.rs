/// Cadence - play, inspect and search picked audio files
use anyhow::Context;
use cadence_cli::{
    config::CliConfig,
    player::{self, RunOptions},
    session::{SimulatedSession, SimulationTiming},
};
use cadence_core::{format_time, search, Track};
use cadence_importer::{merge_into_library, ImportMode, Importer, PickedFile};
use cadence_playback::{report_channel, PlaybackController, RepeatMode};
use clap::{Args, Parser, Subcommand};
use std::{num::NonZeroUsize, path::PathBuf, time::Duration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Cadence playback sequencer", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./cadence.toml when present)
    #[arg(short, long, global = true, env = "CADENCE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct FileArgs {
    /// Audio files to import
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Guess artist/album/title from "Artist - Title" or "Artist_Album_Title" names
    #[arg(long)]
    parse_names: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Play files through the simulated player
    Play {
        #[command(flatten)]
        input: FileArgs,

        /// Shuffle without repeats until every track has played
        #[arg(long)]
        shuffle: bool,

        /// Repeat mode: off, one or all
        #[arg(long)]
        repeat: Option<RepeatMode>,

        /// Stop after this many tracks (at least 1)
        #[arg(long)]
        max_tracks: Option<NonZeroUsize>,
    },
    /// Print the imported tracks as JSON
    Inspect {
        #[command(flatten)]
        input: FileArgs,
    },
    /// Search imported tracks by title, artist or album
    Search {
        /// Search query
        query: String,

        #[command(flatten)]
        input: FileArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    config.validate()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_filter().into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Play {
            input,
            shuffle,
            repeat,
            max_tracks,
        } => {
            let mut config = config;
            config.playback.shuffle |= shuffle;
            if let Some(repeat) = repeat {
                config.playback.repeat = repeat;
            }
            let options = RunOptions {
                max_tracks: max_tracks.map(NonZeroUsize::get),
            };
            play(&config, import(&input), options).await?;
        }
        Commands::Inspect { input } => {
            let tracks = import(&input);
            println!("{}", serde_json::to_string_pretty(&tracks)?);
        }
        Commands::Search { query, input } => {
            let tracks = import(&input);
            for track in search(&tracks, &query) {
                print_track(&track);
            }
        }
    }

    Ok(())
}

fn import(input: &FileArgs) -> Vec<Track> {
    let mode = if input.parse_names {
        ImportMode::ParseFilename
    } else {
        ImportMode::TitleOnly
    };

    let files = input.files.iter().map(|path| {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        PickedFile::new(name, path.to_string_lossy())
    });

    let report = Importer::new(mode).import(files);
    for skipped in &report.skipped {
        eprintln!("Skipped: {}", skipped);
    }
    tracing::info!("{}", report.summary());

    merge_into_library(&[], report.tracks)
}

async fn play(config: &CliConfig, library: Vec<Track>, options: RunOptions) -> anyhow::Result<()> {
    tracing::info!(
        tracks = library.len(),
        shuffle = config.playback.shuffle,
        repeat = %config.playback.repeat,
        "Starting playback"
    );

    let (tx, rx) = report_channel();
    let session = SimulatedSession::new(
        tx,
        SimulationTiming {
            track_length: Duration::from_millis(config.simulation.track_length_ms),
            tick_interval: Duration::from_millis(config.simulation.tick_interval_ms),
        },
    );
    let mut controller = PlaybackController::new(session, &config.playback);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    let summary = player::run(&mut controller, library, rx, options, shutdown).await?;
    println!("Played {} tracks ({:?})", summary.played.len(), summary.reason);
    Ok(())
}

fn print_track(track: &Track) {
    let duration = track
        .duration_ms
        .map_or_else(|| "--:--".to_string(), format_time);
    println!(
        "{} - {} ({}) [{}]",
        track.artist, track.title, track.album, duration
    );
}
