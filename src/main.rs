use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing::{info, Level};

use clip_sampler::{
    config::{Config, RunContext},
    error::{ConfigError, SamplerError, SourceError},
    ffmpeg::FfmpegExtractor,
    pipeline::{ClipPipeline, QualityPolicy, RunReport},
    sanitize::sanitize,
    source::SelectionMode,
    youtube::YtDlpClient,
};

#[derive(Parser)]
#[command(
    name = "clip-sampler",
    version,
    about = "Sample short preview clips from a creator's uploads or a playlist",
    long_about = "clip-sampler fetches the video list of a channel or playlist with yt-dlp and cuts a short clip from each selected video at a random timestamp using ffmpeg. One clip file per selection is written under a directory named after the handle or playlist id."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Configuration file (optional)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Clip every upload of a channel, in feed order
    DownloadHandle {
        /// Creator handle, with or without the leading '@'
        handle: String,

        /// Clip length in seconds (default 5)
        #[arg(long)]
        clip_length: Option<u64>,

        /// Only use streams no wider than this many pixels
        #[arg(long)]
        max_width: Option<u32>,
    },

    /// Clip randomly sampled uploads of a channel (with replacement)
    DownloadHandleRandom {
        /// Creator handle, with or without the leading '@'
        handle: String,

        /// Clip length in seconds (default 5)
        #[arg(long)]
        clip_length: Option<u64>,

        /// How many clips to draw (default 50)
        #[arg(long)]
        total_clips: Option<usize>,

        /// Only use streams no wider than this many pixels
        #[arg(long)]
        max_width: Option<u32>,
    },

    /// Clip every video of a playlist, in playlist order
    DownloadPlaylist {
        /// Playlist id
        id: String,

        /// Clip length in seconds (default 5)
        #[arg(long)]
        clip_length: Option<u64>,

        /// Only use streams no wider than this many pixels
        #[arg(long)]
        max_width: Option<u32>,
    },
}

enum Target {
    Handle(String),
    Playlist(String),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("Starting clip-sampler v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => Config::default(),
    };
    config.validate()?;

    // Ctrl-C flips the cancellation signal; in-flight work observes it and
    // unwinds without cleanup.
    let (cancel_tx, cancel_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, finishing up");
            let _ = cancel_tx.send(true);
        }
    });

    match run(cli, config, cancel_rx).await {
        Ok(report) => {
            info!("Run complete: {}", report);
            Ok(())
        }
        Err(err @ SamplerError::Source(SourceError::NotFound { .. })) => {
            // A missing channel or playlist is reported to the user but is
            // not a non-zero exit.
            println!("{}", err.user_message());
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

async fn run(
    cli: Cli,
    config: Config,
    cancel: watch::Receiver<bool>,
) -> clip_sampler::Result<RunReport> {
    let (target, clip_length_flag, max_width, mode) = match cli.command {
        Command::DownloadHandle {
            handle,
            clip_length,
            max_width,
        } => (
            Target::Handle(handle),
            clip_length,
            max_width,
            SelectionMode::All,
        ),
        Command::DownloadHandleRandom {
            handle,
            clip_length,
            total_clips,
            max_width,
        } => (
            Target::Handle(handle),
            clip_length,
            max_width,
            SelectionMode::RandomSample {
                count: total_clips.unwrap_or(config.sampling.total_clips),
            },
        ),
        Command::DownloadPlaylist {
            id,
            clip_length,
            max_width,
        } => (
            Target::Playlist(id),
            clip_length,
            max_width,
            SelectionMode::All,
        ),
    };

    if clip_length_flag == Some(0) {
        return Err(ConfigError::InvalidValue {
            key: "clip-length".to_string(),
            value: "0".to_string(),
        }
        .into());
    }
    if max_width == Some(0) {
        return Err(ConfigError::InvalidValue {
            key: "max-width".to_string(),
            value: "0".to_string(),
        }
        .into());
    }
    let clip_length = Duration::from_secs(clip_length_flag.unwrap_or(config.clip.length_secs));

    let quality = match max_width {
        Some(max_width) => QualityPolicy::WidthCapped { max_width },
        None => config.clip.quality,
    };

    let client = Arc::new(YtDlpClient::new()?);
    let extractor = Arc::new(FfmpegExtractor::new()?.with_cancel(cancel.clone()));
    let pipeline = ClipPipeline::new(client.clone(), extractor, quality);

    let raw_target = match &target {
        Target::Handle(handle) => handle.as_str(),
        Target::Playlist(id) => id.as_str(),
    };
    let output_dir = PathBuf::from(sanitize(raw_target));
    info!("Writing clips under {:?}", output_dir);

    let mut ctx = RunContext::new(output_dir, clip_length, mode, config.sampling.seed);

    match &target {
        Target::Handle(handle) => {
            pipeline
                .run_channel(client.as_ref(), handle, &mut ctx, cancel)
                .await
        }
        Target::Playlist(id) => {
            pipeline
                .run_playlist(client.as_ref(), id, &mut ctx, cancel)
                .await
        }
    }
}
