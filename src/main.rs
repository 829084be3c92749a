//! ffargs - ffmpeg argument builder
//!
//! Reads probed stream metadata and prints the scale, rotate and resample
//! arguments (or a whole command line) for an ffmpeg transcode.

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info, Level};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use ffargs::cli::{Args, Commands, ScaleArgs};
use ffargs::config::{Config, LoggingConfig};
use ffargs::filters::{ResizeMode, Rotation};
use ffargs::geometry::Dimension;
use ffargs::media::{shell_quote, MediaCommandBuilder, TranscodeJob};
use ffargs::stream::StreamSet;

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            if std::path::Path::new("ffargs.toml").exists() {
                Config::from_file("ffargs.toml")?
            } else {
                Config::default()
            }
        }
    };

    setup_logging(args.verbose, &config.logging)?;
    debug!("Using configuration: {:?}", config);

    let format = config.format.build()?;

    match args.command {
        Commands::Scale { probe, scale } => {
            let mut job = TranscodeJob::new(StreamSet::from_file(&probe)?);
            let (dimension, padding, rotation) = scale_options(&scale, &config)?;
            job.filters().scale(dimension, padding, rotation);
            print_tokens(&job.render(&format));
        }
        Commands::Rotate { probe, angle } => {
            let mut job = TranscodeJob::new(StreamSet::from_file(&probe)?);
            let rotation = match angle {
                Some(angle) => angle.parse::<Rotation>()?,
                None => config.filters.rotation()?,
            };
            job.filters().rotate(rotation);
            print_tokens(&job.render(&format));
        }
        Commands::Resize { probe, width, height, mode } => {
            let mut job = TranscodeJob::new(StreamSet::from_file(&probe)?);
            let mode = match mode {
                Some(mode) => mode.parse::<ResizeMode>()?,
                None => config.filters.resize_mode,
            };
            job.filters().resize(
                Dimension::new(width, height)?,
                mode,
                config.filters.force_standards,
            );
            print_tokens(&job.render(&format));
        }
        Commands::Resample { rate, channels } => {
            let mut job = TranscodeJob::default();
            let channels = channels.unwrap_or(config.filters.audio_channels);
            job.audio_filters().resample(rate, channels);
            print_tokens(&job.render(&format));
        }
        Commands::Command { probe, input, output, scale, audio_rate } => {
            let mut job = TranscodeJob::new(StreamSet::from_file(&probe)?);
            let (dimension, padding, rotation) = scale_options(&scale, &config)?;
            job.filters().scale(dimension, padding, rotation);
            if let Some(rate) = audio_rate {
                job.filters().resample(rate, config.filters.audio_channels);
            }

            let builder = MediaCommandBuilder::new(&config.media.binary_path);
            let command = job.command(&builder, &input, &output, &format, &config.media.extra_options);
            info!("{} command for {}", command.description, input.display());
            println!("{}", command);
        }
        Commands::InitConfig { output } => {
            Config::default().save_to_file(&output)?;
            info!("Wrote default configuration to {}", output.display());
        }
    }

    Ok(())
}

fn scale_options(scale: &ScaleArgs, config: &Config) -> Result<(Dimension, bool, Rotation)> {
    let dimension = Dimension::new(scale.width, scale.height)?;
    let rotation = match &scale.rotate {
        Some(angle) => angle.parse::<Rotation>()?,
        None => config.filters.rotation()?,
    };
    Ok((dimension, scale.padding(config.filters.padding), rotation))
}

fn print_tokens(tokens: &[String]) {
    let line = tokens
        .iter()
        .map(|t| shell_quote(t))
        .collect::<Vec<_>>()
        .join(" ");
    println!("{}", line);
}

/// Setup logging to stderr and, when configured, a daily rolling file
fn setup_logging(verbose: bool, logging: &LoggingConfig) -> Result<()> {
    let log_level = if verbose { Level::DEBUG } else { Level::WARN };

    // Create console layer; stdout carries the generated arguments
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(verbose)
        .with_line_number(verbose);

    // Create file layer
    let file_layer = match &logging.log_dir {
        Some(log_dir) => {
            std::fs::create_dir_all(log_dir)?;
            let file_appender = rolling::daily(log_dir, "ffargs.log");
            let (non_blocking_file, guard) = non_blocking(file_appender);
            // Keep the guard alive for the duration of the program
            std::mem::forget(guard);

            Some(
                fmt::layer()
                    .with_writer(non_blocking_file)
                    .with_target(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(false) // No ANSI colors in file
                    .boxed(),
            )
        }
        None => None,
    };

    // Setup layered subscriber
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    debug!("Logging initialized at level {}", log_level);

    Ok(())
}
