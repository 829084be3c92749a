use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Target size and rotation shared by the scaling commands
#[derive(ClapArgs, Debug, Clone)]
pub struct ScaleArgs {
    /// Target width in pixels
    #[arg(long)]
    pub width: i64,

    /// Target height in pixels
    #[arg(long)]
    pub height: i64,

    /// Pad to exactly the target size instead of only shrinking
    #[arg(long)]
    pub padding: bool,

    /// Only shrink, even when the configuration enables padding
    #[arg(long, conflicts_with = "padding")]
    pub no_padding: bool,

    /// Rotation: auto, 90, 180 or 270 (defaults to the configured value)
    #[arg(short, long)]
    pub rotate: Option<String>,
}

impl ScaleArgs {
    /// Padding after the command-line flags override `default`
    pub fn padding(&self, default: bool) -> bool {
        if self.padding {
            true
        } else if self.no_padding {
            false
        } else {
            default
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print scale and rotate arguments for a probed input
    Scale {
        /// ffprobe JSON output (-print_format json -show_streams)
        #[arg(short, long)]
        probe: PathBuf,

        #[command(flatten)]
        scale: ScaleArgs,
    },

    /// Print rotation arguments for a probed input
    Rotate {
        /// ffprobe JSON output
        #[arg(short, long)]
        probe: PathBuf,

        /// auto, 90, 180 or 270
        #[arg(short, long)]
        angle: Option<String>,
    },

    /// Print frame size arguments for a probed input
    Resize {
        /// ffprobe JSON output
        #[arg(short, long)]
        probe: PathBuf,

        /// Target width in pixels
        #[arg(long)]
        width: i64,

        /// Target height in pixels
        #[arg(long)]
        height: i64,

        /// fit, inset, width or height
        #[arg(short, long)]
        mode: Option<String>,
    },

    /// Print audio resample arguments
    Resample {
        /// Sample rate in Hz
        #[arg(short, long)]
        rate: u32,

        /// Channel count (defaults to the configured value)
        #[arg(long)]
        channels: Option<u32>,
    },

    /// Print a complete transcoder command line
    Command {
        /// ffprobe JSON output
        #[arg(short, long)]
        probe: PathBuf,

        /// Input media file
        #[arg(short, long)]
        input: PathBuf,

        /// Output media file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        scale: ScaleArgs,

        /// Also resample audio to this rate
        #[arg(long)]
        audio_rate: Option<u32>,
    },

    /// Write a configuration file with default values
    InitConfig {
        /// Destination path
        #[arg(short, long, default_value = "ffargs.toml")]
        output: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale_args(flags: &[&str]) -> ScaleArgs {
        let mut argv = vec!["ffargs", "scale", "-p", "in.json", "--width", "640", "--height", "480"];
        argv.extend_from_slice(flags);
        match Args::try_parse_from(argv).unwrap().command {
            Commands::Scale { scale, .. } => scale,
            _ => panic!("expected the scale command"),
        }
    }

    #[test]
    fn test_padding_flags_override_config() {
        assert!(scale_args(&[]).padding(true));
        assert!(!scale_args(&[]).padding(false));
        assert!(scale_args(&["--padding"]).padding(false));
        assert!(!scale_args(&["--no-padding"]).padding(true));
    }

    #[test]
    fn test_padding_flags_conflict() {
        let argv = [
            "ffargs", "scale", "-p", "in.json", "--width", "640", "--height", "480",
            "--padding", "--no-padding",
        ];
        assert!(Args::try_parse_from(argv).is_err());
    }
}
