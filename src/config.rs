use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{FfargsError, Result};
use crate::filters::{ResizeMode, Rotation, DEFAULT_CHANNELS};
use crate::format::X264;

fn default_binary_path() -> String {
    "ffmpeg".to_string()
}

fn default_rotation() -> String {
    "auto".to_string()
}

fn default_audio_channels() -> u32 {
    DEFAULT_CHANNELS
}

fn default_force_standards() -> bool {
    true
}

fn default_video_codec() -> String {
    "libx264".to_string()
}

fn default_audio_codec() -> String {
    "libfaac".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub media: MediaConfig,
    #[serde(default)]
    pub filters: FilterDefaults,
    #[serde(default)]
    pub format: FormatConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Path to ffmpeg binary
    #[serde(default = "default_binary_path")]
    pub binary_path: String,
    /// Options placed right before the output path
    /// Common options: ["-preset", "medium", "-crf", "23", "-pix_fmt", "yuv420p"]
    #[serde(default)]
    pub extra_options: Vec<String>,
}

/// Values used when the command line leaves an option out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterDefaults {
    #[serde(default)]
    pub padding: bool,
    /// auto, 90, 180 or 270
    #[serde(default = "default_rotation")]
    pub rotation: String,
    #[serde(default = "default_audio_channels")]
    pub audio_channels: u32,
    #[serde(default)]
    pub resize_mode: ResizeMode,
    /// Snap source ratios to the nearest standard ratio when resizing
    #[serde(default = "default_force_standards")]
    pub force_standards: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatConfig {
    #[serde(default = "default_video_codec")]
    pub video_codec: String,
    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,
    /// baseline, main, high, high10, high422, high444
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    /// 1 or 2
    #[serde(default)]
    pub passes: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory for daily rolling log files; console only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            binary_path: default_binary_path(),
            extra_options: Vec::new(),
        }
    }
}

impl Default for FilterDefaults {
    fn default() -> Self {
        Self {
            padding: false,
            rotation: default_rotation(),
            audio_channels: DEFAULT_CHANNELS,
            resize_mode: ResizeMode::Fit,
            force_standards: true,
        }
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            video_codec: default_video_codec(),
            audio_codec: default_audio_codec(),
            profile: None,
            level: None,
            passes: None,
        }
    }
}

impl FilterDefaults {
    pub fn rotation(&self) -> Result<Rotation> {
        self.rotation
            .parse()
            .map_err(|e| FfargsError::Config(format!("Invalid default rotation: {}", e)))
    }
}

impl FormatConfig {
    /// Build the output format, validating codecs and passes
    pub fn build(&self) -> Result<X264> {
        let mut format = X264::new(&self.audio_codec, &self.video_codec)?;
        match (&self.profile, &self.level) {
            (Some(profile), Some(level)) => {
                format.set_profile(profile.as_str(), level.as_str());
            }
            (Some(profile), None) => {
                format.set_profile(profile.as_str(), "3.0");
            }
            (None, Some(_)) => {
                return Err(FfargsError::Config(
                    "format.level requires format.profile".to_string(),
                ));
            }
            (None, None) => {}
        }
        if let Some(passes) = self.passes {
            format.set_passes(passes)?;
        }
        Ok(format)
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| FfargsError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| FfargsError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| FfargsError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| FfargsError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}
