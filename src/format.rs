//! Output format capabilities consumed by the filters and the command renderer.

use crate::error::{FfargsError, Result};

/// What a target format can do. Filters read it, they never change it.
pub trait OutputFormat {
    fn video_codec(&self) -> &str;

    fn audio_codec(&self) -> &str;

    /// Whether the encoder accepts B-frames
    fn supports_b_frames(&self) -> bool;

    /// Alignment required for output dimensions
    fn modulus(&self) -> u32;

    fn passes(&self) -> Option<u32>;

    /// Extra encoder tokens appended after the filter tokens
    fn extra_params(&self) -> Vec<String>;
}

const X264_AUDIO_CODECS: &[&str] = &["libvo_aacenc", "libfaac", "libmp3lame"];
const X264_VIDEO_CODECS: &[&str] = &["libx264"];

/// The H.264 video format
#[derive(Debug, Clone, PartialEq)]
pub struct X264 {
    audio_codec: String,
    video_codec: String,
    profile: Option<String>,
    level: Option<String>,
    passes: Option<u32>,
}

impl X264 {
    pub fn new(audio_codec: &str, video_codec: &str) -> Result<Self> {
        let mut format = Self {
            audio_codec: String::new(),
            video_codec: String::new(),
            profile: None,
            level: None,
            passes: None,
        };
        format.set_audio_codec(audio_codec)?;
        format.set_video_codec(video_codec)?;
        Ok(format)
    }

    pub fn set_audio_codec(&mut self, codec: &str) -> Result<&mut Self> {
        if !X264_AUDIO_CODECS.contains(&codec) {
            return Err(FfargsError::InvalidArgument(format!(
                "Wrong audio codec value for {}, available formats are {}",
                codec,
                X264_AUDIO_CODECS.join(", ")
            )));
        }
        self.audio_codec = codec.to_string();
        Ok(self)
    }

    pub fn set_video_codec(&mut self, codec: &str) -> Result<&mut Self> {
        if !X264_VIDEO_CODECS.contains(&codec) {
            return Err(FfargsError::InvalidArgument(format!(
                "Wrong video codec value for {}, available formats are {}",
                codec,
                X264_VIDEO_CODECS.join(", ")
            )));
        }
        self.video_codec = codec.to_string();
        Ok(self)
    }

    /// Profile is one of baseline, main, high, high10, high422, high444.
    pub fn set_profile<S1: Into<String>, S2: Into<String>>(&mut self, profile: S1, level: S2) -> &mut Self {
        self.profile = Some(profile.into());
        self.level = Some(level.into());
        self
    }

    /// Baseline profile at level 3.0
    pub fn set_default_profile(&mut self) -> &mut Self {
        self.set_profile("baseline", "3.0")
    }

    pub fn set_passes(&mut self, passes: i64) -> Result<&mut Self> {
        if !(1..=2).contains(&passes) {
            return Err(FfargsError::InvalidArgument(format!(
                "Wrong passes value: {}",
                passes
            )));
        }
        self.passes = Some(passes as u32);
        Ok(self)
    }
}

impl Default for X264 {
    fn default() -> Self {
        Self {
            audio_codec: "libfaac".to_string(),
            video_codec: "libx264".to_string(),
            profile: None,
            level: None,
            passes: None,
        }
    }
}

impl OutputFormat for X264 {
    fn video_codec(&self) -> &str {
        &self.video_codec
    }

    fn audio_codec(&self) -> &str {
        &self.audio_codec
    }

    fn supports_b_frames(&self) -> bool {
        true
    }

    fn modulus(&self) -> u32 {
        2
    }

    fn passes(&self) -> Option<u32> {
        self.passes
    }

    fn extra_params(&self) -> Vec<String> {
        match (self.profile.as_deref(), self.level.as_deref()) {
            (Some(profile), Some(level)) if !profile.is_empty() && !level.is_empty() => vec![
                "-profile:v".to_string(),
                profile.to_string(),
                "-level:v".to_string(),
                level.to_string(),
            ],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passes_must_be_one_or_two() {
        let mut format = X264::default();
        assert!(format.set_passes(1).is_ok());
        assert!(format.set_passes(2).is_ok());
        assert_eq!(format.passes(), Some(2));
        assert!(matches!(format.set_passes(0), Err(FfargsError::InvalidArgument(_))));
        assert!(matches!(format.set_passes(3), Err(FfargsError::InvalidArgument(_))));
        assert_eq!(format.passes(), Some(2));
    }

    #[test]
    fn test_extra_params_need_profile_and_level() {
        let mut format = X264::default();
        assert!(format.extra_params().is_empty());

        format.set_default_profile();
        assert_eq!(
            format.extra_params(),
            vec!["-profile:v", "baseline", "-level:v", "3.0"]
        );

        format.set_profile("high", "");
        assert!(format.extra_params().is_empty());
    }

    #[test]
    fn test_codec_selection() {
        assert!(X264::new("libmp3lame", "libx264").is_ok());
        assert!(matches!(X264::new("aac", "libx264"), Err(FfargsError::InvalidArgument(_))));
        assert!(matches!(X264::new("libfaac", "libx265"), Err(FfargsError::InvalidArgument(_))));

        let format = X264::default();
        assert_eq!(format.video_codec(), "libx264");
        assert_eq!(format.audio_codec(), "libfaac");
        assert_eq!(format.modulus(), 2);
        assert!(format.supports_b_frames());
    }
}
