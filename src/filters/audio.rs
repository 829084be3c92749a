use crate::format::OutputFormat;
use crate::stream::StreamSet;

use super::Filter;

/// Stereo
pub const DEFAULT_CHANNELS: u32 = 2;

/// Sets the audio channel count and sample rate. Values are passed through
/// untouched; ffmpeg decides whether it accepts them.
#[derive(Debug, Clone)]
pub struct AudioResampleFilter {
    rate: u32,
    channels: u32,
    priority: i32,
}

impl AudioResampleFilter {
    pub fn new(rate: u32, channels: u32) -> Self {
        Self {
            rate,
            channels,
            priority: 0,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl Filter for AudioResampleFilter {
    fn name(&self) -> &'static str {
        "audio-resample"
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn apply(&self, _streams: &StreamSet, _format: &dyn OutputFormat) -> Vec<String> {
        vec![
            "-ac".to_string(),
            self.channels.to_string(),
            "-ar".to_string(),
            self.rate.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::X264;

    #[test]
    fn test_resample_tokens() {
        let filter = AudioResampleFilter::new(44100, DEFAULT_CHANNELS);
        let tokens = filter.apply(&StreamSet::default(), &X264::default());
        assert_eq!(tokens, vec!["-ac", "2", "-ar", "44100"]);
    }

    #[test]
    fn test_out_of_range_values_pass_through() {
        let filter = AudioResampleFilter::new(1, 64);
        let tokens = filter.apply(&StreamSet::default(), &X264::default());
        assert_eq!(tokens, vec!["-ac", "64", "-ar", "1"]);
    }
}
