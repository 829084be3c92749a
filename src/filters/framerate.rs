use crate::format::OutputFormat;
use crate::geometry::FrameRate;
use crate::stream::StreamSet;

use super::Filter;

/// Changes the output frame rate; with B-frame capable formats it also sets
/// the B-frame strategy and the GOP size.
#[derive(Debug, Clone)]
pub struct FrameRateFilter {
    rate: FrameRate,
    gop: u32,
    priority: i32,
}

impl FrameRateFilter {
    pub fn new(rate: FrameRate, gop: u32) -> Self {
        Self {
            rate,
            gop,
            priority: 0,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl Filter for FrameRateFilter {
    fn name(&self) -> &'static str {
        "framerate"
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn apply(&self, _streams: &StreamSet, format: &dyn OutputFormat) -> Vec<String> {
        let mut tokens = vec!["-r".to_string(), self.rate.to_string()];

        if format.supports_b_frames() {
            tokens.extend([
                "-b_strategy".to_string(),
                "1".to_string(),
                "-bf".to_string(),
                "3".to_string(),
                "-g".to_string(),
                self.gop.to_string(),
            ]);
        }

        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::X264;

    #[derive(Debug)]
    struct NoBFrames(X264);

    impl OutputFormat for NoBFrames {
        fn video_codec(&self) -> &str {
            self.0.video_codec()
        }

        fn audio_codec(&self) -> &str {
            self.0.audio_codec()
        }

        fn supports_b_frames(&self) -> bool {
            false
        }

        fn modulus(&self) -> u32 {
            self.0.modulus()
        }

        fn passes(&self) -> Option<u32> {
            None
        }

        fn extra_params(&self) -> Vec<String> {
            Vec::new()
        }
    }

    #[test]
    fn test_b_frame_format_gets_gop() {
        let filter = FrameRateFilter::new(FrameRate::new(25.0).unwrap(), 250);
        let tokens = filter.apply(&StreamSet::default(), &X264::default());
        assert_eq!(tokens, vec!["-r", "25", "-b_strategy", "1", "-bf", "3", "-g", "250"]);
    }

    #[test]
    fn test_plain_format_only_sets_rate() {
        let filter = FrameRateFilter::new(FrameRate::new(29.97).unwrap(), 30);
        let tokens = filter.apply(&StreamSet::default(), &NoBFrames(X264::default()));
        assert_eq!(tokens, vec!["-r", "29.97"]);
    }
}
