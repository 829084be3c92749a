//! Fluent front-ends that register filters on a job's chain.
//!
//! Each builder mutably borrows the chain it writes to, so registration has
//! exactly one owner and no filter ever reaches back into the job.

use crate::geometry::{Dimension, FrameRate};

use super::{
    AudioResampleFilter, FilterChain, FrameRateFilter, ResizeFilter, ResizeMode, RotateFilter,
    Rotation, ScaleFilter, ScaleRotateFilter, SynchronizeFilter, DEFAULT_CHANNELS,
};

pub struct AudioFilters<'a> {
    chain: &'a mut FilterChain,
}

impl<'a> AudioFilters<'a> {
    pub fn new(chain: &'a mut FilterChain) -> Self {
        Self { chain }
    }

    /// Resamples the audio track
    pub fn resample(&mut self, rate: u32, channels: u32) -> &mut Self {
        self.chain.add(Box::new(AudioResampleFilter::new(rate, channels)));
        self
    }
}

pub struct VideoFilters<'a> {
    chain: &'a mut FilterChain,
}

impl<'a> VideoFilters<'a> {
    pub fn new(chain: &'a mut FilterChain) -> Self {
        Self { chain }
    }

    /// Sets the output frame size with `-s`
    pub fn resize(&mut self, dimension: Dimension, mode: ResizeMode, force_standards: bool) -> &mut Self {
        self.chain
            .add(Box::new(ResizeFilter::new(dimension, mode, force_standards)));
        self
    }

    /// Scales to `dimension` and rotates in one filter graph
    pub fn scale(&mut self, dimension: Dimension, padding: bool, rotation: Rotation) -> &mut Self {
        self.chain
            .add(Box::new(ScaleRotateFilter::new(dimension, padding, rotation)));
        self
    }

    /// Scales down and pads to exactly `dimension`
    pub fn pad_scale(&mut self, dimension: Dimension) -> &mut Self {
        self.chain.add(Box::new(ScaleFilter::new(dimension)));
        self
    }

    pub fn rotate(&mut self, rotation: Rotation) -> &mut Self {
        self.chain.add(Box::new(RotateFilter::new(rotation)));
        self
    }

    pub fn framerate(&mut self, rate: FrameRate, gop: u32) -> &mut Self {
        self.chain.add(Box::new(FrameRateFilter::new(rate, gop)));
        self
    }

    /// Synchronizes audio and video
    pub fn synchronize(&mut self) -> &mut Self {
        self.chain.add(Box::new(SynchronizeFilter::new()));
        self
    }

    /// Resamples the audio track to `rate` in stereo
    pub fn audio_resample(&mut self, rate: u32) -> &mut Self {
        self.resample(rate, DEFAULT_CHANNELS)
    }

    pub fn resample(&mut self, rate: u32, channels: u32) -> &mut Self {
        AudioFilters::new(&mut *self.chain).resample(rate, channels);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::X264;
    use crate::stream::{StreamMetadata, StreamSet};

    #[test]
    fn test_registration_order_is_kept() {
        let mut chain = FilterChain::new();
        VideoFilters::new(&mut chain)
            .synchronize()
            .audio_resample(22050)
            .rotate(Rotation::Rotate90);

        let names: Vec<_> = chain.ordered().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["synchronize", "audio-resample", "rotate"]);

        let streams = StreamSet::new(vec![StreamMetadata::video(640, 480)]);
        let tokens = chain.render(&streams, &X264::default());
        assert_eq!(
            tokens,
            vec![
                "-async", "1", "-metadata:s:v:0", "start_time=0",
                "-ac", "2", "-ar", "22050",
                "-vf", "transpose=1", "-metadata:s:v:0", "rotate=0",
            ]
        );
    }

    #[test]
    fn test_audio_builder() {
        let mut chain = FilterChain::new();
        AudioFilters::new(&mut chain).resample(48000, 1).resample(8000, 6);
        assert_eq!(chain.len(), 2);

        let tokens = chain.render(&StreamSet::default(), &X264::default());
        assert_eq!(tokens, vec!["-ac", "1", "-ar", "48000", "-ac", "6", "-ar", "8000"]);
    }

    #[test]
    fn test_every_video_operation_registers_one_filter() {
        let mut chain = FilterChain::new();
        let size = Dimension::new(1280, 720).unwrap();
        VideoFilters::new(&mut chain)
            .resize(size, ResizeMode::Fit, true)
            .scale(size, false, Rotation::Auto)
            .pad_scale(size)
            .rotate(Rotation::Auto)
            .framerate(FrameRate::new(30.0).unwrap(), 60)
            .synchronize()
            .resample(44100, 2);
        assert_eq!(chain.len(), 7);
    }
}
