use std::path::Path;
use tracing::info;

use crate::filters::{AudioFilters, Filter, FilterChain, VideoFilters};
use crate::format::OutputFormat;
use crate::stream::StreamSet;

use super::{MediaCommand, MediaCommandBuilder};

/// One input's probed streams plus the filters registered for its transcode.
#[derive(Debug, Default)]
pub struct TranscodeJob {
    streams: StreamSet,
    filters: FilterChain,
}

impl TranscodeJob {
    pub fn new(streams: StreamSet) -> Self {
        Self {
            streams,
            filters: FilterChain::new(),
        }
    }

    /// Register a filter built by hand, e.g. one with a custom priority
    pub fn add_filter(&mut self, filter: Box<dyn Filter>) -> &mut Self {
        self.filters.add(filter);
        self
    }

    pub fn filters(&mut self) -> VideoFilters<'_> {
        VideoFilters::new(&mut self.filters)
    }

    pub fn audio_filters(&mut self) -> AudioFilters<'_> {
        AudioFilters::new(&mut self.filters)
    }

    /// Filter tokens in priority order followed by the format's extra parameters
    pub fn render(&self, format: &dyn OutputFormat) -> Vec<String> {
        let mut tokens = self.filters.render(&self.streams, format);
        tokens.extend(format.extra_params());
        info!(
            "Rendered {} filters into {} tokens",
            self.filters.len(),
            tokens.len()
        );
        tokens
    }

    /// Full transcoder invocation for this job
    pub fn command<P: AsRef<Path>>(
        &self,
        builder: &MediaCommandBuilder,
        input_path: P,
        output_path: P,
        format: &dyn OutputFormat,
        extra_options: &[String],
    ) -> MediaCommand {
        builder.transcode(
            input_path,
            output_path,
            format.video_codec(),
            format.audio_codec(),
            self.render(format),
            extra_options,
        )
    }
}
