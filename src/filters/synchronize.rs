use crate::format::OutputFormat;
use crate::stream::StreamSet;

use super::Filter;

/// Keeps audio and video in sync by resampling audio and zeroing the video start time.
#[derive(Debug, Clone, Default)]
pub struct SynchronizeFilter {
    priority: i32,
}

impl SynchronizeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl Filter for SynchronizeFilter {
    fn name(&self) -> &'static str {
        "synchronize"
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn apply(&self, _streams: &StreamSet, _format: &dyn OutputFormat) -> Vec<String> {
        ["-async", "1", "-metadata:s:v:0", "start_time=0"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}
