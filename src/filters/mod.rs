// Filters turn probed stream metadata into ffmpeg argument fragments.
//
// - Filter: the single capability every variant implements
// - FilterChain: ordered registry owned by a transcode job
// - builder: fluent VideoFilters / AudioFilters front-ends over a chain

pub mod audio;
pub mod builder;
pub mod framerate;
pub mod resize;
pub mod rotate;
pub mod scale;
pub mod scale_rotate;
pub mod synchronize;

use std::fmt;
use tracing::debug;

pub use audio::*;
pub use builder::*;
pub use framerate::*;
pub use resize::*;
pub use rotate::*;
pub use scale::*;
pub use scale_rotate::*;
pub use synchronize::*;

use crate::format::OutputFormat;
use crate::stream::StreamSet;

/// A pure function from stream metadata and target format to ffmpeg tokens.
///
/// Implementations are immutable once built; all validation happens in their
/// constructors so `apply` never fails.
pub trait Filter: fmt::Debug {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Lower values are applied first
    fn priority(&self) -> i32;

    /// Produce the ordered argument tokens for this filter
    fn apply(&self, streams: &StreamSet, format: &dyn OutputFormat) -> Vec<String>;
}

/// Ordered collection of filters registered on one job.
///
/// Filters are applied by ascending priority; equal priorities keep their
/// registration order.
#[derive(Debug, Default)]
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, filter: Box<dyn Filter>) -> &mut Self {
        debug!(
            "Registering {} filter with priority {}",
            filter.name(),
            filter.priority()
        );
        self.filters.push(filter);
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Filters in application order
    pub fn ordered(&self) -> Vec<&dyn Filter> {
        let mut ordered: Vec<&dyn Filter> = self.filters.iter().map(|f| f.as_ref()).collect();
        // sort_by_key is stable, which keeps registration order for ties
        ordered.sort_by_key(|f| f.priority());
        ordered
    }

    /// Concatenate the tokens of every filter in application order
    pub fn render(&self, streams: &StreamSet, format: &dyn OutputFormat) -> Vec<String> {
        let mut tokens = Vec::new();
        for filter in self.ordered() {
            let produced = filter.apply(streams, format);
            debug!("{} filter produced {:?}", filter.name(), produced);
            tokens.extend(produced);
        }
        tokens
    }
}
