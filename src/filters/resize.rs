use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{FfargsError, Result};
use crate::format::OutputFormat;
use crate::geometry::{AspectRatio, Dimension};
use crate::stream::StreamSet;

use super::Filter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMode {
    /// Exactly the target size, ratio not preserved
    #[default]
    Fit,
    /// Largest size inside the target that keeps the source ratio
    Inset,
    /// Target width, height derived from the source ratio
    Width,
    /// Target height, width derived from the source ratio
    Height,
}

impl FromStr for ResizeMode {
    type Err = FfargsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "fit" => Ok(ResizeMode::Fit),
            "inset" => Ok(ResizeMode::Inset),
            "width" => Ok(ResizeMode::Width),
            "height" => Ok(ResizeMode::Height),
            other => Err(FfargsError::InvalidArgument(format!(
                "Invalid resize mode '{}'. Valid modes: fit, inset, width, height",
                other
            ))),
        }
    }
}

/// Sets the output frame size with `-s`.
#[derive(Debug, Clone)]
pub struct ResizeFilter {
    dimension: Dimension,
    mode: ResizeMode,
    force_standards: bool,
    priority: i32,
}

impl ResizeFilter {
    pub fn new(dimension: Dimension, mode: ResizeMode, force_standards: bool) -> Self {
        Self {
            dimension,
            mode,
            force_standards,
            priority: 0,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Output size for a `source` stream, derived sides aligned to `modulus`
    pub fn computed_dimension(&self, source: &Dimension, modulus: u32) -> Dimension {
        let ratio = AspectRatio::from_dimension(source, self.force_standards);
        let target = self.dimension;

        let (width, height) = match self.mode {
            ResizeMode::Fit => return target,
            ResizeMode::Width => (target.width(), ratio.calculate_height(target.width(), modulus)),
            ResizeMode::Height => (ratio.calculate_width(target.height(), modulus), target.height()),
            ResizeMode::Inset => {
                if target.ratio().value() > ratio.value() {
                    (ratio.calculate_width(target.height(), modulus), target.height())
                } else {
                    (target.width(), ratio.calculate_height(target.width(), modulus))
                }
            }
        };

        Dimension::new(width as i64, height as i64).unwrap_or(target)
    }
}

impl Filter for ResizeFilter {
    fn name(&self) -> &'static str {
        "resize"
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn apply(&self, streams: &StreamSet, format: &dyn OutputFormat) -> Vec<String> {
        let Some(source) = streams.first_video().and_then(|v| v.dimensions()) else {
            return Vec::new();
        };

        let computed = self.computed_dimension(&source, format.modulus());
        vec!["-s".to_string(), computed.to_string()]
    }
}
