//! Scale/pad filter-graph expressions.

use crate::format::OutputFormat;
use crate::geometry::{round_to_even, Dimension};
use crate::stream::StreamSet;

use super::Filter;

/// Decimal places of the target ratio embedded in padded expressions
const RATIO_PRECISION: u32 = 2;

/// How a stream is brought to the target size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalePlan {
    /// Leave the stream at its natural size
    Keep,
    /// Width overflows: fix width, derive an even height
    FitWidth { width: u32 },
    /// Height overflows: fix height, derive an even width
    FitHeight { height: u32 },
    /// Shrink if needed, then pad to exactly the target, content centred
    Padded { target: Dimension },
}

/// Where scaled content lands inside a padded frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PadLayout {
    pub scaled: Dimension,
    pub x: u32,
    pub y: u32,
    pub output: Dimension,
}

impl ScalePlan {
    /// Pick the plan for `target`. Without padding a missing source
    /// geometry or a source that already fits yields `Keep`; when both
    /// axes overflow the width branch wins.
    pub fn resolve(target: &Dimension, source: Option<&Dimension>, padding: bool) -> Self {
        if padding {
            return ScalePlan::Padded { target: *target };
        }

        match source {
            None => ScalePlan::Keep,
            Some(source) if source.fits_within(target) => ScalePlan::Keep,
            Some(source) if source.width() > target.width() => ScalePlan::FitWidth {
                width: target.width(),
            },
            Some(_) => ScalePlan::FitHeight {
                height: target.height(),
            },
        }
    }

    /// ffmpeg filter-graph text, `None` for `Keep`
    pub fn expression(&self) -> Option<String> {
        match self {
            ScalePlan::Keep => None,
            ScalePlan::FitWidth { width } => Some(format!("scale={}:trunc(out_w/a/2)*2", width)),
            ScalePlan::FitHeight { height } => Some(format!("scale=trunc(out_h/a/2)*2:{}", height)),
            ScalePlan::Padded { target } => Some(padded_expression(target)),
        }
    }

    /// Frame size for a `source` stream with the derived side rounded to the
    /// nearest even value. ffmpeg evaluates `trunc(../2)*2` instead, so the
    /// frame it writes can be 2 pixels smaller on the derived side.
    pub fn output_dimension(&self, source: &Dimension) -> Dimension {
        let (w, h) = (source.width() as f64, source.height() as f64);
        let computed = match self {
            ScalePlan::Keep => return *source,
            ScalePlan::Padded { target } => return *target,
            ScalePlan::FitWidth { width } => (*width, round_to_even(h * *width as f64 / w)),
            ScalePlan::FitHeight { height } => (round_to_even(w * *height as f64 / h), *height),
        };
        Dimension::new(computed.0 as i64, computed.1 as i64).unwrap_or(*source)
    }
}

/// Geometry of the padded expression applied to `source`.
pub fn pad_layout(target: &Dimension, source: &Dimension) -> PadLayout {
    let (tw, th) = (target.width(), target.height());

    let scaled = if source.fits_within(target) {
        *source
    } else {
        let target_aspect = target.ratio().rounded(RATIO_PRECISION);
        let aspect = source.ratio().value();
        let (iw, ih) = (source.width() as f64, source.height() as f64);

        let width = if aspect >= target_aspect {
            tw
        } else {
            ((th as f64 * iw) / ih).round() as u32
        };
        let height = if aspect <= target_aspect {
            th
        } else {
            ((tw as f64 * ih) / iw).round() as u32
        };

        // the rounded target ratio can push the derived side a pixel past the frame
        Dimension::new(width.clamp(1, tw) as i64, height.clamp(1, th) as i64).unwrap_or(*target)
    };

    PadLayout {
        x: (tw - scaled.width()) / 2,
        y: (th - scaled.height()) / 2,
        scaled,
        output: *target,
    }
}

fn padded_expression(target: &Dimension) -> String {
    let (w, h) = (target.width(), target.height());
    let a = target.ratio().rounded(RATIO_PRECISION);
    let overflow = format!("min(1\\,gt(iw\\,{w})+gt(ih\\,{h}))");

    let width = format!(
        "{overflow}*(gte(a\\,{a})*{w}+lt(a\\,{a})*(({h}*iw)/ih))+not({overflow})*iw"
    );
    let height = format!(
        "{overflow}*(lte(a\\,{a})*{h}+gt(a\\,{a})*(({w}*ih)/iw))+not({overflow})*ih"
    );

    format!("scale={width}:{height},pad={w}:{h}:(ow-iw)/2:(oh-ih)/2")
}

/// Always scales down-only and pads to the exact target size.
#[derive(Debug, Clone)]
pub struct ScaleFilter {
    dimension: Dimension,
    priority: i32,
}

impl ScaleFilter {
    pub fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            priority: 0,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl Filter for ScaleFilter {
    fn name(&self) -> &'static str {
        "scale"
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn apply(&self, _streams: &StreamSet, _format: &dyn OutputFormat) -> Vec<String> {
        vec!["-vf".to_string(), padded_expression(&self.dimension)]
    }
}
