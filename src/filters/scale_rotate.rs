//! Combined scale and rotate filter with the fixed trailing directives.

use crate::format::OutputFormat;
use crate::geometry::Dimension;
use crate::stream::StreamSet;

use super::{Filter, Rotation, ScalePlan};

/// Clears per-stream rotation metadata so players do not rotate twice
pub const STRIP_ROTATION: [&str; 2] = ["-metadata:s:v", "rotate=\"0\""];

/// Moves the index to the front of the container
pub const FAST_START: [&str; 2] = ["-movflags", "faststart"];

/// Merge the optional scale and rotation stages into one `-vf` value.
///
/// Scale comes before rotation. `-vf` is left out when neither stage is
/// present; the metadata strip and faststart pairs are always appended.
pub fn assemble_video_chain(scale: Option<&str>, rotation: Option<&str>) -> Vec<String> {
    let graph = match (scale, rotation) {
        (Some(scale), Some(rotation)) => Some(format!("{},{}", scale, rotation)),
        (Some(stage), None) | (None, Some(stage)) => Some(stage.to_string()),
        (None, None) => None,
    };

    let mut tokens = Vec::with_capacity(6);
    if let Some(graph) = graph {
        tokens.push("-vf".to_string());
        tokens.push(graph);
    }
    tokens.extend(STRIP_ROTATION.iter().map(|s| s.to_string()));
    tokens.extend(FAST_START.iter().map(|s| s.to_string()));
    tokens
}

/// Scales to a target size and rotates in the same filter graph.
#[derive(Debug, Clone)]
pub struct ScaleRotateFilter {
    dimension: Dimension,
    padding: bool,
    rotation: Rotation,
    priority: i32,
}

impl ScaleRotateFilter {
    pub fn new(dimension: Dimension, padding: bool, rotation: Rotation) -> Self {
        Self {
            dimension,
            padding,
            rotation,
            priority: 0,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl Filter for ScaleRotateFilter {
    fn name(&self) -> &'static str {
        "scale-rotate"
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn apply(&self, streams: &StreamSet, _format: &dyn OutputFormat) -> Vec<String> {
        let video = streams.first_video();
        let source = video.and_then(|v| v.dimensions());

        let scale = ScalePlan::resolve(&self.dimension, source.as_ref(), self.padding).expression();
        let rotation = self.rotation.resolve(video);

        assemble_video_chain(scale.as_deref(), rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::X264;
    use crate::stream::StreamMetadata;

    const SUFFIX: [&str; 4] = ["-metadata:s:v", "rotate=\"0\"", "-movflags", "faststart"];

    fn apply(filter: &ScaleRotateFilter, stream: StreamMetadata) -> Vec<String> {
        filter.apply(&StreamSet::new(vec![stream]), &X264::default())
    }

    #[test]
    fn test_assembler_combinations() {
        assert_eq!(assemble_video_chain(None, None), SUFFIX.to_vec());

        let both = assemble_video_chain(Some("scale=640:trunc(out_w/a/2)*2"), Some("transpose=1"));
        assert_eq!(both[..2], ["-vf", "scale=640:trunc(out_w/a/2)*2,transpose=1"]);
        assert_eq!(both[2..], SUFFIX);

        let rotate_only = assemble_video_chain(None, Some("hflip,vflip"));
        assert_eq!(rotate_only[..2], ["-vf", "hflip,vflip"]);

        let scale_only = assemble_video_chain(Some("scale=trunc(out_h/a/2)*2:720"), None);
        assert_eq!(scale_only[..2], ["-vf", "scale=trunc(out_h/a/2)*2:720"]);
        assert_eq!(scale_only.len(), 6);
    }

    #[test]
    fn test_downscale_same_aspect() {
        let filter = ScaleRotateFilter::new(Dimension::new(1280, 720).unwrap(), false, Rotation::Auto);
        let tokens = apply(&filter, StreamMetadata::video(1920, 1080));
        assert_eq!(
            tokens,
            vec![
                "-vf",
                "scale=1280:trunc(out_w/a/2)*2",
                "-metadata:s:v",
                "rotate=\"0\"",
                "-movflags",
                "faststart"
            ]
        );
    }

    #[test]
    fn test_scale_then_auto_rotation() {
        let filter = ScaleRotateFilter::new(Dimension::new(1280, 720).unwrap(), false, Rotation::Auto);
        let tokens = apply(&filter, StreamMetadata::video(1920, 1080).with_tag("rotate", "90"));
        assert_eq!(tokens[1], "scale=1280:trunc(out_w/a/2)*2,transpose=1");
    }

    #[test]
    fn test_small_source_unrotated_has_only_suffix() {
        let filter = ScaleRotateFilter::new(Dimension::new(1280, 720).unwrap(), false, Rotation::Auto);
        assert_eq!(apply(&filter, StreamMetadata::video(640, 360)), SUFFIX.to_vec());
    }

    #[test]
    fn test_missing_video_stream_with_explicit_angle() {
        let filter = ScaleRotateFilter::new(Dimension::new(1280, 720).unwrap(), false, Rotation::Rotate270);
        let tokens = apply(&filter, StreamMetadata::audio());
        assert_eq!(tokens[..2], ["-vf", "transpose=2"]);
        assert_eq!(tokens[2..], SUFFIX);
    }

    #[test]
    fn test_padding_with_rotation() {
        let filter = ScaleRotateFilter::new(Dimension::new(640, 480).unwrap(), true, Rotation::Rotate180);
        let tokens = apply(&filter, StreamMetadata::video(800, 450));
        assert!(tokens[1].contains("pad=640:480:(ow-iw)/2:(oh-ih)/2,hflip,vflip"));
        assert_eq!(tokens[2..], SUFFIX);
    }
}
