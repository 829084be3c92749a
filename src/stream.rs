//! Read-only view of probed media streams.
//!
//! The shape mirrors `ffprobe -print_format json -show_streams` output so a
//! probe dump can be loaded directly; only the fields the filters read are kept.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use crate::error::{FfargsError, Result};
use crate::geometry::Dimension;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamMetadata {
    #[serde(default)]
    pub codec_type: Option<String>,
    #[serde(default)]
    pub width: Option<i64>,
    #[serde(default)]
    pub height: Option<i64>,
    #[serde(default)]
    pub tags: Option<BTreeMap<String, Value>>,
}

impl StreamMetadata {
    /// Video stream with the given geometry and no tags
    pub fn video(width: i64, height: i64) -> Self {
        Self {
            codec_type: Some("video".to_string()),
            width: Some(width),
            height: Some(height),
            tags: None,
        }
    }

    pub fn audio() -> Self {
        Self {
            codec_type: Some("audio".to_string()),
            ..Self::default()
        }
    }

    pub fn with_tag<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.tags
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn is_video(&self) -> bool {
        self.codec_type.as_deref() == Some("video")
    }

    /// Stream geometry, or `None` when missing or not positive.
    pub fn dimensions(&self) -> Option<Dimension> {
        match (self.width, self.height) {
            (Some(w), Some(h)) => Dimension::new(w, h).ok(),
            _ => None,
        }
    }

    pub fn tag(&self, key: &str) -> Option<&Value> {
        self.tags.as_ref()?.get(key)
    }

    /// Numeric value of the `rotate` tag. ffprobe reports it as a string,
    /// hand-written probe data often as a number; both are accepted.
    pub fn rotate_tag(&self) -> Option<f64> {
        match self.tag("rotate")? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

/// All streams of one probed input, in probe order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamSet {
    #[serde(default)]
    pub streams: Vec<StreamMetadata>,
}

impl StreamSet {
    pub fn new(streams: Vec<StreamMetadata>) -> Self {
        Self { streams }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let set: StreamSet = serde_json::from_str(content)?;
        debug!("Loaded {} streams from probe data", set.streams.len());
        Ok(set)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            FfargsError::Probe(format!("Failed to read probe file {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    pub fn videos(&self) -> impl Iterator<Item = &StreamMetadata> {
        self.streams.iter().filter(|s| s.is_video())
    }

    /// First video stream; video filters only look at this one.
    pub fn first_video(&self) -> Option<&StreamMetadata> {
        self.videos().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ffprobe_output() {
        let json = r#"{
            "streams": [
                {"index": 0, "codec_type": "audio", "sample_rate": "48000"},
                {"index": 1, "codec_type": "video", "width": 1920, "height": 1080,
                 "tags": {"rotate": "90", "language": "und"}}
            ]
        }"#;

        let set = StreamSet::from_json(json).unwrap();
        assert_eq!(set.streams.len(), 2);
        assert_eq!(set.streams[0].codec_type.as_deref(), Some("audio"));
        assert_eq!(set.videos().count(), 1);

        let video = set.first_video().unwrap();
        assert_eq!(video.dimensions(), Some(Dimension::new(1920, 1080).unwrap()));
        assert_eq!(video.rotate_tag(), Some(90.0));
    }

    #[test]
    fn test_missing_geometry_and_tags() {
        let set = StreamSet::from_json(r#"{"streams":[{"codec_type":"video"}]}"#).unwrap();
        let video = set.first_video().unwrap();
        assert!(video.dimensions().is_none());
        assert!(video.rotate_tag().is_none());

        let zero = StreamMetadata::video(0, 720);
        assert!(zero.dimensions().is_none());
    }

    #[test]
    fn test_numeric_rotate_tag() {
        let stream = StreamMetadata::video(640, 480).with_tag("rotate", -90);
        assert_eq!(stream.rotate_tag(), Some(-90.0));

        let junk = StreamMetadata::video(640, 480).with_tag("rotate", "sideways");
        assert!(junk.rotate_tag().is_none());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(StreamSet::from_json("{not json"), Err(FfargsError::Json(_))));
    }
}
