//! Rotation from an explicit angle or the stream's `rotate` tag.

use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::error::{FfargsError, Result};
use crate::format::OutputFormat;
use crate::stream::{StreamMetadata, StreamSet};

use super::Filter;

// ffmpeg transpose codes:
// 0 = 90 counter-clockwise and vertical flip
// 1 = 90 clockwise
// 2 = 90 counter-clockwise
// 3 = 90 clockwise and vertical flip
const TRANSPOSE_90: &str = "transpose=1";
const FLIP_180: &str = "hflip,vflip";
const TRANSPOSE_270: &str = "transpose=2";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    /// Follow the stream's `rotate` tag
    #[default]
    Auto,
    Rotate90,
    /// Two chained flips, never a single 180 degree transform
    Rotate180,
    Rotate270,
}

impl Rotation {
    /// Explicit clockwise angle; only 90, 180 and 270 are accepted.
    pub fn from_degrees(degrees: i64) -> Result<Self> {
        match degrees {
            90 => Ok(Rotation::Rotate90),
            180 => Ok(Rotation::Rotate180),
            270 => Ok(Rotation::Rotate270),
            other => Err(FfargsError::InvalidArgument(format!(
                "Invalid angle value: {}",
                other
            ))),
        }
    }

    /// Explicit ffmpeg transpose code. Codes that also flip are rejected.
    pub fn from_transpose_code(code: u8) -> Result<Self> {
        match code {
            1 => Ok(Rotation::Rotate90),
            2 => Ok(Rotation::Rotate270),
            other => Err(FfargsError::InvalidArgument(format!(
                "Unsupported transpose code: {}",
                other
            ))),
        }
    }

    /// Map a `rotate` tag value; anything other than 90, 180, 270 or -90 is ignored.
    pub fn from_tag(value: f64) -> Option<Self> {
        if value == 90.0 {
            Some(Rotation::Rotate90)
        } else if value == 180.0 {
            Some(Rotation::Rotate180)
        } else if value == 270.0 || value == -90.0 {
            Some(Rotation::Rotate270)
        } else {
            None
        }
    }

    /// Filter-graph text, `None` for `Auto`
    pub fn filter(&self) -> Option<&'static str> {
        match self {
            Rotation::Auto => None,
            Rotation::Rotate90 => Some(TRANSPOSE_90),
            Rotation::Rotate180 => Some(FLIP_180),
            Rotation::Rotate270 => Some(TRANSPOSE_270),
        }
    }

    /// Rotation to apply to `stream`. An explicit angle always wins over the tag.
    pub fn resolve(&self, stream: Option<&StreamMetadata>) -> Option<&'static str> {
        if *self != Rotation::Auto {
            return self.filter();
        }

        let stream = stream?;
        let value = match stream.rotate_tag() {
            Some(value) => value,
            None => {
                if stream.tag("rotate").is_some() {
                    warn!("Ignoring non-numeric rotate tag {:?}", stream.tag("rotate"));
                }
                return None;
            }
        };

        match Rotation::from_tag(value) {
            Some(rotation) => {
                debug!("Auto-detected rotation {} from rotate tag", rotation);
                rotation.filter()
            }
            None => {
                warn!("Ignoring unrecognized rotate tag value {}", value);
                None
            }
        }
    }
}

impl FromStr for Rotation {
    type Err = FfargsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Rotation::Auto),
            "90" | TRANSPOSE_90 => Ok(Rotation::Rotate90),
            "180" | FLIP_180 => Ok(Rotation::Rotate180),
            "270" | TRANSPOSE_270 => Ok(Rotation::Rotate270),
            other => Err(FfargsError::InvalidArgument(format!(
                "Invalid angle value '{}'. Valid values: auto, 90, 180, 270",
                other
            ))),
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Rotation::Auto => "auto",
            Rotation::Rotate90 => "90",
            Rotation::Rotate180 => "180",
            Rotation::Rotate270 => "270",
        };
        write!(f, "{}", label)
    }
}

/// Rotation on its own. Emits nothing when no rotation applies.
#[derive(Debug, Clone)]
pub struct RotateFilter {
    rotation: Rotation,
    priority: i32,
}

impl RotateFilter {
    pub fn new(rotation: Rotation) -> Self {
        Self {
            rotation,
            priority: 0,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl Filter for RotateFilter {
    fn name(&self) -> &'static str {
        "rotate"
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn apply(&self, streams: &StreamSet, _format: &dyn OutputFormat) -> Vec<String> {
        match self.rotation.resolve(streams.first_video()) {
            Some(rotation) => vec![
                "-vf".to_string(),
                rotation.to_string(),
                "-metadata:s:v:0".to_string(),
                "rotate=0".to_string(),
            ],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::X264;

    fn tagged(value: impl Into<serde_json::Value>) -> StreamMetadata {
        StreamMetadata::video(1920, 1080).with_tag("rotate", value)
    }

    #[test]
    fn test_auto_detects_from_tag() {
        let auto = Rotation::Auto;
        assert_eq!(auto.resolve(Some(&tagged("90"))), Some("transpose=1"));
        assert_eq!(auto.resolve(Some(&tagged(180))), Some("hflip,vflip"));
        assert_eq!(auto.resolve(Some(&tagged("270"))), Some("transpose=2"));
        assert_eq!(auto.resolve(Some(&tagged(-90))), Some("transpose=2"));
    }

    #[test]
    fn test_auto_without_usable_tag() {
        let auto = Rotation::Auto;
        assert_eq!(auto.resolve(None), None);
        assert_eq!(auto.resolve(Some(&StreamMetadata::video(640, 480))), None);
        assert_eq!(auto.resolve(Some(&tagged("45"))), None);
        assert_eq!(auto.resolve(Some(&tagged(0))), None);
        assert_eq!(auto.resolve(Some(&tagged("upright"))), None);

        let other_tags = StreamMetadata::video(640, 480).with_tag("language", "eng");
        assert_eq!(auto.resolve(Some(&other_tags)), None);
    }

    #[test]
    fn test_explicit_angle_overrides_tag() {
        for tag in ["90", "180", "270", "-90"] {
            let stream = tagged(tag);
            assert_eq!(Rotation::Rotate90.resolve(Some(&stream)), Some("transpose=1"));
            assert_eq!(Rotation::Rotate180.resolve(Some(&stream)), Some("hflip,vflip"));
            assert_eq!(Rotation::Rotate270.resolve(Some(&stream)), Some("transpose=2"));
        }
        assert_eq!(Rotation::Rotate180.resolve(None), Some("hflip,vflip"));
    }

    #[test]
    fn test_invalid_angles_fail_at_construction() {
        assert!(matches!(Rotation::from_degrees(45), Err(FfargsError::InvalidArgument(_))));
        assert!(matches!(Rotation::from_degrees(-90), Err(FfargsError::InvalidArgument(_))));
        assert!(matches!("sideways".parse::<Rotation>(), Err(FfargsError::InvalidArgument(_))));
        assert!(matches!(Rotation::from_transpose_code(0), Err(FfargsError::InvalidArgument(_))));
    }

    #[test]
    fn test_parse_angles() {
        assert_eq!("auto".parse::<Rotation>().unwrap(), Rotation::Auto);
        assert_eq!("90".parse::<Rotation>().unwrap(), Rotation::Rotate90);
        assert_eq!("hflip,vflip".parse::<Rotation>().unwrap(), Rotation::Rotate180);
        assert_eq!("transpose=2".parse::<Rotation>().unwrap(), Rotation::Rotate270);
        assert_eq!(Rotation::from_transpose_code(1).unwrap(), Rotation::Rotate90);
        assert_eq!(Rotation::from_degrees(270).unwrap(), Rotation::Rotate270);
    }

    #[test]
    fn test_rotate_filter_tokens() {
        let streams = StreamSet::new(vec![StreamMetadata::audio(), tagged("90")]);
        let tokens = RotateFilter::new(Rotation::Auto).apply(&streams, &X264::default());
        assert_eq!(tokens, vec!["-vf", "transpose=1", "-metadata:s:v:0", "rotate=0"]);

        let plain = StreamSet::new(vec![StreamMetadata::video(640, 480)]);
        assert!(RotateFilter::new(Rotation::Auto).apply(&plain, &X264::default()).is_empty());
    }
}
