//! Width/height value types and the ratio arithmetic used by the scaling filters.

use std::fmt;

use crate::error::{FfargsError, Result};

/// Ratios that `AspectRatio::from_dimension` snaps to when standards are forced.
const STANDARD_RATIOS: &[(u32, u32)] = &[
    (4, 3),
    (16, 9),
    (16, 10),
    (3, 2),
    (5, 4),
    (1, 1),
    (21, 9),
    (9, 16),
    (3, 4),
    (235, 100),
    (239, 100),
    (240, 100),
    (185, 100),
];

/// Largest distance from a standard ratio that still snaps to it.
const STANDARD_TOLERANCE: f64 = 0.05;

/// Width and height of a video frame, both strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimension {
    width: u32,
    height: u32,
}

impl Dimension {
    pub fn new(width: i64, height: i64) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(FfargsError::InvalidArgument(format!(
                "Dimension must be positive, got {}x{}",
                width, height
            )));
        }
        let width = u32::try_from(width)
            .map_err(|_| FfargsError::InvalidArgument(format!("Width {} is too large", width)))?;
        let height = u32::try_from(height)
            .map_err(|_| FfargsError::InvalidArgument(format!("Height {} is too large", height)))?;

        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Exact width/height ratio.
    pub fn ratio(&self) -> AspectRatio {
        AspectRatio::new(self.width as f64 / self.height as f64)
    }

    /// True when this dimension fits inside `other` on both axes.
    pub fn fits_within(&self, other: &Dimension) -> bool {
        self.width <= other.width && self.height <= other.height
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRatio {
    value: f64,
}

impl AspectRatio {
    fn new(value: f64) -> Self {
        Self { value }
    }

    /// Ratio of `dimension`, optionally snapped to the closest standard ratio.
    pub fn from_dimension(dimension: &Dimension, force_standards: bool) -> Self {
        let exact = dimension.ratio();
        if !force_standards {
            return exact;
        }

        STANDARD_RATIOS
            .iter()
            .map(|&(w, h)| w as f64 / h as f64)
            .map(|standard| (standard, (standard - exact.value).abs()))
            .filter(|&(_, distance)| distance <= STANDARD_TOLERANCE)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(standard, _)| Self::new(standard))
            .unwrap_or(exact)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Ratio rounded to `precision` decimal places.
    pub fn rounded(&self, precision: u32) -> f64 {
        let factor = 10f64.powi(precision as i32);
        (self.value * factor).round() / factor
    }

    /// Height matching `width` under this ratio, aligned to `modulus`.
    ///
    /// Both neighbouring multiples of `modulus` are considered and the one
    /// whose resulting ratio is closest to this one wins. Results that would
    /// not fit a `u32` saturate at the largest aligned `u32`.
    pub fn calculate_height(&self, width: u32, modulus: u32) -> u32 {
        let exact = width as f64 / self.value;
        self.aligned(exact, modulus, |height| width as f64 / height as f64)
    }

    /// Width matching `height` under this ratio, aligned to `modulus`.
    pub fn calculate_width(&self, height: u32, modulus: u32) -> u32 {
        let exact = self.value * height as f64;
        self.aligned(exact, modulus, |width| width as f64 / height as f64)
    }

    fn aligned(&self, exact: f64, modulus: u32, ratio_of: impl Fn(u64) -> f64) -> u32 {
        let ceiling = multiple_down(u64::from(u32::MAX), modulus);
        // float to int casts saturate, so huge ratios land on u64::MAX here
        let up = multiple_up(exact.ceil() as u64, modulus).min(ceiling);
        let down = multiple_down(exact.floor() as u64, modulus).min(ceiling);

        let chosen = if down == 0 {
            up
        } else {
            let up_diff = (self.value - ratio_of(up)).abs();
            let down_diff = (self.value - ratio_of(down)).abs();
            if up_diff < down_diff { up } else { down }
        };
        u32::try_from(chosen).unwrap_or(u32::MAX)
    }
}

/// Smallest multiple of `modulus` that is >= `value`, saturating.
pub fn multiple_up(value: u64, modulus: u32) -> u64 {
    let modulus = u64::from(modulus.max(1));
    value.div_ceil(modulus).saturating_mul(modulus)
}

/// Largest multiple of `modulus` that is <= `value`.
pub fn multiple_down(value: u64, modulus: u32) -> u64 {
    let modulus = u64::from(modulus.max(1));
    (value / modulus) * modulus
}

/// Round `value` to the nearest even integer, never below 2.
pub fn round_to_even(value: f64) -> u32 {
    (((value / 2.0).round() * 2.0) as u32).max(2)
}

/// Output frame rate, strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRate(f64);

impl FrameRate {
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(FfargsError::InvalidArgument(format!(
                "Frame rate must be positive, got {}",
                value
            )));
        }
        Ok(Self(value))
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
