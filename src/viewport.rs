//! Render surface dimensions and responsive scaling

use serde::{Deserialize, Serialize};

use crate::consts::{COMPACT_HEIGHT_THRESHOLD, REFERENCE_HEIGHT};

/// Current render surface size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Create a viewport, clamping degenerate sizes to 1 px
    pub fn new(width: f32, height: f32) -> Self {
        let clamp = |v: f32| if v.is_finite() && v >= 1.0 { v } else { 1.0 };
        Self {
            width: clamp(width),
            height: clamp(height),
        }
    }

    /// Ratio of the surface height to the reference height
    #[inline]
    pub fn scale_ratio(&self) -> f32 {
        self.height / REFERENCE_HEIGHT
    }

    /// Scale an authored constant to this surface
    #[inline]
    pub fn responsive(&self, base: f32) -> f32 {
        base * self.scale_ratio()
    }

    /// Short surfaces (phones in landscape) use the compact sprite scales
    pub fn is_compact(&self) -> bool {
        self.height <= COMPACT_HEIGHT_THRESHOLD
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1920.0, REFERENCE_HEIGHT)
    }
}
