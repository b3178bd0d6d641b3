//! Fundamental geometric and timing types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Size of the drawing surface in pixels.
///
/// Anchors and trajectories live in normalized space (0..1 per axis) and are
/// only converted to pixels through a viewport, so a resize never touches
/// simulation state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either side is zero, negative, or NaN (hidden container).
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    /// Length of the shorter side.
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Normalized position to pixels.
    pub fn to_pixels(&self, normalized: DVec2) -> DVec2 {
        normalized * self.size()
    }

    /// Pixel position to normalized space. `None` for an empty viewport.
    pub fn to_normalized(&self, pixels: DVec2) -> Option<DVec2> {
        if self.is_empty() {
            None
        } else {
            Some(pixels / self.size())
        }
    }
}

/// A length that scales with the shorter viewport side, plus a fixed pixel offset.
///
/// The globe animation, for instance, sizes its globe at 15% of the shorter
/// side and places the shield ring 30 px beyond it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub fraction: f64,
    #[serde(default)]
    pub offset_px: f64,
}

impl Extent {
    pub fn new(fraction: f64, offset_px: f64) -> Self {
        Self {
            fraction,
            offset_px,
        }
    }

    /// Resolve to pixels for the given viewport.
    pub fn resolve(&self, viewport: &Viewport) -> f64 {
        self.fraction * viewport.min_side() + self.offset_px
    }
}

/// Frame time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameTime {
    /// Number of simulated frames so far.
    pub frame: u64,
    /// Wall-clock timestamp of the latest frame (milliseconds).
    pub now_ms: f64,
}

impl FrameTime {
    /// Advance by one frame stamped at `now_ms`.
    pub fn advance(&mut self, now_ms: f64) {
        self.frame += 1;
        self.now_ms = now_ms;
    }
}
