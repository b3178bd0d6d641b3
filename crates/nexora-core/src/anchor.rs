//! Anchors: the fixed reference points an animation is laid out around.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::AnchorRole;

/// A named point in normalized space (0..1 per axis).
///
/// Anchors are built once from configuration and never change while the
/// scene is mounted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub name: String,
    pub position: DVec2,
    /// Glyph radius in pixels.
    pub radius: f64,
    /// CSS-style color tag, e.g. `#ef4444`.
    pub color: String,
    #[serde(default)]
    pub role: AnchorRole,
}

impl Anchor {
    pub fn new(
        name: impl Into<String>,
        x: f64,
        y: f64,
        radius: f64,
        color: impl Into<String>,
        role: AnchorRole,
    ) -> Self {
        Self {
            name: name.into(),
            position: DVec2::new(x, y),
            radius,
            color: color.into(),
            role,
        }
    }

    /// Build from percentage coordinates (0..100), as page layouts specify them.
    pub fn from_percent(
        name: impl Into<String>,
        x_pct: f64,
        y_pct: f64,
        radius: f64,
        color: impl Into<String>,
        role: AnchorRole,
    ) -> Self {
        Self::new(name, x_pct / 100.0, y_pct / 100.0, radius, color, role)
    }
}

/// Index of the first defended anchor, if any.
pub fn defended_index(anchors: &[Anchor]) -> Option<usize> {
    anchors.iter().position(|a| a.role == AnchorRole::Defended)
}

/// Indices of anchors events may originate from.
pub fn source_indices(anchors: &[Anchor]) -> Vec<usize> {
    anchors
        .iter()
        .enumerate()
        .filter(|(_, a)| a.role.is_source())
        .map(|(i, _)| i)
        .collect()
}

/// Indices of anchors a beam from `source` may aim at.
/// Excludes the source itself and anything sitting on the same spot.
pub fn target_indices(anchors: &[Anchor], source: usize) -> Vec<usize> {
    let origin = anchors.get(source).map(|a| a.position);
    anchors
        .iter()
        .enumerate()
        .filter(|(i, a)| *i != source && a.role.is_target() && Some(a.position) != origin)
        .map(|(i, _)| i)
        .collect()
}
