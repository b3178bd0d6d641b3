//! Frame view: the complete read-only scene handed to a renderer each frame.
//!
//! Everything here is in pixels for the viewport the frame was built for.
//! Renderers only ever see these values, never the simulation world.

use std::net::Ipv4Addr;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{PARTICLE_LINK_MAX_ALPHA, PULSE_AMPLITUDE_PX, PULSE_PERIOD_MS};
use crate::enums::*;
use crate::types::{FrameTime, Viewport};

/// Complete scene broadcast to the renderer after each frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameView {
    pub time: FrameTime,
    pub viewport: Viewport,
    /// Accumulated cosmetic rotation (radians).
    pub rotation: f64,
    pub anchors: Vec<AnchorView>,
    /// Live events in spawn order.
    pub events: Vec<EventView>,
    pub tags: Vec<TagView>,
    pub stats: SceneStats,
    /// True for the single no-motion frame.
    pub is_static: bool,
}

/// An anchor in pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorView {
    pub name: String,
    pub position: DVec2,
    pub radius: f64,
    /// Radius of the pulse ring, a function of wall-clock time only.
    pub pulse_radius: f64,
    pub color: String,
    pub role: AnchorRole,
}

/// A transient event in pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventView {
    pub order: u64,
    pub kind: EventKind,
    pub status: EventStatus,
    pub progress: f64,
    /// Where the beam is drawn from.
    pub origin: DVec2,
    /// Current head position.
    pub position: DVec2,
    pub opacity: f64,
    /// Flare glyph size (pixels); 0 for beams and particles.
    pub size: f64,
    pub sector: Option<u8>,
}

/// A floating address label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagView {
    pub position: DVec2,
    pub address: Ipv4Addr,
}

/// Illustrative counters shown next to the animations. Not real telemetry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneStats {
    pub detected: u64,
    pub blocked: u64,
    pub monitored: u64,
    pub open: u64,
    pub mitigated: u64,
}

/// A connection line between two nearby particles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub from: DVec2,
    pub to: DVec2,
    pub alpha: f64,
}

impl AnchorView {
    /// Pulse ring radius at `now_ms`.
    pub fn pulse_at(radius: f64, now_ms: f64) -> f64 {
        radius + (now_ms / PULSE_PERIOD_MS).sin() * PULSE_AMPLITUDE_PX
    }
}

impl FrameView {
    /// Number of live events of the given kind.
    pub fn count(&self, kind: EventKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    /// Links between particles closer than `max_distance` pixels.
    /// Alpha falls off linearly from the maximum at distance 0 to 0 at the threshold.
    pub fn links(&self, max_distance: f64) -> Vec<Link> {
        let particles: Vec<DVec2> = self
            .events
            .iter()
            .filter(|e| e.kind == EventKind::Particle)
            .map(|e| e.position)
            .collect();

        let mut links = Vec::new();
        if max_distance <= 0.0 {
            return links;
        }
        for (i, a) in particles.iter().enumerate() {
            for b in &particles[i + 1..] {
                let distance = a.distance(*b);
                if distance < max_distance {
                    links.push(Link {
                        from: *a,
                        to: *b,
                        alpha: PARTICLE_LINK_MAX_ALPHA * (1.0 - distance / max_distance),
                    });
                }
            }
        }
        links
    }
}
