//! ECS components for transient event entities.
//!
//! Components are plain data structs with no methods.
//! Simulation logic lives in systems, not components.
//! `EventKind` and `EventStatus` from [`crate::enums`] are components too.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Normalized lifetime progress in [0, 1]. Never decreases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub value: f64,
}

/// Monotonic spawn sequence number, used for FIFO eviction and stable ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpawnOrder(pub u64);

/// Anchor indices an event was spawned between.
/// `target` is `None` when the beam aims at a ring point rather than an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    pub source: usize,
    pub target: Option<usize>,
}

/// Motion path in normalized space, fixed at spawn time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Trajectory {
    /// Straight line, parameterized by progress.
    Linear { from: DVec2, to: DVec2 },
    /// Straight line, parameterized by a wall-clock sine with a per-event phase.
    Oscillating { from: DVec2, to: DVec2, phase: f64 },
    /// Constant velocity (per frame) with wrap-around at the unit square edges.
    Drift {
        origin: DVec2,
        velocity: DVec2,
        age: u32,
    },
}

/// Opacity decay and growth of a flare.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fade {
    pub opacity: f64,
    pub decay: f64,
    /// Glyph size in pixels.
    pub size: f64,
    pub growth: f64,
}

/// Shield segment a flare lit up (globe style).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector(pub u8);

/// Ring emitter a beam left from (radar style). One live beam per emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emitter(pub u8);
