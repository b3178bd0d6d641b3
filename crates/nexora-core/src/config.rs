//! Scene configuration: everything an animation needs at mount time.
//!
//! Configurations are plain serde data so presets can be shipped as JSON
//! and tweaked without recompiling.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::anchor::Anchor;
use crate::constants::*;
use crate::enums::Interpolation;
use crate::error::ConfigError;
use crate::state::SceneStats;
use crate::types::Extent;

/// When new events are created. Exactly one policy per scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SpawnPolicy {
    /// Bernoulli draw once per frame.
    PerFrame { probability: f64 },
    /// One spawn per elapsed interval timer tick.
    Interval { every_ms: u64 },
}

/// Where a new event goes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TargetPolicy {
    /// Beam from a random source anchor to a different random target anchor.
    Anchor,
    /// Beam from a random source anchor to a random point on a ring
    /// around the defended anchor.
    Ring { radius: Extent },
    /// Beam from one of `emitters` evenly spaced points on the `outer` ring
    /// straight in toward the `inner` ring. The emitter ring turns with the
    /// scene rotation scaled by `spin`.
    Inward {
        emitters: u8,
        outer: Extent,
        inner: Extent,
        #[serde(default)]
        spin: f64,
    },
    /// Particle drifting from a random source anchor with a random velocity
    /// of at most `max_speed` (normalized units per frame) on each axis.
    Scatter { max_speed: f64 },
}

/// Appearance of a shield flare.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlareConfig {
    /// Opacity lost per frame.
    pub decay: f64,
    /// Glyph size at spawn (pixels).
    pub initial_size: f64,
    /// Size gained per frame (pixels).
    #[serde(default)]
    pub growth: f64,
}

/// Proximity capture around the defended anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaptureConfig {
    pub radius: Extent,
    /// Blocked beams finish immediately instead of flying on.
    #[serde(default)]
    pub absorb: bool,
    /// Number of shield segments the ring is split into, if any.
    #[serde(default)]
    pub sectors: Option<u8>,
    pub flare: FlareConfig,
}

/// Periodic re-randomization of the displayed counters and tags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RefreshConfig {
    pub every_ms: u64,
}

/// Complete construction-time configuration of one animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub anchors: Vec<Anchor>,
    pub spawn: SpawnPolicy,
    pub target: TargetPolicy,
    #[serde(default)]
    pub interpolation: Interpolation,
    /// Progress increment per frame.
    pub speed: f64,
    pub max_concurrent_events: usize,
    /// Events created on the first frame so the scene does not start empty.
    #[serde(default)]
    pub initial_events: usize,
    #[serde(default)]
    pub capture: Option<CaptureConfig>,
    #[serde(default)]
    pub refresh: Option<RefreshConfig>,
    /// Positions (normalized) of floating address tags.
    #[serde(default)]
    pub tags: Vec<DVec2>,
    /// Starting values of the displayed counters.
    #[serde(default)]
    pub baseline: SceneStats,
    /// Cosmetic rotation added per frame (radians).
    #[serde(default)]
    pub rotation_per_frame: f64,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            anchors: Vec::new(),
            spawn: SpawnPolicy::PerFrame {
                probability: DEFAULT_SPAWN_PROBABILITY,
            },
            target: TargetPolicy::Anchor,
            interpolation: Interpolation::default(),
            speed: DEFAULT_SPEED,
            max_concurrent_events: DEFAULT_MAX_EVENTS,
            initial_events: 0,
            capture: None,
            refresh: None,
            tags: Vec::new(),
            baseline: SceneStats::default(),
            rotation_per_frame: 0.0,
            seed: DEFAULT_SEED,
        }
    }
}

impl SceneConfig {
    /// Parse a JSON configuration and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every numeric parameter. An empty anchor list is valid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }
        if self.max_concurrent_events == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.initial_events > self.max_concurrent_events {
            return Err(ConfigError::InitialExceedsCapacity {
                initial: self.initial_events,
                max: self.max_concurrent_events,
            });
        }

        match self.spawn {
            SpawnPolicy::PerFrame { probability } => {
                if !(0.0..=1.0).contains(&probability) {
                    return Err(ConfigError::InvalidProbability(probability));
                }
            }
            SpawnPolicy::Interval { every_ms } => {
                if every_ms == 0 {
                    return Err(ConfigError::ZeroInterval);
                }
            }
        }

        match self.target {
            TargetPolicy::Anchor => {}
            TargetPolicy::Ring { radius } => check_extent(&radius)?,
            TargetPolicy::Inward {
                emitters,
                outer,
                inner,
                ..
            } => {
                if emitters == 0 {
                    return Err(ConfigError::NoEmitters);
                }
                check_extent(&outer)?;
                check_extent(&inner)?;
            }
            TargetPolicy::Scatter { max_speed } => {
                if !(max_speed.is_finite() && max_speed >= 0.0) {
                    return Err(ConfigError::InvalidScatterSpeed(max_speed));
                }
            }
        }

        if let Some(capture) = &self.capture {
            check_extent(&capture.radius)?;
            let decay = capture.flare.decay;
            if !(decay.is_finite() && decay > 0.0) {
                return Err(ConfigError::InvalidDecay(decay));
            }
        }

        if let Some(refresh) = &self.refresh {
            if refresh.every_ms == 0 {
                return Err(ConfigError::ZeroRefresh);
            }
        }

        for anchor in &self.anchors {
            if !in_unit_square(anchor.position) {
                return Err(ConfigError::AnchorOutOfBounds {
                    name: anchor.name.clone(),
                    x: anchor.position.x,
                    y: anchor.position.y,
                });
            }
        }
        for tag in &self.tags {
            if !in_unit_square(*tag) {
                return Err(ConfigError::TagOutOfBounds { x: tag.x, y: tag.y });
            }
        }

        Ok(())
    }
}

fn in_unit_square(p: DVec2) -> bool {
    (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y)
}

fn check_extent(extent: &Extent) -> Result<(), ConfigError> {
    let ok = extent.fraction.is_finite()
        && extent.offset_px.is_finite()
        && extent.fraction >= 0.0
        && extent.offset_px >= 0.0;
    if ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidExtent {
            fraction: extent.fraction,
            offset_px: extent.offset_px,
        })
    }
}
