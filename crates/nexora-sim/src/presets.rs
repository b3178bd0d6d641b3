//! Scene presets for the four site animations.
//!
//! Layouts are given in normalized coordinates measured against an
//! 800x500 reference surface; pixel offsets and radii are the site's own.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use nexora_core::anchor::Anchor;
use nexora_core::config::*;
use nexora_core::constants::DEFAULT_SEED;
use nexora_core::enums::{AnchorRole, Interpolation};
use nexora_core::state::SceneStats;
use nexora_core::types::Extent;

/// Named preset, selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    Globe,
    AttackMap,
    ParticleField,
    Radar,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Globe,
        Preset::AttackMap,
        Preset::ParticleField,
        Preset::Radar,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Globe => "globe",
            Preset::AttackMap => "attack-map",
            Preset::ParticleField => "particle-field",
            Preset::Radar => "radar",
        }
    }

    pub fn from_name(name: &str) -> Option<Preset> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    pub fn config(&self) -> SceneConfig {
        match self {
            Preset::Globe => globe(),
            Preset::AttackMap => attack_map(),
            Preset::ParticleField => particle_field(),
            Preset::Radar => radar(),
        }
    }
}

/// Attack/defense globe: attackers on the left fire at a shield ring
/// around the globe, defenders stand on the right.
pub fn globe() -> SceneConfig {
    let attacker = |name: &str, x: f64, y: f64, color: &str| {
        Anchor::new(name, x, y, 15.0, color, AnchorRole::Source)
    };
    let defender = |name: &str, x: f64, y: f64, color: &str| {
        Anchor::new(name, x, y, 15.0, color, AnchorRole::Sentinel)
    };

    SceneConfig {
        anchors: vec![
            attacker("attacker-1", 0.175, 0.34, "#ef4444"),
            attacker("attacker-2", 0.1375, 0.5, "#f97316"),
            attacker("attacker-3", 0.2, 0.64, "#dc2626"),
            defender("defender-1", 0.825, 0.34, "#33ccff"),
            defender("defender-2", 0.8625, 0.5, "#06b6d4"),
            defender("defender-3", 0.8, 0.64, "#0ea5e9"),
            Anchor::new("globe", 0.5, 0.5, 75.0, "#33ccff", AnchorRole::Defended),
        ],
        spawn: SpawnPolicy::PerFrame { probability: 0.03 },
        target: TargetPolicy::Ring {
            radius: Extent::new(0.15, 0.0),
        },
        interpolation: Interpolation::Linear,
        speed: 0.015,
        max_concurrent_events: 48,
        initial_events: 0,
        capture: Some(CaptureConfig {
            radius: Extent::new(0.15, 30.0),
            absorb: false,
            sectors: Some(6),
            flare: FlareConfig {
                decay: 0.01,
                initial_size: 20.0,
                growth: 0.0,
            },
        }),
        refresh: Some(RefreshConfig { every_ms: 5000 }),
        tags: vec![
            DVec2::new(0.25, 0.2),
            DVec2::new(0.65, 0.35),
            DVec2::new(0.45, 0.65),
            DVec2::new(0.3, 0.75),
        ],
        baseline: SceneStats::default(),
        rotation_per_frame: 0.005,
        seed: DEFAULT_SEED,
    }
}

/// World map: beams swing between ten cities, one new beam every two seconds.
pub fn attack_map() -> SceneConfig {
    const CITIES: [(&str, f64, f64); 10] = [
        ("New York", 25.0, 35.0),
        ("London", 50.0, 30.0),
        ("Tokyo", 85.0, 35.0),
        ("Sydney", 87.0, 75.0),
        ("Mumbai", 65.0, 50.0),
        ("São Paulo", 35.0, 70.0),
        ("Moscow", 60.0, 25.0),
        ("Dubai", 60.0, 45.0),
        ("Singapore", 75.0, 55.0),
        ("Los Angeles", 15.0, 38.0),
    ];

    SceneConfig {
        anchors: CITIES
            .iter()
            .map(|&(name, x, y)| Anchor::from_percent(name, x, y, 4.0, "#33ccff", AnchorRole::Node))
            .collect(),
        spawn: SpawnPolicy::Interval { every_ms: 2000 },
        target: TargetPolicy::Anchor,
        interpolation: Interpolation::Oscillating,
        speed: 0.0005,
        max_concurrent_events: 21,
        ..SceneConfig::default()
    }
}

/// Particle network: drifting particles linked when close together.
pub fn particle_field() -> SceneConfig {
    const EMITTERS: [(f64, f64); 6] = [
        (0.10, 0.20),
        (0.15, 0.60),
        (0.05, 0.40),
        (0.85, 0.30),
        (0.90, 0.60),
        (0.80, 0.45),
    ];

    SceneConfig {
        anchors: EMITTERS
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| {
                Anchor::new(format!("emitter-{}", i + 1), x, y, 2.0, "#33ccff", AnchorRole::Source)
            })
            .collect(),
        spawn: SpawnPolicy::PerFrame { probability: 0.06 },
        target: TargetPolicy::Scatter { max_speed: 0.0003 },
        speed: 0.002,
        max_concurrent_events: 40,
        initial_events: 30,
        ..SceneConfig::default()
    }
}

/// Threat dashboard radar: six rotating emitters fire inward at a shield.
pub fn radar() -> SceneConfig {
    SceneConfig {
        anchors: vec![Anchor::new(
            "shield",
            0.5,
            0.5,
            77.0,
            "#33ccff",
            AnchorRole::Defended,
        )],
        // Six emitters each firing with p = 0.008 per frame.
        spawn: SpawnPolicy::PerFrame { probability: 0.048 },
        target: TargetPolicy::Inward {
            emitters: 6,
            outer: Extent::new(0.3, 40.0),
            inner: Extent::new(0.3, 0.0),
            spin: 0.3,
        },
        interpolation: Interpolation::Linear,
        speed: 0.015,
        max_concurrent_events: 24,
        initial_events: 0,
        capture: Some(CaptureConfig {
            radius: Extent::new(0.3, 2.0),
            absorb: true,
            sectors: None,
            flare: FlareConfig {
                decay: 0.015,
                initial_size: 15.0,
                growth: 0.3,
            },
        }),
        refresh: Some(RefreshConfig { every_ms: 10_000 }),
        tags: Vec::new(),
        baseline: SceneStats {
            detected: 1248,
            blocked: 1021,
            monitored: 0,
            open: 7,
            mitigated: 1014,
        },
        rotation_per_frame: 0.003,
        seed: DEFAULT_SEED,
    }
}
