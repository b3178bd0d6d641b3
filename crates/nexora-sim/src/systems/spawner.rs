//! Spawn system: decides whether new events appear this frame and builds them.

use std::f64::consts::TAU;

use glam::DVec2;
use hecs::{Entity, EntityBuilder, World};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use nexora_core::anchor::{self, Anchor};
use nexora_core::components::*;
use nexora_core::config::{FlareConfig, SceneConfig, SpawnPolicy, TargetPolicy};
use nexora_core::constants::FLARE_INITIAL_OPACITY;
use nexora_core::enums::*;
use nexora_core::state::SceneStats;
use nexora_core::types::Viewport;

use crate::ledger::SpawnLedger;

/// Where a scattered particle starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// At a random source anchor.
    Emitter,
    /// Anywhere on the surface (warm start).
    Anywhere,
}

/// Read-only scene inputs the spawn helpers need.
pub struct SpawnScene<'a> {
    pub config: &'a SceneConfig,
    pub viewport: &'a Viewport,
    pub rotation: f64,
}

/// Mutable engine state the spawn helpers write to.
pub struct SpawnTargets<'a> {
    pub world: &'a mut World,
    pub rng: &'a mut ChaCha8Rng,
    pub ledger: &'a mut SpawnLedger,
    pub stats: &'a mut SceneStats,
}

/// Number of spawns due this frame under the configured policy.
/// Interval spawns are queued by the host's timer and drained here.
pub fn due(policy: &SpawnPolicy, rng: &mut ChaCha8Rng, pending: &mut u32) -> u32 {
    match *policy {
        SpawnPolicy::PerFrame { probability } => u32::from(rng.gen_bool(probability)),
        SpawnPolicy::Interval { .. } => std::mem::take(pending),
    }
}

/// Spawn whatever the policy asks for this frame.
pub fn run(targets: &mut SpawnTargets<'_>, scene: &SpawnScene<'_>, pending: &mut u32) {
    let count = due(&scene.config.spawn, targets.rng, pending);
    for _ in 0..count {
        spawn_event(targets, scene, Origin::Emitter);
    }
}

/// Populate the scene with its configured initial events.
pub fn warm_start(targets: &mut SpawnTargets<'_>, scene: &SpawnScene<'_>) {
    for _ in 0..scene.config.initial_events {
        spawn_event(targets, scene, Origin::Anywhere);
    }
}

/// Spawn one event per the target policy.
/// Returns `None` when the layout offers no valid source/target pair.
pub fn spawn_event(
    targets: &mut SpawnTargets<'_>,
    scene: &SpawnScene<'_>,
    origin: Origin,
) -> Option<Entity> {
    let anchors = &scene.config.anchors;
    if anchors.is_empty() || scene.viewport.is_empty() {
        return None;
    }
    let interpolation = scene.config.interpolation;

    let (kind, endpoints, trajectory, emitter) = match scene.config.target {
        TargetPolicy::Anchor => {
            let (endpoints, from, to) = anchor_pair(anchors, targets.rng)?;
            let path = beam_path(interpolation, from, to, targets.rng);
            (EventKind::Beam, endpoints, path, None)
        }
        TargetPolicy::Ring { radius } => {
            let source = *anchor::source_indices(anchors).choose(targets.rng)?;
            let defended = anchor::defended_index(anchors)?;
            let viewport = scene.viewport;
            let angle = targets.rng.gen_range(0.0..TAU);
            let center = viewport.to_pixels(anchors[defended].position);
            let point = center + DVec2::from_angle(angle) * radius.resolve(viewport);
            let to = viewport.to_normalized(point)?;
            let from = anchors[source].position;
            let path = beam_path(interpolation, from, to, targets.rng);
            let endpoints = Endpoints {
                source,
                target: None,
            };
            (EventKind::Beam, endpoints, path, None)
        }
        TargetPolicy::Inward {
            emitters,
            outer,
            inner,
            spin,
        } => {
            let defended = anchor::defended_index(anchors)?;
            let slot = targets.rng.gen_range(0..emitters);
            if emitter_busy(targets.world, slot) {
                return None;
            }
            let viewport = scene.viewport;
            let angle = f64::from(slot) * TAU / f64::from(emitters) + scene.rotation * spin;
            let direction = DVec2::from_angle(angle);
            let center = viewport.to_pixels(anchors[defended].position);
            let from = viewport.to_normalized(center + direction * outer.resolve(viewport))?;
            let to = viewport.to_normalized(center + direction * inner.resolve(viewport))?;
            let path = beam_path(interpolation, from, to, targets.rng);
            let endpoints = Endpoints {
                source: defended,
                target: None,
            };
            (EventKind::Beam, endpoints, path, Some(Emitter(slot)))
        }
        TargetPolicy::Scatter { max_speed } => {
            let source = *anchor::source_indices(anchors).choose(targets.rng)?;
            let start = match origin {
                Origin::Emitter => anchors[source].position,
                Origin::Anywhere => DVec2::new(targets.rng.gen(), targets.rng.gen()),
            };
            let velocity = DVec2::new(
                targets.rng.gen_range(-max_speed..=max_speed),
                targets.rng.gen_range(-max_speed..=max_speed),
            );
            let endpoints = Endpoints {
                source,
                target: None,
            };
            let path = Trajectory::Drift {
                origin: start,
                velocity,
                age: 0,
            };
            (EventKind::Particle, endpoints, path, None)
        }
    };

    let order = targets.ledger.next_order();
    let mut builder = EntityBuilder::new();
    builder
        .add(kind)
        .add(EventStatus::Spawned)
        .add(Progress::default())
        .add(order)
        .add(endpoints)
        .add(trajectory);
    if let Some(emitter) = emitter {
        builder.add(emitter);
    }
    let entity = targets.world.spawn(builder.build());
    targets.ledger.push(entity);

    if kind == EventKind::Beam {
        targets.stats.detected += 1;
        targets.stats.monitored += 1;
        // Without a capture ring every beam counts as mitigated on arrival.
        if scene.config.capture.is_none() {
            targets.stats.blocked += 1;
        }
    }
    trace!(order = order.0, ?kind, source = endpoints.source, "spawned event");

    Some(entity)
}

/// Spawn a shield flare at `position` (normalized).
pub fn spawn_flare(
    world: &mut World,
    ledger: &mut SpawnLedger,
    position: DVec2,
    flare: &FlareConfig,
    sector: Option<u8>,
    defended: usize,
) -> Entity {
    let order = ledger.next_order();
    let mut builder = EntityBuilder::new();
    builder
        .add(EventKind::Flare)
        .add(EventStatus::Spawned)
        .add(Progress::default())
        .add(order)
        .add(Endpoints {
            source: defended,
            target: None,
        })
        .add(Trajectory::Linear {
            from: position,
            to: position,
        })
        .add(Fade {
            opacity: FLARE_INITIAL_OPACITY,
            decay: flare.decay,
            size: flare.initial_size,
            growth: flare.growth,
        });
    if let Some(sector) = sector {
        builder.add(Sector(sector));
    }
    let entity = world.spawn(builder.build());
    ledger.push(entity);
    trace!(order = order.0, ?sector, "spawned flare");
    entity
}

/// Pick a source anchor and a distinct target anchor.
fn anchor_pair(anchors: &[Anchor], rng: &mut ChaCha8Rng) -> Option<(Endpoints, DVec2, DVec2)> {
    let source = *anchor::source_indices(anchors).choose(rng)?;
    let target = *anchor::target_indices(anchors, source).choose(rng)?;
    let endpoints = Endpoints {
        source,
        target: Some(target),
    };
    Some((endpoints, anchors[source].position, anchors[target].position))
}

fn beam_path(
    interpolation: Interpolation,
    from: DVec2,
    to: DVec2,
    rng: &mut ChaCha8Rng,
) -> Trajectory {
    match interpolation {
        Interpolation::Linear => Trajectory::Linear { from, to },
        Interpolation::Oscillating => Trajectory::Oscillating {
            from,
            to,
            phase: rng.gen_range(0.0..TAU),
        },
    }
}

/// Whether a ring emitter already has a live beam.
fn emitter_busy(world: &World, slot: u8) -> bool {
    world
        .query::<&Emitter>()
        .iter()
        .any(|(_, emitter)| emitter.0 == slot)
}
