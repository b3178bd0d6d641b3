//! Proximity system: marks beams that cross the capture ring as blocked.
//!
//! The blocked/unblocked split is illustrative only. It is a geometric
//! check against a fixed ring, not a verdict about any real traffic.

use std::f64::consts::{PI, TAU};

use glam::DVec2;
use hecs::World;

use nexora_core::anchor::{self, Anchor};
use nexora_core::components::{Progress, Trajectory};
use nexora_core::config::CaptureConfig;
use nexora_core::constants::PROGRESS_COMPLETE;
use nexora_core::enums::{EventKind, EventStatus};
use nexora_core::state::SceneStats;
use nexora_core::types::Viewport;

use crate::ledger::SpawnLedger;
use crate::systems::{motion, spawner};

/// Check every in-flight beam against the capture ring around the defended anchor.
pub fn run(
    world: &mut World,
    ledger: &mut SpawnLedger,
    stats: &mut SceneStats,
    capture: &CaptureConfig,
    anchors: &[Anchor],
    viewport: &Viewport,
    now_ms: f64,
) {
    let Some(defended) = anchor::defended_index(anchors) else {
        return;
    };
    let center = viewport.to_pixels(anchors[defended].position);
    let radius = capture.radius.resolve(viewport);

    let mut crossings: Vec<DVec2> = Vec::new();
    for (_entity, (kind, status, progress, trajectory)) in
        world.query_mut::<(&EventKind, &mut EventStatus, &mut Progress, &Trajectory)>()
    {
        if *kind != EventKind::Beam || *status != EventStatus::InFlight {
            continue;
        }
        let head = viewport.to_pixels(motion::position(trajectory, progress.value, now_ms));
        if head.distance(center) < radius {
            *status = EventStatus::Blocked;
            if capture.absorb {
                progress.value = PROGRESS_COMPLETE;
            }
            crossings.push(head);
        }
    }

    for head in crossings {
        stats.blocked += 1;
        let sector = capture.sectors.map(|count| sector_of(head, center, count));
        if let Some(position) = viewport.to_normalized(head) {
            spawner::spawn_flare(world, ledger, position, &capture.flare, sector, defended);
        }
    }
}

/// Which of `count` equal ring segments a point falls into.
/// Segment 0 starts at angle -PI (the left side) and runs counter-clockwise in screen space.
pub fn sector_of(point: DVec2, center: DVec2, count: u8) -> u8 {
    if count == 0 {
        return 0;
    }
    let angle = (point.y - center.y).atan2(point.x - center.x);
    let index = ((angle + PI) / TAU * f64::from(count)).floor() as u32;
    (index % u32::from(count)) as u8
}
