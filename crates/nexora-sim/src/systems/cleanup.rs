//! Cleanup system: removes finished events and enforces the live-event cap.

use hecs::{Entity, World};
use tracing::debug;

use nexora_core::components::Progress;
use nexora_core::constants::PROGRESS_COMPLETE;

use crate::ledger::SpawnLedger;

/// Despawn every event that finished on a previous frame.
/// Uses a pre-allocated buffer to avoid per-frame allocation.
pub fn collect(world: &mut World, ledger: &mut SpawnLedger, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, progress) in world.query_mut::<&Progress>() {
        if progress.value >= PROGRESS_COMPLETE {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    ledger.prune(world);
}

/// Evict the oldest events until at most `max` remain. Returns how many were evicted.
pub fn enforce_capacity(world: &mut World, ledger: &mut SpawnLedger, max: usize) -> usize {
    let mut evicted = 0;
    while world.len() as usize > max {
        let Some(oldest) = ledger.pop_oldest() else {
            break;
        };
        if world.despawn(oldest).is_ok() {
            evicted += 1;
        }
    }
    if evicted > 0 {
        debug!(evicted, max, "evicted oldest events over capacity");
    }
    evicted
}
