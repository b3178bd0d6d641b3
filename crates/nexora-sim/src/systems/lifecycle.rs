//! Lifecycle system: moves finished events into their terminal status.
//!
//! Terminal events stay in the world for exactly one rendered frame at
//! full progress and are collected at the start of the next frame.

use hecs::World;

use nexora_core::components::Progress;
use nexora_core::constants::PROGRESS_COMPLETE;
use nexora_core::enums::{EventKind, EventStatus};

/// Mark every event that reached full progress.
///
/// Blocked beams wind down through `Fading`; everything else expires.
pub fn run(world: &mut World) {
    for (_entity, (kind, status, progress)) in
        world.query_mut::<(&EventKind, &mut EventStatus, &Progress)>()
    {
        if progress.value < PROGRESS_COMPLETE {
            continue;
        }
        *status = next_status(*kind, *status);
    }
}

/// Terminal status for a completed event.
pub fn next_status(kind: EventKind, status: EventStatus) -> EventStatus {
    match (kind, status) {
        (EventKind::Beam, EventStatus::Blocked | EventStatus::Fading) => EventStatus::Fading,
        _ => EventStatus::Expired,
    }
}
