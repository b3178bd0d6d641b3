//! Spawn bookkeeping: sequence numbers and the FIFO of live entities.

use std::collections::VecDeque;

use hecs::{Entity, World};

use nexora_core::components::SpawnOrder;

/// Hands out spawn order numbers and remembers live entities oldest-first.
#[derive(Debug, Default)]
pub struct SpawnLedger {
    next: u64,
    live: VecDeque<Entity>,
}

impl SpawnLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next spawn order number.
    pub fn next_order(&mut self) -> SpawnOrder {
        let order = SpawnOrder(self.next);
        self.next += 1;
        order
    }

    /// Record a freshly spawned entity as the newest.
    pub fn push(&mut self, entity: Entity) {
        self.live.push_back(entity);
    }

    /// Remove and return the oldest recorded entity.
    pub fn pop_oldest(&mut self) -> Option<Entity> {
        self.live.pop_front()
    }

    /// Forget entities that are no longer in the world.
    pub fn prune(&mut self, world: &World) {
        self.live.retain(|entity| world.contains(*entity));
    }

    /// Number of recorded entities (may include despawned ones until pruned).
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Total events ever spawned.
    pub fn spawned_total(&self) -> u64 {
        self.next
    }
}
