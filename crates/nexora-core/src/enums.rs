//! Enumeration types used throughout the engine.

use serde::{Deserialize, Serialize};

/// What an anchor does in the scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnchorRole {
    /// Events originate here (attackers, particle emitters).
    #[default]
    Source,
    /// Events are aimed here.
    Target,
    /// Both origin and destination (cities on the world map).
    Node,
    /// The protected point; capture rings and target rings center on it.
    Defended,
    /// Drawn only; never takes part in the simulation.
    Sentinel,
}

impl AnchorRole {
    pub fn is_source(&self) -> bool {
        matches!(self, AnchorRole::Source | AnchorRole::Node)
    }

    pub fn is_target(&self) -> bool {
        matches!(self, AnchorRole::Target | AnchorRole::Node)
    }
}

/// Kind of transient event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A beam travelling from a source toward a target.
    Beam,
    /// A shield flare left where a beam was blocked.
    Flare,
    /// A drifting particle of the network field.
    Particle,
}

/// Lifecycle status of a transient event.
///
/// `Spawned -> InFlight -> {Blocked -> Fading | Expired}`; removal is a despawn.
/// Flares go `Spawned -> Fading -> Expired`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventStatus {
    #[default]
    Spawned,
    InFlight,
    /// Crossed the capture ring. Purely illustrative, not a detection verdict.
    Blocked,
    Fading,
    Expired,
}

/// How a beam's position is derived from its endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interpolation {
    /// Position follows progress from source to target.
    #[default]
    Linear,
    /// Position swings between source and target on a wall-clock sine.
    Oscillating,
}
