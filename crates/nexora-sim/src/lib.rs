//! Animation engine for NEXORA.
//!
//! Owns a hecs world of transient events, steps it once per display frame,
//! and produces `FrameView`s for a renderer. Headless: the drawing surface
//! and the frame scheduler are traits supplied by the host environment.

pub mod engine;
pub mod host;
pub mod ledger;
pub mod presets;
pub mod scheduler;
pub mod systems;

pub use engine::AnimationEngine;
pub use host::{AnimationHost, HostPhase, MountOptions, Renderer};
pub use nexora_core as core;
pub use scheduler::Scheduler;

#[cfg(test)]
mod tests;
