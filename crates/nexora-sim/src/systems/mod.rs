//! Systems that operate on the event world each frame.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only).
//! They do not own state; all per-event state lives in components.

pub mod ambient;
pub mod cleanup;
pub mod lifecycle;
pub mod motion;
pub mod proximity;
pub mod snapshot;
pub mod spawner;
