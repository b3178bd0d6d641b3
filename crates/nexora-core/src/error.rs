//! Error types.

use thiserror::Error;

/// A scene configuration that cannot be mounted.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("speed must be a positive finite number, got {0}")]
    InvalidSpeed(f64),
    #[error("spawn probability must lie in [0, 1], got {0}")]
    InvalidProbability(f64),
    #[error("spawn interval must be at least 1 ms")]
    ZeroInterval,
    #[error("refresh interval must be at least 1 ms")]
    ZeroRefresh,
    #[error("max_concurrent_events must be at least 1")]
    ZeroCapacity,
    #[error("initial_events ({initial}) exceeds max_concurrent_events ({max})")]
    InitialExceedsCapacity { initial: usize, max: usize },
    #[error("anchor `{name}` lies outside the unit square at ({x}, {y})")]
    AnchorOutOfBounds { name: String, x: f64, y: f64 },
    #[error("tag position ({x}, {y}) lies outside the unit square")]
    TagOutOfBounds { x: f64, y: f64 },
    #[error("flare decay must be a positive finite number, got {0}")]
    InvalidDecay(f64),
    #[error("extent must be finite and non-negative, got {fraction} + {offset_px}px")]
    InvalidExtent { fraction: f64, offset_px: f64 },
    #[error("scatter speed must be a non-negative finite number, got {0}")]
    InvalidScatterSpeed(f64),
    #[error("inward target policy needs at least one emitter")]
    NoEmitters,
    #[error("failed to parse scene config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The drawing surface could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("drawing context unavailable: {0}")]
    ContextUnavailable(String),
}
