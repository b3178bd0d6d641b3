//! Engine constants and tuning parameters.

/// Display refresh rate the frame loop targets (Hz).
pub const FRAME_RATE: u32 = 60;

/// Milliseconds per frame.
pub const FRAME_MS: f64 = 1000.0 / FRAME_RATE as f64;

// --- Event lifecycle ---

/// Default progress increment per frame (~67 frames per event).
pub const DEFAULT_SPEED: f64 = 0.015;

/// Default per-frame Bernoulli spawn probability.
pub const DEFAULT_SPAWN_PROBABILITY: f64 = 0.03;

/// Default upper bound on live transient events.
pub const DEFAULT_MAX_EVENTS: usize = 64;

/// Default RNG seed.
pub const DEFAULT_SEED: u64 = 42;

/// Progress value at which an event is complete.
pub const PROGRESS_COMPLETE: f64 = 1.0;

/// Opacity a flare starts at.
pub const FLARE_INITIAL_OPACITY: f64 = 1.0;

// --- Anchor glyphs ---

/// Period divisor of the anchor pulse ring (sin(now / PULSE_PERIOD_MS)).
pub const PULSE_PERIOD_MS: f64 = 500.0;

/// Pulse ring amplitude in pixels.
pub const PULSE_AMPLITUDE_PX: f64 = 3.0;

// --- Oscillating interpolation ---

/// Period divisor for oscillating beams (sin(now / OSCILLATION_PERIOD_MS + phase)).
pub const OSCILLATION_PERIOD_MS: f64 = 1000.0;

// --- Particle network ---

/// Particles closer than this (pixels) are joined by a link line.
pub const PARTICLE_LINK_DISTANCE_PX: f64 = 100.0;

/// Link alpha at zero distance; falls off linearly to 0 at the link distance.
pub const PARTICLE_LINK_MAX_ALPHA: f64 = 0.2;

// --- Ambient counters ---

/// Chance the open-incident counter ticks up on a refresh (otherwise down).
pub const OPEN_INCIDENT_RISE_CHANCE: f64 = 0.3;

/// Exclusive upper bound of the detected-counter nudge per refresh.
pub const DETECTED_NUDGE_MAX: u64 = 3;

/// Exclusive upper bound of the blocked/mitigated-counter nudge per refresh.
pub const RESOLVED_NUDGE_MAX: u64 = 2;
