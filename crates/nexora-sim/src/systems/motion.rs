//! Motion system: advances progress and fades once per frame.
//!
//! Beams and particles gain `speed` progress per frame. Flares lose opacity
//! and their progress tracks how far the fade has gone.

use glam::DVec2;
use hecs::World;

use nexora_core::components::{Fade, Progress, Trajectory};
use nexora_core::constants::{FLARE_INITIAL_OPACITY, OSCILLATION_PERIOD_MS, PROGRESS_COMPLETE};
use nexora_core::enums::EventStatus;

/// Advance every live event by one frame.
pub fn run(world: &mut World, speed: f64) {
    for (_entity, (progress, status, trajectory, fade)) in world.query_mut::<(
        &mut Progress,
        &mut EventStatus,
        &mut Trajectory,
        Option<&mut Fade>,
    )>() {
        match fade {
            Some(fade) => {
                fade.opacity = (fade.opacity - fade.decay).max(0.0);
                fade.size += fade.growth;
                let faded = 1.0 - fade.opacity / FLARE_INITIAL_OPACITY;
                progress.value = faded.max(progress.value).min(PROGRESS_COMPLETE);
                if *status == EventStatus::Spawned {
                    *status = EventStatus::Fading;
                }
            }
            None => {
                progress.value = (progress.value + speed).min(PROGRESS_COMPLETE);
                if let Trajectory::Drift { age, .. } = trajectory {
                    *age = age.saturating_add(1);
                }
                if *status == EventStatus::Spawned {
                    *status = EventStatus::InFlight;
                }
            }
        }
    }
}

/// Current position (normalized) along a trajectory.
pub fn position(trajectory: &Trajectory, progress: f64, now_ms: f64) -> DVec2 {
    match *trajectory {
        Trajectory::Linear { from, to } => from.lerp(to, progress),
        Trajectory::Oscillating { from, to, phase } => {
            let t = ((now_ms / OSCILLATION_PERIOD_MS + phase).sin() + 1.0) / 2.0;
            from.lerp(to, t)
        }
        Trajectory::Drift {
            origin,
            velocity,
            age,
        } => wrap(origin + velocity * f64::from(age)),
    }
}

/// Where the trajectory is drawn from.
pub fn origin(trajectory: &Trajectory, progress: f64, now_ms: f64) -> DVec2 {
    match *trajectory {
        Trajectory::Linear { from, .. } | Trajectory::Oscillating { from, .. } => from,
        Trajectory::Drift { .. } => position(trajectory, progress, now_ms),
    }
}

/// Wrap a normalized point back into the unit square.
fn wrap(point: DVec2) -> DVec2 {
    DVec2::new(point.x.rem_euclid(1.0), point.y.rem_euclid(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_position_follows_progress() {
        let path = Trajectory::Linear {
            from: DVec2::new(0.0, 0.0),
            to: DVec2::new(1.0, 0.5),
        };
        assert_eq!(position(&path, 0.5, 0.0), DVec2::new(0.5, 0.25));
        assert_eq!(position(&path, 1.0, 12_345.0), DVec2::new(1.0, 0.5));
    }

    #[test]
    fn test_oscillating_position_ignores_progress() {
        let path = Trajectory::Oscillating {
            from: DVec2::ZERO,
            to: DVec2::ONE,
            phase: 0.0,
        };
        // sin(0) = 0 -> halfway, whatever the progress.
        assert_eq!(position(&path, 0.0, 0.0), DVec2::splat(0.5));
        assert_eq!(position(&path, 0.9, 0.0), DVec2::splat(0.5));
    }

    #[test]
    fn test_drift_wraps_around_edges() {
        let path = Trajectory::Drift {
            origin: DVec2::new(0.95, 0.05),
            velocity: DVec2::new(0.02, -0.02),
            age: 5,
        };
        let p = position(&path, 0.0, 0.0);
        assert!((p.x - 0.05).abs() < 1e-9, "x wrapped to {}", p.x);
        assert!((p.y - 0.95).abs() < 1e-9, "y wrapped to {}", p.y);
    }
}
