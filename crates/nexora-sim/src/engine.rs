//! Animation engine: the bounded event simulation behind every scene.
//!
//! `AnimationEngine` owns the hecs world of transient events, runs the
//! systems once per display frame, and produces `FrameView`s. It never
//! touches a drawing surface or a timer, so it is fully testable headless.

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use nexora_core::config::{SceneConfig, SpawnPolicy};
use nexora_core::error::ConfigError;
use nexora_core::state::{FrameView, SceneStats, TagView};
use nexora_core::types::{FrameTime, Viewport};

use crate::ledger::SpawnLedger;
use crate::systems;
use crate::systems::snapshot::ViewScene;
use crate::systems::spawner::{SpawnScene, SpawnTargets};

/// One animation's simulation state. Each mounted scene owns exactly one.
pub struct AnimationEngine {
    world: World,
    config: SceneConfig,
    viewport: Viewport,
    time: FrameTime,
    rng: ChaCha8Rng,
    ledger: SpawnLedger,
    /// Interval ticks received from the host and not yet spawned.
    pending_spawns: u32,
    rotation: f64,
    stats: SceneStats,
    tags: Vec<TagView>,
    despawn_buffer: Vec<Entity>,
    warm_pending: bool,
}

impl AnimationEngine {
    /// Validate `config` and build an engine for a surface of `viewport` size.
    pub fn new(config: SceneConfig, viewport: Viewport) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let tags = systems::ambient::make_tags(&config.tags, &mut rng);
        debug!(
            anchors = config.anchors.len(),
            max = config.max_concurrent_events,
            seed = config.seed,
            "animation engine created"
        );
        Ok(Self {
            world: World::new(),
            stats: config.baseline,
            warm_pending: config.initial_events > 0,
            config,
            viewport,
            time: FrameTime::default(),
            rng,
            ledger: SpawnLedger::new(),
            pending_spawns: 0,
            rotation: 0.0,
            tags,
            despawn_buffer: Vec::new(),
        })
    }

    /// Advance the simulation by one frame stamped at `now_ms` and return the view.
    ///
    /// Returns `None` without touching any state while the viewport is empty.
    pub fn step(&mut self, now_ms: f64) -> Option<FrameView> {
        if self.viewport.is_empty() {
            return None;
        }
        self.time.advance(now_ms);
        self.run_systems();
        Some(self.view())
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let now_ms = self.time.now_ms;

        systems::cleanup::collect(&mut self.world, &mut self.ledger, &mut self.despawn_buffer);

        {
            let scene = SpawnScene {
                config: &self.config,
                viewport: &self.viewport,
                rotation: self.rotation,
            };
            let mut targets = SpawnTargets {
                world: &mut self.world,
                rng: &mut self.rng,
                ledger: &mut self.ledger,
                stats: &mut self.stats,
            };
            if self.warm_pending {
                self.warm_pending = false;
                systems::spawner::warm_start(&mut targets, &scene);
            }
            systems::spawner::run(&mut targets, &scene, &mut self.pending_spawns);
        }

        systems::motion::run(&mut self.world, self.config.speed);

        if let Some(capture) = &self.config.capture {
            systems::proximity::run(
                &mut self.world,
                &mut self.ledger,
                &mut self.stats,
                capture,
                &self.config.anchors,
                &self.viewport,
                now_ms,
            );
        }

        systems::lifecycle::run(&mut self.world);
        systems::cleanup::enforce_capacity(
            &mut self.world,
            &mut self.ledger,
            self.config.max_concurrent_events,
        );

        self.rotation += self.config.rotation_per_frame;
    }

    /// View of the current state without advancing it.
    pub fn view(&self) -> FrameView {
        systems::snapshot::build_view(&self.world, &self.view_scene())
    }

    /// The single motionless frame used for reduced motion and degraded rendering.
    pub fn static_view(&self) -> FrameView {
        systems::snapshot::static_view(&self.view_scene())
    }

    fn view_scene(&self) -> ViewScene<'_> {
        ViewScene {
            anchors: &self.config.anchors,
            tags: &self.tags,
            stats: self.stats,
            viewport: self.viewport,
            time: self.time,
            rotation: self.rotation,
        }
    }

    /// Adopt a new surface size. Positions rescale at the next view; progress is untouched.
    pub fn resize(&mut self, viewport: Viewport) {
        debug!(
            width = viewport.width,
            height = viewport.height,
            "animation viewport resized"
        );
        self.viewport = viewport;
    }

    /// Record one elapsed spawn interval. Ignored under a per-frame policy.
    /// Pending ticks are capped so a stalled display cannot build a burst.
    pub fn queue_spawn(&mut self) {
        if matches!(self.config.spawn, SpawnPolicy::Interval { .. }) {
            let cap = u32::try_from(self.config.max_concurrent_events).unwrap_or(u32::MAX);
            self.pending_spawns = (self.pending_spawns + 1).min(cap);
        }
    }

    /// Nudge the displayed counters and re-roll the address tags.
    pub fn refresh(&mut self) {
        systems::ambient::refresh(&mut self.stats, &mut self.tags, &mut self.rng);
    }

    /// Number of live events.
    pub fn live_count(&self) -> usize {
        self.world.len() as usize
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn stats(&self) -> SceneStats {
        self.stats
    }

    pub fn time(&self) -> FrameTime {
        self.time
    }

    pub fn pending_spawns(&self) -> u32 {
        self.pending_spawns
    }

    /// Total events spawned since construction.
    pub fn spawned_total(&self) -> u64 {
        self.ledger.spawned_total()
    }
}
