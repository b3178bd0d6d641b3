//! Mounting an animation on a drawing surface.
//!
//! `AnimationHost` ties one `AnimationEngine` to a `Renderer` and a
//! `Scheduler`. It decides when frames and timers are requested, handles
//! reduced motion, hidden surfaces and resizes, and guarantees that nothing
//! stays scheduled once it is unmounted or dropped.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use nexora_core::config::{SceneConfig, SpawnPolicy};
use nexora_core::error::{ConfigError, RenderError};
use nexora_core::state::FrameView;
use nexora_core::types::Viewport;

use crate::engine::AnimationEngine;
use crate::scheduler::{FrameHandle, Scheduler, Subscriptions, TimerHandle, TimerPurpose};

/// A drawing surface. Receives read-only views and can never alter the simulation.
pub trait Renderer {
    /// Obtain the drawing context for a surface of the given size.
    fn acquire(&mut self, _viewport: Viewport) -> Result<(), RenderError> {
        Ok(())
    }

    /// Draw one frame.
    fn draw(&mut self, frame: &FrameView);

    /// Static rendering used when the drawing context is unavailable.
    fn draw_fallback(&mut self, _frame: &FrameView) {}
}

/// Mount-time preferences of the viewer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountOptions {
    /// The viewer asked for reduced motion: draw once, schedule nothing.
    pub reduced_motion: bool,
}

/// Where a mounted animation is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostPhase {
    /// Surface has no area; waiting for a resize.
    Waiting,
    /// Frames are being requested and drawn.
    Running,
    /// A single static frame was drawn; nothing is scheduled.
    Static,
    Unmounted,
}

pub struct AnimationHost<R: Renderer, S: Scheduler> {
    engine: AnimationEngine,
    renderer: R,
    subscriptions: Subscriptions<S>,
    phase: HostPhase,
    timers_started: bool,
}

impl<R: Renderer, S: Scheduler> AnimationHost<R, S> {
    /// Build the engine and start animating, or settle on a static frame.
    pub fn mount(
        config: SceneConfig,
        viewport: Viewport,
        renderer: R,
        scheduler: S,
        options: MountOptions,
    ) -> Result<Self, ConfigError> {
        let engine = AnimationEngine::new(config, viewport)?;
        let mut host = Self {
            engine,
            renderer,
            subscriptions: Subscriptions::new(scheduler),
            phase: HostPhase::Waiting,
            timers_started: false,
        };

        if options.reduced_motion {
            debug!("reduced motion requested, drawing a static frame");
            host.settle_static(false);
            return Ok(host);
        }

        if let Err(err) = host.renderer.acquire(viewport) {
            warn!(error = %err, "falling back to static rendering");
            host.settle_static(true);
            return Ok(host);
        }

        host.subscriptions.listen_resize();
        if viewport.is_empty() {
            debug!("surface is empty, waiting for a resize");
        } else {
            host.start();
        }
        debug!(phase = ?host.phase, "animation mounted");
        Ok(host)
    }

    fn settle_static(&mut self, fallback: bool) {
        let view = self.engine.static_view();
        if fallback {
            self.renderer.draw_fallback(&view);
        } else {
            self.renderer.draw(&view);
        }
        self.phase = HostPhase::Static;
    }

    /// Request the first frame and, once per mount, the interval timers.
    fn start(&mut self) {
        self.subscriptions.request_frame();
        if !self.timers_started {
            self.timers_started = true;
            let config = self.engine.config();
            let spawn_every = match config.spawn {
                SpawnPolicy::Interval { every_ms } => Some(every_ms),
                SpawnPolicy::PerFrame { .. } => None,
            };
            let refresh_every = config.refresh.map(|r| r.every_ms);
            if let Some(every_ms) = spawn_every {
                self.subscriptions.set_interval(every_ms, TimerPurpose::Spawn);
            }
            if let Some(every_ms) = refresh_every {
                self.subscriptions.set_interval(every_ms, TimerPurpose::Refresh);
            }
        }
        self.phase = HostPhase::Running;
    }

    /// Display-frame callback: step, draw, and ask for the next frame.
    pub fn on_frame(&mut self, handle: FrameHandle, now_ms: f64) {
        if self.phase != HostPhase::Running || !self.subscriptions.frame_fired(handle) {
            return;
        }
        if let Some(view) = self.engine.step(now_ms) {
            self.renderer.draw(&view);
        }
        self.subscriptions.request_frame();
    }

    /// Interval timer callback.
    pub fn on_interval(&mut self, handle: TimerHandle) {
        if self.phase == HostPhase::Unmounted {
            return;
        }
        match self.subscriptions.timer_purpose(handle) {
            Some(TimerPurpose::Spawn) => self.engine.queue_spawn(),
            Some(TimerPurpose::Refresh) => self.engine.refresh(),
            None => {}
        }
    }

    /// Surface resize callback. An empty surface pauses; a non-empty one resumes.
    pub fn on_resize(&mut self, viewport: Viewport) {
        if matches!(self.phase, HostPhase::Static | HostPhase::Unmounted) {
            return;
        }
        self.engine.resize(viewport);
        if viewport.is_empty() {
            self.subscriptions.cancel_frame();
            self.phase = HostPhase::Waiting;
        } else if self.phase == HostPhase::Waiting {
            self.start();
        }
    }

    /// Stop animating and release every scheduler handle.
    pub fn unmount(&mut self) {
        if self.phase == HostPhase::Unmounted {
            return;
        }
        self.subscriptions.release_all();
        self.phase = HostPhase::Unmounted;
        debug!(
            frames = self.engine.time().frame,
            spawned = self.engine.spawned_total(),
            "animation unmounted"
        );
    }

    pub fn phase(&self) -> HostPhase {
        self.phase
    }

    pub fn engine(&self) -> &AnimationEngine {
        &self.engine
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn scheduler(&self) -> &S {
        self.subscriptions.scheduler()
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        self.subscriptions.scheduler_mut()
    }

    /// Number of scheduler handles currently held.
    pub fn outstanding(&self) -> usize {
        self.subscriptions.outstanding()
    }
}
