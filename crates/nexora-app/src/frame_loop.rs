//! Frame loop thread: drives one mounted animation at `FRAME_RATE` Hz.
//!
//! The host is mounted inside the thread; only the renderer and the scene
//! config cross into it. Commands arrive via `mpsc` channel. The thread's `LoopScheduler` stands in
//! for a browser's animation-frame and interval APIs.

use std::io;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use nexora_core::config::SceneConfig;
use nexora_core::constants::FRAME_RATE;
use nexora_core::error::ConfigError;
use nexora_core::state::SceneStats;
use nexora_core::types::Viewport;
use nexora_sim::host::{AnimationHost, HostPhase, MountOptions, Renderer};
use nexora_sim::scheduler::{FrameHandle, ListenerHandle, Scheduler, TimerHandle};

/// Nominal duration of one display frame.
pub const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

/// Messages to the loop thread.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopCommand {
    Resize(Viewport),
    Shutdown,
}

#[derive(Debug, Clone, Copy)]
struct Interval {
    handle: TimerHandle,
    every_ms: u64,
    next_due_ms: f64,
}

/// Scheduler backed by the loop thread's own clock.
#[derive(Debug, Default)]
pub struct LoopScheduler {
    next_id: u64,
    now_ms: f64,
    frame: Option<FrameHandle>,
    intervals: Vec<Interval>,
    listener: Option<ListenerHandle>,
}

impl LoopScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn issue(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Advance the scheduler clock.
    pub fn set_now(&mut self, now_ms: f64) {
        self.now_ms = now_ms;
    }

    /// Take the pending frame request, if any.
    pub fn take_frame(&mut self) -> Option<FrameHandle> {
        self.frame.take()
    }

    /// Every interval firing due by the current clock, oldest first.
    pub fn due_intervals(&mut self) -> Vec<TimerHandle> {
        let now_ms = self.now_ms;
        let mut due = Vec::new();
        for interval in &mut self.intervals {
            while interval.next_due_ms <= now_ms {
                due.push(interval.handle);
                interval.next_due_ms += interval.every_ms as f64;
            }
        }
        due
    }

    /// Handles still registered.
    pub fn pending(&self) -> usize {
        usize::from(self.frame.is_some()) + self.intervals.len() + usize::from(self.listener.is_some())
    }
}

impl Scheduler for LoopScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.issue());
        self.frame = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.frame == Some(handle) {
            self.frame = None;
        }
    }

    fn set_interval(&mut self, every_ms: u64) -> TimerHandle {
        let handle = TimerHandle(self.issue());
        self.intervals.push(Interval {
            handle,
            every_ms,
            next_due_ms: self.now_ms + every_ms as f64,
        });
        handle
    }

    fn clear_interval(&mut self, handle: TimerHandle) {
        self.intervals.retain(|i| i.handle != handle);
    }

    fn listen_resize(&mut self) -> ListenerHandle {
        let handle = ListenerHandle(self.issue());
        self.listener = Some(handle);
        handle
    }

    fn unlisten_resize(&mut self, handle: ListenerHandle) {
        if self.listener == Some(handle) {
            self.listener = None;
        }
    }
}

/// What to run on the loop thread.
#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub scene: SceneConfig,
    pub viewport: Viewport,
    pub options: MountOptions,
    /// Stop after this many loop ticks. A running host draws once per tick;
    /// a host waiting on an empty surface still counts its ticks.
    pub max_frames: Option<u64>,
}

/// Summary returned when the loop exits.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopReport {
    pub frames: u64,
    pub spawned: u64,
    pub live: usize,
    pub stats: SceneStats,
    /// Phase the host was in when the loop stopped.
    pub phase: HostPhase,
    /// Scheduler handles left after unmount.
    pub leaked_handles: usize,
}

/// Spawns the frame loop in a new thread.
///
/// Returns the command sender and the join handle carrying the final report.
pub fn spawn_frame_loop<R>(
    config: LoopConfig,
    renderer: R,
) -> io::Result<(mpsc::Sender<LoopCommand>, JoinHandle<Result<LoopReport, ConfigError>>)>
where
    R: Renderer + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();

    let handle = std::thread::Builder::new()
        .name("nexora-frame-loop".into())
        .spawn(move || run_frame_loop(config, renderer, cmd_rx))?;

    Ok((cmd_tx, handle))
}

/// The frame loop. Runs until Shutdown, channel disconnect, the frame limit,
/// or the animation settling on a static frame.
fn run_frame_loop<R: Renderer>(
    config: LoopConfig,
    renderer: R,
    cmd_rx: mpsc::Receiver<LoopCommand>,
) -> Result<LoopReport, ConfigError> {
    let mut host = AnimationHost::mount(
        config.scene,
        config.viewport,
        renderer,
        LoopScheduler::new(),
        config.options,
    )?;
    info!(phase = ?host.phase(), "frame loop started");

    let started = Instant::now();
    let mut next_frame_time = started;
    let mut ticks: u64 = 0;

    'frames: loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::Resize(viewport)) => host.on_resize(viewport),
                Ok(LoopCommand::Shutdown) => break 'frames,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => break 'frames,
            }
        }

        let phase = host.phase();
        if phase == HostPhase::Static {
            debug!("static frame drawn, nothing left to schedule");
            break;
        }

        // 2. Fire due timers, then the pending frame
        let now_ms = started.elapsed().as_secs_f64() * 1000.0;
        host.scheduler_mut().set_now(now_ms);
        for timer in host.scheduler_mut().due_intervals() {
            host.on_interval(timer);
        }
        if let Some(frame) = host.scheduler_mut().take_frame() {
            host.on_frame(frame, now_ms);
        }

        ticks += 1;
        if config.max_frames.is_some_and(|max| ticks >= max) {
            break;
        }

        // 3. Sleep until next frame
        next_frame_time += FRAME_DURATION;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > FRAME_DURATION * 2 {
            // Too far behind, skip ahead instead of replaying missed frames
            next_frame_time = now;
        }
    }

    let phase = host.phase();
    host.unmount();
    let engine = host.engine();
    let report = LoopReport {
        frames: engine.time().frame,
        spawned: engine.spawned_total(),
        live: engine.live_count(),
        stats: engine.stats(),
        phase,
        leaked_handles: host.scheduler().pending(),
    };
    info!(frames = report.frames, spawned = report.spawned, "frame loop stopped");
    Ok(report)
}
