//! Tests for the animation engine, its systems, presets, and the mount lifecycle.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use nexora_core::anchor::Anchor;
use nexora_core::components::Endpoints;
use nexora_core::config::{SceneConfig, SpawnPolicy, TargetPolicy};
use nexora_core::constants::FRAME_MS;
use nexora_core::enums::*;
use nexora_core::error::RenderError;
use nexora_core::state::FrameView;
use nexora_core::types::Viewport;

use crate::engine::AnimationEngine;
use crate::host::{AnimationHost, HostPhase, MountOptions, Renderer};
use crate::presets::{self, Preset};
use crate::scheduler::{FrameHandle, ListenerHandle, Scheduler, TimerHandle};

const FRAME: f64 = FRAME_MS;

// ---- Test doubles ----

#[derive(Default)]
struct SpyState {
    next: u64,
    frames: HashSet<u64>,
    timers: HashMap<u64, u64>,
    listeners: HashSet<u64>,
    frame_requests: u32,
    interval_requests: u32,
    listen_requests: u32,
}

impl SpyState {
    fn pending(&self) -> usize {
        self.frames.len() + self.timers.len() + self.listeners.len()
    }

    fn issue(&mut self) -> u64 {
        self.next += 1;
        self.next
    }
}

/// Scheduler that records every request; state is shared so it survives the host.
#[derive(Clone, Default)]
struct SpyScheduler(Rc<RefCell<SpyState>>);

impl Scheduler for SpyScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let mut s = self.0.borrow_mut();
        let id = s.issue();
        s.frames.insert(id);
        s.frame_requests += 1;
        FrameHandle(id)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.0.borrow_mut().frames.remove(&handle.0);
    }

    fn set_interval(&mut self, every_ms: u64) -> TimerHandle {
        let mut s = self.0.borrow_mut();
        let id = s.issue();
        s.timers.insert(id, every_ms);
        s.interval_requests += 1;
        TimerHandle(id)
    }

    fn clear_interval(&mut self, handle: TimerHandle) {
        self.0.borrow_mut().timers.remove(&handle.0);
    }

    fn listen_resize(&mut self) -> ListenerHandle {
        let mut s = self.0.borrow_mut();
        let id = s.issue();
        s.listeners.insert(id);
        s.listen_requests += 1;
        ListenerHandle(id)
    }

    fn unlisten_resize(&mut self, handle: ListenerHandle) {
        self.0.borrow_mut().listeners.remove(&handle.0);
    }
}

#[derive(Default)]
struct RecordingRenderer {
    fail_acquire: bool,
    draws: u32,
    fallbacks: u32,
    last: Option<FrameView>,
}

impl Renderer for RecordingRenderer {
    fn acquire(&mut self, _viewport: Viewport) -> Result<(), RenderError> {
        if self.fail_acquire {
            Err(RenderError::ContextUnavailable("no 2d context".into()))
        } else {
            Ok(())
        }
    }

    fn draw(&mut self, frame: &FrameView) {
        self.draws += 1;
        self.last = Some(frame.clone());
    }

    fn draw_fallback(&mut self, frame: &FrameView) {
        self.fallbacks += 1;
        self.last = Some(frame.clone());
    }
}

type TestHost = AnimationHost<RecordingRenderer, SpyScheduler>;

fn mount(config: SceneConfig, viewport: Viewport, options: MountOptions) -> (TestHost, SpyScheduler) {
    let spy = SpyScheduler::default();
    let host = AnimationHost::mount(
        config,
        viewport,
        RecordingRenderer::default(),
        spy.clone(),
        options,
    )
    .unwrap();
    (host, spy)
}

/// Deliver whatever frame is pending, as a display would.
fn pump(host: &mut TestHost, spy: &SpyScheduler, now_ms: f64) {
    let due: Vec<u64> = spy.0.borrow_mut().frames.drain().collect();
    for id in due {
        host.on_frame(FrameHandle(id), now_ms);
    }
}

fn timer_every(spy: &SpyScheduler, every_ms: u64) -> TimerHandle {
    let s = spy.0.borrow();
    let (&id, _) = s.timers.iter().find(|(_, every)| **every == every_ms).unwrap();
    TimerHandle(id)
}

fn two_nodes(speed: f64) -> SceneConfig {
    SceneConfig {
        anchors: vec![
            Anchor::new("a", 0.1, 0.5, 4.0, "#33ccff", AnchorRole::Node),
            Anchor::new("b", 0.9, 0.5, 4.0, "#33ccff", AnchorRole::Node),
        ],
        spawn: SpawnPolicy::PerFrame { probability: 1.0 },
        target: TargetPolicy::Anchor,
        speed,
        ..SceneConfig::default()
    }
}

fn viewport() -> Viewport {
    Viewport::new(800.0, 500.0)
}

fn run(engine: &mut AnimationEngine, frames: u64) -> Vec<FrameView> {
    (1..=frames)
        .filter_map(|i| engine.step(i as f64 * FRAME))
        .collect()
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = AnimationEngine::new(presets::globe(), viewport()).unwrap();
    let mut engine_b = AnimationEngine::new(presets::globe(), viewport()).unwrap();

    for i in 1..=300 {
        let now = i as f64 * FRAME;
        let json_a = serde_json::to_string(&engine_a.step(now)).unwrap();
        let json_b = serde_json::to_string(&engine_b.step(now)).unwrap();
        assert_eq!(json_a, json_b, "Views diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = AnimationEngine::new(
        SceneConfig {
            seed: 111,
            ..presets::globe()
        },
        viewport(),
    )
    .unwrap();
    let mut engine_b = AnimationEngine::new(
        SceneConfig {
            seed: 222,
            ..presets::globe()
        },
        viewport(),
    )
    .unwrap();

    let mut diverged = false;
    for i in 1..=500 {
        let now = i as f64 * FRAME;
        let json_a = serde_json::to_string(&engine_a.step(now)).unwrap();
        let json_b = serde_json::to_string(&engine_b.step(now)).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Lifecycle ----

#[test]
fn test_full_progress_after_two_frames_removed_by_third() {
    let mut engine = AnimationEngine::new(two_nodes(0.5), viewport()).unwrap();

    let first = engine.step(FRAME).unwrap();
    assert_eq!(first.events.len(), 1);
    assert_eq!(first.events[0].order, 0);
    assert_eq!(first.events[0].progress, 0.5);
    assert_eq!(first.events[0].status, EventStatus::InFlight);

    let second = engine.step(2.0 * FRAME).unwrap();
    let oldest = second.events.iter().find(|e| e.order == 0).unwrap();
    assert_eq!(oldest.progress, 1.0);
    assert_eq!(oldest.status, EventStatus::Expired);

    let third = engine.step(3.0 * FRAME).unwrap();
    assert!(third.events.iter().all(|e| e.order != 0), "event 0 should be removed");
}

#[test]
fn test_live_count_never_exceeds_cap() {
    let config = SceneConfig {
        spawn: SpawnPolicy::PerFrame { probability: 1.0 },
        max_concurrent_events: 5,
        ..presets::globe()
    };
    let mut engine = AnimationEngine::new(config, viewport()).unwrap();

    for i in 1..=600 {
        let view = engine.step(i as f64 * FRAME).unwrap();
        assert!(engine.live_count() <= 5, "live {} at frame {i}", engine.live_count());
        assert!(view.events.len() <= 5);
    }
    assert!(engine.spawned_total() > 5);
}

#[test]
fn test_eviction_drops_oldest_first() {
    let config = SceneConfig {
        max_concurrent_events: 3,
        ..two_nodes(0.01)
    };
    let mut engine = AnimationEngine::new(config, viewport()).unwrap();

    let views = run(&mut engine, 10);
    let last = views.last().unwrap();
    let orders: Vec<u64> = last.events.iter().map(|e| e.order).collect();
    assert_eq!(orders, vec![7, 8, 9]);
}

#[test]
fn test_progress_never_decreases() {
    let config = SceneConfig {
        spawn: SpawnPolicy::PerFrame { probability: 1.0 },
        ..presets::radar()
    };
    let mut engine = AnimationEngine::new(config, viewport()).unwrap();
    let mut seen: HashMap<u64, f64> = HashMap::new();

    for view in run(&mut engine, 400) {
        for event in &view.events {
            assert!((0.0..=1.0).contains(&event.progress));
            if let Some(previous) = seen.insert(event.order, event.progress) {
                assert!(
                    event.progress >= previous,
                    "event {} went from {previous} to {}",
                    event.order,
                    event.progress
                );
            }
        }
    }
    assert!(!seen.is_empty());
}

#[test]
fn test_source_never_equals_target() {
    let config = SceneConfig {
        spawn: SpawnPolicy::PerFrame { probability: 1.0 },
        ..presets::attack_map()
    };
    let mut engine = AnimationEngine::new(config, viewport()).unwrap();
    let mut checked = 0;

    for i in 1..=200 {
        engine.step(i as f64 * FRAME);
        let anchors = &engine.config().anchors;
        for (_entity, endpoints) in engine.world().query::<&Endpoints>().iter() {
            let target = endpoints.target.unwrap();
            assert_ne!(endpoints.source, target);
            assert_ne!(anchors[endpoints.source].position, anchors[target].position);
            checked += 1;
        }
    }
    assert!(checked > 0);
}

#[test]
fn test_coincident_anchors_never_pair() {
    let config = SceneConfig {
        anchors: vec![
            Anchor::new("a", 0.5, 0.5, 4.0, "#fff", AnchorRole::Node),
            Anchor::new("b", 0.5, 0.5, 4.0, "#fff", AnchorRole::Node),
        ],
        ..two_nodes(0.1)
    };
    let mut engine = AnimationEngine::new(config, viewport()).unwrap();
    run(&mut engine, 50);
    assert_eq!(engine.live_count(), 0);
}

#[test]
fn test_zero_anchors_renders_empty_scene() {
    let config = SceneConfig {
        spawn: SpawnPolicy::PerFrame { probability: 1.0 },
        ..SceneConfig::default()
    };
    let mut engine = AnimationEngine::new(config, viewport()).unwrap();

    for view in run(&mut engine, 100) {
        assert!(view.events.is_empty());
        assert!(view.anchors.is_empty());
    }
    assert_eq!(engine.live_count(), 0);
    assert_eq!(engine.time().frame, 100);
}

#[test]
fn test_zero_viewport_does_not_step() {
    let mut engine = AnimationEngine::new(two_nodes(0.1), Viewport::new(0.0, 0.0)).unwrap();
    assert!(engine.step(FRAME).is_none());
    assert_eq!(engine.time().frame, 0);
    assert_eq!(engine.live_count(), 0);

    engine.resize(viewport());
    assert!(engine.step(2.0 * FRAME).is_some());
    assert_eq!(engine.live_count(), 1);
}

#[test]
fn test_resize_rescales_positions_keeps_progress() {
    let mut engine = AnimationEngine::new(two_nodes(0.05), Viewport::new(800.0, 600.0)).unwrap();
    run(&mut engine, 6);
    let before = engine.view();

    engine.resize(Viewport::new(400.0, 300.0));
    let after = engine.view();

    assert_eq!(before.events.len(), after.events.len());
    for (a, b) in before.events.iter().zip(&after.events) {
        assert_eq!(a.order, b.order);
        assert_eq!(a.progress, b.progress);
        assert!((a.position / 2.0 - b.position).length() < 1e-9);
        assert!((a.origin / 2.0 - b.origin).length() < 1e-9);
    }
    for (a, b) in before.anchors.iter().zip(&after.anchors) {
        assert!((a.position / 2.0 - b.position).length() < 1e-9);
    }
}

#[test]
fn test_interval_spawns_only_when_queued() {
    let mut engine = AnimationEngine::new(presets::attack_map(), viewport()).unwrap();
    run(&mut engine, 10);
    assert_eq!(engine.live_count(), 0);

    for _ in 0..3 {
        engine.queue_spawn();
    }
    assert_eq!(engine.pending_spawns(), 3);
    engine.step(11.0 * FRAME);
    assert_eq!(engine.live_count(), 3);
    assert_eq!(engine.pending_spawns(), 0);
}

#[test]
fn test_queued_spawns_capped_at_capacity() {
    let mut engine = AnimationEngine::new(presets::attack_map(), viewport()).unwrap();
    for _ in 0..100 {
        engine.queue_spawn();
    }
    assert_eq!(engine.pending_spawns(), 21);
}

#[test]
fn test_queue_spawn_ignored_for_per_frame_policy() {
    let mut engine = AnimationEngine::new(presets::globe(), viewport()).unwrap();
    engine.queue_spawn();
    assert_eq!(engine.pending_spawns(), 0);
}

// ---- Scenes ----

#[test]
fn test_globe_flares_light_shield_sectors() {
    let mut engine = AnimationEngine::new(presets::globe(), viewport()).unwrap();
    let mut flares = 0;

    for view in run(&mut engine, 900) {
        for event in view.events.iter().filter(|e| e.kind == EventKind::Flare) {
            flares += 1;
            assert!(event.sector.unwrap() < 6);
            assert!((0.0..=1.0).contains(&event.opacity));
        }
    }
    assert!(flares > 0, "globe should produce shield flares");
    assert!(engine.stats().blocked > 0);
    assert!(engine.stats().detected >= engine.stats().blocked);
}

#[test]
fn test_flare_fades_out_then_is_collected() {
    use crate::ledger::SpawnLedger;
    use crate::systems::{cleanup, lifecycle, motion, spawner};
    use glam::DVec2;
    use hecs::World;
    use nexora_core::components::Fade;
    use nexora_core::config::FlareConfig;

    let mut world = World::new();
    let mut ledger = SpawnLedger::new();
    let mut buffer = Vec::new();
    let flare = FlareConfig {
        decay: 0.25,
        initial_size: 4.0,
        growth: 0.5,
    };
    let entity = spawner::spawn_flare(
        &mut world,
        &mut ledger,
        DVec2::new(0.5, 0.5),
        &flare,
        Some(2),
        0,
    );

    let mut seen = Vec::new();
    for _ in 0..4 {
        cleanup::collect(&mut world, &mut ledger, &mut buffer);
        motion::run(&mut world, 0.5);
        lifecycle::run(&mut world);
        let status = *world.get::<&EventStatus>(entity).unwrap();
        let opacity = world.get::<&Fade>(entity).unwrap().opacity;
        seen.push((status, opacity));
    }
    assert_eq!(
        seen,
        vec![
            (EventStatus::Fading, 0.75),
            (EventStatus::Fading, 0.5),
            (EventStatus::Fading, 0.25),
            (EventStatus::Expired, 0.0),
        ]
    );

    cleanup::collect(&mut world, &mut ledger, &mut buffer);
    assert!(!world.contains(entity));
    assert!(ledger.is_empty());
}

#[test]
fn test_attack_map_counts_every_beam_as_blocked() {
    let mut engine = AnimationEngine::new(presets::attack_map(), viewport()).unwrap();
    let before = engine.stats();
    for _ in 0..3 {
        engine.queue_spawn();
    }
    engine.step(FRAME);

    let after = engine.stats();
    assert_eq!(after.blocked, before.blocked + 3);
    assert_eq!(after.detected, before.detected + 3);
    assert_eq!(after.monitored, before.monitored + 3);
}

#[test]
fn test_radar_one_beam_per_emitter_and_absorbs() {
    let config = SceneConfig {
        spawn: SpawnPolicy::PerFrame { probability: 1.0 },
        ..presets::radar()
    };
    let baseline = config.baseline;
    let mut engine = AnimationEngine::new(config, viewport()).unwrap();

    for view in run(&mut engine, 300) {
        assert!(view.count(EventKind::Beam) <= 6);
        for beam in view.events.iter().filter(|e| e.kind == EventKind::Beam) {
            assert_ne!(beam.status, EventStatus::Expired, "radar beams are always absorbed");
        }
    }
    assert!(engine.stats().blocked > baseline.blocked);
}

#[test]
fn test_particle_field_warm_start() {
    let mut engine = AnimationEngine::new(presets::particle_field(), viewport()).unwrap();
    let view = engine.step(FRAME).unwrap();

    assert!(view.events.len() >= 30 && view.events.len() <= 40);
    assert_eq!(view.count(EventKind::Particle), view.events.len());
    for particle in &view.events {
        assert!((0.0..=800.0).contains(&particle.position.x));
        assert!((0.0..=500.0).contains(&particle.position.y));
    }
    for link in view.links(100.0) {
        assert!(link.from.distance(link.to) < 100.0);
    }
}

#[test]
fn test_anchor_pulse_follows_wall_clock() {
    let mut engine = AnimationEngine::new(presets::attack_map(), viewport()).unwrap();
    let a = engine.step(0.0).unwrap();
    let b = engine.step(250.0).unwrap();
    assert_eq!(a.anchors[0].pulse_radius, 4.0);
    assert!(b.anchors[0].pulse_radius > 4.0);
}

#[test]
fn test_presets_validate_and_resolve_by_name() {
    for preset in Preset::ALL {
        let config = preset.config();
        config.validate().unwrap();
        assert!(AnimationEngine::new(config, viewport()).is_ok());
        assert_eq!(Preset::from_name(preset.name()), Some(preset));
    }
    assert_eq!(Preset::from_name("carousel"), None);
}

#[test]
fn test_preset_json_round_trip() {
    for preset in Preset::ALL {
        let config = preset.config();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(SceneConfig::from_json(&json).unwrap(), config);
    }
}

// ---- Mount lifecycle ----

#[test]
fn test_reduced_motion_schedules_nothing_draws_once() {
    let config = presets::globe();
    let anchors = config.anchors.len();
    let (host, spy) = mount(
        config,
        viewport(),
        MountOptions {
            reduced_motion: true,
        },
    );

    let s = spy.0.borrow();
    assert_eq!(s.frame_requests, 0);
    assert_eq!(s.interval_requests, 0);
    assert_eq!(s.listen_requests, 0);
    assert_eq!(host.phase(), HostPhase::Static);
    assert_eq!(host.renderer().draws, 1);

    let view = host.renderer().last.as_ref().unwrap();
    assert!(view.is_static);
    assert!(view.events.is_empty());
    assert_eq!(view.anchors.len(), anchors);
}

#[test]
fn test_running_host_draws_each_frame() {
    let (mut host, spy) = mount(presets::globe(), viewport(), MountOptions::default());
    assert_eq!(host.phase(), HostPhase::Running);

    for i in 1..=30 {
        pump(&mut host, &spy, i as f64 * FRAME);
    }
    assert_eq!(host.renderer().draws, 30);
    assert_eq!(host.engine().time().frame, 30);
    assert_eq!(spy.0.borrow().frames.len(), 1);
}

#[test]
fn test_stale_frame_handle_is_ignored() {
    let (mut host, _spy) = mount(presets::globe(), viewport(), MountOptions::default());
    host.on_frame(FrameHandle(9999), FRAME);
    assert_eq!(host.renderer().draws, 0);
}

#[test]
fn test_unmount_releases_every_handle() {
    let (mut host, spy) = mount(presets::globe(), viewport(), MountOptions::default());
    for i in 1..=10 {
        pump(&mut host, &spy, i as f64 * FRAME);
    }
    // Frame, refresh timer, resize listener.
    assert_eq!(spy.0.borrow().pending(), 3);

    host.unmount();
    assert_eq!(spy.0.borrow().pending(), 0);
    assert_eq!(host.phase(), HostPhase::Unmounted);
    assert_eq!(host.outstanding(), 0);

    // Late callbacks after unmount do nothing.
    host.on_frame(FrameHandle(1), 99.0 * FRAME);
    assert_eq!(host.renderer().draws, 10);
}

#[test]
fn test_drop_releases_every_handle() {
    let spy = {
        let (mut host, spy) = mount(presets::attack_map(), viewport(), MountOptions::default());
        pump(&mut host, &spy, FRAME);
        assert!(spy.0.borrow().pending() > 0);
        spy
    };
    assert_eq!(spy.0.borrow().pending(), 0);
}

#[test]
fn test_acquire_failure_degrades_to_static() {
    let spy = SpyScheduler::default();
    let renderer = RecordingRenderer {
        fail_acquire: true,
        ..Default::default()
    };
    let host = AnimationHost::mount(
        presets::radar(),
        viewport(),
        renderer,
        spy.clone(),
        MountOptions::default(),
    )
    .unwrap();

    assert_eq!(host.phase(), HostPhase::Static);
    assert_eq!(host.renderer().fallbacks, 1);
    assert_eq!(host.renderer().draws, 0);
    assert_eq!(spy.0.borrow().pending(), 0);
}

#[test]
fn test_empty_surface_waits_for_resize() {
    let (mut host, spy) = mount(presets::globe(), Viewport::new(0.0, 0.0), MountOptions::default());
    assert_eq!(host.phase(), HostPhase::Waiting);
    assert_eq!(spy.0.borrow().frame_requests, 0);
    assert_eq!(spy.0.borrow().listen_requests, 1);

    host.on_resize(viewport());
    assert_eq!(host.phase(), HostPhase::Running);
    assert_eq!(spy.0.borrow().frames.len(), 1);

    host.on_resize(Viewport::new(800.0, 0.0));
    assert_eq!(host.phase(), HostPhase::Waiting);
    assert!(spy.0.borrow().frames.is_empty());

    host.on_resize(viewport());
    assert_eq!(host.phase(), HostPhase::Running);
    // Timers are only set once per mount.
    assert_eq!(spy.0.borrow().interval_requests, 1);
}

#[test]
fn test_interval_timer_drives_spawns() {
    let (mut host, spy) = mount(presets::attack_map(), viewport(), MountOptions::default());
    let spawn = timer_every(&spy, 2000);

    pump(&mut host, &spy, FRAME);
    assert_eq!(host.engine().live_count(), 0);

    host.on_interval(spawn);
    host.on_interval(spawn);
    pump(&mut host, &spy, 2.0 * FRAME);
    assert_eq!(host.engine().live_count(), 2);
}

#[test]
fn test_refresh_timer_nudges_counters() {
    let config = presets::radar();
    let baseline = config.baseline;
    let (mut host, spy) = mount(config, viewport(), MountOptions::default());
    let refresh = timer_every(&spy, 10_000);

    host.on_interval(refresh);
    let stats = host.engine().stats();
    assert_ne!(stats.open, baseline.open);
    assert!(stats.detected >= baseline.detected);
    assert!(stats.open >= 1);
}
