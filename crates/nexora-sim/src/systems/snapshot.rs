//! Snapshot system: builds a `FrameView` from the world.
//!
//! Normalized simulation state is converted to pixels for the current
//! viewport here and nowhere else.

use hecs::World;

use nexora_core::anchor::Anchor;
use nexora_core::components::*;
use nexora_core::enums::*;
use nexora_core::state::*;
use nexora_core::types::{FrameTime, Viewport};

use crate::systems::motion;

/// Everything outside the world that goes into a view.
pub struct ViewScene<'a> {
    pub anchors: &'a [Anchor],
    pub tags: &'a [TagView],
    pub stats: SceneStats,
    pub viewport: Viewport,
    pub time: FrameTime,
    pub rotation: f64,
}

/// Build the view of the current frame.
pub fn build_view(world: &World, scene: &ViewScene<'_>) -> FrameView {
    let viewport = &scene.viewport;
    let now_ms = scene.time.now_ms;

    let mut events: Vec<EventView> = world
        .query::<(
            &EventKind,
            &EventStatus,
            &Progress,
            &SpawnOrder,
            &Trajectory,
            Option<&Fade>,
            Option<&Sector>,
        )>()
        .iter()
        .map(
            |(_entity, (kind, status, progress, order, trajectory, fade, sector))| EventView {
                order: order.0,
                kind: *kind,
                status: *status,
                progress: progress.value,
                origin: viewport.to_pixels(motion::origin(trajectory, progress.value, now_ms)),
                position: viewport.to_pixels(motion::position(trajectory, progress.value, now_ms)),
                opacity: fade.map_or(1.0, |f| f.opacity),
                size: fade.map_or(0.0, |f| f.size),
                sector: sector.map(|s| s.0),
            },
        )
        .collect();
    events.sort_by_key(|e| e.order);

    FrameView {
        time: scene.time,
        viewport: scene.viewport,
        rotation: scene.rotation,
        anchors: anchor_views(scene.anchors, viewport, now_ms),
        events,
        tags: tag_views(scene.tags, viewport),
        stats: scene.stats,
        is_static: false,
    }
}

/// The single no-motion frame: anchors and counters, no events, no pulse.
pub fn static_view(scene: &ViewScene<'_>) -> FrameView {
    let viewport = &scene.viewport;
    let anchors = scene
        .anchors
        .iter()
        .map(|a| AnchorView {
            name: a.name.clone(),
            position: viewport.to_pixels(a.position),
            radius: a.radius,
            pulse_radius: a.radius,
            color: a.color.clone(),
            role: a.role,
        })
        .collect();

    FrameView {
        time: scene.time,
        viewport: scene.viewport,
        rotation: 0.0,
        anchors,
        events: Vec::new(),
        tags: tag_views(scene.tags, viewport),
        stats: scene.stats,
        is_static: true,
    }
}

fn anchor_views(anchors: &[Anchor], viewport: &Viewport, now_ms: f64) -> Vec<AnchorView> {
    anchors
        .iter()
        .map(|a| AnchorView {
            name: a.name.clone(),
            position: viewport.to_pixels(a.position),
            radius: a.radius,
            pulse_radius: AnchorView::pulse_at(a.radius, now_ms),
            color: a.color.clone(),
            role: a.role,
        })
        .collect()
}

fn tag_views(tags: &[TagView], viewport: &Viewport) -> Vec<TagView> {
    tags.iter()
        .map(|t| TagView {
            position: viewport.to_pixels(t.position),
            address: t.address,
        })
        .collect()
}
