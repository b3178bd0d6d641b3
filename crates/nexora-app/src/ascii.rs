//! Terminal renderer: draws frame views as character grids.

use std::io::Write;

use tracing::warn;

use nexora_core::constants::PARTICLE_LINK_DISTANCE_PX;
use nexora_core::enums::{AnchorRole, EventKind, EventStatus};
use nexora_core::error::RenderError;
use nexora_core::state::FrameView;
use nexora_core::types::Viewport;
use nexora_sim::host::Renderer;

/// Glyph for an anchor.
fn anchor_glyph(role: AnchorRole) -> char {
    match role {
        AnchorRole::Source => 'S',
        AnchorRole::Target => 'T',
        AnchorRole::Node => 'o',
        AnchorRole::Defended => '@',
        AnchorRole::Sentinel => 'D',
    }
}

/// Glyph for an event head.
fn event_glyph(kind: EventKind, status: EventStatus) -> char {
    match (kind, status) {
        (EventKind::Flare, _) => '+',
        (EventKind::Particle, _) => '.',
        (EventKind::Beam, EventStatus::Blocked) => 'x',
        (EventKind::Beam, EventStatus::Fading | EventStatus::Expired) => ',',
        (EventKind::Beam, _) => '*',
    }
}

/// Grid cell for a pixel position, `None` when it falls outside.
fn cell(position: glam::DVec2, viewport: &Viewport, cols: usize, rows: usize) -> Option<(usize, usize)> {
    let x = position.x / viewport.width * cols as f64;
    let y = position.y / viewport.height * rows as f64;
    if !(x >= 0.0 && y >= 0.0) {
        return None;
    }
    let (col, row) = (x as usize, y as usize);
    (col < cols && row < rows).then_some((col, row))
}

/// Rasterize a frame onto a `cols` x `rows` grid. Anchors are drawn over events.
pub fn render_grid(frame: &FrameView, cols: usize, rows: usize) -> Vec<String> {
    let mut grid = vec![vec![' '; cols]; rows];
    let viewport = &frame.viewport;

    if !viewport.is_empty() {
        for event in &frame.events {
            if let Some((col, row)) = cell(event.position, viewport, cols, rows) {
                grid[row][col] = event_glyph(event.kind, event.status);
            }
        }
        for anchor in &frame.anchors {
            if let Some((col, row)) = cell(anchor.position, viewport, cols, rows) {
                grid[row][col] = anchor_glyph(anchor.role);
            }
        }
    }

    grid.into_iter().map(|row| row.into_iter().collect()).collect()
}

/// One-line summary printed under each grid.
pub fn status_line(frame: &FrameView) -> String {
    let stats = &frame.stats;
    let mut line = format!(
        "frame {:>5}  beams {:>2}  flares {:>2}  particles {:>2}  detected {}  blocked {}",
        frame.time.frame,
        frame.count(EventKind::Beam),
        frame.count(EventKind::Flare),
        frame.count(EventKind::Particle),
        stats.detected,
        stats.blocked,
    );
    if frame.count(EventKind::Particle) > 0 {
        let links = frame.links(PARTICLE_LINK_DISTANCE_PX).len();
        line.push_str(&format!("  links {links}"));
    }
    if let Some(tag) = frame.tags.first() {
        line.push_str(&format!("  ip {}", tag.address));
    }
    if frame.is_static {
        line.push_str("  (static)");
    }
    line
}

/// Renderer that writes every `every`-th frame to `out`.
pub struct AsciiRenderer<W: Write> {
    out: W,
    cols: usize,
    rows: usize,
    every: u64,
    broken: bool,
}

impl<W: Write> AsciiRenderer<W> {
    pub fn new(out: W, cols: usize, rows: usize, every: u64) -> Self {
        Self {
            out,
            cols,
            rows,
            every: every.max(1),
            broken: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_frame(&mut self, frame: &FrameView) {
        if self.broken {
            return;
        }
        let mut text = String::new();
        let border = format!("+{}+\n", "-".repeat(self.cols));
        text.push_str(&border);
        for row in render_grid(frame, self.cols, self.rows) {
            text.push('|');
            text.push_str(&row);
            text.push_str("|\n");
        }
        text.push_str(&border);
        text.push_str(&status_line(frame));
        text.push('\n');

        if let Err(err) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            warn!(error = %err, "terminal output failed, no further frames will be written");
            self.broken = true;
        }
    }
}

impl<W: Write> Renderer for AsciiRenderer<W> {
    fn acquire(&mut self, _viewport: Viewport) -> Result<(), RenderError> {
        if self.cols == 0 || self.rows == 0 {
            return Err(RenderError::ContextUnavailable(format!(
                "terminal grid {}x{} has no cells",
                self.cols, self.rows
            )));
        }
        Ok(())
    }

    fn draw(&mut self, frame: &FrameView) {
        if frame.is_static || frame.time.frame % self.every == 0 {
            self.write_frame(frame);
        }
    }

    fn draw_fallback(&mut self, frame: &FrameView) {
        if self.broken {
            return;
        }
        let line = format!("{}\n", status_line(frame));
        if self.out.write_all(line.as_bytes()).is_err() {
            self.broken = true;
        }
    }
}
