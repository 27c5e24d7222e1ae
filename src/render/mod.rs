//! Rendering backends, the preview renderer and its cooperative scheduler.

pub mod backend;
pub(crate) mod parallel;
pub(crate) mod reference;
pub mod target;

pub use backend::{
    BackendKind, FrameRgba, RenderBackend, RenderOpts, create_backend,
    create_backend_with_fallback,
};
pub use target::{Camera, RenderTarget};

use crate::foundation::error::WallforgeResult;
use crate::params::{OutputFormat, ParameterSnapshot};

/// Cooperative per-frame scheduler: render only when dirty, at most one
/// render per tick. A superseded preview is simply skipped; the next tick
/// uses the latest state.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    dirty: bool,
}

impl FrameScheduler {
    /// Mark the preview as needing a render.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Consume the dirty flag; `true` means a render should run this tick.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

/// A live preview/export session over one backend.
///
/// Owns the backend, the preview target, the camera and the dirty flag,
/// arena-style, so multiple renderers stay fully independent.
pub struct Renderer {
    backend: Box<dyn RenderBackend>,
    snapshot: ParameterSnapshot,
    target: RenderTarget,
    camera: Camera,
    scheduler: FrameScheduler,
}

impl Renderer {
    /// Create a renderer over the given backend with default parameters.
    pub fn new(backend: Box<dyn RenderBackend>) -> Self {
        let snapshot = ParameterSnapshot::default();
        let (pw, ph) = preview_size(&snapshot);
        let mut scheduler = FrameScheduler::default();
        scheduler.mark_dirty();
        Self {
            backend,
            target: RenderTarget::new(pw, ph),
            snapshot,
            camera: Camera::identity(),
            scheduler,
        }
    }

    /// Which backend kind this renderer runs on.
    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    /// Current parameter snapshot.
    pub fn snapshot(&self) -> &ParameterSnapshot {
        &self.snapshot
    }

    /// Latest rendered preview pixels.
    pub fn target(&self) -> &RenderTarget {
        &self.target
    }

    /// Replace the parameters; discards the old snapshot and marks dirty.
    pub fn set_snapshot(&mut self, snapshot: ParameterSnapshot) {
        self.snapshot = snapshot;
        self.scheduler.mark_dirty();
    }

    /// Zoom the preview camera, marking dirty.
    pub fn zoom_by(&mut self, factor: f32) {
        self.camera.zoom_by(factor);
        self.scheduler.mark_dirty();
    }

    /// Pan the preview camera in normalized image units, marking dirty.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.camera.pan_by(dx, dy);
        self.scheduler.mark_dirty();
    }

    /// Current camera state.
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// One scheduler tick: render the preview if anything changed.
    ///
    /// Returns `true` when a new frame was produced into the target.
    pub fn tick(&mut self) -> WallforgeResult<bool> {
        if !self.scheduler.take_dirty() {
            return Ok(false);
        }

        let (pw, ph) = preview_size(&self.snapshot);
        self.target.ensure_size(pw, ph);

        let opts = RenderOpts {
            width: pw,
            height: ph,
            camera: Some(self.camera),
            dither: false,
        };
        let frame = self.backend.render(&self.snapshot, &opts)?;
        self.target.store(frame.width, frame.height, frame.data);
        Ok(true)
    }

    /// Render the full-resolution export frame.
    ///
    /// Blocking; runs to completion or returns an error. Dithering is
    /// applied only for JPEG output. Overlapping exports on one renderer
    /// are excluded by the `&mut` receiver.
    #[tracing::instrument(skip_all, fields(
        width = self.snapshot.canvas.width,
        height = self.snapshot.canvas.height,
        seed = self.snapshot.random.seed,
    ))]
    pub fn export_frame(&mut self) -> WallforgeResult<FrameRgba> {
        let opts = RenderOpts {
            width: self.snapshot.canvas.width,
            height: self.snapshot.canvas.height,
            camera: None,
            dither: self.snapshot.output.format == OutputFormat::Jpg,
        };
        self.backend.render(&self.snapshot, &opts)
    }
}

fn preview_size(snapshot: &ParameterSnapshot) -> (u32, u32) {
    let scale = snapshot.canvas.preview_scale;
    let w = ((snapshot.canvas.width as f32) * scale).round().max(1.0) as u32;
    let h = ((snapshot.canvas.height as f32) * scale).round().max(1.0) as u32;
    (w, h)
}
