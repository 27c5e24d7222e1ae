//! Backend contract shared by the parallel and reference evaluators.

use std::sync::Once;

use crate::foundation::error::WallforgeResult;
use crate::params::ParameterSnapshot;
use crate::render::target::Camera;

/// A rendered frame as tightly packed, row-major RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgba {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

/// Available backend kinds.
///
/// - `Reference` is always available and is the behavioral reference.
/// - `Parallel` evaluates the same pipeline per-pixel-parallel and is used
///   for real-time preview when it can be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    /// Rayon per-pixel-parallel evaluator.
    Parallel,
    /// Sequential evaluator with a cached full-resolution buffer.
    Reference,
}

/// Per-call rendering options.
#[derive(Clone, Copy, Debug)]
pub struct RenderOpts {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Preview window; `None` renders the full image one-to-one.
    pub camera: Option<Camera>,
    /// Enable the ordered-dither pass (JPEG export only).
    pub dither: bool,
}

impl RenderOpts {
    /// Full-image render at the given size, no windowing, no dither.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            camera: None,
            dither: false,
        }
    }
}

/// A renderer that evaluates the compositing pipeline into a [`FrameRgba`].
///
/// Both implementations share the exact same per-pixel shading code; they
/// differ only in evaluation strategy (parallel re-evaluation vs sequential
/// render plus viewport resampling).
pub trait RenderBackend {
    /// Which backend this is.
    fn kind(&self) -> BackendKind;

    /// Render a snapshot with the given options.
    fn render(
        &mut self,
        snapshot: &ParameterSnapshot,
        opts: &RenderOpts,
    ) -> WallforgeResult<FrameRgba>;
}

/// Create a rendering backend of the requested kind.
///
/// `Reference` cannot fail; `Parallel` fails with a capability error when
/// its worker pool cannot be constructed.
pub fn create_backend(kind: BackendKind) -> WallforgeResult<Box<dyn RenderBackend>> {
    match kind {
        BackendKind::Parallel => Ok(Box::new(crate::render::parallel::ParallelBackend::new()?)),
        BackendKind::Reference => Ok(Box::new(crate::render::reference::ReferenceBackend::new())),
    }
}

static CAPABILITY_WARNING: Once = Once::new();

/// Create the preferred backend, falling back to the reference backend.
///
/// The capability warning is emitted once per process; after that the
/// session stays on the reference backend silently.
pub fn create_backend_with_fallback(preferred: BackendKind) -> Box<dyn RenderBackend> {
    match create_backend(preferred) {
        Ok(backend) => backend,
        Err(err) => {
            CAPABILITY_WARNING.call_once(|| {
                tracing::warn!(
                    error = %err,
                    "accelerated backend unavailable, falling back to reference backend"
                );
            });
            Box::new(crate::render::reference::ReferenceBackend::new())
        }
    }
}
