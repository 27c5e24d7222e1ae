//! Rayon per-pixel-parallel backend.
//!
//! The accelerated path: every row is shaded in parallel with the exact
//! same [`ShadeContext`] code the reference backend runs, so both backends
//! produce identical pixels. Previews re-evaluate the pipeline through the
//! camera-transformed coordinate window instead of resampling a buffer.

use rayon::prelude::*;

use crate::foundation::error::{WallforgeError, WallforgeResult};
use crate::params::ParameterSnapshot;
use crate::pipeline::ShadeContext;
use crate::render::backend::{BackendKind, FrameRgba, RenderBackend, RenderOpts};

/// Per-pixel-parallel evaluator backed by its own rayon worker pool.
pub struct ParallelBackend {
    pool: rayon::ThreadPool,
}

impl ParallelBackend {
    /// Build the backend and its worker pool.
    pub fn new() -> WallforgeResult<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .build()
            .map_err(|e| WallforgeError::capability(format!("worker pool unavailable: {e}")))?;
        Ok(Self { pool })
    }
}

impl RenderBackend for ParallelBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Parallel
    }

    fn render(
        &mut self,
        snapshot: &ParameterSnapshot,
        opts: &RenderOpts,
    ) -> WallforgeResult<FrameRgba> {
        let ctx = ShadeContext::new(snapshot, opts.dither);
        let width = opts.width.max(1);
        let height = opts.height.max(1);
        let camera = opts.camera;

        let mut data = vec![0u8; (width as usize) * (height as usize) * 4];
        let row_stride = (width as usize) * 4;

        self.pool.install(|| {
            data.par_chunks_exact_mut(row_stride)
                .enumerate()
                .for_each(|(y, row)| {
                    let v = (y as f32 + 0.5) / height as f32;
                    for (x, px) in row.chunks_exact_mut(4).enumerate() {
                        let u = (x as f32 + 0.5) / width as f32;
                        let (su, sv) = match camera {
                            Some(cam) => cam.map(u, v),
                            None => (u, v),
                        };
                        let color = ctx.shade(su, sv, x as u32, y as u32, None);
                        px.copy_from_slice(&color.to_rgba8());
                    }
                });
        });

        Ok(FrameRgba {
            width,
            height,
            data,
        })
    }
}
