//! Sequential reference backend.
//!
//! Renders the full-resolution image once per parameter change and serves
//! pan/zoom previews by resampling the cached buffer, which is much cheaper
//! than re-evaluating noise on every interaction frame. Raw grain samples
//! are cached separately, keyed by the grain fingerprint, so edits to
//! seed-independent passes (gradient, vignette, style) re-composite without
//! regenerating noise.

use crate::foundation::error::WallforgeResult;
use crate::params::ParameterSnapshot;
use crate::pipeline::ShadeContext;
use crate::pipeline::fingerprint::{Fingerprint, fingerprint_grain, fingerprint_render};
use crate::render::backend::{BackendKind, FrameRgba, RenderBackend, RenderOpts};
use crate::render::target::Camera;

/// Sequential evaluator; the behavioral reference for the parallel backend.
pub struct ReferenceBackend {
    frame_cache: Option<(Fingerprint, FrameRgba)>,
    grain_cache: Option<(Fingerprint, Vec<f32>)>,
}

impl ReferenceBackend {
    /// Create a backend with empty caches.
    pub fn new() -> Self {
        Self {
            frame_cache: None,
            grain_cache: None,
        }
    }

    fn render_full(
        &mut self,
        snapshot: &ParameterSnapshot,
        width: u32,
        height: u32,
        dither: bool,
    ) -> FrameRgba {
        let ctx = ShadeContext::new(snapshot, dither);

        let grain = if ctx.grain_active() {
            let key = fingerprint_grain(&snapshot.grain, snapshot.random.seed, width, height);
            let plane = match self.grain_cache.take() {
                Some((k, plane)) if k == key => plane,
                _ => build_grain_plane(&ctx, width, height),
            };
            self.grain_cache = Some((key, plane));
            self.grain_cache.as_ref().map(|(_, plane)| plane)
        } else {
            None
        };

        let mut data = Vec::with_capacity((width as usize) * (height as usize) * 4);
        for y in 0..height {
            let v = (y as f32 + 0.5) / height as f32;
            for x in 0..width {
                let u = (x as f32 + 0.5) / width as f32;
                let raw =
                    grain.map(|plane| plane[(y as usize) * (width as usize) + (x as usize)]);
                data.extend_from_slice(&ctx.shade(u, v, x, y, raw).to_rgba8());
            }
        }

        FrameRgba {
            width,
            height,
            data,
        }
    }

    fn cached_full(&mut self, snapshot: &ParameterSnapshot, width: u32, height: u32) -> FrameRgba {
        let key = fingerprint_render(snapshot, width, height, false);
        if let Some((k, frame)) = &self.frame_cache
            && *k == key
        {
            return frame.clone();
        }
        let frame = self.render_full(snapshot, width, height, false);
        self.frame_cache = Some((key, frame.clone()));
        frame
    }

    fn resample(source: &FrameRgba, camera: Camera, width: u32, height: u32) -> FrameRgba {
        let mut data = Vec::with_capacity((width as usize) * (height as usize) * 4);
        for y in 0..height {
            let v = (y as f32 + 0.5) / height as f32;
            for x in 0..width {
                let u = (x as f32 + 0.5) / width as f32;
                let (su, sv) = camera.map(u, v);
                let sx = ((su * source.width as f32) as i64).clamp(0, i64::from(source.width) - 1)
                    as usize;
                let sy = ((sv * source.height as f32) as i64)
                    .clamp(0, i64::from(source.height) - 1) as usize;
                let idx = (sy * source.width as usize + sx) * 4;
                data.extend_from_slice(&source.data[idx..idx + 4]);
            }
        }
        FrameRgba {
            width,
            height,
            data,
        }
    }
}

fn build_grain_plane(ctx: &ShadeContext, width: u32, height: u32) -> Vec<f32> {
    let mut plane = Vec::with_capacity((width as usize) * (height as usize));
    for y in 0..height {
        let v = (y as f32 + 0.5) / height as f32;
        for x in 0..width {
            let u = (x as f32 + 0.5) / width as f32;
            plane.push(ctx.raw_grain(u, v));
        }
    }
    plane
}

impl Default for ReferenceBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for ReferenceBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Reference
    }

    fn render(
        &mut self,
        snapshot: &ParameterSnapshot,
        opts: &RenderOpts,
    ) -> WallforgeResult<FrameRgba> {
        match opts.camera {
            None => Ok(self.render_full(snapshot, opts.width, opts.height, opts.dither)),
            Some(camera) => {
                let source = self.cached_full(snapshot, snapshot.canvas.width, snapshot.canvas.height);
                Ok(Self::resample(&source, camera, opts.width, opts.height))
            }
        }
    }
}
