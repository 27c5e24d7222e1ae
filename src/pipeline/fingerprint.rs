//! Stable fingerprints for render-affecting parameter subsets.
//!
//! Per-renderer caches (the reference backend's full-resolution buffer, its
//! grain plane) are keyed by these, so an unrelated parameter change does
//! not invalidate work it cannot affect.

use xxhash_rust::xxh3::Xxh3;

use crate::params::{GradientParams, GrainParams, ParameterSnapshot, StyleParams, VignetteParams};

const XXH3_SEED: u64 = 0x6f1d_8a42_9c5e_03b7;

/// 128-bit stable fingerprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Fingerprint {
    pub(crate) hi: u64,
    pub(crate) lo: u64,
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f32(&mut self, v: f32) {
        self.write_u32(v.to_bits());
    }

    fn finish(self) -> Fingerprint {
        let v = self.inner.digest128();
        Fingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

/// Fingerprint of everything that changes rendered pixels at a given target
/// size, including the dither flag.
pub(crate) fn fingerprint_render(
    snapshot: &ParameterSnapshot,
    width: u32,
    height: u32,
    dither: bool,
) -> Fingerprint {
    let mut h = StableHasher::new();
    h.write_u32(width);
    h.write_u32(height);
    h.write_bool(dither);

    h.write_f32(snapshot.color.hue);
    h.write_f32(snapshot.color.saturation);
    h.write_f32(snapshot.color.lightness);
    h.write_f32(snapshot.color.gamma);

    write_gradient(&mut h, &snapshot.gradient);
    write_grain(&mut h, &snapshot.grain);
    write_style(&mut h, &snapshot.style);
    write_vignette(&mut h, &snapshot.vignette);

    h.write_u32(snapshot.random.seed);
    h.finish()
}

/// Fingerprint of the parameters that affect raw grain samples at a given
/// target size. Gradient/vignette/style edits leave this untouched.
pub(crate) fn fingerprint_grain(
    grain: &GrainParams,
    seed: u32,
    width: u32,
    height: u32,
) -> Fingerprint {
    let mut h = StableHasher::new();
    h.write_u32(width);
    h.write_u32(height);
    h.write_bool(grain.enabled);
    h.write_u8(algorithm_tag(grain));
    h.write_u8(size_tag(grain));
    h.write_u32(grain.octaves);
    h.write_f32(grain.lacunarity);
    h.write_f32(grain.gain);
    h.write_u32(seed);
    h.finish()
}

fn write_gradient(h: &mut StableHasher, g: &GradientParams) {
    h.write_u8(g.kind as u8);
    h.write_u8(g.mode as u8);
    h.write_f32(g.angle);
    h.write_f32(g.center.x);
    h.write_f32(g.center.y);
    h.write_f32(g.scale);
    h.write_u8(g.blend as u8);
    h.write_u32(g.stops.len() as u32);
    for s in &g.stops {
        h.write_f32(s.pos);
        h.write_f32(s.hue_shift);
        h.write_f32(s.lightness_delta);
        h.write_f32(s.opacity);
    }
    match g.palette {
        Some(p) => {
            h.write_u8(1);
            h.write_f32(p.hue);
            h.write_f32(p.saturation);
            h.write_f32(p.lightness);
        }
        None => h.write_u8(0),
    }
}

fn write_grain(h: &mut StableHasher, g: &GrainParams) {
    h.write_bool(g.enabled);
    h.write_f32(g.amount);
    h.write_u8(size_tag(g));
    h.write_u8(algorithm_tag(g));
    h.write_u32(g.octaves);
    h.write_f32(g.lacunarity);
    h.write_f32(g.gain);
    h.write_bool(g.chroma.enabled);
    h.write_f32(g.chroma.intensity);
    h.write_u8(g.intensity_curve as u8);
    h.write_f32(g.protect_shadows);
}

fn write_style(h: &mut StableHasher, s: &StyleParams) {
    h.write_u8(s.variant as u8);
    h.write_f32(s.strength);
}

fn write_vignette(h: &mut StableHasher, v: &VignetteParams) {
    h.write_f32(v.strength);
    h.write_f32(v.radius);
    h.write_f32(v.feather);
    h.write_f32(v.roundness);
    h.write_u8(v.mode as u8);
}

fn size_tag(g: &GrainParams) -> u8 {
    g.size as u8
}

fn algorithm_tag(g: &GrainParams) -> u8 {
    g.algorithm as u8
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/fingerprint.rs"]
mod tests;
