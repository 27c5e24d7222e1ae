//! Seeded 2D noise/grain generators.
//!
//! Every generator satisfies the same contract: [`sample`] is a pure
//! function of `(algorithm, x, y, seed, params)` returning a value in
//! `[0, 1]`. Both renderer backends call this exact code, so their noise
//! agrees bit-for-bit.
//!
//! Coordinates arrive already scaled by the grain frequency (cycles across
//! the unit image). Point-process generators (uniform, gaussian, blue-noise)
//! additionally quantize at [`CELL_SUBDIV`] subdivisions per cycle so the
//! `size` knob changes speck size without depending on output resolution.

pub(crate) mod blue;
pub(crate) mod cellular;
pub(crate) mod lattice;

use crate::foundation::math::{cell_unit, clamp01, hash2, hash_unit};
use crate::params::GrainAlgorithm;

/// Subdivisions per frequency cycle for quantizing point-process grains.
const CELL_SUBDIV: f32 = 64.0;

/// Fractal accumulation controls shared by fbm-style generators.
#[derive(Clone, Copy, Debug)]
pub struct FractalParams {
    /// Number of accumulated octaves, `[1, 8]`.
    pub octaves: u32,
    /// Frequency multiplier between octaves.
    pub lacunarity: f32,
    /// Amplitude multiplier between octaves.
    pub gain: f32,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            octaves: 4,
            lacunarity: 2.0,
            gain: 0.55,
        }
    }
}

/// Sample the selected generator at a frequency-scaled coordinate.
pub fn sample(
    algorithm: GrainAlgorithm,
    x: f32,
    y: f32,
    seed: u32,
    params: &FractalParams,
) -> f32 {
    let v = match algorithm {
        GrainAlgorithm::Uniform => uniform(x, y, seed),
        GrainAlgorithm::Gaussian => gaussian(x, y, seed),
        GrainAlgorithm::Value => lattice::value(x, y, seed),
        GrainAlgorithm::Perlin => lattice::perlin(x, y, seed),
        GrainAlgorithm::Simplex => lattice::simplex(x, y, seed),
        GrainAlgorithm::Fbm => fbm(x, y, seed, params),
        GrainAlgorithm::BlueNoise => blue::sample_tiled(x * CELL_SUBDIV, y * CELL_SUBDIV, seed),
        GrainAlgorithm::Stipple => cellular::stipple(x, y, seed),
        GrainAlgorithm::Fiber => fiber(x, y, seed, params),
    };
    clamp01(v)
}

fn quantize(v: f32) -> i32 {
    (v * CELL_SUBDIV).floor() as i32
}

/// Hash of the quantized coordinate: white noise.
fn uniform(x: f32, y: f32, seed: u32) -> f32 {
    cell_unit(quantize(x), quantize(y), seed)
}

/// Box-Muller over two independent uniform draws for the same cell,
/// recentred on 0.5 with std 0.18 and clamped into range.
fn gaussian(x: f32, y: f32, seed: u32) -> f32 {
    let (xi, yi) = (quantize(x), quantize(y));
    let u1 = cell_unit(xi, yi, seed.wrapping_add(0x9e37_79b9)).max(1e-7);
    let u2 = cell_unit(xi, yi, seed.wrapping_add(0x3c6e_f372));
    let z = (-2.0 * u1.ln()).sqrt() * (std::f32::consts::TAU * u2).cos();
    clamp01(0.5 + 0.18 * z)
}

/// Fractal sum of Perlin octaves, normalized by the amplitude actually used
/// so low-octave settings do not darken the result.
pub(crate) fn fbm(x: f32, y: f32, seed: u32, params: &FractalParams) -> f32 {
    let octaves = params.octaves.clamp(1, 8);
    let mut sum = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut total = 0.0;
    for octave in 0..octaves {
        let layer_seed = seed.wrapping_add(octave.wrapping_mul(0x9e37_79b9));
        sum += lattice::perlin(x * frequency, y * frequency, layer_seed) * amplitude;
        total += amplitude;
        amplitude *= params.gain;
        frequency *= params.lacunarity;
    }
    sum / total
}

/// Directional fractal noise along a seed-derived angle, with a small
/// high-frequency Perlin micro-texture mixed in.
fn fiber(x: f32, y: f32, seed: u32, params: &FractalParams) -> f32 {
    let angle = hash_unit(hash2(17, 31, seed)) * std::f32::consts::PI;
    let (sin_a, cos_a) = angle.sin_cos();
    let along = x * cos_a + y * sin_a;
    let across = -x * sin_a + y * cos_a;

    let strands = fbm(along * 0.75, across * 6.0, seed, params);
    let micro = lattice::perlin(x * 7.0, y * 7.0, seed.wrapping_add(0x51_7c_c1_b7));
    0.7 * strands + 0.3 * micro
}

#[cfg(test)]
#[path = "../../tests/unit/noise/sample.rs"]
mod tests;
