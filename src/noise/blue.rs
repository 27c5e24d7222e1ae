//! Tiled blue-noise grain.
//!
//! A single 64×64 void-and-cluster tile is built lazily and shared across
//! all renders (read-only after construction). The seed never changes the
//! tile itself, only the toroidal lookup offset, so two seeds read the same
//! texture through different windows.

use std::sync::OnceLock;

use crate::foundation::math::{cell_unit, hash2, hash_unit};

const TILE_SIZE: usize = 64;
const TILE_LEN: usize = TILE_SIZE * TILE_SIZE;

/// Gaussian splat radius used when spreading rank energy.
const SPLAT_RADIUS: i32 = 6;
const SPLAT_SIGMA: f32 = 1.9;

struct BlueNoiseTile {
    values: Vec<f32>,
}

static TILE: OnceLock<BlueNoiseTile> = OnceLock::new();

/// Look up the shared tile at a quantized, seed-offset coordinate.
///
/// Falls back to a uniform hash if the tile could not be built.
pub(crate) fn sample_tiled(x: f32, y: f32, seed: u32) -> f32 {
    let tile = TILE.get_or_init(build_tile);
    let xi = x.floor() as i64;
    let yi = y.floor() as i64;

    if tile.values.len() != TILE_LEN {
        return cell_unit(xi as i32, yi as i32, seed);
    }

    let ox = i64::from(hash2(1, 0, seed) % TILE_SIZE as u32);
    let oy = i64::from(hash2(0, 1, seed) % TILE_SIZE as u32);
    let tx = (xi + ox).rem_euclid(TILE_SIZE as i64) as usize;
    let ty = (yi + oy).rem_euclid(TILE_SIZE as i64) as usize;
    tile.values[ty * TILE_SIZE + tx]
}

/// Void-and-cluster-style construction: repeatedly place the next rank at
/// the lowest-energy free texel, then splat a toroidal gaussian around it.
/// Rank order becomes the texel value, yielding an even `[0, 1]` histogram
/// with blue spectral character.
fn build_tile() -> BlueNoiseTile {
    let mut energy = vec![0.0f32; TILE_LEN];
    let mut taken = vec![false; TILE_LEN];
    let mut values = vec![0.0f32; TILE_LEN];

    // Deterministic sub-ulp jitter breaks the initial all-zero energy tie.
    for (i, e) in energy.iter_mut().enumerate() {
        *e = hash_unit(hash2(i as i32, 0x5bd1, 0x1b56_c4e9)) * 1e-4;
    }

    let kernel = splat_kernel();

    for rank in 0..TILE_LEN {
        let mut best = usize::MAX;
        let mut best_energy = f32::MAX;
        for (i, &e) in energy.iter().enumerate() {
            if !taken[i] && e < best_energy {
                best_energy = e;
                best = i;
            }
        }

        taken[best] = true;
        values[best] = (rank as f32 + 0.5) / TILE_LEN as f32;

        let bx = (best % TILE_SIZE) as i32;
        let by = (best / TILE_SIZE) as i32;
        for (dx, dy, w) in &kernel {
            let x = (bx + dx).rem_euclid(TILE_SIZE as i32) as usize;
            let y = (by + dy).rem_euclid(TILE_SIZE as i32) as usize;
            energy[y * TILE_SIZE + x] += w;
        }
    }

    BlueNoiseTile { values }
}

fn splat_kernel() -> Vec<(i32, i32, f32)> {
    let mut kernel = Vec::new();
    for dy in -SPLAT_RADIUS..=SPLAT_RADIUS {
        for dx in -SPLAT_RADIUS..=SPLAT_RADIUS {
            let d_sq = (dx * dx + dy * dy) as f32;
            kernel.push((dx, dy, (-d_sq / (2.0 * SPLAT_SIGMA * SPLAT_SIGMA)).exp()));
        }
    }
    kernel
}
