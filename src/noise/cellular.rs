//! Worley cellular noise used for the stipple grain.

use crate::foundation::math::{cell_unit, hash2, hash_unit};

/// One jittered feature point per grid cell over a 3×3 neighborhood;
/// minimum Euclidean distance to the query, converted to an intensity via a
/// smooth exponential falloff.
pub(crate) fn stipple(x: f32, y: f32, seed: u32) -> f32 {
    let xi = x.floor() as i32;
    let yi = y.floor() as i32;

    let mut min_sq = f32::MAX;
    for dy in -1..=1 {
        for dx in -1..=1 {
            let cx = xi + dx;
            let cy = yi + dy;
            let jx = cell_unit(cx, cy, seed);
            let jy = hash_unit(hash2(cx, cy, seed.wrapping_add(0x68e3_1da4)));
            let px = cx as f32 + jx;
            let py = cy as f32 + jy;
            let d_sq = (x - px) * (x - px) + (y - py) * (y - py);
            min_sq = min_sq.min(d_sq);
        }
    }

    (-3.0 * min_sq.sqrt()).exp()
}
