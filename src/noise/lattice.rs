//! Lattice noise: hashed values or gradients at integer grid points,
//! interpolated between them.

use crate::foundation::math::{cell_unit, clamp01, hash2, lerp, smoothstep01};

/// Bilinear interpolation of hashed corner values with smoothstep easing.
pub(crate) fn value(x: f32, y: f32, seed: u32) -> f32 {
    let xi = x.floor() as i32;
    let yi = y.floor() as i32;
    let fx = x - x.floor();
    let fy = y - y.floor();

    let u = smoothstep01(fx);
    let v = smoothstep01(fy);

    let c00 = cell_unit(xi, yi, seed);
    let c10 = cell_unit(xi + 1, yi, seed);
    let c01 = cell_unit(xi, yi + 1, seed);
    let c11 = cell_unit(xi + 1, yi + 1, seed);

    lerp(lerp(c00, c10, u), lerp(c01, c11, u), v)
}

/// Dot product of a hashed unit gradient with the corner offset vector.
fn grad(hash: u32, dx: f32, dy: f32) -> f32 {
    match hash & 7 {
        0 => dx + dy,
        1 => dx - dy,
        2 => -dx + dy,
        3 => -dx - dy,
        4 => dx,
        5 => -dx,
        6 => dy,
        _ => -dy,
    }
}

/// Classic lattice-gradient (Perlin) noise, remapped to `[0, 1]`.
pub(crate) fn perlin(x: f32, y: f32, seed: u32) -> f32 {
    let xi = x.floor() as i32;
    let yi = y.floor() as i32;
    let fx = x - x.floor();
    let fy = y - y.floor();

    let u = smoothstep01(fx);
    let v = smoothstep01(fy);

    let n00 = grad(hash2(xi, yi, seed), fx, fy);
    let n10 = grad(hash2(xi + 1, yi, seed), fx - 1.0, fy);
    let n01 = grad(hash2(xi, yi + 1, seed), fx, fy - 1.0);
    let n11 = grad(hash2(xi + 1, yi + 1, seed), fx - 1.0, fy - 1.0);

    let n = lerp(lerp(n00, n10, u), lerp(n01, n11, u), v);
    clamp01(0.5 + 0.5 * n)
}

/// Standard 2D simplex noise, remapped to `[0, 1]`.
pub(crate) fn simplex(x: f32, y: f32, seed: u32) -> f32 {
    // Skew/unskew constants: F2 = (sqrt(3)-1)/2, G2 = (3-sqrt(3))/6.
    const F2: f32 = 0.366_025_4;
    const G2: f32 = 0.211_324_87;

    let s = (x + y) * F2;
    let i = (x + s).floor() as i32;
    let j = (y + s).floor() as i32;

    let t = (i + j) as f32 * G2;
    let x0 = x - (i as f32 - t);
    let y0 = y - (j as f32 - t);

    let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

    let x1 = x0 - i1 as f32 + G2;
    let y1 = y0 - j1 as f32 + G2;
    let x2 = x0 - 1.0 + 2.0 * G2;
    let y2 = y0 - 1.0 + 2.0 * G2;

    let mut n = 0.0;
    for (cx, cy, dx, dy) in [
        (i, j, x0, y0),
        (i + i1, j + j1, x1, y1),
        (i + 1, j + 1, x2, y2),
    ] {
        let t = 0.5 - dx * dx - dy * dy;
        if t > 0.0 {
            let t2 = t * t;
            n += t2 * t2 * grad(hash2(cx, cy, seed), dx, dy);
        }
    }

    clamp01(0.5 + 0.5 * (70.0 * n))
}
