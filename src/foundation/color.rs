//! Linear-float color values and the blend formulas used by the gradient and
//! vignette passes.

use crate::foundation::math::{clamp01, lerp};
use crate::params::BlendMode;

/// RGB color with channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Rgb {
    /// Construct without clamping.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Clamp every channel into `[0, 1]`.
    pub fn clamped(self) -> Self {
        Self {
            r: clamp01(self.r),
            g: clamp01(self.g),
            b: clamp01(self.b),
        }
    }

    /// Channel-wise linear interpolation towards `other`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            r: lerp(self.r, other.r, t),
            g: lerp(self.g, other.g, t),
            b: lerp(self.b, other.b, t),
        }
    }

    /// Rec.601 luma of the (clamped) color.
    pub fn luminance(self) -> f32 {
        let c = self.clamped();
        0.299 * c.r + 0.587 * c.g + 0.114 * c.b
    }

    /// Quantize to RGBA8 with an opaque alpha byte.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |v: f32| (clamp01(v) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), 255]
    }
}

/// Standard HSL to RGB conversion.
///
/// Hue wraps modulo 360; saturation and lightness are clamped to `[0, 1]`.
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> Rgb {
    let h = hue.rem_euclid(360.0) / 360.0;
    let s = clamp01(saturation);
    let l = clamp01(lightness);

    if s <= 0.0 {
        return Rgb::new(l, l, l);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Rgb::new(
        hue_channel(p, q, h + 1.0 / 3.0),
        hue_channel(p, q, h),
        hue_channel(p, q, h - 1.0 / 3.0),
    )
}

fn hue_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Composite `top` onto `base` with the given blend mode.
///
/// `Normal` replaces; the rest use the standard photographic formulas.
pub fn blend(base: Rgb, top: Rgb, mode: BlendMode) -> Rgb {
    match mode {
        BlendMode::Normal => top,
        BlendMode::Overlay => per_channel(base, top, overlay_channel),
        BlendMode::SoftLight => per_channel(base, top, soft_light_channel),
        BlendMode::Screen => per_channel(base, top, screen_channel),
    }
}

fn per_channel(base: Rgb, top: Rgb, f: fn(f32, f32) -> f32) -> Rgb {
    let base = base.clamped();
    let top = top.clamped();
    Rgb::new(f(base.r, top.r), f(base.g, top.g), f(base.b, top.b))
}

fn overlay_channel(b: f32, t: f32) -> f32 {
    if b < 0.5 {
        2.0 * b * t
    } else {
        1.0 - 2.0 * (1.0 - b) * (1.0 - t)
    }
}

fn soft_light_channel(b: f32, t: f32) -> f32 {
    if t < 0.5 {
        b - (1.0 - 2.0 * t) * b * (1.0 - b)
    } else {
        let d = if b < 0.25 {
            ((16.0 * b - 12.0) * b + 4.0) * b
        } else {
            b.sqrt()
        };
        b + (2.0 * t - 1.0) * (d - b)
    }
}

pub(crate) fn screen_channel(b: f32, t: f32) -> f32 {
    1.0 - (1.0 - b) * (1.0 - t)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
