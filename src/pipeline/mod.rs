//! The compositing pipeline: a linear pass sequence evaluated per pixel.
//!
//! Passes run in a fixed order (base fill, gradient, style variant, grain,
//! vignette, optional Bayer dither, gamma) and each is a pure function of
//! the incoming color, the pixel coordinate and the snapshot. Normalization
//! guarantees in-range input, so nothing here can fail.

pub(crate) mod fingerprint;
pub mod variant;

use crate::foundation::color::{Rgb, blend, hsl_to_rgb, screen_channel};
use crate::foundation::math::{clamp01, smoothstep, smoothstep01};
use crate::gradient::{self, ResolvedStops};
use crate::noise::{self, FractalParams};
use crate::params::{
    BlendMode, GradientKind, IntensityCurve, ParameterSnapshot, StyleVariant, VignetteMode,
};

/// 8×8 ordered (Bayer) dither thresholds.
const BAYER_8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Precompiled per-render state consumed by both backends.
///
/// Building a context resolves everything that does not vary per pixel:
/// the base fill color, the resolved gradient stops, grain frequency and
/// fractal controls, and the gamma exponent.
pub struct ShadeContext {
    base: Rgb,
    gradient_kind: GradientKind,
    gradient_mode: crate::params::GradientMode,
    gradient_blend: BlendMode,
    gradient_angle: f32,
    gradient_center: crate::params::CenterPoint,
    gradient_scale: f32,
    stops: ResolvedStops,

    variant: StyleVariant,
    style_strength: f32,

    grain_enabled: bool,
    grain_algorithm: crate::params::GrainAlgorithm,
    grain_frequency: f32,
    grain_amount: f32,
    grain_curve: IntensityCurve,
    chroma_enabled: bool,
    chroma_intensity: f32,
    protect_shadows: f32,
    fractal: FractalParams,

    vignette: crate::params::VignetteParams,

    seed: u32,
    dither: bool,
    inv_gamma: f32,
}

impl ShadeContext {
    /// Compile a snapshot into per-render state.
    ///
    /// `dither` enables the ordered-dither pass; it is set only for JPEG
    /// export renders.
    pub fn new(snapshot: &ParameterSnapshot, dither: bool) -> Self {
        let color = &snapshot.color;
        let gradient = &snapshot.gradient;
        let grain = &snapshot.grain;

        Self {
            base: hsl_to_rgb(color.hue, color.saturation, color.lightness),
            gradient_kind: gradient.kind,
            gradient_mode: gradient.mode,
            gradient_blend: gradient.blend,
            gradient_angle: gradient.angle,
            gradient_center: gradient.center,
            gradient_scale: gradient.scale,
            stops: gradient::resolve_stops(gradient, color),

            variant: snapshot.style.variant,
            style_strength: clamp01(snapshot.style.strength),

            grain_enabled: grain.enabled && grain.amount > 0.0,
            grain_algorithm: grain.algorithm,
            grain_frequency: grain.size.frequency(),
            grain_amount: grain.amount / 100.0,
            grain_curve: grain.intensity_curve,
            chroma_enabled: grain.chroma.enabled,
            chroma_intensity: grain.chroma.intensity,
            protect_shadows: grain.protect_shadows,
            fractal: FractalParams {
                octaves: grain.octaves,
                lacunarity: grain.lacunarity,
                gain: grain.gain,
            },

            vignette: snapshot.vignette,

            seed: snapshot.random.seed,
            dither,
            inv_gamma: 1.0 / snapshot.color.gamma,
        }
    }

    /// Raw grain sample at a normalized coordinate, before the intensity
    /// curve. Exposed so backends can precompute and cache a grain plane.
    pub fn raw_grain(&self, u: f32, v: f32) -> f32 {
        noise::sample(
            self.grain_algorithm,
            u * self.grain_frequency,
            v * self.grain_frequency,
            self.seed,
            &self.fractal,
        )
    }

    /// Whether the grain pass contributes anything.
    pub fn grain_active(&self) -> bool {
        self.grain_enabled
    }

    /// Evaluate the full pass sequence for one pixel.
    ///
    /// `u`/`v` is the normalized sample coordinate; `px`/`py` the output
    /// pixel used by the dither pattern. `grain_raw` supplies a precomputed
    /// raw sample (see [`ShadeContext::raw_grain`]); `None` evaluates noise
    /// inline. Both paths produce identical results.
    pub fn shade(&self, u: f32, v: f32, px: u32, py: u32, grain_raw: Option<f32>) -> Rgb {
        let mut color = self.base;

        if self.gradient_kind != GradientKind::Flat {
            let t = gradient::factor(
                self.gradient_kind,
                u,
                v,
                self.gradient_angle,
                self.gradient_center,
                self.gradient_scale,
            );
            color = gradient::shade(
                t,
                color,
                &self.stops,
                self.gradient_mode,
                self.gradient_blend,
            );
        }

        color = self.apply_variant(color, u, v);

        if self.grain_enabled {
            let raw = grain_raw.unwrap_or_else(|| self.raw_grain(u, v));
            color = self.apply_grain(color, raw);
        }

        color = self.apply_vignette(color, u, v);

        if self.dither {
            color = apply_dither(color, px, py);
        }

        self.apply_gamma(color)
    }

    fn apply_variant(&self, color: Rgb, u: f32, v: f32) -> Rgb {
        if self.style_strength <= 0.0 {
            return color;
        }

        let stylized = match self.variant {
            StyleVariant::Classic => color,
            StyleVariant::Lumina => {
                // Center-weighted bloom around the gradient anchor.
                let dx = u - self.gradient_center.x;
                let dy = v - self.gradient_center.y;
                let w = 1.0 - clamp01((dx * dx + dy * dy).sqrt() * 1.45);
                let lift = w * w * 0.35;
                Rgb::new(
                    screen_channel(clamp01(color.r), lift),
                    screen_channel(clamp01(color.g), lift),
                    screen_channel(clamp01(color.b), lift),
                )
            }
            StyleVariant::Nocturne => {
                let cooled = Rgb::new(color.r * 0.88, color.g * 0.97, color.b * 1.08);
                let lift = smoothstep(0.55, 1.0, color.luminance()) * 0.10;
                Rgb::new(cooled.r + lift, cooled.g + lift, cooled.b + lift)
            }
            StyleVariant::Ember => {
                let dx = u - 0.5;
                let dy = v - 0.5;
                let edge = (dx * dx + dy * dy).sqrt() * std::f32::consts::SQRT_2;
                let glow = smoothstep(0.45, 1.0, edge);
                Rgb::new(
                    color.r + glow * 0.16,
                    color.g + glow * 0.07,
                    color.b - glow * 0.05,
                )
            }
        };

        color.lerp(stylized.clamped(), self.style_strength)
    }

    fn apply_grain(&self, color: Rgb, raw: f32) -> Rgb {
        let curved = match self.grain_curve {
            IntensityCurve::Linear => raw,
            IntensityCurve::Log => (1.0 + 9.0 * raw).log10(),
            IntensityCurve::SCurve => smoothstep01(raw),
        };

        // Shadow protection: fully attenuated at luminance 0, unattenuated
        // at or above the threshold.
        let attenuation = if self.protect_shadows > 0.0 {
            clamp01(color.luminance() / self.protect_shadows)
        } else {
            1.0
        };

        let out = if self.chroma_enabled {
            // One draw expanded into three 120°-phase-shifted offsets:
            // decorrelated channels without three independent noise fields.
            let theta = curved * std::f32::consts::TAU;
            let tint = self.chroma_intensity * self.grain_amount * attenuation;
            const PHASE: f32 = std::f32::consts::TAU / 3.0;
            Rgb::new(
                color.r + theta.sin() * tint,
                color.g + (theta + PHASE).sin() * tint,
                color.b + (theta + 2.0 * PHASE).sin() * tint,
            )
        } else {
            let mono = (curved - 0.5) * self.grain_amount * attenuation;
            Rgb::new(color.r + mono, color.g + mono, color.b + mono)
        };

        out.clamped()
    }

    fn apply_vignette(&self, color: Rgb, u: f32, v: f32) -> Rgb {
        let vg = &self.vignette;
        if vg.strength <= 0.0 {
            return color;
        }

        let ax = (2.0 * (u - 0.5)).abs().powf(vg.roundness);
        let ay = (2.0 * (v - 0.5)).abs().powf(vg.roundness);
        let distance = (ax * ax + ay * ay).sqrt() / vg.radius.max(1e-3);

        let band = smoothstep(1.0 - vg.feather * 0.5, 1.0 + vg.feather * 0.5, distance);
        let mask = band * vg.strength;
        if mask <= 0.0 {
            return color;
        }

        match vg.mode {
            VignetteMode::Multiply => {
                let keep = 1.0 - mask;
                Rgb::new(color.r * keep, color.g * keep, color.b * keep)
            }
            VignetteMode::SoftLight => {
                // Soft-light against a sub-midpoint gray darkens while
                // lifting blacks slightly.
                let gray = 0.5 - 0.5 * mask;
                blend(color, Rgb::new(gray, gray, gray), BlendMode::SoftLight)
            }
        }
    }

    fn apply_gamma(&self, color: Rgb) -> Rgb {
        let c = color.clamped();
        if (self.inv_gamma - 1.0).abs() < 1e-6 {
            return c;
        }
        Rgb::new(
            c.r.powf(self.inv_gamma),
            c.g.powf(self.inv_gamma),
            c.b.powf(self.inv_gamma),
        )
    }
}

/// Ordered dither: a zero-mean offset of at most 1/255 per channel,
/// applied before quantization to break up banding.
fn apply_dither(color: Rgb, px: u32, py: u32) -> Rgb {
    let threshold = BAYER_8[(py % 8) as usize][(px % 8) as usize];
    let offset = ((f32::from(threshold) + 0.5) / 64.0 - 0.5) / 255.0;
    Rgb::new(color.r + offset, color.g + offset, color.b + offset).clamped()
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/passes.rs"]
mod tests;
