//! Gradient field evaluation: pixel coordinate → gradient parameter `t`,
//! and `t` → color via stop interpolation or banding.

use smallvec::SmallVec;

use crate::foundation::color::{Rgb, blend, hsl_to_rgb};
use crate::foundation::math::{clamp01, fract, lerp, smoothstep01};
use crate::params::{
    BlendMode, CenterPoint, ColorParams, GradientKind, GradientMode, GradientParams,
};

/// Guard for degenerate stop spans in continuous interpolation.
const SEGMENT_EPS: f32 = 1e-6;

/// A gradient stop with its palette deltas applied and color resolved.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ResolvedStop {
    pub(crate) pos: f32,
    pub(crate) color: Rgb,
    pub(crate) opacity: f32,
}

/// Stops in inline storage; normalization caps the sequence at 8.
pub(crate) type ResolvedStops = SmallVec<[ResolvedStop; 8]>;

/// Resolve every stop against the palette (override or base color).
pub(crate) fn resolve_stops(params: &GradientParams, base: &ColorParams) -> ResolvedStops {
    let (hue, saturation, lightness) = match params.palette {
        Some(p) => (p.hue, p.saturation, p.lightness),
        None => (base.hue, base.saturation, base.lightness),
    };

    params
        .stops
        .iter()
        .map(|stop| ResolvedStop {
            pos: stop.pos,
            color: hsl_to_rgb(
                hue + stop.hue_shift,
                saturation,
                clamp01(lightness + stop.lightness_delta),
            ),
            opacity: stop.opacity,
        })
        .collect()
}

/// Map a normalized pixel coordinate onto the gradient parameter `t ∈ [0, 1]`.
pub(crate) fn factor(
    kind: GradientKind,
    u: f32,
    v: f32,
    angle_deg: f32,
    center: CenterPoint,
    scale: f32,
) -> f32 {
    let dx = (u - center.x) * scale;
    let dy = (v - center.y) * scale;

    match kind {
        GradientKind::Flat => 0.0,
        GradientKind::Linear => {
            let angle = angle_deg.to_radians();
            clamp01(0.5 + dx * angle.cos() + dy * angle.sin())
        }
        GradientKind::Radial => clamp01((dx * dx + dy * dy).sqrt() * std::f32::consts::SQRT_2),
        GradientKind::Conic => {
            let turn = dy.atan2(dx) / std::f32::consts::TAU;
            fract(turn + angle_deg / 360.0)
        }
        GradientKind::CornerGlow => {
            let cx = clamp01(center.x);
            let cy = clamp01(center.y);
            let ex = (u - cx) * scale;
            let ey = (v - cy) * scale;
            clamp01((ex * ex + ey * ey).sqrt())
        }
    }
}

/// Resolve `t` to a color and composite it over the base fill.
pub(crate) fn shade(
    t: f32,
    base: Rgb,
    stops: &[ResolvedStop],
    mode: GradientMode,
    blend_mode: BlendMode,
) -> Rgb {
    let Some(first) = stops.first() else {
        return base;
    };
    let (color, opacity) = match mode {
        GradientMode::Discrete => {
            // Greatest stop position <= t; before the first stop, the first.
            let stop = stops
                .iter()
                .rev()
                .find(|s| s.pos <= t)
                .unwrap_or(first);
            (stop.color, stop.opacity)
        }
        GradientMode::Continuous => continuous_at(t, stops),
    };

    let layered = blend(base, color, blend_mode);
    base.lerp(layered, clamp01(opacity)).clamped()
}

fn continuous_at(t: f32, stops: &[ResolvedStop]) -> (Rgb, f32) {
    let first = stops[0];
    let last = stops[stops.len() - 1];

    // Edge policy: clamp to the nearest stop's resolved color.
    if t <= first.pos {
        return (first.color, first.opacity);
    }
    if t >= last.pos {
        return (last.color, last.opacity);
    }

    for pair in stops.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        if t <= next.pos {
            let span = (next.pos - prev.pos).max(SEGMENT_EPS);
            let eased = smoothstep01((t - prev.pos) / span);
            return (
                prev.color.lerp(next.color, eased),
                lerp(prev.opacity, next.opacity, eased),
            );
        }
    }

    (last.color, last.opacity)
}

#[cfg(test)]
#[path = "../tests/unit/gradient.rs"]
mod tests;
