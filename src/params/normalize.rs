//! Total normalization of untrusted parameter input.
//!
//! [`normalize`] merges a partial/malformed JSON document onto the full
//! schema defaults: object fields merge key-wise, arrays and primitives
//! replace wholesale, every numeric field is clamped to its declared bounds
//! and every unknown enum token falls back to the schema default. It never
//! fails, so the pipeline downstream never sees invalid input.

use serde_json::Value;

use crate::params::model::{
    BlendMode, CanvasParams, CenterPoint, ChromaParams, ColorParams, EnumToken, GradientKind,
    GradientMode, GradientParams, GradientStop, GrainAlgorithm, GrainParams, GrainSize,
    IntensityCurve, OutputFormat, OutputParams, PaletteOverride, ParameterSnapshot, RandomParams,
    StyleParams, StyleVariant, VignetteMode, VignetteParams, default_stops,
};

/// Maximum number of gradient stops retained after normalization.
pub const MAX_STOPS: usize = 8;

/// Produce a complete, type-valid snapshot from arbitrary JSON input.
pub fn normalize(input: &Value) -> ParameterSnapshot {
    ParameterSnapshot {
        canvas: canvas(section(input, "canvas")),
        color: color(section(input, "color")),
        gradient: gradient(section(input, "gradient")),
        grain: grain(section(input, "grain")),
        style: style(section(input, "style")),
        vignette: vignette(section(input, "vignette")),
        random: random(section(input, "random")),
        output: output(section(input, "output")),
    }
}

fn section<'a>(v: &'a Value, key: &str) -> &'a Value {
    v.get(key).unwrap_or(&Value::Null)
}

fn num(v: &Value, key: &str, default: f32, lo: f32, hi: f32) -> f32 {
    v.get(key)
        .and_then(Value::as_f64)
        .map(|x| x as f32)
        .unwrap_or(default)
        .clamp(lo, hi)
}

fn degrees(v: &Value, key: &str, default: f32) -> f32 {
    v.get(key)
        .and_then(Value::as_f64)
        .map(|x| x as f32)
        .unwrap_or(default)
        .rem_euclid(360.0)
}

fn boolean(v: &Value, key: &str, default: bool) -> bool {
    v.get(key).and_then(Value::as_bool).unwrap_or(default)
}

fn dimension(v: &Value, key: &str, default: u32) -> u32 {
    v.get(key)
        .and_then(Value::as_u64)
        .map(|x| x.min(u32::MAX as u64) as u32)
        .unwrap_or(default)
        .max(1)
}

fn token<T: EnumToken>(v: &Value, key: &str) -> T {
    v.get(key)
        .and_then(Value::as_str)
        .and_then(T::from_token)
        .unwrap_or_default()
}

fn canvas(v: &Value) -> CanvasParams {
    let d = CanvasParams::default();
    CanvasParams {
        width: dimension(v, "width", d.width),
        height: dimension(v, "height", d.height),
        preview_scale: num(v, "previewScale", d.preview_scale, 0.01, 1.0),
    }
}

fn color(v: &Value) -> ColorParams {
    let d = ColorParams::default();
    ColorParams {
        hue: degrees(v, "hue", d.hue),
        saturation: num(v, "saturation", d.saturation, 0.0, 1.0),
        lightness: num(v, "lightness", d.lightness, 0.0, 1.0),
        gamma: num(v, "gamma", d.gamma, 0.8, 2.2),
    }
}

fn center(v: &Value) -> CenterPoint {
    let v = section(v, "center");
    let d = CenterPoint::default();
    CenterPoint {
        x: num(v, "x", d.x, 0.0, 1.0),
        y: num(v, "y", d.y, 0.0, 1.0),
    }
}

fn stops(v: &Value) -> Vec<GradientStop> {
    let mut out: Vec<GradientStop> = match v.get("stops").and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .filter(|item| item.is_object())
            .take(MAX_STOPS)
            .map(|item| GradientStop {
                pos: num(item, "pos", 0.0, 0.0, 1.0),
                hue_shift: num(item, "hueShift", 0.0, -180.0, 180.0),
                lightness_delta: num(item, "lightnessDelta", 0.0, -1.0, 1.0),
                opacity: num(item, "opacity", 1.0, 0.0, 1.0),
            })
            .collect(),
        None => default_stops(),
    };
    if out.is_empty() {
        out = default_stops();
    }
    // Stable sort: equal positions keep their original order.
    out.sort_by(|a, b| a.pos.total_cmp(&b.pos));
    out
}

fn palette(v: &Value) -> Option<PaletteOverride> {
    let p = v.get("palette")?;
    if !p.is_object() {
        return None;
    }
    let d = PaletteOverride::default();
    Some(PaletteOverride {
        hue: degrees(p, "hue", d.hue),
        saturation: num(p, "saturation", d.saturation, 0.0, 1.0),
        lightness: num(p, "lightness", d.lightness, 0.0, 1.0),
    })
}

fn gradient(v: &Value) -> GradientParams {
    let d = GradientParams::default();
    GradientParams {
        kind: token::<GradientKind>(v, "type"),
        mode: token::<GradientMode>(v, "mode"),
        angle: degrees(v, "angle", d.angle),
        center: center(v),
        scale: num(v, "scale", d.scale, 1e-3, 100.0),
        stops: stops(v),
        blend: token::<BlendMode>(v, "blend"),
        palette: palette(v),
    }
}

fn chroma(v: &Value) -> ChromaParams {
    let v = section(v, "chroma");
    let d = ChromaParams::default();
    ChromaParams {
        enabled: boolean(v, "enabled", d.enabled),
        intensity: num(v, "intensity", d.intensity, 0.0, 0.2),
    }
}

fn grain(v: &Value) -> GrainParams {
    let d = GrainParams::default();
    GrainParams {
        enabled: boolean(v, "enabled", d.enabled),
        amount: num(v, "amount", d.amount, 0.0, 100.0),
        size: token::<GrainSize>(v, "size"),
        algorithm: token::<GrainAlgorithm>(v, "algorithm"),
        octaves: (v
            .get("octaves")
            .and_then(Value::as_u64)
            .unwrap_or(d.octaves as u64) as u32)
            .clamp(1, 8),
        lacunarity: num(v, "lacunarity", d.lacunarity, 1.0, 4.0),
        gain: num(v, "gain", d.gain, 0.1, 1.0),
        chroma: chroma(v),
        intensity_curve: token::<IntensityCurve>(v, "intensityCurve"),
        protect_shadows: num(v, "protectShadows", d.protect_shadows, 0.0, 0.2),
    }
}

fn style(v: &Value) -> StyleParams {
    let variant = token::<StyleVariant>(v, "variant");
    // Absent strength falls back to the variant's catalog default rather than
    // the schema zero, so picking a variant alone produces its look.
    let default_strength = crate::pipeline::variant::default_strength(variant);
    StyleParams {
        variant,
        strength: num(v, "strength", default_strength, 0.0, 1.0),
    }
}

fn vignette(v: &Value) -> VignetteParams {
    let d = VignetteParams::default();
    VignetteParams {
        strength: num(v, "strength", d.strength, 0.0, 1.0),
        radius: num(v, "radius", d.radius, 0.0, 2.0),
        feather: num(v, "feather", d.feather, 0.0, 1.0),
        roundness: num(v, "roundness", d.roundness, 0.2, 2.0),
        mode: token::<VignetteMode>(v, "mode"),
    }
}

fn random(v: &Value) -> RandomParams {
    let d = RandomParams::default();
    RandomParams {
        seed: v
            .get("seed")
            .and_then(Value::as_u64)
            .map(|s| (s & u64::from(u32::MAX)) as u32)
            .unwrap_or(d.seed),
    }
}

fn output(v: &Value) -> OutputParams {
    let d = OutputParams::default();
    OutputParams {
        format: token::<OutputFormat>(v, "format"),
        jpg_quality: num(v, "jpgQuality", d.jpg_quality, 0.6, 1.0),
        embed_metadata: boolean(v, "embedMetadata", d.embed_metadata),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/normalize.rs"]
mod tests;
