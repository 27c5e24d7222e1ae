use super::*;

use serde_json::json;

#[test]
fn empty_input_yields_full_defaults() {
    assert_eq!(normalize(&json!({})), ParameterSnapshot::default());
    assert_eq!(normalize(&serde_json::Value::Null), ParameterSnapshot::default());
}

#[test]
fn partial_sections_merge_key_wise() {
    let snap = normalize(&json!({"color": {"hue": 10}}));
    assert_eq!(snap.color.hue, 10.0);
    assert_eq!(snap.color.saturation, ColorParams::default().saturation);
    assert_eq!(snap.grain, GrainParams::default());
}

#[test]
fn numeric_fields_clamp_to_declared_bounds() {
    let snap = normalize(&json!({
        "color": {"saturation": 7.5, "lightness": -2, "gamma": 9.0},
        "grain": {"amount": 250, "octaves": 99, "lacunarity": 0.0, "gain": 5.0,
                  "protectShadows": 0.9, "chroma": {"intensity": 3.0}},
        "vignette": {"strength": -1, "radius": 10, "roundness": 0.0},
        "canvas": {"width": 0, "previewScale": 0},
        "output": {"jpgQuality": 0.1},
    }));

    assert_eq!(snap.color.saturation, 1.0);
    assert_eq!(snap.color.lightness, 0.0);
    assert_eq!(snap.color.gamma, 2.2);
    assert_eq!(snap.grain.amount, 100.0);
    assert_eq!(snap.grain.octaves, 8);
    assert_eq!(snap.grain.lacunarity, 1.0);
    assert_eq!(snap.grain.gain, 1.0);
    assert_eq!(snap.grain.protect_shadows, 0.2);
    assert_eq!(snap.grain.chroma.intensity, 0.2);
    assert_eq!(snap.vignette.strength, 0.0);
    assert_eq!(snap.vignette.radius, 2.0);
    assert_eq!(snap.vignette.roundness, 0.2);
    assert_eq!(snap.canvas.width, 1);
    assert_eq!(snap.canvas.preview_scale, 0.01);
    assert_eq!(snap.output.jpg_quality, 0.6);
}

#[test]
fn angles_wrap_rather_than_clamp() {
    let snap = normalize(&json!({
        "color": {"hue": 540},
        "gradient": {"angle": -90},
    }));
    assert_eq!(snap.color.hue, 180.0);
    assert_eq!(snap.gradient.angle, 270.0);
}

#[test]
fn unknown_enum_tokens_fall_back_to_defaults() {
    let snap = normalize(&json!({
        "gradient": {"type": "swirl", "blend": "hard-mix"},
        "grain": {"algorithm": "static", "size": "enormous", "intensityCurve": "bent"},
        "vignette": {"mode": "divide"},
        "output": {"format": "tiff"},
    }));
    assert_eq!(snap.gradient.kind, GradientKind::Linear);
    assert_eq!(snap.gradient.blend, BlendMode::Normal);
    assert_eq!(snap.grain.algorithm, GrainAlgorithm::Fbm);
    assert_eq!(snap.grain.size, GrainSize::Normal);
    assert_eq!(snap.grain.intensity_curve, IntensityCurve::Linear);
    assert_eq!(snap.vignette.mode, VignetteMode::Multiply);
    assert_eq!(snap.output.format, OutputFormat::Png);
}

#[test]
fn flat_and_none_are_the_same_gradient_kind() {
    let a = normalize(&json!({"gradient": {"type": "none"}}));
    let b = normalize(&json!({"gradient": {"type": "flat"}}));
    assert_eq!(a.gradient.kind, GradientKind::Flat);
    assert_eq!(b.gradient.kind, GradientKind::Flat);
}

#[test]
fn stops_are_capped_sorted_and_defaulted() {
    let many: Vec<_> = (0..12)
        .map(|i| json!({"pos": 1.0 - (i as f64) * 0.05}))
        .collect();
    let snap = normalize(&json!({"gradient": {"stops": many}}));
    assert_eq!(snap.gradient.stops.len(), MAX_STOPS);
    assert!(
        snap.gradient
            .stops
            .windows(2)
            .all(|w| w[0].pos <= w[1].pos)
    );

    let empty = normalize(&json!({"gradient": {"stops": []}}));
    assert_eq!(empty.gradient.stops, default_stops());
}

#[test]
fn stop_fields_clamp() {
    let snap = normalize(&json!({"gradient": {"stops": [
        {"pos": 2.0, "hueShift": 900, "lightnessDelta": -4, "opacity": 3},
    ]}}));
    let stop = snap.gradient.stops[0];
    assert_eq!(stop.pos, 1.0);
    assert_eq!(stop.hue_shift, 180.0);
    assert_eq!(stop.lightness_delta, -1.0);
    assert_eq!(stop.opacity, 1.0);
}

#[test]
fn wrong_typed_values_fall_back_to_defaults() {
    let snap = normalize(&json!({
        "color": {"hue": "blue"},
        "grain": {"amount": [1, 2]},
        "gradient": {"stops": "no"},
    }));
    assert_eq!(snap.color.hue, ColorParams::default().hue);
    assert_eq!(snap.grain.amount, GrainParams::default().amount);
    assert_eq!(snap.gradient.stops, default_stops());
}

#[test]
fn seed_is_masked_to_32_bits() {
    let snap = normalize(&json!({"random": {"seed": 4_294_967_301u64}}));
    assert_eq!(snap.random.seed, 5);
}

#[test]
fn variant_selection_pulls_its_catalog_default_strength() {
    let snap = normalize(&json!({"style": {"variant": "nocturne"}}));
    assert_eq!(snap.style.variant, StyleVariant::Nocturne);
    assert_eq!(snap.style.strength, 0.65);

    let explicit = normalize(&json!({"style": {"variant": "nocturne", "strength": 0.2}}));
    assert_eq!(explicit.style.strength, 0.2);
}

#[test]
fn normalize_is_idempotent_over_serialization() {
    let snap = normalize(&json!({
        "color": {"hue": 300, "saturation": 0.8},
        "gradient": {"type": "radial", "mode": "discrete", "palette": {"hue": 12}},
        "grain": {"algorithm": "blue-noise", "chroma": {"enabled": true}},
        "style": {"variant": "ember"},
        "output": {"format": "webp"},
    }));
    let reencoded = serde_json::to_value(&snap).unwrap();
    assert_eq!(normalize(&reencoded), snap);
}
