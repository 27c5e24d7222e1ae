use super::*;

use serde_json::json;

use crate::params::{self, ParameterSnapshot};

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn rgb_close(a: Rgb, b: Rgb) -> bool {
    close(a.r, b.r) && close(a.g, b.g) && close(a.b, b.b)
}

/// Everything off: gradient none, grain 0, vignette 0, style 0, gamma 1.
fn flat_snapshot() -> ParameterSnapshot {
    params::normalize(&json!({
        "color": {"hue": 210, "saturation": 0.55, "lightness": 0.45, "gamma": 1.0},
        "gradient": {"type": "none"},
        "grain": {"amount": 0},
        "vignette": {"strength": 0},
        "style": {"variant": "classic", "strength": 0},
    }))
}

#[test]
fn flat_configuration_is_the_base_fill_everywhere() {
    let ctx = ShadeContext::new(&flat_snapshot(), false);
    let expected = hsl_to_rgb(210.0, 0.55, 0.45);
    for (u, v) in [(0.01, 0.01), (0.5, 0.5), (0.99, 0.2), (0.3, 0.97)] {
        let out = ctx.shade(u, v, 0, 0, None);
        assert!(rgb_close(out, expected), "at ({u}, {v})");
    }
}

#[test]
fn zero_grain_amount_matches_a_disabled_grain_pass() {
    let mut with_zero = flat_snapshot();
    with_zero.grain.amount = 0.0;
    with_zero.vignette.strength = 0.4;
    with_zero.gradient = params::normalize(&json!({"gradient": {"type": "radial"}})).gradient;

    let mut disabled = with_zero.clone();
    disabled.grain.enabled = false;
    disabled.grain.amount = 80.0;

    let a = ShadeContext::new(&with_zero, false);
    let b = ShadeContext::new(&disabled, false);
    for i in 0..32 {
        let u = (i as f32 + 0.5) / 32.0;
        let v = (i as f32 * 0.7).fract();
        assert_eq!(a.shade(u, v, i, i, None), b.shade(u, v, i, i, None));
    }
}

#[test]
fn seed_changes_grain_but_not_seedless_passes() {
    let mut grainy = flat_snapshot();
    grainy.grain.amount = 60.0;
    let mut reseeded = grainy.clone();
    reseeded.random.seed = grainy.random.seed.wrapping_add(1);

    let a = ShadeContext::new(&grainy, false);
    let b = ShadeContext::new(&reseeded, false);
    let differs = (0..256).any(|i| {
        let u = (i % 16) as f32 / 16.0;
        let v = (i / 16) as f32 / 16.0;
        a.shade(u, v, 0, 0, None) != b.shade(u, v, 0, 0, None)
    });
    assert!(differs, "seed change left grain untouched");

    // With grain off, the remaining passes are seed-independent.
    let mut seedless = flat_snapshot();
    seedless.vignette.strength = 0.5;
    seedless.gradient = params::normalize(&json!({"gradient": {"type": "linear"}})).gradient;
    let mut seedless_b = seedless.clone();
    seedless_b.random.seed = 999;

    let a = ShadeContext::new(&seedless, false);
    let b = ShadeContext::new(&seedless_b, false);
    for i in 0..64 {
        let u = (i % 8) as f32 / 8.0;
        let v = (i / 8) as f32 / 8.0;
        assert_eq!(a.shade(u, v, 0, 0, None), b.shade(u, v, 0, 0, None));
    }
}

#[test]
fn precomputed_grain_plane_matches_inline_evaluation() {
    let mut snap = flat_snapshot();
    snap.grain.amount = 70.0;
    let ctx = ShadeContext::new(&snap, false);
    for i in 0..64 {
        let u = (i % 8) as f32 / 8.0 + 0.02;
        let v = (i / 8) as f32 / 8.0 + 0.02;
        let raw = ctx.raw_grain(u, v);
        assert_eq!(ctx.shade(u, v, 0, 0, Some(raw)), ctx.shade(u, v, 0, 0, None));
    }
}

#[test]
fn gamma_applies_the_inverse_power() {
    let mut snap = flat_snapshot();
    snap.color.saturation = 0.0;
    snap.color.lightness = 0.25;
    snap.color.gamma = 2.0;
    let ctx = ShadeContext::new(&snap, false);
    let out = ctx.shade(0.5, 0.5, 0, 0, None);
    assert!(close(out.r, 0.25f32.powf(0.5)));
}

#[test]
fn dither_offsets_are_bounded_by_one_quantization_step() {
    let snap = flat_snapshot();
    let plain = ShadeContext::new(&snap, false);
    let dithered = ShadeContext::new(&snap, true);
    for py in 0..8 {
        for px in 0..8 {
            let a = plain.shade(0.4, 0.6, px, py, None);
            let b = dithered.shade(0.4, 0.6, px, py, None);
            assert!((a.r - b.r).abs() <= 1.0 / 255.0 + 1e-6);
            assert!((a.g - b.g).abs() <= 1.0 / 255.0 + 1e-6);
            assert!((a.b - b.b).abs() <= 1.0 / 255.0 + 1e-6);
        }
    }
}

#[test]
fn dither_pattern_repeats_every_eight_pixels() {
    let snap = flat_snapshot();
    let ctx = ShadeContext::new(&snap, true);
    assert_eq!(
        ctx.shade(0.5, 0.5, 3, 5, None),
        ctx.shade(0.5, 0.5, 3 + 8, 5 + 8, None)
    );
}

#[test]
fn classic_variant_is_a_passthrough_even_at_full_strength() {
    let mut snap = flat_snapshot();
    snap.style.strength = 1.0;
    let styled = ShadeContext::new(&snap, false);
    let plain = ShadeContext::new(&flat_snapshot(), false);
    assert_eq!(
        styled.shade(0.3, 0.7, 0, 0, None),
        plain.shade(0.3, 0.7, 0, 0, None)
    );
}

#[test]
fn lumina_bloom_brightens_the_gradient_center() {
    let mut snap = flat_snapshot();
    snap.style = params::normalize(&json!({"style": {"variant": "lumina"}})).style;
    let styled = ShadeContext::new(&snap, false);
    let plain = ShadeContext::new(&flat_snapshot(), false);

    let center_styled = styled.shade(0.5, 0.5, 0, 0, None);
    let center_plain = plain.shade(0.5, 0.5, 0, 0, None);
    assert!(center_styled.luminance() > center_plain.luminance());
}

#[test]
fn ember_warms_the_edges_more_than_the_center() {
    let mut snap = flat_snapshot();
    snap.style = params::normalize(&json!({"style": {"variant": "ember"}})).style;
    let ctx = ShadeContext::new(&snap, false);

    let center = ctx.shade(0.5, 0.5, 0, 0, None);
    let corner = ctx.shade(0.02, 0.02, 0, 0, None);
    assert!(corner.r - corner.b > center.r - center.b);
}

#[test]
fn vignette_darkens_corners_and_spares_the_center() {
    let mut snap = flat_snapshot();
    snap.vignette = params::normalize(&json!({"vignette": {
        "strength": 0.8, "radius": 1.0, "feather": 0.2, "roundness": 1.0, "mode": "multiply",
    }}))
    .vignette;
    let ctx = ShadeContext::new(&snap, false);
    let plain = ShadeContext::new(&flat_snapshot(), false);

    let center = ctx.shade(0.5, 0.5, 0, 0, None);
    assert!(rgb_close(center, plain.shade(0.5, 0.5, 0, 0, None)));

    let corner = ctx.shade(0.0, 0.0, 0, 0, None);
    assert!(corner.luminance() < center.luminance());
}

#[test]
fn soft_light_vignette_keeps_blacks_above_multiply() {
    let mut snap = flat_snapshot();
    snap.color.lightness = 0.1;
    snap.vignette = params::normalize(&json!({"vignette": {
        "strength": 1.0, "radius": 0.6, "feather": 0.2, "mode": "multiply",
    }}))
    .vignette;
    let multiply = ShadeContext::new(&snap, false);

    let mut soft = snap.clone();
    soft.vignette.mode = crate::params::VignetteMode::SoftLight;
    let soft = ShadeContext::new(&soft, false);

    let m = multiply.shade(0.0, 0.0, 0, 0, None);
    let s = soft.shade(0.0, 0.0, 0, 0, None);
    assert!(s.luminance() >= m.luminance());
}

#[test]
fn chroma_grain_decorrelates_channels() {
    let mut snap = flat_snapshot();
    snap.grain = params::normalize(&json!({"grain": {
        "amount": 80, "algorithm": "uniform",
        "chroma": {"enabled": true, "intensity": 0.2},
    }}))
    .grain;
    let ctx = ShadeContext::new(&snap, false);

    let base = hsl_to_rgb(210.0, 0.55, 0.45);
    let tinted = (0..64).any(|i| {
        let u = (i % 8) as f32 / 8.0 + 0.05;
        let v = (i / 8) as f32 / 8.0 + 0.05;
        let c = ctx.shade(u, v, 0, 0, None);
        let dr = c.r - base.r;
        let dg = c.g - base.g;
        !close(dr, dg)
    });
    assert!(tinted, "chroma offsets never diverged across channels");
}

#[test]
fn shadow_protection_attenuates_dark_pixels() {
    let mut dark = flat_snapshot();
    dark.color.saturation = 0.0;
    dark.color.lightness = 0.02;
    dark.grain = params::normalize(&json!({"grain": {
        "amount": 100, "algorithm": "uniform", "protectShadows": 0.2,
    }}))
    .grain;

    let mut unprotected = dark.clone();
    unprotected.grain.protect_shadows = 0.0;

    let protected_ctx = ShadeContext::new(&dark, false);
    let raw_ctx = ShadeContext::new(&unprotected, false);

    let mut protected_dev = 0.0f32;
    let mut raw_dev = 0.0f32;
    for i in 0..256 {
        let u = (i % 16) as f32 / 16.0 + 0.01;
        let v = (i / 16) as f32 / 16.0 + 0.01;
        protected_dev += (protected_ctx.shade(u, v, 0, 0, None).r - 0.02).abs();
        raw_dev += (raw_ctx.shade(u, v, 0, 0, None).r - 0.02).abs();
    }
    assert!(protected_dev < raw_dev * 0.5, "{protected_dev} vs {raw_dev}");
}
