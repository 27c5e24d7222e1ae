use super::*;

use crate::foundation::color::hsl_to_rgb;
use crate::params::{
    BlendMode, CenterPoint, ColorParams, GradientKind, GradientMode, GradientParams, GradientStop,
};

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn rgb_close(a: Rgb, b: Rgb) -> bool {
    close(a.r, b.r) && close(a.g, b.g) && close(a.b, b.b)
}

fn centered() -> CenterPoint {
    CenterPoint { x: 0.5, y: 0.5 }
}

#[test]
fn linear_factor_is_half_at_the_center() {
    let t = factor(GradientKind::Linear, 0.5, 0.5, 30.0, centered(), 1.0);
    assert!(close(t, 0.5));
}

#[test]
fn linear_factor_follows_the_angle() {
    // Angle 0: the ramp runs along +x.
    let lo = factor(GradientKind::Linear, 0.0, 0.5, 0.0, centered(), 1.0);
    let hi = factor(GradientKind::Linear, 1.0, 0.5, 0.0, centered(), 1.0);
    assert!(close(lo, 0.0));
    assert!(close(hi, 1.0));
}

#[test]
fn radial_factor_grows_from_the_center() {
    assert!(close(
        factor(GradientKind::Radial, 0.5, 0.5, 0.0, centered(), 1.0),
        0.0
    ));
    // A corner sits at distance sqrt(0.5); scaled by sqrt(2) that is 1.
    assert!(close(
        factor(GradientKind::Radial, 0.0, 0.0, 0.0, centered(), 1.0),
        1.0
    ));
}

#[test]
fn conic_factor_wraps_into_the_unit_interval() {
    for (u, v) in [(1.0, 0.5), (0.5, 1.0), (0.0, 0.5), (0.5, 0.0)] {
        let t = factor(GradientKind::Conic, u, v, 77.0, centered(), 1.0);
        assert!((0.0..1.0).contains(&t), "t={t}");
    }
}

#[test]
fn corner_glow_is_zero_at_its_corner() {
    let corner = CenterPoint { x: 0.0, y: 0.0 };
    assert!(close(
        factor(GradientKind::CornerGlow, 0.0, 0.0, 0.0, corner, 1.0),
        0.0
    ));
    let far = factor(GradientKind::CornerGlow, 1.0, 1.0, 0.0, corner, 1.0);
    assert!(close(far, 1.0));
}

fn two_stop_params() -> GradientParams {
    GradientParams {
        kind: GradientKind::Linear,
        mode: GradientMode::Continuous,
        stops: vec![
            GradientStop {
                pos: 0.0,
                hue_shift: 0.0,
                lightness_delta: 0.2,
                opacity: 1.0,
            },
            GradientStop {
                pos: 1.0,
                hue_shift: -40.0,
                lightness_delta: -0.2,
                opacity: 1.0,
            },
        ],
        ..GradientParams::default()
    }
}

#[test]
fn continuous_endpoints_match_the_outer_stops() {
    let base_hsl = ColorParams::default();
    let params = two_stop_params();
    let stops = resolve_stops(&params, &base_hsl);
    let base = hsl_to_rgb(base_hsl.hue, base_hsl.saturation, base_hsl.lightness);

    let first = hsl_to_rgb(base_hsl.hue, base_hsl.saturation, base_hsl.lightness + 0.2);
    let last = hsl_to_rgb(
        base_hsl.hue - 40.0,
        base_hsl.saturation,
        base_hsl.lightness - 0.2,
    );

    let at0 = shade(0.0, base, &stops, GradientMode::Continuous, BlendMode::Normal);
    let at1 = shade(1.0, base, &stops, GradientMode::Continuous, BlendMode::Normal);
    assert!(rgb_close(at0, first));
    assert!(rgb_close(at1, last));
}

#[test]
fn out_of_range_t_clamps_to_the_nearest_stop() {
    let base_hsl = ColorParams::default();
    let params = two_stop_params();
    let stops = resolve_stops(&params, &base_hsl);
    let base = hsl_to_rgb(base_hsl.hue, base_hsl.saturation, base_hsl.lightness);

    let before = shade(-5.0, base, &stops, GradientMode::Continuous, BlendMode::Normal);
    let at0 = shade(0.0, base, &stops, GradientMode::Continuous, BlendMode::Normal);
    assert!(rgb_close(before, at0));
}

#[test]
fn discrete_mode_picks_the_greatest_stop_at_or_below_t() {
    let base_hsl = ColorParams::default();
    let mut params = two_stop_params();
    params.mode = GradientMode::Discrete;
    params.stops = vec![
        GradientStop {
            pos: 0.0,
            lightness_delta: 0.3,
            ..GradientStop::default()
        },
        GradientStop {
            pos: 0.5,
            lightness_delta: -0.3,
            ..GradientStop::default()
        },
    ];
    let stops = resolve_stops(&params, &base_hsl);
    let base = hsl_to_rgb(base_hsl.hue, base_hsl.saturation, base_hsl.lightness);

    let lighter = hsl_to_rgb(base_hsl.hue, base_hsl.saturation, base_hsl.lightness + 0.3);
    let darker = hsl_to_rgb(base_hsl.hue, base_hsl.saturation, base_hsl.lightness - 0.3);

    let low = shade(0.25, base, &stops, GradientMode::Discrete, BlendMode::Normal);
    let high = shade(0.75, base, &stops, GradientMode::Discrete, BlendMode::Normal);
    assert!(rgb_close(low, lighter));
    assert!(rgb_close(high, darker));
}

#[test]
fn coincident_stops_do_not_produce_nan() {
    let base_hsl = ColorParams::default();
    let mut params = two_stop_params();
    params.stops = vec![
        GradientStop {
            pos: 0.5,
            lightness_delta: 0.2,
            ..GradientStop::default()
        },
        GradientStop {
            pos: 0.5,
            lightness_delta: -0.2,
            ..GradientStop::default()
        },
    ];
    let stops = resolve_stops(&params, &base_hsl);
    let base = hsl_to_rgb(base_hsl.hue, base_hsl.saturation, base_hsl.lightness);

    let out = shade(0.5, base, &stops, GradientMode::Continuous, BlendMode::Normal);
    assert!(out.r.is_finite() && out.g.is_finite() && out.b.is_finite());
}

#[test]
fn stop_opacity_blends_towards_the_base() {
    let base_hsl = ColorParams::default();
    let mut params = two_stop_params();
    for stop in &mut params.stops {
        stop.opacity = 0.0;
    }
    let stops = resolve_stops(&params, &base_hsl);
    let base = hsl_to_rgb(base_hsl.hue, base_hsl.saturation, base_hsl.lightness);

    let out = shade(0.3, base, &stops, GradientMode::Continuous, BlendMode::Normal);
    assert!(rgb_close(out, base));
}

#[test]
fn palette_override_redirects_stop_colors() {
    let base_hsl = ColorParams::default();
    let mut params = two_stop_params();
    params.palette = Some(crate::params::PaletteOverride {
        hue: 0.0,
        saturation: 1.0,
        lightness: 0.5,
    });
    params.stops = vec![GradientStop::default()];
    let stops = resolve_stops(&params, &base_hsl);
    assert!(rgb_close(stops[0].color, hsl_to_rgb(0.0, 1.0, 0.5)));
}
