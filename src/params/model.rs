//! Canonical parameter schema.
//!
//! [`ParameterSnapshot`] is the single source of truth consumed by the
//! pipeline: immutable per render call, always complete and in-range after
//! [`crate::params::normalize`]. Field names follow the camelCase wire
//! format used for export/import, URL-hash payloads and in-file metadata.

use serde::{Deserialize, Serialize};

/// Enum fields that travel as kebab-case string tokens on the wire.
///
/// Unknown tokens never propagate: normalization maps them to the schema
/// default via [`EnumToken::from_token`].
pub(crate) trait EnumToken: Sized + Default {
    /// Parse a wire token; `None` for unknown tokens.
    fn from_token(token: &str) -> Option<Self>;
}

/// Immutable, fully-defaulted render parameter set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParameterSnapshot {
    /// Output dimensions and preview scaling.
    pub canvas: CanvasParams,
    /// Base fill color and output gamma.
    pub color: ColorParams,
    /// Gradient field configuration.
    pub gradient: GradientParams,
    /// Grain/noise layer configuration.
    pub grain: GrainParams,
    /// Stylistic variant layer.
    pub style: StyleParams,
    /// Edge-darkening mask.
    pub vignette: VignetteParams,
    /// Determinism seed.
    pub random: RandomParams,
    /// Export encoding configuration.
    pub output: OutputParams,
}

/// Output canvas dimensions plus the preview downscale factor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanvasParams {
    /// Width in pixels, at least 1.
    pub width: u32,
    /// Height in pixels, at least 1.
    pub height: u32,
    /// Preview resolution as a fraction of full resolution, in `(0, 1]`.
    pub preview_scale: f32,
}

impl Default for CanvasParams {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            preview_scale: 0.5,
        }
    }
}

/// Base fill color in HSL plus the final gamma exponent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorParams {
    /// Hue in degrees, `[0, 360)`.
    pub hue: f32,
    /// Saturation in `[0, 1]`.
    pub saturation: f32,
    /// Lightness in `[0, 1]`.
    pub lightness: f32,
    /// Output gamma in `[0.8, 2.2]`; final RGB is raised to `1/gamma`.
    pub gamma: f32,
}

impl Default for ColorParams {
    fn default() -> Self {
        Self {
            hue: 210.0,
            saturation: 0.55,
            lightness: 0.45,
            gamma: 1.0,
        }
    }
}

/// Gradient field shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradientKind {
    /// No gradient; the base fill is used as-is.
    #[serde(rename = "none", alias = "flat")]
    Flat,
    /// Directional ramp along `angle`.
    #[default]
    #[serde(rename = "linear")]
    Linear,
    /// Distance ramp from `center`.
    #[serde(rename = "radial")]
    Radial,
    /// Angular sweep around `center`.
    #[serde(rename = "conic")]
    Conic,
    /// Distance glow anchored at the corner nearest `center`.
    #[serde(rename = "corner-glow")]
    CornerGlow,
}

impl EnumToken for GradientKind {
    fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "none" | "flat" => Self::Flat,
            "linear" => Self::Linear,
            "radial" => Self::Radial,
            "conic" => Self::Conic,
            "corner-glow" => Self::CornerGlow,
            _ => return None,
        })
    }
}

/// Stop interpolation mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientMode {
    /// Smooth interpolation between bracketing stops.
    #[default]
    Continuous,
    /// Hard banding at stop positions.
    Discrete,
}

impl EnumToken for GradientMode {
    fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "continuous" => Self::Continuous,
            "discrete" => Self::Discrete,
            _ => return None,
        })
    }
}

/// Blend mode for compositing the gradient layer onto the base fill.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlendMode {
    /// Replace the base color.
    #[default]
    #[serde(rename = "normal")]
    Normal,
    /// Standard overlay formula.
    #[serde(rename = "overlay")]
    Overlay,
    /// Standard soft-light formula.
    #[serde(rename = "soft-light")]
    SoftLight,
    /// `1 − (1 − a)(1 − b)`.
    #[serde(rename = "screen")]
    Screen,
}

impl EnumToken for BlendMode {
    fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "normal" => Self::Normal,
            "overlay" => Self::Overlay,
            "soft-light" => Self::SoftLight,
            "screen" => Self::Screen,
            _ => return None,
        })
    }
}

/// A gradient control point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GradientStop {
    /// Position along the gradient parameter, `[0, 1]`.
    pub pos: f32,
    /// Hue offset applied to the palette, `[-180, 180]` degrees.
    pub hue_shift: f32,
    /// Lightness offset applied to the palette, `[-1, 1]`.
    pub lightness_delta: f32,
    /// Opacity of the stop color over the base fill, `[0, 1]`.
    pub opacity: f32,
}

impl Default for GradientStop {
    fn default() -> Self {
        Self {
            pos: 0.0,
            hue_shift: 0.0,
            lightness_delta: 0.0,
            opacity: 1.0,
        }
    }
}

/// Optional palette override; when absent, stops derive from the base color.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaletteOverride {
    /// Palette hue in degrees.
    pub hue: f32,
    /// Palette saturation in `[0, 1]`.
    pub saturation: f32,
    /// Palette lightness in `[0, 1]`.
    pub lightness: f32,
}

impl Default for PaletteOverride {
    fn default() -> Self {
        Self {
            hue: 210.0,
            saturation: 0.55,
            lightness: 0.45,
        }
    }
}

/// Anchor point in normalized image space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CenterPoint {
    /// Horizontal position in `[0, 1]`.
    pub x: f32,
    /// Vertical position in `[0, 1]`.
    pub y: f32,
}

impl Default for CenterPoint {
    fn default() -> Self {
        Self { x: 0.5, y: 0.5 }
    }
}

/// Gradient field configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GradientParams {
    /// Gradient shape.
    #[serde(rename = "type")]
    pub kind: GradientKind,
    /// Continuous or banded stop interpolation.
    pub mode: GradientMode,
    /// Direction in degrees, `[0, 360)`.
    pub angle: f32,
    /// Shape anchor in normalized image space.
    pub center: CenterPoint,
    /// Field scale factor, strictly positive.
    pub scale: f32,
    /// Ordered control points, non-empty, at most 8.
    pub stops: Vec<GradientStop>,
    /// Blend mode over the base fill.
    pub blend: BlendMode,
    /// Optional palette override for stop colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palette: Option<PaletteOverride>,
}

impl Default for GradientParams {
    fn default() -> Self {
        Self {
            kind: GradientKind::Linear,
            mode: GradientMode::Continuous,
            angle: 45.0,
            center: CenterPoint::default(),
            scale: 1.0,
            stops: default_stops(),
            blend: BlendMode::Normal,
            palette: None,
        }
    }
}

/// The schema's default two-stop ramp: a gentle lift into a darker tail.
pub(crate) fn default_stops() -> Vec<GradientStop> {
    vec![
        GradientStop {
            pos: 0.0,
            hue_shift: 0.0,
            lightness_delta: 0.08,
            opacity: 1.0,
        },
        GradientStop {
            pos: 1.0,
            hue_shift: -16.0,
            lightness_delta: -0.12,
            opacity: 1.0,
        },
    ]
}

/// Grain speck scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrainSize {
    /// 12 cycles across the unit image.
    Fine,
    /// 8 cycles across the unit image.
    #[default]
    Normal,
    /// 4 cycles across the unit image.
    Coarse,
}

impl GrainSize {
    /// Frequency multiplier applied to the normalized sample coordinate.
    pub fn frequency(self) -> f32 {
        match self {
            Self::Fine => 12.0,
            Self::Normal => 8.0,
            Self::Coarse => 4.0,
        }
    }
}

impl EnumToken for GrainSize {
    fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "fine" => Self::Fine,
            "normal" => Self::Normal,
            "coarse" => Self::Coarse,
            _ => return None,
        })
    }
}

/// Grain/noise generator selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrainAlgorithm {
    /// Hash of the quantized sample coordinate.
    #[serde(rename = "uniform")]
    Uniform,
    /// Box-Muller gaussian, mean 0.5, std 0.18.
    #[serde(rename = "gaussian")]
    Gaussian,
    /// Bilinear lattice-value noise with smoothstep easing.
    #[serde(rename = "value")]
    Value,
    /// Classic lattice-gradient (Perlin) noise.
    #[serde(rename = "perlin")]
    Perlin,
    /// 2D simplex noise.
    #[serde(rename = "simplex")]
    Simplex,
    /// Fractal sum of Perlin octaves.
    #[default]
    #[serde(rename = "fbm")]
    Fbm,
    /// Tiled blue-noise lookup.
    #[serde(rename = "blue-noise")]
    BlueNoise,
    /// Worley cellular stipple.
    #[serde(rename = "stipple", alias = "worley")]
    Stipple,
    /// Directional fractal fiber texture.
    #[serde(rename = "fiber")]
    Fiber,
}

impl EnumToken for GrainAlgorithm {
    fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "uniform" => Self::Uniform,
            "gaussian" => Self::Gaussian,
            "value" => Self::Value,
            "perlin" => Self::Perlin,
            "simplex" => Self::Simplex,
            "fbm" => Self::Fbm,
            "blue-noise" => Self::BlueNoise,
            "stipple" | "worley" => Self::Stipple,
            "fiber" => Self::Fiber,
            _ => return None,
        })
    }
}

/// Mapping applied to the raw noise sample before scaling by `amount`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntensityCurve {
    /// Identity.
    #[default]
    #[serde(rename = "linear")]
    Linear,
    /// `log10(1 + 9x)`.
    #[serde(rename = "log")]
    Log,
    /// Smoothstep.
    #[serde(rename = "s-curve")]
    SCurve,
}

impl EnumToken for IntensityCurve {
    fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "linear" => Self::Linear,
            "log" => Self::Log,
            "s-curve" => Self::SCurve,
            _ => return None,
        })
    }
}

/// Chromatic grain configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChromaParams {
    /// Whether grain perturbs channels independently.
    pub enabled: bool,
    /// Per-channel tint magnitude, `[0, 0.2]`.
    pub intensity: f32,
}

impl Default for ChromaParams {
    fn default() -> Self {
        Self {
            enabled: false,
            intensity: 0.06,
        }
    }
}

/// Grain/noise layer configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GrainParams {
    /// Master toggle; disabled grain contributes nothing.
    pub enabled: bool,
    /// Strength in `[0, 100]`.
    pub amount: f32,
    /// Speck scale.
    pub size: GrainSize,
    /// Generator selection.
    pub algorithm: GrainAlgorithm,
    /// Fractal octave count, `[1, 8]`.
    pub octaves: u32,
    /// Per-octave frequency multiplier, `[1, 4]`.
    pub lacunarity: f32,
    /// Per-octave amplitude multiplier, `[0.1, 1]`.
    pub gain: f32,
    /// Chromatic grain settings.
    pub chroma: ChromaParams,
    /// Raw-sample remapping curve.
    pub intensity_curve: IntensityCurve,
    /// Luminance threshold below which grain fades out, `[0, 0.2]`.
    pub protect_shadows: f32,
}

impl Default for GrainParams {
    fn default() -> Self {
        Self {
            enabled: true,
            amount: 35.0,
            size: GrainSize::Normal,
            algorithm: GrainAlgorithm::Fbm,
            octaves: 4,
            lacunarity: 2.0,
            gain: 0.55,
            chroma: ChromaParams::default(),
            intensity_curve: IntensityCurve::Linear,
            protect_shadows: 0.0,
        }
    }
}

/// Stylistic variant layer selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleVariant {
    /// Baseline: base fill plus gradient, no grade.
    #[default]
    Classic,
    /// Soft center-weighted bloom.
    Lumina,
    /// Cooled midtones, lifted highlights.
    Nocturne,
    /// Warm ember glow along the outer edge.
    Ember,
}

impl EnumToken for StyleVariant {
    fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "classic" => Self::Classic,
            "lumina" => Self::Lumina,
            "nocturne" => Self::Nocturne,
            "ember" => Self::Ember,
            _ => return None,
        })
    }
}

/// Stylistic variant layer configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleParams {
    /// Variant selection.
    pub variant: StyleVariant,
    /// Mix factor between passthrough and the stylized color, `[0, 1]`.
    pub strength: f32,
}

impl Default for StyleParams {
    fn default() -> Self {
        Self {
            variant: StyleVariant::Classic,
            strength: 0.0,
        }
    }
}

/// How the vignette darkening is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VignetteMode {
    /// Straight linear darken.
    #[default]
    #[serde(rename = "multiply")]
    Multiply,
    /// Darkens while lifting blacks slightly.
    #[serde(rename = "soft-light")]
    SoftLight,
}

impl EnumToken for VignetteMode {
    fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "multiply" => Self::Multiply,
            "soft-light" => Self::SoftLight,
            _ => return None,
        })
    }
}

/// Edge-darkening mask configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VignetteParams {
    /// Overall mask strength, `[0, 1]`.
    pub strength: f32,
    /// Distance at which darkening reaches full effect, `[0, 2]`.
    pub radius: f32,
    /// Width of the transition band, `[0, 1]`.
    pub feather: f32,
    /// Per-axis distance exponent, `[0.2, 2]`.
    pub roundness: f32,
    /// Darkening application mode.
    pub mode: VignetteMode,
}

impl Default for VignetteParams {
    fn default() -> Self {
        Self {
            strength: 0.35,
            radius: 1.2,
            feather: 0.5,
            roundness: 1.0,
            mode: VignetteMode::Multiply,
        }
    }
}

/// Determinism seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomParams {
    /// Unsigned 32-bit seed for every seeded generator.
    pub seed: u32,
}

impl Default for RandomParams {
    fn default() -> Self {
        Self { seed: 1 }
    }
}

/// Export container format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossless PNG.
    #[default]
    Png,
    /// Lossless WebP.
    Webp,
    /// JPEG at `jpgQuality`.
    Jpg,
}

impl OutputFormat {
    /// Conventional filename extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Webp => "webp",
            Self::Jpg => "jpg",
        }
    }
}

impl EnumToken for OutputFormat {
    fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "png" => Self::Png,
            "webp" => Self::Webp,
            "jpg" => Self::Jpg,
            _ => return None,
        })
    }
}

/// Export encoding configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputParams {
    /// Container format.
    pub format: OutputFormat,
    /// JPEG quality, `[0.6, 1.0]`.
    pub jpg_quality: f32,
    /// Whether to embed the parameter JSON in the exported file.
    pub embed_metadata: bool,
}

impl Default for OutputParams {
    fn default() -> Self {
        Self {
            format: OutputFormat::Png,
            jpg_quality: 0.92,
            embed_metadata: true,
        }
    }
}
