//! Parameter schema, normalization, and hash codec.

pub mod hash_codec;
pub(crate) mod model;
mod normalize;

pub use model::{
    BlendMode, CanvasParams, CenterPoint, ChromaParams, ColorParams, GradientKind, GradientMode,
    GradientParams, GradientStop, GrainAlgorithm, GrainParams, GrainSize, IntensityCurve,
    OutputFormat, OutputParams, PaletteOverride, ParameterSnapshot, RandomParams, StyleParams,
    StyleVariant, VignetteMode, VignetteParams,
};
pub use normalize::{MAX_STOPS, normalize};
