//! Wallforge deterministically synthesizes abstract wallpaper images from a
//! structured parameter set.
//!
//! The flow is snapshot-oriented:
//!
//! - Normalize untrusted input into a [`ParameterSnapshot`]
//! - Create a [`Renderer`] over a [`BackendKind`]
//! - Tick previews or render a full-resolution export frame
//! - Encode the frame with [`encode::export`]
//!
//! Both backends evaluate the identical compositing pipeline, so a fixed
//! snapshot renders to the same bytes everywhere.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
pub(crate) mod gradient;

/// Output encoding and metadata embedding.
pub mod encode;
pub(crate) mod noise;
/// Parameter schema, normalization and hash codec.
pub mod params;
/// The compositing pipeline and variant catalog.
pub mod pipeline;
/// Preset library collaborator.
pub mod presets;
/// Rendering backends and the preview renderer.
pub mod render;
/// Telemetry collaborator.
pub mod telemetry;

pub use crate::foundation::color::Rgb;
pub use crate::foundation::error::{WallforgeError, WallforgeResult};

pub use crate::encode::{ExportedImage, filename};
pub use crate::params::{ParameterSnapshot, normalize};
pub use crate::pipeline::ShadeContext;
pub use crate::render::{
    BackendKind, Camera, FrameRgba, RenderBackend, RenderOpts, RenderTarget, Renderer,
    create_backend, create_backend_with_fallback,
};
