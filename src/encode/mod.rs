//! Output encoding: rasterized frame → PNG/WebP/JPEG bytes with optional
//! embedded reproducibility metadata.
//!
//! Encoding happens fully in memory; callers write the returned bytes in a
//! single step, so a failed export never leaves a partial file behind.

pub(crate) mod metadata;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::foundation::error::{WallforgeError, WallforgeResult};
use crate::params::{OutputFormat, ParameterSnapshot};
use crate::render::FrameRgba;

/// A fully encoded export: conventional filename plus file bytes.
#[derive(Clone, Debug)]
pub struct ExportedImage {
    /// `wall_<width>x<height>_<seed>.<ext>`.
    pub filename: String,
    /// Complete encoded file contents.
    pub bytes: Vec<u8>,
}

/// Conventional export filename for a snapshot.
pub fn filename(snapshot: &ParameterSnapshot) -> String {
    format!(
        "wall_{}x{}_{}.{}",
        snapshot.canvas.width,
        snapshot.canvas.height,
        snapshot.random.seed,
        snapshot.output.format.extension()
    )
}

/// Encode a rendered frame per the snapshot's output settings.
pub fn encode_frame(frame: &FrameRgba, snapshot: &ParameterSnapshot) -> WallforgeResult<Vec<u8>> {
    let mut bytes = Vec::new();
    match snapshot.output.format {
        OutputFormat::Png => PngEncoder::new(&mut bytes)
            .write_image(
                &frame.data,
                frame.width,
                frame.height,
                ExtendedColorType::Rgba8,
            )
            .map_err(|e| WallforgeError::encoding(format!("png encode failed: {e}")))?,
        OutputFormat::Webp => WebPEncoder::new_lossless(&mut bytes)
            .write_image(
                &frame.data,
                frame.width,
                frame.height,
                ExtendedColorType::Rgba8,
            )
            .map_err(|e| WallforgeError::encoding(format!("webp encode failed: {e}")))?,
        OutputFormat::Jpg => {
            let rgb: Vec<u8> = frame
                .data
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect();
            let quality = (snapshot.output.jpg_quality * 100.0).round().clamp(1.0, 100.0) as u8;
            JpegEncoder::new_with_quality(&mut bytes, quality)
                .write_image(&rgb, frame.width, frame.height, ExtendedColorType::Rgb8)
                .map_err(|e| WallforgeError::encoding(format!("jpeg encode failed: {e}")))?;
        }
    }
    Ok(bytes)
}

/// Encode a frame and, when enabled, embed the serialized parameter JSON as
/// a textual metadata chunk.
///
/// Embedding failures degrade gracefully: the unmodified image is returned
/// and a warning logged, per the error-handling contract.
pub fn export(frame: &FrameRgba, snapshot: &ParameterSnapshot) -> WallforgeResult<ExportedImage> {
    let bytes = encode_frame(frame, snapshot)?;

    let bytes = if snapshot.output.embed_metadata {
        let json = serde_json::to_string(snapshot)
            .map_err(|e| WallforgeError::serde(format!("snapshot serialization failed: {e}")))?;
        match metadata::embed(snapshot.output.format, &bytes, &json) {
            Ok(with_meta) => with_meta,
            Err(err) => {
                tracing::warn!(error = %err, "metadata embedding failed, exporting without it");
                bytes
            }
        }
    } else {
        bytes
    };

    Ok(ExportedImage {
        filename: filename(snapshot),
        bytes,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/encode/export.rs"]
mod tests;
