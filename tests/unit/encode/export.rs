use super::*;

use serde_json::json;

use crate::params;

fn solid_frame(width: u32, height: u32, rgba: [u8; 4]) -> FrameRgba {
    FrameRgba {
        width,
        height,
        data: rgba.repeat((width * height) as usize),
    }
}

#[test]
fn filename_follows_the_convention() {
    let snap = params::normalize(&json!({
        "canvas": {"width": 1920, "height": 1080},
        "random": {"seed": 42},
        "output": {"format": "png"},
    }));
    assert_eq!(filename(&snap), "wall_1920x1080_42.png");

    let jpg = params::normalize(&json!({
        "canvas": {"width": 800, "height": 600},
        "random": {"seed": 7},
        "output": {"format": "jpg"},
    }));
    assert_eq!(filename(&jpg), "wall_800x600_7.jpg");
}

#[test]
fn png_bytes_decode_back_to_the_frame() {
    let frame = solid_frame(6, 4, [10, 200, 30, 255]);
    let snap = params::normalize(&json!({"output": {"format": "png"}}));

    let bytes = encode_frame(&frame, &snap).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.width(), 6);
    assert_eq!(decoded.height(), 4);
    assert_eq!(decoded.get_pixel(3, 2).0, [10, 200, 30, 255]);
}

#[test]
fn webp_and_jpg_encode_without_errors() {
    let frame = solid_frame(8, 8, [120, 90, 60, 255]);

    let webp = params::normalize(&json!({"output": {"format": "webp"}}));
    let bytes = encode_frame(&frame, &webp).unwrap();
    assert_eq!(&bytes[..4], b"RIFF");

    let jpg = params::normalize(&json!({"output": {"format": "jpg", "jpgQuality": 0.8}}));
    let bytes = encode_frame(&frame, &jpg).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
}

#[test]
fn png_export_embeds_the_parameter_json() {
    let frame = solid_frame(4, 4, [1, 2, 3, 255]);
    let snap = params::normalize(&json!({
        "output": {"format": "png", "embedMetadata": true},
        "random": {"seed": 31337},
    }));

    let exported = export(&frame, &snap).unwrap();
    let haystack = exported.bytes;
    let keyword = metadata::PNG_KEYWORD.as_bytes();
    assert!(
        haystack.windows(keyword.len()).any(|w| w == keyword),
        "tEXt keyword missing from export"
    );
    assert!(
        haystack.windows(5).any(|w| w == b"31337"),
        "parameter json missing from export"
    );

    // The decorated file still decodes.
    let decoded = image::load_from_memory(&haystack).unwrap().to_rgba8();
    assert_eq!(decoded.get_pixel(0, 0).0, [1, 2, 3, 255]);
}

#[test]
fn disabled_metadata_leaves_the_stream_untouched() {
    let frame = solid_frame(4, 4, [9, 9, 9, 255]);
    let snap = params::normalize(&json!({
        "output": {"format": "png", "embedMetadata": false},
    }));
    let exported = export(&frame, &snap).unwrap();
    assert_eq!(exported.bytes, encode_frame(&frame, &snap).unwrap());
}

#[test]
fn webp_export_degrades_to_the_plain_image() {
    // The lossless encoder emits no VP8X header, so embedding is skipped
    // and the unmodified stream is returned.
    let frame = solid_frame(4, 4, [50, 60, 70, 255]);
    let snap = params::normalize(&json!({
        "output": {"format": "webp", "embedMetadata": true},
    }));
    let exported = export(&frame, &snap).unwrap();
    assert_eq!(exported.bytes, encode_frame(&frame, &snap).unwrap());
}
