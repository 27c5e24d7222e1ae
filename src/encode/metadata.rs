//! Textual metadata embedding for the three export containers.
//!
//! PNG gets a `tEXt` chunk inserted immediately before `IEND` with the
//! chunk CRC recomputed; WebP gets an `XMP ` chunk appended to the RIFF
//! container (only representable when a `VP8X` header is present); JPEG
//! gets a `COM` segment after `SOI`. All failures surface as
//! [`WallforgeError::Metadata`] and are caught by the exporter.

use std::sync::OnceLock;

use crate::foundation::error::{WallforgeError, WallforgeResult};
use crate::params::OutputFormat;

/// Keyword for the PNG text chunk carrying the parameter JSON.
pub(crate) const PNG_KEYWORD: &str = "wallforge:params";

/// Embed `json` into an encoded image of the given format.
pub(crate) fn embed(format: OutputFormat, bytes: &[u8], json: &str) -> WallforgeResult<Vec<u8>> {
    match format {
        OutputFormat::Png => embed_png(bytes, json),
        OutputFormat::Webp => embed_webp(bytes, json),
        OutputFormat::Jpg => embed_jpg(bytes, json),
    }
}

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

fn embed_png(bytes: &[u8], json: &str) -> WallforgeResult<Vec<u8>> {
    if bytes.len() < PNG_SIGNATURE.len() + 12 || bytes[..8] != PNG_SIGNATURE {
        return Err(WallforgeError::metadata("not a png stream"));
    }

    // Walk the chunk list to the IEND chunk offset.
    let mut offset = PNG_SIGNATURE.len();
    let iend_offset = loop {
        if offset + 8 > bytes.len() {
            return Err(WallforgeError::metadata("png missing IEND chunk"));
        }
        let len = u32::from_be_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
        ]) as usize;
        let kind = &bytes[offset + 4..offset + 8];
        if kind == b"IEND" {
            break offset;
        }
        offset += 12 + len;
    };

    let mut data = Vec::with_capacity(PNG_KEYWORD.len() + 1 + json.len());
    data.extend_from_slice(PNG_KEYWORD.as_bytes());
    data.push(0);
    data.extend_from_slice(json.as_bytes());

    let mut chunk = Vec::with_capacity(12 + data.len());
    chunk.extend_from_slice(&(data.len() as u32).to_be_bytes());
    chunk.extend_from_slice(b"tEXt");
    chunk.extend_from_slice(&data);
    let mut crc_input = Vec::with_capacity(4 + data.len());
    crc_input.extend_from_slice(b"tEXt");
    crc_input.extend_from_slice(&data);
    chunk.extend_from_slice(&crc32(&crc_input).to_be_bytes());

    let mut out = Vec::with_capacity(bytes.len() + chunk.len());
    out.extend_from_slice(&bytes[..iend_offset]);
    out.extend_from_slice(&chunk);
    out.extend_from_slice(&bytes[iend_offset..]);
    Ok(out)
}

/// VP8X flag bit advertising an XMP chunk.
const VP8X_XMP_FLAG: u8 = 0x04;

fn embed_webp(bytes: &[u8], json: &str) -> WallforgeResult<Vec<u8>> {
    if bytes.len() < 12 || &bytes[..4] != b"RIFF" || &bytes[8..12] != b"WEBP" {
        return Err(WallforgeError::metadata("not a webp stream"));
    }
    // XMP can only be advertised through the VP8X extended header; simple
    // VP8/VP8L files have nowhere to set the flag.
    if bytes.len() < 16 + 10 || &bytes[12..16] != b"VP8X" {
        return Err(WallforgeError::metadata(
            "webp stream has no VP8X header; cannot advertise XMP",
        ));
    }

    let mut out = bytes.to_vec();
    out[20] |= VP8X_XMP_FLAG;

    out.extend_from_slice(b"XMP ");
    out.extend_from_slice(&(json.len() as u32).to_le_bytes());
    out.extend_from_slice(json.as_bytes());
    if json.len() % 2 == 1 {
        out.push(0);
    }

    let riff_size = (out.len() - 8) as u32;
    out[4..8].copy_from_slice(&riff_size.to_le_bytes());
    Ok(out)
}

fn embed_jpg(bytes: &[u8], json: &str) -> WallforgeResult<Vec<u8>> {
    if bytes.len() < 2 || bytes[..2] != [0xFF, 0xD8] {
        return Err(WallforgeError::metadata("not a jpeg stream"));
    }
    let payload_len = json.len() + 2;
    if payload_len > u16::MAX as usize {
        return Err(WallforgeError::metadata("parameter JSON too large for COM"));
    }

    let mut out = Vec::with_capacity(bytes.len() + 4 + json.len());
    out.extend_from_slice(&bytes[..2]);
    out.extend_from_slice(&[0xFF, 0xFE]);
    out.extend_from_slice(&(payload_len as u16).to_be_bytes());
    out.extend_from_slice(json.as_bytes());
    out.extend_from_slice(&bytes[2..]);
    Ok(out)
}

/// Standard CRC-32 (polynomial `0xEDB88320`) over the chunk type+data bytes.
pub(crate) fn crc32(bytes: &[u8]) -> u32 {
    static TABLE: OnceLock<[u32; 256]> = OnceLock::new();
    let table = TABLE.get_or_init(|| {
        let mut table = [0u32; 256];
        for (n, entry) in table.iter_mut().enumerate() {
            let mut c = n as u32;
            for _ in 0..8 {
                c = if c & 1 != 0 {
                    0xEDB8_8320 ^ (c >> 1)
                } else {
                    c >> 1
                };
            }
            *entry = c;
        }
        table
    });

    let mut crc = 0xFFFF_FFFFu32;
    for &b in bytes {
        crc = table[((crc ^ u32::from(b)) & 0xFF) as usize] ^ (crc >> 8);
    }
    crc ^ 0xFFFF_FFFF
}

#[cfg(test)]
#[path = "../../tests/unit/encode/metadata.rs"]
mod tests;
