//! URL-hash codec for parameter snapshots.
//!
//! The wire payload is the minified snapshot JSON in URL-safe base64 without
//! padding, so it can sit verbatim in a location hash. Decoding always runs
//! the result through [`normalize`], so a stale or hand-edited hash still
//! yields a complete snapshot.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::foundation::error::{WallforgeError, WallforgeResult};
use crate::params::model::ParameterSnapshot;
use crate::params::normalize::normalize;

/// Encode a snapshot into a URL-safe hash payload.
pub fn encode(snapshot: &ParameterSnapshot) -> WallforgeResult<String> {
    let json = serde_json::to_string(snapshot)
        .map_err(|e| WallforgeError::serde(format!("snapshot serialization failed: {e}")))?;
    Ok(URL_SAFE_NO_PAD.encode(json.as_bytes()))
}

/// Decode a URL-safe hash payload into a normalized snapshot.
pub fn decode(payload: &str) -> WallforgeResult<ParameterSnapshot> {
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim().trim_start_matches('#'))
        .map_err(|e| WallforgeError::serde(format!("invalid hash payload: {e}")))?;
    let value: serde_json::Value = serde_json::from_slice(&bytes)
        .map_err(|e| WallforgeError::serde(format!("invalid hash JSON: {e}")))?;
    Ok(normalize(&value))
}

#[cfg(test)]
#[path = "../../tests/unit/params/hash_codec.rs"]
mod tests;
