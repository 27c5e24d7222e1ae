//! Preset library collaborator.
//!
//! A preset is an id/name pair plus a (possibly partial) parameter
//! document; the core only ever consumes `settings` as untrusted input to
//! normalize and render.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::foundation::error::{WallforgeError, WallforgeResult};
use crate::params::{self, ParameterSnapshot};

/// A stored preset.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Preset {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Partial or complete parameter document.
    pub settings: serde_json::Value,
}

impl Preset {
    /// Normalize this preset's settings into a render-ready snapshot.
    pub fn snapshot(&self) -> ParameterSnapshot {
        params::normalize(&self.settings)
    }
}

/// An ordered collection of presets.
#[derive(Clone, Debug, Default)]
pub struct PresetLibrary {
    presets: Vec<Preset>,
}

impl PresetLibrary {
    /// The built-in starter presets.
    pub fn builtin() -> Self {
        Self {
            presets: vec![
                Preset {
                    id: "twilight-drift".to_string(),
                    name: "Twilight Drift".to_string(),
                    settings: json!({
                        "color": {"hue": 226, "saturation": 0.48, "lightness": 0.38},
                        "gradient": {"type": "linear", "angle": 120},
                        "grain": {"amount": 42, "algorithm": "fbm", "octaves": 5},
                        "style": {"variant": "nocturne"},
                    }),
                },
                Preset {
                    id: "paper-dawn".to_string(),
                    name: "Paper Dawn".to_string(),
                    settings: json!({
                        "color": {"hue": 36, "saturation": 0.32, "lightness": 0.82},
                        "gradient": {"type": "corner-glow", "center": {"x": 0.0, "y": 0.0}},
                        "grain": {"amount": 55, "algorithm": "fiber", "size": "fine"},
                        "vignette": {"strength": 0.15},
                        "style": {"variant": "lumina", "strength": 0.4},
                    }),
                },
                Preset {
                    id: "ember-field".to_string(),
                    name: "Ember Field".to_string(),
                    settings: json!({
                        "color": {"hue": 14, "saturation": 0.62, "lightness": 0.34},
                        "gradient": {"type": "radial", "scale": 1.3},
                        "grain": {"amount": 60, "algorithm": "stipple", "size": "coarse"},
                        "style": {"variant": "ember"},
                    }),
                },
                Preset {
                    id: "signal-wash".to_string(),
                    name: "Signal Wash".to_string(),
                    settings: json!({
                        "color": {"hue": 168, "saturation": 0.42, "lightness": 0.52},
                        "gradient": {"type": "conic", "mode": "discrete"},
                        "grain": {
                            "amount": 48,
                            "algorithm": "blue-noise",
                            "chroma": {"enabled": true, "intensity": 0.1},
                        },
                    }),
                },
            ],
        }
    }

    /// Parse a preset list from its JSON document (an array of presets).
    pub fn from_json(json: &str) -> WallforgeResult<Self> {
        let presets: Vec<Preset> = serde_json::from_str(json)
            .map_err(|e| WallforgeError::serde(format!("invalid presets document: {e}")))?;
        Ok(Self { presets })
    }

    /// All presets in listing order.
    pub fn list(&self) -> &[Preset] {
        &self.presets
    }

    /// Look up a preset by id.
    pub fn find(&self, id: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
#[path = "../tests/unit/presets.rs"]
mod tests;
