//! Stylistic variant catalog.
//!
//! Each variant is a cosmetic grade layered between the gradient and grain
//! passes, parameterized by a strength that mixes between the passthrough
//! color and the stylized color.

use crate::params::StyleVariant;

/// Catalog entry describing one variant.
#[derive(Clone, Copy, Debug)]
pub struct VariantInfo {
    /// Wire identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Short description for pickers.
    pub description: &'static str,
    /// Strength applied when a caller selects the variant without one.
    pub default_strength: f32,
}

const CATALOG: [VariantInfo; 4] = [
    VariantInfo {
        id: "classic",
        name: "Classic Gradient",
        description: "Baseline renderer that blends the base fill with the configured gradient.",
        default_strength: 0.0,
    },
    VariantInfo {
        id: "lumina",
        name: "Lumina Bloom",
        description: "Adds a soft, center-weighted bloom that enhances luminous gradients and pastel palettes.",
        default_strength: 0.55,
    },
    VariantInfo {
        id: "nocturne",
        name: "Nocturne Veil",
        description: "Cools midtones and lifts highlights for moody, night-inspired backgrounds.",
        default_strength: 0.65,
    },
    VariantInfo {
        id: "ember",
        name: "Ember Drift",
        description: "Warms the outer edge with ember-like glow for dramatic contrast.",
        default_strength: 0.5,
    },
];

/// All known variants, in presentation order.
pub fn catalog() -> &'static [VariantInfo] {
    &CATALOG
}

/// Catalog entry for a variant.
pub fn info(variant: StyleVariant) -> &'static VariantInfo {
    &CATALOG[match variant {
        StyleVariant::Classic => 0,
        StyleVariant::Lumina => 1,
        StyleVariant::Nocturne => 2,
        StyleVariant::Ember => 3,
    }]
}

/// Default strength for a variant.
pub(crate) fn default_strength(variant: StyleVariant) -> f32 {
    info(variant).default_strength
}
