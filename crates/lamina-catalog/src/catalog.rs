//! Layer catalog: per-layer variant assets with usage caps.

use lamina_core::errors::ErrorInfo;
use lamina_core::LaminaError;

/// One concrete asset option within a layer.
///
/// The asset is owned exclusively by its catalog entry; `used` mutates only
/// when the variant is accepted into a finalized item.
#[derive(Debug, Clone)]
pub struct VariantAsset<I> {
    name: String,
    max_uses: u32,
    used: u32,
    image: I,
}

impl<I> VariantAsset<I> {
    /// Creates a variant with the given usage cap (0 means unlimited).
    pub fn new(name: impl Into<String>, max_uses: u32, image: I) -> Self {
        Self {
            name: name.into(),
            max_uses,
            used: 0,
            image,
        }
    }

    /// Base name recorded into attributes and fingerprints.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Usage cap; 0 means unlimited.
    pub fn max_uses(&self) -> u32 {
        self.max_uses
    }

    /// Number of accepted items using this variant so far.
    pub fn used(&self) -> u32 {
        self.used
    }

    /// Drawable handle for the rendering collaborator.
    pub fn image(&self) -> &I {
        &self.image
    }

    /// Whether the cap is exhausted and the variant must be re-drawn.
    pub fn is_capped(&self) -> bool {
        self.max_uses != 0 && self.used >= self.max_uses
    }

    fn mark_used(&mut self) {
        self.used += 1;
    }
}

/// A named axis of visual variation with its ordered variants.
#[derive(Debug, Clone)]
pub struct LayerDefinition<I> {
    key: String,
    variants: Vec<VariantAsset<I>>,
}

impl<I> LayerDefinition<I> {
    /// Creates a layer from its ordered variant list.
    pub fn new(key: impl Into<String>, variants: Vec<VariantAsset<I>>) -> Self {
        Self {
            key: key.into(),
            variants,
        }
    }

    /// Layer key, shared with the attribute namespace.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Ordered variants.
    pub fn variants(&self) -> &[VariantAsset<I>] {
        &self.variants
    }

    /// Whether every variant has reached its cap.
    pub fn is_capped_out(&self) -> bool {
        self.variants.iter().all(VariantAsset::is_capped)
    }
}

/// Ordered set of layers; iteration order is paint order.
#[derive(Debug, Clone)]
pub struct LayerCatalog<I> {
    layers: Vec<LayerDefinition<I>>,
}

impl<I> LayerCatalog<I> {
    /// Builds a catalog, validating that every layer has at least one variant.
    pub fn new(layers: Vec<LayerDefinition<I>>) -> Result<Self, LaminaError> {
        if layers.is_empty() {
            return Err(LaminaError::Catalog(ErrorInfo::new(
                "catalog-empty",
                "catalog must contain at least one layer",
            )));
        }
        for layer in &layers {
            if layer.variants.is_empty() {
                return Err(LaminaError::Catalog(
                    ErrorInfo::new("layer-empty", "layer has no variant assets")
                        .with_context("layer", layer.key.clone()),
                ));
            }
        }
        Ok(Self { layers })
    }

    /// Ordered layers.
    pub fn layers(&self) -> &[LayerDefinition<I>] {
        &self.layers
    }

    /// Number of layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Variant at the given position.
    pub fn variant(&self, layer: usize, variant: usize) -> &VariantAsset<I> {
        &self.layers[layer].variants[variant]
    }

    /// Records an accepted use of the given variant.
    pub fn mark_used(&mut self, layer: usize, variant: usize) {
        self.layers[layer].variants[variant].mark_used();
    }
}

/// Splits a variant file stem into `(base name, usage cap)`.
///
/// `blue#2` yields ("blue", 2); a missing or unparsable cap falls back to 0
/// (unlimited).
pub fn parse_variant_stem(stem: &str) -> (String, u32) {
    match stem.split_once('#') {
        Some((name, cap)) => (name.to_string(), cap.parse().unwrap_or(0)),
        None => (stem.to_string(), 0),
    }
}
