//! Composition engine: per-layer variant selection with cap enforcement and
//! fingerprint-uniqueness retries.

use std::collections::HashSet;

use lamina_catalog::LayerCatalog;
use lamina_core::errors::ErrorInfo;
use lamina_core::{LaminaError, Sequencer, Surface};
use tracing::debug;

use crate::hash;
use crate::planner::UniquePlan;

/// Full-draw attempts allowed per index before the run aborts.
pub const DEFAULT_ATTEMPT_BUDGET: u32 = 1000;

/// Parameters governing a generation run.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Total collection size N.
    pub size: u64,
    /// Canvas width handed to the surface.
    pub width: u32,
    /// Canvas height handed to the surface.
    pub height: u32,
    /// Retry budget per index.
    pub attempt_budget: u32,
}

impl EngineConfig {
    /// Creates a config with the default attempt budget.
    pub fn new(size: u64, width: u32, height: u32) -> Self {
        Self {
            size,
            width,
            height,
            attempt_budget: DEFAULT_ATTEMPT_BUDGET,
        }
    }
}

/// One accepted `(layer, variant)` selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Layer key.
    pub layer: String,
    /// Selected variant name.
    pub variant: String,
}

/// Result of composing one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    /// Accepted selections in layer order; empty for unique-slot items.
    pub selections: Vec<Selection>,
    /// Content fingerprint; `None` for unique-slot items, whose uniqueness
    /// is structural rather than statistical.
    pub fingerprint: Option<String>,
    /// Artwork name for unique-slot items.
    pub unique_name: Option<String>,
}

/// The state-owning composition engine.
///
/// Usage counters (inside the catalog) and the accepted-fingerprint set are
/// owned here rather than living in process globals, so multiple collections
/// and test instances stay isolated.
pub struct CompositionEngine<S: Surface> {
    config: EngineConfig,
    catalog: LayerCatalog<S::Image>,
    plan: UniquePlan<S::Image>,
    accepted: HashSet<String>,
}

impl<S: Surface> CompositionEngine<S> {
    /// Creates an engine owning the catalog and the unique placement plan.
    pub fn new(
        config: EngineConfig,
        catalog: LayerCatalog<S::Image>,
        plan: UniquePlan<S::Image>,
    ) -> Self {
        Self {
            config,
            catalog,
            plan,
            accepted: HashSet::new(),
        }
    }

    /// Run parameters.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The owned catalog, exposing usage counters.
    pub fn catalog(&self) -> &LayerCatalog<S::Image> {
        &self.catalog
    }

    /// Composes the item at `index`, painting onto `surface`.
    ///
    /// Reserved unique slots bind their artwork directly and bypass variant
    /// selection. All other indices run the attempt loop: one draw per layer
    /// (with in-layer re-draws while a pick is capped out), fingerprint the
    /// combination, and retry the whole per-layer sequence on a collision
    /// with the accepted set. Exceeding the attempt budget aborts the run;
    /// the configured variant space is too small for the requested size.
    pub fn compose(
        &mut self,
        index: u64,
        surface: &mut S,
        sequencer: &mut Sequencer,
    ) -> Result<Composition, LaminaError> {
        let (width, height) = (self.config.width, self.config.height);
        if let Some((name, image)) = self.plan.get(index) {
            surface.clear();
            surface.draw_image(image, 0, 0, width, height);
            return Ok(Composition {
                selections: Vec::new(),
                fingerprint: None,
                unique_name: Some(name.clone()),
            });
        }

        let mut attempts: u32 = 0;
        loop {
            attempts += 1;
            if attempts > self.config.attempt_budget {
                return Err(LaminaError::Generation(
                    ErrorInfo::new(
                        "attempts-exhausted",
                        "retry budget exceeded while seeking a unique composition",
                    )
                    .with_context("index", index.to_string())
                    .with_context("attempts", self.config.attempt_budget.to_string())
                    .with_hint("add layers or variants, or reduce the collection size"),
                ));
            }

            let mut picks = Vec::with_capacity(self.catalog.layer_count());
            for layer_index in 0..self.catalog.layer_count() {
                picks.push(self.pick_variant(layer_index, sequencer)?);
            }

            let names: Vec<&str> = picks
                .iter()
                .enumerate()
                .map(|(layer_index, &variant_index)| {
                    self.catalog.variant(layer_index, variant_index).name()
                })
                .collect();
            let fingerprint = hash::fingerprint(&names);
            if self.accepted.contains(&fingerprint) {
                continue;
            }
            self.accepted.insert(fingerprint.clone());
            if attempts > 1 {
                debug!(index, attempts, "resolved fingerprint collision");
            }

            surface.clear();
            let mut selections = Vec::with_capacity(picks.len());
            for (layer_index, &variant_index) in picks.iter().enumerate() {
                let layer = &self.catalog.layers()[layer_index];
                let variant = &layer.variants()[variant_index];
                surface.draw_image(variant.image(), 0, 0, width, height);
                selections.push(Selection {
                    layer: layer.key().to_string(),
                    variant: variant.name().to_string(),
                });
            }
            for (layer_index, &variant_index) in picks.iter().enumerate() {
                self.catalog.mark_used(layer_index, variant_index);
            }

            return Ok(Composition {
                selections,
                fingerprint: Some(fingerprint),
                unique_name: None,
            });
        }
    }

    /// Draws a variant index for one layer, re-drawing while the pick is
    /// capped out.
    ///
    /// In-layer re-draws do not count against the outer attempt budget and
    /// never re-draw other layers. The up-front capped-out check bounds the
    /// loop: once it passes, an uncapped variant exists and the re-draw
    /// terminates.
    fn pick_variant(
        &self,
        layer_index: usize,
        sequencer: &mut Sequencer,
    ) -> Result<usize, LaminaError> {
        let layer = &self.catalog.layers()[layer_index];
        if layer.is_capped_out() {
            return Err(LaminaError::Generation(
                ErrorInfo::new(
                    "layer-capped-out",
                    "every variant in the layer has reached its usage cap",
                )
                .with_context("layer", layer.key().to_string()),
            ));
        }
        loop {
            let candidate = sequencer.draw_index(layer.variants().len());
            if !layer.variants()[candidate].is_capped() {
                return Ok(candidate);
            }
        }
    }
}
