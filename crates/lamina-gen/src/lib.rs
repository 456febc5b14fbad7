//! Deterministic generation engine: unique placement, layered composition
//! with cap and uniqueness enforcement, trait rolls, metadata assembly, and
//! rarity aggregation.

mod assign;
mod engine;
pub mod hash;
mod manifest;
mod metadata;
mod planner;
mod rarity;

pub use assign::TraitAssigner;
pub use engine::{
    Composition, CompositionEngine, EngineConfig, Selection, DEFAULT_ATTEMPT_BUDGET,
};
pub use manifest::CollectionManifest;
pub use metadata::{Attribute, AttributeMap, ItemRecord, MetadataBuilder};
pub use planner::{plan_unique_slots, UniquePlan};
pub use rarity::{aggregate, RarityEntry, RarityReport};

use lamina_catalog::{MetadataTemplate, TraitSpec};
use lamina_core::{LaminaError, Sequencer, Surface};
use serde_json::Value;
use tracing::debug;

/// Drives a full generation run over every index in ascending order.
///
/// Index order is part of the determinism contract: all sequencer-dependent
/// decisions for item `i` complete before `sink` runs for item `i`, so a
/// persisting sink and a discarding sink consume identical streams. The sink
/// receives the surface after the item has been painted and may encode and
/// persist it.
pub fn generate_collection<S, F>(
    engine: &mut CompositionEngine<S>,
    specs: &[TraitSpec],
    template: &MetadataTemplate,
    sequencer: &mut Sequencer,
    surface: &mut S,
    mut sink: F,
) -> Result<Vec<ItemRecord>, LaminaError>
where
    S: Surface,
    F: FnMut(u64, &mut S, &ItemRecord) -> Result<(), LaminaError>,
{
    let size = engine.config().size;
    let assigner = TraitAssigner::new(specs, size);
    let builder = MetadataBuilder::new(template);
    let mut records = Vec::with_capacity(size as usize);
    for index in 0..size {
        let composition = engine.compose(index, surface, sequencer)?;
        let mut attributes = AttributeMap::new();
        for selection in &composition.selections {
            attributes.set(&selection.layer, Value::String(selection.variant.clone()));
        }
        assigner.assign(sequencer, &mut attributes);
        let record = builder.build(index, &composition, attributes)?;
        debug!(index, dna = %record.dna, "generated item");
        sink(index, surface, &record)?;
        records.push(record);
    }
    Ok(records)
}
