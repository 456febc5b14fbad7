use std::collections::BTreeMap;
use std::collections::BTreeSet;

use lamina_catalog::{LayerCatalog, LayerDefinition, MetadataTemplate, VariantAsset};
use lamina_core::{LaminaError, NullSurface, Sequencer};
use lamina_gen::{generate_collection, CompositionEngine, EngineConfig, ItemRecord, UniquePlan};
use proptest::prelude::*;

fn build_catalog(layer_count: usize, variants_per_layer: usize, cap: u32) -> LayerCatalog<()> {
    let layers = (0..layer_count)
        .map(|layer| {
            let variants = (0..variants_per_layer)
                .map(|variant| {
                    // The first variant of every layer carries the cap.
                    let max_uses = if variant == 0 { cap } else { 0 };
                    VariantAsset::new(format!("l{layer}-v{variant}"), max_uses, ())
                })
                .collect();
            LayerDefinition::new(format!("layer-{layer}"), variants)
        })
        .collect();
    LayerCatalog::new(layers).expect("catalog")
}

fn check_records(records: &[ItemRecord], layer_count: usize, cap: u32) {
    // Layer combinations are pairwise distinct.
    let mut combos = BTreeSet::new();
    for record in records {
        assert_eq!(record.attributes.len(), layer_count);
        let combo: Vec<String> = record
            .attributes
            .iter()
            .map(|attribute| attribute.value.as_str().unwrap_or_default().to_string())
            .collect();
        assert!(combos.insert(combo), "duplicate layer combination");
    }

    // Capped variants never exceed their budget.
    if cap > 0 {
        let mut uses: BTreeMap<String, u32> = BTreeMap::new();
        for record in records {
            for attribute in &record.attributes {
                let name = attribute.value.as_str().unwrap_or_default();
                if name.ends_with("-v0") {
                    *uses.entry(name.to_string()).or_insert(0) += 1;
                }
            }
        }
        for (name, count) in uses {
            assert!(count <= cap, "variant {name} used {count} times, cap {cap}");
        }
    }
}

proptest! {
    #[test]
    fn random_runs_respect_caps_and_uniqueness(
        seed in any::<u64>(),
        layer_count in 1usize..4,
        variants_per_layer in 2usize..5,
        cap in 0u32..4,
        size in 1u64..12,
    ) {
        let catalog = build_catalog(layer_count, variants_per_layer, cap);
        let mut engine = CompositionEngine::<NullSurface>::new(
            EngineConfig::new(size, 4, 4),
            catalog,
            UniquePlan::empty(),
        );
        let mut sequencer = Sequencer::from_seed(seed);
        let mut surface = NullSurface::new();

        let result = generate_collection(
            &mut engine,
            &[],
            &MetadataTemplate::default(),
            &mut sequencer,
            &mut surface,
            |_, _, _| Ok(()),
        );

        match result {
            Ok(records) => {
                prop_assert_eq!(records.len() as u64, size);
                check_records(&records, layer_count, cap);

                // Usage counters agree with the accepted records.
                for (layer_index, layer) in engine.catalog().layers().iter().enumerate() {
                    for variant in layer.variants() {
                        let accepted = records
                            .iter()
                            .filter(|record| {
                                record.attributes[layer_index].value.as_str()
                                    == Some(variant.name())
                            })
                            .count() as u32;
                        prop_assert_eq!(variant.used(), accepted);
                    }
                }
            }
            // A variant space smaller than the requested size must surface
            // as a generation error, never as a hang or a partial success.
            Err(err) => prop_assert!(matches!(err, LaminaError::Generation(_))),
        }
    }
}
