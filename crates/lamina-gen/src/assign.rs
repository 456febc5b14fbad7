//! Trait rolls: optional auxiliary attributes drawn from the shared stream.

use lamina_catalog::{TraitKind, TraitSpec};
use lamina_core::Sequencer;
use serde_json::{Number, Value};

use crate::metadata::AttributeMap;

/// Rolls trait attributes for one item.
#[derive(Debug)]
pub struct TraitAssigner<'a> {
    specs: &'a [TraitSpec],
    size: u64,
}

impl<'a> TraitAssigner<'a> {
    /// Creates an assigner over the declared specs and collection size.
    pub fn new(specs: &'a [TraitSpec], size: u64) -> Self {
        Self { specs, size }
    }

    /// Rolls every spec in declaration order.
    ///
    /// Exactly two values are drawn per spec (chance, then value) whether or
    /// not the trait applies, keeping downstream consumption deterministic.
    /// Trait keys share the attribute namespace with layer keys and may
    /// overwrite them.
    pub fn assign(&self, sequencer: &mut Sequencer, attributes: &mut AttributeMap) {
        for spec in self.specs {
            let chance_roll = sequencer.next();
            let value_roll = sequencer.next();
            if (chance_roll * self.size as f64) as u64 >= spec.chance {
                continue;
            }
            let value = match &spec.kind {
                TraitKind::Range {
                    min,
                    max,
                    precision,
                } => rounded_value(value_roll * max + min, *precision),
                TraitKind::Set { values } => {
                    let pick = (value_roll * values.len() as f64) as usize;
                    Value::String(values[pick].clone())
                }
            };
            attributes.set(&spec.key, value);
        }
    }
}

fn rounded_value(raw: f64, precision: usize) -> Value {
    if precision == 0 {
        return Value::from(raw.round() as i64);
    }
    let scale = 10f64.powi(precision as i32);
    let rounded = (raw * scale).round() / scale;
    Number::from_f64(rounded).map(Value::Number).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lamina_catalog::TraitConfig;

    fn spec(json: &str) -> TraitSpec {
        let config: TraitConfig = serde_json::from_str(json).expect("trait config");
        TraitSpec::from_config(&config).expect("spec")
    }

    #[test]
    fn two_draws_per_spec_even_when_nothing_applies() {
        // chance 0 never applies: floor(roll * N) >= 0 for every roll.
        let specs = vec![
            spec(r#"{ "trait": "A", "chance": 0, "values": ["x"] }"#),
            spec(r#"{ "trait": "B", "chance": 0, "range": [0, 5] }"#),
        ];
        let assigner = TraitAssigner::new(&specs, 100);
        let mut sequencer = Sequencer::from_seed(9);
        let mut attributes = AttributeMap::new();
        assigner.assign(&mut sequencer, &mut attributes);
        assert!(attributes.is_empty());
        assert_eq!(sequencer.draws(), 4);
    }

    #[test]
    fn full_chance_always_applies() {
        // chance == N always applies: floor(roll * N) < N for roll < 1.
        let specs = vec![spec(r#"{ "trait": "Aura", "chance": 10, "values": ["Gold", "Void"] }"#)];
        let assigner = TraitAssigner::new(&specs, 10);
        let mut sequencer = Sequencer::from_seed(3);
        let mut attributes = AttributeMap::new();
        assigner.assign(&mut sequencer, &mut attributes);
        let value = attributes.get("Aura").expect("applied");
        assert!(matches!(value, Value::String(s) if s == "Gold" || s == "Void"));
    }

    #[test]
    fn integer_precision_rounds_to_whole_numbers() {
        let specs = vec![spec(r#"{ "trait": "Level", "chance": 10, "range": [1, 5] }"#)];
        let assigner = TraitAssigner::new(&specs, 10);
        let mut sequencer = Sequencer::from_seed(11);
        let mut attributes = AttributeMap::new();
        assigner.assign(&mut sequencer, &mut attributes);
        let value = attributes.get("Level").expect("applied");
        assert!(value.is_i64());
        let level = value.as_i64().expect("integer");
        // roll * 5 + 1 rounded lands in [1, 6]
        assert!((1..=6).contains(&level));
    }

    #[test]
    fn fractional_precision_keeps_the_declared_decimals() {
        // max written as 10.0 carries one decimal place.
        let specs = vec![spec(r#"{ "trait": "Power", "chance": 10, "range": [0, 10.0] }"#)];
        let assigner = TraitAssigner::new(&specs, 10);
        let mut sequencer = Sequencer::from_seed(5);
        let mut attributes = AttributeMap::new();
        assigner.assign(&mut sequencer, &mut attributes);
        let value = attributes.get("Power").expect("applied").as_f64().expect("number");
        let scaled = value * 10.0;
        assert!((scaled - scaled.round()).abs() < 1e-9);
    }

    #[test]
    fn trait_keys_overwrite_layer_attributes() {
        let specs = vec![spec(r#"{ "trait": "background", "chance": 10, "values": ["midnight"] }"#)];
        let assigner = TraitAssigner::new(&specs, 10);
        let mut sequencer = Sequencer::from_seed(2);
        let mut attributes = AttributeMap::new();
        attributes.set("background", Value::String("red".to_string()));
        attributes.set("eyes", Value::String("wide".to_string()));
        assigner.assign(&mut sequencer, &mut attributes);

        let attrs = attributes.into_attributes();
        assert_eq!(attrs[0].trait_type, "background");
        assert_eq!(attrs[0].value, Value::String("midnight".to_string()));
        assert_eq!(attrs[1].trait_type, "eyes");
    }
}
