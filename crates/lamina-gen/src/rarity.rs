//! Attribute frequency aggregation across a completed collection.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::metadata::ItemRecord;

/// One `trait_type::value` frequency entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RarityEntry {
    /// Counter key, `"trait_type::value"`.
    pub attribute: String,
    /// Number of items carrying the pair.
    pub value: u64,
}

/// Frequency report sorted descending by count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RarityReport {
    /// Entries, most frequent first; ties keep first-seen order.
    pub entries: Vec<RarityEntry>,
}

/// Aggregates attribute frequencies, skipping excluded trait keys.
///
/// Exclusions match `trait_type` case-insensitively. This is a pure
/// aggregation with no sequencer dependency.
pub fn aggregate<'a>(
    records: impl IntoIterator<Item = &'a ItemRecord>,
    exclude: &[String],
) -> RarityReport {
    let exclude: Vec<String> = exclude.iter().map(|key| key.to_lowercase()).collect();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut entries: Vec<RarityEntry> = Vec::new();

    for record in records {
        for attribute in &record.attributes {
            if exclude.contains(&attribute.trait_type.to_lowercase()) {
                continue;
            }
            let key = format!(
                "{}::{}",
                attribute.trait_type,
                render_value(&attribute.value)
            );
            match positions.get(&key) {
                Some(&position) => entries[position].value += 1,
                None => {
                    positions.insert(key.clone(), entries.len());
                    entries.push(RarityEntry {
                        attribute: key,
                        value: 1,
                    });
                }
            }
        }
    }

    entries.sort_by(|a, b| b.value.cmp(&a.value));
    RarityReport { entries }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Attribute;

    fn record(pairs: &[(&str, &str)]) -> ItemRecord {
        ItemRecord {
            name: String::new(),
            description: String::new(),
            image: String::new(),
            external_url: String::new(),
            attributes: pairs
                .iter()
                .map(|(trait_type, value)| Attribute {
                    trait_type: trait_type.to_string(),
                    value: Value::String(value.to_string()),
                })
                .collect(),
            dna: String::new(),
        }
    }

    #[test]
    fn counts_sort_descending() {
        let records = vec![
            record(&[("background", "red")]),
            record(&[("background", "red")]),
            record(&[("background", "blue")]),
        ];
        let report = aggregate(&records, &[]);
        assert_eq!(report.entries[0].attribute, "background::red");
        assert_eq!(report.entries[0].value, 2);
        assert_eq!(report.entries[1].attribute, "background::blue");
        assert_eq!(report.entries[1].value, 1);
    }

    #[test]
    fn exclusions_match_case_insensitively() {
        let records = vec![record(&[("Background", "red"), ("eyes", "wide")])];
        let report = aggregate(&records, &["background".to_string()]);
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].attribute, "eyes::wide");
    }

    #[test]
    fn counts_for_a_key_sum_to_carrying_items() {
        let records = vec![
            record(&[("background", "red")]),
            record(&[("background", "blue")]),
            record(&[("background", "blue")]),
            record(&[("eyes", "wide")]),
        ];
        let report = aggregate(&records, &[]);
        let background_total: u64 = report
            .entries
            .iter()
            .filter(|entry| entry.attribute.starts_with("background::"))
            .map(|entry| entry.value)
            .sum();
        assert_eq!(background_total, 3);
    }

    #[test]
    fn numeric_values_render_without_quotes() {
        let mut item = record(&[]);
        item.attributes.push(Attribute {
            trait_type: "Power".to_string(),
            value: Value::from(7),
        });
        let report = aggregate(&[item], &[]);
        assert_eq!(report.entries[0].attribute, "Power::7");
    }
}
