//! Metadata records and the attribute namespace.

use lamina_catalog::MetadataTemplate;
use lamina_core::LaminaError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::Composition;
use crate::hash;

/// One `{trait_type, value}` pair of the persisted record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute key (layer key or trait key; one shared namespace).
    pub trait_type: String,
    /// String for layer and set traits, number for range traits.
    pub value: Value,
}

/// Insertion-ordered attribute map.
///
/// Layer keys land first (in layer order), trait keys after (in declaration
/// order); writing an existing key replaces the value but keeps the original
/// position, so later-declared traits may overwrite layer-derived values
/// without disturbing the serialized order.
#[derive(Debug, Clone, Default)]
pub struct AttributeMap {
    entries: Vec<(String, Value)>,
}

impl AttributeMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing in place when the key exists.
    pub fn set(&mut self, key: &str, value: Value) {
        match self.entries.iter_mut().find(|(existing, _)| existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    /// Current value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no attributes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the map into the ordered attribute list.
    pub fn into_attributes(self) -> Vec<Attribute> {
        self.entries
            .into_iter()
            .map(|(trait_type, value)| Attribute { trait_type, value })
            .collect()
    }
}

/// Persisted per-item metadata record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Display name, `{prefix}#{index + 1}`.
    pub name: String,
    /// Collection description from the template.
    pub description: String,
    /// Image location; left empty for the publishing host to fill in.
    pub image: String,
    /// External URL; left empty for the publishing host to fill in.
    pub external_url: String,
    /// Ordered attribute list.
    pub attributes: Vec<Attribute>,
    /// Stable per-item identifier.
    pub dna: String,
}

/// Assembles finalized records from compositions and attributes.
#[derive(Debug)]
pub struct MetadataBuilder<'a> {
    template: &'a MetadataTemplate,
}

impl<'a> MetadataBuilder<'a> {
    /// Creates a builder over the project's metadata template.
    pub fn new(template: &'a MetadataTemplate) -> Self {
        Self { template }
    }

    /// Finalizes the record for one item.
    pub fn build(
        &self,
        index: u64,
        composition: &Composition,
        attributes: AttributeMap,
    ) -> Result<ItemRecord, LaminaError> {
        let attributes = attributes.into_attributes();
        let fingerprint_component = match (&composition.fingerprint, &composition.unique_name) {
            (Some(fingerprint), _) => fingerprint.clone(),
            (None, Some(name)) => hash::unique_fingerprint_component(name),
            (None, None) => hash::unique_fingerprint_component(""),
        };
        let dna = hash::dna(&fingerprint_component, &attributes)?;
        Ok(ItemRecord {
            name: format!("{}#{}", self.template.name_prefix, index + 1),
            description: self.template.description.clone(),
            image: String::new(),
            external_url: String::new(),
            attributes,
            dna,
        })
    }
}
