//! Fingerprint and dna hashing.

use lamina_core::errors::ErrorInfo;
use lamina_core::LaminaError;
use sha2::{Digest, Sha256};

use crate::metadata::Attribute;

/// Hex-rendered SHA-256 of the given bytes.
pub fn hex_digest(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Content fingerprint of a layer combination: the selected variant names
/// joined with commas, in layer order, digested.
pub fn fingerprint(names: &[&str]) -> String {
    hex_digest(names.join(",").as_bytes())
}

/// Fingerprint stand-in for a 1-of-1 artwork.
///
/// Composition fingerprints are digests of comma-joined variant names, so
/// the `1of1:` prefix keeps this component out of their preimage space while
/// staying recomputable from the artwork's own identity.
pub fn unique_fingerprint_component(artwork_name: &str) -> String {
    hex_digest(format!("1of1:{artwork_name}").as_bytes())
}

/// Digest of the serialized attribute list.
pub fn attributes_digest(attributes: &[Attribute]) -> Result<String, LaminaError> {
    let bytes = serde_json::to_vec(attributes).map_err(|err| {
        LaminaError::Serde(ErrorInfo::new("attributes-serialize", err.to_string()))
    })?;
    Ok(hex_digest(&bytes))
}

/// Stable per-item identifier combining the fingerprint component with the
/// attribute digest.
pub fn dna(fingerprint_component: &str, attributes: &[Attribute]) -> Result<String, LaminaError> {
    let digest = attributes_digest(attributes)?;
    Ok(hex_digest(format!("{fingerprint_component}{digest}").as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn fingerprint_depends_on_order() {
        assert_ne!(fingerprint(&["red", "round"]), fingerprint(&["round", "red"]));
        assert_eq!(fingerprint(&["red", "round"]), fingerprint(&["red", "round"]));
    }

    #[test]
    fn dna_recomputes_from_stored_parts() {
        let attributes = vec![Attribute {
            trait_type: "background".to_string(),
            value: Value::String("red".to_string()),
        }];
        let fp = fingerprint(&["red"]);
        let first = dna(&fp, &attributes).expect("dna");
        let second = dna(&fp, &attributes).expect("dna");
        assert_eq!(first, second);
    }

    #[test]
    fn unique_component_cannot_alias_a_composition_fingerprint() {
        // A composition fingerprint is a 64-char hex digest; the unique
        // component digests a "1of1:"-prefixed name, never a digest of
        // comma-joined variant names.
        assert_ne!(unique_fingerprint_component("red"), fingerprint(&["red"]));
    }
}
