//! Run manifest tying a generated collection to its inputs.

use std::fs;
use std::path::Path;

use lamina_core::errors::ErrorInfo;
use lamina_core::{LaminaError, SchemaVersion};
use serde::{Deserialize, Serialize};

/// Structured manifest describing a completed generation run.
///
/// Rerunning with the recorded seed and an unchanged config reproduces the
/// collection bit for bit; the config hash makes accidental drift visible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionManifest {
    /// Schema version for the manifest payload.
    pub schema_version: SchemaVersion,
    /// Master seed the sequencer was built from.
    pub master_seed: u64,
    /// Collection size N.
    pub size: u64,
    /// SHA-256 of the raw configuration file bytes.
    pub config_hash: String,
    /// Number of indices reserved for 1-of-1 artworks.
    pub unique_slots: u64,
    /// ISO-8601 timestamp recording when the run finished.
    pub created_at: String,
}

impl CollectionManifest {
    /// Writes the manifest to a JSON file.
    pub fn write(&self, path: &Path) -> Result<(), LaminaError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                LaminaError::Serde(
                    ErrorInfo::new("manifest-mkdir", err.to_string())
                        .with_context("path", parent.display().to_string()),
                )
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|err| {
            LaminaError::Serde(
                ErrorInfo::new("manifest-serialize", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        fs::write(path, json).map_err(|err| {
            LaminaError::Serde(
                ErrorInfo::new("manifest-write", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }

    /// Loads a manifest from disk.
    pub fn load(path: &Path) -> Result<Self, LaminaError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            LaminaError::Serde(
                ErrorInfo::new("manifest-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        serde_json::from_str(&contents).map_err(|err| {
            LaminaError::Serde(
                ErrorInfo::new("manifest-parse", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }
}
