//! Project configuration loaded from `lamina.json`.

use std::fs;
use std::path::{Path, PathBuf};

use lamina_core::errors::ErrorInfo;
use lamina_core::{ImageFormat, LaminaError, Seed};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::traits::TraitSpec;

/// Top-level project configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Total collection size N.
    #[serde(default = "default_size")]
    pub size: u64,
    /// Optional fixed seed (integer or text label). Absent means the host
    /// picks an entropy seed and records it in the run manifest.
    #[serde(default)]
    pub seed: Option<Seed>,
    /// Emit PNG instead of JPEG.
    #[serde(default)]
    pub png: bool,
    /// Output directory and canvas dimensions.
    #[serde(default)]
    pub output: OutputConfig,
    /// Ordered layer keys; declaration order is paint order and draw order.
    pub layers: Vec<String>,
    /// Optional trait roll specifications, applied in declaration order.
    #[serde(default)]
    pub traits: Vec<TraitConfig>,
    /// Metadata template applied to every record.
    #[serde(default)]
    pub metadata: MetadataTemplate,
}

fn default_size() -> u64 {
    10_000
}

/// Output directory and canvas dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory for generated artifacts.
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    /// Canvas width in pixels.
    #[serde(default = "default_dimension")]
    pub width: u32,
    /// Canvas height in pixels.
    #[serde(default = "default_dimension")]
    pub height: u32,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("outputs")
}

fn default_dimension() -> u32 {
    500
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            width: default_dimension(),
            height: default_dimension(),
        }
    }
}

/// Name prefix and description stamped into every metadata record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataTemplate {
    /// Prefix for item names; items render as `{prefix}#{index + 1}`.
    #[serde(default, rename = "namePrefix")]
    pub name_prefix: String,
    /// Collection description copied into every record.
    #[serde(default)]
    pub description: String,
}

/// Raw trait declaration as written in the configuration.
///
/// Range bounds stay as [`serde_json::Number`] so the literal decimal length
/// of the configured maximum survives parsing; value precision is inferred
/// from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraitConfig {
    /// Attribute key this trait writes.
    #[serde(rename = "trait")]
    pub key: String,
    /// Chance threshold; the trait applies iff `floor(roll * N) < chance`.
    pub chance: u64,
    /// Numeric range `[min, max]`, exclusive with `values`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<Vec<Number>>,
    /// Discrete value set, exclusive with `range`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
}

impl ProjectConfig {
    /// Loads and validates the configuration file.
    pub fn load(path: &Path) -> Result<Self, LaminaError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            LaminaError::Config(
                ErrorInfo::new("config-missing", err.to_string())
                    .with_context("path", path.display().to_string())
                    .with_hint("run from a directory containing lamina.json"),
            )
        })?;
        let config: ProjectConfig = serde_json::from_str(&contents).map_err(|err| {
            LaminaError::Config(
                ErrorInfo::new("config-invalid", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the structural invariants the generator depends on.
    pub fn validate(&self) -> Result<(), LaminaError> {
        if self.size == 0 {
            return Err(LaminaError::Config(ErrorInfo::new(
                "size-invalid",
                "collection size must be a positive integer",
            )));
        }
        if self.layers.is_empty() {
            return Err(LaminaError::Config(ErrorInfo::new(
                "layers-empty",
                "at least one layer must be declared",
            )));
        }
        for trait_config in &self.traits {
            TraitSpec::from_config(trait_config)?;
        }
        Ok(())
    }

    /// Resolves the declared traits into immutable specs, declaration order
    /// preserved.
    pub fn trait_specs(&self) -> Result<Vec<TraitSpec>, LaminaError> {
        self.traits.iter().map(TraitSpec::from_config).collect()
    }

    /// Output encoding selected by the `png` flag.
    pub fn image_format(&self) -> ImageFormat {
        if self.png {
            ImageFormat::Png
        } else {
            ImageFormat::Jpeg
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ProjectConfig {
        serde_json::from_str(json).expect("config")
    }

    #[test]
    fn defaults_cover_optional_fields() {
        let config = parse(r#"{ "layers": ["background"] }"#);
        assert_eq!(config.size, 10_000);
        assert_eq!(config.output.width, 500);
        assert_eq!(config.output.height, 500);
        assert_eq!(config.output.path, PathBuf::from("outputs"));
        assert!(!config.png);
        assert!(config.seed.is_none());
        assert!(config.traits.is_empty());
        assert_eq!(config.image_format(), ImageFormat::Jpeg);
        config.validate().expect("valid");
    }

    #[test]
    fn seed_accepts_number_or_text() {
        let numeric = parse(r#"{ "layers": ["a"], "seed": 42 }"#);
        assert_eq!(numeric.seed, Some(Seed::Number(42)));
        let text = parse(r#"{ "layers": ["a"], "seed": "genesis" }"#);
        assert_eq!(text.seed, Some(Seed::Text("genesis".to_string())));
    }

    #[test]
    fn zero_size_is_rejected() {
        let config = parse(r#"{ "layers": ["a"], "size": 0 }"#);
        let err = config.validate().unwrap_err();
        assert_eq!(err.info().code, "size-invalid");
    }

    #[test]
    fn empty_layer_list_is_rejected() {
        let config = parse(r#"{ "layers": [] }"#);
        let err = config.validate().unwrap_err();
        assert_eq!(err.info().code, "layers-empty");
    }
}
