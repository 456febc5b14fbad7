//! Project configuration, layer catalog and trait specifications.

mod catalog;
mod config;
mod loader;
mod traits;

pub use catalog::{parse_variant_stem, LayerCatalog, LayerDefinition, VariantAsset};
pub use config::{MetadataTemplate, OutputConfig, ProjectConfig, TraitConfig};
pub use loader::{load_catalog, load_unique_artworks};
pub use traits::{decimal_places, TraitKind, TraitSpec};
