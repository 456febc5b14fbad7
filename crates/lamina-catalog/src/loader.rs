//! Filesystem catalog construction.
//!
//! Decoding is delegated to a caller-supplied function so the catalog stays
//! agnostic of the image backend; directory scans are sorted so the variant
//! order (and therefore the sequencer consumption pattern) is stable across
//! platforms.

use std::path::{Path, PathBuf};

use lamina_core::errors::ErrorInfo;
use lamina_core::LaminaError;
use tracing::debug;
use walkdir::WalkDir;

use crate::catalog::{parse_variant_stem, LayerCatalog, LayerDefinition, VariantAsset};

/// Builds the full catalog from per-layer directories under `root`.
///
/// Layer keys come from configuration, in paint order; each key must have a
/// directory of the same name containing at least one decodable file.
pub fn load_catalog<I>(
    root: &Path,
    layer_keys: &[String],
    mut decode: impl FnMut(&Path) -> Result<I, LaminaError>,
) -> Result<LayerCatalog<I>, LaminaError> {
    let mut layers = Vec::with_capacity(layer_keys.len());
    for key in layer_keys {
        let dir = root.join(key);
        if !dir.is_dir() {
            return Err(LaminaError::Catalog(
                ErrorInfo::new("layer-dir-missing", "layer has no asset directory")
                    .with_context("layer", key.clone())
                    .with_context("path", dir.display().to_string()),
            ));
        }
        let mut variants = Vec::new();
        for path in sorted_files(&dir) {
            let stem = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or_default();
            let (name, max_uses) = parse_variant_stem(stem);
            let image = decode(&path)?;
            variants.push(VariantAsset::new(name, max_uses, image));
        }
        debug!(layer = %key, variants = variants.len(), "loaded layer");
        layers.push(LayerDefinition::new(key.clone(), variants));
    }
    LayerCatalog::new(layers)
}

/// Loads the standalone unique artworks, sorted by file name.
///
/// An absent directory means the project ships no 1-of-1s and yields an
/// empty list.
pub fn load_unique_artworks<I>(
    dir: &Path,
    mut decode: impl FnMut(&Path) -> Result<I, LaminaError>,
) -> Result<Vec<(String, I)>, LaminaError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut artworks = Vec::new();
    for path in sorted_files(dir) {
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
            .to_string();
        let image = decode(&path)?;
        artworks.push((name, image));
    }
    debug!(count = artworks.len(), "loaded unique artworks");
    Ok(artworks)
}

fn sorted_files(dir: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect();
    paths.sort();
    paths
}
