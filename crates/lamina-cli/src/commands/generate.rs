use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use lamina_catalog::{load_catalog, load_unique_artworks, ProjectConfig};
use lamina_core::errors::ErrorInfo;
use lamina_core::{LaminaError, SchemaVersion, Sequencer, Surface};
use lamina_gen::{
    generate_collection, plan_unique_slots, CollectionManifest, CompositionEngine, EngineConfig,
    ItemRecord,
};
use lamina_raster::{load_rgba, RasterSurface};
use sha2::{Digest, Sha256};
use tracing::info;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Project directory containing lamina.json and the layer directories.
    #[arg(long, default_value = ".")]
    pub project: PathBuf,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            project: PathBuf::from("."),
        }
    }
}

pub fn run(args: &GenerateArgs) -> Result<(), Box<dyn Error>> {
    let records = run_project(&args.project, true)?;
    info!(items = records.len(), "collection generated");
    Ok(())
}

/// Loads the project and generates the full collection.
///
/// With `persist` unset the run consumes exactly the same sequencer stream
/// but writes nothing, which is what `probe` relies on.
pub fn run_project(project: &Path, persist: bool) -> Result<Vec<ItemRecord>, Box<dyn Error>> {
    let config_path = project.join("lamina.json");
    let config = ProjectConfig::load(&config_path)?;
    let config_hash = format!("{:x}", Sha256::digest(fs::read(&config_path)?));
    let specs = config.trait_specs()?;

    let catalog = load_catalog(project, &config.layers, |path| load_rgba(path))?;
    let uniques = load_unique_artworks(&project.join("1of1s"), |path| load_rgba(path))?;
    let unique_count = uniques.len() as u64;

    let master_seed = match &config.seed {
        Some(seed) => seed.to_u64(),
        None => {
            let drawn: u64 = rand::random();
            info!(seed = drawn, "no seed configured, drew one from entropy");
            drawn
        }
    };
    let mut sequencer = Sequencer::from_seed(master_seed);
    let plan = plan_unique_slots(uniques, config.size, &mut sequencer)?;

    let mut engine = CompositionEngine::<RasterSurface>::new(
        EngineConfig::new(config.size, config.output.width, config.output.height),
        catalog,
        plan,
    );
    let mut surface = RasterSurface::new(config.output.width, config.output.height);
    let format = config.image_format();

    let out_root = project.join(&config.output.path);
    let images_dir = out_root.join("images");
    let jsons_dir = out_root.join("jsons");
    if persist {
        fs::create_dir_all(&images_dir)?;
        fs::create_dir_all(&jsons_dir)?;
    }

    let records = generate_collection(
        &mut engine,
        &specs,
        &config.metadata,
        &mut sequencer,
        &mut surface,
        |index, surface, record| {
            if !persist {
                return Ok(());
            }
            let bytes = surface.encode(format)?;
            let image_path = images_dir.join(format!("{}.{}", index + 1, format.extension()));
            fs::write(&image_path, bytes).map_err(|err| {
                LaminaError::Render(
                    ErrorInfo::new("image-write", err.to_string())
                        .with_context("path", image_path.display().to_string()),
                )
            })?;
            let json = serde_json::to_string_pretty(record).map_err(|err| {
                LaminaError::Serde(ErrorInfo::new("record-serialize", err.to_string()))
            })?;
            let record_path = jsons_dir.join(format!("{}.json", index + 1));
            fs::write(&record_path, json).map_err(|err| {
                LaminaError::Serde(
                    ErrorInfo::new("record-write", err.to_string())
                        .with_context("path", record_path.display().to_string()),
                )
            })?;
            Ok(())
        },
    )?;

    if persist {
        let manifest = CollectionManifest {
            schema_version: SchemaVersion::default(),
            master_seed,
            size: config.size,
            config_hash,
            unique_slots: unique_count,
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        manifest.write(&out_root.join("manifest.json"))?;
    }

    Ok(records)
}
