use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use lamina_gen::{aggregate, ItemRecord, RarityReport};
use tracing::info;

#[derive(Args, Debug)]
pub struct RarityArgs {
    /// Directory of persisted metadata records.
    #[arg(long, default_value = ".")]
    pub path: PathBuf,
    /// Trait keys to exclude, comma separated, matched case-insensitively.
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,
    /// Where to write the report.
    #[arg(long, default_value = "rarities.json")]
    pub out: PathBuf,
}

pub fn run(args: &RarityArgs) -> Result<(), Box<dyn Error>> {
    let records = load_records(&args.path)?;
    let report = aggregate(&records, &args.exclude);
    write_report(&args.out, &report)?;
    println!("{}", serde_json::to_string_pretty(&report.entries)?);
    info!(
        records = records.len(),
        entries = report.entries.len(),
        "rarity report written"
    );
    Ok(())
}

pub fn load_records(dir: &Path) -> Result<Vec<ItemRecord>, Box<dyn Error>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("json"))
        .collect();
    paths.sort();
    let mut records = Vec::with_capacity(paths.len());
    for path in paths {
        let contents = fs::read_to_string(&path)?;
        records.push(serde_json::from_str(&contents)?);
    }
    Ok(records)
}

fn write_report(path: &Path, report: &RarityReport) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(&report.entries)?)?;
    Ok(())
}
