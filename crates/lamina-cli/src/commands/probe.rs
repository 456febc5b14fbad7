use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use lamina_gen::aggregate;
use tracing::info;

use crate::commands::generate;

#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Project directory containing lamina.json and the layer directories.
    #[arg(long, default_value = ".")]
    pub project: PathBuf,
}

/// Runs a full generation without persisting anything and prints the rarity
/// report, as a fast feedback loop for tuning trait and layer probabilities.
pub fn run(args: &ProbeArgs) -> Result<(), Box<dyn Error>> {
    let records = generate::run_project(&args.project, false)?;
    let report = aggregate(&records, &[]);
    println!("{}", serde_json::to_string_pretty(&report.entries)?);
    info!(items = records.len(), "probe run complete");
    Ok(())
}
