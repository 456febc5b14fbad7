use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use lamina_raster::assemble_gif;
use tracing::info;

#[derive(Args, Debug)]
pub struct GifArgs {
    /// Directory of rendered PNG frames.
    #[arg(long, default_value = ".")]
    pub path: PathBuf,
    /// Output GIF file.
    #[arg(long, default_value = "animated.gif")]
    pub out: PathBuf,
    /// Delay between frames in milliseconds.
    #[arg(long, default_value_t = 250)]
    pub delay_ms: u32,
}

pub fn run(args: &GifArgs) -> Result<(), Box<dyn Error>> {
    let frames = assemble_gif(&args.path, &args.out, args.delay_ms)?;
    info!(frames, out = %args.out.display(), "gif assembled");
    Ok(())
}
