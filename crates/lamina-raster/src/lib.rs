//! Raster implementation of the Lamina drawable surface, plus image I/O.

mod gif;
mod loader;
mod surface;

pub use gif::assemble_gif;
pub use loader::load_rgba;
pub use surface::RasterSurface;
