//! Image decoding for catalog assets.

use std::path::Path;

use image::RgbaImage;
use lamina_core::errors::ErrorInfo;
use lamina_core::LaminaError;

/// Decodes an asset file into RGBA pixels.
pub fn load_rgba(path: &Path) -> Result<RgbaImage, LaminaError> {
    let image = image::open(path).map_err(|err| {
        LaminaError::Render(
            ErrorInfo::new("image-decode", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    Ok(image.to_rgba8())
}
