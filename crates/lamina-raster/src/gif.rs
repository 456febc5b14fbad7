//! Animated GIF assembly from a folder of rendered frames.

use std::fs;
use std::path::{Path, PathBuf};

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame};
use lamina_core::errors::ErrorInfo;
use lamina_core::LaminaError;
use tracing::debug;

/// Encodes every `*.png` in `frames_dir` (sorted order) into an infinitely
/// repeating GIF at `out_path`. Returns the number of frames written.
pub fn assemble_gif(
    frames_dir: &Path,
    out_path: &Path,
    delay_ms: u32,
) -> Result<usize, LaminaError> {
    let frames = collect_frames(frames_dir)?;
    if frames.is_empty() {
        return Err(LaminaError::Render(
            ErrorInfo::new("gif-no-frames", "no PNG frames found to assemble")
                .with_context("path", frames_dir.display().to_string()),
        ));
    }

    let file = fs::File::create(out_path).map_err(|err| {
        LaminaError::Render(
            ErrorInfo::new("gif-create", err.to_string())
                .with_context("path", out_path.display().to_string()),
        )
    })?;
    let mut encoder = GifEncoder::new(file);
    encoder.set_repeat(Repeat::Infinite).map_err(gif_encode_error)?;

    let count = frames.len();
    for path in frames {
        let pixels = image::open(&path)
            .map_err(|err| {
                LaminaError::Render(
                    ErrorInfo::new("image-decode", err.to_string())
                        .with_context("path", path.display().to_string()),
                )
            })?
            .to_rgba8();
        let frame = Frame::from_parts(pixels, 0, 0, Delay::from_numer_denom_ms(delay_ms, 1));
        encoder.encode_frame(frame).map_err(gif_encode_error)?;
    }
    debug!(frames = count, path = %out_path.display(), "assembled gif");
    Ok(count)
}

fn gif_encode_error(err: image::ImageError) -> LaminaError {
    LaminaError::Render(ErrorInfo::new("gif-encode", err.to_string()))
}

fn collect_frames(dir: &Path) -> Result<Vec<PathBuf>, LaminaError> {
    let entries = fs::read_dir(dir).map_err(|err| {
        LaminaError::Render(
            ErrorInfo::new("gif-frames-dir", err.to_string())
                .with_context("path", dir.display().to_string()),
        )
    })?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("png"))
        .collect();
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn frames_assemble_into_a_gif() {
        let dir = tempfile::tempdir().expect("tempdir");
        for (index, shade) in [40u8, 80, 120].iter().enumerate() {
            RgbaImage::from_pixel(4, 4, Rgba([*shade, 0, 0, 255]))
                .save(dir.path().join(format!("{index}.png")))
                .expect("frame");
        }
        let out = dir.path().join("animated.gif");
        let frames = assemble_gif(dir.path(), &out, 250).expect("gif");
        assert_eq!(frames, 3);
        assert!(out.metadata().expect("metadata").len() > 0);
    }

    #[test]
    fn an_empty_folder_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = assemble_gif(dir.path(), &dir.path().join("out.gif"), 250).unwrap_err();
        assert_eq!(err.info().code, "gif-no-frames");
    }
}
