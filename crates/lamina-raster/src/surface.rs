//! RGBA canvas implementing the drawable-surface seam.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{imageops, DynamicImage, ImageOutputFormat, RgbaImage};
use lamina_core::errors::ErrorInfo;
use lamina_core::{ImageFormat, LaminaError, Surface};

/// In-memory RGBA canvas with straight alpha-over compositing.
#[derive(Debug)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    canvas: RgbaImage,
}

impl RasterSurface {
    /// Creates a transparent canvas of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            canvas: RgbaImage::new(width, height),
        }
    }

    /// Read access to the composited pixels.
    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }
}

impl Surface for RasterSurface {
    type Image = RgbaImage;

    fn clear(&mut self) {
        for pixel in self.canvas.pixels_mut() {
            pixel.0 = [0, 0, 0, 0];
        }
    }

    fn draw_image(&mut self, image: &Self::Image, x: u32, y: u32, w: u32, h: u32) {
        let scaled;
        let source = if image.dimensions() == (w, h) {
            image
        } else {
            scaled = imageops::resize(image, w, h, FilterType::Triangle);
            &scaled
        };
        for (dx, dy, pixel) in source.enumerate_pixels() {
            let out_x = x + dx;
            let out_y = y + dy;
            if out_x >= self.width || out_y >= self.height {
                continue;
            }
            let dst = self.canvas.get_pixel(out_x, out_y).0;
            let blended = blend_over(pixel.0, dst);
            self.canvas.get_pixel_mut(out_x, out_y).0 = blended;
        }
    }

    fn encode(&mut self, format: ImageFormat) -> Result<Vec<u8>, LaminaError> {
        let mut cursor = Cursor::new(Vec::new());
        let result = match format {
            ImageFormat::Png => DynamicImage::ImageRgba8(self.canvas.clone())
                .write_to(&mut cursor, ImageOutputFormat::Png),
            // JPEG carries no alpha channel.
            ImageFormat::Jpeg => DynamicImage::ImageRgba8(self.canvas.clone())
                .to_rgb8()
                .write_to(&mut cursor, ImageOutputFormat::Jpeg(90)),
        };
        result.map_err(|err| {
            LaminaError::Render(
                ErrorInfo::new("image-encode", err.to_string())
                    .with_context("format", format.extension()),
            )
        })?;
        Ok(cursor.into_inner())
    }
}

/// Straight alpha-over blend of `src` onto `dst`.
fn blend_over(src: [u8; 4], dst: [u8; 4]) -> [u8; 4] {
    let src_a = src[3] as f32 / 255.0;
    if src_a <= 0.0 {
        return dst;
    }
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }
    let blend = |s: u8, d: u8| -> u8 {
        let s = s as f32 / 255.0;
        let d = d as f32 / 255.0;
        let out = (s * src_a + d * dst_a * (1.0 - src_a)) / out_a;
        (out * 255.0).clamp(0.0, 255.0) as u8
    };
    [
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        (out_a * 255.0) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(rgba))
    }

    #[test]
    fn later_draws_paint_over_earlier_ones() {
        let mut surface = RasterSurface::new(4, 4);
        surface.draw_image(&solid(4, 4, [10, 20, 30, 255]), 0, 0, 4, 4);
        surface.draw_image(&solid(4, 4, [200, 0, 0, 255]), 0, 0, 4, 4);
        assert_eq!(surface.canvas().get_pixel(1, 1).0, [200, 0, 0, 255]);
    }

    #[test]
    fn transparent_pixels_leave_the_backdrop_visible() {
        let mut surface = RasterSurface::new(2, 2);
        surface.draw_image(&solid(2, 2, [10, 20, 30, 255]), 0, 0, 2, 2);
        surface.draw_image(&solid(2, 2, [0, 0, 0, 0]), 0, 0, 2, 2);
        assert_eq!(surface.canvas().get_pixel(0, 0).0, [10, 20, 30, 255]);
    }

    #[test]
    fn clear_resets_to_transparent() {
        let mut surface = RasterSurface::new(2, 2);
        surface.draw_image(&solid(2, 2, [10, 20, 30, 255]), 0, 0, 2, 2);
        surface.clear();
        assert_eq!(surface.canvas().get_pixel(0, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn sources_scale_to_the_requested_rectangle() {
        let mut surface = RasterSurface::new(8, 8);
        surface.draw_image(&solid(2, 2, [50, 60, 70, 255]), 0, 0, 8, 8);
        assert_eq!(surface.canvas().get_pixel(7, 7).0, [50, 60, 70, 255]);
    }

    #[test]
    fn png_encoding_round_trips() {
        let mut surface = RasterSurface::new(3, 3);
        surface.draw_image(&solid(3, 3, [1, 2, 3, 255]), 0, 0, 3, 3);
        let bytes = surface.encode(ImageFormat::Png).expect("png");
        let decoded = image::load_from_memory(&bytes).expect("decode").to_rgba8();
        assert_eq!(decoded.get_pixel(0, 0).0, [1, 2, 3, 255]);
    }

    #[test]
    fn jpeg_encoding_produces_bytes() {
        let mut surface = RasterSurface::new(3, 3);
        surface.draw_image(&solid(3, 3, [1, 2, 3, 255]), 0, 0, 3, 3);
        let bytes = surface.encode(ImageFormat::Jpeg).expect("jpeg");
        assert!(!bytes.is_empty());
    }
}
