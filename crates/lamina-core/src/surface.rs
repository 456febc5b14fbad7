//! Drawable surface seam between the engine and its rendering collaborator.

use crate::errors::LaminaError;

/// Output encodings supported by surface implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Lossless PNG output.
    Png,
    /// JPEG output (faster to encode, smaller files).
    Jpeg,
}

impl ImageFormat {
    /// File extension used for persisted artifacts.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
        }
    }
}

/// Rendering collaborator the composition engine paints onto.
///
/// The engine issues `clear` once per attempt and `draw_image` once per
/// accepted layer, in layer order; later calls paint over earlier ones.
/// Implementations own the canvas dimensions and are free to scale sources
/// into the requested rectangle.
pub trait Surface {
    /// Opaque drawable handle held by catalog variants and unique artworks.
    type Image;

    /// Resets the canvas to fully transparent.
    fn clear(&mut self);

    /// Paints `image` into the rectangle `(x, y, w, h)`, over existing content.
    fn draw_image(&mut self, image: &Self::Image, x: u32, y: u32, w: u32, h: u32);

    /// Encodes the current canvas into an image byte stream.
    fn encode(&mut self, format: ImageFormat) -> Result<Vec<u8>, LaminaError>;
}

/// Surface that discards all drawing, for dry runs and engine tests.
///
/// Generation against a `NullSurface` consumes exactly the same sequencer
/// values as generation against a real canvas.
#[derive(Debug, Default)]
pub struct NullSurface;

impl NullSurface {
    /// Creates a new discarding surface.
    pub fn new() -> Self {
        Self
    }
}

impl Surface for NullSurface {
    type Image = ();

    fn clear(&mut self) {}

    fn draw_image(&mut self, _image: &Self::Image, _x: u32, _y: u32, _w: u32, _h: u32) {}

    fn encode(&mut self, _format: ImageFormat) -> Result<Vec<u8>, LaminaError> {
        Ok(Vec::new())
    }
}
