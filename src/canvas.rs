//! Pixel surfaces and the plotters drawing context over them.
//!
//! Each surface owns a packed RGB image. The field raster writes pixels
//! directly; everything else (curves, guides, markers, arrows and text) is
//! drawn through a [`BitMapBackend`] borrowed over the same bytes, so every
//! surface is exactly what ends up on screen or in an exported PNG.

use anyhow::Result;
use image::{Rgb, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use std::sync::Once;


/// Drawing area covering a whole [`PixelBuffer`], in pixel coordinates.
pub type DrawingSurface<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

static FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");
static REGISTER_FONT: Once = Once::new();

/// Makes the embedded face available as plotters' `sans-serif` family.
fn register_fonts() {
    REGISTER_FONT.call_once(|| {
        if plotters::style::register_font("sans-serif", FontStyle::Normal, FONT).is_err() {
            tracing::warn!("embedded font could not be parsed, labels will be missing");
        }
    });
}

/// Plotters colour for one of the `[r, g, b]` palette constants.
pub fn rgb([r, g, b]: [u8; 3]) -> RGBColor {
    RGBColor(r, g, b)
}

/// Dense RGB surface.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    image: RgbImage,
}

impl PixelBuffer {
    /// Creates a surface filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.image.get_pixel(x, y)
    }

    /// Raw RGB bytes in row-major order.
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Opaque RGBA copy, for hosts that upload four channels.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.image
            .pixels()
            .flat_map(|Rgb([r, g, b])| [*r, *g, *b, 255])
            .collect()
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        self.image.save(path)
    }

    /// Writes one pixel. Panics outside the surface, so callers iterate
    /// inside it.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Rgb<u8>) {
        self.image.put_pixel(x, y, color);
    }

    /// Copies `src` with its top-left corner at `(x, y)`, clipped to this
    /// surface.
    pub fn blit(&mut self, src: &PixelBuffer, x: i32, y: i32) {
        image::imageops::replace(&mut self.image, &src.image, x as i64, y as i64);
    }

    /// Runs `paint` against a plotters drawing area over this surface.
    ///
    /// A failed draw is logged and leaves whatever was painted so far.
    pub fn draw<F>(&mut self, paint: F)
    where
        F: FnOnce(&DrawingSurface<'_>) -> Result<()>,
    {
        register_fonts();
        let size = self.image.dimensions();
        let root = BitMapBackend::with_buffer(&mut self.image, size).into_drawing_area();
        let result = paint(&root).and_then(|()| Ok(root.present()?));
        if let Err(err) = result {
            tracing::warn!("drawing failed: {err:#}");
        }
    }
}
