//! Rasterize SVG patterns with resvg.

use std::path::Path;

use image::{ImageFormat, RgbaImage};
use thiserror::Error;
use tiny_skia::Pixmap;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to parse SVG: {0}")]
    Svg(#[from] usvg::Error),

    #[error("could not create a {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },

    #[error("failed to write PNG: {0}")]
    Image(#[from] image::ImageError),
}

/// Render an SVG document onto a white `width` x `height` canvas.
///
/// The document's viewBox is expected to match the canvas, so no scaling
/// is applied.
pub fn rasterize(svg: &str, width: u32, height: u32) -> Result<RgbaImage, RenderError> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &options)?;

    let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::Pixmap { width, height })?;
    pixmap.fill(tiny_skia::Color::WHITE);

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    // Pixmap data is premultiplied, but on an opaque background every
    // alpha is 255 so the bytes are plain RGBA.
    RgbaImage::from_raw(width, height, pixmap.take()).ok_or(RenderError::Pixmap { width, height })
}

/// Rasterize and save as PNG.
pub fn write_png(svg: &str, width: u32, height: u32, path: &Path) -> Result<(), RenderError> {
    let image = rasterize(svg, width, height)?;
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
