//! Captured frames and the post-capture image steps.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, RgbaImage};
use tracing::debug;

use crate::error::CaptureError;

/// One decoded still image of the display.
#[derive(Clone, Debug)]
pub struct Frame {
    image: RgbaImage,
}

impl Frame {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

/// The area a frame must fit into. A zero dimension means unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub max_width: u32,
    pub max_height: u32,
}

impl Viewport {
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
        }
    }

    /// Scale factor that fits `width x height` inside the viewport, never above 1.
    pub fn scale_for(&self, width: u32, height: u32) -> f64 {
        let fit = |max: u32, actual: u32| {
            if max == 0 || actual == 0 {
                1.0
            } else {
                max as f64 / actual as f64
            }
        };
        1.0_f64
            .min(fit(self.max_width, width))
            .min(fit(self.max_height, height))
    }
}

/// Downscales `image` to fit the viewport, preserving aspect ratio.
pub fn scale_to_fit(image: RgbaImage, viewport: Viewport) -> RgbaImage {
    let (width, height) = image.dimensions();
    let scale = viewport.scale_for(width, height);
    if scale >= 1.0 {
        return image;
    }

    let target_width = ((width as f64 * scale).floor() as u32).max(1);
    let target_height = ((height as f64 * scale).floor() as u32).max(1);
    debug!(
        "Scaling frame {}x{} -> {}x{} (scale {:.3})",
        width, height, target_width, target_height, scale
    );
    image::imageops::resize(&image, target_width, target_height, FilterType::Triangle)
}

/// Encodes `image` as JPEG at `quality` and decodes it back.
pub fn jpeg_round_trip(image: &RgbaImage, quality: u8) -> Result<RgbaImage, CaptureError> {
    let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();

    let mut bytes = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
        encoder
            .encode_image(&rgb)
            .map_err(|e| CaptureError::Decode(format!("failed to encode frame: {e}")))?;
    }

    let decoded = image::load(Cursor::new(&bytes), ImageFormat::Jpeg)
        .map_err(|e| CaptureError::Decode(format!("failed to decode frame: {e}")))?;

    Ok(decoded.to_rgba8())
}
