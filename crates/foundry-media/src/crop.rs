//! Avatar crop rasterizer.
//!
//! A deterministic affine compositor: the source image is panned and
//! uniformly scaled over a fixed-size square canvas, flattened onto an
//! opaque white background, and encoded as JPEG at a fixed quality.
//! Identical inputs produce byte-identical output.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use foundry_core::error::{FoundryError, Result};

/// Side length of the avatar canvas used by the profile editor.
pub const DEFAULT_OUTPUT_SIZE: u32 = 250;
/// Inclusive zoom bounds exposed by the editor's slider.
pub const MIN_SCALE: f32 = 0.5;
pub const MAX_SCALE: f32 = 3.0;

const JPEG_QUALITY: u8 = 90;

/// Pixel offset of the image center from the canvas center.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PanOffset {
    pub x: f32,
    pub y: f32,
}

/// Placement of the source image on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropParams {
    pub pan: PanOffset,
    pub scale: f32,
    pub output_size: u32,
}

impl Default for CropParams {
    fn default() -> Self {
        Self {
            pan: PanOffset::default(),
            scale: 1.0,
            output_size: DEFAULT_OUTPUT_SIZE,
        }
    }
}

/// Decodes any supported raster format handed over by the file-selection
/// boundary.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(|err| FoundryError::image(err.to_string()))
}

/// Renders the crop: white square canvas, source image centered on its
/// natural bounding box, translated by `pan` and scaled by `scale`.
///
/// `scale` must already lie inside `[MIN_SCALE, MAX_SCALE]`; the editor
/// clamps its slider to that interval, and a value outside it is an
/// invalid parameter here.
pub fn rasterize(source: &DynamicImage, params: &CropParams) -> Result<Vec<u8>> {
    if !(MIN_SCALE..=MAX_SCALE).contains(&params.scale) {
        return Err(FoundryError::invalid_parameter(format!(
            "scale {} outside [{MIN_SCALE}, {MAX_SCALE}]",
            params.scale
        )));
    }
    if params.output_size == 0 {
        return Err(FoundryError::invalid_parameter("output size is zero"));
    }

    let src = source.to_rgba8();
    let (src_width, src_height) = src.dimensions();
    let half = params.output_size as f32 / 2.0;

    let mut canvas = RgbImage::from_pixel(params.output_size, params.output_size, Rgb([255, 255, 255]));
    for (dst_x, dst_y, pixel) in canvas.enumerate_pixels_mut() {
        // invert the canvas transform to find the source sample
        let src_x = (dst_x as f32 - (half + params.pan.x)) / params.scale + src_width as f32 / 2.0;
        let src_y = (dst_y as f32 - (half + params.pan.y)) / params.scale + src_height as f32 / 2.0;
        if src_x < 0.0 || src_y < 0.0 || src_x >= src_width as f32 || src_y >= src_height as f32 {
            continue;
        }

        let sample = src.get_pixel(src_x as u32, src_y as u32);
        let alpha = u16::from(sample[3]);
        let blend = |channel: u8| -> u8 {
            (((u16::from(channel) * alpha) + (255 * (255 - alpha))) / 255) as u8
        };
        *pixel = Rgb([blend(sample[0]), blend(sample[1]), blend(sample[2])]);
    }

    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY);
    encoder
        .encode_image(&DynamicImage::ImageRgb8(canvas))
        .map_err(|err| FoundryError::image(err.to_string()))?;
    Ok(bytes)
}
