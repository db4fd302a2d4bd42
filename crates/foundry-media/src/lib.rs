//! Media layer: the avatar crop rasterizer.

pub mod crop;

pub use crop::{CropParams, DEFAULT_OUTPUT_SIZE, MAX_SCALE, MIN_SCALE, PanOffset, decode, rasterize};
