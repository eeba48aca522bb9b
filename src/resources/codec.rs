//! Texture decoding
//!
//! Turning a file into pixels is delegated to a [`TextureCodec`]. The default
//! [`ImageCodec`] uses the `image` crate and always produces RGBA8.

use crate::backend::ImageFormat;
use image::{DynamicImage, GenericImageView};
use std::path::Path;
use thiserror::Error;

/// Codec failure
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode error: {0}")]
    Image(#[from] image::ImageError),
    #[error("unsupported texture: {0}")]
    Unsupported(String),
}

/// Decoded pixels ready for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTexture {
    pub width: u32,
    pub height: u32,
    pub layers: u32,
    pub format: ImageFormat,
    pub pixels: Vec<u8>,
}

impl DecodedTexture {
    /// Convert a decoded image to tightly packed RGBA8
    pub fn from_image(img: DynamicImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            layers: 1,
            format: ImageFormat::R8G8B8A8Unorm,
            pixels: img.to_rgba8().into_raw(),
        }
    }

    /// A 1x1 texture of a single color
    pub fn solid_color(color: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            layers: 1,
            format: ImageFormat::R8G8B8A8Unorm,
            pixels: color.to_vec(),
        }
    }

    /// A `size`x`size` checkerboard with 8 pixel cells
    pub fn checkerboard(size: u32, color1: [u8; 4], color2: [u8; 4]) -> Self {
        let mut pixels = Vec::with_capacity(size as usize * size as usize * 4);

        for y in 0..size {
            for x in 0..size {
                let is_even = ((x / 8) + (y / 8)) % 2 == 0;
                let color = if is_even { color1 } else { color2 };
                pixels.extend_from_slice(&color);
            }
        }

        Self {
            width: size,
            height: size,
            layers: 1,
            format: ImageFormat::R8G8B8A8Unorm,
            pixels,
        }
    }
}

/// Decodes texture files
pub trait TextureCodec: Send + Sync {
    fn decode(&self, path: &Path) -> Result<DecodedTexture, CodecError>;
}

/// Codec backed by the `image` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCodec;

impl TextureCodec for ImageCodec {
    fn decode(&self, path: &Path) -> Result<DecodedTexture, CodecError> {
        let img = image::open(path)?;
        let decoded = DecodedTexture::from_image(img);
        if decoded.width == 0 || decoded.height == 0 {
            return Err(CodecError::Unsupported(format!(
                "'{}' has zero extent",
                path.display()
            )));
        }
        Ok(decoded)
    }
}
