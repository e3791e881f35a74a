//! Image normalization and base64 transport encoding
//!
//! Three input representations are accepted: a decoded bitmap that remembers
//! its format, a row-major `u8` pixel array, and an already encoded byte
//! buffer. All of them normalize to encoded bytes before base64.

use crate::error::{UtilError, UtilResult};
use ::image::{DynamicImage, GrayAlphaImage, GrayImage, ImageFormat, RgbImage, RgbaImage};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use ndarray::ArrayD;
use std::io::Cursor;
use tracing::debug;

/// A decoded image plus the format it was recorded in
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    pub image: DynamicImage,
    pub format: Option<ImageFormat>,
}

impl Bitmap {
    /// Bitmap serialized as `format`
    pub fn new(image: DynamicImage, format: ImageFormat) -> Self {
        Self {
            image,
            format: Some(format),
        }
    }

    /// Bitmap with a format given by name (`"PNG"`, `"jpeg"`, ...)
    pub fn with_format_name(image: DynamicImage, name: &str) -> UtilResult<Self> {
        let format = ImageFormat::from_extension(name.to_ascii_lowercase())
            .ok_or_else(|| UtilError::config(format!("Unknown image format '{}'", name)))?;
        Ok(Self::new(image, format))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Image in any of the accepted representations
#[derive(Debug, Clone, PartialEq)]
pub enum ImageInput {
    /// Decoded bitmap, serialized in its recorded format
    Bitmap(Bitmap),
    /// Pixel array of shape `(H, W)` or `(H, W, C)` with C in 1..=4
    Array(ArrayD<u8>),
    /// Already encoded image bytes
    Bytes(Vec<u8>),
}

impl ImageInput {
    fn kind(&self) -> &'static str {
        match self {
            ImageInput::Bitmap(_) => "bitmap",
            ImageInput::Array(_) => "array",
            ImageInput::Bytes(_) => "bytes",
        }
    }
}

impl From<Bitmap> for ImageInput {
    fn from(bitmap: Bitmap) -> Self {
        ImageInput::Bitmap(bitmap)
    }
}

impl From<ArrayD<u8>> for ImageInput {
    fn from(array: ArrayD<u8>) -> Self {
        ImageInput::Array(array)
    }
}

impl From<Vec<u8>> for ImageInput {
    fn from(bytes: Vec<u8>) -> Self {
        ImageInput::Bytes(bytes)
    }
}

/// Base64 payload as text or as raw ASCII bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedImage {
    Text(String),
    Bytes(Vec<u8>),
}

impl EncodedImage {
    /// The payload bytes, whichever the representation
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            EncodedImage::Text(text) => text.as_bytes(),
            EncodedImage::Bytes(bytes) => bytes,
        }
    }

    /// The payload as text
    pub fn into_text(self) -> UtilResult<String> {
        match self {
            EncodedImage::Text(text) => Ok(text),
            EncodedImage::Bytes(bytes) => Ok(String::from_utf8(bytes)?),
        }
    }
}

/// Normalize an image to encoded bytes
pub fn image_to_bytes(image: &ImageInput) -> UtilResult<Vec<u8>> {
    match image {
        ImageInput::Bitmap(bitmap) => bitmap_to_bytes(bitmap, image.kind()),
        ImageInput::Array(array) => {
            let bitmap = Bitmap::new(array_to_image(array)?, ImageFormat::Png);
            bitmap_to_bytes(&bitmap, image.kind())
        }
        ImageInput::Bytes(bytes) => Ok(bytes.clone()),
    }
}

fn bitmap_to_bytes(bitmap: &Bitmap, kind: &str) -> UtilResult<Vec<u8>> {
    let format = bitmap.format.ok_or_else(|| {
        UtilError::config(format!(
            "Image of kind '{}' has no recorded format to serialize with",
            kind
        ))
    })?;

    debug!(
        "Serializing {}x{} {} as {}",
        bitmap.width(),
        bitmap.height(),
        kind,
        format.extensions_str().first().copied().unwrap_or("unknown")
    );

    let mut buffer = Cursor::new(Vec::new());
    bitmap.image.write_to(&mut buffer, format)?;
    Ok(buffer.into_inner())
}

fn array_to_image(array: &ArrayD<u8>) -> UtilResult<DynamicImage> {
    let unsupported = || {
        UtilError::config(format!(
            "Image of kind 'array' with shape {:?} is not supported; expected (H, W) or (H, W, C) with C in 1..=4",
            array.shape()
        ))
    };

    let (height, width, channels) = match *array.shape() {
        [h, w] => (h, w, 1),
        [h, w, c] if (1..=4).contains(&c) => (h, w, c),
        _ => return Err(unsupported()),
    };
    let width = u32::try_from(width).map_err(|_| unsupported())?;
    let height = u32::try_from(height).map_err(|_| unsupported())?;

    // iter() walks in logical (row-major) order regardless of memory layout
    let pixels: Vec<u8> = array.iter().copied().collect();

    let image = match channels {
        1 => GrayImage::from_raw(width, height, pixels).map(DynamicImage::ImageLuma8),
        2 => GrayAlphaImage::from_raw(width, height, pixels).map(DynamicImage::ImageLumaA8),
        3 => RgbImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgb8),
        _ => RgbaImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgba8),
    };
    image.ok_or_else(unsupported)
}

/// Base64-encode an image; `as_utf8` selects text over raw bytes
pub fn encode_image(image: &ImageInput, as_utf8: bool) -> UtilResult<EncodedImage> {
    let encoded = STANDARD.encode(image_to_bytes(image)?);
    if as_utf8 {
        Ok(EncodedImage::Text(encoded))
    } else {
        Ok(EncodedImage::Bytes(encoded.into_bytes()))
    }
}

/// Decode a base64 payload back into the encoded image bytes.
///
/// With `as_utf8` the payload must be text; otherwise either form is accepted.
pub fn decode_image_bytes(encoded: &EncodedImage, as_utf8: bool) -> UtilResult<Vec<u8>> {
    if as_utf8 && !matches!(encoded, EncodedImage::Text(_)) {
        return Err(UtilError::config(
            "Expected a text payload when decoding with as_utf8",
        ));
    }
    Ok(STANDARD.decode(encoded.as_bytes())?)
}

/// Decode a base64 payload into a bitmap, guessing its format from the bytes
pub fn decode_image(encoded: &EncodedImage, as_utf8: bool) -> UtilResult<Bitmap> {
    let bytes = decode_image_bytes(encoded, as_utf8)?;
    let format = ::image::guess_format(&bytes).ok();
    let image = ::image::load_from_memory(&bytes)?;
    Ok(Bitmap { image, format })
}
