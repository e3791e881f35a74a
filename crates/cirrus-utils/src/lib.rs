//! Cirrus Utilities
//!
//! - [`batch`]: overlapping windows over a slice
//! - [`image`]: image normalization and base64 transport encoding

pub mod batch;
pub mod error;
pub mod image;

pub use batch::{Batches, make_batch};
pub use error::{UtilError, UtilResult};
pub use image::{
    Bitmap, EncodedImage, ImageInput, decode_image, decode_image_bytes, encode_image,
    image_to_bytes,
};
