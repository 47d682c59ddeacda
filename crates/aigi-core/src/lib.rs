//! AIGI core library: a container bundling raster images with JSON metadata.
//!
//! A container holds an ordered sequence of images and one metadata value.
//! Each image is normalized to RGBA8, encoded as PNG, and compressed with
//! zlib on its own; entries are length-prefixed so the framing can be walked
//! without decoding any payload. Encoding and decoding are pure transforms
//! over byte buffers; file access is isolated in `file`.
//!
//! Invariants:
//! - Decoded images come back in the order they were encoded.
//! - The declared image count equals the number of entries present.
//! - Every declared length is checked against the remaining bytes before use.
//! - Only container version 1 is accepted.
//!
//! Version française (résumé):
//! Cette crate fournit le codec du conteneur AIGI : images RGBA8 encodées en
//! PNG puis compressées (zlib) individuellement, plus un bloc JSON de
//! métadonnées. Ordre des images garanti, longueurs vérifiées avant lecture,
//! seule la version 1 est acceptée. Les E/S restent dans `file`.
//!
//! # Examples
//! ```
//! use aigi_core::{decode, encode};
//! use image::{DynamicImage, Rgba, RgbaImage};
//! use serde_json::json;
//!
//! let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255])));
//! let bytes = encode(&[image], &json!({"title": "red"}))?;
//!
//! let container = decode(&bytes)?;
//! assert_eq!(container.images.len(), 1);
//! assert_eq!(container.metadata["title"], "red");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use image::RgbaImage;
use serde::Serialize;
use serde_json::Value;

mod container;
mod file;

pub use container::error::{ContainerError, EncodeError};
pub use container::layout;
pub use container::options::{DecodeLimits, EncodeOptions};
pub use container::{
    decode, decode_with_limits, encode, encode_with_options, inspect, inspect_with_limits,
};
pub use file::{FileError, read_file, write_file};
pub use flate2::Compression;

/// Decoded container content.
///
/// # Examples
/// ```
/// use aigi_core::{Container, empty_metadata};
///
/// let container = Container {
///     images: Vec::new(),
///     metadata: empty_metadata(),
/// };
/// assert!(container.metadata.as_object().is_some_and(|map| map.is_empty()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    /// Images in entry order, always RGBA8.
    pub images: Vec<RgbaImage>,
    /// Metadata exactly as parsed from the container.
    pub metadata: Value,
}

/// Framing summary of a container, produced without decoding payloads.
///
/// # Examples
/// ```
/// use aigi_core::{encode, empty_metadata, inspect};
///
/// let bytes = encode(&[], &empty_metadata())?;
/// let info = inspect(&bytes)?;
/// assert_eq!(info.image_count, 0);
/// assert_eq!(info.metadata_length, 2);
/// # Ok::<(), aigi_core::ContainerError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerInfo {
    /// Container format version.
    pub version: u8,
    /// Number of image entries.
    pub image_count: u32,
    /// Metadata length in bytes.
    pub metadata_length: u32,
    /// Entries in stored order.
    pub entries: Vec<EntryInfo>,
    /// Bytes present after the last entry (ignored by the decoder).
    pub trailing_bytes: u64,
}

/// Location of one compressed image payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntryInfo {
    /// Offset of the first payload byte in the container.
    pub offset: u64,
    /// Payload length in bytes.
    pub length: u32,
}

/// Metadata used when none is supplied: an empty JSON object.
pub fn empty_metadata() -> Value {
    Value::Object(serde_json::Map::new())
}
