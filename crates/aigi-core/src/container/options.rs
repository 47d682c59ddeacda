use flate2::Compression;

use super::error::ContainerError;

/// Encoder settings.
///
/// # Examples
/// ```
/// use aigi_core::{Compression, EncodeOptions};
///
/// let options = EncodeOptions {
///     compression: Compression::best(),
/// };
/// assert_eq!(options.compression.level(), 9);
/// assert_eq!(EncodeOptions::default().compression.level(), 6);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeOptions {
    /// zlib level applied to each PNG payload.
    pub compression: Compression,
}

/// Optional upper bounds applied to header fields while decoding.
///
/// Every bound defaults to `None` (unbounded). A bound is checked as soon as
/// its field is read, before any allocation sized by that field.
///
/// # Examples
/// ```
/// use aigi_core::DecodeLimits;
///
/// let limits = DecodeLimits {
///     max_images: Some(64),
///     ..DecodeLimits::default()
/// };
/// assert!(limits.max_metadata_len.is_none());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Maximum declared `image_count`.
    pub max_images: Option<u32>,
    /// Maximum declared `metadata_length` in bytes.
    pub max_metadata_len: Option<u32>,
    /// Maximum declared `image_length` of any single entry, in bytes.
    pub max_image_len: Option<u32>,
}

impl DecodeLimits {
    pub(crate) fn check_images(&self, value: u32) -> Result<(), ContainerError> {
        check("image_count", value, self.max_images)
    }

    pub(crate) fn check_metadata_len(&self, value: u32) -> Result<(), ContainerError> {
        check("metadata_length", value, self.max_metadata_len)
    }

    pub(crate) fn check_image_len(&self, value: u32) -> Result<(), ContainerError> {
        check("image_length", value, self.max_image_len)
    }
}

fn check(field: &'static str, value: u32, limit: Option<u32>) -> Result<(), ContainerError> {
    match limit {
        Some(limit) if value > limit => Err(ContainerError::LimitExceeded {
            field,
            value,
            limit,
        }),
        _ => Ok(()),
    }
}
