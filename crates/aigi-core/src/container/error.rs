use thiserror::Error;

/// Errors returned by container encoding, decoding, and inspection.
///
/// Framing errors carry the field name and byte offset; per-image errors
/// carry the zero-based entry index.
///
/// # Examples
/// ```
/// use aigi_core::ContainerError;
///
/// let err = ContainerError::UnsupportedVersion { version: 2 };
/// assert!(err.to_string().contains("unsupported container version"));
/// ```
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("invalid signature: expected \"AIGI\", found {found:02x?}")]
    InvalidSignature { found: [u8; 4] },
    #[error("unsupported container version: {version}")]
    UnsupportedVersion { version: u8 },
    #[error("truncated {field} at offset {offset}: need {needed} bytes, got {available}")]
    Truncated {
        field: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("{field} exceeds limit: {value} > {limit}")]
    LimitExceeded {
        field: &'static str,
        value: u32,
        limit: u32,
    },
    #[error("metadata is not valid UTF-8 JSON: {source}")]
    MetadataDecode {
        #[source]
        source: serde_json::Error,
    },
    #[error("image {index}: decompression failed: {source}")]
    Decompression {
        index: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("image {index}: invalid raster data: {source}")]
    ImageDecode {
        index: usize,
        #[source]
        source: image::ImageError,
    },
    #[error("encode failed: {0}")]
    Encode(#[from] EncodeError),
}

/// Errors raised while building a container.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("metadata serialization failed: {0}")]
    Metadata(#[source] serde_json::Error),
    #[error("image {index} has zero area ({width}x{height})")]
    EmptyImage {
        index: usize,
        width: u32,
        height: u32,
    },
    #[error("image {index}: raster encoding failed: {source}")]
    Raster {
        index: usize,
        #[source]
        source: image::ImageError,
    },
    #[error("image {index}: compression failed: {source}")]
    Compression {
        index: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("{field} does not fit in u32: {len}")]
    TooLarge { field: &'static str, len: usize },
}
