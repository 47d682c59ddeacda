use std::borrow::Cow;
use std::io::{self, Write};

use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat, RgbaImage};

use super::error::{ContainerError, EncodeError};

/// Normalize to RGBA8, PNG-encode, then zlib-compress one image.
pub fn compress_image(
    index: usize,
    image: &DynamicImage,
    compression: Compression,
) -> Result<Vec<u8>, EncodeError> {
    let rgba = to_rgba(image);
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodeError::EmptyImage {
            index,
            width,
            height,
        });
    }

    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(rgba.as_raw(), width, height, ExtendedColorType::Rgba8)
        .map_err(|source| EncodeError::Raster { index, source })?;

    let mut encoder = ZlibEncoder::new(Vec::with_capacity(png.len() / 2), compression);
    encoder
        .write_all(&png)
        .map_err(|source| EncodeError::Compression { index, source })?;
    let compressed = encoder
        .finish()
        .map_err(|source| EncodeError::Compression { index, source })?;

    log::trace!(
        "image {index}: {width}x{height}, png {} bytes, compressed {} bytes",
        png.len(),
        compressed.len()
    );
    Ok(compressed)
}

/// Inverse of [`compress_image`]; the result is always RGBA8.
pub fn decompress_image(index: usize, payload: &[u8]) -> Result<RgbaImage, ContainerError> {
    let png = inflate(payload).map_err(|source| ContainerError::Decompression { index, source })?;

    let decoded = image::load_from_memory_with_format(&png, ImageFormat::Png)
        .map_err(|source| ContainerError::ImageDecode { index, source })?;
    log::trace!(
        "image {index}: decoded {}x{} from {} bytes",
        decoded.width(),
        decoded.height(),
        payload.len()
    );
    Ok(decoded.into_rgba8())
}

/// Inflate a complete zlib stream. Input that ends before the stream's final
/// block and Adler-32 trailer is an error, not a short read.
fn inflate(payload: &[u8]) -> io::Result<Vec<u8>> {
    let mut inflater = Decompress::new(true);
    let mut out = Vec::with_capacity(payload.len().saturating_mul(2).max(64));
    loop {
        let consumed = inflater.total_in() as usize;
        let status = inflater
            .decompress_vec(&payload[consumed..], &mut out, FlushDecompress::Finish)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        match status {
            Status::StreamEnd => return Ok(out),
            Status::Ok | Status::BufError if out.len() == out.capacity() => {
                out.reserve(out.capacity());
            }
            Status::Ok | Status::BufError => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "incomplete or truncated zlib stream",
                ));
            }
        }
    }
}

fn to_rgba(image: &DynamicImage) -> Cow<'_, RgbaImage> {
    match image.as_rgba8() {
        Some(rgba) => Cow::Borrowed(rgba),
        None => Cow::Owned(image.to_rgba8()),
    }
}
