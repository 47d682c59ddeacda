use image::DynamicImage;
use serde_json::Value;

use super::error::{ContainerError, EncodeError};
use super::fanout::map_indexed;
use super::layout;
use super::options::EncodeOptions;
use super::payload::compress_image;

pub fn encode(images: &[DynamicImage], metadata: &Value) -> Result<Vec<u8>, ContainerError> {
    encode_with_options(images, metadata, &EncodeOptions::default())
}

pub fn encode_with_options(
    images: &[DynamicImage],
    metadata: &Value,
    options: &EncodeOptions,
) -> Result<Vec<u8>, ContainerError> {
    let metadata_json = serde_json::to_vec(metadata).map_err(EncodeError::Metadata)?;
    let metadata_length = to_u32("metadata_length", metadata_json.len())?;
    let image_count = to_u32("image_count", images.len())?;

    let payloads = map_indexed(images, |index, image| {
        compress_image(index, image, options.compression)
    })?;

    let total = layout::HEADER_LEN
        + metadata_json.len()
        + payloads
            .iter()
            .map(|payload| layout::LENGTH_PREFIX_LEN + payload.len())
            .sum::<usize>();
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(layout::SIGNATURE);
    out.push(layout::VERSION);
    out.extend_from_slice(&image_count.to_le_bytes());
    out.extend_from_slice(&metadata_length.to_le_bytes());
    out.extend_from_slice(&metadata_json);
    for payload in &payloads {
        let image_length = to_u32("image_length", payload.len())?;
        out.extend_from_slice(&image_length.to_le_bytes());
        out.extend_from_slice(payload);
    }

    log::debug!(
        "encoded {image_count} images, {metadata_length} metadata bytes, {} bytes total",
        out.len()
    );
    Ok(out)
}

fn to_u32(field: &'static str, len: usize) -> Result<u32, EncodeError> {
    u32::try_from(len).map_err(|_| EncodeError::TooLarge { field, len })
}
