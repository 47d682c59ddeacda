use serde_json::Value;

use super::error::ContainerError;
use super::fanout::map_indexed;
use super::options::DecodeLimits;
use super::parser::parse_frame;
use super::payload::decompress_image;
use crate::{Container, ContainerInfo, EntryInfo};

pub fn decode(bytes: &[u8]) -> Result<Container, ContainerError> {
    decode_with_limits(bytes, &DecodeLimits::default())
}

pub fn decode_with_limits(bytes: &[u8], limits: &DecodeLimits) -> Result<Container, ContainerError> {
    let frame = parse_frame(bytes, limits)?;
    let metadata: Value = serde_json::from_slice(frame.metadata)
        .map_err(|source| ContainerError::MetadataDecode { source })?;
    let images = map_indexed(&frame.entries, |index, entry| {
        decompress_image(index, entry.payload)
    })?;
    Ok(Container { images, metadata })
}

pub fn inspect(bytes: &[u8]) -> Result<ContainerInfo, ContainerError> {
    inspect_with_limits(bytes, &DecodeLimits::default())
}

pub fn inspect_with_limits(
    bytes: &[u8],
    limits: &DecodeLimits,
) -> Result<ContainerInfo, ContainerError> {
    let frame = parse_frame(bytes, limits)?;
    let entries = frame
        .entries
        .iter()
        .map(|entry| EntryInfo {
            offset: entry.offset as u64,
            length: entry.payload.len() as u32,
        })
        .collect::<Vec<_>>();
    Ok(ContainerInfo {
        version: frame.version,
        image_count: entries.len() as u32,
        metadata_length: frame.metadata.len() as u32,
        entries,
        trailing_bytes: frame.trailing as u64,
    })
}
