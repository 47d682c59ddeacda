use super::error::ContainerError;
use super::layout;
use super::options::DecodeLimits;
use super::reader::ContainerReader;

/// Container framing: every field located, nothing decoded.
#[derive(Debug)]
pub struct Frame<'a> {
    pub version: u8,
    pub metadata: &'a [u8],
    pub entries: Vec<Entry<'a>>,
    pub trailing: usize,
}

#[derive(Debug)]
pub struct Entry<'a> {
    /// Offset of the first payload byte (after the length prefix).
    pub offset: usize,
    pub payload: &'a [u8],
}

pub fn parse_frame<'a>(bytes: &'a [u8], limits: &DecodeLimits) -> Result<Frame<'a>, ContainerError> {
    let mut reader = ContainerReader::new(bytes);

    let signature = reader.read_signature()?;
    if &signature != layout::SIGNATURE {
        return Err(ContainerError::InvalidSignature { found: signature });
    }

    let version = reader.read_u8_at("version", layout::VERSION_OFFSET)?;
    if version != layout::VERSION {
        return Err(ContainerError::UnsupportedVersion { version });
    }

    let image_count = reader.read_u32_le_at("image_count", layout::IMAGE_COUNT_RANGE)?;
    limits.check_images(image_count)?;
    let metadata_length =
        reader.read_u32_le_at("metadata_length", layout::METADATA_LENGTH_RANGE)?;
    limits.check_metadata_len(metadata_length)?;
    let metadata_end = layout::METADATA_OFFSET.saturating_add(metadata_length as usize);
    let metadata = reader.read_field("metadata", layout::METADATA_OFFSET..metadata_end)?;
    log::debug!("container v{version}: {image_count} images, {metadata_length} metadata bytes");

    // A declared count larger than the remaining bytes can hold is caught as
    // truncation below; never reserve more than that.
    let capacity = (image_count as usize).min(reader.remaining() / layout::LENGTH_PREFIX_LEN);
    let mut entries = Vec::with_capacity(capacity);
    for index in 0..image_count {
        let image_length = reader.read_u32_le("image_length")?;
        limits.check_image_len(image_length)?;
        let offset = reader.offset();
        let payload = reader.read_slice("image_data", image_length as usize)?;
        log::trace!("entry {index}: {image_length} bytes at offset {offset}");
        entries.push(Entry { offset, payload });
    }

    let trailing = reader.remaining();
    if trailing > 0 {
        log::warn!("ignoring {trailing} trailing bytes after the last image entry");
    }

    Ok(Frame {
        version,
        metadata,
        entries,
        trailing,
    })
}
