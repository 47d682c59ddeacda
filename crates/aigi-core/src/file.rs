//! Filesystem helpers around the codec.
//!
//! The codec itself never touches the filesystem; these functions read or
//! write a whole container file in one call.

use std::fs;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use serde_json::Value;
use thiserror::Error;

use crate::container::{decode, encode_with_options};
use crate::{Container, ContainerError, EncodeOptions};

#[derive(Debug, Error)]
pub enum FileError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Container(#[from] ContainerError),
}

/// Read and decode a container file.
///
/// # Errors
/// Returns `FileError::Io` when the file cannot be read and
/// `FileError::Container` when its content is not a valid container.
pub fn read_file(path: &Path) -> Result<Container, FileError> {
    let bytes = fs::read(path).map_err(|source| FileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("read {} bytes from {}", bytes.len(), path.display());
    Ok(decode(&bytes)?)
}

/// Encode `images` and `metadata` and write them to `path`.
///
/// Nothing is written when encoding fails.
pub fn write_file(
    path: &Path,
    images: &[DynamicImage],
    metadata: &Value,
    options: &EncodeOptions,
) -> Result<(), FileError> {
    let bytes = encode_with_options(images, metadata, options)?;
    fs::write(path, &bytes).map_err(|source| FileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
