use super::error::ContainerError;
use super::layout;

/// Sequential, bounds-checked reader over container bytes.
///
/// Every read names the field it is reading so truncation errors can report
/// both the field and the offset where the data ran out.
pub struct ContainerReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ContainerReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    pub fn require(&self, field: &'static str, needed: usize) -> Result<(), ContainerError> {
        if self.remaining() < needed {
            return Err(ContainerError::Truncated {
                field,
                offset: self.offset,
                needed,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    /// Read exactly `len` bytes, failing without advancing when short.
    ///
    /// # Examples
    /// This helper is part of an internal module, so the example is marked as
    /// text example.
    /// ```text
    /// use aigi_core::container::reader::ContainerReader;
    ///
    /// let bytes = [0xaa, 0xbb, 0xcc];
    /// let mut reader = ContainerReader::new(&bytes);
    /// assert_eq!(reader.read_slice("image_data", 2).unwrap(), &[0xaa, 0xbb]);
    /// assert!(reader.read_slice("image_data", 2).is_err());
    /// ```
    pub fn read_slice(
        &mut self,
        field: &'static str,
        len: usize,
    ) -> Result<&'a [u8], ContainerError> {
        self.require(field, len)?;
        let start = self.offset;
        self.offset += len;
        Ok(&self.bytes[start..self.offset])
    }

    /// Read a fixed header field at its layout range.
    ///
    /// Header fields are contiguous, so the cursor must already sit at
    /// `range.start`; truncation is still reported against the cursor.
    pub fn read_field(
        &mut self,
        field: &'static str,
        range: std::ops::Range<usize>,
    ) -> Result<&'a [u8], ContainerError> {
        debug_assert_eq!(self.offset, range.start, "{field} read out of layout order");
        self.read_slice(field, range.len())
    }

    pub fn read_u8_at(&mut self, field: &'static str, offset: usize) -> Result<u8, ContainerError> {
        let bytes = self.read_field(field, offset..offset + 1)?;
        Ok(bytes[0])
    }

    pub fn read_u32_le_at(
        &mut self,
        field: &'static str,
        range: std::ops::Range<usize>,
    ) -> Result<u32, ContainerError> {
        let bytes = self.read_field(field, range)?;
        Ok(u32_le(bytes))
    }

    /// Read a `u32` length prefix at the cursor.
    pub fn read_u32_le(&mut self, field: &'static str) -> Result<u32, ContainerError> {
        let bytes = self.read_slice(field, layout::LENGTH_PREFIX_LEN)?;
        Ok(u32_le(bytes))
    }

    pub fn read_signature(&mut self) -> Result<[u8; 4], ContainerError> {
        let bytes = self.read_field("signature", layout::SIGNATURE_RANGE)?;
        Ok([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}

fn u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
