pub const SIGNATURE: &[u8; 4] = b"AIGI";
pub const VERSION: u8 = 1;

pub const SIGNATURE_RANGE: std::ops::Range<usize> = 0..4;
pub const VERSION_OFFSET: usize = 4;
pub const IMAGE_COUNT_RANGE: std::ops::Range<usize> = 5..9;
pub const METADATA_LENGTH_RANGE: std::ops::Range<usize> = 9..13;
pub const METADATA_OFFSET: usize = 13;

pub const HEADER_LEN: usize = METADATA_OFFSET;
pub const LENGTH_PREFIX_LEN: usize = 4;
