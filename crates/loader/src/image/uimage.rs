//! U-Boot legacy image backend.
//!
//! Parses the fixed 64-byte big-endian uImage header and copies the payload
//! to the header's load address. The header's entry-point field is reported
//! back so the caller can point a CPU at it.

use crate::common::MemTxAttrs;
use crate::image::{FormatError, ImageFormat, LoadedImage};
use crate::machine::ports::MemoryPort;

/// uImage magic number (`ih_magic`), big-endian on the wire.
const UIMAGE_MAGIC: u32 = 0x2705_1956;

/// Size of the legacy uImage header in bytes.
const HEADER_LEN: usize = 64;

/// U-Boot legacy image format backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct UImageFormat;

/// Reads a big-endian `u32` header field at `offset`.
fn field_be32(bytes: &[u8], offset: usize) -> Option<u32> {
    let raw: [u8; 4] = bytes.get(offset..offset + 4)?.try_into().ok()?;
    Some(u32::from_be_bytes(raw))
}

impl ImageFormat for UImageFormat {
    fn name(&self) -> &str {
        "uimage"
    }

    fn load(
        &self,
        bytes: &[u8],
        memory: &mut dyn MemoryPort,
    ) -> Result<LoadedImage, FormatError> {
        if field_be32(bytes, 0) != Some(UIMAGE_MAGIC) {
            return Err(FormatError::Unrecognized);
        }

        // Header layout: ih_size @ 12, ih_load @ 16, ih_ep @ 20.
        let size = field_be32(bytes, 12)
            .ok_or_else(|| FormatError::Malformed("truncated header".into()))?
            as usize;
        let load = field_be32(bytes, 16)
            .ok_or_else(|| FormatError::Malformed("truncated header".into()))?;
        let entry = field_be32(bytes, 20)
            .ok_or_else(|| FormatError::Malformed("truncated header".into()))?;

        // ih_size is untrusted; the addition must not wrap on 32-bit targets.
        let payload = size
            .checked_add(HEADER_LEN)
            .and_then(|end| bytes.get(HEADER_LEN..end))
            .ok_or_else(|| FormatError::Malformed("payload shorter than ih_size".into()))?;

        memory.write(u64::from(load), payload, MemTxAttrs::default());

        Ok(LoadedImage {
            entry: Some(u64::from(entry)),
            size: payload.len() as u64,
        })
    }
}
