//! ELF executable backend.
//!
//! Parses ELF images with the `object` crate and copies every allocated
//! segment into guest memory at its stated address. The ELF entry point is
//! reported back so the caller can point a CPU at it.

use object::{Object, ObjectSegment};

use crate::common::MemTxAttrs;
use crate::image::{FormatError, ImageFormat, LoadedImage};
use crate::machine::ports::MemoryPort;

/// ELF format backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct ElfFormat;

impl ImageFormat for ElfFormat {
    fn name(&self) -> &str {
        "elf"
    }

    /// Loads an ELF image.
    ///
    /// Segments are staged before any write so a malformed segment table
    /// leaves guest memory untouched.
    fn load(
        &self,
        bytes: &[u8],
        memory: &mut dyn MemoryPort,
    ) -> Result<LoadedImage, FormatError> {
        let file = object::File::parse(bytes).map_err(|_| FormatError::Unrecognized)?;

        let mut staged: Vec<(u64, &[u8])> = Vec::new();
        for segment in file.segments() {
            let data = segment
                .data()
                .map_err(|e| FormatError::Malformed(e.to_string()))?;
            if !data.is_empty() {
                staged.push((segment.address(), data));
            }
        }

        let mut size = 0u64;
        for (addr, data) in staged {
            memory.write(addr, data, MemTxAttrs::default());
            size += data.len() as u64;
        }

        Ok(LoadedImage {
            entry: Some(file.entry()),
            size,
        })
    }
}
