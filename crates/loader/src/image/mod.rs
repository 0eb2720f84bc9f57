//! Executable image loading with multi-format fallback.
//!
//! This module orchestrates the image-loading chain used when a file is
//! configured. It provides:
//! 1. **Format Trait:** The seam behind which each structured parser lives.
//! 2. **Fallback Chain:** Fixed-priority structured attempts (ELF, then
//!    U-Boot legacy image), then a raw flat-binary load.
//! 3. **Entry Discovery:** Structured formats report an entry point that
//!    replaces the configured address; raw loads do not.
//!
//! Each structured attempt is independent: a parser that fails must not have
//! corrupted memory it wrote during the same attempt. Additional formats
//! (e.g. Intel-hex) plug in through [`FormatChain::push`].

/// ELF format backend.
pub mod elf;

/// U-Boot legacy image format backend.
pub mod uimage;

pub use elf::ElfFormat;
pub use uimage::UImageFormat;

use std::fs;

use thiserror::Error;
use tracing::debug;

use crate::common::{MemTxAttrs, RealizeError};
use crate::machine::ports::MemoryPort;

/// Why one structured format attempt was abandoned.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The bytes are not an image of this format; try the next one.
    #[error("unrecognized image")]
    Unrecognized,

    /// The bytes carry this format's signature but the image is unusable.
    #[error("malformed image: {0}")]
    Malformed(String),
}

/// Outcome of a successful image load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadedImage {
    /// Entry point discovered by a structured format; `None` for raw loads,
    /// which leave the configured address in effect.
    pub entry: Option<u64>,
    /// Number of payload bytes written into guest memory.
    pub size: u64,
}

/// One structured executable format.
pub trait ImageFormat: Send {
    /// Short format name for trace output (e.g. `"elf"`).
    fn name(&self) -> &str;

    /// Attempts to load `bytes` as this format, writing payload into `memory`.
    ///
    /// A failed attempt must leave no partial payload behind.
    ///
    /// # Arguments
    ///
    /// * `bytes` - Complete file contents.
    /// * `memory` - Guest memory to populate.
    ///
    /// # Returns
    ///
    /// The loaded image on success, or why this format does not apply.
    fn load(
        &self,
        bytes: &[u8],
        memory: &mut dyn MemoryPort,
    ) -> Result<LoadedImage, FormatError>;
}

/// Fixed-priority chain of structured formats with a raw fallback.
pub struct FormatChain {
    formats: Vec<Box<dyn ImageFormat>>,
}

impl std::fmt::Debug for FormatChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatChain")
            .field("formats", &self.formats.len())
            .finish()
    }
}

impl Default for FormatChain {
    fn default() -> Self {
        Self {
            formats: vec![Box::new(ElfFormat), Box::new(UImageFormat)],
        }
    }
}

impl FormatChain {
    /// Creates the default chain: ELF, then U-Boot legacy image.
    ///
    /// No Intel-hex backend ships in this crate; without one, hex files fall
    /// through to the raw loader and their records are written verbatim.
    /// [`FormatChain::push`] an external hex format to restore the full
    /// ELF, uImage, Intel-hex priority order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a chain with no structured formats (raw loading only).
    pub const fn raw_only() -> Self {
        Self {
            formats: Vec::new(),
        }
    }

    /// Appends a format at the lowest priority, before the raw fallback.
    ///
    /// # Arguments
    ///
    /// * `format` - The format backend to append.
    pub fn push(&mut self, format: Box<dyn ImageFormat>) {
        self.formats.push(format);
    }

    /// Loads an image file through the chain.
    ///
    /// Unless `force_raw` is set, each structured format is attempted in
    /// priority order and the first success wins. Otherwise, or when every
    /// structured attempt fails, the file is written as a flat binary at
    /// `addr`, clipped to the machine's available memory size.
    ///
    /// # Arguments
    ///
    /// * `path` - Path of the image file.
    /// * `force_raw` - Skip structured parsing entirely.
    /// * `addr` - Load address for the raw fallback.
    /// * `memory` - Guest memory to populate.
    ///
    /// # Returns
    ///
    /// The loaded image, or [`RealizeError::ImageLoad`] if even the raw load
    /// is impossible.
    ///
    /// # Errors
    ///
    /// Returns [`RealizeError::ImageLoad`] when the file cannot be read.
    pub fn load(
        &self,
        path: &str,
        force_raw: bool,
        addr: u64,
        memory: &mut dyn MemoryPort,
    ) -> Result<LoadedImage, RealizeError> {
        let bytes = fs::read(path).map_err(|source| RealizeError::ImageLoad {
            path: path.to_owned(),
            source,
        })?;

        if !force_raw {
            for format in &self.formats {
                match format.load(&bytes, memory) {
                    Ok(image) => {
                        debug!(format = format.name(), path, size = image.size, "image loaded");
                        return Ok(image);
                    }
                    Err(err) => {
                        debug!(format = format.name(), path, %err, "format attempt failed");
                    }
                }
            }
        }

        // Flat binary at the configured address, bounded by available memory.
        let limit = memory.size() as usize;
        let clipped = &bytes[..bytes.len().min(limit)];
        memory.write(addr, clipped, MemTxAttrs::default());
        debug!(path, addr, size = clipped.len(), "raw image loaded");
        Ok(LoadedImage {
            entry: None,
            size: clipped.len() as u64,
        })
    }
}
