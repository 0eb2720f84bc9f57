//! Construction-time error taxonomy.
//!
//! Every way device construction can fail is enumerated here. It covers:
//! 1. **Configuration conflicts:** Mutually exclusive option groups populated together.
//! 2. **Incompleteness:** A required companion option is missing.
//! 3. **Range violations:** A value is outside its permitted range.
//! 4. **Resolution failures:** A named CPU or register does not exist.
//! 5. **Load failures:** No image loading attempt succeeded.
//!
//! All variants are surfaced synchronously from [`realize`] and abort
//! construction before any hook is registered; none are retried.
//!
//! [`realize`]: crate::loader::GuestLoader::realize

use std::io;

use thiserror::Error;

/// Errors that abort construction of a guest initializer instance.
#[derive(Debug, Error)]
pub enum RealizeError {
    /// A file was supplied alongside data-write options.
    #[error("specifying a file is not supported when loading memory values")]
    FileWithData,

    /// `force-raw` was supplied alongside data-write options.
    #[error("specifying force-raw is not supported when loading memory values")]
    ForceRawWithData,

    /// Data-write options were supplied without an explicit nonzero `data-len`.
    ///
    /// A `data` value of zero is valid, so the length is the sole signal that
    /// a data write was requested.
    #[error("both data and data-len must be specified")]
    DataLenMissing,

    /// `data-len` exceeds the 8-byte width of the data word.
    #[error("data-len cannot be greater than 8 bytes (got {0})")]
    DataLenTooLarge(u8),

    /// A program-counter set was requested without naming a CPU.
    #[error("cpu-num must be specified when setting a program counter")]
    CpuRequiredForPc,

    /// No operating mode could be derived from the configuration.
    #[error("no valid arguments supplied")]
    NoArguments,

    /// The named CPU index is not present in the machine.
    #[error("specified boot CPU#{0} is nonexistent")]
    NoSuchCpu(u32),

    /// A CPU is required (register preset with no explicit index) but the
    /// machine has none.
    #[error("no CPU available to bind")]
    NoCpuAvailable,

    /// The register specification did not parse or named an index outside `[0, 30]`.
    #[error("unsupported register: {0}")]
    UnsupportedRegister(String),

    /// Every image loading attempt, structured and raw, failed.
    #[error("cannot load specified image {path}")]
    ImageLoad {
        /// Path of the image that could not be loaded.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}
