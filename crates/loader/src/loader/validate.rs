//! Configuration validation and mode classification.
//!
//! This module turns the flat option bag into exactly one operating mode, or
//! rejects it with a specific reason. It provides:
//! 1. **Classification:** A pure function producing a tagged [`Mode`] variant,
//!    replacing order-dependent nested conditionals.
//! 2. **Register Parsing:** The `r<N>` register-preset specification.
//!
//! Classification runs before any I/O or side effect; a rejection leaves no
//! observable state behind.

use tracing::debug;

use crate::common::RealizeError;
use crate::config::LoaderConfig;

/// Highest register index a preset may name.
pub const MAX_PRESET_REGISTER: usize = 30;

/// The single operating mode derived from a configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Write the low-order `len` bytes of `data` at `addr` on every reset.
    WriteData {
        /// Guest physical address of the write.
        addr: u64,
        /// Value to write, pre-conversion.
        data: u64,
        /// Number of low-order bytes to write (1-8).
        len: u8,
        /// Byte order the value is converted to before writing.
        big_endian: bool,
    },
    /// Load an executable image, optionally pointing a CPU at its entry.
    LoadImage {
        /// Path of the image file; `None` with `force_raw` performs no load
        /// and only the optional PC set below takes effect.
        path: Option<String>,
        /// Skip structured parsing and load as a flat binary.
        force_raw: bool,
        /// Set the bound CPU's program counter after loading. Only true when
        /// a CPU was named explicitly; structured entry discovery alone does
        /// not imply a PC set.
        set_pc: bool,
    },
    /// Reset the named CPU and set its program counter to `addr`.
    SetPc {
        /// Program counter value.
        addr: u64,
        /// Explicitly named CPU index.
        cpu: u32,
    },
}

/// Classifies a configuration into exactly one [`Mode`].
///
/// Branch priority follows the data-write, image-load, PC-set order; the
/// first candidate branch wins and any mismatch between that branch's
/// expectations and the supplied fields is a hard error.
///
/// `data_len` is the sole signal that a data write was requested; a `data`
/// value of zero is valid payload and never selects a mode by itself.
///
/// # Arguments
///
/// * `config` - The populated option bag.
///
/// # Returns
///
/// The derived mode.
///
/// # Errors
///
/// Returns the specific [`RealizeError`] for conflicting, incomplete, or
/// out-of-range options, or [`RealizeError::NoArguments`] when nothing
/// recognizable was supplied.
pub fn classify(config: &LoaderConfig) -> Result<Mode, RealizeError> {
    let mode = if config.data != 0 || config.data_len != 0 || config.data_be {
        if config.file.is_some() {
            return Err(RealizeError::FileWithData);
        }
        if config.force_raw {
            return Err(RealizeError::ForceRawWithData);
        }
        if config.data_len == 0 {
            return Err(RealizeError::DataLenMissing);
        }
        if config.data_len > 8 {
            return Err(RealizeError::DataLenTooLarge(config.data_len));
        }
        Mode::WriteData {
            addr: config.addr,
            data: config.data,
            len: config.data_len,
            big_endian: config.data_be,
        }
    } else if config.file.is_some() || config.force_raw {
        Mode::LoadImage {
            path: config.file.clone(),
            force_raw: config.force_raw,
            set_pc: config.cpu_num.is_some(),
        }
    } else if config.addr != 0 {
        let Some(cpu) = config.cpu_num else {
            return Err(RealizeError::CpuRequiredForPc);
        };
        Mode::SetPc {
            addr: config.addr,
            cpu,
        }
    } else {
        return Err(RealizeError::NoArguments);
    };

    debug!(?mode, "configuration classified");
    Ok(mode)
}

/// Parses a register-preset specification of the form `r<N>`.
///
/// # Arguments
///
/// * `spec` - The textual specification (e.g. `"r3"`).
///
/// # Returns
///
/// The register index, guaranteed to lie in `[0, MAX_PRESET_REGISTER]`.
///
/// # Errors
///
/// Returns [`RealizeError::UnsupportedRegister`] when the specification does
/// not parse or names an index outside the supported range.
pub fn parse_register_spec(spec: &str) -> Result<usize, RealizeError> {
    spec.strip_prefix('r')
        .and_then(|digits| digits.parse::<usize>().ok())
        .filter(|&index| index <= MAX_PRESET_REGISTER)
        .ok_or_else(|| RealizeError::UnsupportedRegister(spec.to_owned()))
}
