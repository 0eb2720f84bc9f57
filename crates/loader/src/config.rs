//! Declarative configuration for the guest initializer.
//!
//! This module defines the flat property bag that selects what happens at
//! machine reset. It provides:
//! 1. **Options:** Load address, literal data word, byte order, CPU binding,
//!    image path, register preset, and transaction attributes.
//! 2. **Deserialization:** Kebab-case external names (`data-len`, `cpu-num`,
//!    `force-raw`, ...) for JSON-supplied configuration.
//!
//! How the options are assembled (CLI flags, config file, script) is an
//! external concern; this crate only validates and acts on the result.

use serde::Deserialize;

use crate::common::MemTxAttrs;

/// Configuration property bag for one guest initializer instance.
///
/// Exactly one operating mode must be derivable from the populated fields;
/// [`GuestLoader::realize`](crate::GuestLoader::realize) rejects anything
/// ambiguous or incomplete. An unset `cpu_num` means "bind the first CPU"
/// where a CPU is needed at all.
///
/// Deserializing from JSON:
///
/// ```
/// use guestboot_core::LoaderConfig;
///
/// let json = r#"{
///     "file": "kernel.bin",
///     "force-raw": true,
///     "cpu-num": 0,
///     "addr": 4096
/// }"#;
///
/// let config: LoaderConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.file.as_deref(), Some("kernel.bin"));
/// assert!(config.force_raw);
/// assert_eq!(config.cpu_num, Some(0));
/// assert_eq!(config.addr, 0x1000);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LoaderConfig {
    /// Load address, program counter value, or data-write address,
    /// depending on the derived mode.
    pub addr: u64,

    /// Literal value to write into memory or preset into a register,
    /// in host-native form before any byte-order conversion.
    pub data: u64,

    /// Number of low-order bytes of `data` to write (1-8).
    ///
    /// Zero disables the data-write mode entirely; `data` alone never
    /// selects it, since zero is a valid value to write.
    pub data_len: u8,

    /// Convert `data` to big-endian (true) or little-endian (false)
    /// before the memory write. Register presets are unaffected.
    pub data_be: bool,

    /// Index of the CPU to bind; `None` binds the machine's first CPU.
    pub cpu_num: Option<u32>,

    /// Skip structured image parsing and load the file as a flat binary.
    pub force_raw: bool,

    /// Register to preset with `data`, in the textual form `r<N>` with
    /// `N` in `[0, 30]`.
    pub reg: Option<String>,

    /// Path of the executable image to load.
    pub file: Option<String>,

    /// Requester identity carried on the data-write transaction.
    #[serde(rename = "attrs-requester-id")]
    pub attrs_requester_id: u16,

    /// Mark the data-write transaction as a debugger access.
    #[serde(rename = "attrs-debug")]
    pub attrs_debug: bool,

    /// Mark the data-write transaction as a secure-world access.
    #[serde(rename = "attrs-secure")]
    pub attrs_secure: bool,
}

impl LoaderConfig {
    /// Assembles the memory transaction attributes from the `attrs-*` options.
    ///
    /// Any attribute state beyond the three configurable ones is cleared by
    /// construction.
    ///
    /// # Returns
    ///
    /// The sanitized attribute set for the data-write transaction.
    pub const fn tx_attrs(&self) -> MemTxAttrs {
        MemTxAttrs::new(self.attrs_requester_id, self.attrs_debug, self.attrs_secure)
    }
}
