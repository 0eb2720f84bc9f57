//! Declarative reset-time guest initializer library.
//!
//! This crate constructs a virtual machine's boot state without a dedicated
//! firmware stage. A single declarative configuration selects exactly one of:
//! 1. **Image load:** Load an executable image (ELF, U-Boot image, or flat
//!    binary) into guest memory, optionally pointing a CPU at its entry point.
//! 2. **Data write:** Write a small literal data word into guest memory with
//!    explicit byte order and transaction attributes.
//! 3. **PC set:** Reset a CPU and set its program counter.
//! 4. **Register preset:** Pre-load a CPU register value alongside any of the above.
//!
//! Effects are applied atomically on every machine reset (or immediately when
//! hot-plugged into an already-running machine). The CPU, register file, and
//! guest memory are reached through narrow port traits so the crate stays
//! independent of any particular machine model.

/// Common types (transaction attributes, error taxonomy).
pub mod common;
/// Loader configuration (declarative property bag, serde-deserializable).
pub mod config;
/// Executable image format chain (ELF, U-Boot image, raw fallback).
pub mod image;
/// Guest initializer device (validation, lifecycle, reset applier).
pub mod loader;
/// Host machine abstraction (ports, reset broadcast, phase).
pub mod machine;

/// Root configuration type; build directly or deserialize from JSON.
pub use crate::config::LoaderConfig;
/// Construction-time error taxonomy.
pub use crate::common::error::RealizeError;
/// The initializer device; construct with [`GuestLoader::realize`].
pub use crate::loader::GuestLoader;
/// Host machine abstraction owning the ports and the reset broadcast.
pub use crate::machine::Machine;
