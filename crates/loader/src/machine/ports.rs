//! Port traits for the host machine's external collaborators.
//!
//! The initializer never touches a concrete CPU or memory model; it reaches
//! them through the narrow seams defined here:
//! 1. **CPU Port:** Reset, program counter, and register writes on one CPU.
//! 2. **CPU Registry:** Lookup by index or first-available, injected by the
//!    constructing context rather than read from process-wide state.
//! 3. **Memory Port:** Raw byte writes at physical addresses with
//!    transaction attributes.
//!
//! All calls are synchronous and non-blocking at this layer; the host
//! serializes every invocation on one thread.

use crate::common::MemTxAttrs;

/// One CPU as seen by the initializer.
pub trait CpuPort: Send {
    /// Resets the CPU to its architectural initial state.
    fn reset(&mut self);

    /// Sets the program counter.
    ///
    /// # Arguments
    ///
    /// * `pc` - The address execution resumes from after reset.
    fn set_pc(&mut self, pc: u64);

    /// Writes a 64-bit value into a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-30).
    /// * `value` - The value to store.
    fn write_register(&mut self, idx: usize, value: u64);
}

/// CPU lookup capability supplied by the constructing context.
pub trait CpuRegistry: Send {
    /// Returns the CPU with the given index, or `None` if it does not exist.
    ///
    /// # Arguments
    ///
    /// * `index` - Zero-based CPU index.
    fn cpu_mut(&mut self, index: u32) -> Option<&mut dyn CpuPort>;

    /// Returns the first CPU known to the machine, or `None` if there are none.
    fn first_cpu_mut(&mut self) -> Option<&mut dyn CpuPort>;
}

/// Guest physical memory as seen by the initializer.
pub trait MemoryPort: Send {
    /// Writes raw bytes at a guest physical address.
    ///
    /// Assumed to succeed at this layer; underlying faults are the memory
    /// subsystem's concern (see the crate error model).
    ///
    /// # Arguments
    ///
    /// * `addr` - Guest physical base address of the write.
    /// * `data` - Bytes to write.
    /// * `attrs` - Transaction attributes forwarded unmodified.
    fn write(&mut self, addr: u64, data: &[u8], attrs: MemTxAttrs);

    /// Returns the total available guest memory size in bytes.
    ///
    /// Bounds raw flat-binary loads.
    fn size(&self) -> u64;
}
