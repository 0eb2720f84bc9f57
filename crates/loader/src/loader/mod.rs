//! The guest initializer device.
//!
//! This module ties validation, image loading, and the reset-time effect into
//! one device lifecycle. It performs:
//! 1. **Realize:** Validate the configuration, resolve the CPU binding, load
//!    any configured image, then register with the machine's reset broadcast.
//! 2. **Reset application:** On every reset (or immediately when hot-plugged)
//!    reproduce the configured guest state: PC set, register presets, data write.
//! 3. **Unrealize:** Remove the device from the reset broadcast.
//!
//! All validation failures abort realize before anything is registered; no
//! partial effect is observable.

/// Mode classification and register-spec parsing.
pub mod validate;

pub use validate::{Mode, parse_register_spec};

use tracing::{info, warn};

use crate::common::{MemTxAttrs, RealizeError};
use crate::config::LoaderConfig;
use crate::image::FormatChain;
use crate::machine::{CpuPort, CpuRegistry, HookId, Machine, MachinePhase, MemoryPort, ResetHook};

/// Number of register-preset slots (`r0` through `r30`).
const REGISTER_SLOTS: usize = validate::MAX_PRESET_REGISTER + 1;

/// Which CPU the device acts on at reset time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CpuBinding {
    /// The CPU index the user named; existence was checked at realize.
    Explicit(u32),
    /// The machine's first CPU, used when no index was given.
    First,
}

/// The guest initializer device after successful validation.
///
/// Holds only immutable derived state; the reset applier reads it and writes
/// guest CPU/memory state through the machine's ports. Re-applying from the
/// same state reproduces the same guest state, so the host may invoke it on
/// every machine reset.
#[derive(Debug)]
pub struct GuestLoader {
    /// PC value, data-write address, or discovered image entry point.
    addr: u64,
    /// Literal data word, kept pre-conversion; byte order is derived fresh
    /// on every application.
    data: u64,
    /// Number of low-order bytes of `data` to write; zero disables the write.
    data_len: u8,
    /// Byte order for the memory write. Register presets ignore it.
    data_be: bool,
    /// Whether to reset the bound CPU and set its program counter.
    set_pc: bool,
    binding: CpuBinding,
    register_defaults: [Option<u64>; REGISTER_SLOTS],
    attrs: MemTxAttrs,
}

impl GuestLoader {
    /// Validates a configuration and registers the device with the machine.
    ///
    /// Uses the default image format chain (ELF, then U-Boot legacy image,
    /// then raw). If the machine is already [`MachinePhase::Ready`] the reset
    /// effect is applied synchronously before returning, so a hot-plugged
    /// device takes effect without waiting for a reset that may never come.
    ///
    /// # Arguments
    ///
    /// * `config` - The populated option bag.
    /// * `machine` - The machine to register with.
    ///
    /// # Returns
    ///
    /// The reset-hook key; pass it to [`GuestLoader::unrealize`] to remove
    /// the device.
    ///
    /// # Errors
    ///
    /// Any [`RealizeError`]; nothing is registered on failure.
    pub fn realize(config: LoaderConfig, machine: &mut Machine) -> Result<HookId, RealizeError> {
        Self::realize_with_chain(config, &FormatChain::new(), machine)
    }

    /// Validates a configuration using a caller-supplied format chain.
    ///
    /// # Arguments
    ///
    /// * `config` - The populated option bag.
    /// * `chain` - Image format chain, e.g. extended with extra formats.
    /// * `machine` - The machine to register with.
    ///
    /// # Errors
    ///
    /// Any [`RealizeError`]; nothing is registered on failure.
    pub fn realize_with_chain(
        config: LoaderConfig,
        chain: &FormatChain,
        machine: &mut Machine,
    ) -> Result<HookId, RealizeError> {
        let mode = validate::classify(&config)?;

        let binding = match config.cpu_num {
            Some(index) => {
                if machine.cpus_mut().cpu_mut(index).is_none() {
                    return Err(RealizeError::NoSuchCpu(index));
                }
                CpuBinding::Explicit(index)
            }
            None => CpuBinding::First,
        };

        let mut register_defaults = [None; REGISTER_SLOTS];
        if let Some(spec) = &config.reg {
            // Presets are written pre-conversion; only memory writes are
            // byte-order converted.
            register_defaults[parse_register_spec(spec)?] = Some(config.data);
            if binding == CpuBinding::First && machine.cpus_mut().first_cpu_mut().is_none() {
                return Err(RealizeError::NoCpuAvailable);
            }
        }

        let attrs = config.tx_attrs();
        let loader = match mode {
            Mode::WriteData {
                addr,
                data,
                len,
                big_endian,
            } => Self {
                addr,
                data,
                data_len: len,
                data_be: big_endian,
                set_pc: false,
                binding,
                register_defaults,
                attrs,
            },
            Mode::LoadImage {
                path,
                force_raw,
                set_pc,
            } => {
                let mut addr = config.addr;
                if let Some(path) = path {
                    let image = chain.load(&path, force_raw, addr, machine.memory_mut())?;
                    info!(path = %path, size = image.size, "image loaded");
                    if let Some(entry) = image.entry {
                        // Raw loads discover no entry point; the configured
                        // address stays in effect for any PC set.
                        addr = entry;
                    }
                }
                Self {
                    addr,
                    data: config.data,
                    data_len: 0,
                    data_be: false,
                    set_pc,
                    binding,
                    register_defaults,
                    attrs,
                }
            }
            Mode::SetPc { addr, cpu } => Self {
                addr,
                data: config.data,
                data_len: 0,
                data_be: false,
                set_pc: true,
                binding: CpuBinding::Explicit(cpu),
                register_defaults,
                attrs,
            },
        };

        let hot_plug = machine.phase() == MachinePhase::Ready;
        let handle = machine.plug(Box::new(loader));
        if hot_plug {
            machine.reset_one(&handle);
        }
        Ok(handle)
    }

    /// Removes a realized device from the machine's reset broadcast.
    ///
    /// # Arguments
    ///
    /// * `machine` - The machine the device was registered with.
    /// * `handle` - Key returned from [`GuestLoader::realize`].
    pub fn unrealize(machine: &mut Machine, handle: HookId) {
        machine.unplug(handle);
    }

    /// Resolves the bound CPU against the registry.
    fn bound_cpu<'a>(&self, cpus: &'a mut dyn CpuRegistry) -> Option<&'a mut dyn CpuPort> {
        match self.binding {
            CpuBinding::Explicit(index) => cpus.cpu_mut(index),
            CpuBinding::First => cpus.first_cpu_mut(),
        }
    }
}

impl ResetHook for GuestLoader {
    fn name(&self) -> &str {
        "guest-loader"
    }

    /// Applies the configured effect.
    ///
    /// Order matters: the CPU reset must precede the PC set and the register
    /// writes so it cannot clobber them; the memory write targets a disjoint
    /// resource and goes last.
    fn on_reset(&mut self, cpus: &mut dyn CpuRegistry, memory: &mut dyn MemoryPort) {
        let needs_cpu = self.set_pc || self.register_defaults.iter().any(Option::is_some);
        if needs_cpu {
            if let Some(cpu) = self.bound_cpu(cpus) {
                if self.set_pc {
                    cpu.reset();
                    cpu.set_pc(self.addr);
                }
                for (index, preset) in self.register_defaults.iter().enumerate() {
                    if let Some(value) = preset {
                        cpu.write_register(index, *value);
                    }
                }
            } else {
                warn!(binding = ?self.binding, "bound CPU unavailable; skipping CPU effects");
            }
        }

        if self.data_len > 0 {
            let len = usize::from(self.data_len);
            let be = self.data.to_be_bytes();
            let le = self.data.to_le_bytes();
            // Low-order bytes of the word, in the configured order.
            let bytes: &[u8] = if self.data_be {
                &be[8 - len..]
            } else {
                &le[..len]
            };
            memory.write(self.addr, bytes, self.attrs);
        }
    }
}
