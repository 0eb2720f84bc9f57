//! Host machine abstraction.
//!
//! This module assembles the machine-level pieces the initializer cooperates
//! with. It provides:
//! 1. **Ports:** Trait seams for CPUs, the CPU registry, and guest memory.
//! 2. **Reset Broadcast:** Keyed hook registration and insertion-order dispatch.
//! 3. **Phase Tracking:** Startup vs. ready, which decides whether a freshly
//!    constructed device applies its effect immediately (hot-plug).

/// Port trait definitions for CPUs and guest memory.
pub mod ports;

/// Reset hook registration and broadcast.
pub mod reset;

pub use ports::{CpuPort, CpuRegistry, MemoryPort};
pub use reset::{HookId, ResetBus, ResetHook};

use tracing::info;

/// Lifecycle phase of the host machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MachinePhase {
    /// The machine is still being assembled; reset effects are deferred to
    /// the first reset broadcast.
    #[default]
    Startup,
    /// Startup has completed; devices constructed from here on are hot-plugs
    /// and take effect immediately.
    Ready,
}

/// Top-level machine instance containing the ports and the reset bus.
///
/// Owns the CPU registry and memory port (boxed for dynamic dispatch) and
/// the broadcast table of reset hooks. All dispatch is synchronous on the
/// calling thread.
pub struct Machine {
    cpus: Box<dyn CpuRegistry>,
    memory: Box<dyn MemoryPort>,
    reset_bus: ResetBus,
    phase: MachinePhase,
}

impl std::fmt::Debug for Machine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Machine")
            .field("reset_bus", &self.reset_bus)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl Machine {
    /// Builds a machine from its injected collaborators.
    ///
    /// # Arguments
    ///
    /// * `cpus` - CPU registry capability.
    /// * `memory` - Guest physical memory capability.
    ///
    /// # Returns
    ///
    /// A machine in the [`MachinePhase::Startup`] phase with no hooks.
    pub fn new(cpus: Box<dyn CpuRegistry>, memory: Box<dyn MemoryPort>) -> Self {
        Self {
            cpus,
            memory,
            reset_bus: ResetBus::new(),
            phase: MachinePhase::Startup,
        }
    }

    /// Returns the current lifecycle phase.
    pub const fn phase(&self) -> MachinePhase {
        self.phase
    }

    /// Marks startup as complete; subsequent device construction is hot-plug.
    pub fn mark_ready(&mut self) {
        info!("machine ready");
        self.phase = MachinePhase::Ready;
    }

    /// Registers a reset hook with the machine.
    ///
    /// # Arguments
    ///
    /// * `hook` - The hook to register.
    ///
    /// # Returns
    ///
    /// The key under which the hook is registered.
    pub fn plug(&mut self, hook: Box<dyn ResetHook>) -> HookId {
        self.reset_bus.register(hook)
    }

    /// Removes a reset hook, consuming its key.
    ///
    /// # Arguments
    ///
    /// * `id` - Key returned from [`Machine::plug`].
    pub fn unplug(&mut self, id: HookId) {
        self.reset_bus.unregister(id);
    }

    /// Broadcasts a machine-wide reset to every registered hook.
    pub fn reset(&mut self) {
        info!(hooks = self.reset_bus.len(), "machine reset");
        self.reset_bus
            .broadcast(self.cpus.as_mut(), self.memory.as_mut());
    }

    /// Runs a single hook immediately, outside any broadcast.
    ///
    /// # Arguments
    ///
    /// * `id` - Key of the hook to run.
    pub fn reset_one(&mut self, id: &HookId) {
        self.reset_bus
            .run_one(id, self.cpus.as_mut(), self.memory.as_mut());
    }

    /// Returns the CPU registry for direct access during construction.
    pub fn cpus_mut(&mut self) -> &mut dyn CpuRegistry {
        self.cpus.as_mut()
    }

    /// Returns the memory port for direct access during construction.
    pub fn memory_mut(&mut self) -> &mut dyn MemoryPort {
        self.memory.as_mut()
    }
}
