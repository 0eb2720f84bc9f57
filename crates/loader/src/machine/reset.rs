//! Machine-wide reset broadcast.
//!
//! This module implements the observer registration behind machine reset. It
//! provides:
//! 1. **Hook Trait:** The callback every reset-sensitive component implements.
//! 2. **Registration:** Keyed hook storage with insertion-order broadcast.
//! 3. **Targeted Dispatch:** Re-running a single hook for hot-plug.
//!
//! Hooks run synchronously on the broadcasting thread. A hook must not
//! depend on another hook's reset having already run; only the three-step
//! order inside one hook is guaranteed.

use tracing::debug;

use crate::machine::ports::{CpuRegistry, MemoryPort};

/// Callback invoked on every machine reset.
///
/// Implementations mutate only the CPU and memory state reachable through
/// the supplied ports and must produce identical guest state on repeated
/// invocation.
pub trait ResetHook: Send {
    /// Short name for trace output (e.g. `"guest-loader"`).
    fn name(&self) -> &str;

    /// Applies this hook's reset effect.
    ///
    /// # Arguments
    ///
    /// * `cpus` - CPU lookup for the machine being reset.
    /// * `memory` - Guest physical memory of the machine being reset.
    fn on_reset(&mut self, cpus: &mut dyn CpuRegistry, memory: &mut dyn MemoryPort);
}

/// Key identifying one registered hook.
///
/// Deliberately not `Copy` or `Clone`: unregistration consumes the key, so a
/// hook cannot be removed twice and a stale key cannot linger.
#[derive(Debug, PartialEq, Eq)]
pub struct HookId(u64);

/// Registered reset hooks in registration order.
#[derive(Default)]
pub struct ResetBus {
    hooks: Vec<(u64, Box<dyn ResetHook>)>,
    next_id: u64,
}

impl std::fmt::Debug for ResetBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResetBus")
            .field("hooks", &self.hooks.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl ResetBus {
    /// Creates an empty reset bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a hook; later broadcasts run it after all earlier hooks.
    ///
    /// # Arguments
    ///
    /// * `hook` - The hook to register.
    ///
    /// # Returns
    ///
    /// The key under which the hook is registered.
    pub fn register(&mut self, hook: Box<dyn ResetHook>) -> HookId {
        let id = self.next_id;
        self.next_id += 1;
        debug!(hook = hook.name(), id, "registering reset hook");
        self.hooks.push((id, hook));
        HookId(id)
    }

    /// Unregisters a hook, consuming its key.
    ///
    /// # Arguments
    ///
    /// * `id` - Key returned from [`ResetBus::register`].
    pub fn unregister(&mut self, id: HookId) {
        self.hooks.retain(|(hook_id, _)| *hook_id != id.0);
    }

    /// Runs every registered hook in registration order.
    ///
    /// # Arguments
    ///
    /// * `cpus` - CPU lookup for the machine being reset.
    /// * `memory` - Guest physical memory of the machine being reset.
    pub fn broadcast(&mut self, cpus: &mut dyn CpuRegistry, memory: &mut dyn MemoryPort) {
        for (_, hook) in &mut self.hooks {
            debug!(hook = hook.name(), "resetting");
            hook.on_reset(cpus, memory);
        }
    }

    /// Runs a single hook identified by its key.
    ///
    /// Used for hot-plug, where one freshly registered hook must take effect
    /// without a machine-wide reset.
    ///
    /// # Arguments
    ///
    /// * `id` - Key of the hook to run.
    /// * `cpus` - CPU lookup for the machine.
    /// * `memory` - Guest physical memory of the machine.
    pub fn run_one(
        &mut self,
        id: &HookId,
        cpus: &mut dyn CpuRegistry,
        memory: &mut dyn MemoryPort,
    ) {
        if let Some((_, hook)) = self.hooks.iter_mut().find(|(hook_id, _)| *hook_id == id.0) {
            hook.on_reset(cpus, memory);
        }
    }

    /// Returns the number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Returns `true` if no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}
