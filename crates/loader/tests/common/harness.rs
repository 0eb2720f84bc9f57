//! Test bench assembling a machine from mock ports.

use std::sync::{Arc, Mutex};

use guestboot_core::Machine;

use crate::common::mocks::{CpuState, MemoryState, MockMemory, MockRegistry};

/// Default guest memory size for the bench (1 MiB).
pub const BENCH_MEM_SIZE: u64 = 1024 * 1024;

/// Machine built from mocks, with handles to the observable state.
pub struct TestBench {
    pub machine: Machine,
    pub cpus: Vec<Arc<Mutex<CpuState>>>,
    pub memory: Arc<Mutex<MemoryState>>,
}

impl TestBench {
    /// Builds a bench with `cpu_count` CPUs and the default memory size.
    pub fn new(cpu_count: usize) -> Self {
        Self::with_memory(cpu_count, BENCH_MEM_SIZE)
    }

    /// Builds a bench with `cpu_count` CPUs and `mem_size` bytes of memory.
    pub fn with_memory(cpu_count: usize, mem_size: u64) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();

        let (registry, cpus) = MockRegistry::new(cpu_count);
        let (mem, memory) = MockMemory::new(mem_size);
        let machine = Machine::new(Box::new(registry), Box::new(mem));

        Self {
            machine,
            cpus,
            memory,
        }
    }

    /// Snapshot of CPU `index`'s observable state.
    pub fn cpu(&self, index: usize) -> CpuState {
        self.cpus[index].lock().unwrap().clone()
    }

    /// Number of memory writes issued so far.
    pub fn write_count(&self) -> usize {
        self.memory.lock().unwrap().writes.len()
    }

    /// Reconstructed memory contents at `addr`.
    pub fn mem_read(&self, addr: u64, len: usize) -> Vec<u8> {
        self.memory.lock().unwrap().read(addr, len)
    }
}
