//! Mock port implementations with shared observable state.
//!
//! The machine owns its ports as boxed trait objects, so each mock keeps its
//! state behind an `Arc<Mutex<..>>` that the test also holds a handle to.

use std::sync::{Arc, Mutex};

use guestboot_core::common::MemTxAttrs;
use guestboot_core::machine::{CpuPort, CpuRegistry, MemoryPort};

/// One operation performed on a mock CPU, in issue order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CpuOp {
    Reset,
    SetPc(u64),
    WriteReg(usize, u64),
}

/// Observable state of one mock CPU.
#[derive(Clone, Debug, Default)]
pub struct CpuState {
    /// Number of times the CPU was reset.
    pub resets: u32,
    /// Current program counter.
    pub pc: u64,
    /// General-purpose register file (indices 0-30).
    pub regs: [u64; 31],
    /// Every operation in issue order, for ordering assertions.
    pub ops: Vec<CpuOp>,
}

/// Mock CPU recording resets, PC, and register writes.
pub struct MockCpu {
    state: Arc<Mutex<CpuState>>,
}

impl MockCpu {
    pub fn new() -> (Self, Arc<Mutex<CpuState>>) {
        let state = Arc::new(Mutex::new(CpuState::default()));
        (
            Self {
                state: state.clone(),
            },
            state,
        )
    }
}

impl CpuPort for MockCpu {
    /// Architectural reset: PC and registers return to zero.
    fn reset(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.resets += 1;
        state.pc = 0;
        state.regs = [0; 31];
        state.ops.push(CpuOp::Reset);
    }

    fn set_pc(&mut self, pc: u64) {
        let mut state = self.state.lock().unwrap();
        state.pc = pc;
        state.ops.push(CpuOp::SetPc(pc));
    }

    fn write_register(&mut self, idx: usize, value: u64) {
        let mut state = self.state.lock().unwrap();
        state.regs[idx] = value;
        state.ops.push(CpuOp::WriteReg(idx, value));
    }
}

/// Mock CPU registry over a fixed set of mock CPUs.
pub struct MockRegistry {
    cpus: Vec<MockCpu>,
}

impl MockRegistry {
    /// Builds a registry of `count` CPUs, returning the observable states.
    pub fn new(count: usize) -> (Self, Vec<Arc<Mutex<CpuState>>>) {
        let mut cpus = Vec::with_capacity(count);
        let mut states = Vec::with_capacity(count);
        for _ in 0..count {
            let (cpu, state) = MockCpu::new();
            cpus.push(cpu);
            states.push(state);
        }
        (Self { cpus }, states)
    }
}

impl CpuRegistry for MockRegistry {
    fn cpu_mut(&mut self, index: u32) -> Option<&mut dyn CpuPort> {
        self.cpus
            .get_mut(index as usize)
            .map(|cpu| cpu as &mut dyn CpuPort)
    }

    fn first_cpu_mut(&mut self) -> Option<&mut dyn CpuPort> {
        self.cpus.first_mut().map(|cpu| cpu as &mut dyn CpuPort)
    }
}

/// One recorded memory write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteRecord {
    pub addr: u64,
    pub data: Vec<u8>,
    pub attrs: MemTxAttrs,
}

/// Observable state of the mock memory.
#[derive(Debug, Default)]
pub struct MemoryState {
    /// Every write in issue order.
    pub writes: Vec<WriteRecord>,
}

impl MemoryState {
    /// Reconstructs `len` bytes at `addr` by replaying the write log.
    ///
    /// Unwritten bytes read as zero.
    pub fn read(&self, addr: u64, len: usize) -> Vec<u8> {
        let mut out = vec![0u8; len];
        for record in &self.writes {
            for (i, byte) in record.data.iter().enumerate() {
                let at = record.addr + i as u64;
                if at >= addr && at < addr + len as u64 {
                    out[(at - addr) as usize] = *byte;
                }
            }
        }
        out
    }
}

/// Mock guest memory recording every write with its attributes.
pub struct MockMemory {
    state: Arc<Mutex<MemoryState>>,
    size: u64,
}

impl MockMemory {
    pub fn new(size: u64) -> (Self, Arc<Mutex<MemoryState>>) {
        let state = Arc::new(Mutex::new(MemoryState::default()));
        (
            Self {
                state: state.clone(),
                size,
            },
            state,
        )
    }
}

impl MemoryPort for MockMemory {
    fn write(&mut self, addr: u64, data: &[u8], attrs: MemTxAttrs) {
        self.state.lock().unwrap().writes.push(WriteRecord {
            addr,
            data: data.to_vec(),
            attrs,
        });
    }

    fn size(&self) -> u64 {
        self.size
    }
}
