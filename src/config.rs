/*!
Fidelity policies for the CPU and the bus.

Two behaviours are not fixed by the hardware contract and are chosen when the
emulator is assembled:

- what an undocumented opcode does (`IllegalOpcodePolicy`)
- what an access to an address with no handler does (`UnmappedPolicy`)

Both are plain data, copied into the CPU and bus at construction and never
consulted globally.
*/

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Behaviour of the 105 opcode bytes the 6502 documentation leaves undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IllegalOpcodePolicy {
    /// Execute as a NOP of the table's addressing mode and base cycle count.
    #[default]
    Nop,
    /// Stop the CPU until the next reset.
    Halt,
    /// Execute the well-known unofficial semantics (LAX, DCP, SLO, ...).
    Unofficial,
}

/// Behaviour of a read or write that no handler claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnmappedPolicy {
    /// Log and panic. Surfaces decoding gaps during development.
    Strict,
    /// Reads return the last byte seen on the data bus; writes are dropped.
    OpenBus,
}

impl Default for UnmappedPolicy {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            UnmappedPolicy::Strict
        } else {
            UnmappedPolicy::OpenBus
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CpuConfig {
    pub illegal_opcodes: IllegalOpcodePolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusConfig {
    pub unmapped: UnmappedPolicy,
}

/// Complete configuration of an emulator instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    pub cpu: CpuConfig,
    pub bus: BusConfig,
}

impl Config {
    pub fn with_illegal_opcodes(mut self, policy: IllegalOpcodePolicy) -> Self {
        self.cpu.illegal_opcodes = policy;
        self
    }

    pub fn with_unmapped(mut self, policy: UnmappedPolicy) -> Self {
        self.bus.unmapped = policy;
        self
    }
}
