/*!
state.rs - Architectural 6502 register file.

`CpuState` holds exactly the programmer-visible registers. It excludes bus
access, decode and timing; execution control (phase, pending cycles) lives in
the `Cpu` facade.

Invariants
==========
- `sp` addresses page one: the stack byte for `sp` is at $0100 | sp. Pushes
  and pulls wrap within the page.
- `pc` wraps at 16 bits.
- `status` always has UNUSED set.
*/

use crate::cpu::status::Status;

/// Stack page base.
pub const STACK_BASE: u16 = 0x0100;
/// Stack pointer after reset.
pub const RESET_SP: u8 = 0xFD;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CpuState {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: Status,
}

impl Default for CpuState {
    fn default() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: RESET_SP,
            pc: 0x0000,
            status: Status::POWER_ON,
        }
    }
}

impl CpuState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Address of the current top-of-stack slot.
    #[inline]
    pub fn stack_addr(&self) -> u16 {
        STACK_BASE | self.sp as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reset_convention() {
        let s = CpuState::new();
        assert_eq!(s.sp, 0xFD);
        assert_eq!(s.status.pack(), 0x24);
        assert_eq!(s.stack_addr(), 0x01FD);
    }
}
