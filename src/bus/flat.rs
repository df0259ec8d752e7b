/*!
A flat 64 KiB address space.

No decoding, no mirroring, no peripherals: every address is a plain byte of
RAM. Functional-test ROMs for the bare 6502 assume exactly this layout, and
CPU tests use it to place operands where the NES map would put registers
(e.g. an indirect pointer at $30FF).
*/

use crate::bus::interfaces::CpuBus;
use crate::bus::interrupts::InterruptLines;

pub struct FlatMemory {
    data: Box<[u8; 0x10000]>,
    interrupts: InterruptLines,
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl FlatMemory {
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 0x10000]),
            interrupts: InterruptLines::new(),
        }
    }

    /// Copy `bytes` into memory starting at `origin` (wrapping at $FFFF).
    pub fn load(&mut self, origin: u16, bytes: &[u8]) {
        for (i, &b) in bytes.iter().enumerate() {
            self.data[origin.wrapping_add(i as u16) as usize] = b;
        }
    }

    /// Write a little-endian word (used for vectors).
    pub fn set_word(&mut self, addr: u16, value: u16) {
        self.data[addr as usize] = value as u8;
        self.data[addr.wrapping_add(1) as usize] = (value >> 8) as u8;
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data[..]
    }
}

impl CpuBus for FlatMemory {
    #[inline]
    fn read(&mut self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    #[inline]
    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }

    fn peek(&self, addr: u16) -> Option<u8> {
        Some(self.data[addr as usize])
    }

    fn interrupts(&self) -> &InterruptLines {
        &self.interrupts
    }

    fn interrupts_mut(&mut self) -> &mut InterruptLines {
        &mut self.interrupts
    }
}
