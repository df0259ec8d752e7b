/*!
status.rs - The processor status register (P).

Bit layout
==========
Bit: 7 6 5 4 3 2 1 0
     N V 1 B D I Z C
  N = NEGATIVE
  V = OVERFLOW
  1 = UNUSED (no storage; always reads back as 1)
  B = BREAK (no storage either; synthesized when P is pushed)
  D = DECIMAL (the 2A03 has no BCD unit, but the bit round-trips)
  I = IRQ_DISABLE
  Z = ZERO
  C = CARRY

Push vs pull
============
- `pack` is the byte a debugger or snapshot sees.
- `for_push` is the byte written to the stack: UNUSED forced on, BREAK set by
  BRK/PHP and cleared by IRQ/NMI entry.
- `unpack` is the inverse used by PLP: UNUSED forced on, every other bit
  taken from the byte as pulled (including B, so PLP round-trips all eight
  bits the program pushed).
- `unpack_rti` is the RTI pull: like `unpack`, but B is not taken from the
  interrupt frame.
*/

use std::fmt;

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Status: u8 {
        const CARRY       = 0b0000_0001;
        const ZERO        = 0b0000_0010;
        const IRQ_DISABLE = 0b0000_0100;
        const DECIMAL     = 0b0000_1000;
        const BREAK       = 0b0001_0000;
        const UNUSED      = 0b0010_0000;
        const OVERFLOW    = 0b0100_0000;
        const NEGATIVE    = 0b1000_0000;
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::POWER_ON
    }
}

impl Status {
    /// State after power-on and after reset: I set, U set (0x24).
    pub const POWER_ON: Status = Status::IRQ_DISABLE.union(Status::UNUSED);

    #[inline]
    pub const fn pack(self) -> u8 {
        self.union(Status::UNUSED).bits()
    }

    #[inline]
    pub const fn unpack(byte: u8) -> Status {
        Status::from_bits_retain(byte).union(Status::UNUSED)
    }

    /// RTI pull: U forced on, B left as it is in `current`. The B in an
    /// interrupt frame only records how the frame was pushed.
    #[inline]
    pub const fn unpack_rti(byte: u8, current: Status) -> Status {
        let pulled = Status::unpack(byte).difference(Status::BREAK);
        pulled.union(current.intersection(Status::BREAK))
    }

    /// Byte pushed by BRK/PHP (`brk == true`) or IRQ/NMI entry (`false`).
    #[inline]
    pub fn for_push(self, brk: bool) -> u8 {
        let mut pushed = self | Status::UNUSED;
        pushed.set(Status::BREAK, brk);
        pushed.bits()
    }
}

impl fmt::Display for Status {
    /// `NV-BDIZC`, upper case when set.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const LETTERS: [(Status, char); 8] = [
            (Status::NEGATIVE, 'N'),
            (Status::OVERFLOW, 'V'),
            (Status::UNUSED, 'U'),
            (Status::BREAK, 'B'),
            (Status::DECIMAL, 'D'),
            (Status::IRQ_DISABLE, 'I'),
            (Status::ZERO, 'Z'),
            (Status::CARRY, 'C'),
        ];
        for (flag, letter) in LETTERS {
            let c = if self.contains(flag) {
                letter
            } else {
                letter.to_ascii_lowercase()
            };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
