/*!
regs.rs - CpuRegs trait: the register and flag interface instruction helpers
are written against.

The trait does NOT include:
  - Stack push/pop
  - Instruction fetch helpers
  - Bus access of any kind

Memory, stack and fetch stay explicit at call sites (`&mut B: CpuBus`) so
a helper's signature shows whether it touches the bus.

Static dispatch only: helpers are `fn op<C: CpuRegs>(cpu: &mut C)`.
*/

use crate::cpu::state::CpuState;
use crate::cpu::status::Status;

pub trait CpuRegs {
    fn a(&self) -> u8;
    fn x(&self) -> u8;
    fn y(&self) -> u8;
    fn sp(&self) -> u8;
    fn pc(&self) -> u16;
    fn status(&self) -> Status;

    fn set_a(&mut self, v: u8);
    fn set_x(&mut self, v: u8);
    fn set_y(&mut self, v: u8);
    fn set_sp(&mut self, v: u8);
    fn set_pc(&mut self, v: u16);
    fn set_status(&mut self, v: Status);

    /// Advance PC by `delta` (wrapping at 16 bits).
    #[inline]
    fn advance_pc(&mut self, delta: u16) {
        let pc = self.pc().wrapping_add(delta);
        self.set_pc(pc);
    }

    #[inline]
    fn flag(&self, flag: Status) -> bool {
        self.status().contains(flag)
    }

    #[inline]
    fn set_flag(&mut self, flag: Status, on: bool) {
        let mut s = self.status();
        s.set(flag, on);
        self.set_status(s);
    }

    /// ZERO and NEGATIVE from a result byte.
    #[inline]
    fn update_zn(&mut self, result: u8) {
        self.set_flag(Status::ZERO, result == 0);
        self.set_flag(Status::NEGATIVE, result & 0x80 != 0);
    }

    #[inline]
    fn carry_in(&self) -> u8 {
        self.flag(Status::CARRY) as u8
    }
}

impl CpuRegs for CpuState {
    #[inline]
    fn a(&self) -> u8 {
        self.a
    }
    #[inline]
    fn x(&self) -> u8 {
        self.x
    }
    #[inline]
    fn y(&self) -> u8 {
        self.y
    }
    #[inline]
    fn sp(&self) -> u8 {
        self.sp
    }
    #[inline]
    fn pc(&self) -> u16 {
        self.pc
    }
    #[inline]
    fn status(&self) -> Status {
        self.status
    }

    #[inline]
    fn set_a(&mut self, v: u8) {
        self.a = v;
    }
    #[inline]
    fn set_x(&mut self, v: u8) {
        self.x = v;
    }
    #[inline]
    fn set_y(&mut self, v: u8) {
        self.y = v;
    }
    #[inline]
    fn set_sp(&mut self, v: u8) {
        self.sp = v;
    }
    #[inline]
    fn set_pc(&mut self, v: u16) {
        self.pc = v;
    }
    #[inline]
    fn set_status(&mut self, v: Status) {
        self.status = v | Status::UNUSED;
    }
}
