/*!
rmw.rs - Shifts, rotates and memory increments.

Overview
========
ASL / LSR / ROL / ROR operate on A (accumulator mode) or memory.
INC / DEC operate on memory only.

Memory forms go through `rmw_memory`, so the bus sees the read, a write of
the unmodified value, then the write of the result. Cycle counts (5/6/7)
come straight from the table; indexed forms never add a page penalty.
*/

use crate::bus::CpuBus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{asl, dec, inc, lsr, rmw_memory, rol, ror};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::{Instruction, Op};

pub(super) fn handle<C: CpuRegs, B: CpuBus>(
    instr: &Instruction,
    operand: &Operand,
    cpu: &mut C,
    bus: &mut B,
    _cycles: &mut u32,
) -> bool {
    let f: fn(&mut C, u8) -> u8 = match instr.op {
        Op::Asl => asl,
        Op::Lsr => lsr,
        Op::Rol => rol,
        Op::Ror => ror,
        Op::Inc => inc,
        Op::Dec => dec,
        _ => return false,
    };
    match operand.addr {
        Some(addr) => {
            rmw_memory(cpu, bus, addr, f);
        }
        None => {
            let a = cpu.a();
            let r = f(cpu, a);
            cpu.set_a(r);
        }
    }
    true
}
