//! CMP / CPX / CPY: C = reg >= v, Z/N from reg - v. Registers unchanged.

use crate::bus::CpuBus;
use crate::cpu::addressing::Operand;
use crate::cpu::dispatch::read_operand;
use crate::cpu::execute::compare;
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::{Instruction, Op};

pub(super) fn handle<C: CpuRegs, B: CpuBus>(
    instr: &Instruction,
    operand: &Operand,
    cpu: &mut C,
    bus: &mut B,
    _cycles: &mut u32,
) -> bool {
    let reg = match instr.op {
        Op::Cmp => cpu.a(),
        Op::Cpx => cpu.x(),
        Op::Cpy => cpu.y(),
        _ => return false,
    };
    let v = read_operand(operand, cpu, bus);
    compare(cpu, reg, v);
    true
}
