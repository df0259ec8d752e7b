/*!
logical.rs - AND / ORA / EOR / BIT.

BIT copies operand bits 7 and 6 into N and V and sets Z from A & operand;
A is not modified.
*/

use crate::bus::CpuBus;
use crate::cpu::addressing::Operand;
use crate::cpu::dispatch::read_operand;
use crate::cpu::execute::{and, bit, eor, ora};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::{Instruction, Op};

pub(super) fn handle<C: CpuRegs, B: CpuBus>(
    instr: &Instruction,
    operand: &Operand,
    cpu: &mut C,
    bus: &mut B,
    _cycles: &mut u32,
) -> bool {
    let apply: fn(&mut C, u8) = match instr.op {
        Op::And => and,
        Op::Ora => ora,
        Op::Eor => eor,
        Op::Bit => bit,
        _ => return false,
    };
    let v = read_operand(operand, cpu, bus);
    apply(cpu, v);
    true
}
