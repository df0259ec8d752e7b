/*!
branches.rs - Conditional relative branches.

Overview
========
BPL BMI BVC BVS BCC BCS BNE BEQ, all relative addressing.

Cycle Rules
===========
- Not taken: 2
- Taken, same page: 3
- Taken, target on another page than the next instruction: 4

The table's base of 2 is already in `*cycles`; this adds `branch_extra`.
*/

use crate::bus::CpuBus;
use crate::cpu::addressing::Operand;
use crate::cpu::cycles::branch_extra;
use crate::cpu::dispatch::effective_addr;
use crate::cpu::execute::branch_taken;
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::Instruction;

pub(super) fn handle<C: CpuRegs, B: CpuBus>(
    instr: &Instruction,
    operand: &Operand,
    cpu: &mut C,
    _bus: &mut B,
    cycles: &mut u32,
) -> bool {
    if !instr.op.is_branch() {
        return false;
    }
    let taken = branch_taken(cpu, instr.op);
    if taken {
        cpu.set_pc(effective_addr(operand));
    }
    *cycles += branch_extra(taken, operand.page_crossed);
    true
}
