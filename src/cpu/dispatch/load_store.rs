/*!
load_store.rs - Load / store family handler.

Overview
========
Loads (set Z/N; indexed reads may add a page-cross cycle via the table):
    LDA, LDX, LDY

Stores (no flags; never a page-cross penalty):
    STA, STX, STY

Cycle Accounting
================
Base and page-penalty cycles are already in `*cycles` when this runs; the
handler adds nothing.
*/

use crate::bus::CpuBus;
use crate::cpu::addressing::Operand;
use crate::cpu::dispatch::{effective_addr, read_operand};
use crate::cpu::execute::{lda, ldx, ldy};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::{Instruction, Op};

pub(super) fn handle<C: CpuRegs, B: CpuBus>(
    instr: &Instruction,
    operand: &Operand,
    cpu: &mut C,
    bus: &mut B,
    _cycles: &mut u32,
) -> bool {
    match instr.op {
        Op::Lda => {
            let v = read_operand(operand, cpu, bus);
            lda(cpu, v);
        }
        Op::Ldx => {
            let v = read_operand(operand, cpu, bus);
            ldx(cpu, v);
        }
        Op::Ldy => {
            let v = read_operand(operand, cpu, bus);
            ldy(cpu, v);
        }
        Op::Sta => bus.write(effective_addr(operand), cpu.a()),
        Op::Stx => bus.write(effective_addr(operand), cpu.x()),
        Op::Sty => bus.write(effective_addr(operand), cpu.y()),
        _ => return false,
    }
    true
}
