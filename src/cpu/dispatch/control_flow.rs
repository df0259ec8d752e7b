/*!
control_flow.rs - JMP / JSR / RTS / RTI / BRK.

Overview
========
- JMP abs / JMP (ind): PC = target. The indirect form already carries the
  page-wrap pointer quirk from addressing.
- JSR: push (address of the JSR's last byte), PC = target.
- RTS: pull PC, add 1.
- RTI: pull P (U forced on, B ignored), then pull PC. No +1.
- BRK: skip the padding byte, push PC, push P with B set, set I, load the
  vector at $FFFE. The CPU keeps running.

Cycle Rules
===========
All fixed: JMP 3/5, JSR 6, RTS 6, RTI 6, BRK 7.
*/

use log::trace;

use crate::bus::CpuBus;
use crate::cpu::addressing::Operand;
use crate::cpu::dispatch::{IRQ_VECTOR, effective_addr};
use crate::cpu::execute::{pop_word, pull_status_rti, push_status, push_word};
use crate::cpu::regs::CpuRegs;
use crate::cpu::status::Status;
use crate::cpu::table::{Instruction, Op};

pub(super) fn handle<C: CpuRegs, B: CpuBus>(
    instr: &Instruction,
    operand: &Operand,
    cpu: &mut C,
    bus: &mut B,
    _cycles: &mut u32,
) -> bool {
    match instr.op {
        Op::Jmp => cpu.set_pc(effective_addr(operand)),
        Op::Jsr => {
            let ret = cpu.pc().wrapping_sub(1);
            push_word(cpu, bus, ret);
            cpu.set_pc(effective_addr(operand));
        }
        Op::Rts => {
            let ret = pop_word(cpu, bus).wrapping_add(1);
            cpu.set_pc(ret);
        }
        Op::Rti => {
            pull_status_rti(cpu, bus);
            let ret = pop_word(cpu, bus);
            cpu.set_pc(ret);
        }
        Op::Brk => {
            cpu.advance_pc(1);
            let ret = cpu.pc();
            push_word(cpu, bus, ret);
            push_status(cpu, bus, true);
            cpu.set_flag(Status::IRQ_DISABLE, true);
            let target = bus.read_word(IRQ_VECTOR);
            trace!("BRK at ${:04X} -> ${target:04X}", ret.wrapping_sub(2));
            cpu.set_pc(target);
        }
        _ => return false,
    }
    true
}
