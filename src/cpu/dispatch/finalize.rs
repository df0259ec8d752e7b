/*!
finalize.rs - Step results and the non-executing opcode paths.

Responsibilities
================
- `finish`: wrap an executed instruction's cycle total.
- `illegal_as_nop`: `IllegalOpcodePolicy::Nop`. The operand bytes are
  consumed (PC moves past them) and the table's timing is charged, including
  its page penalty, but no memory is read or written and no register
  changes.
- `halt`: JAM opcodes, and every undocumented opcode under
  `IllegalOpcodePolicy::Halt`. PC is left just past the opcode byte; the
  `Cpu` facade moves to the Halted phase and stays there until reset.
*/

use log::warn;

use crate::bus::CpuBus;
use crate::cpu::addressing::resolve;
use crate::cpu::cycles::instruction_cycles;
use crate::cpu::dispatch::{StepEvent, StepResult};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::Instruction;

#[inline]
pub(crate) fn finish(opcode: u8, cycles: u32) -> StepResult {
    StepResult {
        cycles,
        event: StepEvent::Instruction { opcode },
    }
}

pub(crate) fn illegal_as_nop<C: CpuRegs, B: CpuBus>(
    opcode: u8,
    instr: &Instruction,
    cpu: &mut C,
    bus: &mut B,
) -> StepResult {
    let operand = resolve(instr.mode, cpu, bus);
    finish(opcode, instruction_cycles(instr, &operand, 0))
}

pub(crate) fn halt<C: CpuRegs>(opcode: u8, instr: &Instruction, cpu: &C) -> StepResult {
    warn!(
        "CPU halted by opcode ${opcode:02X} ({}) at ${:04X}",
        instr.op.mnemonic(),
        cpu.pc().wrapping_sub(1)
    );
    StepResult {
        cycles: instr.cycles as u32,
        event: StepEvent::Jammed { opcode },
    }
}
