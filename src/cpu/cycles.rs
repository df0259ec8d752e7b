/*!
cycles.rs - Cycle timing rules for the 6502 CPU core.

Purpose
=======
The table supplies base cycles; this module owns the dynamic rules:
  - `instruction_cycles` : base + page-cross penalty (only where the table
                           flags it) + any extra cycles from execution.
  - `branch_extra`       : +1 taken, +1 more when the target is on another
                           page than the next instruction.
  - `INTERRUPT_CYCLES`   : NMI/IRQ entry sequence length.
  - `RESET_CYCLES`       : reset sequence length.

Nothing here touches the bus; cycle accounting is returned to the caller,
which advances other devices.
*/

use crate::cpu::addressing::Operand;
use crate::cpu::table::Instruction;

/// Cycles spent entering an NMI or IRQ handler.
pub const INTERRUPT_CYCLES: u32 = 7;

/// Cycles spent in the reset sequence before the first opcode fetch.
pub const RESET_CYCLES: u32 = 7;

/// Total cycles of one executed instruction.
#[inline]
pub(crate) fn instruction_cycles(instr: &Instruction, operand: &Operand, extra: u32) -> u32 {
    let penalty = (instr.page_penalty && operand.page_crossed) as u32;
    instr.cycles as u32 + penalty + extra
}

/// Extra cycles for a conditional branch.
#[inline]
pub(crate) fn branch_extra(taken: bool, crossed: bool) -> u32 {
    match (taken, crossed) {
        (false, _) => 0,
        (true, false) => 1,
        (true, true) => 2,
    }
}
