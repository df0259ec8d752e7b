/*!
dispatch - Orchestrator for a single 6502 CPU step (interrupts / decode / execute)

Overview
========
One call to `step`:
1. Services a latched NMI (priority) or an asserted, unmasked IRQ: push PC
   and P (B clear, U set), set I, load the vector. 7 cycles.
2. Otherwise fetches the opcode, looks it up in the table and, for
   undocumented entries, applies the configured `IllegalOpcodePolicy`.
3. Resolves the operand, runs the family handler chain, and returns base
   cycles plus page-cross and branch penalties.

Architecture
============
- Family handlers (`load_store`, `arithmetic`, `compare`, `logical`, `rmw`,
  `branches`, `control_flow`, `misc`, `unofficial`) each claim a set of
  operations and return `true` when they executed one. They never fetch the
  opcode and never decide timing beyond adding their own extra cycles.
- `finalize` packages results and owns the non-executing paths (illegal
  opcode as NOP, halt).

Interrupt sampling
==================
Lines are sampled only here, at instruction boundaries. An IRQ that is still
held when the handler clears I is taken again at the next boundary.
*/

use log::debug;

use crate::bus::CpuBus;
use crate::config::IllegalOpcodePolicy;
use crate::cpu::addressing::{Operand, fetch_byte, resolve};
use crate::cpu::cycles::{INTERRUPT_CYCLES, instruction_cycles};
use crate::cpu::execute::{push_status, push_word};
use crate::cpu::regs::CpuRegs;
use crate::cpu::status::Status;
use crate::cpu::table::{self, Op};

pub(crate) mod arithmetic;
pub(crate) mod branches;
pub(crate) mod compare;
pub(crate) mod control_flow;
pub(crate) mod finalize;
pub(crate) mod load_store;
pub(crate) mod logical;
pub(crate) mod misc;
pub(crate) mod rmw;
pub(crate) mod unofficial;

pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interrupt {
    Nmi,
    Irq,
}

impl Interrupt {
    pub const fn vector(self) -> u16 {
        match self {
            Interrupt::Nmi => NMI_VECTOR,
            Interrupt::Irq => IRQ_VECTOR,
        }
    }
}

/// What a step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    Instruction { opcode: u8 },
    Interrupt(Interrupt),
    /// The CPU stopped: a JAM opcode, or any undocumented opcode under
    /// `IllegalOpcodePolicy::Halt`.
    Jammed { opcode: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    pub cycles: u32,
    pub event: StepEvent,
}

/// Execute one CPU step and report the cycles it consumed.
pub(crate) fn step<C: CpuRegs, B: CpuBus>(
    cpu: &mut C,
    bus: &mut B,
    policy: IllegalOpcodePolicy,
) -> StepResult {
    if bus.interrupts_mut().take_nmi() {
        return service_interrupt(cpu, bus, Interrupt::Nmi);
    }
    if bus.interrupts().irq_asserted() && !cpu.flag(Status::IRQ_DISABLE) {
        return service_interrupt(cpu, bus, Interrupt::Irq);
    }
    execute_next(cpu, bus, policy)
}

/// Hardware interrupt entry (push PC, P with B clear; set I; load vector).
pub(crate) fn service_interrupt<C: CpuRegs, B: CpuBus>(
    cpu: &mut C,
    bus: &mut B,
    kind: Interrupt,
) -> StepResult {
    let return_pc = cpu.pc();
    push_word(cpu, bus, return_pc);
    push_status(cpu, bus, false);
    cpu.set_flag(Status::IRQ_DISABLE, true);
    let target = bus.read_word(kind.vector());
    cpu.set_pc(target);
    debug!("{kind:?}: return ${return_pc:04X} -> handler ${target:04X}");
    StepResult {
        cycles: INTERRUPT_CYCLES,
        event: StepEvent::Interrupt(kind),
    }
}

fn execute_next<C: CpuRegs, B: CpuBus>(
    cpu: &mut C,
    bus: &mut B,
    policy: IllegalOpcodePolicy,
) -> StepResult {
    let opcode = fetch_byte(cpu, bus);
    let instr = table::lookup(opcode);

    if !instr.official {
        match policy {
            IllegalOpcodePolicy::Nop => return finalize::illegal_as_nop(opcode, instr, cpu, bus),
            IllegalOpcodePolicy::Halt => return finalize::halt(opcode, instr, cpu),
            IllegalOpcodePolicy::Unofficial if instr.op == Op::Jam => {
                return finalize::halt(opcode, instr, cpu);
            }
            IllegalOpcodePolicy::Unofficial => {}
        }
    }

    let operand = resolve(instr.mode, cpu, bus);
    let mut cycles = instruction_cycles(instr, &operand, 0);

    let handled = load_store::handle(instr, &operand, cpu, bus, &mut cycles)
        || arithmetic::handle(instr, &operand, cpu, bus, &mut cycles)
        || compare::handle(instr, &operand, cpu, bus, &mut cycles)
        || logical::handle(instr, &operand, cpu, bus, &mut cycles)
        || rmw::handle(instr, &operand, cpu, bus, &mut cycles)
        || branches::handle(instr, &operand, cpu, bus, &mut cycles)
        || control_flow::handle(instr, &operand, cpu, bus, &mut cycles)
        || misc::handle(instr, &operand, cpu, bus, &mut cycles)
        || unofficial::handle(instr, &operand, cpu, bus, &mut cycles);
    debug_assert!(handled, "opcode {opcode:#04x} ({:?}) has no handler", instr.op);

    finalize::finish(opcode, cycles)
}

/// Value an instruction operates on: memory at the effective address, or A
/// in accumulator mode.
#[inline]
pub(super) fn read_operand<C: CpuRegs, B: CpuBus>(operand: &Operand, cpu: &C, bus: &mut B) -> u8 {
    match operand.addr {
        Some(addr) => bus.read(addr),
        None => cpu.a(),
    }
}

/// Effective address of a memory-mode operand. The table guarantees one
/// exists for every operation that asks.
#[inline]
pub(super) fn effective_addr(operand: &Operand) -> u16 {
    debug_assert!(operand.addr.is_some(), "operation needs a memory operand");
    operand.addr.unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{FlatMemory, IrqSource};
    use crate::cpu::state::CpuState;
    use crate::test_utils::{IRQ_HANDLER, NMI_HANDLER, setup};

    fn flat(program: &[u8]) -> (CpuState, FlatMemory) {
        let mut mem = FlatMemory::new();
        mem.load(0x8000, program);
        mem.set_word(NMI_VECTOR, NMI_HANDLER);
        mem.set_word(IRQ_VECTOR, IRQ_HANDLER);
        let cpu = CpuState {
            pc: 0x8000,
            ..CpuState::new()
        };
        (cpu, mem)
    }

    #[test]
    fn nmi_preempts_opcode() {
        let (mut cpu, mut bus) = setup(&[0xEA, 0x00]);
        bus.interrupts_mut().pulse_nmi();
        let r = step(cpu.state_mut(), &mut bus, IllegalOpcodePolicy::Nop);
        assert_eq!(r.cycles, 7);
        assert_eq!(r.event, StepEvent::Interrupt(Interrupt::Nmi));
        assert_eq!(cpu.pc(), NMI_HANDLER);
        assert!(!bus.interrupts().nmi_pending());
    }

    #[test]
    fn nmi_pushes_pc_then_status_with_break_clear() {
        let (mut cpu, mut mem) = flat(&[0xEA]);
        cpu.status = Status::CARRY | Status::BREAK | Status::UNUSED;
        mem.interrupts_mut().pulse_nmi();
        step(&mut cpu, &mut mem, IllegalOpcodePolicy::Nop);
        assert_eq!(cpu.sp, 0xFA);
        assert_eq!(mem.as_slice()[0x01FD], 0x80);
        assert_eq!(mem.as_slice()[0x01FC], 0x00);
        assert_eq!(mem.as_slice()[0x01FB], 0x21);
        assert!(cpu.status.contains(Status::IRQ_DISABLE));
    }

    #[test]
    fn nmi_wins_over_irq() {
        let (mut cpu, mut mem) = flat(&[0xEA]);
        mem.load(NMI_HANDLER, &[0xEA]);
        cpu.status = Status::UNUSED;
        mem.interrupts_mut().set_irq(IrqSource::EXTERNAL, true);
        mem.interrupts_mut().pulse_nmi();
        let r = step(&mut cpu, &mut mem, IllegalOpcodePolicy::Nop);
        assert_eq!(r.event, StepEvent::Interrupt(Interrupt::Nmi));
        assert_eq!(cpu.pc, NMI_HANDLER);
        // I now set by NMI entry: the IRQ waits while the handler runs.
        let r = step(&mut cpu, &mut mem, IllegalOpcodePolicy::Nop);
        assert_eq!(r.event, StepEvent::Instruction { opcode: 0xEA });
        assert_eq!(cpu.pc, NMI_HANDLER + 1);
    }

    #[test]
    fn irq_mask_respected() {
        let (mut cpu, mut bus) = setup(&[0xEA, 0x00]);
        bus.interrupts_mut().set_irq(IrqSource::APU_FRAME, true);
        // I is set after reset: the IRQ is ignored.
        let r = step(cpu.state_mut(), &mut bus, IllegalOpcodePolicy::Nop);
        assert_eq!(r.event, StepEvent::Instruction { opcode: 0xEA });
        assert_eq!(r.cycles, 2);
    }

    #[test]
    fn irq_taken_when_unmasked() {
        let (mut cpu, mut mem) = flat(&[0x58, 0xEA]); // CLI; NOP
        mem.interrupts_mut().set_irq(IrqSource::MAPPER, true);
        let r = step(&mut cpu, &mut mem, IllegalOpcodePolicy::Nop);
        assert_eq!(r.event, StepEvent::Instruction { opcode: 0x58 });
        let r = step(&mut cpu, &mut mem, IllegalOpcodePolicy::Nop);
        assert_eq!(r.event, StepEvent::Interrupt(Interrupt::Irq));
        assert_eq!(cpu.pc, IRQ_HANDLER);
        assert_eq!(mem.as_slice()[0x01FB] & 0x30, 0x20);
    }

    #[test]
    fn level_irq_reenters_after_rti() {
        // Handler: RTI. Source stays active, so the IRQ is taken again.
        let (mut cpu, mut mem) = flat(&[0xEA, 0xEA]);
        mem.load(IRQ_HANDLER, &[0x40]);
        cpu.status = Status::UNUSED;
        mem.interrupts_mut().set_irq(IrqSource::EXTERNAL, true);
        assert_eq!(
            step(&mut cpu, &mut mem, IllegalOpcodePolicy::Nop).event,
            StepEvent::Interrupt(Interrupt::Irq)
        );
        step(&mut cpu, &mut mem, IllegalOpcodePolicy::Nop); // RTI restores I=0
        assert_eq!(cpu.pc, 0x8000);
        assert_eq!(
            step(&mut cpu, &mut mem, IllegalOpcodePolicy::Nop).event,
            StepEvent::Interrupt(Interrupt::Irq)
        );
        mem.interrupts_mut().set_irq(IrqSource::EXTERNAL, false);
        step(&mut cpu, &mut mem, IllegalOpcodePolicy::Nop); // RTI
        assert_eq!(
            step(&mut cpu, &mut mem, IllegalOpcodePolicy::Nop).event,
            StepEvent::Instruction { opcode: 0xEA }
        );
    }
}
