/*!
addressing.rs - 6502 addressing modes and operand resolution.

Overview
========
`resolve` turns the bytes after an opcode into an `Operand`:
- the effective address (`None` for implied/accumulator),
- how many operand bytes were consumed (PC is advanced past them),
- whether indexing crossed a page (high byte of the effective address differs
  from the high byte of the base address).

Whether a crossing costs a cycle is NOT decided here. The instruction table
flags the entries that pay it (indexed reads); stores and read-modify-write
instructions already include the extra cycle in their base count.

Quirks reproduced
=================
- Zero-page indexing wraps within page zero ($FF + X stays in $00xx).
- (zp,X) and (zp),Y read their 16-bit pointer from page zero with wrap:
  a pointer at $FF takes its high byte from $00.
- JMP ($xxFF) takes the high byte of the target from $xx00, not the next
  page.

Caller Assumptions
==================
- PC points at the first operand byte (the opcode has been consumed).
- Operand bytes are read through the bus like any other read.
*/

use crate::bus::CpuBus;
use crate::cpu::regs::CpuRegs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddrMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
    Relative,
}

impl AddrMode {
    /// Operand bytes following the opcode.
    pub const fn operand_len(self) -> u16 {
        match self {
            AddrMode::Implied | AddrMode::Accumulator => 0,
            AddrMode::Immediate
            | AddrMode::ZeroPage
            | AddrMode::ZeroPageX
            | AddrMode::ZeroPageY
            | AddrMode::IndirectX
            | AddrMode::IndirectY
            | AddrMode::Relative => 1,
            AddrMode::Absolute | AddrMode::AbsoluteX | AddrMode::AbsoluteY | AddrMode::Indirect => 2,
        }
    }

    /// Indexed modes where a read pays one cycle when indexing crosses a
    /// page. Branch timing is handled separately.
    pub const fn has_page_penalty(self) -> bool {
        matches!(
            self,
            AddrMode::AbsoluteX | AddrMode::AbsoluteY | AddrMode::IndirectY
        )
    }
}

/// A resolved operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operand {
    pub addr: Option<u16>,
    pub len: u16,
    pub page_crossed: bool,
    /// Base address before indexing (absolute operand, pointer target, or
    /// the PC after a branch). Unofficial SHx/TAS stores need its high byte.
    pub base: u16,
}

impl Operand {
    const fn none() -> Self {
        Self {
            addr: None,
            len: 0,
            page_crossed: false,
            base: 0,
        }
    }

    const fn at(addr: u16, len: u16) -> Self {
        Self {
            addr: Some(addr),
            len,
            page_crossed: false,
            base: addr,
        }
    }

    const fn indexed(base: u16, addr: u16, len: u16) -> Self {
        Self {
            addr: Some(addr),
            len,
            page_crossed: (base & 0xFF00) != (addr & 0xFF00),
            base,
        }
    }
}

#[inline]
pub(crate) fn fetch_byte<C: CpuRegs, B: CpuBus>(cpu: &mut C, bus: &mut B) -> u8 {
    let v = bus.read(cpu.pc());
    cpu.advance_pc(1);
    v
}

#[inline]
pub(crate) fn fetch_word<C: CpuRegs, B: CpuBus>(cpu: &mut C, bus: &mut B) -> u16 {
    let lo = fetch_byte(cpu, bus) as u16;
    let hi = fetch_byte(cpu, bus) as u16;
    (hi << 8) | lo
}

/// Resolve the operand of `mode`, advancing PC past its bytes.
pub(crate) fn resolve<C: CpuRegs, B: CpuBus>(mode: AddrMode, cpu: &mut C, bus: &mut B) -> Operand {
    match mode {
        AddrMode::Implied | AddrMode::Accumulator => Operand::none(),
        AddrMode::Immediate => {
            let addr = cpu.pc();
            cpu.advance_pc(1);
            Operand::at(addr, 1)
        }
        AddrMode::ZeroPage => Operand::at(fetch_byte(cpu, bus) as u16, 1),
        AddrMode::ZeroPageX => {
            let zp = fetch_byte(cpu, bus).wrapping_add(cpu.x());
            Operand::at(zp as u16, 1)
        }
        AddrMode::ZeroPageY => {
            let zp = fetch_byte(cpu, bus).wrapping_add(cpu.y());
            Operand::at(zp as u16, 1)
        }
        AddrMode::Absolute => Operand::at(fetch_word(cpu, bus), 2),
        AddrMode::AbsoluteX => {
            let base = fetch_word(cpu, bus);
            Operand::indexed(base, base.wrapping_add(cpu.x() as u16), 2)
        }
        AddrMode::AbsoluteY => {
            let base = fetch_word(cpu, bus);
            Operand::indexed(base, base.wrapping_add(cpu.y() as u16), 2)
        }
        AddrMode::Indirect => {
            let ptr = fetch_word(cpu, bus);
            let target = read_word_indirect_bug(bus, ptr);
            Operand {
                base: ptr,
                ..Operand::at(target, 2)
            }
        }
        AddrMode::IndirectX => {
            let zp = fetch_byte(cpu, bus).wrapping_add(cpu.x());
            Operand::at(read_word_zp(bus, zp), 1)
        }
        AddrMode::IndirectY => {
            let zp = fetch_byte(cpu, bus);
            let base = read_word_zp(bus, zp);
            Operand::indexed(base, base.wrapping_add(cpu.y() as u16), 1)
        }
        AddrMode::Relative => {
            let offset = fetch_byte(cpu, bus) as i8;
            let next = cpu.pc();
            Operand::indexed(next, next.wrapping_add(offset as u16), 1)
        }
    }
}

/// 16-bit pointer in page zero; the high byte wraps to $00.
#[inline]
pub(crate) fn read_word_zp<B: CpuBus>(bus: &mut B, base: u8) -> u16 {
    let lo = bus.read(base as u16) as u16;
    let hi = bus.read(base.wrapping_add(1) as u16) as u16;
    (hi << 8) | lo
}

/// JMP (indirect) pointer read: the high byte comes from the same page.
#[inline]
pub(crate) fn read_word_indirect_bug<B: CpuBus>(bus: &mut B, addr: u16) -> u16 {
    let lo = bus.read(addr) as u16;
    let hi_addr = (addr & 0xFF00) | (addr.wrapping_add(1) & 0x00FF);
    let hi = bus.read(hi_addr) as u16;
    (hi << 8) | lo
}
