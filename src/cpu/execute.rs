/*!
execute.rs - 6502 instruction semantic helpers (ALU, flags, stack, RMW).

Purpose
=======
Centralize the side effects of every instruction so the family handlers in
`dispatch` only decode and route. Helpers are generic over `CpuRegs`; the
ones that touch memory also take a `CpuBus`.

Scope (crate-visible)
---------------------
Stack:
    push, pop, push_word, pop_word, push_status
    php, plp, pull_status_rti, pha, pla

Loads / transfers / counters:
    lda/ldx/ldy, tax/tay/txa/tya/tsx/txs, inx/iny/dex/dey

ALU:
    and/ora/eor/bit, adc/sbc, compare
    asl/lsr/rol/ror (value in, value out; callers choose A or memory)

Read-modify-write:
    rmw_memory (read, dummy write of the old value, final write)

Undocumented combinations:
    anc, alr, arr, axs, lax, las, xaa, lxa, unstable_store

Design Notes
============
- The 2A03 has no decimal mode: ADC/SBC are binary regardless of D.
- SBC is ADC of the one's complement of the operand.
- Overflow is signed overflow: operands agree in sign, result differs.
*/

use crate::bus::CpuBus;
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::STACK_BASE;
use crate::cpu::status::Status;
use crate::cpu::table::Op;

/// Constant ORed into A by XAA/LXA. Real chips vary; 0xEE is the value most
/// test suites assume.
pub(crate) const UNSTABLE_MAGIC: u8 = 0xEE;

// ---------------------------------------------------------------------------
// Stack
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn push<C: CpuRegs, B: CpuBus>(cpu: &mut C, bus: &mut B, v: u8) {
    let sp = cpu.sp();
    bus.write(STACK_BASE | sp as u16, v);
    cpu.set_sp(sp.wrapping_sub(1));
}

#[inline]
pub(crate) fn pop<C: CpuRegs, B: CpuBus>(cpu: &mut C, bus: &mut B) -> u8 {
    let sp = cpu.sp().wrapping_add(1);
    cpu.set_sp(sp);
    bus.read(STACK_BASE | sp as u16)
}

#[inline]
pub(crate) fn push_word<C: CpuRegs, B: CpuBus>(cpu: &mut C, bus: &mut B, v: u16) {
    push(cpu, bus, (v >> 8) as u8);
    push(cpu, bus, (v & 0xFF) as u8);
}

#[inline]
pub(crate) fn pop_word<C: CpuRegs, B: CpuBus>(cpu: &mut C, bus: &mut B) -> u16 {
    let lo = pop(cpu, bus) as u16;
    let hi = pop(cpu, bus) as u16;
    (hi << 8) | lo
}

/// Push P; `brk` selects the B bit (BRK/PHP set it, IRQ/NMI clear it).
pub(crate) fn push_status<C: CpuRegs, B: CpuBus>(cpu: &mut C, bus: &mut B, brk: bool) {
    let v = cpu.status().for_push(brk);
    push(cpu, bus, v);
}

#[inline]
pub(crate) fn php<C: CpuRegs, B: CpuBus>(cpu: &mut C, bus: &mut B) {
    push_status(cpu, bus, true);
}

/// PLP: U forced on, everything else (B included) as pulled.
#[inline]
pub(crate) fn plp<C: CpuRegs, B: CpuBus>(cpu: &mut C, bus: &mut B) {
    let v = pop(cpu, bus);
    cpu.set_status(Status::unpack(v));
}

/// RTI status pull: U forced on, B not taken from the interrupt frame.
#[inline]
pub(crate) fn pull_status_rti<C: CpuRegs, B: CpuBus>(cpu: &mut C, bus: &mut B) {
    let v = pop(cpu, bus);
    let current = cpu.status();
    cpu.set_status(Status::unpack_rti(v, current));
}

#[inline]
pub(crate) fn pha<C: CpuRegs, B: CpuBus>(cpu: &mut C, bus: &mut B) {
    let a = cpu.a();
    push(cpu, bus, a);
}

#[inline]
pub(crate) fn pla<C: CpuRegs, B: CpuBus>(cpu: &mut C, bus: &mut B) {
    let v = pop(cpu, bus);
    lda(cpu, v);
}

// ---------------------------------------------------------------------------
// Loads / transfers / counters
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn lda<C: CpuRegs>(cpu: &mut C, v: u8) {
    cpu.set_a(v);
    cpu.update_zn(v);
}

#[inline]
pub(crate) fn ldx<C: CpuRegs>(cpu: &mut C, v: u8) {
    cpu.set_x(v);
    cpu.update_zn(v);
}

#[inline]
pub(crate) fn ldy<C: CpuRegs>(cpu: &mut C, v: u8) {
    cpu.set_y(v);
    cpu.update_zn(v);
}

pub(crate) fn tax<C: CpuRegs>(cpu: &mut C) {
    ldx(cpu, cpu.a());
}

pub(crate) fn tay<C: CpuRegs>(cpu: &mut C) {
    ldy(cpu, cpu.a());
}

pub(crate) fn txa<C: CpuRegs>(cpu: &mut C) {
    lda(cpu, cpu.x());
}

pub(crate) fn tya<C: CpuRegs>(cpu: &mut C) {
    lda(cpu, cpu.y());
}

pub(crate) fn tsx<C: CpuRegs>(cpu: &mut C) {
    ldx(cpu, cpu.sp());
}

/// TXS is the one transfer that leaves flags alone.
pub(crate) fn txs<C: CpuRegs>(cpu: &mut C) {
    cpu.set_sp(cpu.x());
}

pub(crate) fn inx<C: CpuRegs>(cpu: &mut C) {
    ldx(cpu, cpu.x().wrapping_add(1));
}

pub(crate) fn iny<C: CpuRegs>(cpu: &mut C) {
    ldy(cpu, cpu.y().wrapping_add(1));
}

pub(crate) fn dex<C: CpuRegs>(cpu: &mut C) {
    ldx(cpu, cpu.x().wrapping_sub(1));
}

pub(crate) fn dey<C: CpuRegs>(cpu: &mut C) {
    ldy(cpu, cpu.y().wrapping_sub(1));
}

// ---------------------------------------------------------------------------
// Logic / arithmetic
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn and<C: CpuRegs>(cpu: &mut C, v: u8) {
    lda(cpu, cpu.a() & v);
}

#[inline]
pub(crate) fn ora<C: CpuRegs>(cpu: &mut C, v: u8) {
    lda(cpu, cpu.a() | v);
}

#[inline]
pub(crate) fn eor<C: CpuRegs>(cpu: &mut C, v: u8) {
    lda(cpu, cpu.a() ^ v);
}

/// Z from A & v; N and V copied from bits 7 and 6 of the operand.
pub(crate) fn bit<C: CpuRegs>(cpu: &mut C, v: u8) {
    cpu.set_flag(Status::ZERO, cpu.a() & v == 0);
    cpu.set_flag(Status::NEGATIVE, v & 0x80 != 0);
    cpu.set_flag(Status::OVERFLOW, v & 0x40 != 0);
}

pub(crate) fn adc<C: CpuRegs>(cpu: &mut C, v: u8) {
    let a = cpu.a();
    let sum = a as u16 + v as u16 + cpu.carry_in() as u16;
    let r = sum as u8;
    cpu.set_flag(Status::CARRY, sum > 0xFF);
    cpu.set_flag(Status::OVERFLOW, (!(a ^ v) & (a ^ r) & 0x80) != 0);
    lda(cpu, r);
}

#[inline]
pub(crate) fn sbc<C: CpuRegs>(cpu: &mut C, v: u8) {
    adc(cpu, v ^ 0xFF);
}

/// CMP/CPX/CPY: subtract for flags only.
pub(crate) fn compare<C: CpuRegs>(cpu: &mut C, reg: u8, v: u8) {
    cpu.set_flag(Status::CARRY, reg >= v);
    cpu.update_zn(reg.wrapping_sub(v));
}

// ---------------------------------------------------------------------------
// Shifts / rotates / increments (value in, value out)
// ---------------------------------------------------------------------------

pub(crate) fn asl<C: CpuRegs>(cpu: &mut C, v: u8) -> u8 {
    cpu.set_flag(Status::CARRY, v & 0x80 != 0);
    let r = v << 1;
    cpu.update_zn(r);
    r
}

pub(crate) fn lsr<C: CpuRegs>(cpu: &mut C, v: u8) -> u8 {
    cpu.set_flag(Status::CARRY, v & 0x01 != 0);
    let r = v >> 1;
    cpu.update_zn(r);
    r
}

pub(crate) fn rol<C: CpuRegs>(cpu: &mut C, v: u8) -> u8 {
    let r = (v << 1) | cpu.carry_in();
    cpu.set_flag(Status::CARRY, v & 0x80 != 0);
    cpu.update_zn(r);
    r
}

pub(crate) fn ror<C: CpuRegs>(cpu: &mut C, v: u8) -> u8 {
    let r = (v >> 1) | (cpu.carry_in() << 7);
    cpu.set_flag(Status::CARRY, v & 0x01 != 0);
    cpu.update_zn(r);
    r
}

pub(crate) fn inc<C: CpuRegs>(cpu: &mut C, v: u8) -> u8 {
    let r = v.wrapping_add(1);
    cpu.update_zn(r);
    r
}

pub(crate) fn dec<C: CpuRegs>(cpu: &mut C, v: u8) -> u8 {
    let r = v.wrapping_sub(1);
    cpu.update_zn(r);
    r
}

/// Read-modify-write on memory. The 6502 writes the unmodified value back
/// before the result; mapper registers and PPU ports can observe both.
pub(crate) fn rmw_memory<C, B, F>(cpu: &mut C, bus: &mut B, addr: u16, f: F) -> u8
where
    C: CpuRegs,
    B: CpuBus,
    F: FnOnce(&mut C, u8) -> u8,
{
    let old = bus.read(addr);
    bus.write(addr, old);
    let new = f(cpu, old);
    bus.write(addr, new);
    new
}

// ---------------------------------------------------------------------------
// Branches
// ---------------------------------------------------------------------------

/// Whether a conditional branch is taken in the current flag state.
pub(crate) fn branch_taken<C: CpuRegs>(cpu: &C, op: Op) -> bool {
    match op {
        Op::Bpl => !cpu.flag(Status::NEGATIVE),
        Op::Bmi => cpu.flag(Status::NEGATIVE),
        Op::Bvc => !cpu.flag(Status::OVERFLOW),
        Op::Bvs => cpu.flag(Status::OVERFLOW),
        Op::Bcc => !cpu.flag(Status::CARRY),
        Op::Bcs => cpu.flag(Status::CARRY),
        Op::Bne => !cpu.flag(Status::ZERO),
        Op::Beq => cpu.flag(Status::ZERO),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Undocumented combinations
// ---------------------------------------------------------------------------

/// AND, then C = N.
pub(crate) fn anc<C: CpuRegs>(cpu: &mut C, v: u8) {
    and(cpu, v);
    cpu.set_flag(Status::CARRY, cpu.a() & 0x80 != 0);
}

/// AND, then LSR A.
pub(crate) fn alr<C: CpuRegs>(cpu: &mut C, v: u8) {
    let t = cpu.a() & v;
    let r = lsr(cpu, t);
    cpu.set_a(r);
}

/// AND, then ROR A with C from bit 6 and V from bit 6 ^ bit 5.
pub(crate) fn arr<C: CpuRegs>(cpu: &mut C, v: u8) {
    let t = cpu.a() & v;
    let r = (t >> 1) | (cpu.carry_in() << 7);
    lda(cpu, r);
    cpu.set_flag(Status::CARRY, r & 0x40 != 0);
    cpu.set_flag(Status::OVERFLOW, ((r >> 6) ^ (r >> 5)) & 1 != 0);
}

/// X = (A & X) - v, carry as in CMP, no borrow in.
pub(crate) fn axs<C: CpuRegs>(cpu: &mut C, v: u8) {
    let t = cpu.a() & cpu.x();
    cpu.set_flag(Status::CARRY, t >= v);
    ldx(cpu, t.wrapping_sub(v));
}

pub(crate) fn lax<C: CpuRegs>(cpu: &mut C, v: u8) {
    cpu.set_x(v);
    lda(cpu, v);
}

/// A, X and SP all become v & SP.
pub(crate) fn las<C: CpuRegs>(cpu: &mut C, v: u8) {
    let r = v & cpu.sp();
    cpu.set_sp(r);
    lax(cpu, r);
}

pub(crate) fn xaa<C: CpuRegs>(cpu: &mut C, v: u8) {
    lda(cpu, (cpu.a() | UNSTABLE_MAGIC) & cpu.x() & v);
}

pub(crate) fn lxa<C: CpuRegs>(cpu: &mut C, v: u8) {
    lax(cpu, (cpu.a() | UNSTABLE_MAGIC) & v);
}

/// SHA/SHX/SHY/TAS store: `value & (base_hi + 1)`. When indexing crossed a
/// page the high byte of the target is replaced by the stored value.
pub(crate) fn unstable_store<B: CpuBus>(bus: &mut B, addr: u16, base: u16, crossed: bool, value: u8) {
    let hi = ((base >> 8) as u8).wrapping_add(1);
    let stored = value & hi;
    let target = if crossed {
        ((stored as u16) << 8) | (addr & 0x00FF)
    } else {
        addr
    };
    bus.write(target, stored);
}
