/*!
unofficial.rs - Undocumented NMOS opcodes (only reached under
`IllegalOpcodePolicy::Unofficial`).

Overview
========
Combined read-modify-write (dummy write like the documented RMW ops):
    SLO = ASL + ORA     RLA = ROL + AND
    SRE = LSR + EOR     RRA = ROR + ADC
    DCP = DEC + CMP     ISC = INC + SBC

Loads / stores:
    LAX  A = X = M
    SAX  M = A & X
    LAS  A = X = SP = M & SP

Immediate combinations:
    ANC ALR ARR AXS XAA LXA

Unstable stores (value ANDed with the high byte of the base address + 1):
    SHA  A & X      SHX  X      SHY  Y
    TAS  SP = A & X, then store as SHA

JAM and the NOP/SBC twins never get here: dispatch halts on JAM, and the
twins decode to the documented `Op`.
*/

use crate::bus::CpuBus;
use crate::cpu::addressing::Operand;
use crate::cpu::dispatch::{effective_addr, read_operand};
use crate::cpu::execute::{
    adc, alr, and, anc, arr, asl, axs, compare, dec, eor, inc, las, lax, lsr, lxa, ora,
    rmw_memory, rol, ror, sbc, unstable_store, xaa,
};
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
        Op::Slo | Op::Rla | Op::Sre | Op::Rra | Op::Dcp | Op::Isc => {
            combined_rmw(instr.op, effective_addr(operand), cpu, bus);
        }

        Op::Lax => {
            let v = read_operand(operand, cpu, bus);
            lax(cpu, v);
        }
        Op::Sax => {
            let v = cpu.a() & cpu.x();
            bus.write(effective_addr(operand), v);
        }
        Op::Las => {
            let v = read_operand(operand, cpu, bus);
            las(cpu, v);
        }

        Op::Anc | Op::Alr | Op::Arr | Op::Axs | Op::Xaa | Op::Lxa => {
            let v = read_operand(operand, cpu, bus);
            match instr.op {
                Op::Anc => anc(cpu, v),
                Op::Alr => alr(cpu, v),
                Op::Arr => arr(cpu, v),
                Op::Axs => axs(cpu, v),
                Op::Xaa => xaa(cpu, v),
                _ => lxa(cpu, v),
            }
        }

        Op::Sha | Op::Shx | Op::Shy | Op::Tas => {
            let value = match instr.op {
                Op::Sha => cpu.a() & cpu.x(),
                Op::Shx => cpu.x(),
                Op::Shy => cpu.y(),
                _ => {
                    let sp = cpu.a() & cpu.x();
                    cpu.set_sp(sp);
                    sp
                }
            };
            let addr = effective_addr(operand);
            unstable_store(bus, addr, operand.base, operand.page_crossed, value);
        }
        _ => return false,
    }
    true
}

fn combined_rmw<C: CpuRegs, B: CpuBus>(op: Op, addr: u16, cpu: &mut C, bus: &mut B) {
    match op {
        Op::Slo => {
            let m = rmw_memory(cpu, bus, addr, asl);
            ora(cpu, m);
        }
        Op::Rla => {
            let m = rmw_memory(cpu, bus, addr, rol);
            and(cpu, m);
        }
        Op::Sre => {
            let m = rmw_memory(cpu, bus, addr, lsr);
            eor(cpu, m);
        }
        Op::Rra => {
            let m = rmw_memory(cpu, bus, addr, ror);
            adc(cpu, m);
        }
        Op::Isc => {
            let m = rmw_memory(cpu, bus, addr, inc);
            sbc(cpu, m);
        }
        _ => {
            let m = rmw_memory(cpu, bus, addr, dec);
            let a = cpu.a();
            compare(cpu, a, m);
        }
    }
}
