/*!
misc.rs - Transfers, stack ops, flag ops and NOP.

Overview
========
Transfers:  TAX TAY TXA TYA TSX (set Z/N), TXS (no flags)
Stack:      PHA PHP (B and U set in the pushed copy), PLA (Z/N), PLP
Flags:      CLC SEC CLI SEI CLV CLD SED
NOP:        documented $EA plus the undocumented NOP variants. The ones
            with a memory operand perform the read.

Flag changes from CLI/SEI/PLP take effect for interrupt sampling at the
next instruction boundary.
*/

use crate::bus::CpuBus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{dex, dey, inx, iny, pha, php, pla, plp, tax, tay, tsx, txa, txs, tya};
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
        Op::Tax => tax(cpu),
        Op::Tay => tay(cpu),
        Op::Txa => txa(cpu),
        Op::Tya => tya(cpu),
        Op::Tsx => tsx(cpu),
        Op::Txs => txs(cpu),
        Op::Inx => inx(cpu),
        Op::Iny => iny(cpu),
        Op::Dex => dex(cpu),
        Op::Dey => dey(cpu),

        Op::Pha => pha(cpu, bus),
        Op::Php => php(cpu, bus),
        Op::Pla => pla(cpu, bus),
        Op::Plp => plp(cpu, bus),

        Op::Clc => cpu.set_flag(Status::CARRY, false),
        Op::Sec => cpu.set_flag(Status::CARRY, true),
        Op::Cli => cpu.set_flag(Status::IRQ_DISABLE, false),
        Op::Sei => cpu.set_flag(Status::IRQ_DISABLE, true),
        Op::Clv => cpu.set_flag(Status::OVERFLOW, false),
        Op::Cld => cpu.set_flag(Status::DECIMAL, false),
        Op::Sed => cpu.set_flag(Status::DECIMAL, true),

        Op::Nop => {
            if let Some(addr) = operand.addr {
                bus.read(addr);
            }
        }
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use crate::config::{Config, IllegalOpcodePolicy};
    use crate::cpu::status::Status;
    use crate::test_utils::{setup, setup_with};

    #[test]
    fn txs_sets_no_flags_tsx_does() {
        // LDX #$00; TXS; LDX #$01; TSX
        let (mut cpu, mut bus) = setup(&[0xA2, 0x00, 0x9A, 0xA2, 0x01, 0xBA]);
        cpu.step(&mut bus);
        cpu.step(&mut bus);
        assert_eq!(cpu.sp(), 0x00);
        cpu.step(&mut bus);
        assert!(!cpu.status().contains(Status::ZERO));
        cpu.step(&mut bus);
        assert_eq!(cpu.x(), 0x00);
        assert!(cpu.status().contains(Status::ZERO));
    }

    #[test]
    fn php_pushes_break_and_unused() {
        // CLI; PHP
        let (mut cpu, mut bus) = setup(&[0x58, 0x08]);
        cpu.step(&mut bus);
        assert_eq!(cpu.step(&mut bus), 3);
        assert_eq!(bus.read(0x01FD), 0x30);
        assert!(!cpu.status().contains(Status::BREAK));
    }

    #[test]
    fn pha_pla_round_trip() {
        // LDA #$80; PHA; LDA #$00; PLA
        let (mut cpu, mut bus) = setup(&[0xA9, 0x80, 0x48, 0xA9, 0x00, 0x68]);
        cpu.step(&mut bus);
        assert_eq!(cpu.step(&mut bus), 3);
        cpu.step(&mut bus);
        assert_eq!(cpu.step(&mut bus), 4);
        assert_eq!(cpu.a(), 0x80);
        assert!(cpu.status().contains(Status::NEGATIVE));
        assert_eq!(cpu.sp(), 0xFD);
    }

    #[test]
    fn flag_instructions() {
        // SEC; SED; CLV; CLC; CLD
        let (mut cpu, mut bus) = setup(&[0x38, 0xF8, 0xB8, 0x18, 0xD8]);
        cpu.step(&mut bus);
        cpu.step(&mut bus);
        assert!(cpu.status().contains(Status::CARRY | Status::DECIMAL));
        cpu.step(&mut bus);
        cpu.step(&mut bus);
        cpu.step(&mut bus);
        assert!(!cpu.status().intersects(Status::CARRY | Status::DECIMAL));
    }

    #[test]
    fn unofficial_nop_reads_operand() {
        // $0C NOP abs reading $0200 under Unofficial policy: 4 cycles.
        let config = Config::default().with_illegal_opcodes(IllegalOpcodePolicy::Unofficial);
        let (mut cpu, mut bus) = setup_with(&[0x0C, 0x00, 0x02], config);
        assert_eq!(cpu.step(&mut bus), 4);
        assert_eq!(cpu.pc(), 0x8003);
    }
}
