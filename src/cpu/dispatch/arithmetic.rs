/*!
arithmetic.rs - ADC / SBC.

Binary only: the 2A03 ignores the D flag. SBC (including the undocumented
$EB twin) is ADC of the operand's complement.
*/

use crate::bus::CpuBus;
use crate::cpu::addressing::Operand;
use crate::cpu::dispatch::read_operand;
use crate::cpu::execute::{adc, sbc};
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
        Op::Adc => {
            let v = read_operand(operand, cpu, bus);
            adc(cpu, v);
        }
        Op::Sbc => {
            let v = read_operand(operand, cpu, bus);
            sbc(cpu, v);
        }
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use crate::cpu::status::Status;
    use crate::test_utils::setup;

    #[test]
    fn adc_overflow_example() {
        // CLC; LDA #$50; ADC #$50
        let (mut cpu, mut bus) = setup(&[0x18, 0xA9, 0x50, 0x69, 0x50]);
        for _ in 0..3 {
            cpu.step(&mut bus);
        }
        assert_eq!(cpu.a(), 0xA0);
        let p = cpu.status();
        assert!(p.contains(Status::OVERFLOW));
        assert!(p.contains(Status::NEGATIVE));
        assert!(!p.contains(Status::CARRY));
        assert!(!p.contains(Status::ZERO));
    }

    #[test]
    fn sbc_with_borrow() {
        // SEC; LDA #$00; SBC #$01
        let (mut cpu, mut bus) = setup(&[0x38, 0xA9, 0x00, 0xE9, 0x01]);
        for _ in 0..3 {
            cpu.step(&mut bus);
        }
        assert_eq!(cpu.a(), 0xFF);
        assert!(!cpu.status().contains(Status::CARRY));
        assert!(cpu.status().contains(Status::NEGATIVE));
    }

    #[test]
    fn decimal_flag_is_ignored() {
        // SED; CLC; LDA #$09; ADC #$01
        let (mut cpu, mut bus) = setup(&[0xF8, 0x18, 0xA9, 0x09, 0x69, 0x01]);
        for _ in 0..4 {
            cpu.step(&mut bus);
        }
        assert_eq!(cpu.a(), 0x0A);
    }
}
