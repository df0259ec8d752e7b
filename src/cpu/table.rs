/*!
table.rs - The 256-entry opcode table.

Each opcode byte indexes one `Instruction`: the operation, its addressing
mode, its base cycle count, whether a page crossing adds a cycle, and whether
the opcode is documented. The table is a `static` built by a const fn and
checked at compile time; a malformed entry is a build error, never a runtime
condition.

Page penalty
============
Only indexed *reads* (abs,X / abs,Y / (zp),Y loads, ALU ops, compares, LAX,
LAS, and the undocumented NOPs that read) carry `page_penalty`. Stores and
read-modify-write entries in the same modes already include the extra cycle
in `cycles`, because the hardware always spends it.

Undocumented opcodes
====================
Every byte is defined. Undocumented entries use the widely published
mnemonics (LAX, SAX, DCP, ISC, SLO, RLA, SRE, RRA, ANC, ALR, ARR, AXS, XAA,
LXA, SHA, SHX, SHY, TAS, LAS, JAM); how they execute is chosen by
`IllegalOpcodePolicy`.
*/

use crate::cpu::addressing::AddrMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    // Documented
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    // Undocumented
    Alr,
    Anc,
    Arr,
    Axs,
    Dcp,
    Isc,
    Jam,
    Las,
    Lax,
    Lxa,
    Rla,
    Rra,
    Sax,
    Sha,
    Shx,
    Shy,
    Slo,
    Sre,
    Tas,
    Xaa,
}

impl Op {
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Op::Adc => "ADC",
            Op::And => "AND",
            Op::Asl => "ASL",
            Op::Bcc => "BCC",
            Op::Bcs => "BCS",
            Op::Beq => "BEQ",
            Op::Bit => "BIT",
            Op::Bmi => "BMI",
            Op::Bne => "BNE",
            Op::Bpl => "BPL",
            Op::Brk => "BRK",
            Op::Bvc => "BVC",
            Op::Bvs => "BVS",
            Op::Clc => "CLC",
            Op::Cld => "CLD",
            Op::Cli => "CLI",
            Op::Clv => "CLV",
            Op::Cmp => "CMP",
            Op::Cpx => "CPX",
            Op::Cpy => "CPY",
            Op::Dec => "DEC",
            Op::Dex => "DEX",
            Op::Dey => "DEY",
            Op::Eor => "EOR",
            Op::Inc => "INC",
            Op::Inx => "INX",
            Op::Iny => "INY",
            Op::Jmp => "JMP",
            Op::Jsr => "JSR",
            Op::Lda => "LDA",
            Op::Ldx => "LDX",
            Op::Ldy => "LDY",
            Op::Lsr => "LSR",
            Op::Nop => "NOP",
            Op::Ora => "ORA",
            Op::Pha => "PHA",
            Op::Php => "PHP",
            Op::Pla => "PLA",
            Op::Plp => "PLP",
            Op::Rol => "ROL",
            Op::Ror => "ROR",
            Op::Rti => "RTI",
            Op::Rts => "RTS",
            Op::Sbc => "SBC",
            Op::Sec => "SEC",
            Op::Sed => "SED",
            Op::Sei => "SEI",
            Op::Sta => "STA",
            Op::Stx => "STX",
            Op::Sty => "STY",
            Op::Tax => "TAX",
            Op::Tay => "TAY",
            Op::Tsx => "TSX",
            Op::Txa => "TXA",
            Op::Txs => "TXS",
            Op::Tya => "TYA",
            Op::Alr => "ALR",
            Op::Anc => "ANC",
            Op::Arr => "ARR",
            Op::Axs => "AXS",
            Op::Dcp => "DCP",
            Op::Isc => "ISC",
            Op::Jam => "JAM",
            Op::Las => "LAS",
            Op::Lax => "LAX",
            Op::Lxa => "LXA",
            Op::Rla => "RLA",
            Op::Rra => "RRA",
            Op::Sax => "SAX",
            Op::Sha => "SHA",
            Op::Shx => "SHX",
            Op::Shy => "SHY",
            Op::Slo => "SLO",
            Op::Sre => "SRE",
            Op::Tas => "TAS",
            Op::Xaa => "XAA",
        }
    }

    /// Conditional branches (relative mode, 2/3/4 cycles).
    pub const fn is_branch(self) -> bool {
        matches!(
            self,
            Op::Bcc | Op::Bcs | Op::Beq | Op::Bmi | Op::Bne | Op::Bpl | Op::Bvc | Op::Bvs
        )
    }
}

/// One opcode's decode entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub op: Op,
    pub mode: AddrMode,
    pub cycles: u8,
    pub page_penalty: bool,
    pub official: bool,
}

const fn doc(op: Op, mode: AddrMode, cycles: u8) -> Instruction {
    Instruction {
        op,
        mode,
        cycles,
        page_penalty: false,
        official: true,
    }
}

const fn doc_px(op: Op, mode: AddrMode, cycles: u8) -> Instruction {
    Instruction {
        page_penalty: true,
        ..doc(op, mode, cycles)
    }
}

const fn ill(op: Op, mode: AddrMode, cycles: u8) -> Instruction {
    Instruction {
        official: false,
        ..doc(op, mode, cycles)
    }
}

const fn ill_px(op: Op, mode: AddrMode, cycles: u8) -> Instruction {
    Instruction {
        official: false,
        ..doc_px(op, mode, cycles)
    }
}

#[rustfmt::skip]
const TABLE: [Instruction; 256] = {
    use AddrMode::*;
    use Op::*;
    [
        // 0x00
        doc(Brk, Implied, 7),    doc(Ora, IndirectX, 6),  ill(Jam, Implied, 2),    ill(Slo, IndirectX, 8),
        ill(Nop, ZeroPage, 3),   doc(Ora, ZeroPage, 3),   doc(Asl, ZeroPage, 5),   ill(Slo, ZeroPage, 5),
        doc(Php, Implied, 3),    doc(Ora, Immediate, 2),  doc(Asl, Accumulator, 2), ill(Anc, Immediate, 2),
        ill(Nop, Absolute, 4),   doc(Ora, Absolute, 4),   doc(Asl, Absolute, 6),   ill(Slo, Absolute, 6),
        // 0x10
        doc(Bpl, Relative, 2),   doc_px(Ora, IndirectY, 5), ill(Jam, Implied, 2),  ill(Slo, IndirectY, 8),
        ill(Nop, ZeroPageX, 4),  doc(Ora, ZeroPageX, 4),  doc(Asl, ZeroPageX, 6),  ill(Slo, ZeroPageX, 6),
        doc(Clc, Implied, 2),    doc_px(Ora, AbsoluteY, 4), ill(Nop, Implied, 2),  ill(Slo, AbsoluteY, 7),
        ill_px(Nop, AbsoluteX, 4), doc_px(Ora, AbsoluteX, 4), doc(Asl, AbsoluteX, 7), ill(Slo, AbsoluteX, 7),
        // 0x20
        doc(Jsr, Absolute, 6),   doc(And, IndirectX, 6),  ill(Jam, Implied, 2),    ill(Rla, IndirectX, 8),
        doc(Bit, ZeroPage, 3),   doc(And, ZeroPage, 3),   doc(Rol, ZeroPage, 5),   ill(Rla, ZeroPage, 5),
        doc(Plp, Implied, 4),    doc(And, Immediate, 2),  doc(Rol, Accumulator, 2), ill(Anc, Immediate, 2),
        doc(Bit, Absolute, 4),   doc(And, Absolute, 4),   doc(Rol, Absolute, 6),   ill(Rla, Absolute, 6),
        // 0x30
        doc(Bmi, Relative, 2),   doc_px(And, IndirectY, 5), ill(Jam, Implied, 2),  ill(Rla, IndirectY, 8),
        ill(Nop, ZeroPageX, 4),  doc(And, ZeroPageX, 4),  doc(Rol, ZeroPageX, 6),  ill(Rla, ZeroPageX, 6),
        doc(Sec, Implied, 2),    doc_px(And, AbsoluteY, 4), ill(Nop, Implied, 2),  ill(Rla, AbsoluteY, 7),
        ill_px(Nop, AbsoluteX, 4), doc_px(And, AbsoluteX, 4), doc(Rol, AbsoluteX, 7), ill(Rla, AbsoluteX, 7),
        // 0x40
        doc(Rti, Implied, 6),    doc(Eor, IndirectX, 6),  ill(Jam, Implied, 2),    ill(Sre, IndirectX, 8),
        ill(Nop, ZeroPage, 3),   doc(Eor, ZeroPage, 3),   doc(Lsr, ZeroPage, 5),   ill(Sre, ZeroPage, 5),
        doc(Pha, Implied, 3),    doc(Eor, Immediate, 2),  doc(Lsr, Accumulator, 2), ill(Alr, Immediate, 2),
        doc(Jmp, Absolute, 3),   doc(Eor, Absolute, 4),   doc(Lsr, Absolute, 6),   ill(Sre, Absolute, 6),
        // 0x50
        doc(Bvc, Relative, 2),   doc_px(Eor, IndirectY, 5), ill(Jam, Implied, 2),  ill(Sre, IndirectY, 8),
        ill(Nop, ZeroPageX, 4),  doc(Eor, ZeroPageX, 4),  doc(Lsr, ZeroPageX, 6),  ill(Sre, ZeroPageX, 6),
        doc(Cli, Implied, 2),    doc_px(Eor, AbsoluteY, 4), ill(Nop, Implied, 2),  ill(Sre, AbsoluteY, 7),
        ill_px(Nop, AbsoluteX, 4), doc_px(Eor, AbsoluteX, 4), doc(Lsr, AbsoluteX, 7), ill(Sre, AbsoluteX, 7),
        // 0x60
        doc(Rts, Implied, 6),    doc(Adc, IndirectX, 6),  ill(Jam, Implied, 2),    ill(Rra, IndirectX, 8),
        ill(Nop, ZeroPage, 3),   doc(Adc, ZeroPage, 3),   doc(Ror, ZeroPage, 5),   ill(Rra, ZeroPage, 5),
        doc(Pla, Implied, 4),    doc(Adc, Immediate, 2),  doc(Ror, Accumulator, 2), ill(Arr, Immediate, 2),
        doc(Jmp, Indirect, 5),   doc(Adc, Absolute, 4),   doc(Ror, Absolute, 6),   ill(Rra, Absolute, 6),
        // 0x70
        doc(Bvs, Relative, 2),   doc_px(Adc, IndirectY, 5), ill(Jam, Implied, 2),  ill(Rra, IndirectY, 8),
        ill(Nop, ZeroPageX, 4),  doc(Adc, ZeroPageX, 4),  doc(Ror, ZeroPageX, 6),  ill(Rra, ZeroPageX, 6),
        doc(Sei, Implied, 2),    doc_px(Adc, AbsoluteY, 4), ill(Nop, Implied, 2),  ill(Rra, AbsoluteY, 7),
        ill_px(Nop, AbsoluteX, 4), doc_px(Adc, AbsoluteX, 4), doc(Ror, AbsoluteX, 7), ill(Rra, AbsoluteX, 7),
        // 0x80
        ill(Nop, Immediate, 2),  doc(Sta, IndirectX, 6),  ill(Nop, Immediate, 2),  ill(Sax, IndirectX, 6),
        doc(Sty, ZeroPage, 3),   doc(Sta, ZeroPage, 3),   doc(Stx, ZeroPage, 3),   ill(Sax, ZeroPage, 3),
        doc(Dey, Implied, 2),    ill(Nop, Immediate, 2),  doc(Txa, Implied, 2),    ill(Xaa, Immediate, 2),
        doc(Sty, Absolute, 4),   doc(Sta, Absolute, 4),   doc(Stx, Absolute, 4),   ill(Sax, Absolute, 4),
        // 0x90
        doc(Bcc, Relative, 2),   doc(Sta, IndirectY, 6),  ill(Jam, Implied, 2),    ill(Sha, IndirectY, 6),
        doc(Sty, ZeroPageX, 4),  doc(Sta, ZeroPageX, 4),  doc(Stx, ZeroPageY, 4),  ill(Sax, ZeroPageY, 4),
        doc(Tya, Implied, 2),    doc(Sta, AbsoluteY, 5),  doc(Txs, Implied, 2),    ill(Tas, AbsoluteY, 5),
        ill(Shy, AbsoluteX, 5),  doc(Sta, AbsoluteX, 5),  ill(Shx, AbsoluteY, 5),  ill(Sha, AbsoluteY, 5),
        // 0xA0
        doc(Ldy, Immediate, 2),  doc(Lda, IndirectX, 6),  doc(Ldx, Immediate, 2),  ill(Lax, IndirectX, 6),
        doc(Ldy, ZeroPage, 3),   doc(Lda, ZeroPage, 3),   doc(Ldx, ZeroPage, 3),   ill(Lax, ZeroPage, 3),
        doc(Tay, Implied, 2),    doc(Lda, Immediate, 2),  doc(Tax, Implied, 2),    ill(Lxa, Immediate, 2),
        doc(Ldy, Absolute, 4),   doc(Lda, Absolute, 4),   doc(Ldx, Absolute, 4),   ill(Lax, Absolute, 4),
        // 0xB0
        doc(Bcs, Relative, 2),   doc_px(Lda, IndirectY, 5), ill(Jam, Implied, 2),  ill_px(Lax, IndirectY, 5),
        doc(Ldy, ZeroPageX, 4),  doc(Lda, ZeroPageX, 4),  doc(Ldx, ZeroPageY, 4),  ill(Lax, ZeroPageY, 4),
        doc(Clv, Implied, 2),    doc_px(Lda, AbsoluteY, 4), doc(Tsx, Implied, 2),  ill_px(Las, AbsoluteY, 4),
        doc_px(Ldy, AbsoluteX, 4), doc_px(Lda, AbsoluteX, 4), doc_px(Ldx, AbsoluteY, 4), ill_px(Lax, AbsoluteY, 4),
        // 0xC0
        doc(Cpy, Immediate, 2),  doc(Cmp, IndirectX, 6),  ill(Nop, Immediate, 2),  ill(Dcp, IndirectX, 8),
        doc(Cpy, ZeroPage, 3),   doc(Cmp, ZeroPage, 3),   doc(Dec, ZeroPage, 5),   ill(Dcp, ZeroPage, 5),
        doc(Iny, Implied, 2),    doc(Cmp, Immediate, 2),  doc(Dex, Implied, 2),    ill(Axs, Immediate, 2),
        doc(Cpy, Absolute, 4),   doc(Cmp, Absolute, 4),   doc(Dec, Absolute, 6),   ill(Dcp, Absolute, 6),
        // 0xD0
        doc(Bne, Relative, 2),   doc_px(Cmp, IndirectY, 5), ill(Jam, Implied, 2),  ill(Dcp, IndirectY, 8),
        ill(Nop, ZeroPageX, 4),  doc(Cmp, ZeroPageX, 4),  doc(Dec, ZeroPageX, 6),  ill(Dcp, ZeroPageX, 6),
        doc(Cld, Implied, 2),    doc_px(Cmp, AbsoluteY, 4), ill(Nop, Implied, 2),  ill(Dcp, AbsoluteY, 7),
        ill_px(Nop, AbsoluteX, 4), doc_px(Cmp, AbsoluteX, 4), doc(Dec, AbsoluteX, 7), ill(Dcp, AbsoluteX, 7),
        // 0xE0
        doc(Cpx, Immediate, 2),  doc(Sbc, IndirectX, 6),  ill(Nop, Immediate, 2),  ill(Isc, IndirectX, 8),
        doc(Cpx, ZeroPage, 3),   doc(Sbc, ZeroPage, 3),   doc(Inc, ZeroPage, 5),   ill(Isc, ZeroPage, 5),
        doc(Inx, Implied, 2),    doc(Sbc, Immediate, 2),  doc(Nop, Implied, 2),    ill(Sbc, Immediate, 2),
        doc(Cpx, Absolute, 4),   doc(Sbc, Absolute, 4),   doc(Inc, Absolute, 6),   ill(Isc, Absolute, 6),
        // 0xF0
        doc(Beq, Relative, 2),   doc_px(Sbc, IndirectY, 5), ill(Jam, Implied, 2),  ill(Isc, IndirectY, 8),
        ill(Nop, ZeroPageX, 4),  doc(Sbc, ZeroPageX, 4),  doc(Inc, ZeroPageX, 6),  ill(Isc, ZeroPageX, 6),
        doc(Sed, Implied, 2),    doc_px(Sbc, AbsoluteY, 4), ill(Nop, Implied, 2),  ill(Isc, AbsoluteY, 7),
        ill_px(Nop, AbsoluteX, 4), doc_px(Sbc, AbsoluteX, 4), doc(Inc, AbsoluteX, 7), ill(Isc, AbsoluteX, 7),
    ]
};

/// Check structural rules; returns the number of documented opcodes.
const fn validate(table: &[Instruction; 256]) -> usize {
    let mut documented = 0;
    let mut i = 0;
    while i < 256 {
        let e = &table[i];
        assert!(e.cycles >= 2 && e.cycles <= 8, "base cycles outside 2..=8");
        if e.page_penalty {
            assert!(
                e.mode.has_page_penalty(),
                "page penalty on a mode that cannot cross"
            );
        }
        if e.op.is_branch() {
            assert!(
                matches!(e.mode, AddrMode::Relative) && e.cycles == 2,
                "branch must be relative, 2 base cycles"
            );
        }
        if e.official {
            documented += 1;
        }
        i += 1;
    }
    documented
}

const _: () = assert!(validate(&TABLE) == 151, "expected 151 documented opcodes");

/// Opcode table, indexed by opcode byte.
pub static OPCODES: [Instruction; 256] = TABLE;

#[inline]
pub fn lookup(opcode: u8) -> &'static Instruction {
    &OPCODES[opcode as usize]
}
