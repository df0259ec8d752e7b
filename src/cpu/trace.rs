//! Disassembler and execution trace formatting.
//!
//! Decoding reads through `CpuBus::peek`, so tracing never disturbs
//! peripherals or the open-bus latch. Undocumented opcodes are prefixed with
//! `*`, as in the nestest logs.

use std::fmt;

use crate::bus::CpuBus;
use crate::cpu::addressing::AddrMode;
use crate::cpu::table::lookup;

/// One decoded instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disassembly {
    pub pc: u16,
    pub bytes: [u8; 3],
    pub len: u8,
    /// Mnemonic and operand in standard 6502 syntax, e.g. `LDA ($20),Y`.
    pub text: String,
}

impl Disassembly {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }
}

impl fmt::Display for Disassembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self
            .bytes()
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{:04X}  {hex:<8}  {}", self.pc, self.text)
    }
}

/// Decode the instruction at `pc`. `None` if any of its bytes sit where a
/// side-effect-free read is impossible (peripheral registers, unmapped).
pub fn disassemble<B: CpuBus>(bus: &B, pc: u16) -> Option<Disassembly> {
    let opcode = bus.peek(pc)?;
    let instr = lookup(opcode);
    let len = 1 + instr.mode.operand_len();

    let mut bytes = [opcode, 0, 0];
    for i in 1..len {
        bytes[i as usize] = bus.peek(pc.wrapping_add(i))?;
    }
    let lo = bytes[1];
    let word = u16::from_le_bytes([bytes[1], bytes[2]]);

    let operand = match instr.mode {
        AddrMode::Implied => String::new(),
        AddrMode::Accumulator => "A".to_string(),
        AddrMode::Immediate => format!("#${lo:02X}"),
        AddrMode::ZeroPage => format!("${lo:02X}"),
        AddrMode::ZeroPageX => format!("${lo:02X},X"),
        AddrMode::ZeroPageY => format!("${lo:02X},Y"),
        AddrMode::Absolute => format!("${word:04X}"),
        AddrMode::AbsoluteX => format!("${word:04X},X"),
        AddrMode::AbsoluteY => format!("${word:04X},Y"),
        AddrMode::Indirect => format!("(${word:04X})"),
        AddrMode::IndirectX => format!("(${lo:02X},X)"),
        AddrMode::IndirectY => format!("(${lo:02X}),Y"),
        AddrMode::Relative => {
            let target = pc.wrapping_add(2).wrapping_add(lo as i8 as u16);
            format!("${target:04X}")
        }
    };

    let marker = if instr.official { "" } else { "*" };
    let mnemonic = instr.op.mnemonic();
    let text = if operand.is_empty() {
        format!("{marker}{mnemonic}")
    } else {
        format!("{marker}{mnemonic} {operand}")
    };

    Some(Disassembly {
        pc,
        bytes,
        len: len as u8,
        text,
    })
}

/// Linear sweep over `start..=end`. Bytes that cannot be peeked are
/// skipped one at a time; an instruction straddling `end` is still listed.
pub fn disassemble_range<B: CpuBus>(bus: &B, start: u16, end: u16) -> Vec<Disassembly> {
    let mut out = Vec::new();
    let mut cursor = start as u32;
    while cursor <= end as u32 {
        match disassemble(bus, cursor as u16) {
            Some(d) => {
                cursor += d.len as u32;
                out.push(d);
            }
            None => cursor += 1,
        }
    }
    out
}
