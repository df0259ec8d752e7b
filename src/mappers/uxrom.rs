/*
UxROM (Mapper 2).

Characteristics:
- PRG: 16 KiB switchable bank at $8000-$BFFF, last bank fixed at $C000-$FFFF.
- Bank select: any CPU write to $8000-$FFFF; value modulo bank count.
- CHR: a single 8 KiB bank, almost always RAM.
- Optional PRG RAM at $6000-$7FFF on some boards.
- Mirroring fixed by the board, no IRQ.
*/

use log::trace;

use crate::error::ConfigError;
use crate::mapper::{
    BankState, CHR_BANK_SIZE, CartridgeLayout, CpuMapping, Mapper, Mirroring, PRG_BANK_SIZE,
    WriteEffect, check_prg_ram, prg_ram_offset,
};

#[derive(Debug, Clone)]
pub struct Uxrom {
    prg_bank: usize,
    prg_bank_count: usize,
    prg_ram_len: usize,
    chr_len: usize,
    mirroring: Mirroring,
}

impl Uxrom {
    pub fn new(layout: &CartridgeLayout) -> Result<Self, ConfigError> {
        if layout.prg_rom_len == 0 {
            return Err(ConfigError::EmptyPrgRom);
        }
        if layout.prg_rom_len % PRG_BANK_SIZE != 0 {
            return Err(ConfigError::PrgRomSize {
                mapper: "UxROM",
                bank_size: PRG_BANK_SIZE,
                len: layout.prg_rom_len,
            });
        }
        if layout.chr_len != CHR_BANK_SIZE {
            return Err(ConfigError::ChrSize {
                mapper: "UxROM",
                bank_size: CHR_BANK_SIZE,
                len: layout.chr_len,
            });
        }
        check_prg_ram("UxROM", layout.prg_ram_len)?;
        Ok(Self {
            prg_bank: 0,
            prg_bank_count: layout.prg_rom_len / PRG_BANK_SIZE,
            prg_ram_len: layout.prg_ram_len,
            chr_len: layout.chr_len,
            mirroring: layout.mirroring,
        })
    }

    #[inline]
    fn last_bank(&self) -> usize {
        self.prg_bank_count - 1
    }
}

impl Mapper for Uxrom {
    fn mapper_id(&self) -> u16 {
        2
    }

    fn name(&self) -> &'static str {
        "UxROM"
    }

    fn translate_read(&self, addr: u16) -> CpuMapping {
        let within = addr as usize & (PRG_BANK_SIZE - 1);
        match addr {
            0x8000..=0xBFFF => CpuMapping::PrgRom(self.prg_bank * PRG_BANK_SIZE + within),
            0xC000..=0xFFFF => CpuMapping::PrgRom(self.last_bank() * PRG_BANK_SIZE + within),
            _ => match prg_ram_offset(addr, self.prg_ram_len) {
                Some(off) => CpuMapping::PrgRam(off),
                None => CpuMapping::Unmapped,
            },
        }
    }

    fn translate_write(&mut self, addr: u16, value: u8) -> WriteEffect {
        match addr {
            0x8000..=0xFFFF => {
                self.prg_bank = value as usize % self.prg_bank_count;
                trace!("UxROM: PRG bank {}", self.prg_bank);
                WriteEffect::BankSwitch
            }
            _ => match prg_ram_offset(addr, self.prg_ram_len) {
                Some(off) => WriteEffect::PrgRam(off),
                None => WriteEffect::Unmapped,
            },
        }
    }

    fn translate_ppu(&self, addr: u16) -> Option<usize> {
        match addr {
            0x0000..=0x1FFF => Some(addr as usize % self.chr_len),
            _ => None,
        }
    }

    fn mirroring(&self) -> Mirroring {
        self.mirroring
    }

    fn banks(&self) -> BankState {
        BankState {
            prg_bank_count: self.prg_bank_count,
            chr_bank_count: 1,
            prg_bank: self.prg_bank,
            chr_bank: 0,
        }
    }

    fn reset(&mut self) {
        self.prg_bank = 0;
    }
}
