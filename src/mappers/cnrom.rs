/*
CNROM (Mapper 3).

Characteristics:
- PRG: fixed, 16 KiB mirrored or 32 KiB direct at $8000-$FFFF.
- CHR: 8 KiB banks selected by any CPU write to $8000-$FFFF.
- Mirroring: fixed by the board.
- No PRG RAM, no IRQ.

Bank select:
- Boards decode two bits; the value is reduced modulo the bank count so
  oversized CHR images still switch sensibly.
*/

use log::trace;

use crate::error::ConfigError;
use crate::mapper::{
    BankState, CHR_BANK_SIZE, CartridgeLayout, CpuMapping, Mapper, Mirroring, PRG_BANK_SIZE,
    WriteEffect,
};

#[derive(Debug, Clone)]
pub struct Cnrom {
    prg_rom_len: usize,
    chr_bank: usize,
    chr_bank_count: usize,
    mirroring: Mirroring,
}

impl Cnrom {
    pub fn new(layout: &CartridgeLayout) -> Result<Self, ConfigError> {
        if layout.prg_rom_len == 0 {
            return Err(ConfigError::EmptyPrgRom);
        }
        if layout.prg_rom_len != PRG_BANK_SIZE && layout.prg_rom_len != 2 * PRG_BANK_SIZE {
            return Err(ConfigError::PrgRomSize {
                mapper: "CNROM",
                bank_size: PRG_BANK_SIZE,
                len: layout.prg_rom_len,
            });
        }
        if layout.chr_len == 0 || layout.chr_len % CHR_BANK_SIZE != 0 {
            return Err(ConfigError::ChrSize {
                mapper: "CNROM",
                bank_size: CHR_BANK_SIZE,
                len: layout.chr_len,
            });
        }
        if layout.prg_ram_len != 0 {
            return Err(ConfigError::PrgRamSize {
                mapper: "CNROM",
                len: layout.prg_ram_len,
            });
        }
        Ok(Self {
            prg_rom_len: layout.prg_rom_len,
            chr_bank: 0,
            chr_bank_count: layout.chr_len / CHR_BANK_SIZE,
            mirroring: layout.mirroring,
        })
    }
}

impl Mapper for Cnrom {
    fn mapper_id(&self) -> u16 {
        3
    }

    fn name(&self) -> &'static str {
        "CNROM"
    }

    fn translate_read(&self, addr: u16) -> CpuMapping {
        match addr {
            0x8000..=0xFFFF => CpuMapping::PrgRom((addr as usize - 0x8000) % self.prg_rom_len),
            _ => CpuMapping::Unmapped,
        }
    }

    fn translate_write(&mut self, addr: u16, value: u8) -> WriteEffect {
        match addr {
            0x8000..=0xFFFF => {
                self.chr_bank = value as usize % self.chr_bank_count;
                trace!("CNROM: CHR bank {}", self.chr_bank);
                WriteEffect::BankSwitch
            }
            _ => WriteEffect::Unmapped,
        }
    }

    fn translate_ppu(&self, addr: u16) -> Option<usize> {
        match addr {
            0x0000..=0x1FFF => Some(self.chr_bank * CHR_BANK_SIZE + addr as usize),
            _ => None,
        }
    }

    fn mirroring(&self) -> Mirroring {
        self.mirroring
    }

    fn banks(&self) -> BankState {
        BankState {
            prg_bank_count: self.prg_rom_len / PRG_BANK_SIZE,
            chr_bank_count: self.chr_bank_count,
            prg_bank: 0,
            chr_bank: self.chr_bank,
        }
    }

    fn reset(&mut self) {
        self.chr_bank = 0;
    }
}
