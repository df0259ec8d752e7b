/*!
Cartridge storage behind a Mapper.

Features:
- Own the PRG ROM, PRG RAM and CHR (ROM or RAM) bytes of an already-parsed
  cartridge image. File formats are parsed elsewhere; this crate receives a
  `CartridgeImage`.
- Resolve every CPU/PPU access through the mapper's translation, then index
  the storage. Offsets outside the storage read as unmapped rather than
  panicking, so a mapper/layout mismatch degrades to open bus.
- Select a concrete mapper from an iNES mapper number (`from_image`).

Notes:
- CHR RAM accepts PPU writes; CHR ROM ignores them.
- PRG RAM is zeroed at construction and survives `reset`.
*/

use log::debug;

use crate::error::ConfigError;
use crate::mapper::{
    BankState, CHR_BANK_SIZE, CartridgeLayout, CpuMapping, Mapper, Mirroring, Nrom, WriteEffect,
};
use crate::mappers::{Cnrom, Uxrom};

/// Parsed contents of a cartridge, ready to be wired to a mapper.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartridgeImage {
    pub prg_rom: Vec<u8>,
    pub chr: Vec<u8>,
    pub chr_is_ram: bool,
    pub prg_ram_size: usize,
    pub mirroring: Mirroring,
}

impl CartridgeImage {
    /// PRG ROM with 8 KiB of CHR RAM, no PRG RAM, horizontal mirroring.
    pub fn new(prg_rom: Vec<u8>) -> Self {
        Self {
            prg_rom,
            chr: vec![0; CHR_BANK_SIZE],
            chr_is_ram: true,
            prg_ram_size: 0,
            mirroring: Mirroring::Horizontal,
        }
    }

    pub fn with_chr_rom(mut self, chr: Vec<u8>) -> Self {
        self.chr = chr;
        self.chr_is_ram = false;
        self
    }

    pub fn with_prg_ram(mut self, size: usize) -> Self {
        self.prg_ram_size = size;
        self
    }

    pub fn with_mirroring(mut self, mirroring: Mirroring) -> Self {
        self.mirroring = mirroring;
        self
    }

    pub fn layout(&self) -> CartridgeLayout {
        CartridgeLayout {
            prg_rom_len: self.prg_rom.len(),
            prg_ram_len: self.prg_ram_size,
            chr_len: self.chr.len(),
            chr_is_ram: self.chr_is_ram,
            mirroring: self.mirroring,
        }
    }
}

pub struct Cartridge {
    mapper: Box<dyn Mapper>,
    prg_rom: Vec<u8>,
    prg_ram: Vec<u8>,
    chr: Vec<u8>,
    chr_is_ram: bool,
}

impl std::fmt::Debug for Cartridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cartridge")
            .field("mapper", &self.mapper.name())
            .field("prg_rom_len", &self.prg_rom.len())
            .field("prg_ram_len", &self.prg_ram.len())
            .field("chr_len", &self.chr.len())
            .field("chr_is_ram", &self.chr_is_ram)
            .finish()
    }
}

impl Cartridge {
    /// Build a cartridge for a known iNES mapper number.
    pub fn from_image(image: CartridgeImage, mapper_id: u16) -> Result<Self, ConfigError> {
        let layout = image.layout();
        let mapper: Box<dyn Mapper> = match mapper_id {
            0 => Box::new(Nrom::new(&layout)?),
            2 => Box::new(Uxrom::new(&layout)?),
            3 => Box::new(Cnrom::new(&layout)?),
            other => return Err(ConfigError::UnsupportedMapper(other)),
        };
        Ok(Self::with_mapper(image, mapper))
    }

    /// Wire storage to an externally constructed mapper.
    pub fn with_mapper(image: CartridgeImage, mapper: Box<dyn Mapper>) -> Self {
        debug!(
            "cartridge: {} (mapper {}), PRG {} KiB, CHR {} KiB{}",
            mapper.name(),
            mapper.mapper_id(),
            image.prg_rom.len() / 1024,
            image.chr.len() / 1024,
            if image.chr_is_ram { " RAM" } else { "" }
        );
        Self {
            mapper,
            prg_rom: image.prg_rom,
            prg_ram: vec![0; image.prg_ram_size],
            chr: image.chr,
            chr_is_ram: image.chr_is_ram,
        }
    }

    /// CPU read in $4020-$FFFF. `None` when the mapper leaves the address
    /// unconnected. Translation is pure, so this is also the peek path.
    pub fn cpu_read(&self, addr: u16) -> Option<u8> {
        match self.mapper.translate_read(addr) {
            CpuMapping::PrgRom(off) => self.prg_rom.get(off).copied(),
            CpuMapping::PrgRam(off) => self.prg_ram.get(off).copied(),
            CpuMapping::Unmapped => None,
        }
    }

    /// CPU write in $4020-$FFFF. Returns false when nothing is connected.
    pub fn cpu_write(&mut self, addr: u16, value: u8) -> bool {
        match self.mapper.translate_write(addr, value) {
            WriteEffect::PrgRam(off) => match self.prg_ram.get_mut(off) {
                Some(cell) => {
                    *cell = value;
                    true
                }
                None => false,
            },
            WriteEffect::BankSwitch | WriteEffect::Ignored => true,
            WriteEffect::Unmapped => false,
        }
    }

    /// PPU pattern-table read ($0000-$1FFF). Unconnected CHR reads as 0.
    pub fn ppu_read(&self, addr: u16) -> u8 {
        self.mapper
            .translate_ppu(addr)
            .and_then(|off| self.chr.get(off).copied())
            .unwrap_or(0)
    }

    pub fn ppu_write(&mut self, addr: u16, value: u8) {
        if !self.chr_is_ram {
            return;
        }
        if let Some(cell) = self
            .mapper
            .translate_ppu(addr)
            .and_then(|off| self.chr.get_mut(off))
        {
            *cell = value;
        }
    }

    pub fn mirroring(&self) -> Mirroring {
        self.mapper.mirroring()
    }

    pub fn banks(&self) -> BankState {
        self.mapper.banks()
    }

    pub fn mapper(&self) -> &dyn Mapper {
        self.mapper.as_ref()
    }

    pub fn mapper_id(&self) -> u16 {
        self.mapper.mapper_id()
    }

    pub fn irq_pending(&self) -> bool {
        self.mapper.irq_pending()
    }

    /// PRG RAM contents (battery saves).
    pub fn prg_ram(&self) -> &[u8] {
        &self.prg_ram
    }

    /// Reset bank registers. Storage is untouched.
    pub fn reset(&mut self) {
        self.mapper.reset();
    }
}
