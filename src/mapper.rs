/*!
Mapper subsystem: the address-translation contract and the NROM (mapper 0) baseline.

Purpose:
- Separate *where* a CPU or PPU address lands (the mapper's job) from the
  bytes themselves (owned by `Cartridge`).
- Keep the CPU/bus core independent of any concrete cartridge board: the bus
  only ever calls through `dyn Mapper`.

Contract:
- `translate_read` is pure: the same address maps to the same offset until a
  `translate_write` changes bank state. This makes side-effect-free peeks of
  cartridge space possible.
- `translate_write` may change internal bank selection and reports what the
  write did; the cartridge applies PRG RAM stores.
- `mirroring` is consumed by the external PPU; nothing in this crate reads it
  for decoding.

Address ranges handed to a mapper: CPU $4020-$FFFF, PPU $0000-$1FFF.
*/

use crate::error::ConfigError;

/// 16 KiB PRG ROM bank.
pub const PRG_BANK_SIZE: usize = 0x4000;
/// 8 KiB CHR bank.
pub const CHR_BANK_SIZE: usize = 0x2000;
/// Largest PRG RAM the $6000-$7FFF window can expose.
pub const PRG_RAM_WINDOW: usize = 0x2000;

/// Nametable arrangement reported to the PPU.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mirroring {
    #[default]
    Horizontal,
    Vertical,
    SingleScreenLower,
    SingleScreenUpper,
    FourScreen,
}

/// Where a CPU read in cartridge space lands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CpuMapping {
    PrgRom(usize),
    PrgRam(usize),
    Unmapped,
}

/// What a CPU write in cartridge space did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WriteEffect {
    /// Store the byte at this PRG RAM offset.
    PrgRam(usize),
    /// The write reprogrammed bank selection.
    BankSwitch,
    /// Mapped, but nothing happens (ROM space on a board without registers).
    Ignored,
    Unmapped,
}

/// Snapshot of bank configuration, for debuggers and save states.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct BankState {
    pub prg_bank_count: usize,
    pub chr_bank_count: usize,
    /// Bank visible in the switchable PRG window (0 on fixed boards).
    pub prg_bank: usize,
    /// Bank visible in the switchable CHR window (0 on fixed boards).
    pub chr_bank: usize,
}

/// Sizes of the storage a mapper translates into. The bytes themselves stay
/// in `Cartridge`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CartridgeLayout {
    pub prg_rom_len: usize,
    pub prg_ram_len: usize,
    pub chr_len: usize,
    pub chr_is_ram: bool,
    pub mirroring: Mirroring,
}

/// Common interface all cartridge mappers implement.
pub trait Mapper {
    /// iNES mapper number.
    fn mapper_id(&self) -> u16;

    fn name(&self) -> &'static str;

    fn translate_read(&self, addr: u16) -> CpuMapping;

    fn translate_write(&mut self, addr: u16, value: u8) -> WriteEffect;

    /// CHR offset for a PPU pattern-table address, `None` if nothing is there.
    fn translate_ppu(&self, addr: u16) -> Option<usize>;

    fn mirroring(&self) -> Mirroring;

    fn banks(&self) -> BankState;

    /// Power/reset: return bank registers to their power-on values.
    fn reset(&mut self) {}

    /// Whether this mapper is asserting its IRQ output.
    fn irq_pending(&self) -> bool {
        false
    }
}

/// Offset into PRG RAM for $6000-$7FFF, mirrored when the RAM is smaller
/// than the window.
#[inline]
pub(crate) fn prg_ram_offset(addr: u16, prg_ram_len: usize) -> Option<usize> {
    match addr {
        0x6000..=0x7FFF if prg_ram_len > 0 => Some((addr as usize - 0x6000) % prg_ram_len),
        _ => None,
    }
}

pub(crate) fn check_prg_ram(mapper: &'static str, len: usize) -> Result<(), ConfigError> {
    if len > PRG_RAM_WINDOW {
        return Err(ConfigError::PrgRamSize { mapper, len });
    }
    Ok(())
}

/// NROM (mapper 0): one fixed PRG image, one fixed CHR image, no registers.
///
/// - PRG ROM at $8000-$FFFF. Images smaller than 32 KiB repeat across the
///   window (NROM-128 appears twice).
/// - Optional PRG RAM at $6000-$7FFF.
/// - $4020-$5FFF is not connected.
#[derive(Clone, Debug)]
pub struct Nrom {
    prg_rom_len: usize,
    prg_ram_len: usize,
    chr_len: usize,
    mirroring: Mirroring,
}

impl Nrom {
    pub fn new(layout: &CartridgeLayout) -> Result<Self, ConfigError> {
        if layout.prg_rom_len == 0 {
            return Err(ConfigError::EmptyPrgRom);
        }
        if layout.prg_rom_len > 2 * PRG_BANK_SIZE {
            return Err(ConfigError::PrgRomSize {
                mapper: "NROM",
                bank_size: PRG_BANK_SIZE,
                len: layout.prg_rom_len,
            });
        }
        if layout.chr_len % CHR_BANK_SIZE != 0 {
            return Err(ConfigError::ChrSize {
                mapper: "NROM",
                bank_size: CHR_BANK_SIZE,
                len: layout.chr_len,
            });
        }
        check_prg_ram("NROM", layout.prg_ram_len)?;
        Ok(Self {
            prg_rom_len: layout.prg_rom_len,
            prg_ram_len: layout.prg_ram_len,
            chr_len: layout.chr_len,
            mirroring: layout.mirroring,
        })
    }
}

impl Mapper for Nrom {
    fn mapper_id(&self) -> u16 {
        0
    }

    fn name(&self) -> &'static str {
        "NROM"
    }

    fn translate_read(&self, addr: u16) -> CpuMapping {
        match addr {
            0x8000..=0xFFFF => CpuMapping::PrgRom((addr as usize - 0x8000) % self.prg_rom_len),
            _ => match prg_ram_offset(addr, self.prg_ram_len) {
                Some(off) => CpuMapping::PrgRam(off),
                None => CpuMapping::Unmapped,
            },
        }
    }

    fn translate_write(&mut self, addr: u16, _value: u8) -> WriteEffect {
        match addr {
            0x8000..=0xFFFF => WriteEffect::Ignored,
            _ => match prg_ram_offset(addr, self.prg_ram_len) {
                Some(off) => WriteEffect::PrgRam(off),
                None => WriteEffect::Unmapped,
            },
        }
    }

    fn translate_ppu(&self, addr: u16) -> Option<usize> {
        match addr {
            0x0000..=0x1FFF if self.chr_len > 0 => Some(addr as usize % self.chr_len),
            _ => None,
        }
    }

    fn mirroring(&self) -> Mirroring {
        self.mirroring
    }

    fn banks(&self) -> BankState {
        BankState {
            prg_bank_count: self.prg_rom_len.div_ceil(PRG_BANK_SIZE),
            chr_bank_count: self.chr_len / CHR_BANK_SIZE,
            prg_bank: 0,
            chr_bank: 0,
        }
    }
}
