/*!
CPU interface dispatcher

Purpose
- Decode a 16-bit CPU address into exactly one region and forward the access.
- Keep decoding in one place so the `Bus` façade only owns state.

Notes
- Reads and writes are forwarded immediately. Nothing is buffered or cached:
  two reads of $2002 are two calls into the PPU port.
- The data-bus latch (`open_bus`) follows every byte that crosses the bus,
  read or written. Unclaimed reads return it under `UnmappedPolicy::OpenBus`.
- A window whose peripheral is not attached counts as unmapped.

Address map:
- $0000-$07FF: 2 KiB internal RAM
- $0800-$1FFF: mirrors of $0000-$07FF (mask & 0x07FF)
- $2000-$2007: PPU registers
- $2008-$3FFF: mirrors of $2000-$2007 (mask & 0x0007)
- $4000-$4013: APU channels
- $4014: OAM DMA, routed to the PPU port
- $4015: APU status/enables
- $4016: controller strobe (write) / port 1 data (read), input port
- $4017: APU frame counter (write) / port 2 data (read)
- $4018-$401F: CPU test mode, disabled on retail consoles (unmapped)
- $4020-$FFFF: cartridge, translated by the mapper
*/

use log::{error, trace};

use crate::bus::Bus;
use crate::config::UnmappedPolicy;

/// OAM DMA register; belongs to the PPU side even though it sits in the APU window.
pub const OAM_DMA: u16 = 0x4014;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

/// The handler an address resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Ram,
    /// Canonical register address ($2000-$2007, or $4014).
    Ppu(u16),
    Apu(u16),
    Input(u16),
    TestMode,
    Cartridge,
}

/// Decode an address. Total over the 16-bit space: every address maps to
/// exactly one region. Only $4017 depends on the access direction.
pub const fn decode(addr: u16, access: Access) -> Region {
    match addr {
        0x0000..=0x1FFF => Region::Ram,
        0x2000..=0x3FFF => Region::Ppu(0x2000 | (addr & 0x0007)),
        OAM_DMA => Region::Ppu(OAM_DMA),
        0x4016 => Region::Input(addr),
        0x4017 => match access {
            Access::Read => Region::Input(addr),
            Access::Write => Region::Apu(addr),
        },
        0x4000..=0x4015 => Region::Apu(addr),
        0x4018..=0x401F => Region::TestMode,
        0x4020..=0xFFFF => Region::Cartridge,
    }
}

/// CPU-visible read from the unified address space.
pub fn cpu_read(bus: &mut Bus, addr: u16) -> u8 {
    let value = match decode(addr, Access::Read) {
        Region::Ram => Some(bus.ram.read(addr)),
        Region::Ppu(reg) => bus.ppu.as_ref().map(|p| p.borrow_mut().read_register(reg)),
        Region::Apu(reg) => bus.apu.as_ref().map(|p| p.borrow_mut().read_register(reg)),
        Region::Input(reg) => bus.input.as_ref().map(|p| p.borrow_mut().read_register(reg)),
        Region::TestMode => None,
        Region::Cartridge => bus.cartridge.borrow().cpu_read(addr),
    };
    match value {
        Some(v) => {
            bus.open_bus = v;
            v
        }
        None => unmapped_read(bus, addr),
    }
}

/// CPU-visible write to the unified address space.
pub fn cpu_write(bus: &mut Bus, addr: u16, value: u8) {
    bus.open_bus = value;
    let claimed = match decode(addr, Access::Write) {
        Region::Ram => {
            bus.ram.write(addr, value);
            true
        }
        Region::Ppu(reg) => forward_write(bus.ppu.as_ref(), reg, value),
        Region::Apu(reg) => forward_write(bus.apu.as_ref(), reg, value),
        Region::Input(reg) => forward_write(bus.input.as_ref(), reg, value),
        Region::TestMode => false,
        Region::Cartridge => bus.cartridge.borrow_mut().cpu_write(addr, value),
    };
    if !claimed {
        unmapped_write(bus, addr, value);
    }
}

/// Side-effect-free read: RAM and cartridge only.
pub fn cpu_peek(bus: &Bus, addr: u16) -> Option<u8> {
    match decode(addr, Access::Read) {
        Region::Ram => Some(bus.ram.read(addr)),
        Region::Cartridge => bus.cartridge.borrow().cpu_read(addr),
        Region::Ppu(_) | Region::Apu(_) | Region::Input(_) | Region::TestMode => None,
    }
}

#[inline]
fn forward_write(port: Option<&crate::bus::SharedPort>, reg: u16, value: u8) -> bool {
    match port {
        Some(p) => {
            p.borrow_mut().write_register(reg, value);
            true
        }
        None => false,
    }
}

fn unmapped_read(bus: &Bus, addr: u16) -> u8 {
    match bus.unmapped {
        UnmappedPolicy::OpenBus => {
            trace!("open bus read ${addr:04X} -> ${:02X}", bus.open_bus);
            bus.open_bus
        }
        UnmappedPolicy::Strict => {
            error!("unmapped CPU read at ${addr:04X}");
            panic!("unmapped CPU read at ${addr:04X}");
        }
    }
}

fn unmapped_write(bus: &Bus, addr: u16, value: u8) {
    match bus.unmapped {
        UnmappedPolicy::OpenBus => {
            trace!("dropped write ${value:02X} -> ${addr:04X}");
        }
        UnmappedPolicy::Strict => {
            error!("unmapped CPU write ${value:02X} at ${addr:04X}");
            panic!("unmapped CPU write ${value:02X} at ${addr:04X}");
        }
    }
}
